use minijinja::value::Value;
use minijinja::Environment;
use once_cell::sync::Lazy;
use serde::Serialize;

const PAGE_TEMPLATE_NAME: &str = "index.html";

const PAGE_TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/templates/index.html"
));

// The .html template name turns minijinja auto-escaping on for everything
// except values a filter has already marked safe.
static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.add_filter("nl2br", nl2br);
    env.add_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)
        .expect("invalid page template");
    env
});

#[derive(Debug, Serialize)]
pub struct PageContext {
    pub model: String,
    pub language: &'static str,
    pub warning: Option<String>,
    pub review: Option<String>,
    pub code: Option<String>,
}

impl PageContext {
    pub fn empty(model: &str) -> Self {
        Self {
            model: model.to_string(),
            language: "python",
            warning: None,
            review: None,
            code: None,
        }
    }

    pub fn warning(model: &str, message: String) -> Self {
        Self {
            warning: Some(message),
            ..Self::empty(model)
        }
    }

    pub fn reviewed(model: &str, code: String, review: String) -> Self {
        Self {
            review: Some(review),
            code: Some(code),
            ..Self::empty(model)
        }
    }
}

pub fn page(ctx: &PageContext) -> Result<String, minijinja::Error> {
    TEMPLATES.get_template(PAGE_TEMPLATE_NAME)?.render(ctx)
}

/// Escape the text, then turn every line break into `<br>`. The result is
/// marked safe so the tags survive auto-escaping; no newline characters
/// remain in the output.
fn nl2br(text: String) -> Value {
    let mut out = String::with_capacity(text.len());
    let mut first = true;
    for line in text.split('\n') {
        if !first {
            out.push_str("<br>");
        }
        first = false;
        out.push_str(&escape_html(line.trim_end_matches('\r')));
    }
    Value::from_safe_string(out)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
