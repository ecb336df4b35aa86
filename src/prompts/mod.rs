use std::sync::OnceLock;

use minijinja::Environment;
use serde::Serialize;

const TEMPLATE_NAME: &str = "review_prompt";

// A .txt template name keeps minijinja auto-escaping off: the snippet is
// interpolated verbatim, whatever it contains.
const REVIEW_PROMPT_TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/templates/review_prompt.txt"
));

static TEMPLATE_STATE: OnceLock<Environment<'static>> = OnceLock::new();

#[derive(Serialize)]
struct PromptContext<'a> {
    code: &'a str,
}

/// Wrap a code snippet in the fixed review instructions sent to the model.
///
/// Callers are expected to reject blank snippets before building a prompt;
/// this function accepts any string.
pub fn build_review_prompt(code: &str) -> String {
    let env = TEMPLATE_STATE.get_or_init(|| {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, REVIEW_PROMPT_TEMPLATE)
            .expect("invalid review prompt template");
        env
    });

    env.get_template(TEMPLATE_NAME)
        .and_then(|template| template.render(PromptContext { code }))
        .unwrap_or_else(|err| panic!("review prompt rendering failed: {err}"))
}
