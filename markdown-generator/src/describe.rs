// Comments starting with these are tooling directives, not documentation.
const DIRECTIVE_PREFIXES: [&str; 3] = ["protolint:", "--8<--", "Next ID:"];

/// Clean and combine the raw comments attached to an element into a single
/// description line.
pub fn extract_comments(comments: &[String]) -> String {
    comments
        .iter()
        .filter_map(|c| clean_comment(c))
        .collect::<Vec<_>>()
        .join(" ")
}

fn clean_comment(raw: &str) -> Option<String> {
    let text = raw.trim();
    let text = text.strip_prefix("//").unwrap_or(text);
    let text = text.strip_prefix("/*").unwrap_or(text);
    let text = text.strip_suffix("*/").unwrap_or(text);

    let combined = text
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix('*').unwrap_or(line).trim()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if combined.is_empty() || DIRECTIVE_PREFIXES.iter().any(|p| combined.starts_with(p)) {
        None
    } else {
        Some(combined)
    }
}
