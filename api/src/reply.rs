use anyhow::{Context, Result};
use serde_json::Value;

/// Parse the JSON document a model reply carries, tolerating the wrappers
/// models habitually add around it.
pub fn parse_reply(raw: &str) -> Result<Value> {
    let body = extract_json(raw)
        .ok_or_else(|| anyhow::anyhow!("model reply contained no JSON document"))?;
    serde_json::from_str(body).context("model reply was not valid JSON")
}

/// Locate the JSON document inside a reply. An enclosing markdown fence is
/// removed if present; otherwise the span from the first opening bracket
/// to the last matching closing bracket is taken.
pub fn extract_json(reply: &str) -> Option<&str> {
    let trimmed = reply.trim();

    if let Some(body) = strip_fence(trimmed) {
        return Some(body);
    }

    bracket_span(trimmed)
}

fn strip_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("```")?;
    // The opening fence line may carry a language tag; drop the whole line.
    let body_start = rest.find('\n')?;
    let body = rest[body_start + 1..].strip_suffix("```")?;
    Some(body.trim())
}

fn bracket_span(text: &str) -> Option<&str> {
    let (open, close) = match (text.find('{'), text.find('[')) {
        (Some(obj), Some(arr)) if arr < obj => ('[', ']'),
        (Some(_), _) => ('{', '}'),
        (None, Some(_)) => ('[', ']'),
        (None, None) => return None,
    };

    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end <= start {
        return None;
    }
    Some(text[start..=end].trim())
}
