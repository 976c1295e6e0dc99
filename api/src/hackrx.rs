use serde::Serialize;
use serde_json::Value;

/// Instruction preamble sent ahead of every serialized payload.
pub const PROMPT: &str = "For the given question below, refer to the document url and answer the question in one or two medium to long sentences max.\nThe returned answers must be in json format string, with no other text with it before or after it, with key being \"answers\", and value being JSON array of answers";

pub const MISSING_FIELDS_ERROR: &str = "Missing 'documents' or 'questions' in payload";

/// `documents` must be a non-empty string and `questions` a non-empty
/// array or object. Anything else is rejected before the model is called.
pub fn has_required_fields(payload: &Value) -> bool {
    let documents = payload
        .get("documents")
        .and_then(Value::as_str)
        .map_or(false, |s| !s.is_empty());

    let questions = match payload.get("questions") {
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        _ => false,
    };

    documents && questions
}

/// The full outbound prompt: preamble, newline, then the whole payload
/// pretty-printed with four-space indentation.
pub fn build_prompt(payload: &Value) -> String {
    format!("{}\n{}", PROMPT, to_pretty_json(payload))
}

fn to_pretty_json(payload: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    payload
        .serialize(&mut ser)
        .expect("serializing a JSON value cannot fail");
    String::from_utf8(buf).expect("serde_json emits valid UTF-8")
}
