use serde_json::Value;

use crate::error::LogError;

/// Boundary between two naively appended objects, and its repaired form.
const OBJECT_BOUNDARY: &str = "}\n{";
const REPAIRED_BOUNDARY: &str = "},\n{";

/// Turn `{...}\n{...}\n{...}` into `[\n{...},\n{...},\n{...}\n]`.
///
/// Purely textual. [`parse_log_text`] escapes raw newlines inside strings
/// first, so the boundary can only occur between objects.
pub fn repair_concatenated(text: &str) -> String {
    let joined = text.replace(OBJECT_BOUNDARY, REPAIRED_BOUNDARY);
    format!("[\n{joined}\n]")
}

/// Parse full log text into its JSON elements, in file order.
///
/// Tries a direct parse first and falls back to [`repair_concatenated`] once.
pub fn parse_log_text(text: &str) -> Result<Vec<Value>, LogError> {
    let text = escape_controls_in_strings(text);

    let value = match serde_json::from_str::<Value>(&text) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "direct parse failed, repairing concatenated log");
            let repaired = repair_concatenated(&text);
            serde_json::from_str::<Value>(&repaired)
                .map_err(|source| LogError::IrrecoverableParse { source })?
        }
    };

    Ok(match value {
        Value::Array(items) => items,
        single => vec![single],
    })
}

/// Escape control characters that appear inside string literals.
///
/// Shell hooks write multi-line commands verbatim, which strict JSON rejects.
/// Whitespace between tokens is left as is.
fn escape_controls_in_strings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    for c in text.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            } else if c < ' ' {
                push_escaped_control(&mut out, c);
                continue;
            }
        } else if c == '"' {
            in_string = true;
        }
        out.push(c);
    }
    out
}

fn push_escaped_control(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        other => out.push_str(&format!("\\u{:04x}", other as u32)),
    }
}
