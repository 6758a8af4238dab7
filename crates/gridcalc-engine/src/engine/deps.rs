use regex::Regex;
use std::sync::OnceLock;

use super::position::Position;
use super::preprocess::strip_comments;

/// A cell reference as it appears in formula source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceToken {
    pub name: String,
    pub position: Position,
}

/// Extract all cell references from a formula, in source order.
///
/// References are upper-case `A1` tokens outside comments and string
/// literals. Tokens that fall outside the grid (e.g. `ZZZZ1`) are kept with
/// [`Position::NONE`].
pub fn extract_references(script: &str) -> Vec<ReferenceToken> {
    // Ignore references inside comments and string literals.
    let script = strip_string_literals(&strip_comments(script));

    cell_re()
        .find_iter(&script)
        .map(|m| ReferenceToken {
            name: m.as_str().to_string(),
            position: Position::from_a1(m.as_str()),
        })
        .collect()
}

fn cell_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[A-Z]+[0-9]+\b").expect("reference regex must compile"))
}

fn strip_string_literals(script: &str) -> String {
    let mut out = String::with_capacity(script.len());
    let mut in_string = false;
    let mut escaped = false;

    for ch in script.chars() {
        if in_string {
            if escaped {
                escaped = false;
                out.push(' ');
                continue;
            }
            if ch == '\\' {
                escaped = true;
                out.push(' ');
                continue;
            }
            if ch == '"' {
                in_string = false;
                out.push('"');
            } else {
                out.push(' ');
            }
        } else if ch == '"' {
            in_string = true;
            out.push('"');
        } else {
            out.push(ch);
        }
    }

    out
}
