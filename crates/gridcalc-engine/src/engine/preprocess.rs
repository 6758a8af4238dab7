//! Formula source transformations.
//!
//! - **Comment stripping**: `//` and `/* */` comments outside string literals
//!   are removed before anything else looks at the source.
//! - **Canonical rendering**: formulas are shown back to the user with
//!   comments and whitespace outside string literals dropped, unless removing
//!   the whitespace would fuse two tokens (`a b`, `1 - -2`).
//! - **Literal promotion**: before compiling, integer literals become float
//!   literals so arithmetic follows spreadsheet rules (`1/2` is `0.5`).

/// Replace each comment outside string literals with a single space.
///
/// An unterminated block comment is left in place for the parser to report.
pub fn strip_comments(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        if ch == '/' {
            match chars.get(i + 1).copied() {
                Some('/') => {
                    while i < chars.len() && chars[i] != '\n' {
                        i += 1;
                    }
                    out.push(' ');
                    continue;
                }
                Some('*') => {
                    let Some(end) = block_comment_end(&chars, i) else {
                        out.extend(&chars[i..]);
                        break;
                    };
                    i = end;
                    out.push(' ');
                    continue;
                }
                _ => {}
            }
        }

        if ch == '"' {
            in_string = true;
        }
        out.push(ch);
        i += 1;
    }

    out
}

/// Index just past the `*/` that closes the block comment opened at `start`.
/// Block comments nest.
fn block_comment_end(chars: &[char], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = start;
    while i + 1 < chars.len() {
        match (chars[i], chars[i + 1]) {
            ('/', '*') => {
                depth += 1;
                i += 2;
            }
            ('*', '/') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => i += 1,
        }
    }
    None
}

/// Render a formula expression in canonical form.
pub fn canonical_expression(source: &str) -> String {
    let source = strip_comments(source);
    let mut out = String::with_capacity(source.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut pending_space = false;

    for ch in source.trim().chars() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }

        if pending_space {
            pending_space = false;
            if let Some(prev) = out.chars().next_back()
                && tokens_would_merge(prev, ch)
            {
                out.push(' ');
            }
        }

        if ch == '"' {
            in_string = true;
        }
        out.push(ch);
    }

    out
}

/// Rewrite integer literals as float literals (`2` -> `2.0`).
///
/// Digits that are part of a reference (`A1`), a float (`1.5`, `1e-5`), or a
/// string literal are left alone.
pub fn promote_integer_literals(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len() + 8);
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        let starts_token = i == 0 || !is_word_char(chars[i - 1]);
        if ch.is_ascii_digit() && starts_token && !is_signed_exponent(&chars, i) {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            out.extend(&chars[start..i]);
            if !chars.get(i).is_some_and(|&c| is_word_char(c)) {
                out.push_str(".0");
            }
            continue;
        }

        if ch == '"' {
            in_string = true;
        }
        out.push(ch);
        i += 1;
    }

    out
}

/// Whether the digits at `i` are the exponent of a number like `2.5e-3`.
fn is_signed_exponent(chars: &[char], i: usize) -> bool {
    if i < 3 || !matches!(chars[i - 1], '+' | '-') || !matches!(chars[i - 2], 'e' | 'E') {
        return false;
    }
    let mantissa_end = i - 2;
    let mut start = mantissa_end;
    while start > 0 && (chars[start - 1].is_ascii_digit() || chars[start - 1] == '.') {
        start -= 1;
    }
    chars[start..mantissa_end].iter().any(char::is_ascii_digit)
        && (start == 0 || !is_word_char(chars[start - 1]))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '/' | '%' | '<' | '>' | '=' | '!' | '&' | '|' | '^' | '~'
    )
}

fn tokens_would_merge(prev: char, next: char) -> bool {
    (is_word_char(prev) && is_word_char(next)) || (is_operator_char(prev) && is_operator_char(next))
}
