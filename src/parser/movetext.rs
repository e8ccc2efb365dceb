use regex::Regex;

const RESULT_MARKERS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Remove everything that is not mainline movetext: tag pairs, `{...}`
/// comments, `;` line comments and `(...)` variations (nested to any depth).
///
/// Removed spans are replaced by a single space so that neighbouring tokens
/// never merge.
pub fn strip_annotations(pgn: &str) -> String {
    let mut output = String::with_capacity(pgn.len());
    let mut chars = pgn.chars().peekable();
    let mut variation_depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                for inner in chars.by_ref() {
                    if inner == '}' {
                        break;
                    }
                }
                output.push(' ');
            }
            ';' => {
                for inner in chars.by_ref() {
                    if inner == '\n' {
                        break;
                    }
                }
                output.push(' ');
            }
            '[' => {
                skip_bracketed(&mut chars);
                output.push(' ');
            }
            '(' => {
                variation_depth += 1;
            }
            ')' => {
                variation_depth = variation_depth.saturating_sub(1);
                output.push(' ');
            }
            _ if variation_depth > 0 => {}
            _ => output.push(c),
        }
    }

    output
}

/// Skip a `[...]` span, ignoring `]` inside a quoted tag value.
fn skip_bracketed(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    let mut in_quotes = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' if in_quotes => {
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ']' if !in_quotes => break,
            _ => {}
        }
    }
}

/// Flatten cleaned movetext into one token per ply, White first.
///
/// `move_number` must match a leading move-number label such as `12.` or
/// `12...`. Labels, NAGs, result markers and bracket leftovers are dropped and
/// trailing `!`/`?` glyphs are removed; check and mate markers stay.
pub fn extract_moves(cleaned: &str, move_number: &Regex) -> Vec<String> {
    cleaned
        .split_whitespace()
        .filter_map(|raw| normalize_token(raw, move_number))
        .collect()
}

fn normalize_token(raw: &str, move_number: &Regex) -> Option<String> {
    let token = match move_number.find(raw) {
        Some(label) => &raw[label.end()..],
        None => raw,
    };

    if token.is_empty() || is_result_marker(token) || is_annotation_leftover(token) {
        return None;
    }

    let token = token.trim_end_matches(['!', '?']);
    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}

fn is_result_marker(token: &str) -> bool {
    RESULT_MARKERS.contains(&token)
}

fn is_annotation_leftover(token: &str) -> bool {
    token.starts_with('[') || token.starts_with('$') || token.starts_with('{')
}
