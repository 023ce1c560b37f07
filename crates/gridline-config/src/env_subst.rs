use std::collections::HashMap;

/// Result of one substitution pass: the rewritten text plus a diagnostic
/// per placeholder that stayed unresolved.
#[derive(Debug, Clone)]
pub struct Substitution {
    pub text: String,
    pub warnings: Vec<String>,
}

/// Expand `${NAME}` placeholders against an environment snapshot.
///
/// Fallback chains resolve left-to-right, first defined wins:
/// `${PRIMARY:-${SECONDARY}:-literal}`. A fully unresolved placeholder is
/// left in place verbatim and reported as a warning. `\$` is an escaped
/// dollar and is never treated as a placeholder start; the escape itself
/// is preserved so display layers can restore the literal `$` after all
/// substitution passes are done.
pub fn substitute(raw: &str, env: &HashMap<String, String>) -> Substitution {
    let mut text = String::with_capacity(raw.len());
    let mut warnings = Vec::new();
    let bytes = raw.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if raw[i..].starts_with("\\$") {
            text.push_str("\\$");
            i += 2;
            continue;
        }
        if raw[i..].starts_with("${") {
            match find_closing_brace(raw, i) {
                Some(end) => {
                    let inner = &raw[i + 2..end];
                    match resolve_chain(inner, env) {
                        Some(value) => text.push_str(&value),
                        None => {
                            let literal = &raw[i..=end];
                            warnings.push(format!("unresolved placeholder: {}", literal));
                            text.push_str(literal);
                        }
                    }
                    i = end + 1;
                    continue;
                }
                None => {
                    // Unbalanced braces: keep the rest verbatim.
                    warnings.push(format!("unterminated placeholder: {}", &raw[i..]));
                    text.push_str(&raw[i..]);
                    break;
                }
            }
        }
        let ch = raw[i..].chars().next().unwrap_or('\u{0}');
        text.push(ch);
        i += ch.len_utf8();
    }

    Substitution { text, warnings }
}

/// Index of the `}` closing the `${` that starts at `start`, accounting
/// for nested placeholders.
fn find_closing_brace(raw: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = start;
    while i < raw.len() {
        if raw[i..].starts_with("${") {
            depth += 1;
            i += 2;
        } else if raw[i..].starts_with('}') {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
            i += 1;
        } else {
            i += raw[i..].chars().next().map(char::len_utf8).unwrap_or(1);
        }
    }
    None
}

/// Resolve the inside of one placeholder. The first alternative is a
/// variable name; later ones are nested placeholders or literal defaults.
fn resolve_chain(inner: &str, env: &HashMap<String, String>) -> Option<String> {
    let alternatives = split_top_level(inner);
    let (first, rest) = alternatives.split_first()?;

    if let Some(value) = env.get(first.trim()) {
        return Some(value.clone());
    }

    for alt in rest {
        let alt = alt.trim();
        if let Some(stripped) = alt.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
            if let Some(value) = resolve_chain(stripped, env) {
                return Some(value);
            }
        } else {
            // Literal default: always defined, ends the chain.
            return Some(alt.to_string());
        }
    }

    None
}

/// Split on `:-` separators that are not inside a nested placeholder.
fn split_top_level(inner: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut segment_start = 0;
    let mut i = 0;

    while i < inner.len() {
        if inner[i..].starts_with("${") {
            depth += 1;
            i += 2;
        } else if inner[i..].starts_with('}') && depth > 0 {
            depth -= 1;
            i += 1;
        } else if depth == 0 && inner[i..].starts_with(":-") {
            parts.push(&inner[segment_start..i]);
            i += 2;
            segment_start = i;
        } else {
            i += inner[i..].chars().next().map(char::len_utf8).unwrap_or(1);
        }
    }
    parts.push(&inner[segment_start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_simple_substitution() {
        let result = substitute("host=${HOST}", &env(&[("HOST", "example.com")]));
        assert_eq!(result.text, "host=example.com");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_unresolved_left_literal_with_warning() {
        let result = substitute("host=${MISSING}", &env(&[]));
        assert_eq!(result.text, "host=${MISSING}");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("${MISSING}"));
    }

    #[test]
    fn test_fallback_chain_first_defined_wins() {
        let e = env(&[("B", "second")]);
        let result = substitute("${A:-${B}:-third}", &e);
        assert_eq!(result.text, "second");

        let e = env(&[("A", "first"), ("B", "second")]);
        let result = substitute("${A:-${B}:-third}", &e);
        assert_eq!(result.text, "first");

        let result = substitute("${A:-${B}:-third}", &env(&[]));
        assert_eq!(result.text, "third");
    }

    #[test]
    fn test_escaped_dollar_untouched() {
        let result = substitute("price \\${5}", &env(&[("5", "nope")]));
        assert_eq!(result.text, "price \\${5}");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_multiple_placeholders() {
        let e = env(&[("A", "1"), ("B", "2")]);
        let result = substitute("${A}-${B}-${C:-x}", &e);
        assert_eq!(result.text, "1-2-x");
    }

    #[test]
    fn test_unterminated_placeholder_kept() {
        let result = substitute("broken ${OOPS", &env(&[]));
        assert_eq!(result.text, "broken ${OOPS");
        assert_eq!(result.warnings.len(), 1);
    }
}
