// Shared prompt helpers used by every prompt template.
// Each module that needs LLM calls defines its own prompts.rs alongside it.

/// Upper bound on how much source material is embedded in a single prompt,
/// counted in characters (Unicode scalar values).
pub const MATERIAL_CHAR_LIMIT: usize = 15_000;

/// Returns the longest prefix of `text` holding at most `limit` characters.
/// Never splits a multi-byte character.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Substitutes `{key}` placeholders in a template.
///
/// Only the template is scanned. Inserted values are copied verbatim, so
/// braces inside material or a question are never treated as placeholders.
/// Unknown placeholders are left as written.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_limit() {
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_exact_limit() {
        assert_eq!(truncate_chars("abcdef", 6), "abcdef");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "ééééé";
        let cut = truncate_chars(text, 2);
        assert_eq!(cut, "éé");
        assert_eq!(cut.len(), 4);
    }

    #[test]
    fn test_fill_template_replaces_all_occurrences() {
        let out = fill_template("{a} and {a} then {b}", &[("a", "x"), ("b", "y")]);
        assert_eq!(out, "x and x then y");
    }

    #[test]
    fn test_fill_template_leaves_inserted_braces_alone() {
        let out = fill_template(
            "MATERIAL:\n{material}\nQUESTION: {question}",
            &[
                ("material", "print(f\"{question}\") uses {x}."),
                ("question", "What does print do?"),
            ],
        );
        assert_eq!(
            out,
            "MATERIAL:\nprint(f\"{question}\") uses {x}.\nQUESTION: What does print do?"
        );
    }

    #[test]
    fn test_fill_template_keeps_unknown_placeholders() {
        assert_eq!(fill_template("{a} {b} {", &[("a", "x")]), "x {b} {");
    }
}
