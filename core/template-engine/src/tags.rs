//! FILENAME: core/template-engine/src/tags.rs
//! PURPOSE: Cheap textual checks on cell content.
//! CONTEXT: Decides which cells reach the evaluator and in which shape,
//! without compiling anything: a cell that is exactly one `{{ expr }}` is
//! evaluated as an expression, any other cell with a tag is rendered as a
//! template.

/// Splits the inside of a `{% ... %}` tag into its keyword and the remainder.
/// `"for x in items"` becomes `("for", "x in items")`.
pub fn split_tag(inner: &str) -> (&str, &str) {
    let inner = inner.trim();
    let end = inner
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(inner.len());
    (&inner[..end], inner[end..].trim())
}

/// Splits a for-header `"x in items"` into `("x", "items")`.
pub fn split_for_header(header: &str) -> Option<(&str, &str)> {
    let header = header.trim();
    let var_end = header.find(char::is_whitespace)?;
    let var = &header[..var_end];

    let mut chars = var.chars();
    let starts_ok = chars.next().is_some_and(|c| c.is_alphabetic() || c == '_');
    if !starts_ok || !chars.all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }

    let iterable = header[var_end..].trim_start().strip_prefix("in")?;
    if !iterable.starts_with(char::is_whitespace) {
        return None;
    }

    let iterable = iterable.trim();
    (!iterable.is_empty()).then_some((var, iterable))
}

/// Returns the inner expression text if `text` is exactly one `{{ expr }}`
/// tag, ignoring surrounding whitespace and whitespace-control markers.
pub fn pure_expression(text: &str) -> Option<&str> {
    let inner = text.trim().strip_prefix("{{")?.strip_suffix("}}")?;
    let inner = inner.strip_prefix('-').unwrap_or(inner);
    let inner = inner.strip_suffix('-').unwrap_or(inner).trim();

    if inner.is_empty() || inner.contains("}}") || inner.contains("{{") {
        return None;
    }
    Some(inner)
}

/// Returns true if `text` contains at least one complete `{{ }}` or `{% %}` tag.
pub fn has_template_tag(text: &str) -> bool {
    [("{{", "}}"), ("{%", "%}")].iter().any(|(open, close)| {
        text.find(open)
            .is_some_and(|start| text[start + open.len()..].contains(close))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_expression_detection() {
        assert_eq!(pure_expression("{{ name }}"), Some("name"));
        assert_eq!(pure_expression("  {{ price | round(2) }}  "), Some("price | round(2)"));
        assert_eq!(pure_expression("{{- x -}}"), Some("x"));
        assert_eq!(pure_expression("Total: {{ x }}"), None);
        assert_eq!(pure_expression("{{ a }} {{ b }}"), None);
        assert_eq!(pure_expression("{% for x in items %}"), None);
        assert_eq!(pure_expression("{{ }}"), None);
    }

    #[test]
    fn has_template_tag_detection() {
        assert!(has_template_tag("{{ name }}"));
        assert!(has_template_tag("{% for x in items %}"));
        assert!(has_template_tag("Hello {{ name }}!"));
        assert!(has_template_tag("}} then {{ x }}"));
        assert!(!has_template_tag("Hello World"));
        assert!(!has_template_tag("{{ unterminated"));
        assert!(!has_template_tag("{# only a comment #}"));
    }

    #[test]
    fn split_helpers() {
        assert_eq!(split_tag(" for x in items "), ("for", "x in items"));
        assert_eq!(split_tag("endfor"), ("endfor", ""));

        assert_eq!(split_for_header("item in items"), Some(("item", "items")));
        assert_eq!(split_for_header("p in data.products"), Some(("p", "data.products")));
        assert_eq!(split_for_header("x in"), None);
        assert_eq!(split_for_header("x items"), None);
        assert_eq!(split_for_header("x inside"), None);
        assert_eq!(split_for_header("1x in xs"), None);
    }
}
