//! Mustache template rendering.
//!
//! Thin wrapper over the `mustache` crate so the aggregator only deals in
//! [`TemplateError`]. Any `Serialize` value works as the context; missing
//! names render empty, sections and dotted names behave as in mustache.

use crate::error::TemplateError;
use serde::Serialize;

/// Compile `template` and render it against `data`.
pub fn render<T: Serialize>(template: &str, data: &T) -> Result<String, TemplateError> {
    let compiled = mustache::compile_str(template).map_err(TemplateError::Compile)?;
    compiled
        .render_to_string(data)
        .map_err(TemplateError::Render)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_substitution() {
        let data = json!({"greeting": "Hello", "emoji": "👋"});
        let out = render("{{emoji}} {{ greeting }}!", &data).unwrap();
        assert_eq!(out, "👋 Hello!");
    }

    #[test]
    fn test_dotted_path() {
        let data = json!({"quote": {"text": "Ship it", "author": "Someone"}});
        let out = render("> {{quote.text}} ({{quote.author}})", &data).unwrap();
        assert_eq!(out, "> Ship it (Someone)");
    }

    #[test]
    fn test_object_section() {
        let data = json!({"quote": {"text": "Ship it", "author": "Me"}});
        let out = render("{{#quote}}{{text}} - {{author}}{{/quote}}", &data).unwrap();
        assert_eq!(out, "Ship it - Me");
    }

    #[test]
    fn test_inverted_section() {
        let data = json!({"items": [], "flag": false});
        let out = render("{{^items}}none{{/items}}{{^flag}}!{{/flag}}", &data).unwrap();
        assert_eq!(out, "none!");
    }

    #[test]
    fn test_escaping_and_raw() {
        let data = json!({"bio": "Rust & <web>"});
        assert_eq!(render("{{bio}}", &data).unwrap(), "Rust &amp; &lt;web&gt;");
        assert_eq!(render("{{{bio}}}", &data).unwrap(), "Rust & <web>");
        assert_eq!(render("{{& bio}}", &data).unwrap(), "Rust & <web>");
    }

    #[test]
    fn test_missing_names_render_empty() {
        let data = json!({"count": "12"});
        assert_eq!(render("[{{count}}][{{nope}}][{{a.b}}]", &data).unwrap(), "[12][][]");
    }

    #[test]
    fn test_comment_is_dropped() {
        let data = json!({});
        assert_eq!(render("a{{! hidden }}b", &data).unwrap(), "ab");
    }

    #[test]
    fn test_unclosed_section_is_an_error() {
        let data = json!({"quote": {}});
        let err = render("{{#quote}}never closed", &data).unwrap_err();
        assert!(matches!(err, TemplateError::Compile(_)));
    }

    #[test]
    fn test_text_without_tags_passes_through() {
        let data = json!({});
        assert_eq!(render("# Title\n\nbody", &data).unwrap(), "# Title\n\nbody");
    }
}
