//! Structural validation: well-formedness, root element and tag vocabulary.

use super::document::{self, Element, Node};
use super::local_name;
use super::vocabulary::is_known_tag;
use serde::Serialize;

/// Outcome of a structural check. Warnings never affect `valid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

pub fn validate(source: &str) -> Verdict {
    let document = match document::parse(source) {
        Ok(document) => document,
        Err(err) => {
            return Verdict {
                valid: false,
                errors: vec![err.to_string()],
                warnings: Vec::new(),
            };
        }
    };

    let mut errors = Vec::new();
    let root_name = local_name(&document.root.name);
    if root_name != "svg" {
        errors.push(format!("Root element must be 'svg', found '{root_name}'"));
    }

    let mut warnings = Vec::new();
    collect_unknown_tags(&document.root, &mut warnings);

    Verdict {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

// Pre-order, so warnings follow document order.
fn collect_unknown_tags(element: &Element, warnings: &mut Vec<String>) {
    let name = local_name(&element.name);
    if name != "svg" && !is_known_tag(name) {
        warnings.push(format!("Non-standard SVG tag found: '{}'", element.name));
    }
    for child in &element.children {
        if let Node::Element(child) = child {
            collect_unknown_tags(child, warnings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_document_is_clean() {
        let verdict = validate(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">
  <defs><linearGradient id="g"><stop offset="0" stop-color="#fff"/></linearGradient></defs>
  <g><circle cx="12" cy="12" r="10"/><path d="M0 0L10 10"/></g>
</svg>"##,
        );
        assert!(verdict.valid);
        assert!(verdict.errors.is_empty());
        assert!(verdict.warnings.is_empty());
    }

    #[test]
    fn malformed_xml_fails_fast() {
        let verdict = validate("<svg><rect></svg>");
        assert!(!verdict.valid);
        assert_eq!(verdict.errors.len(), 1);
        assert!(verdict.warnings.is_empty());
    }

    #[test]
    fn malformed_xml_skips_tag_checks() {
        let verdict = validate("<g><customShape></g>");
        assert!(!verdict.valid);
        assert_eq!(verdict.errors.len(), 1);
        assert!(verdict.warnings.is_empty());
    }

    #[test]
    fn empty_input_is_invalid() {
        assert!(!validate("").valid);
        assert!(!validate("  \n ").valid);
    }

    #[test]
    fn wrong_root_reported() {
        let verdict = validate("<g><rect/></g>");
        assert!(!verdict.valid);
        assert_eq!(verdict.errors, vec!["Root element must be 'svg', found 'g'"]);
    }

    #[test]
    fn root_comparison_is_case_sensitive() {
        let verdict = validate("<Svg/>");
        assert!(!verdict.valid);
        assert!(verdict.errors[0].contains("found 'Svg'"));
    }

    #[test]
    fn prefixed_svg_root_accepted() {
        let verdict = validate(r#"<ns:svg xmlns:ns="http://www.w3.org/2000/svg"><ns:rect/></ns:svg>"#);
        assert!(verdict.valid);
        assert!(verdict.warnings.is_empty());
    }

    #[test]
    fn unknown_tag_is_a_warning_only() {
        let verdict = validate("<svg><customShape/></svg>");
        assert!(verdict.valid);
        assert!(verdict.errors.is_empty());
        assert_eq!(verdict.warnings.len(), 1);
        assert!(verdict.warnings[0].contains("customShape"));
    }

    #[test]
    fn warnings_never_flip_validity() {
        let verdict = validate("<svg><foo/><bar><baz/></bar></svg>");
        assert!(verdict.valid);
        assert_eq!(verdict.warnings.len(), 3);
    }

    #[test]
    fn deep_unknown_tags_found_in_document_order() {
        let verdict = validate("<svg><g><g><g><alpha/></g></g><beta/></g><gamma/></svg>");
        assert_eq!(
            verdict.warnings,
            vec![
                "Non-standard SVG tag found: 'alpha'",
                "Non-standard SVG tag found: 'beta'",
                "Non-standard SVG tag found: 'gamma'",
            ]
        );
    }

    #[test]
    fn wrong_root_still_collects_warnings() {
        let verdict = validate("<doc><widget/></doc>");
        assert!(!verdict.valid);
        assert_eq!(verdict.errors.len(), 1);
        assert_eq!(verdict.warnings.len(), 2);
    }

    #[test]
    fn attributes_and_text_are_not_elements() {
        let verdict = validate(r#"<svg customAttr="1"><text>customShape</text></svg>"#);
        assert!(verdict.valid);
        assert!(verdict.warnings.is_empty());
    }

    #[test]
    fn serializes_to_expected_shape() {
        let verdict = validate("<svg/>");
        let value = serde_json::to_value(&verdict).expect("json");
        assert_eq!(
            value,
            serde_json::json!({"valid": true, "errors": [], "warnings": []})
        );
    }

    #[test]
    fn lexically_malformed_markup_is_invalid() {
        for source in [
            r#"<svg a="<"/>"#,
            "<svg><1rect/></svg>",
            "<svg>]]></svg>",
            "<svg a='1'b='2'/>",
            "<svg>\0</svg>",
            "<svg><!-- a -- b --></svg>",
        ] {
            let verdict = validate(source);
            assert!(!verdict.valid, "{source}");
            assert_eq!(verdict.errors.len(), 1, "{source}");
            assert!(verdict.warnings.is_empty(), "{source}");
        }
    }
}
