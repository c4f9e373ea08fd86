use super::document;
use super::{SvgError, local_name};
use serde::Serialize;

/// Root-level attributes of interest. Absent fields are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SvgMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(rename = "viewBox", skip_serializing_if = "Option::is_none")]
    pub view_box: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

pub fn extract(source: &str) -> Result<SvgMetadata, SvgError> {
    let root = document::parse(source)?.root;
    let title = root
        .child_elements()
        .find(|child| local_name(&child.name) == "title")
        .map(|title| title.text_content().trim().to_string());

    Ok(SvgMetadata {
        width: root.attribute("width").map(str::to_string),
        height: root.attribute("height").map(str::to_string),
        view_box: root.attribute("viewBox").map(str::to_string),
        title,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_root_attributes_and_title() {
        let metadata = extract(
            r#"<svg width="24" height="12" viewBox="0 0 24 12"><title> Arrow </title><path d="M0 0"/></svg>"#,
        )
        .expect("metadata");
        assert_eq!(
            serde_json::to_value(&metadata).expect("json"),
            json!({"width": "24", "height": "12", "viewBox": "0 0 24 12", "title": "Arrow"})
        );
    }

    #[test]
    fn absent_fields_are_omitted() {
        let metadata = extract(r#"<svg viewBox="0 0 1 1"/>"#).expect("metadata");
        assert_eq!(
            serde_json::to_value(&metadata).expect("json"),
            json!({"viewBox": "0 0 1 1"})
        );
    }

    #[test]
    fn nested_title_is_not_the_document_title() {
        let metadata = extract("<svg><g><title>inner</title></g></svg>").expect("metadata");
        assert_eq!(metadata.title, None);
    }

    #[test]
    fn malformed_source_fails() {
        assert!(extract("<svg width='1'>").is_err());
    }
}
