//! JSX component generation for React and React Native.
//!
//! The web flavour keeps tag names and rewrites attributes into React props.
//! The native flavour maps every element onto its `react-native-svg`
//! component and drops elements that library does not provide.

use super::document::{self, Element, Node};
use super::{SvgError, local_name, prefix};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Web,
    Native,
}

const INDENT: &str = "  ";

const EDITOR_PREFIXES: &[&str] = &["sodipodi", "inkscape"];

// Whitespace between inline children of these elements is rendered.
const TEXT_CONTENT_ELEMENTS: &[&str] = &["text", "textPath", "tspan"];

const NATIVE_COMPONENTS: &[(&str, &str)] = &[
    ("circle", "Circle"),
    ("clipPath", "ClipPath"),
    ("defs", "Defs"),
    ("ellipse", "Ellipse"),
    ("foreignObject", "ForeignObject"),
    ("g", "G"),
    ("image", "Image"),
    ("line", "Line"),
    ("linearGradient", "LinearGradient"),
    ("marker", "Marker"),
    ("mask", "Mask"),
    ("path", "Path"),
    ("pattern", "Pattern"),
    ("polygon", "Polygon"),
    ("polyline", "Polyline"),
    ("radialGradient", "RadialGradient"),
    ("rect", "Rect"),
    ("stop", "Stop"),
    ("svg", "Svg"),
    ("symbol", "Symbol"),
    ("text", "Text"),
    ("textPath", "TextPath"),
    ("tspan", "TSpan"),
    ("use", "Use"),
];

pub fn generate(source: &str, component_name: &str, flavor: Flavor) -> Result<String, SvgError> {
    if !is_identifier(component_name) {
        return Err(SvgError::Codegen(format!(
            "component name '{component_name}' is not a valid JavaScript identifier"
        )));
    }

    let root = document::parse(source)?.root;
    let mut generator = Generator {
        flavor,
        imports: BTreeSet::new(),
        body: String::new(),
    };
    if !generator.element(&root, 1, true) {
        return Err(SvgError::Codegen(format!(
            "root element <{}> has no react-native-svg counterpart",
            root.name
        )));
    }

    let mut output = String::from("import * as React from \"react\";\n");
    if flavor == Flavor::Native {
        generator.imports.remove("Svg");
        if generator.imports.is_empty() {
            output.push_str("import Svg from \"react-native-svg\";\n");
        } else {
            let named: Vec<&str> = generator.imports.iter().copied().collect();
            output.push_str(&format!(
                "import Svg, {{ {} }} from \"react-native-svg\";\n",
                named.join(", ")
            ));
        }
    }
    output.push_str(&format!(
        "\nconst {component_name} = (props) => (\n{}\n);\n\nexport default {component_name};\n",
        generator.body.trim_end_matches('\n')
    ));
    Ok(output)
}

struct Generator {
    flavor: Flavor,
    imports: BTreeSet<&'static str>,
    body: String,
}

impl Generator {
    /// Writes one element; returns false when the element was dropped.
    fn element(&mut self, element: &Element, depth: usize, is_root: bool) -> bool {
        let Some(tag) = self.tag_name(element) else {
            return false;
        };

        let indent = INDENT.repeat(depth);
        self.body.push_str(&format!("{indent}<{tag}"));
        for attr in &element.attributes {
            if let Some(prop) = self.prop(&attr.name, &attr.value) {
                self.body.push_str(&format!(" {prop}"));
            }
        }
        if is_root {
            self.body.push_str(" {...props}");
        }

        let keeps_spaces = TEXT_CONTENT_ELEMENTS.contains(&local_name(&element.name));
        let mut children: Vec<&Node> = element
            .children
            .iter()
            .filter(|child| match child {
                Node::Element(child) => self.tag_name(child).is_some(),
                Node::Text(text) => keeps_spaces || !text.trim().is_empty(),
                Node::CData(_) => true,
                Node::Comment(_) | Node::Instruction(_) | Node::Doctype(_) => false,
            })
            .collect();
        while children.first().is_some_and(|child| is_blank(child)) {
            children.remove(0);
        }
        while children.last().is_some_and(|child| is_blank(child)) {
            children.pop();
        }

        if children.is_empty() {
            self.body.push_str(" />\n");
            return true;
        }

        self.body.push_str(">\n");
        let inner = INDENT.repeat(depth + 1);
        let count = children.len();
        for (position, child) in children.into_iter().enumerate() {
            match child {
                Node::Element(child) => {
                    self.element(child, depth + 1, false);
                }
                Node::Text(text) => {
                    let line = text_line(text, position > 0, position + 1 < count);
                    self.body.push_str(&format!("{inner}{line}\n"));
                }
                Node::CData(data) => {
                    self.body.push_str(&format!("{inner}{{{}}}\n", js_string(data)));
                }
                Node::Comment(_) | Node::Instruction(_) | Node::Doctype(_) => {}
            }
        }
        self.body.push_str(&format!("{indent}</{tag}>\n"));
        true
    }

    fn tag_name(&mut self, element: &Element) -> Option<String> {
        if is_editor_name(&element.name) || local_name(&element.name) == "metadata" {
            return None;
        }
        match self.flavor {
            Flavor::Web => Some(element.name.clone()),
            Flavor::Native => {
                let name = local_name(&element.name);
                let (_, component) = NATIVE_COMPONENTS
                    .iter()
                    .find(|(tag, _)| *tag == name)?;
                self.imports.insert(*component);
                Some((*component).to_string())
            }
        }
    }

    fn prop(&self, name: &str, value: &str) -> Option<String> {
        if is_editor_name(name) {
            return None;
        }
        if let Some(namespace) = name.strip_prefix("xmlns:")
            && EDITOR_PREFIXES.contains(&namespace)
        {
            return None;
        }
        if name == "style" {
            let style = style_object(value)?;
            return Some(format!("style={{{style}}}"));
        }
        let prop = match name {
            "class" if self.flavor == Flavor::Native => return None,
            "class" => "className".to_string(),
            _ => prop_name(name),
        };
        if value.contains('"') || value.contains('\\') || value.contains('\n') {
            Some(format!("{prop}={{{}}}", js_string(value)))
        } else {
            Some(format!("{prop}=\"{value}\""))
        }
    }
}

fn is_editor_name(name: &str) -> bool {
    prefix(name).is_some_and(|prefix| EDITOR_PREFIXES.contains(&prefix))
}

/// `stroke-width` becomes `strokeWidth`, `xlink:href` becomes `xlinkHref`;
/// `data-*` and `aria-*` pass through.
fn prop_name(name: &str) -> String {
    if name.starts_with("data-") || name.starts_with("aria-") {
        return name.to_string();
    }
    camel_case(name, &['-', ':'])
}

fn camel_case(name: &str, separators: &[char]) -> String {
    let mut output = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if separators.contains(&ch) {
            upper_next = !output.is_empty();
            continue;
        }
        if upper_next {
            output.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            output.push(ch);
        }
    }
    output
}

/// Turns `fill: red; stroke-width: 2` into `{ fill: "red", strokeWidth: "2" }`.
fn style_object(style: &str) -> Option<String> {
    let entries: Vec<String> = style
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let (property, value) = (property.trim(), value.trim());
            if property.is_empty() || value.is_empty() {
                return None;
            }
            let key = if property.starts_with("--") {
                js_string(property)
            } else {
                let key = camel_case(property.trim_start_matches('-'), &['-']);
                if is_identifier(&key) { key } else { js_string(&key) }
            };
            Some(format!("{key}: {}", js_string(value)))
        })
        .collect();
    if entries.is_empty() {
        return None;
    }
    Some(format!("{{ {} }}", entries.join(", ")))
}

fn is_blank(node: &Node) -> bool {
    matches!(node, Node::Text(text) if text.trim().is_empty())
}

/// JSX drops whitespace that spans a line break, so spaces next to a sibling
/// are written as string expressions.
fn text_line(text: &str, has_previous: bool, has_next: bool) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "{\" \"}".to_string();
    }
    let leading = has_previous && text.starts_with(char::is_whitespace);
    let trailing = has_next && text.ends_with(char::is_whitespace);
    if !leading && !trailing {
        return jsx_text(trimmed);
    }
    let mut value = String::with_capacity(trimmed.len() + 2);
    if leading {
        value.push(' ');
    }
    value.push_str(trimmed);
    if trailing {
        value.push(' ');
    }
    format!("{{{}}}", js_string(&value))
}

fn jsx_text(text: &str) -> String {
    if text.contains(['{', '}', '<', '>']) {
        format!("{{{}}}", js_string(text))
    } else {
        text.to_string()
    }
}

fn js_string(value: &str) -> String {
    // A JSON string literal is also a valid JavaScript string literal.
    serde_json::Value::String(value.to_string()).to_string()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '$')
}
