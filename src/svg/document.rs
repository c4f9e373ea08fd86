//! Labeled XML tree used by the validator, the minifier, the metadata reader
//! and the JSX generator.
//!
//! Parsing is strict: anything that is not well-formed XML is rejected with
//! [`SvgError::Syntax`], so a successfully parsed [`Document`] always has
//! exactly one root element. `roxmltree` decides well-formedness (names,
//! characters, comments, attribute syntax, namespaces); the tree itself is
//! built from `quick-xml` events so that qualified names, CDATA sections and
//! the prolog survive as written.

use super::SvgError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
    Instruction(String),
    Doctype(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Concatenated direct text and CDATA children.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            match child {
                Node::Text(value) | Node::CData(value) => text.push_str(value),
                _ => {}
            }
        }
        text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Body of the `<?xml ...?>` declaration, when present.
    pub declaration: Option<String>,
    /// Comments, instructions and doctype before the root element.
    pub prolog: Vec<Node>,
    pub root: Element,
    /// Comments and instructions after the root element.
    pub epilog: Vec<Node>,
}

pub fn parse(source: &str) -> Result<Document, SvgError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    check_syntax(source)?;

    let mut reader = Reader::from_str(source);
    reader.config_mut().check_end_names = true;

    let mut builder = TreeBuilder::default();
    loop {
        let event = reader
            .read_event()
            .map_err(|err| syntax_error(&reader, err))?;
        let step = match event {
            Event::Eof => break,
            Event::Decl(decl) => builder.declaration(String::from_utf8_lossy(&decl).into_owned()),
            Event::Start(start) => {
                let element = open_element(&start).map_err(|err| syntax_error(&reader, err))?;
                builder.open(element)
            }
            Event::Empty(start) => {
                let element = open_element(&start).map_err(|err| syntax_error(&reader, err))?;
                builder.attach(element)
            }
            Event::End(_) => builder.close(),
            Event::Text(text) => {
                let value = text.unescape().map_err(|err| syntax_error(&reader, err))?;
                builder.text(value.into_owned())
            }
            Event::CData(data) => builder.cdata(String::from_utf8_lossy(&data).into_owned()),
            Event::Comment(comment) => {
                builder.misc(Node::Comment(String::from_utf8_lossy(&comment).into_owned()))
            }
            Event::PI(instruction) => builder.misc(Node::Instruction(
                String::from_utf8_lossy(&instruction).into_owned(),
            )),
            Event::DocType(doctype) => builder.doctype(String::from_utf8_lossy(&doctype).into_owned()),
        };
        step.map_err(|message| syntax_error(&reader, message))?;
    }

    builder.finish().map_err(|message| syntax_error(&reader, message))
}

/// Runs the well-formedness check only.
pub fn check_well_formed(source: &str) -> Result<(), SvgError> {
    parse(source).map(|_| ())
}

fn check_syntax(source: &str) -> Result<(), SvgError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    roxmltree::Document::parse_with_options(source, options)
        .map(|_| ())
        .map_err(|err| SvgError::Syntax {
            position: byte_offset(source, err.pos()) as u64,
            message: err.to_string(),
        })
}

/// Byte offset of a 1-based row/column position.
fn byte_offset(source: &str, pos: roxmltree::TextPos) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(pos.row.saturating_sub(1) as usize)
        .map(str::len)
        .sum();
    let column: usize = source[line_start..]
        .chars()
        .take(pos.col.saturating_sub(1) as usize)
        .map(char::len_utf8)
        .sum();
    line_start + column
}

pub(crate) fn syntax_error(reader: &Reader<&[u8]>, message: impl Display) -> SvgError {
    SvgError::Syntax {
        position: reader.buffer_position() as u64,
        message: message.to_string(),
    }
}

fn open_element(start: &BytesStart<'_>) -> Result<Element, String> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|err| format!("malformed attribute in <{name}>: {err}"))?;
        let value = attr
            .unescape_value()
            .map_err(|err| format!("malformed attribute value in <{name}>: {err}"))?;
        attributes.push(Attribute {
            name: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            value: value.into_owned(),
        });
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

#[derive(Default)]
struct TreeBuilder {
    declaration: Option<String>,
    prolog: Vec<Node>,
    stack: Vec<Element>,
    root: Option<Element>,
    epilog: Vec<Node>,
    seen_content: bool,
}

impl TreeBuilder {
    fn declaration(&mut self, body: String) -> Result<(), String> {
        if self.seen_content || self.declaration.is_some() {
            return Err("XML declaration is only allowed at the start of the document".to_string());
        }
        self.seen_content = true;
        self.declaration = Some(body);
        Ok(())
    }

    fn doctype(&mut self, body: String) -> Result<(), String> {
        if self.root.is_some() || !self.stack.is_empty() {
            return Err("DOCTYPE must appear before the root element".to_string());
        }
        self.seen_content = true;
        self.prolog.push(Node::Doctype(body));
        Ok(())
    }

    fn open(&mut self, element: Element) -> Result<(), String> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(format!(
                "unexpected element <{}> after the root element",
                element.name
            ));
        }
        self.seen_content = true;
        self.stack.push(element);
        Ok(())
    }

    fn close(&mut self) -> Result<(), String> {
        let element = self
            .stack
            .pop()
            .ok_or_else(|| "closing tag without matching opening tag".to_string())?;
        self.attach(element)
    }

    fn attach(&mut self, element: Element) -> Result<(), String> {
        self.seen_content = true;
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(Node::Element(element));
            return Ok(());
        }
        if self.root.is_some() {
            return Err(format!(
                "unexpected element <{}> after the root element",
                element.name
            ));
        }
        self.root = Some(element);
        Ok(())
    }

    fn text(&mut self, value: String) -> Result<(), String> {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(Node::Text(value));
            return Ok(());
        }
        if value.trim().is_empty() {
            return Ok(());
        }
        Err("text content outside of the root element".to_string())
    }

    fn cdata(&mut self, value: String) -> Result<(), String> {
        let parent = self
            .stack
            .last_mut()
            .ok_or_else(|| "CDATA section outside of the root element".to_string())?;
        parent.children.push(Node::CData(value));
        Ok(())
    }

    fn misc(&mut self, node: Node) -> Result<(), String> {
        self.seen_content = true;
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        } else if self.root.is_some() {
            self.epilog.push(node);
        } else {
            self.prolog.push(node);
        }
        Ok(())
    }

    fn finish(self) -> Result<Document, String> {
        if let Some(open) = self.stack.last() {
            return Err(format!("unclosed element <{}>", open.name));
        }
        let root = self
            .root
            .ok_or_else(|| "document has no root element".to_string())?;
        Ok(Document {
            declaration: self.declaration,
            prolog: self.prolog,
            root,
            epilog: self.epilog,
        })
    }
}
