//! Owned XML element tree used for project and configuration documents.
//!
//! Documents are parsed with `roxmltree` and copied into [`Element`] so that
//! rules and configurations can hold them without borrowing the source text.
//! Namespaces are dropped: every element and attribute is addressed by its
//! local name, which lets the same rule read both legacy MSBuild files
//! (with the `msbuild/2003` namespace) and SDK-style project files.

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::fmt::Write;

/// Error raised when a document is not well-formed XML.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{name}:{line}:{column}: malformed XML: {message}")]
#[diagnostic(code(projcop::xml))]
pub struct XmlError {
    /// Name of the document (usually its path).
    pub name: String,
    /// Line of the error (1-indexed).
    pub line: u32,
    /// Column of the error (1-indexed).
    pub column: u32,
    /// Parser message.
    pub message: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("here")]
    span: SourceSpan,
}

/// A single XML element with its attributes, child elements and text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    /// Creates an empty element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parses a document and returns its root element.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError`] if the input is not well-formed.
    pub fn parse(xml: &str) -> Result<Self, XmlError> {
        Self::parse_named("<input>", xml)
    }

    /// Parses a document, naming it in error reports.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError`] if the input is not well-formed.
    pub fn parse_named(name: &str, xml: &str) -> Result<Self, XmlError> {
        let doc = roxmltree::Document::parse(xml).map_err(|e| {
            let pos = e.pos();
            XmlError {
                name: name.to_string(),
                line: pos.row,
                column: pos.col,
                message: e.to_string(),
                source_code: NamedSource::new(name, xml.to_string()),
                span: (byte_offset(xml, pos.row, pos.col), 0).into(),
            }
        })?;
        Ok(Self::from_node(doc.root_element()))
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let mut element = Self::new(node.tag_name().name());
        element.attributes = node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();
        for child in node.children() {
            if child.is_element() {
                element.children.push(Self::from_node(child));
            } else if child.is_text() {
                element.text.push_str(child.text().unwrap_or_default());
            }
        }
        element
    }

    /// Sets an attribute, replacing an existing value of the same name.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Appends a child element.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Appends a child element in place.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Local name of the element.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the attribute with the given local name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated text of the direct text children, untrimmed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Direct child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter()
    }

    /// Direct child elements with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First direct child element with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All descendant elements in document order, excluding `self`.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Descendant elements with the given name.
    pub fn descendants_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.descendants().filter(move |e| e.name == name)
    }

    /// Renders the element as indented XML.
    ///
    /// Text of an element with children is written on its own line before
    /// the first child. Comments are not kept.
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out, 0);
        out
    }

    fn write_xml(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}<{}", self.name);
        for (name, value) in &self.attributes {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }

        if !self.children.is_empty() {
            out.push_str(">\n");
            let text = self.text.trim();
            if !text.is_empty() {
                let _ = writeln!(out, "{indent}  {}", escape(text));
            }
            for child in &self.children {
                child.write_xml(out, depth + 1);
            }
            let _ = writeln!(out, "{indent}</{}>", self.name);
        } else if self.text.trim().is_empty() {
            out.push_str("/>\n");
        } else {
            let _ = writeln!(out, ">{}</{}>", escape(self.text.trim()), self.name);
        }
    }
}

/// Pre-order iterator over descendant elements.
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Converts a 1-indexed row/column (in characters) to a byte offset.
fn byte_offset(source: &str, row: u32, col: u32) -> usize {
    let mut line = 1;
    let mut column = 1;
    for (offset, ch) in source.char_indices() {
        if line == row && column == col {
            return offset;
        }
        if ch == '\n' {
            if line == row {
                return offset;
            }
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    source.len()
}
