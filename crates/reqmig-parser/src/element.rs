//! The parsed element tree of a diagram command document.

use crate::span::Span;

/// A `name="value"` pair on an element, with entities already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: String,
    value: String,
    span: Span,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            span,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// An element of the command document.
///
/// Text content and comments are not retained; only the element structure
/// matters for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Element>,
    span: Span,
}

impl Element {
    pub fn new(
        name: impl Into<String>,
        attributes: Vec<Attribute>,
        children: Vec<Element>,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            attributes,
            children,
            span,
        }
    }

    /// The qualified element name as written, including any prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element name with any namespace prefix removed.
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Looks up an attribute by local name, ignoring ASCII case.
    ///
    /// When an attribute is repeated the last occurrence wins.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .rev()
            .find(|attr| local_part(attr.name()).eq_ignore_ascii_case(name))
            .map(Attribute::value)
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Span from the start of the opening tag to the end of the element.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Iterates over this element and all of its descendants in document
    /// order.
    pub fn iter(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`Element::iter`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}
