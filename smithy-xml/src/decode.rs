/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! A small XML document decoder.
//!
//! Responses of the XML based protocols are small, so the whole document is decoded into an
//! element tree which deserializers then walk by element name.

use crate::unescape::unescape;
use thiserror::Error;
use xmlparser::{ElementEnd, Token, Tokenizer};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum XmlError {
    #[error("XML parse error: {0}")]
    InvalidXml(String),

    #[error("invalid XML escape: {esc}")]
    InvalidEscape { esc: String },

    #[error("unexpected closing tag `{found}` (expected `{expected}`)")]
    MismatchedTag { expected: String, found: String },

    #[error("the document did not contain a root element")]
    NoRootElement,

    #[error("the document ended before `{0}` was closed")]
    UnexpectedEof(String),

    #[error("{0}")]
    Custom(String),
}

impl From<xmlparser::Error> for XmlError {
    fn from(err: xmlparser::Error) -> Self {
        XmlError::InvalidXml(err.to_string())
    }
}

impl XmlError {
    pub fn custom(msg: impl Into<String>) -> Self {
        XmlError::Custom(msg.into())
    }
}

/// A decoded XML element
///
/// Namespace prefixes are dropped: elements and attributes are addressed by their local name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn new(name: &str) -> Self {
        Element {
            name: name.to_string(),
            attributes: vec![],
            children: vec![],
            text: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The concatenated, unescaped text content directly inside this element
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The first child element named `name`
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All child elements named `name`, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter()
    }

    /// Follows a path of element names from this element
    ///
    /// `root.path(&["Errors", "Error", "Code"])` returns the first `Code` of the first `Error`.
    pub fn path(&self, path: &[&str]) -> Option<&Element> {
        path.iter()
            .try_fold(self, |element, name| element.child(name))
    }

    /// Text of the first child element named `name`
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|child| child.text())
    }
}

/// A decoded XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn parse(doc: &[u8]) -> Result<Self, XmlError> {
        let doc = std::str::from_utf8(doc)
            .map_err(|err| XmlError::custom(format!("document was not valid UTF-8: {}", err)))?;
        Self::parse_str(doc)
    }

    pub fn parse_str(doc: &str) -> Result<Self, XmlError> {
        let mut stack: Vec<Element> = vec![];
        let mut root = None;
        for token in Tokenizer::from(doc) {
            match token? {
                Token::ElementStart { local, .. } => {
                    stack.push(Element::new(local.as_str()));
                }
                Token::Attribute { local, value, .. } => {
                    if let Some(element) = stack.last_mut() {
                        element
                            .attributes
                            .push((local.as_str().to_string(), unescape(value.as_str())?.into()));
                    }
                }
                Token::ElementEnd { end, .. } => match end {
                    ElementEnd::Open => {}
                    ElementEnd::Empty => close(&mut stack, &mut root, None)?,
                    ElementEnd::Close(_, local) => {
                        close(&mut stack, &mut root, Some(local.as_str()))?
                    }
                },
                Token::Text { text } => {
                    if let Some(element) = stack.last_mut() {
                        element.text.push_str(&unescape(text.as_str())?);
                    }
                }
                Token::Cdata { text, .. } => {
                    if let Some(element) = stack.last_mut() {
                        element.text.push_str(text.as_str());
                    }
                }
                _ => {}
            }
        }
        if let Some(unclosed) = stack.pop() {
            return Err(XmlError::UnexpectedEof(unclosed.name));
        }
        root.map(|root| Document { root })
            .ok_or(XmlError::NoRootElement)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn into_root(self) -> Element {
        self.root
    }
}

fn close(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    closing_tag: Option<&str>,
) -> Result<(), XmlError> {
    let element = stack
        .pop()
        .ok_or_else(|| XmlError::custom("closing tag without an open element"))?;
    if let Some(found) = closing_tag {
        if found != element.name {
            return Err(XmlError::MismatchedTag {
                expected: element.name,
                found: found.to_string(),
            });
        }
    }
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use crate::decode::{Document, XmlError};

    #[test]
    fn nested_elements() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<EnableReachabilityAnalyzerOrganizationSharingResponse xmlns="http://ec2.amazonaws.com/doc/2016-11-15/">
    <requestId>59dbff89-35bd-4eac-99ed-be587EXAMPLE</requestId>
    <returnValue>true</returnValue>
</EnableReachabilityAnalyzerOrganizationSharingResponse>"#;
        let doc = Document::parse(doc.as_bytes()).expect("valid document");
        let root = doc.root();
        assert_eq!(
            root.name(),
            "EnableReachabilityAnalyzerOrganizationSharingResponse"
        );
        assert_eq!(
            root.attribute("xmlns"),
            Some("http://ec2.amazonaws.com/doc/2016-11-15/")
        );
        assert_eq!(
            root.child_text("requestId"),
            Some("59dbff89-35bd-4eac-99ed-be587EXAMPLE")
        );
        assert_eq!(root.child_text("returnValue"), Some("true"));
        assert_eq!(root.child("missing"), None);
    }

    #[test]
    fn paths_and_repeated_children() {
        let doc = "<Response><Errors><Error><Code>A</Code></Error><Error><Code>B</Code></Error></Errors><RequestID>abc</RequestID></Response>";
        let doc = Document::parse_str(doc).expect("valid document");
        let root = doc.root();
        assert_eq!(
            root.path(&["Errors", "Error", "Code"]).map(|e| e.text()),
            Some("A")
        );
        let codes: Vec<_> = root
            .child("Errors")
            .unwrap()
            .children_named("Error")
            .filter_map(|e| e.child_text("Code"))
            .collect();
        assert_eq!(codes, vec!["A", "B"]);
        assert_eq!(root.child_text("RequestID"), Some("abc"));
    }

    #[test]
    fn text_is_unescaped() {
        let doc = Document::parse_str("<Message>a &lt; b &amp;&amp; <![CDATA[<raw>]]></Message>")
            .expect("valid document");
        assert_eq!(doc.root().text(), "a < b && <raw>");
    }

    #[test]
    fn self_closing_elements() {
        let doc = Document::parse_str("<a><b/><c>1</c></a>").expect("valid document");
        assert_eq!(doc.root().child("b").map(|b| b.text()), Some(""));
        assert_eq!(doc.root().children().count(), 2);
    }

    #[test]
    fn mismatched_tags() {
        assert_eq!(
            Document::parse_str("<a><b></a>"),
            Err(XmlError::MismatchedTag {
                expected: "b".to_string(),
                found: "a".to_string()
            })
        );
    }

    #[test]
    fn unclosed_document() {
        assert!(Document::parse_str("<a><b></b>").is_err());
        assert!(Document::parse_str("").is_err());
    }
}
