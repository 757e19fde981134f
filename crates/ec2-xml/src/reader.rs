//! XML document reader.
//!
//! A pull parser over a namespace-resolving `quick_xml` reader. Consumption
//! is strict: child elements are read in schema-declared order, every element
//! must resolve to the expected namespace, and anything unexpected fails the
//! whole parse. A one-node lookahead supports optional elements, set loops,
//! and choice-group dispatch; `<foo/>` and `<foo></foo>` are presented
//! identically.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use quick_xml::NsReader;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};

use crate::EC2_NS;
use crate::error::{Result, WireError};
use crate::scalar;

/// Owned view of one significant XML node.
#[derive(Debug, Clone)]
enum Node {
    Start {
        ns: Option<String>,
        local: String,
    },
    End {
        local: String,
    },
    Text(String),
    Eof,
}

/// Pull reader for EC2 XML documents.
pub struct XmlReader<'x> {
    reader: NsReader<&'x [u8]>,
    queue: VecDeque<Node>,
    /// Local names of currently open elements.
    stack: Vec<String>,
}

impl<'x> XmlReader<'x> {
    /// Create a reader over a document string.
    pub fn from_str(input: &'x str) -> Self {
        Self {
            reader: NsReader::from_str(input),
            queue: VecDeque::new(),
            stack: Vec::new(),
        }
    }

    /// Local name of the innermost open element, for error context.
    pub fn current_element(&self) -> &str {
        self.stack.last().map_or("document", String::as_str)
    }

    /// Consume the document element's start tag, expecting the EC2 namespace.
    pub fn read_document_start(&mut self, name: &str) -> Result<()> {
        self.read_document_start_ns(EC2_NS, name)
    }

    /// Consume the document element's start tag in the given namespace.
    pub fn read_document_start_ns(&mut self, ns: &str, name: &str) -> Result<()> {
        self.expect_start(Some(ns), name)
    }

    /// Local name of the document element without consuming it.
    pub fn peek_root_name(&mut self) -> Result<String> {
        self.skip_insignificant_ws()?;
        match self.peek()? {
            Node::Start { local, .. } => Ok(local.clone()),
            Node::Text(_) => Err(WireError::unexpected_element(
                "document element",
                "character data",
            )),
            Node::End { local } => Err(WireError::unexpected_element(
                "document element",
                format!("</{local}>"),
            )),
            Node::Eof => Err(WireError::UnexpectedEof),
        }
    }

    /// Require that nothing but markup trivia remains.
    pub fn expect_eof(&mut self) -> Result<()> {
        self.skip_insignificant_ws()?;
        match self.next_node()? {
            Node::Eof => Ok(()),
            _ => Err(WireError::TrailingContent),
        }
    }

    /// Consume the start tag of a required child in the EC2 namespace.
    pub fn read_start(&mut self, name: &str) -> Result<()> {
        self.expect_start(Some(EC2_NS), name)
    }

    /// Consume the start tag of a required child in the given namespace.
    pub fn read_start_ns(&mut self, ns: &str, name: &str) -> Result<()> {
        self.expect_start(Some(ns), name)
    }

    /// Consume the start tag of an optional child in the EC2 namespace.
    /// Returns false, consuming nothing, when the next node is anything else.
    pub fn try_read_start(&mut self, name: &str) -> Result<bool> {
        self.try_expect_start(Some(EC2_NS), name)
    }

    /// Consume the start tag of an optional child in the given namespace.
    pub fn try_read_start_ns(&mut self, ns: &str, name: &str) -> Result<bool> {
        self.try_expect_start(Some(ns), name)
    }

    /// Local name of the next child start tag, or `None` when the current
    /// element has no further children. Does not consume anything.
    pub fn peek_child_name(&mut self) -> Result<Option<String>> {
        self.skip_insignificant_ws()?;
        match self.peek()? {
            Node::Start { local, .. } => Ok(Some(local.clone())),
            _ => Ok(None),
        }
    }

    /// Consume the end tag of the current element, reporting any stray
    /// children that remain before it.
    pub fn read_end(&mut self) -> Result<()> {
        self.skip_insignificant_ws()?;
        match self.next_node()? {
            Node::End { .. } => {
                self.stack.pop();
                Ok(())
            }
            Node::Start { local, .. } => Err(WireError::unexpected_element(
                format!("end of <{}>", self.current_element()),
                local,
            )),
            Node::Text(_) => Err(WireError::unexpected_element(
                format!("end of <{}>", self.current_element()),
                "character data",
            )),
            Node::Eof => Err(WireError::UnexpectedEof),
        }
    }

    /// Read the character data of the current element. An immediately
    /// following end tag yields the empty string; it is not consumed.
    pub fn read_text(&mut self) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.peek()? {
                Node::Text(_) => {
                    if let Node::Text(chunk) = self.next_node()? {
                        text.push_str(&chunk);
                    }
                }
                Node::End { .. } => return Ok(text),
                Node::Start { local, .. } => {
                    let found = local.clone();
                    return Err(WireError::unexpected_element(
                        format!("character data in <{}>", self.current_element()),
                        found,
                    ));
                }
                Node::Eof => return Err(WireError::UnexpectedEof),
            }
        }
    }

    /// Read `<name>text</name>` as a required child.
    pub fn read_text_element(&mut self, name: &str) -> Result<String> {
        self.read_start(name)?;
        let text = self.read_text()?;
        self.read_end()?;
        Ok(text)
    }

    /// Read `<name>text</name>` as an optional child.
    pub fn try_read_text_element(&mut self, name: &str) -> Result<Option<String>> {
        if !self.try_read_start(name)? {
            return Ok(None);
        }
        let text = self.read_text()?;
        self.read_end()?;
        Ok(Some(text))
    }

    /// Read a required `xs:boolean` child.
    pub fn read_bool_element(&mut self, name: &str) -> Result<bool> {
        let raw = self.read_text_element(name)?;
        scalar::parse_bool(&raw).ok_or_else(|| WireError::invalid_scalar(name, "xs:boolean", raw))
    }

    /// Read an optional `xs:boolean` child.
    pub fn try_read_bool_element(&mut self, name: &str) -> Result<Option<bool>> {
        match self.try_read_text_element(name)? {
            Some(raw) => scalar::parse_bool(&raw)
                .map(Some)
                .ok_or_else(|| WireError::invalid_scalar(name, "xs:boolean", raw)),
            None => Ok(None),
        }
    }

    /// Read a required `xs:int` child.
    pub fn read_i32_element(&mut self, name: &str) -> Result<i32> {
        let raw = self.read_text_element(name)?;
        scalar::parse_i32(&raw).ok_or_else(|| WireError::invalid_scalar(name, "xs:int", raw))
    }

    /// Read an optional `xs:int` child.
    pub fn try_read_i32_element(&mut self, name: &str) -> Result<Option<i32>> {
        match self.try_read_text_element(name)? {
            Some(raw) => scalar::parse_i32(&raw)
                .map(Some)
                .ok_or_else(|| WireError::invalid_scalar(name, "xs:int", raw)),
            None => Ok(None),
        }
    }

    /// Read a required `xs:long` child.
    pub fn read_i64_element(&mut self, name: &str) -> Result<i64> {
        let raw = self.read_text_element(name)?;
        scalar::parse_i64(&raw).ok_or_else(|| WireError::invalid_scalar(name, "xs:long", raw))
    }

    /// Read an optional `xs:long` child.
    pub fn try_read_i64_element(&mut self, name: &str) -> Result<Option<i64>> {
        match self.try_read_text_element(name)? {
            Some(raw) => scalar::parse_i64(&raw)
                .map(Some)
                .ok_or_else(|| WireError::invalid_scalar(name, "xs:long", raw)),
            None => Ok(None),
        }
    }

    /// Read a required `xs:double` child.
    pub fn read_f64_element(&mut self, name: &str) -> Result<f64> {
        let raw = self.read_text_element(name)?;
        scalar::parse_f64(&raw).ok_or_else(|| WireError::invalid_scalar(name, "xs:double", raw))
    }

    /// Read an optional `xs:double` child.
    pub fn try_read_f64_element(&mut self, name: &str) -> Result<Option<f64>> {
        match self.try_read_text_element(name)? {
            Some(raw) => scalar::parse_f64(&raw)
                .map(Some)
                .ok_or_else(|| WireError::invalid_scalar(name, "xs:double", raw)),
            None => Ok(None),
        }
    }

    /// Read a required `xs:dateTime` child.
    pub fn read_datetime_element(&mut self, name: &str) -> Result<DateTime<Utc>> {
        let raw = self.read_text_element(name)?;
        scalar::parse_datetime(&raw)
            .ok_or_else(|| WireError::invalid_scalar(name, "xs:dateTime", raw))
    }

    /// Read an optional `xs:dateTime` child.
    pub fn try_read_datetime_element(&mut self, name: &str) -> Result<Option<DateTime<Utc>>> {
        match self.try_read_text_element(name)? {
            Some(raw) => scalar::parse_datetime(&raw)
                .map(Some)
                .ok_or_else(|| WireError::invalid_scalar(name, "xs:dateTime", raw)),
            None => Ok(None),
        }
    }

    /// Consume the remaining content of the current element including its end
    /// tag, regardless of what it contains.
    pub fn skip_to_end(&mut self) -> Result<()> {
        let mut depth = 0usize;
        loop {
            match self.next_node()? {
                Node::Start { .. } => depth += 1,
                Node::End { .. } => {
                    if depth == 0 {
                        self.stack.pop();
                        return Ok(());
                    }
                    depth -= 1;
                }
                Node::Text(_) => {}
                Node::Eof => return Err(WireError::UnexpectedEof),
            }
        }
    }

    /// Like [`skip_to_end`](Self::skip_to_end), but collect all character
    /// data encountered on the way.
    pub fn collect_subtree_text(&mut self) -> Result<String> {
        let mut depth = 0usize;
        let mut text = String::new();
        loop {
            match self.next_node()? {
                Node::Start { .. } => depth += 1,
                Node::End { .. } => {
                    if depth == 0 {
                        self.stack.pop();
                        return Ok(text);
                    }
                    depth -= 1;
                }
                Node::Text(chunk) => text.push_str(&chunk),
                Node::Eof => return Err(WireError::UnexpectedEof),
            }
        }
    }

    pub(crate) fn expect_start(&mut self, ns: Option<&str>, name: &str) -> Result<()> {
        self.skip_insignificant_ws()?;
        match self.next_node()? {
            Node::Start { ns: found_ns, local } => {
                if local != name {
                    return Err(WireError::unexpected_element(name, local));
                }
                if found_ns.as_deref() != ns {
                    return Err(WireError::namespace_mismatch(
                        local,
                        found_ns.unwrap_or_default(),
                    ));
                }
                self.stack.push(local);
                Ok(())
            }
            Node::End { local } => {
                // Restore so the caller's read_end still sees it; the parse
                // is aborting either way.
                self.queue.push_front(Node::End { local });
                Err(WireError::missing_element(name, self.current_element()))
            }
            Node::Text(_) => Err(WireError::unexpected_element(name, "character data")),
            Node::Eof => Err(WireError::UnexpectedEof),
        }
    }

    pub(crate) fn try_expect_start(&mut self, ns: Option<&str>, name: &str) -> Result<bool> {
        self.skip_insignificant_ws()?;
        let matches = match self.peek()? {
            Node::Start {
                ns: found_ns,
                local,
            } => local == name && found_ns.as_deref() == ns,
            _ => false,
        };
        if matches {
            if let Node::Start { local, .. } = self.next_node()? {
                self.stack.push(local);
            }
        }
        Ok(matches)
    }

    fn peek(&mut self) -> Result<&Node> {
        if self.queue.is_empty() {
            let node = self.fetch()?;
            // Front, not back: fetching an empty element queues its end
            // node, which must stay behind the start node.
            self.queue.push_front(node);
        }
        match self.queue.front() {
            Some(node) => Ok(node),
            None => Err(WireError::UnexpectedEof),
        }
    }

    fn next_node(&mut self) -> Result<Node> {
        if let Some(node) = self.queue.pop_front() {
            return Ok(node);
        }
        self.fetch()
    }

    /// Skip whitespace-only character data between structural nodes. Never
    /// called while reading text content, where every chunk is significant.
    fn skip_insignificant_ws(&mut self) -> Result<()> {
        loop {
            let is_ws = matches!(
                self.peek()?,
                Node::Text(text) if text.chars().all(char::is_whitespace)
            );
            if !is_ws {
                return Ok(());
            }
            self.next_node()?;
        }
    }

    /// Pull the next node from the underlying reader. Markup trivia is
    /// skipped; an empty element becomes a start node with its end node
    /// queued behind it.
    fn fetch(&mut self) -> Result<Node> {
        loop {
            let (resolution, event) = self
                .reader
                .read_resolved_event()
                .map_err(quick_xml::Error::from)?;
            match event {
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Text(text) => {
                    let text = text.xml_content().map_err(quick_xml::Error::from)?;
                    return Ok(Node::Text(text.into_owned()));
                }
                Event::CData(data) => {
                    let bytes = data.into_inner();
                    return Ok(Node::Text(String::from_utf8_lossy(&bytes).into_owned()));
                }
                Event::Start(start) => {
                    return Ok(Node::Start {
                        ns: resolved_namespace(&resolution),
                        local: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
                    });
                }
                Event::Empty(start) => {
                    let local =
                        String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                    self.queue.push_back(Node::End {
                        local: local.clone(),
                    });
                    return Ok(Node::Start {
                        ns: resolved_namespace(&resolution),
                        local,
                    });
                }
                Event::End(end) => {
                    return Ok(Node::End {
                        local: String::from_utf8_lossy(end.local_name().as_ref()).into_owned(),
                    });
                }
                Event::GeneralRef(entity) => {
                    let name = String::from_utf8_lossy(&entity).into_owned();
                    let decoded = resolve_entity(&name)
                        .ok_or(WireError::UnknownEntity { name })?;
                    return Ok(Node::Text(decoded));
                }
                Event::Eof => return Ok(Node::Eof),
            }
        }
    }
}

/// Resolve the five predefined entities and numeric character references.
/// Anything else is undefined in a DTD-less document.
fn resolve_entity(name: &str) -> Option<String> {
    match name {
        "lt" => Some("<".to_string()),
        "gt" => Some(">".to_string()),
        "amp" => Some("&".to_string()),
        "apos" => Some("'".to_string()),
        "quot" => Some("\"".to_string()),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = if let Some(hex) =
                code.strip_prefix('x').or_else(|| code.strip_prefix('X'))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                code.parse().ok()?
            };
            char::from_u32(value).map(|ch| ch.to_string())
        }
    }
}

fn resolved_namespace(resolution: &ResolveResult<'_>) -> Option<String> {
    match resolution {
        ResolveResult::Bound(Namespace(ns)) => {
            Some(String::from_utf8_lossy(ns).into_owned())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://ec2.amazonaws.com/doc/2012-08-15/";

    #[test]
    fn reads_elements_in_order() {
        let xml = format!(
            "<DeleteVolume xmlns=\"{NS}\"><volumeId>vol-123</volumeId></DeleteVolume>"
        );
        let mut reader = XmlReader::from_str(&xml);
        reader.read_document_start("DeleteVolume").expect("root");
        assert_eq!(reader.read_text_element("volumeId").expect("id"), "vol-123");
        reader.read_end().expect("end");
        reader.expect_eof().expect("eof");
    }

    #[test]
    fn rejects_out_of_order_elements() {
        let xml = format!(
            "<AttachVolume xmlns=\"{NS}\"><instanceId>i-1</instanceId>\
             <volumeId>vol-1</volumeId></AttachVolume>"
        );
        let mut reader = XmlReader::from_str(&xml);
        reader.read_document_start("AttachVolume").expect("root");
        let err = reader.read_text_element("volumeId").unwrap_err();
        assert!(matches!(err, WireError::UnexpectedElement { .. }));
    }

    #[test]
    fn missing_required_element_is_reported() {
        let xml = format!("<DeleteVolume xmlns=\"{NS}\"></DeleteVolume>");
        let mut reader = XmlReader::from_str(&xml);
        reader.read_document_start("DeleteVolume").expect("root");
        let err = reader.read_text_element("volumeId").unwrap_err();
        assert!(matches!(err, WireError::MissingElement { .. }));
    }

    #[test]
    fn foreign_namespace_is_rejected() {
        let xml = "<DeleteVolume xmlns=\"http://example.com/other\">\
                   <volumeId>vol-1</volumeId></DeleteVolume>";
        let mut reader = XmlReader::from_str(xml);
        let err = reader.read_document_start("DeleteVolume").unwrap_err();
        assert!(matches!(err, WireError::NamespaceMismatch { .. }));
    }

    #[test]
    fn empty_and_expanded_elements_are_equivalent() {
        for xml in [
            format!("<a xmlns=\"{NS}\"><noDevice/></a>"),
            format!("<a xmlns=\"{NS}\"><noDevice></noDevice></a>"),
        ] {
            let mut reader = XmlReader::from_str(&xml);
            reader.read_document_start("a").expect("root");
            assert!(reader.try_read_start("noDevice").expect("peek"));
            assert_eq!(reader.read_text().expect("text"), "");
            reader.read_end().expect("end noDevice");
            reader.read_end().expect("end a");
        }
    }

    #[test]
    fn whitespace_and_comments_are_skipped() {
        let xml = format!(
            "<a xmlns=\"{NS}\">\n  <!-- state -->\n  <code>16</code>\n</a>"
        );
        let mut reader = XmlReader::from_str(&xml);
        reader.read_document_start("a").expect("root");
        assert_eq!(reader.read_i32_element("code").expect("code"), 16);
        reader.read_end().expect("end");
    }

    #[test]
    fn empty_text_is_preserved_distinct_from_absent() {
        let xml = format!("<a xmlns=\"{NS}\"><value></value></a>");
        let mut reader = XmlReader::from_str(&xml);
        reader.read_document_start("a").expect("root");
        assert_eq!(
            reader.try_read_text_element("value").expect("value"),
            Some(String::new())
        );
        assert_eq!(reader.try_read_text_element("value").expect("absent"), None);
        reader.read_end().expect("end");
    }

    #[test]
    fn escaped_text_is_unescaped() {
        let xml = format!("<a xmlns=\"{NS}\"><v>x &lt; y &amp; z</v></a>");
        let mut reader = XmlReader::from_str(&xml);
        reader.read_document_start("a").expect("root");
        assert_eq!(reader.read_text_element("v").expect("v"), "x < y & z");
    }

    #[test]
    fn invalid_scalar_reports_element_and_value() {
        let xml = format!("<a xmlns=\"{NS}\"><code>sixteen</code></a>");
        let mut reader = XmlReader::from_str(&xml);
        reader.read_document_start("a").expect("root");
        match reader.read_i32_element("code").unwrap_err() {
            WireError::InvalidScalar {
                element,
                expected,
                value,
            } => {
                assert_eq!(element, "code");
                assert_eq!(expected, "xs:int");
                assert_eq!(value, "sixteen");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn skip_to_end_consumes_nested_subtree() {
        let xml = format!(
            "<a xmlns=\"{NS}\"><junk><x><y>1</y></x><z/></junk><keep>v</keep></a>"
        );
        let mut reader = XmlReader::from_str(&xml);
        reader.read_document_start("a").expect("root");
        assert!(reader.try_read_start("junk").expect("junk"));
        reader.skip_to_end().expect("skip");
        assert_eq!(reader.read_text_element("keep").expect("keep"), "v");
        reader.read_end().expect("end");
    }

    #[test]
    fn trailing_content_is_rejected() {
        let xml = format!("<a xmlns=\"{NS}\"></a><b/>");
        let mut reader = XmlReader::from_str(&xml);
        reader.read_document_start("a").expect("root");
        reader.read_end().expect("end");
        assert!(matches!(
            reader.expect_eof().unwrap_err(),
            WireError::TrailingContent
        ));
    }
}
