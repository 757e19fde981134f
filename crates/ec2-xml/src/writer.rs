//! XML document writer.
//!
//! Emits EC2 wire documents through `quick_xml` events. The writer owns the
//! namespace bindings for the document: the first element written declares
//! them, and a namespace that has no binding yet gets a generated `ns1`,
//! `ns2`, … prefix, mirroring the prefix registration contract of the wire
//! format. With indentation off the output is canonical, so equal values
//! always produce equal bytes.

use std::io::Write;

use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::EC2_NS;
use crate::error::{Result, WireError};
use crate::scalar;

/// How the document's primary namespace is spelled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PrefixStyle {
    /// Declare the first namespace as the default (`xmlns="…"`).
    #[default]
    DefaultNamespace,
    /// Bind the first namespace to the given prefix.
    Named(String),
    /// Generate `ns1`, `ns2`, … for every namespace.
    Generated,
}

/// Options for XML output.
#[derive(Debug, Clone, Default)]
pub struct XmlWriterOptions {
    /// Two-space indentation for human consumption. Off means canonical bytes.
    pub indent: bool,
    /// Emit an XML declaration before the document element.
    pub declaration: bool,
    /// Namespace prefix spelling.
    pub prefix: PrefixStyle,
}

/// Event-based writer for EC2 XML documents.
pub struct XmlWriter<W: Write> {
    inner: Writer<W>,
    options: XmlWriterOptions,
    /// Namespace URI to prefix; `None` is the default namespace.
    bindings: Vec<(String, Option<String>)>,
    next_prefix: usize,
    /// Qualified names of currently open elements.
    open: Vec<String>,
    root_written: bool,
}

impl<W: Write> XmlWriter<W> {
    /// Create a writer with canonical (non-indented) output.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, XmlWriterOptions::default())
    }

    /// Create a writer with options.
    pub fn with_options(writer: W, options: XmlWriterOptions) -> Self {
        let inner = if options.indent {
            Writer::new_with_indent(writer, b' ', 2)
        } else {
            Writer::new(writer)
        };
        Self {
            inner,
            options,
            bindings: Vec::new(),
            next_prefix: 1,
            open: Vec::new(),
            root_written: false,
        }
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }

    /// Ensure a binding exists for `ns` before the document element is
    /// written, so its declaration lands on the root.
    pub fn bind(&mut self, ns: &str) {
        self.binding_index(ns);
    }

    /// Open an element in the EC2 namespace.
    pub fn start(&mut self, name: &str) -> Result<()> {
        self.start_ns(EC2_NS, name)
    }

    /// Open an element in the given namespace.
    pub fn start_ns(&mut self, ns: &str, name: &str) -> Result<()> {
        let start = self.element_start(ns, name)?;
        self.inner.write_event(Event::Start(start))?;
        Ok(())
    }

    /// Close the innermost open element.
    pub fn end(&mut self) -> Result<()> {
        let qualified = self.open.pop().ok_or(WireError::WriterState {
            message: "end() without matching start()",
        })?;
        self.inner.write_event(Event::End(BytesEnd::new(qualified)))?;
        Ok(())
    }

    /// Write character data inside the current element.
    pub fn text(&mut self, value: &str) -> Result<()> {
        self.inner.write_event(Event::Text(BytesText::new(value)))?;
        Ok(())
    }

    /// Write an empty element (`<name/>`) in the EC2 namespace.
    pub fn empty_element(&mut self, name: &str) -> Result<()> {
        let start = self.element_start(EC2_NS, name)?;
        self.open.pop();
        self.inner.write_event(Event::Empty(start))?;
        Ok(())
    }

    /// Write `<name>value</name>`.
    pub fn text_element(&mut self, name: &str, value: &str) -> Result<()> {
        self.start(name)?;
        self.text(value)?;
        self.end()
    }

    /// Write `<name>value</name>`, skipping an absent value entirely.
    pub fn opt_text_element(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.text_element(name, value),
            None => Ok(()),
        }
    }

    /// Write an `xs:boolean` element.
    pub fn bool_element(&mut self, name: &str, value: bool) -> Result<()> {
        self.text_element(name, scalar::format_bool(value))
    }

    /// Write an optional `xs:boolean` element.
    pub fn opt_bool_element(&mut self, name: &str, value: Option<bool>) -> Result<()> {
        match value {
            Some(value) => self.bool_element(name, value),
            None => Ok(()),
        }
    }

    /// Write an `xs:int` element.
    pub fn i32_element(&mut self, name: &str, value: i32) -> Result<()> {
        self.text_element(name, &scalar::format_i32(value))
    }

    /// Write an optional `xs:int` element.
    pub fn opt_i32_element(&mut self, name: &str, value: Option<i32>) -> Result<()> {
        match value {
            Some(value) => self.i32_element(name, value),
            None => Ok(()),
        }
    }

    /// Write an `xs:long` element.
    pub fn i64_element(&mut self, name: &str, value: i64) -> Result<()> {
        self.text_element(name, &scalar::format_i64(value))
    }

    /// Write an optional `xs:long` element.
    pub fn opt_i64_element(&mut self, name: &str, value: Option<i64>) -> Result<()> {
        match value {
            Some(value) => self.i64_element(name, value),
            None => Ok(()),
        }
    }

    /// Write an `xs:double` element.
    pub fn f64_element(&mut self, name: &str, value: f64) -> Result<()> {
        let encoded = scalar::format_f64(value)
            .ok_or_else(|| WireError::unrepresentable(name, "non-finite double"))?;
        self.text_element(name, &encoded)
    }

    /// Write an optional `xs:double` element.
    pub fn opt_f64_element(&mut self, name: &str, value: Option<f64>) -> Result<()> {
        match value {
            Some(value) => self.f64_element(name, value),
            None => Ok(()),
        }
    }

    /// Write an `xs:dateTime` element.
    pub fn datetime_element(&mut self, name: &str, value: &DateTime<Utc>) -> Result<()> {
        self.text_element(name, &scalar::format_datetime(value))
    }

    /// Write an optional `xs:dateTime` element.
    pub fn opt_datetime_element(
        &mut self,
        name: &str,
        value: Option<&DateTime<Utc>>,
    ) -> Result<()> {
        match value {
            Some(value) => self.datetime_element(name, value),
            None => Ok(()),
        }
    }

    /// Build the start event for an element, declaring namespaces as needed.
    /// Pushes the qualified name onto the open stack.
    fn element_start(&mut self, ns: &str, name: &str) -> Result<BytesStart<'static>> {
        let first = !self.root_written;
        if first && self.options.declaration {
            self.inner
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        let (index, added) = self.binding_index(ns);
        let qualified = match &self.bindings[index].1 {
            None => name.to_string(),
            Some(prefix) => format!("{prefix}:{name}"),
        };
        let mut start = BytesStart::new(qualified.clone());
        if first {
            for (bound_ns, prefix) in &self.bindings {
                match prefix {
                    None => start.push_attribute(("xmlns", bound_ns.as_str())),
                    Some(prefix) => {
                        let key = format!("xmlns:{prefix}");
                        start.push_attribute((key.as_str(), bound_ns.as_str()));
                    }
                }
            }
            self.root_written = true;
        } else if added {
            // A namespace first used below the root is declared in place.
            match &self.bindings[index].1 {
                None => start.push_attribute(("xmlns", ns)),
                Some(prefix) => {
                    let key = format!("xmlns:{prefix}");
                    start.push_attribute((key.as_str(), ns));
                }
            }
        }
        self.open.push(qualified);
        Ok(start)
    }

    /// Find or allocate the binding for a namespace.
    fn binding_index(&mut self, ns: &str) -> (usize, bool) {
        if let Some(index) = self.bindings.iter().position(|(bound, _)| bound == ns) {
            return (index, false);
        }
        let prefix = if self.bindings.is_empty() {
            match &self.options.prefix {
                PrefixStyle::DefaultNamespace => None,
                PrefixStyle::Named(prefix) => Some(prefix.clone()),
                PrefixStyle::Generated => Some(self.generate_prefix()),
            }
        } else {
            Some(self.generate_prefix())
        };
        self.bindings.push((ns.to_string(), prefix));
        (self.bindings.len() - 1, true)
    }

    fn generate_prefix(&mut self) -> String {
        let prefix = format!("ns{}", self.next_prefix);
        self.next_prefix += 1;
        prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_string<F>(options: XmlWriterOptions, build: F) -> String
    where
        F: FnOnce(&mut XmlWriter<Vec<u8>>) -> Result<()>,
    {
        let mut writer = XmlWriter::with_options(Vec::new(), options);
        build(&mut writer).expect("write");
        String::from_utf8(writer.into_inner()).expect("utf-8")
    }

    #[test]
    fn default_namespace_on_root() {
        let xml = to_string(XmlWriterOptions::default(), |w| {
            w.start("DeleteKeyPair")?;
            w.text_element("keyName", "gsg-keypair")?;
            w.end()
        });
        assert_eq!(
            xml,
            "<DeleteKeyPair xmlns=\"http://ec2.amazonaws.com/doc/2012-08-15/\">\
             <keyName>gsg-keypair</keyName></DeleteKeyPair>"
        );
    }

    #[test]
    fn named_prefix() {
        let options = XmlWriterOptions {
            prefix: PrefixStyle::Named("ec2".to_string()),
            ..Default::default()
        };
        let xml = to_string(options, |w| {
            w.start("DeleteKeyPair")?;
            w.text_element("keyName", "gsg-keypair")?;
            w.end()
        });
        assert_eq!(
            xml,
            "<ec2:DeleteKeyPair xmlns:ec2=\"http://ec2.amazonaws.com/doc/2012-08-15/\">\
             <ec2:keyName>gsg-keypair</ec2:keyName></ec2:DeleteKeyPair>"
        );
    }

    #[test]
    fn generated_prefix_allocates_in_order() {
        let options = XmlWriterOptions {
            prefix: PrefixStyle::Generated,
            ..Default::default()
        };
        let xml = to_string(options, |w| {
            w.start("RebootInstances")?;
            w.end()
        });
        assert_eq!(
            xml,
            "<ns1:RebootInstances xmlns:ns1=\"http://ec2.amazonaws.com/doc/2012-08-15/\">\
             </ns1:RebootInstances>"
        );
    }

    #[test]
    fn escapes_text_content() {
        let xml = to_string(XmlWriterOptions::default(), |w| {
            w.start("CreateKeyPair")?;
            w.text_element("keyName", "a<b>&\"c\"")?;
            w.end()
        });
        assert!(xml.contains("a&lt;b&gt;&amp;"));
        assert!(!xml.contains("a<b>"));
    }

    #[test]
    fn optional_elements_are_skipped() {
        let xml = to_string(XmlWriterOptions::default(), |w| {
            w.start("StopInstances")?;
            w.opt_bool_element("force", None)?;
            w.opt_text_element("note", Some(""))?;
            w.end()
        });
        assert!(!xml.contains("force"));
        assert!(xml.contains("<note></note>"));
    }

    #[test]
    fn declaration_and_indent() {
        let options = XmlWriterOptions {
            indent: true,
            declaration: true,
            ..Default::default()
        };
        let xml = to_string(options, |w| {
            w.start("DeleteVolume")?;
            w.text_element("volumeId", "vol-123")?;
            w.end()
        });
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("\n  <volumeId>vol-123</volumeId>"));
    }

    #[test]
    fn unbalanced_end_is_an_error() {
        let mut writer = XmlWriter::new(Vec::new());
        assert!(matches!(
            writer.end(),
            Err(WireError::WriterState { .. })
        ));
    }
}
