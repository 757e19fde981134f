//! Error types for XML wire operations.

use thiserror::Error;

use crate::envelope::Fault;

/// Errors that can occur when encoding or decoding EC2 XML documents.
#[derive(Debug, Error)]
pub enum WireError {
    /// An element appeared out of schema order, or is not part of the schema.
    #[error("unexpected element <{found}>: expected {expected}")]
    UnexpectedElement { expected: String, found: String },

    /// A required child element did not appear before the parent closed.
    #[error("missing element <{expected}> in <{within}>")]
    MissingElement { expected: String, within: String },

    /// Text content did not decode as the expected scalar type.
    #[error("invalid {expected} value {value:?} in <{element}>")]
    InvalidScalar {
        element: String,
        expected: &'static str,
        value: String,
    },

    /// An element resolved to a namespace other than the expected one.
    #[error("element <{element}> bound to foreign namespace {found:?}")]
    NamespaceMismatch { element: String, found: String },

    /// The input ended in the middle of a document.
    #[error("unexpected end of document")]
    UnexpectedEof,

    /// Content remained after the document element closed.
    #[error("trailing content after document element")]
    TrailingContent,

    /// An entity reference with no definition in a DTD-less document.
    #[error("unresolvable entity reference &{name};")]
    UnknownEntity { name: String },

    /// A value has no XML lexical form (e.g. a non-finite double).
    #[error("value for <{element}> has no XML representation: {message}")]
    Unrepresentable { element: String, message: String },

    /// Writer misuse, such as closing more elements than were opened.
    #[error("writer state error: {message}")]
    WriterState { message: &'static str },

    /// The SOAP body carried a fault instead of the expected document.
    #[error("SOAP fault {}: {}", .0.fault_code, .0.fault_string)]
    SoapFault(Fault),

    /// The document element is not a SOAP envelope.
    #[error("document is not a SOAP envelope")]
    NotAnEnvelope,

    /// The SOAP body contained no document element.
    #[error("SOAP body is empty")]
    EmptyBody,

    /// Malformed XML reported by the underlying parser.
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Writer output was not valid UTF-8.
    #[error("document is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for wire operations.
pub type Result<T> = std::result::Result<T, WireError>;

impl WireError {
    /// Create an UnexpectedElement error.
    pub fn unexpected_element(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedElement {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a MissingElement error.
    pub fn missing_element(expected: impl Into<String>, within: impl Into<String>) -> Self {
        Self::MissingElement {
            expected: expected.into(),
            within: within.into(),
        }
    }

    /// Create an InvalidScalar error.
    pub fn invalid_scalar(
        element: impl Into<String>,
        expected: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidScalar {
            element: element.into(),
            expected,
            value: value.into(),
        }
    }

    /// Create a NamespaceMismatch error.
    pub fn namespace_mismatch(element: impl Into<String>, found: impl Into<String>) -> Self {
        Self::NamespaceMismatch {
            element: element.into(),
            found: found.into(),
        }
    }

    /// Create an Unrepresentable error.
    pub fn unrepresentable(element: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unrepresentable {
            element: element.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WireError::unexpected_element("instanceId", "imageId");
        assert_eq!(
            format!("{err}"),
            "unexpected element <imageId>: expected instanceId"
        );

        let err = WireError::missing_element("requestId", "DescribeInstancesResponse");
        assert_eq!(
            format!("{err}"),
            "missing element <requestId> in <DescribeInstancesResponse>"
        );

        let err = WireError::invalid_scalar("minCount", "xs:int", "abc");
        assert_eq!(format!("{err}"), "invalid xs:int value \"abc\" in <minCount>");
    }

    #[test]
    fn test_fault_display() {
        let err = WireError::SoapFault(Fault {
            fault_code: "Client.InvalidInstanceID.NotFound".to_string(),
            fault_string: "The instance ID 'i-123' does not exist".to_string(),
            detail: None,
        });
        let text = format!("{err}");
        assert!(text.contains("Client.InvalidInstanceID.NotFound"));
        assert!(text.contains("does not exist"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: WireError = io_err.into();
        assert!(matches!(err, WireError::Io(_)));
    }
}
