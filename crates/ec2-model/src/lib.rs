//! Typed request and response shapes for the Amazon EC2 SOAP API
//! (namespace `http://ec2.amazonaws.com/doc/2012-08-15/`).
//!
//! Each document type is a plain struct whose fields mirror the schema's
//! child elements in declaration order. Optional elements are `Option<T>`,
//! set containers are `Vec<T>`, and the schema's `<choice>` groups are Rust
//! enums, so at most one alternative can ever be populated. Serialization
//! and parsing go through the `ec2-xml` wire traits; the JSON view comes
//! from `serde` derives on the same types.
//!
//! # Example
//!
//! ```
//! use ec2_model::instances::StopInstances;
//!
//! let request = StopInstances {
//!     instances_set: vec!["i-10a64379".to_string()],
//!     force: Some(true),
//! };
//! let xml = ec2_xml::to_document_string(&request).unwrap();
//! assert!(xml.contains("<instanceId>i-10a64379</instanceId>"));
//! let back: StopInstances = ec2_xml::from_document_str(&xml).unwrap();
//! assert_eq!(back, request);
//! ```

pub mod common;
pub mod document;
pub mod images;
pub mod instances;
pub mod keypairs;
pub mod security;
pub mod tags;
pub mod volumes;

pub use common::{
    Filter, GroupItem, InstanceMonitoringState, InstanceState, Placement, ProductCode,
    ResourceTag, StateReason,
};
pub use document::{AnyDocument, DocumentKind};
pub use ec2_xml::{API_VERSION, EC2_NS};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
