//! The document registry: one closed dispatch table over every message type
//! this crate binds, keyed by the root element name.

use std::fmt;

use ec2_xml::{
    Result, WireError, XmlWriterOptions, envelope_body_local_name, envelope_fault,
    from_document_str, from_envelope_str, root_local_name, to_document_string_with,
    to_envelope_string_with,
};
use serde::{Deserialize, Serialize};

use crate::images::{
    DescribeImages, DescribeImagesResponse, ModifyImageAttribute, ModifyImageAttributeResponse,
};
use crate::instances::{
    DescribeInstances, DescribeInstancesResponse, GetConsoleOutput, GetConsoleOutputResponse,
    RebootInstances, RebootInstancesResponse, RunInstances, RunInstancesResponse, StartInstances,
    StartInstancesResponse, StopInstances, StopInstancesResponse, TerminateInstances,
    TerminateInstancesResponse,
};
use crate::keypairs::{
    CreateKeyPair, CreateKeyPairResponse, DeleteKeyPair, DeleteKeyPairResponse, DescribeKeyPairs,
    DescribeKeyPairsResponse,
};
use crate::security::{
    AuthorizeSecurityGroupIngress, AuthorizeSecurityGroupIngressResponse, CreateSecurityGroup,
    CreateSecurityGroupResponse, DeleteSecurityGroup, DeleteSecurityGroupResponse,
    DescribeSecurityGroups, DescribeSecurityGroupsResponse, RevokeSecurityGroupIngress,
    RevokeSecurityGroupIngressResponse,
};
use crate::tags::{
    CreateTags, CreateTagsResponse, DeleteTags, DeleteTagsResponse, DescribeTags,
    DescribeTagsResponse,
};
use crate::volumes::{
    AttachVolume, AttachVolumeResponse, CreateVolume, CreateVolumeResponse, DeleteVolume,
    DeleteVolumeResponse, DescribeVolumes, DescribeVolumesResponse, DetachVolume,
    DetachVolumeResponse,
};

/// Whether a document travels toward the service or back from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Request,
    Response,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Request => "request",
            DocumentKind::Response => "response",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

macro_rules! documents {
    ($( $name:ident => $kind:ident, )+) => {
        /// Every document type this crate can bind, keyed by root element
        /// name. The JSON form is externally tagged with that same name.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub enum AnyDocument {
            $( $name($name), )+
        }

        impl AnyDocument {
            /// Element name and kind of every supported document.
            pub const DESCRIPTORS: &'static [(&'static str, DocumentKind)] = &[
                $( (stringify!($name), DocumentKind::$kind), )+
            ];

            /// Parse a bare document, dispatching on the root element name.
            pub fn parse_str(input: &str) -> Result<Self> {
                let root = root_local_name(input)?;
                tracing::debug!(element = %root, "dispatching document parse");
                match root.as_str() {
                    $( stringify!($name) => {
                        Ok(Self::$name(from_document_str::<$name>(input)?))
                    } )+
                    other => Err(WireError::unexpected_element(
                        "a supported EC2 document element",
                        other,
                    )),
                }
            }

            /// Parse a SOAP envelope, dispatching on the body's document
            /// element. A fault body surfaces as [`WireError::SoapFault`].
            pub fn parse_envelope_str(input: &str) -> Result<Self> {
                if let Some(fault) = envelope_fault(input)? {
                    return Err(WireError::SoapFault(fault));
                }
                let root = envelope_body_local_name(input)?;
                tracing::debug!(element = %root, "dispatching envelope parse");
                match root.as_str() {
                    $( stringify!($name) => {
                        Ok(Self::$name(from_envelope_str::<$name>(input)?))
                    } )+
                    other => Err(WireError::unexpected_element(
                        "a supported EC2 document element",
                        other,
                    )),
                }
            }

            /// Serialize in canonical form.
            pub fn to_xml_string(&self) -> Result<String> {
                self.to_xml_string_with(&XmlWriterOptions::default())
            }

            /// Serialize with explicit output options.
            pub fn to_xml_string_with(&self, options: &XmlWriterOptions) -> Result<String> {
                match self {
                    $( Self::$name(doc) => to_document_string_with(doc, options), )+
                }
            }

            /// Serialize wrapped in a SOAP envelope.
            pub fn to_envelope_string_with(
                &self,
                options: &XmlWriterOptions,
            ) -> Result<String> {
                match self {
                    $( Self::$name(doc) => to_envelope_string_with(doc, options), )+
                }
            }

            /// The root element name.
            pub fn element_name(&self) -> &'static str {
                match self {
                    $( Self::$name(_) => stringify!($name), )+
                }
            }

            /// Request or response.
            pub fn kind(&self) -> DocumentKind {
                match self {
                    $( Self::$name(_) => DocumentKind::$kind, )+
                }
            }
        }
    };
}

documents! {
    RunInstances => Request,
    RunInstancesResponse => Response,
    DescribeInstances => Request,
    DescribeInstancesResponse => Response,
    TerminateInstances => Request,
    TerminateInstancesResponse => Response,
    StartInstances => Request,
    StartInstancesResponse => Response,
    StopInstances => Request,
    StopInstancesResponse => Response,
    RebootInstances => Request,
    RebootInstancesResponse => Response,
    GetConsoleOutput => Request,
    GetConsoleOutputResponse => Response,
    DescribeImages => Request,
    DescribeImagesResponse => Response,
    ModifyImageAttribute => Request,
    ModifyImageAttributeResponse => Response,
    CreateVolume => Request,
    CreateVolumeResponse => Response,
    DeleteVolume => Request,
    DeleteVolumeResponse => Response,
    AttachVolume => Request,
    AttachVolumeResponse => Response,
    DetachVolume => Request,
    DetachVolumeResponse => Response,
    DescribeVolumes => Request,
    DescribeVolumesResponse => Response,
    CreateSecurityGroup => Request,
    CreateSecurityGroupResponse => Response,
    DeleteSecurityGroup => Request,
    DeleteSecurityGroupResponse => Response,
    AuthorizeSecurityGroupIngress => Request,
    AuthorizeSecurityGroupIngressResponse => Response,
    RevokeSecurityGroupIngress => Request,
    RevokeSecurityGroupIngressResponse => Response,
    DescribeSecurityGroups => Request,
    DescribeSecurityGroupsResponse => Response,
    CreateKeyPair => Request,
    CreateKeyPairResponse => Response,
    DeleteKeyPair => Request,
    DeleteKeyPairResponse => Response,
    DescribeKeyPairs => Request,
    DescribeKeyPairsResponse => Response,
    CreateTags => Request,
    CreateTagsResponse => Response,
    DeleteTags => Request,
    DeleteTagsResponse => Response,
    DescribeTags => Request,
    DescribeTagsResponse => Response,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_cover_both_directions_of_every_operation() {
        let requests = AnyDocument::DESCRIPTORS
            .iter()
            .filter(|(_, kind)| *kind == DocumentKind::Request)
            .count();
        let responses = AnyDocument::DESCRIPTORS
            .iter()
            .filter(|(_, kind)| *kind == DocumentKind::Response)
            .count();
        assert_eq!(requests, responses);
        for (name, kind) in AnyDocument::DESCRIPTORS {
            match kind {
                DocumentKind::Response => assert!(name.ends_with("Response")),
                DocumentKind::Request => assert!(!name.ends_with("Response")),
            }
        }
    }

    #[test]
    fn unknown_root_is_rejected() {
        let err = AnyDocument::parse_str(
            "<DescribeAvailabilityZones xmlns=\"http://ec2.amazonaws.com/doc/2012-08-15/\"/>",
        )
        .unwrap_err();
        assert!(matches!(err, WireError::UnexpectedElement { .. }));
    }
}
