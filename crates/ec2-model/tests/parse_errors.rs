//! Failure behavior: every malformed input fails the whole parse with an
//! error naming the offending element.

use ec2_model::instances::GetConsoleOutputResponse;
use ec2_model::keypairs::{CreateKeyPair, DeleteKeyPairResponse};
use ec2_model::volumes::DeleteVolume;
use ec2_xml::{WireError, from_document_str, from_envelope_str};

const NS: &str = "http://ec2.amazonaws.com/doc/2012-08-15/";

#[test]
fn unexpected_element_names_the_intruder() {
    let xml = format!(
        "<DeleteVolume xmlns=\"{NS}\"><instanceId>i-1</instanceId></DeleteVolume>"
    );
    match from_document_str::<DeleteVolume>(&xml).unwrap_err() {
        WireError::UnexpectedElement { expected, found } => {
            assert_eq!(expected, "volumeId");
            assert_eq!(found, "instanceId");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_required_element_names_the_parent() {
    let xml = format!("<CreateKeyPair xmlns=\"{NS}\"></CreateKeyPair>");
    match from_document_str::<CreateKeyPair>(&xml).unwrap_err() {
        WireError::MissingElement { expected, within } => {
            assert_eq!(expected, "keyName");
            assert_eq!(within, "CreateKeyPair");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn bad_boolean_is_an_invalid_scalar() {
    let xml = format!(
        "<DeleteKeyPairResponse xmlns=\"{NS}\"><requestId>r-1</requestId>\
         <return>yes</return></DeleteKeyPairResponse>"
    );
    match from_document_str::<DeleteKeyPairResponse>(&xml).unwrap_err() {
        WireError::InvalidScalar {
            element,
            expected,
            value,
        } => {
            assert_eq!(element, "return");
            assert_eq!(expected, "xs:boolean");
            assert_eq!(value, "yes");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn bad_timestamp_is_an_invalid_scalar() {
    let xml = format!(
        "<GetConsoleOutputResponse xmlns=\"{NS}\"><requestId>r-1</requestId>\
         <instanceId>i-1</instanceId><timestamp>yesterday</timestamp>\
         <output>SGVsbG8=</output></GetConsoleOutputResponse>"
    );
    let err = from_document_str::<GetConsoleOutputResponse>(&xml).unwrap_err();
    assert!(matches!(err, WireError::InvalidScalar { expected: "xs:dateTime", .. }));
}

#[test]
fn foreign_namespace_fails() {
    let xml = "<DeleteVolume xmlns=\"http://ec2.amazonaws.com/doc/2011-01-01/\">\
               <volumeId>vol-1</volumeId></DeleteVolume>";
    let err = from_document_str::<DeleteVolume>(xml).unwrap_err();
    assert!(matches!(err, WireError::NamespaceMismatch { .. }));
}

#[test]
fn unqualified_document_fails() {
    let xml = "<DeleteVolume><volumeId>vol-1</volumeId></DeleteVolume>";
    let err = from_document_str::<DeleteVolume>(xml).unwrap_err();
    assert!(matches!(err, WireError::NamespaceMismatch { .. }));
}

#[test]
fn truncated_document_fails() {
    let xml = format!("<DeleteVolume xmlns=\"{NS}\"><volumeId>vol-1</volumeId>");
    let err = from_document_str::<DeleteVolume>(&xml).unwrap_err();
    // quick-xml reports the unclosed tag; either shape is a hard failure.
    assert!(matches!(
        err,
        WireError::UnexpectedEof | WireError::Xml(_)
    ));
}

#[test]
fn trailing_garbage_fails() {
    let xml = format!(
        "<DeleteVolume xmlns=\"{NS}\"><volumeId>vol-1</volumeId></DeleteVolume>\
         <DeleteVolume xmlns=\"{NS}\"><volumeId>vol-2</volumeId></DeleteVolume>"
    );
    let err = from_document_str::<DeleteVolume>(&xml).unwrap_err();
    assert!(matches!(err, WireError::TrailingContent));
}

#[test]
fn fault_envelope_fails_typed_parse() {
    let xml = "<soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\">\
               <soapenv:Body><soapenv:Fault>\
               <faultcode>Client.VolumeInUse</faultcode>\
               <faultstring>Volume vol-1 is attached</faultstring>\
               </soapenv:Fault></soapenv:Body></soapenv:Envelope>";
    match from_envelope_str::<DeleteVolume>(xml).unwrap_err() {
        WireError::SoapFault(fault) => assert_eq!(fault.fault_code, "Client.VolumeInUse"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn errors_are_printable_for_operators() {
    let xml = format!(
        "<DeleteVolume xmlns=\"{NS}\"><instanceId>i-1</instanceId></DeleteVolume>"
    );
    let err = from_document_str::<DeleteVolume>(&xml).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("instanceId"));
    assert!(text.contains("volumeId"));
}
