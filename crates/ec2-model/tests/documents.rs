//! Registry dispatch and the JSON view of documents.

use ec2_model::{AnyDocument, DocumentKind};
use ec2_xml::{WireError, XmlWriterOptions};

const NS: &str = "http://ec2.amazonaws.com/doc/2012-08-15/";

#[test]
fn dispatches_on_root_element() {
    let xml = format!(
        "<DeleteKeyPair xmlns=\"{NS}\"><keyName>gsg-keypair</keyName></DeleteKeyPair>"
    );
    let document = AnyDocument::parse_str(&xml).expect("parse");
    assert_eq!(document.element_name(), "DeleteKeyPair");
    assert_eq!(document.kind(), DocumentKind::Request);
    match &document {
        AnyDocument::DeleteKeyPair(request) => assert_eq!(request.key_name, "gsg-keypair"),
        other => panic!("wrong variant: {}", other.element_name()),
    }
}

#[test]
fn serializes_back_to_the_same_bytes() {
    let xml = format!(
        "<CreateTagsResponse xmlns=\"{NS}\"><requestId>7a62c49f</requestId>\
         <return>true</return></CreateTagsResponse>"
    );
    let document = AnyDocument::parse_str(&xml).expect("parse");
    assert_eq!(document.to_xml_string().expect("serialize"), xml);
}

#[test]
fn json_view_is_externally_tagged() {
    let xml = format!(
        "<DeleteVolume xmlns=\"{NS}\"><volumeId>vol-4282672b</volumeId></DeleteVolume>"
    );
    let document = AnyDocument::parse_str(&xml).expect("parse");
    let json = serde_json::to_value(&document).expect("to json");
    assert_eq!(json["DeleteVolume"]["volume_id"], "vol-4282672b");

    let back: AnyDocument = serde_json::from_value(json).expect("from json");
    assert_eq!(back, document);
    assert_eq!(back.to_xml_string().expect("serialize"), xml);
}

#[test]
fn envelope_dispatch_and_rewrap() {
    let xml = format!(
        "<soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\" \
         xmlns=\"{NS}\"><soapenv:Body>\
         <RebootInstancesResponse><requestId>r-1</requestId><return>true</return>\
         </RebootInstancesResponse></soapenv:Body></soapenv:Envelope>"
    );
    let document = AnyDocument::parse_envelope_str(&xml).expect("parse");
    assert_eq!(document.element_name(), "RebootInstancesResponse");
    assert_eq!(document.kind(), DocumentKind::Response);

    let rewrapped = document
        .to_envelope_string_with(&XmlWriterOptions::default())
        .expect("wrap");
    let again = AnyDocument::parse_envelope_str(&rewrapped).expect("reparse");
    assert_eq!(again, document);
}

#[test]
fn envelope_fault_surfaces_through_dispatch() {
    let xml = "<soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\">\
               <soapenv:Body><soapenv:Fault>\
               <faultcode>Server.Unavailable</faultcode>\
               <faultstring>Service unavailable</faultstring>\
               </soapenv:Fault></soapenv:Body></soapenv:Envelope>";
    match AnyDocument::parse_envelope_str(xml).unwrap_err() {
        WireError::SoapFault(fault) => assert_eq!(fault.fault_code, "Server.Unavailable"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn every_descriptor_name_is_unique() {
    let mut names: Vec<&str> = AnyDocument::DESCRIPTORS
        .iter()
        .map(|(name, _)| *name)
        .collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);
}
