//! Wire-level round-trip tests using a small local document type.

use std::io::Write;

use chrono::{TimeZone, Utc};
use ec2_xml::{
    FromXml, PrefixStyle, Result, ToXml, WireError, XmlDocument, XmlReader, XmlWriter,
    XmlWriterOptions, from_document_str, from_envelope_str, root_local_name, to_document_string,
    to_document_string_with, to_envelope_string,
};
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Probe {
    id: String,
    count: i32,
    enabled: Option<bool>,
    note: Option<String>,
    seen_at: chrono::DateTime<Utc>,
    values: Vec<String>,
}

impl ToXml for Probe {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("id", &self.id)?;
        w.i32_element("count", self.count)?;
        w.opt_bool_element("enabled", self.enabled)?;
        w.opt_text_element("note", self.note.as_deref())?;
        w.datetime_element("seenAt", &self.seen_at)?;
        w.start("valueSet")?;
        for value in &self.values {
            w.text_element("item", value)?;
        }
        w.end()?;
        w.end()
    }
}

impl FromXml for Probe {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let id = r.read_text_element("id")?;
        let count = r.read_i32_element("count")?;
        let enabled = r.try_read_bool_element("enabled")?;
        let note = r.try_read_text_element("note")?;
        let seen_at = r.read_datetime_element("seenAt")?;
        r.read_start("valueSet")?;
        let mut values = Vec::new();
        while r.try_read_start("item")? {
            values.push(r.read_text()?);
            r.read_end()?;
        }
        r.read_end()?;
        r.read_end()?;
        Ok(Self {
            id,
            count,
            enabled,
            note,
            seen_at,
            values,
        })
    }
}

impl XmlDocument for Probe {
    const ELEMENT: &'static str = "Probe";
}

fn sample() -> Probe {
    Probe {
        id: "p-1".to_string(),
        count: 3,
        enabled: Some(true),
        note: None,
        seen_at: Utc.with_ymd_and_hms(2012, 8, 15, 9, 0, 0).unwrap(),
        values: vec!["one".to_string(), "two".to_string()],
    }
}

#[test]
fn value_roundtrip() {
    let probe = sample();
    let xml = to_document_string(&probe).expect("serialize");
    let back: Probe = from_document_str(&xml).expect("parse");
    assert_eq!(back, probe);
}

#[test]
fn canonical_bytes_are_stable() {
    let probe = sample();
    let first = to_document_string(&probe).expect("serialize");
    let back: Probe = from_document_str(&first).expect("parse");
    let second = to_document_string(&back).expect("serialize again");
    assert_eq!(first, second);
}

#[test]
fn prefix_choice_is_not_significant() {
    let probe = sample();
    let options = XmlWriterOptions {
        prefix: PrefixStyle::Named("ec2".to_string()),
        ..Default::default()
    };
    let prefixed = to_document_string_with(&probe, &options).expect("serialize");
    assert!(prefixed.starts_with("<ec2:Probe"));
    let back: Probe = from_document_str(&prefixed).expect("parse prefixed");
    assert_eq!(back, probe);
}

#[test]
fn absent_and_empty_optionals_are_distinct() {
    let mut probe = sample();
    probe.note = Some(String::new());
    let xml = to_document_string(&probe).expect("serialize");
    assert!(xml.contains("<note></note>"));
    let back: Probe = from_document_str(&xml).expect("parse");
    assert_eq!(back.note, Some(String::new()));

    probe.note = None;
    let xml = to_document_string(&probe).expect("serialize");
    assert!(!xml.contains("note"));
    let back: Probe = from_document_str(&xml).expect("parse");
    assert_eq!(back.note, None);
}

#[test]
fn wrong_root_element_is_rejected() {
    let xml = to_document_string(&sample()).expect("serialize");
    let renamed = xml.replace("Probe", "Zonde");
    let err = from_document_str::<Probe>(&renamed).unwrap_err();
    assert!(matches!(err, WireError::UnexpectedElement { .. }));
}

#[test]
fn root_name_peek_does_not_need_a_full_parse() {
    let xml = to_document_string(&sample()).expect("serialize");
    assert_eq!(root_local_name(&xml).expect("root"), "Probe");
}

#[test]
fn envelope_roundtrip() {
    let probe = sample();
    let enveloped = to_envelope_string(&probe).expect("envelope");
    assert!(enveloped.starts_with("<?xml"));
    assert!(enveloped.contains("soapenv:Envelope"));
    let back: Probe = from_envelope_str(&enveloped).expect("unwrap");
    assert_eq!(back, probe);
}

#[test]
fn envelope_with_header_is_accepted() {
    let xml = "<soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\" \
               xmlns=\"http://ec2.amazonaws.com/doc/2012-08-15/\">\
               <soapenv:Header><wsse:Security xmlns:wsse=\"http://example.com/wsse\">\
               <wsse:Token>abc</wsse:Token></wsse:Security></soapenv:Header>\
               <soapenv:Body><Probe><id>p-9</id><count>1</count>\
               <seenAt>2012-08-15T09:00:00.000Z</seenAt><valueSet></valueSet>\
               </Probe></soapenv:Body></soapenv:Envelope>";
    let probe: Probe = from_envelope_str(xml).expect("unwrap");
    assert_eq!(probe.id, "p-9");
    assert_eq!(probe.enabled, None);
    assert!(probe.values.is_empty());
}

#[test]
fn fault_body_surfaces_as_error() {
    let xml = "<soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\">\
               <soapenv:Body><soapenv:Fault>\
               <faultcode>Server.InternalError</faultcode>\
               <faultstring>An internal error has occurred</faultstring>\
               </soapenv:Fault></soapenv:Body></soapenv:Envelope>";
    match from_envelope_str::<Probe>(xml).unwrap_err() {
        WireError::SoapFault(fault) => {
            assert_eq!(fault.fault_code, "Server.InternalError");
            assert_eq!(fault.detail, None);
        }
        other => panic!("unexpected error: {other}"),
    }
}

proptest! {
    #[test]
    fn scalar_text_roundtrips(id in "[a-zA-Z0-9_.-]{0,40}", count in any::<i32>()) {
        let probe = Probe {
            id,
            count,
            enabled: None,
            note: None,
            seen_at: Utc.with_ymd_and_hms(2012, 8, 15, 0, 0, 0).unwrap(),
            values: Vec::new(),
        };
        let xml = to_document_string(&probe).unwrap();
        let back: Probe = from_document_str(&xml).unwrap();
        prop_assert_eq!(back, probe);
    }

    #[test]
    fn escaped_content_roundtrips(value in "[<>&\"'a-z]{0,24}") {
        let probe = Probe {
            id: "p".to_string(),
            count: 0,
            enabled: None,
            note: Some(value),
            seen_at: Utc.with_ymd_and_hms(2012, 8, 15, 0, 0, 0).unwrap(),
            values: Vec::new(),
        };
        let xml = to_document_string(&probe).unwrap();
        let back: Probe = from_document_str(&xml).unwrap();
        prop_assert_eq!(back, probe);
    }
}
