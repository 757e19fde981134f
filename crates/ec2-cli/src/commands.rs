//! Command implementations for the EC2 wire tool.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use tracing::{debug, error, info};

use ec2_model::{AnyDocument, DocumentKind};
use ec2_xml::{PrefixStyle, XmlWriterOptions};

use crate::cli::{CheckArgs, DecodeArgs, EncodeArgs};

/// Outcome of checking one file.
pub struct CheckOutcome {
    pub file: PathBuf,
    pub detail: String,
    pub passed: bool,
}

/// Aggregated outcome of a check run.
pub struct CheckSummary {
    pub outcomes: Vec<CheckOutcome>,
}

impl CheckSummary {
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|outcome| !outcome.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.passed).count()
    }
}

/// Decode an XML document and print its JSON form.
pub fn run_decode(args: &DecodeArgs) -> Result<()> {
    let input = read_input(&args.file)?;
    let document = parse_document(&input, args.envelope)
        .with_context(|| format!("decode {}", args.file.display()))?;
    info!(
        element = document.element_name(),
        kind = %document.kind(),
        "decoded document"
    );
    let json = serde_json::to_string_pretty(&document).context("render JSON")?;
    println!("{json}");
    Ok(())
}

/// Encode a JSON document and print its XML form.
pub fn run_encode(args: &EncodeArgs) -> Result<()> {
    let input = read_input(&args.file)?;
    let document: AnyDocument = serde_json::from_str(&input)
        .with_context(|| format!("parse document JSON from {}", args.file.display()))?;
    debug!(element = document.element_name(), "encoding document");
    let xml = if args.envelope {
        let options = XmlWriterOptions {
            indent: args.indent,
            declaration: true,
            prefix: PrefixStyle::Named("soapenv".to_string()),
        };
        document.to_envelope_string_with(&options)
    } else {
        let options = XmlWriterOptions {
            indent: args.indent,
            ..Default::default()
        };
        document.to_xml_string_with(&options)
    }
    .context("serialize document")?;
    println!("{xml}");
    Ok(())
}

/// Verify round-trip fidelity for each file.
pub fn run_check(args: &CheckArgs) -> Result<CheckSummary> {
    let mut outcomes = Vec::new();
    for file in &args.files {
        let outcome = match check_file(file, args) {
            Ok(detail) => {
                info!(file = %file.display(), "check passed");
                CheckOutcome {
                    file: file.clone(),
                    detail,
                    passed: true,
                }
            }
            Err(err) => {
                error!(file = %file.display(), error = %err, "check failed");
                CheckOutcome {
                    file: file.clone(),
                    detail: format!("{err:#}"),
                    passed: false,
                }
            }
        };
        outcomes.push(outcome);
    }
    Ok(CheckSummary { outcomes })
}

/// Check one file: parse, re-serialize, re-parse, compare.
fn check_file(path: &Path, args: &CheckArgs) -> Result<String> {
    let input = read_input(path)?;
    let document = parse_document(&input, args.envelope)?;
    let canonical = document.to_xml_string().context("re-serialize")?;
    let reparsed = AnyDocument::parse_str(&canonical).context("re-parse canonical form")?;
    if reparsed != document {
        anyhow::bail!("value changed across serialize/parse round-trip");
    }
    if args.strict_bytes && canonical != input.trim_end() {
        anyhow::bail!("input is not in canonical form");
    }
    Ok(format!(
        "{} {}",
        document.kind(),
        document.element_name()
    ))
}

/// Print the check summary table and return the exit code.
pub fn print_check_summary(summary: &CheckSummary) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Result"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    for outcome in &summary.outcomes {
        let result_cell = if outcome.passed {
            Cell::new("PASS")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new("FAIL")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            Cell::new(outcome.file.display()),
            result_cell,
            Cell::new(&outcome.detail),
        ]);
    }
    println!("{table}");
    println!(
        "{} of {} file(s) passed",
        summary.passed_count(),
        summary.outcomes.len()
    );
}

/// List every supported document type.
pub fn run_documents() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Document"), header_cell("Kind")]);
    apply_table_style(&mut table);
    for (name, kind) in AnyDocument::DESCRIPTORS {
        let kind_cell = match kind {
            DocumentKind::Request => Cell::new("request").fg(Color::Blue),
            DocumentKind::Response => Cell::new("response").fg(Color::DarkGrey),
        };
        table.add_row(vec![Cell::new(name), kind_cell]);
    }
    println!("{table}");
    Ok(())
}

fn parse_document(input: &str, envelope: bool) -> Result<AnyDocument> {
    let document = if envelope {
        AnyDocument::parse_envelope_str(input)?
    } else {
        AnyDocument::parse_str(input)?
    };
    Ok(document)
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;
    use crate::cli::CheckArgs;

    const NS: &str = "http://ec2.amazonaws.com/doc/2012-08-15/";

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write");
        file
    }

    fn check_args(files: Vec<PathBuf>, strict_bytes: bool) -> CheckArgs {
        CheckArgs {
            files,
            envelope: false,
            strict_bytes,
        }
    }

    #[test]
    fn check_passes_canonical_document() {
        let xml = format!(
            "<DeleteKeyPair xmlns=\"{NS}\"><keyName>gsg-keypair</keyName></DeleteKeyPair>"
        );
        let file = write_temp(&xml);
        let summary =
            run_check(&check_args(vec![file.path().to_path_buf()], true)).expect("run");
        assert!(!summary.has_failures());
        assert_eq!(summary.passed_count(), 1);
        assert!(summary.outcomes[0].detail.contains("DeleteKeyPair"));
    }

    #[test]
    fn check_accepts_indented_input_unless_strict() {
        let xml = format!(
            "<DeleteKeyPair xmlns=\"{NS}\">\n  <keyName>gsg-keypair</keyName>\n</DeleteKeyPair>"
        );
        let file = write_temp(&xml);

        let lenient =
            run_check(&check_args(vec![file.path().to_path_buf()], false)).expect("run");
        assert!(!lenient.has_failures());

        let strict =
            run_check(&check_args(vec![file.path().to_path_buf()], true)).expect("run");
        assert!(strict.has_failures());
        assert!(strict.outcomes[0].detail.contains("canonical"));
    }

    #[test]
    fn check_reports_malformed_documents() {
        let file = write_temp("<DeleteKeyPair><keyName>x</keyName></DeleteKeyPair>");
        let summary =
            run_check(&check_args(vec![file.path().to_path_buf()], false)).expect("run");
        assert!(summary.has_failures());
    }

    #[test]
    fn parse_document_unwraps_envelopes() {
        let xml = format!(
            "<soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\" \
             xmlns=\"{NS}\"><soapenv:Body><DeleteKeyPair>\
             <keyName>gsg-keypair</keyName></DeleteKeyPair>\
             </soapenv:Body></soapenv:Envelope>"
        );
        let document = parse_document(&xml, true).expect("parse");
        assert_eq!(document.element_name(), "DeleteKeyPair");
    }
}
