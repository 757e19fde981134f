//! CLI argument definitions for the EC2 wire tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ec2-wire",
    version,
    about = "Encode, decode, and check EC2 SOAP API wire documents",
    long_about = "Work with EC2 SOAP API (2012-08-15) XML documents.\n\n\
                  Decodes request/response XML to JSON, encodes JSON back to\n\
                  XML, verifies round-trip fidelity, and lists the supported\n\
                  document types."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode an XML document to JSON on stdout.
    Decode(DecodeArgs),

    /// Encode a JSON document to XML on stdout.
    Encode(EncodeArgs),

    /// Parse, re-serialize, and re-parse documents, verifying fidelity.
    Check(CheckArgs),

    /// List all supported document types.
    Documents,
}

#[derive(Parser)]
pub struct DecodeArgs {
    /// Path to the XML document.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Treat the input as a SOAP envelope and decode its body.
    #[arg(long = "envelope")]
    pub envelope: bool,
}

#[derive(Parser)]
pub struct EncodeArgs {
    /// Path to the JSON document (externally tagged by element name).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Indent the XML output for human consumption.
    ///
    /// Indented output is not canonical; omit this flag when the bytes are
    /// to be compared or transmitted.
    #[arg(long = "indent")]
    pub indent: bool,

    /// Wrap the document in a SOAP envelope.
    #[arg(long = "envelope")]
    pub envelope: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Paths to the XML documents to verify.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Treat the inputs as SOAP envelopes.
    #[arg(long = "envelope")]
    pub envelope: bool,

    /// Additionally require the input bytes to equal the canonical
    /// serialization (implies canonically formatted input).
    #[arg(long = "strict-bytes")]
    pub strict_bytes: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
