//! Library surface of the `ec2-wire` CLI: logging setup is exposed here so
//! integration tests and embedding tools can reuse it.

pub mod logging;
