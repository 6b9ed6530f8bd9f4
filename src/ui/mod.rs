//! Terminal and NDJSON output for the CLI

pub mod output;
