//! Check command - validates an OpenAPI document and prints every error.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use nu_ansi_term::Color;
use openapi3_parser::{Config, Document, ValidationError};
use tracing::debug;

use crate::util::{load_value, parse_document_arg};

#[derive(clap::Args)]
pub struct Args {
    /// Path to the OpenAPI document (JSON or YAML)
    pub file: PathBuf,

    /// External document addressable from `$ref`, e.g.
    /// `--document common.yaml=specs/common.yaml`
    #[arg(short, long = "document", value_name = "NAME=PATH")]
    pub documents: Vec<String>,
}

pub fn run(args: Args, quiet: bool) -> anyhow::Result<ExitCode> {
    let start = Instant::now();

    let root = load_value(&args.file)?;
    let mut config = Config::default();
    for arg in &args.documents {
        let (name, path) = parse_document_arg(arg)?;
        debug!(%name, path = %path.display(), "loading external document");
        config = config.with_document(name, load_value(&path)?);
    }

    let document = Document::with_config(root, config);
    let errors = document.errors();
    let duration_s = start.elapsed().as_secs_f64();
    let file = args.file.display();

    for error in errors {
        eprintln!("{}", format_error(error));
    }

    if errors.is_empty() {
        if !quiet {
            println!("{} {} is valid", Color::Green.bold().paint("✓"), file);
            println!(
                "openapi3 check: {} reference(s) resolved in {:.2}s",
                document.reference_count(),
                duration_s
            );
        }
        Ok(ExitCode::SUCCESS)
    } else {
        if !quiet {
            println!(
                "{} {} has {} error(s)",
                Color::Red.bold().paint("✗"),
                file,
                errors.len()
            );
        }
        Ok(ExitCode::FAILURE)
    }
}

/// `<location>: <message> (<schema kind>)`
fn format_error(error: &ValidationError) -> String {
    format!(
        "{}: {} ({})",
        error.location_summary(),
        error.message,
        error.schema_kind
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi3_document::Value;

    #[test]
    fn test_format_error() {
        let root = Value::from_json_str(r#"{"openapi": "3.0.0", "paths": {}}"#).unwrap();
        let document = Document::new(root);
        let error = document.errors().first().unwrap();
        assert_eq!(
            format_error(error),
            "#/: Missing required fields: info (Openapi)"
        );
    }
}
