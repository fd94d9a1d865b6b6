use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use openapi3_document::Value;

/// Read a JSON or YAML document. `.json` files are read as JSON; anything
/// else as YAML, which also accepts JSON text.
pub fn load_value(path: &Path) -> anyhow::Result<Value> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Error reading {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
    let value = if is_json {
        Value::from_json_str(&contents)
    } else {
        Value::from_yaml_str(&contents)
    };
    value.with_context(|| format!("Error parsing {}", path.display()))
}

/// Parse a `NAME=PATH` external document argument.
pub fn parse_document_arg(arg: &str) -> anyhow::Result<(String, PathBuf)> {
    let Some((name, path)) = arg.split_once('=') else {
        bail!("expected NAME=PATH, got '{arg}'");
    };
    if name.is_empty() || path.is_empty() {
        bail!("expected NAME=PATH, got '{arg}'");
    }
    Ok((name.to_string(), PathBuf::from(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_arg() {
        let (name, path) = parse_document_arg("common.yaml=specs/common.yaml").unwrap();
        assert_eq!(name, "common.yaml");
        assert_eq!(path, PathBuf::from("specs/common.yaml"));
    }

    #[test]
    fn test_parse_document_arg_requires_both_parts() {
        assert!(parse_document_arg("common.yaml").is_err());
        assert!(parse_document_arg("=specs/common.yaml").is_err());
        assert!(parse_document_arg("common.yaml=").is_err());
    }
}
