use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::factory::is_extension;
use crate::prelude_internal::*;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex")
});

/// Path templates: `/`-separated segments of URL path characters and
/// `{parameter}` placeholders.
static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let pchar = r"(?:[\-;_.!~*'()a-zA-Z\d:@&=+$,]|%[a-fA-F\d]{2})";
    Regex::new(&format!(r"^/(?:{pchar}*(?:\{{{pchar}+\}})*/?)*$")).expect("invalid path regex")
});

static PATH_PARAMETER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]*\}").expect("invalid path parameter regex"));

static RESPONSE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:default|[1-5](?:[0-9][0-9]|XX))$").expect("invalid response key regex")
});

static COMPONENT_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9.\-_]+$").expect("invalid component key regex"));

fn quoted(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn map_keys(validatable: &Validatable<'_>) -> Vec<String> {
    validatable
        .input()
        .and_then(Value::as_map)
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}

/// An absolute URL.
pub fn url(validatable: &mut Validatable<'_>) {
    let Some(input) = validatable.input().and_then(Value::as_str) else {
        return;
    };
    if Url::parse(input).is_err() {
        validatable.add_error(format!("Invalid URL: '{input}'"));
    }
}

/// A URI with a scheme.
pub fn absolute_uri(validatable: &mut Validatable<'_>) {
    let Some(input) = validatable.input().and_then(Value::as_str) else {
        return;
    };
    match Url::parse(input) {
        Ok(uri) if !uri.cannot_be_a_base() || uri.scheme() == "urn" => {}
        _ => validatable.add_error(format!("Expected an absolute URI, got '{input}'")),
    }
}

pub fn email(validatable: &mut Validatable<'_>) {
    let Some(input) = validatable.input().and_then(Value::as_str) else {
        return;
    };
    if !EMAIL_PATTERN.is_match(input) {
        validatable.add_error(format!("Invalid email address: '{input}'"));
    }
}

/// Paths map keys: valid templates that do not collide once their
/// parameter names are dropped.
pub fn paths(validatable: &mut Validatable<'_>) {
    let keys = map_keys(validatable);
    let paths: Vec<&str> = keys
        .iter()
        .map(String::as_str)
        .filter(|key| !is_extension(key))
        .collect();

    let invalid: Vec<&str> = paths
        .iter()
        .copied()
        .filter(|path| !PATH_PATTERN.is_match(path))
        .collect();
    if !invalid.is_empty() {
        validatable.add_error(format!("There are invalid paths: {}", quoted(&invalid)));
    }

    let conflicts = conflicting_paths(&paths);
    if !conflicts.is_empty() {
        validatable.add_error(format!("There are paths that conflict: {}", quoted(&conflicts)));
    }
}

/// Templated paths equal to another templated path once parameters are
/// removed, e.g. `/pets/{id}` and `/pets/{name}`.
fn conflicting_paths<'a>(paths: &[&'a str]) -> Vec<&'a str> {
    let mut groups: IndexMap<String, Vec<&'a str>> = IndexMap::new();
    for path in paths {
        let stripped = PATH_PARAMETER.replace_all(path, "");
        if stripped != *path {
            groups.entry(stripped.into_owned()).or_default().push(*path);
        }
    }
    groups
        .into_values()
        .filter(|group| group.len() > 1)
        .flatten()
        .collect()
}

/// Responses map keys: `default`, status codes, status code ranges or
/// extensions.
pub fn response_keys(validatable: &mut Validatable<'_>) {
    let keys = map_keys(validatable);
    let invalid: Vec<&str> = keys
        .iter()
        .map(String::as_str)
        .filter(|key| !is_extension(key) && !RESPONSE_KEY.is_match(key))
        .collect();
    if !invalid.is_empty() {
        validatable.add_error(format!(
            "Invalid responses keys: {} - default, status codes and status code ranges allowed",
            quoted(&invalid)
        ));
    }
}

pub fn component_keys(validatable: &mut Validatable<'_>) {
    let keys = map_keys(validatable);
    let invalid: Vec<&str> = keys
        .iter()
        .map(String::as_str)
        .filter(|key| !COMPONENT_KEY.is_match(key))
        .collect();
    if !invalid.is_empty() {
        validatable.add_error(format!(
            "Contains invalid keys: {} - only letters, digits, '.', '-' and '_' allowed",
            quoted(&invalid)
        ));
    }
}

/// Repeated `name` values across the elements of an array, in first
/// occurrence order.
fn duplicate_names(items: &[Value], key: impl Fn(&Map) -> Option<String>) -> Vec<String> {
    let mut seen: IndexMap<String, usize> = IndexMap::new();
    for item in items.iter().filter_map(Value::as_map) {
        if let Some(name) = key(item) {
            *seen.entry(name).or_default() += 1;
        }
    }
    seen.into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name)
        .collect()
}

pub fn unique_tag_names(validatable: &mut Validatable<'_>) {
    let Some(items) = validatable.input().and_then(Value::as_array) else {
        return;
    };
    let duplicates = duplicate_names(items, |tag| tag.get("name")?.as_str().map(str::to_string));
    if !duplicates.is_empty() {
        validatable.add_error(format!("Duplicate tag names: {}", duplicates.join(", ")));
    }
}

/// Parameters are unique by `name` and `in`. References are followed, so a
/// referenced parameter clashes with an inline one.
pub fn duplicate_parameters(validatable: &mut Validatable<'_>) {
    let Some(Value::Array(items)) = validatable.factory().resolved_input() else {
        return;
    };
    let duplicates = duplicate_names(&items, |parameter| {
        let name = parameter.get("name")?.as_str()?;
        let location = parameter.get("in")?.as_str()?;
        Some(format!("{name} in {location}"))
    });
    if !duplicates.is_empty() {
        validatable.add_error(format!("Duplicate parameters: {}", duplicates.join(", ")));
    }
}
