use openapi3_parser::{Document, ErrorKind, NodeFactory};
use openapi3_document::Value;
use serde_json::json;

fn document(input: serde_json::Value) -> Document {
    Document::new(Value::try_from(input).expect("Failed to convert input"))
}

fn petstore() -> serde_json::Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Pets",
            "version": "1.0",
            "license": { "name": "MIT", "url": "https://opensource.org/licenses/MIT" },
            "contact": { "email": "pets@example.com" }
        },
        "servers": [{ "url": "https://{region}.example.com", "variables": {
            "region": { "default": "eu", "enum": ["eu", "us"] }
        }}],
        "paths": {
            "/pets": {
                "get": {
                    "operationId": "listPets",
                    "tags": ["pets"],
                    "parameters": [
                        { "name": "limit", "in": "query", "schema": { "type": "integer" } }
                    ],
                    "responses": {
                        "200": {
                            "description": "A list of pets",
                            "content": { "application/json": {
                                "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } }
                            }}
                        },
                        "default": { "description": "Unexpected error" }
                    }
                }
            },
            "/pets/{petId}": {
                "parameters": [
                    { "name": "petId", "in": "path", "required": true, "schema": { "type": "string" } }
                ],
                "get": {
                    "responses": {
                        "200": {
                            "description": "A pet",
                            "content": { "application/json": {
                                "schema": { "$ref": "#/components/schemas/Pet" }
                            }}
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Pet": {
                    "type": "object",
                    "required": ["id", "name"],
                    "properties": {
                        "id": { "type": "integer", "format": "int64" },
                        "name": { "type": "string" }
                    }
                }
            }
        },
        "tags": [{ "name": "pets" }]
    })
}

#[test]
fn test_valid_document_has_no_errors() {
    let document = document(petstore());

    assert!(document.errors().is_empty(), "{:?}", document.errors());
    assert!(document.is_valid());
    let root = document.root().expect("Failed to build root node");
    assert_eq!(root.kind(), Some("Openapi"));
    assert_eq!(document.openapi_version(), Some("3.0.0"));
}

#[test]
fn test_node_exposes_fields() {
    let document = document(petstore());
    let root = document.root().expect("Failed to build root node");

    let info = root.get("info").expect("info should be present");
    assert_eq!(info.get("title").and_then(|title| title.as_str().map(str::to_string)), Some("Pets".to_string()));

    let paths = root.get("paths").expect("paths should be present");
    let keys: Vec<String> = paths
        .as_map()
        .expect("paths should be a map")
        .keys()
        .map(str::to_string)
        .collect();
    assert_eq!(keys, vec!["/pets", "/pets/{petId}"]);

    let operation = paths
        .get("/pets")
        .and_then(|item| item.get("get"))
        .expect("operation should be present");
    assert_eq!(operation.kind(), Some("Operation"));
    assert_eq!(operation.get("deprecated").and_then(|node| node.as_bool()), Some(false));
}

#[test]
fn test_absent_optional_fields_get_defaults() {
    let document = document(petstore());
    let root = document.root().expect("Failed to build root node");

    let parameter = root
        .get("paths")
        .and_then(|paths| paths.get("/pets"))
        .and_then(|item| item.get("get"))
        .and_then(|operation| operation.get("parameters"))
        .and_then(|parameters| parameters.index(0))
        .expect("parameter should be present");
    assert_eq!(parameter.get("style").and_then(|node| node.as_str().map(str::to_string)), Some("form".to_string()));
    assert_eq!(parameter.get("explode").and_then(|node| node.as_bool()), Some(true));
    assert_eq!(parameter.get("required").and_then(|node| node.as_bool()), Some(false));
    // No content was given, so there is nothing to default to
    assert!(parameter.get("content").is_some_and(|node| node.is_null()));

    let security = root.get("security").expect("security should be present");
    assert!(security.as_array().is_some_and(|items| items.is_empty()));
}

#[test]
fn test_errors_are_memoized() {
    let document = document(json!({ "openapi": "3.0.0", "info": {} }));

    let first = document.errors();
    let second = document.errors();
    assert!(std::ptr::eq(first, second));
    assert_eq!(first.len(), 2);
}

#[test]
fn test_node_fails_with_first_collected_error() {
    let document = document(json!({
        "openapi": 3,
        "info": { "title": "Pets" },
        "paths": {}
    }));

    let errors = document.errors();
    let kinds: Vec<ErrorKind> = errors.iter().map(|error| error.kind).collect();
    assert_eq!(kinds, vec![ErrorKind::InvalidType, ErrorKind::MissingFields]);

    let error = document.root().expect_err("Building an invalid document should fail");
    let first = errors.first().expect("There should be a first error");
    assert_eq!(error.kind(), first.kind);
    assert_eq!(error.location(), &first.location);
    assert_eq!(first.location_summary(), "#/openapi");
}

#[test]
fn test_root_must_be_an_object() {
    let document = document(json!(null));

    let error = document.errors().first().expect("There should be an error");
    assert_eq!(error.kind, ErrorKind::InvalidType);
    assert_eq!(error.message, "Invalid type. Expected Object");
    assert_eq!(error.schema_kind, "Openapi");
}

#[test]
fn test_missing_root_fields_are_reported_together() {
    let document = document(json!({ "openapi": "3.0.0" }));

    let error = document.errors().first().expect("There should be an error");
    assert_eq!(error.kind, ErrorKind::MissingFields);
    assert_eq!(error.message, "Missing required fields: info, paths");
    assert_eq!(error.location_summary(), "#/");
}

#[test]
fn test_extensions_are_allowed_and_exposed() {
    let mut input = petstore();
    input["x-logo"] = json!({ "url": "https://example.com/logo.png" });
    input["info"]["x-audience"] = json!("internal");
    input["paths"]["x-internal"] = json!(true);
    let document = document(input);

    assert!(document.errors().is_empty(), "{:?}", document.errors());
    let root = document.root().expect("Failed to build root node");
    let object = root.as_object().expect("root should be an object");
    assert!(object.extension("logo").is_some());
    assert_eq!(object.extensions().count(), 1);
}

#[test]
fn test_unknown_fields_are_unexpected() {
    let mut input = petstore();
    input["info"]["colour"] = json!("blue");
    let document = document(input);

    let errors: Vec<_> = document.errors().of_kind(ErrorKind::UnexpectedFields).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Unexpected fields: colour");
    assert_eq!(errors[0].location_summary(), "#/info");
}

#[test]
fn test_unsupported_version() {
    let mut input = petstore();
    input["openapi"] = json!("2.0");
    let document = document(input);

    let error = document.errors().first().expect("There should be an error");
    assert_eq!(error.kind, ErrorKind::InvalidData);
    assert_eq!(error.message, "Unsupported OpenAPI version: 2.0 - expected 3.x.y");
}

#[test]
fn test_from_yaml_with_numeric_response_codes() {
    let document = Document::from_yaml_str(
        r#"
openapi: 3.0.3
info:
  title: Pets
  version: "1.0"
paths:
  /pets:
    get:
      responses:
        200:
          description: OK
"#,
    )
    .expect("Failed to load YAML");

    assert!(document.is_valid(), "{:?}", document.errors());
    let root = document.root().expect("Failed to build root node");
    let response = root
        .get("paths")
        .and_then(|paths| paths.get("/pets"))
        .and_then(|item| item.get("get"))
        .and_then(|operation| operation.get("responses"))
        .and_then(|responses| responses.get("200"));
    assert_eq!(response.and_then(|node| node.kind()), Some("Response"));
}

#[test]
fn test_factory_reports_validity() {
    let document = document(petstore());
    assert!(document.factory().is_valid());
    assert_eq!(document.factory().schema_kind(), "Openapi");
}
