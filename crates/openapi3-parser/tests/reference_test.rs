use openapi3_parser::{Config, Document, ErrorKind, Node};
use openapi3_document::Value;
use serde_json::json;

fn value(input: serde_json::Value) -> Value {
    Value::try_from(input).expect("Failed to convert input")
}

fn document(input: serde_json::Value) -> Document {
    Document::new(value(input))
}

fn openapi(paths: serde_json::Value, components: serde_json::Value) -> serde_json::Value {
    json!({
        "openapi": "3.0.0",
        "info": { "title": "References", "version": "1.0" },
        "paths": paths,
        "components": components
    })
}

fn lookup(node: &Node, keys: &[&str]) -> Node {
    keys.iter().fold(node.clone(), |node, key| {
        node.get(key)
            .unwrap_or_else(|| panic!("Missing key {key}"))
    })
}

#[test]
fn test_references_to_one_target_share_a_node() {
    let document = document(openapi(
        json!({
            "/a": { "get": { "responses": { "200": { "$ref": "#/components/responses/Ok" } } } },
            "/b": { "get": { "responses": { "200": { "$ref": "#/components/responses/Ok" } } } }
        }),
        json!({ "responses": { "Ok": { "description": "Fine" } } }),
    ));

    assert!(document.is_valid(), "{:?}", document.errors());
    assert_eq!(document.reference_count(), 1);
    let root = document.root().expect("Failed to build root node");
    let a = lookup(&root, &["paths", "/a", "get", "responses", "200"]);
    let b = lookup(&root, &["paths", "/b", "get", "responses", "200"]);
    assert!(a.ptr_eq(&b));
    assert_eq!(a.kind(), Some("Response"));
    assert_eq!(
        a.location().map(ToString::to_string),
        Some("#/components/responses/Ok".to_string())
    );
}

#[test]
fn test_errors_of_a_shared_target_are_reported_once() {
    let document = document(openapi(
        json!({
            "/a": { "get": { "responses": { "200": { "$ref": "#/components/responses/Ok" } } } },
            "/b": { "get": { "responses": { "200": { "$ref": "#/components/responses/Ok" } } } }
        }),
        json!({ "responses": { "Ok": {} } }),
    ));

    let errors: Vec<_> = document.errors().of_kind(ErrorKind::MissingFields).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].location_summary(), "#/components/responses/Ok");
    assert_eq!(errors[0].message, "Missing required fields: description");
}

#[test]
fn test_self_referencing_schema() {
    let document = document(openapi(
        json!({}),
        json!({ "schemas": { "Tree": {
            "type": "object",
            "properties": {
                "value": { "type": "string" },
                "children": { "type": "array", "items": { "$ref": "#/components/schemas/Tree" } },
                "parent": { "$ref": "#/components/schemas/Tree" }
            }
        }}}),
    ));

    assert!(document.is_valid(), "{:?}", document.errors());
    assert_eq!(document.errors().of_kind(ErrorKind::InvalidReference).count(), 0);

    let root = document.root().expect("Failed to build root node");
    let tree = lookup(&root, &["components", "schemas", "Tree"]);
    let parent = lookup(&tree, &["properties", "parent"]);
    assert_eq!(parent.kind(), Some("Schema"));

    let grandparent = lookup(&parent, &["properties", "parent"]);
    assert!(grandparent.is_recursive());
    assert!(grandparent.ptr_eq(&parent));

    let item = lookup(&parent, &["properties", "children", "items"]);
    assert!(item.ptr_eq(&parent));
    assert_eq!(
        lookup(&grandparent, &["properties", "value", "type"]).as_str(),
        Some("string")
    );
}

#[test]
fn test_reference_cycle_between_schemas() {
    let document = document(openapi(
        json!({}),
        json!({ "schemas": {
            "A": { "properties": { "b": { "$ref": "#/components/schemas/B" } } },
            "B": { "properties": { "a": { "$ref": "#/components/schemas/A" } } }
        }}),
    ));

    assert!(document.is_valid(), "{:?}", document.errors());
    let root = document.root().expect("Failed to build root node");
    let b = lookup(&root, &["components", "schemas", "A", "properties", "b"]);
    let a = lookup(&b, &["properties", "a"]);
    assert_eq!(a.kind(), Some("Schema"));
    assert!(lookup(&a, &["properties", "b"]).ptr_eq(&b));
}

#[test]
fn test_errors_inside_a_cycle_are_found() {
    let document = document(openapi(
        json!({}),
        json!({ "schemas": { "Node": {
            "type": "array",
            "properties": { "next": { "$ref": "#/components/schemas/Node" } }
        }}}),
    ));

    let errors: Vec<_> = document.errors().of_kind(ErrorKind::InvalidData).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "items must be defined for a type of array");
    assert_eq!(errors[0].location_summary(), "#/components/schemas/Node");
}

#[test]
fn test_unresolvable_reference() {
    let document = document(openapi(
        json!({}),
        json!({ "schemas": { "Pet": { "$ref": "#/components/schemas/Missing" } } }),
    ));

    let error = document.errors().first().expect("There should be an error");
    assert_eq!(error.kind, ErrorKind::InvalidReference);
    assert_eq!(error.location_summary(), "#/components/schemas/Pet/$ref");
    assert!(error.message.contains("#/components/schemas/Missing"));

    let failure = document.root().expect_err("Building should fail");
    assert_eq!(failure.kind(), ErrorKind::InvalidReference);
}

#[test]
fn test_reference_to_unknown_document() {
    let document = document(openapi(
        json!({}),
        json!({ "schemas": { "Pet": { "$ref": "shared.yaml#/Pet" } } }),
    ));

    let error = document.errors().first().expect("There should be an error");
    assert_eq!(error.kind, ErrorKind::InvalidReference);
    assert_eq!(error.message, "'shared.yaml' is not a registered document");
}

#[test]
fn test_reference_must_be_a_string() {
    let document = document(openapi(
        json!({}),
        json!({ "schemas": { "Pet": { "$ref": 42 } } }),
    ));

    let error = document.errors().first().expect("There should be an error");
    assert_eq!(error.kind, ErrorKind::InvalidType);
    assert_eq!(error.location_summary(), "#/components/schemas/Pet/$ref");
}

#[test]
fn test_reference_into_external_document() {
    let shared = value(json!({
        "Error": {
            "type": "object",
            "properties": { "code": { "$ref": "#/Code" } }
        },
        "Code": { "type": "integer" }
    }));
    let input = value(openapi(
        json!({}),
        json!({ "schemas": { "Error": { "$ref": "shared.yaml#/Error" } } }),
    ));
    let document = Document::with_config(input, Config::default().with_document("shared.yaml", shared));

    assert!(document.is_valid(), "{:?}", document.errors());
    let root = document.root().expect("Failed to build root node");
    let error = lookup(&root, &["components", "schemas", "Error"]);
    assert_eq!(
        error.location().map(ToString::to_string),
        Some("shared.yaml#/Error".to_string())
    );

    // References inside the external document stay in that document
    let code = lookup(&error, &["properties", "code"]);
    assert_eq!(
        code.location().map(ToString::to_string),
        Some("shared.yaml#/Code".to_string())
    );
}

#[test]
fn test_errors_in_external_document_carry_its_name() {
    let shared = value(json!({ "Ok": {} }));
    let input = value(openapi(
        json!({}),
        json!({ "responses": { "Ok": { "$ref": "shared.yaml#/Ok" } } }),
    ));
    let document = Document::with_config(input, Config::default().with_document("shared.yaml", shared));

    let error = document.errors().first().expect("There should be an error");
    assert_eq!(error.kind, ErrorKind::MissingFields);
    assert_eq!(error.location_summary(), "shared.yaml#/Ok");
}

#[test]
fn test_path_item_reference_is_merged() {
    let shared = value(json!({
        "pets": {
            "summary": "Shared",
            "description": "Pets from the shared document",
            "get": { "responses": { "200": { "description": "Pets" } } }
        }
    }));
    let input = value(openapi(
        json!({ "/pets": { "$ref": "shared.yaml#/pets", "summary": "Local" } }),
        json!({}),
    ));
    let document = Document::with_config(input, Config::default().with_document("shared.yaml", shared));

    assert!(document.is_valid(), "{:?}", document.errors());
    let root = document.root().expect("Failed to build root node");
    let item = lookup(&root, &["paths", "/pets"]);
    let object = item.as_object().expect("path item should be an object");

    assert!(object.get("$ref").is_none());
    assert_eq!(object.get("summary").and_then(Node::as_str), Some("Local"));
    assert_eq!(
        object.get("description").and_then(Node::as_str),
        Some("Pets from the shared document")
    );
    assert_eq!(lookup(&item, &["get"]).kind(), Some("Operation"));
    assert_eq!(object.location().to_string(), "shared.yaml#/pets");
}

#[test]
fn test_referenced_parameters_count_as_duplicates() {
    let document = document(openapi(
        json!({ "/pets": {
            "parameters": [
                { "$ref": "#/components/parameters/Limit" },
                { "name": "limit", "in": "query" }
            ],
            "get": { "responses": { "200": { "description": "Pets" } } }
        }}),
        json!({ "parameters": { "Limit": { "name": "limit", "in": "query" } } }),
    ));

    let errors: Vec<_> = document.errors().of_kind(ErrorKind::InvalidData).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Duplicate parameters: limit in query");
    assert_eq!(errors[0].location_summary(), "#/paths/~1pets/parameters");
}

#[test]
fn test_reference_to_a_reference_is_followed() {
    let document = document(openapi(
        json!({
            "/pets": { "get": { "responses": { "200": { "$ref": "#/components/responses/Alias" } } } }
        }),
        json!({ "responses": {
            "Alias": { "$ref": "#/components/responses/Ok" },
            "Ok": { "description": "Fine" }
        }}),
    ));

    assert!(document.is_valid(), "{:?}", document.errors());
    let root = document.root().expect("Failed to build root node");
    let response = lookup(&root, &["paths", "/pets", "get", "responses", "200"]);
    assert_eq!(response.kind(), Some("Response"));
    assert_eq!(
        response.location().map(ToString::to_string),
        Some("#/components/responses/Ok".to_string())
    );
    assert!(response.ptr_eq(&lookup(&root, &["components", "responses", "Alias"])));
}

#[test]
fn test_schema_reference_chain() {
    let document = document(openapi(
        json!({}),
        json!({ "schemas": {
            "Person": { "type": "object", "properties": { "name": { "type": "string" } } },
            "Owner": { "$ref": "#/components/schemas/Person" },
            "Pet": { "properties": { "owner": { "$ref": "#/components/schemas/Owner" } } }
        }}),
    ));

    assert!(document.is_valid(), "{:?}", document.errors());
    let root = document.root().expect("Failed to build root node");
    let owner = lookup(&root, &["components", "schemas", "Pet", "properties", "owner"]);
    assert_eq!(owner.kind(), Some("Schema"));
    assert_eq!(
        owner.location().map(ToString::to_string),
        Some("#/components/schemas/Person".to_string())
    );
    assert_eq!(
        lookup(&owner, &["properties", "name", "type"]).as_str(),
        Some("string")
    );
}

#[test]
fn test_errors_at_the_end_of_a_chain() {
    let document = document(openapi(
        json!({
            "/pets": { "get": { "responses": { "200": { "$ref": "#/components/responses/Alias" } } } }
        }),
        json!({ "responses": {
            "Alias": { "$ref": "#/components/responses/Ok" },
            "Ok": {}
        }}),
    ));

    let errors: Vec<_> = document.errors().iter().collect();
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert_eq!(errors[0].kind, ErrorKind::MissingFields);
    assert_eq!(errors[0].location_summary(), "#/components/responses/Ok");
}

#[test]
fn test_references_that_only_point_at_each_other() {
    let document = document(openapi(
        json!({}),
        json!({ "schemas": {
            "A": { "$ref": "#/components/schemas/B" },
            "B": { "$ref": "#/components/schemas/A" }
        }}),
    ));

    assert!(document.is_valid(), "{:?}", document.errors());
    let root = document.root().expect("Failed to build root node");
    assert!(lookup(&root, &["components", "schemas", "A"]).is_recursive());
}

#[test]
fn test_percent_encoded_reference() {
    let document = document(openapi(
        json!({
            "/pets/{id}": { "summary": "One pet" },
            "/alias/{id}": { "$ref": "#/paths/~1pets~1%7Bid%7D" }
        }),
        json!({}),
    ));

    assert!(document.is_valid(), "{:?}", document.errors());
    let root = document.root().expect("Failed to build root node");
    let alias = lookup(&root, &["paths", "/alias/{id}"]);
    assert_eq!(lookup(&alias, &["summary"]).as_str(), Some("One pet"));
    assert_eq!(
        alias.location().map(ToString::to_string),
        Some("#/paths/~1pets~1{id}".to_string())
    );
}

#[test]
fn test_path_item_referencing_itself_keeps_the_reference() {
    let document = document(openapi(
        json!({ "/loop": { "$ref": "#/paths/~1loop", "summary": "Loop" } }),
        json!({}),
    ));

    assert!(document.is_valid(), "{:?}", document.errors());
    let root = document.root().expect("Failed to build root node");
    let item = lookup(&root, &["paths", "/loop"]);
    let object = item.as_object().expect("path item should be an object");
    assert_eq!(object.get("summary").and_then(Node::as_str), Some("Loop"));

    let reference = object.get("$ref").expect("reference should stay as a placeholder");
    assert!(reference.is_recursive());
    assert_eq!(lookup(reference, &["summary"]).as_str(), Some("Loop"));
}
