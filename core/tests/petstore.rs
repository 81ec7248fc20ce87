//! End-to-end rendering of a pet store document in both versions and formats.

use indexmap::IndexMap;
use oaswriter_core::models::{
    Components, Document, Info, MediaType, Operation, OperationType, Parameter, ParameterLocation,
    PathItem, Paths, RequestBody, Response, Responses, Schema, SecurityRequirement,
    SecurityScheme, Server, Tag,
};
use oaswriter_core::{serialize, serialize_as_terse_json, serialize_to_string, OpenApiFormat, SpecVersion};
use pretty_assertions::assert_eq;
use std::fs;

fn json_content(schema: Schema) -> IndexMap<String, MediaType> {
    let mut content = IndexMap::new();
    content.insert("application/json".to_string(), MediaType::with_schema(schema));
    content
}

fn info() -> Info {
    Info {
        title: "Swagger Petstore".into(),
        version: "1.0.0".into(),
        ..Info::default()
    }
}

fn pet_store() -> Document {
    let list = Operation {
        tags: vec![Tag::reference_to("pets")],
        operation_id: Some("listPets".into()),
        parameters: vec![Parameter::new(
            "limit",
            ParameterLocation::Query,
            Schema {
                format: Some("int32".into()),
                ..Schema::of_type("integer")
            },
        )],
        responses: Responses::default().with(
            "200",
            Response {
                content: json_content(Schema::reference_to("Pets")),
                ..Response::described("A paged array of pets")
            },
        ),
        ..Operation::default()
    };
    let create = Operation {
        operation_id: Some("createPet".into()),
        request_body: Some(RequestBody {
            content: json_content(Schema::reference_to("Pet")),
            required: true,
            ..RequestBody::default()
        }),
        responses: Responses::default().with("201", Response::described("Null response")),
        ..Operation::default()
    };

    let mut pet_properties = IndexMap::new();
    pet_properties.insert(
        "id".to_string(),
        Schema {
            format: Some("int64".into()),
            ..Schema::of_type("integer")
        },
    );
    pet_properties.insert("name".to_string(), Schema::of_type("string"));

    let mut components = Components::default();
    components.schemas.insert(
        "Pet".into(),
        Schema {
            required: vec!["id".into(), "name".into()],
            properties: pet_properties,
            ..Schema::of_type("object")
        },
    );
    components.schemas.insert(
        "Pets".into(),
        Schema {
            items: Some(Box::new(Schema::reference_to("Pet"))),
            ..Schema::of_type("array")
        },
    );
    components.security_schemes.insert(
        "api_key".into(),
        SecurityScheme {
            name: Some("api_key".into()),
            location: Some(ParameterLocation::Header),
            ..SecurityScheme::default()
        },
    );

    Document {
        info: info(),
        servers: vec![Server::new("https://petstore.example.com/v1")],
        paths: Paths::default().with(
            "/pets",
            PathItem::default()
                .with(OperationType::Get, list)
                .with(OperationType::Post, create),
        ),
        components: Some(components),
        security_requirements: vec![SecurityRequirement::default().with_reference("api_key", vec![])],
        tags: vec![Tag {
            name: "pets".into(),
            ..Tag::default()
        }],
        ..Document::default()
    }
}

#[test]
fn test_pet_store_v3() {
    let expected = concat!(
        r#"{"openapi":"3.0.1","info":{"title":"Swagger Petstore","version":"1.0.0"},"#,
        r#""servers":[{"url":"https://petstore.example.com/v1"}],"#,
        r#""paths":{"/pets":{"#,
        r#""get":{"tags":["pets"],"operationId":"listPets","#,
        r#""parameters":[{"name":"limit","in":"query","schema":{"type":"integer","format":"int32"}}],"#,
        r##""responses":{"200":{"description":"A paged array of pets","content":{"application/json":{"schema":{"$ref":"#/components/schemas/Pets"}}}}}},"##,
        r##""post":{"operationId":"createPet","requestBody":{"content":{"application/json":{"schema":{"$ref":"#/components/schemas/Pet"}}},"required":true},"##,
        r#""responses":{"201":{"description":"Null response"}}}}},"#,
        r#""components":{"schemas":{"#,
        r#""Pet":{"required":["id","name"],"type":"object","properties":{"id":{"type":"integer","format":"int64"},"name":{"type":"string"}}},"#,
        r##""Pets":{"type":"array","items":{"$ref":"#/components/schemas/Pet"}}},"##,
        r#""securitySchemes":{"api_key":{"type":"apiKey","name":"api_key","in":"header"}}},"#,
        r#""security":[{"api_key":[]}],"tags":[{"name":"pets"}]}"#,
    );
    assert_eq!(
        serialize_as_terse_json(&pet_store(), SpecVersion::V3_0).unwrap(),
        expected
    );
}

#[test]
fn test_pet_store_v2() {
    let expected = concat!(
        r#"{"swagger":"2.0","info":{"title":"Swagger Petstore","version":"1.0.0"},"#,
        r#""host":"petstore.example.com","basePath":"/v1","schemes":["https"],"#,
        r#""paths":{"/pets":{"#,
        r#""get":{"tags":["pets"],"operationId":"listPets","produces":["application/json"],"#,
        r#""parameters":[{"in":"query","name":"limit","type":"integer","format":"int32"}],"#,
        r##""responses":{"200":{"description":"A paged array of pets","schema":{"$ref":"#/definitions/Pets"}}}},"##,
        r#""post":{"operationId":"createPet","consumes":["application/json"],"#,
        r##""parameters":[{"in":"body","name":"body","required":true,"schema":{"$ref":"#/definitions/Pet"}}],"##,
        r#""responses":{"201":{"description":"Null response"}}}}},"#,
        r#""definitions":{"#,
        r#""Pet":{"required":["id","name"],"type":"object","properties":{"id":{"format":"int64","type":"integer"},"name":{"type":"string"}}},"#,
        r##""Pets":{"type":"array","items":{"$ref":"#/definitions/Pet"}}},"##,
        r#""securityDefinitions":{"api_key":{"type":"apiKey","name":"api_key","in":"header"}},"#,
        r#""security":[{"api_key":[]}],"tags":[{"name":"pets"}]}"#,
    );
    assert_eq!(
        serialize_as_terse_json(&pet_store(), SpecVersion::V2_0).unwrap(),
        expected
    );
}

#[test]
fn test_minimal_yaml_document() {
    let doc = Document {
        info: info(),
        servers: vec![Server::new("https://petstore.example.com/v1")],
        ..Document::default()
    };
    let expected = "\
openapi: 3.0.1
info:
  title: Swagger Petstore
  version: 1.0.0
servers:
  - url: https://petstore.example.com/v1
paths: { }";
    assert_eq!(
        serialize_to_string(&doc, SpecVersion::V3_0, OpenApiFormat::Yaml).unwrap(),
        expected
    );

    let expected_v2 = "\
swagger: '2.0'
info:
  title: Swagger Petstore
  version: 1.0.0
host: petstore.example.com
basePath: /v1
schemes:
  - https
paths: { }";
    assert_eq!(
        serialize_to_string(&doc, SpecVersion::V2_0, OpenApiFormat::Yaml).unwrap(),
        expected_v2
    );
}

#[test]
fn test_indented_json() {
    let schema = Schema {
        items: Some(Box::new(Schema::reference_to("Pet"))),
        ..Schema::of_type("array")
    };
    let expected = r##"{
  "type": "array",
  "items": {
    "$ref": "#/components/schemas/Pet"
  }
}"##;
    assert_eq!(
        serialize_to_string(&schema, SpecVersion::V3_0, OpenApiFormat::Json).unwrap(),
        expected
    );
}

#[test]
fn test_file_sink_matches_string_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openapi.json");
    let file = fs::File::create(&path).unwrap();
    serialize(&pet_store(), file, SpecVersion::V3_0, OpenApiFormat::Json).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    let expected = serialize_to_string(&pet_store(), SpecVersion::V3_0, OpenApiFormat::Json).unwrap();
    assert_eq!(written, expected);
}

#[test]
fn test_resolution_against_pet_store() {
    let doc = pet_store();
    let pets = doc.components.as_ref().unwrap().schemas["Pets"]
        .items
        .as_ref()
        .unwrap();
    let resolution = doc
        .resolve_reference(pets.reference.as_ref().unwrap())
        .unwrap();
    assert!(!resolution.already_resolved);
    assert_eq!(
        resolution.node.reference_type(),
        oaswriter_core::models::ReferenceType::Schema
    );
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_async_sink_matches_sync_output() {
    use oaswriter_core::{serialize_async, JsonWriterSettings};

    let doc = pet_store();
    let mut sink: Vec<u8> = Vec::new();
    serialize_async(
        &doc,
        &mut sink,
        SpecVersion::V2_0,
        OpenApiFormat::Yaml,
        &JsonWriterSettings::default(),
    )
    .await
    .unwrap();
    let expected = serialize_to_string(&doc, SpecVersion::V2_0, OpenApiFormat::Yaml).unwrap();
    assert_eq!(String::from_utf8(sink).unwrap(), expected);
}
