#![deny(missing_docs)]

//! # Sample Command
//!
//! Renders a built-in pet store description.

use indexmap::IndexMap;
use oaswriter_core::models::{
    Components, Contact, Document, ExternalDocs, Info, License, MediaType, OAuthFlow, OAuthFlows,
    Operation, OperationType, Parameter, ParameterLocation, PathItem, Paths, RequestBody, Response,
    Responses, Schema, SecurityRequirement, SecurityScheme, SecuritySchemeType, Server, Tag,
};
use oaswriter_core::{write_element, SpecVersion};

use crate::error::CliResult;
use crate::output::OutputArgs;

/// Arguments for the sample command.
#[derive(clap::Args, Debug, Clone)]
pub struct SampleArgs {
    /// Target OpenAPI version (`2.0` or `3.0`).
    #[clap(long, env = "OASWRITER_SPEC_VERSION", default_value = "3.0")]
    pub spec_version: SpecVersion,

    /// Output options.
    #[clap(flatten)]
    pub output: OutputArgs,
}

/// Executes the sample command.
pub fn execute(args: &SampleArgs) -> CliResult<()> {
    tracing::debug!(version = %args.spec_version, "rendering sample document");
    let document = pet_store();
    args.output
        .emit(|w| write_element(&document, w, args.spec_version))
}

fn json(schema: Schema) -> IndexMap<String, MediaType> {
    let mut content = IndexMap::new();
    content.insert("application/json".to_string(), MediaType::with_schema(schema));
    content
}

fn error_response(description: &str) -> Response {
    Response {
        content: json(Schema::reference_to("Error")),
        ..Response::described(description)
    }
}

fn paths() -> Paths {
    let list = Operation {
        tags: vec![Tag::reference_to("pets")],
        summary: Some("List all pets".into()),
        operation_id: Some("listPets".into()),
        parameters: vec![Parameter {
            description: Some("How many items to return at one time (max 100)".into()),
            ..Parameter::new(
                "limit",
                ParameterLocation::Query,
                Schema {
                    format: Some("int32".into()),
                    maximum: Some(100i32.into()),
                    ..Schema::of_type("integer")
                },
            )
        }],
        responses: Responses::default()
            .with(
                "200",
                Response {
                    content: json(Schema::reference_to("Pets")),
                    ..Response::described("A paged array of pets")
                },
            )
            .with("default", error_response("unexpected error")),
        ..Operation::default()
    };

    let create = Operation {
        tags: vec![Tag::reference_to("pets")],
        summary: Some("Create a pet".into()),
        operation_id: Some("createPet".into()),
        request_body: Some(RequestBody {
            content: json(Schema::reference_to("Pet")),
            required: true,
            ..RequestBody::default()
        }),
        responses: Responses::default()
            .with("201", Response::described("Null response"))
            .with("default", error_response("unexpected error")),
        security: vec![SecurityRequirement::default()
            .with_reference("petstore_auth", vec!["write:pets".into()])],
        ..Operation::default()
    };

    let show = Operation {
        tags: vec![Tag::reference_to("pets")],
        summary: Some("Info for a specific pet".into()),
        operation_id: Some("showPetById".into()),
        parameters: vec![Parameter {
            description: Some("The id of the pet to retrieve".into()),
            required: true,
            ..Parameter::new("petId", ParameterLocation::Path, Schema::of_type("string"))
        }],
        responses: Responses::default()
            .with(
                "200",
                Response {
                    content: json(Schema::reference_to("Pet")),
                    ..Response::described("Expected response to a valid request")
                },
            )
            .with("default", error_response("unexpected error")),
        ..Operation::default()
    };

    Paths::default()
        .with(
            "/pets",
            PathItem::default()
                .with(OperationType::Get, list)
                .with(OperationType::Post, create),
        )
        .with(
            "/pets/{petId}",
            PathItem::default().with(OperationType::Get, show),
        )
}

fn components() -> Components {
    let mut pet = IndexMap::new();
    pet.insert(
        "id".to_string(),
        Schema {
            format: Some("int64".into()),
            ..Schema::of_type("integer")
        },
    );
    pet.insert("name".to_string(), Schema::of_type("string"));
    pet.insert("tag".to_string(), Schema::of_type("string"));

    let mut error = IndexMap::new();
    error.insert(
        "code".to_string(),
        Schema {
            format: Some("int32".into()),
            ..Schema::of_type("integer")
        },
    );
    error.insert("message".to_string(), Schema::of_type("string"));

    let mut components = Components::default();
    components.schemas.insert(
        "Pet".into(),
        Schema {
            required: vec!["id".into(), "name".into()],
            properties: pet,
            ..Schema::of_type("object")
        },
    );
    components.schemas.insert(
        "Pets".into(),
        Schema {
            items: Some(Box::new(Schema::reference_to("Pet"))),
            max_items: Some(100),
            ..Schema::of_type("array")
        },
    );
    components.schemas.insert(
        "Error".into(),
        Schema {
            required: vec!["code".into(), "message".into()],
            properties: error,
            ..Schema::of_type("object")
        },
    );

    let mut scopes = IndexMap::new();
    scopes.insert("write:pets".to_string(), "modify pets in your account".to_string());
    scopes.insert("read:pets".to_string(), "read your pets".to_string());
    components.security_schemes.insert(
        "petstore_auth".into(),
        SecurityScheme {
            scheme_type: SecuritySchemeType::OAuth2,
            flows: Some(OAuthFlows {
                implicit: Some(OAuthFlow {
                    authorization_url: Some("https://petstore.example.com/oauth/authorize".into()),
                    scopes,
                    ..OAuthFlow::default()
                }),
                ..OAuthFlows::default()
            }),
            ..SecurityScheme::default()
        },
    );
    components.security_schemes.insert(
        "api_key".into(),
        SecurityScheme {
            scheme_type: SecuritySchemeType::ApiKey,
            name: Some("api_key".into()),
            location: Some(ParameterLocation::Header),
            ..SecurityScheme::default()
        },
    );
    components
}

/// The built-in pet store document.
pub fn pet_store() -> Document {
    Document {
        info: Info {
            title: "Swagger Petstore".into(),
            description: Some("A sample API that uses a petstore as an example".into()),
            contact: Some(Contact {
                name: Some("API Support".into()),
                email: Some("support@petstore.example.com".into()),
                ..Contact::default()
            }),
            license: Some(License {
                name: "MIT".into(),
                ..License::default()
            }),
            version: "1.0.0".into(),
            ..Info::default()
        },
        servers: vec![
            Server::new("https://petstore.example.com/v1"),
            Server::new("http://petstore.example.com/v1"),
        ],
        paths: paths(),
        components: Some(components()),
        security_requirements: vec![SecurityRequirement::default().with_reference("api_key", vec![])],
        tags: vec![Tag {
            name: "pets".into(),
            description: Some("Everything about your pets".into()),
            ..Tag::default()
        }],
        external_docs: Some(ExternalDocs {
            url: "https://petstore.example.com/docs".into(),
            ..ExternalDocs::default()
        }),
        ..Document::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oaswriter_core::{serialize_as_terse_json, serialize_to_string, OpenApiFormat};

    #[test]
    fn test_sample_renders_in_both_versions() {
        let doc = pet_store();
        let v3 = serialize_as_terse_json(&doc, SpecVersion::V3_0).unwrap();
        let v2 = serialize_as_terse_json(&doc, SpecVersion::V2_0).unwrap();
        assert!(v3.starts_with(r#"{"openapi":"3.0.1""#));
        assert!(v3.contains(r##""$ref":"#/components/schemas/Pet""##));
        assert!(v2.starts_with(r#"{"swagger":"2.0""#));
        assert!(v2.contains(r#""schemes":["https","http"]"#));
        assert!(v2.contains(r#""flow":"implicit""#));
        assert!(v2.contains(r#""in":"body","name":"body","required":true"#));
    }

    #[test]
    fn test_sample_yaml_is_balanced() {
        let yaml = serialize_to_string(&pet_store(), SpecVersion::V3_0, OpenApiFormat::Yaml).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["info"]["title"].as_str(), Some("Swagger Petstore"));
        assert_eq!(value["paths"]["/pets"]["get"]["operationId"].as_str(), Some("listPets"));
    }
}
