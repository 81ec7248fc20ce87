//! # Versions and Formats
//!
//! Target specification versions and output formats selectable per serialization call.

use derive_more::Display;

/// The OpenAPI specification version a document is rendered for.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecVersion {
    /// Swagger / OpenAPI 2.0.
    #[display("2.0")]
    V2_0,
    /// OpenAPI 3.0.x.
    #[display("3.0")]
    V3_0,
}

impl SpecVersion {
    /// The literal written into the `swagger` / `openapi` field of a document.
    pub fn document_version(self) -> &'static str {
        match self {
            SpecVersion::V2_0 => "2.0",
            SpecVersion::V3_0 => "3.0.1",
        }
    }

    /// Latest version known to this crate. Free-form values are always rendered with it.
    pub fn latest() -> Self {
        SpecVersion::V3_0
    }
}

impl std::str::FromStr for SpecVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2" | "2.0" => Ok(SpecVersion::V2_0),
            "3" | "3.0" | "3.0.0" | "3.0.1" => Ok(SpecVersion::V3_0),
            other => Err(format!("unknown OpenAPI version `{}`", other)),
        }
    }
}

/// Text format emitted by a writer.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenApiFormat {
    /// JSON text.
    #[display("json")]
    Json,
    /// Block-style YAML text.
    #[display("yaml")]
    Yaml,
}

impl std::str::FromStr for OpenApiFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OpenApiFormat::Json),
            "yaml" | "yml" => Ok(OpenApiFormat::Yaml),
            other => Err(format!("unknown output format `{}`", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_version_literals() {
        assert_eq!(SpecVersion::V2_0.document_version(), "2.0");
        assert_eq!(SpecVersion::V3_0.document_version(), "3.0.1");
    }

    #[test]
    fn test_parse_versions_and_formats() {
        assert_eq!("2.0".parse::<SpecVersion>().unwrap(), SpecVersion::V2_0);
        assert_eq!("3.0.1".parse::<SpecVersion>().unwrap(), SpecVersion::V3_0);
        assert!("4.0".parse::<SpecVersion>().is_err());
        assert_eq!("YML".parse::<OpenApiFormat>().unwrap(), OpenApiFormat::Yaml);
        assert_eq!(OpenApiFormat::Json.to_string(), "json");
    }
}
