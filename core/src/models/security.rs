//! # Security
//!
//! Security schemes, OAuth flows and security requirements.
//!
//! 2.0 only knows `basic`, `apiKey` and a single OAuth2 flow per scheme, so
//! other HTTP schemes and OpenID Connect render as an empty object there.

use crate::error::AppResult;
use crate::models::interfaces::{
    impl_extensible, write_v2, write_v3, Extensions, OpenApiReferenceable, OpenApiSerializable,
};
use crate::models::parameter::ParameterLocation;
use crate::models::reference::{Reference, ReferenceType};
use crate::writer::{OpenApiWriter, OpenApiWriterExt};
use derive_more::Display;
use indexmap::IndexMap;

/// Kind of a security scheme.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SecuritySchemeType {
    /// `apiKey`
    #[default]
    #[display("apiKey")]
    ApiKey,
    /// `http`
    #[display("http")]
    Http,
    /// `oauth2`
    #[display("oauth2")]
    OAuth2,
    /// `openIdConnect`
    #[display("openIdConnect")]
    OpenIdConnect,
}

/// The `securityScheme` object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SecurityScheme {
    /// Scheme kind.
    pub scheme_type: SecuritySchemeType,
    /// Description, CommonMark allowed.
    pub description: Option<String>,
    /// Header, query or cookie name of an API key.
    pub name: Option<String>,
    /// Where an API key is sent.
    pub location: Option<ParameterLocation>,
    /// HTTP authorization scheme, e.g. `basic` or `bearer`.
    pub scheme: Option<String>,
    /// Hint about the bearer token format.
    pub bearer_format: Option<String>,
    /// OAuth2 flows.
    pub flows: Option<OAuthFlows>,
    /// OpenID Connect discovery URL.
    pub open_id_connect_url: Option<String>,
    /// Vendor extensions.
    pub extensions: Extensions,
    /// True when this is a placeholder that was never resolved.
    pub unresolved_reference: bool,
    /// Set when this scheme stands for a component security scheme.
    pub reference: Option<Reference>,
}

impl SecurityScheme {
    /// A placeholder for the component security scheme `id`.
    pub fn reference_to(id: impl Into<String>) -> Self {
        Self {
            unresolved_reference: true,
            reference: Some(Reference::local(ReferenceType::SecurityScheme, id)),
            ..Self::default()
        }
    }

    fn is_basic(&self) -> bool {
        self.scheme
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("basic"))
    }

    fn write_v2_oauth2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        let Some(flows) = &self.flows else {
            return Ok(());
        };
        let candidates = [
            ("implicit", flows.implicit.as_ref()),
            ("password", flows.password.as_ref()),
            ("application", flows.client_credentials.as_ref()),
            ("accessCode", flows.authorization_code.as_ref()),
        ];
        let Some((name, flow)) = candidates
            .into_iter()
            .find_map(|(name, flow)| flow.map(|f| (name, f)))
        else {
            return Ok(());
        };
        writer.write_property("flow", Some(name))?;
        writer.write_property("authorizationUrl", flow.authorization_url.as_deref())?;
        writer.write_property("tokenUrl", flow.token_url.as_deref())?;
        writer.write_required_map("scopes", &flow.scopes, |w, s| w.write_str(s))
    }
}

impl OpenApiSerializable for SecurityScheme {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        write_v3(self, writer)
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        write_v2(self, writer)
    }
}

impl OpenApiReferenceable for SecurityScheme {
    fn unresolved_reference(&self) -> bool {
        self.unresolved_reference
    }

    fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    fn serialize_as_v3_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("type", Some(self.scheme_type.to_string()))?;
        writer.write_property("description", self.description.as_deref())?;
        match self.scheme_type {
            SecuritySchemeType::ApiKey => {
                writer.write_property("name", self.name.as_deref())?;
                writer.write_property("in", self.location.map(|l| l.to_string()))?;
            }
            SecuritySchemeType::Http => {
                writer.write_property("scheme", self.scheme.as_deref())?;
                writer.write_property("bearerFormat", self.bearer_format.as_deref())?;
            }
            SecuritySchemeType::OAuth2 => {
                writer.write_optional_object("flows", self.flows.as_ref(), |w, f| {
                    f.serialize_as_v3(w)
                })?;
            }
            SecuritySchemeType::OpenIdConnect => {
                writer.write_property("openIdConnectUrl", self.open_id_connect_url.as_deref())?;
            }
        }
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2_without_reference(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        let representable = match self.scheme_type {
            SecuritySchemeType::Http => self.is_basic(),
            SecuritySchemeType::OpenIdConnect => false,
            SecuritySchemeType::ApiKey | SecuritySchemeType::OAuth2 => true,
        };
        writer.write_start_object()?;
        if !representable {
            return writer.write_end_object();
        }
        match self.scheme_type {
            SecuritySchemeType::Http => writer.write_property("type", Some("basic"))?,
            SecuritySchemeType::OAuth2 => {
                writer.write_property("type", Some("oauth2"))?;
                self.write_v2_oauth2(writer)?;
            }
            SecuritySchemeType::ApiKey => {
                writer.write_property("type", Some("apiKey"))?;
                writer.write_property("name", self.name.as_deref())?;
                writer.write_property("in", self.location.map(|l| l.to_string()))?;
            }
            SecuritySchemeType::OpenIdConnect => {}
        }
        writer.write_property("description", self.description.as_deref())?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }
}

/// The `oauthFlows` object. 3.0 only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OAuthFlows {
    /// Implicit flow.
    pub implicit: Option<OAuthFlow>,
    /// Resource owner password flow.
    pub password: Option<OAuthFlow>,
    /// Client credentials flow (`application` in 2.0).
    pub client_credentials: Option<OAuthFlow>,
    /// Authorization code flow (`accessCode` in 2.0).
    pub authorization_code: Option<OAuthFlow>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl OpenApiSerializable for OAuthFlows {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_optional_object("implicit", self.implicit.as_ref(), |w, f| f.serialize_as_v3(w))?;
        writer.write_optional_object("password", self.password.as_ref(), |w, f| f.serialize_as_v3(w))?;
        writer.write_optional_object("clientCredentials", self.client_credentials.as_ref(), |w, f| {
            f.serialize_as_v3(w)
        })?;
        writer.write_optional_object("authorizationCode", self.authorization_code.as_ref(), |w, f| {
            f.serialize_as_v3(w)
        })?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2(&self, _writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        Ok(())
    }
}

/// The `oauthFlow` object. 3.0 only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OAuthFlow {
    /// Authorization endpoint.
    pub authorization_url: Option<String>,
    /// Token endpoint.
    pub token_url: Option<String>,
    /// Refresh endpoint.
    pub refresh_url: Option<String>,
    /// Scope name to description.
    pub scopes: IndexMap<String, String>,
    /// Vendor extensions.
    pub extensions: Extensions,
}

impl OpenApiSerializable for OAuthFlow {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        writer.write_start_object()?;
        writer.write_property("authorizationUrl", self.authorization_url.as_deref())?;
        writer.write_property("tokenUrl", self.token_url.as_deref())?;
        writer.write_property("refreshUrl", self.refresh_url.as_deref())?;
        writer.write_required_map("scopes", &self.scopes, |w, s| w.write_str(s))?;
        writer.write_extensions(&self.extensions)?;
        writer.write_end_object()
    }

    fn serialize_as_v2(&self, _writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        Ok(())
    }
}

/// The `securityRequirement` object: scheme reference to required scopes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SecurityRequirement {
    /// Schemes with the scopes they need, in insertion order.
    pub schemes: Vec<(SecurityScheme, Vec<String>)>,
}

impl SecurityRequirement {
    /// Adds a requirement on the component scheme `name`.
    pub fn with_reference(mut self, name: impl Into<String>, scopes: Vec<String>) -> Self {
        self.schemes.push((SecurityScheme::reference_to(name), scopes));
        self
    }

    fn write(&self, writer: &mut dyn OpenApiWriter, v3: bool) -> AppResult<()> {
        writer.write_start_object()?;
        for (scheme, scopes) in &self.schemes {
            // Only component schemes can be named here.
            let Some(reference) = &scheme.reference else {
                continue;
            };
            if v3 {
                reference.serialize_as_v3(writer)?;
            } else {
                reference.serialize_as_v2(writer)?;
            }
            writer.write_start_array()?;
            for scope in scopes {
                writer.write_str(scope)?;
            }
            writer.write_end_array()?;
        }
        writer.write_end_object()
    }
}

impl OpenApiSerializable for SecurityRequirement {
    fn serialize_as_v3(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write(writer, true)
    }

    fn serialize_as_v2(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        self.write(writer, false)
    }
}

impl_extensible!(SecurityScheme, OAuthFlows, OAuthFlow);
