//! # Runtime Expressions
//!
//! Expressions evaluated against an HTTP exchange, used as callback keys and
//! link parameters.
//!
//! Syntax: `$url` | `$method` | `$statusCode` | `$request.{source}` | `$response.{source}`,
//! or free text with `{$...}` fragments embedded in it.

use crate::any::Any;
use crate::error::{AppError, AppResult};
use crate::writer::{write_any, OpenApiWriter};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Where a `$request.` / `$response.` expression reads from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceExpression {
    /// `header.{token}`
    Header(String),
    /// `query.{name}`
    Query(String),
    /// `path.{name}`
    Path(String),
    /// `body` with an optional JSON pointer (`body#/id`).
    Body(Option<String>),
}

impl SourceExpression {
    /// Parses the part after `$request.` / `$response.`.
    pub fn build(source: &str) -> AppResult<Self> {
        if let Some(rest) = source.strip_prefix("body") {
            return match rest {
                "" => Ok(SourceExpression::Body(None)),
                _ => match rest.strip_prefix('#') {
                    Some(pointer) => Ok(SourceExpression::Body(Some(pointer.to_string()))),
                    None => Err(invalid_source(source)),
                },
            };
        }
        let (kind, name) = source.split_once('.').ok_or_else(|| invalid_source(source))?;
        if name.is_empty() || name.contains('.') {
            return Err(invalid_source(source));
        }
        match kind {
            "header" => Ok(SourceExpression::Header(name.to_string())),
            "query" => Ok(SourceExpression::Query(name.to_string())),
            "path" => Ok(SourceExpression::Path(name.to_string())),
            _ => Err(invalid_source(source)),
        }
    }
}

impl fmt::Display for SourceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceExpression::Header(token) => write!(f, "header.{}", token),
            SourceExpression::Query(name) => write!(f, "query.{}", name),
            SourceExpression::Path(name) => write!(f, "path.{}", name),
            SourceExpression::Body(None) => write!(f, "body"),
            SourceExpression::Body(Some(pointer)) => write!(f, "body#{}", pointer),
        }
    }
}

fn invalid_source(source: &str) -> AppError {
    AppError::Argument(format!(
        "The source expression '{}' has invalid format.",
        source
    ))
}

/// A validated runtime expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuntimeExpression {
    /// `$url`
    Url,
    /// `$method`
    Method,
    /// `$statusCode`
    StatusCode,
    /// `$request.{source}`
    Request(SourceExpression),
    /// `$response.{source}`
    Response(SourceExpression),
    /// Free text with embedded `{$...}` expressions, e.g. `{$request.body#/url}/events`.
    Composite {
        /// The original text.
        template: String,
        /// The embedded expressions, in order of appearance.
        parts: Vec<RuntimeExpression>,
    },
}

impl RuntimeExpression {
    /// Parses and validates an expression.
    pub fn build(expression: &str) -> AppResult<Self> {
        if expression.trim().is_empty() {
            return Err(AppError::Argument(
                "The runtime expression must not be empty.".into(),
            ));
        }
        if !expression.starts_with('$') {
            return Self::composite(expression);
        }
        match expression {
            "$url" => return Ok(RuntimeExpression::Url),
            "$method" => return Ok(RuntimeExpression::Method),
            "$statusCode" => return Ok(RuntimeExpression::StatusCode),
            _ => {}
        }
        if let Some(source) = expression.strip_prefix("$request.") {
            return Ok(RuntimeExpression::Request(SourceExpression::build(source)?));
        }
        if let Some(source) = expression.strip_prefix("$response.") {
            return Ok(RuntimeExpression::Response(SourceExpression::build(source)?));
        }
        Err(AppError::Argument(format!(
            "The runtime expression '{}' has invalid format.",
            expression
        )))
    }

    fn composite(template: &str) -> AppResult<Self> {
        static EMBEDDED: OnceLock<Regex> = OnceLock::new();
        let re = EMBEDDED.get_or_init(|| Regex::new(r"\{(\$[^}]*)\}").expect("Invalid regex"));
        let parts = re
            .captures_iter(template)
            .map(|caps| RuntimeExpression::build(&caps[1]))
            .collect::<AppResult<Vec<_>>>()?;
        Ok(RuntimeExpression::Composite {
            template: template.to_string(),
            parts,
        })
    }
}

impl fmt::Display for RuntimeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeExpression::Url => write!(f, "$url"),
            RuntimeExpression::Method => write!(f, "$method"),
            RuntimeExpression::StatusCode => write!(f, "$statusCode"),
            RuntimeExpression::Request(source) => write!(f, "$request.{}", source),
            RuntimeExpression::Response(source) => write!(f, "$response.{}", source),
            RuntimeExpression::Composite { template, .. } => write!(f, "{}", template),
        }
    }
}

impl std::str::FromStr for RuntimeExpression {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuntimeExpression::build(s)
    }
}

/// A link parameter or request body: either a runtime expression or a constant.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeExpressionAnyWrapper {
    /// Evaluated at runtime.
    Expression(RuntimeExpression),
    /// A constant value.
    Any(Any),
}

impl RuntimeExpressionAnyWrapper {
    /// Writes the constant, or the expression text.
    pub fn write_value(&self, writer: &mut dyn OpenApiWriter) -> AppResult<()> {
        match self {
            RuntimeExpressionAnyWrapper::Expression(expression) => {
                writer.write_str(&expression.to_string())
            }
            RuntimeExpressionAnyWrapper::Any(value) => write_any(writer, Some(value)),
        }
    }
}

impl From<RuntimeExpression> for RuntimeExpressionAnyWrapper {
    fn from(value: RuntimeExpression) -> Self {
        RuntimeExpressionAnyWrapper::Expression(value)
    }
}

impl From<Any> for RuntimeExpressionAnyWrapper {
    fn from(value: Any) -> Self {
        RuntimeExpressionAnyWrapper::Any(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_expressions() {
        assert_eq!(RuntimeExpression::build("$url").unwrap(), RuntimeExpression::Url);
        assert_eq!(
            RuntimeExpression::build("$request.path.id").unwrap(),
            RuntimeExpression::Request(SourceExpression::Path("id".into()))
        );
        assert_eq!(
            RuntimeExpression::build("$response.body#/id").unwrap(),
            RuntimeExpression::Response(SourceExpression::Body(Some("/id".into())))
        );
    }

    #[test]
    fn test_display_restores_text() {
        for text in [
            "$method",
            "$statusCode",
            "$request.header.X-Rate",
            "$request.body",
            "$response.body#/user/uuid",
            "{$request.body#/callbackUrl}/events",
        ] {
            assert_eq!(RuntimeExpression::build(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_composite_parts_are_validated() {
        match RuntimeExpression::build("http://x/{$request.query.q}?m={$method}").unwrap() {
            RuntimeExpression::Composite { parts, .. } => {
                assert_eq!(parts.len(), 2);
                assert_eq!(parts[1], RuntimeExpression::Method);
            }
            other => panic!("expected composite, got {:?}", other),
        }
        assert!(RuntimeExpression::build("http://x/{$bogus}").is_err());
    }

    #[test]
    fn test_invalid_expressions() {
        for text in ["", "  ", "$nope", "$request.cookie.a", "$request.header.a.b", "$request.bodyx"] {
            assert!(
                matches!(RuntimeExpression::build(text), Err(AppError::Argument(_))),
                "{} should be rejected",
                text
            );
        }
    }
}
