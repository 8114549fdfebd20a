use std::marker::PhantomData;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::field::{FieldSpec, FieldType, Presence};
use crate::content::application::domain::Resource;

static SLUG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern must compile")
});

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Every violation found in one payload, in field-table order followed by
/// unknown keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", summarize(.violations))]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    #[cfg(test)]
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} {}", v.field, v.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

//
// ──────────────────────────────────────────────────────────
// Validated payloads
// ──────────────────────────────────────────────────────────
//

/// A create payload that passed the entity's field table. Every declared
/// field is present, with defaults filled in.
#[derive(Debug, Clone)]
pub struct Draft<E> {
    fields: Map<String, Value>,
    resource: PhantomData<fn() -> E>,
}

impl<E: Resource> Draft<E> {
    pub fn parse(input: Value) -> Result<Self, ValidationErrors> {
        let object = into_object(input)?;
        let mut violations = Vec::new();
        let mut fields = Map::new();

        for field in E::FIELDS {
            match object.get(field.name) {
                Some(value) => match check_value(field.ty, value) {
                    Ok(normalized) => {
                        fields.insert(field.name.to_string(), normalized);
                    }
                    Err(reason) => violations.push(FieldViolation::new(field.name, reason)),
                },
                None => match field.presence {
                    Presence::Required => {
                        violations.push(FieldViolation::new(field.name, "is required"))
                    }
                    Presence::Defaulted(default) => {
                        fields.insert(field.name.to_string(), default.to_json());
                    }
                },
            }
        }

        violations.extend(unknown_keys(E::FIELDS, &object));

        if violations.is_empty() {
            Ok(Self {
                fields,
                resource: PhantomData,
            })
        } else {
            Err(ValidationErrors { violations })
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

/// A sparse update payload. Only fields present in the input are carried;
/// everything else keeps its stored value.
#[derive(Debug, Clone)]
pub struct Patch<E> {
    fields: Map<String, Value>,
    resource: PhantomData<fn() -> E>,
}

impl<E: Resource> Patch<E> {
    pub fn parse(input: Value) -> Result<Self, ValidationErrors> {
        let object = into_object(input)?;
        let mut violations = Vec::new();
        let mut fields = Map::new();

        for field in E::FIELDS {
            if let Some(value) = object.get(field.name) {
                match check_value(field.ty, value) {
                    Ok(normalized) => {
                        fields.insert(field.name.to_string(), normalized);
                    }
                    Err(reason) => violations.push(FieldViolation::new(field.name, reason)),
                }
            }
        }

        violations.extend(unknown_keys(E::FIELDS, &object));

        if violations.is_empty() {
            Ok(Self {
                fields,
                resource: PhantomData,
            })
        } else {
            Err(ValidationErrors { violations })
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

//
// ──────────────────────────────────────────────────────────
// Field checks
// ──────────────────────────────────────────────────────────
//

fn into_object(input: Value) -> Result<Map<String, Value>, ValidationErrors> {
    match input {
        Value::Object(object) => Ok(object),
        _ => Err(ValidationErrors {
            violations: vec![FieldViolation::new("body", "must be a JSON object")],
        }),
    }
}

fn unknown_keys(specs: &[FieldSpec], object: &Map<String, Value>) -> Vec<FieldViolation> {
    object
        .keys()
        .filter(|key| !specs.iter().any(|known| known.name == key.as_str()))
        .map(|key| FieldViolation::new(key, "is not a known field"))
        .collect()
}

/// Checks one value against its semantic type and returns its stored form.
fn check_value(ty: FieldType, value: &Value) -> Result<Value, String> {
    if value.is_null() {
        return if ty.is_nullable() {
            Ok(Value::Null)
        } else {
            Err("must not be null".to_string())
        };
    }

    match ty {
        FieldType::Text => {
            if text(value)?.trim().is_empty() {
                return Err("must not be blank".to_string());
            }
            Ok(value.clone())
        }
        FieldType::OptionalText => text(value).map(|_| value.clone()),
        FieldType::Email => {
            if EmailAddress::is_valid(text(value)?) {
                Ok(value.clone())
            } else {
                Err("must be a valid email address".to_string())
            }
        }
        FieldType::Slug => {
            if SLUG_PATTERN.is_match(text(value)?) {
                Ok(value.clone())
            } else {
                Err("must contain only lower-case letters, digits and single hyphens".to_string())
            }
        }
        FieldType::Boolean => match value {
            Value::Bool(_) => Ok(value.clone()),
            _ => Err("must be a boolean".to_string()),
        },
        FieldType::Integer | FieldType::OptionalInteger => value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Value::from)
            .ok_or_else(|| "must be a 32-bit integer".to_string()),
        FieldType::TextList => {
            let items = value
                .as_array()
                .ok_or_else(|| "must be an array of text".to_string())?;
            if let Some(index) = items.iter().position(|item| !item.is_string()) {
                return Err(format!("item {index} must be text"));
            }
            Ok(value.clone())
        }
        FieldType::Timestamp => DateTime::parse_from_rfc3339(text(value)?)
            .map(|parsed| Value::String(parsed.with_timezone(&Utc).to_rfc3339()))
            .map_err(|_| "must be an RFC 3339 date-time".to_string()),
        FieldType::Choice(allowed) => {
            let choice = text(value)?;
            if allowed.contains(&choice) {
                Ok(value.clone())
            } else {
                Err(format!("must be one of: {}", allowed.join(", ")))
            }
        }
        FieldType::Encoded(document) => document.canonicalize(value).map(Value::String),
    }
}

fn text(value: &Value) -> Result<&str, String> {
    value.as_str().ok_or_else(|| "must be text".to_string())
}
