use crate::content::application::domain::settings::SubDocument;

/// Semantic type of a writable entity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Non-null, non-blank string.
    Text,
    /// String or null.
    OptionalText,
    /// Text holding a syntactically valid e-mail address.
    Email,
    /// Lower-case ASCII letters and digits separated by single hyphens.
    Slug,
    Boolean,
    /// Non-null 32-bit integer.
    Integer,
    /// 32-bit integer or null.
    OptionalInteger,
    /// Array of strings; never null.
    TextList,
    /// RFC 3339 date-time or null.
    Timestamp,
    /// Text restricted to a fixed set of values.
    Choice(&'static [&'static str]),
    /// Structured settings stored as JSON-encoded text, or null.
    Encoded(SubDocument),
}

impl FieldType {
    pub fn is_nullable(self) -> bool {
        matches!(
            self,
            FieldType::OptionalText
                | FieldType::OptionalInteger
                | FieldType::Timestamp
                | FieldType::Encoded(_)
        )
    }
}

/// Value a field takes on create when the caller omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Text(&'static str),
    EmptyList,
}

impl DefaultValue {
    pub fn to_json(self) -> serde_json::Value {
        match self {
            DefaultValue::Null => serde_json::Value::Null,
            DefaultValue::Bool(b) => serde_json::Value::Bool(b),
            DefaultValue::Text(s) => serde_json::Value::String(s.to_string()),
            DefaultValue::EmptyList => serde_json::Value::Array(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Must be supplied on create.
    Required,
    /// May be omitted on create; takes the default.
    Defaulted(DefaultValue),
}

/// One row of an entity's field table. Every field is independently
/// updatable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub presence: Presence,
}

impl FieldSpec {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            presence: Presence::Required,
        }
    }

    /// Nullable field that is null when omitted.
    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            presence: Presence::Defaulted(DefaultValue::Null),
        }
    }

    pub const fn defaulted(name: &'static str, ty: FieldType, default: DefaultValue) -> Self {
        Self {
            name,
            ty,
            presence: Presence::Defaulted(default),
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }
}
