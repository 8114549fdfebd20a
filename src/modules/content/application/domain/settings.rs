use email_address::EmailAddress;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

//
// ──────────────────────────────────────────────────────────
// Settings sub-documents
// ──────────────────────────────────────────────────────────
// Stored on `Settings` as JSON-encoded text; decoded only at the edges.
// Every key is required: an update replaces the whole sub-document.
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewsletterSettings {
    pub enabled: bool,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContactFormSettings {
    pub enabled: bool,
    /// May be empty only while the form is disabled.
    pub notification_email: String,
    pub auto_reply_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeSettings {
    pub primary_color: String,
    pub font_family: String,
    pub color_theme: String,
}

/// Checks that go beyond the shape serde enforces.
trait SubSchema: Serialize + DeserializeOwned {
    fn check(&self) -> Result<(), String> {
        Ok(())
    }
}

impl SubSchema for NewsletterSettings {}

impl SubSchema for ThemeSettings {}

impl SubSchema for ContactFormSettings {
    fn check(&self) -> Result<(), String> {
        if !self.enabled && self.notification_email.is_empty() {
            return Ok(());
        }
        if EmailAddress::is_valid(&self.notification_email) {
            Ok(())
        } else {
            Err("notificationEmail must be a valid email address".to_string())
        }
    }
}

/// Identifies which sub-schema an encoded settings field follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubDocument {
    Newsletter,
    ContactForm,
    Theme,
}

impl SubDocument {
    /// Validates a complete object (or its JSON-encoded text) against the
    /// sub-schema and returns the canonical encoded text.
    pub fn canonicalize(self, value: &Value) -> Result<String, String> {
        let object = match value {
            Value::String(text) => serde_json::from_str::<Value>(text)
                .map_err(|e| format!("must contain valid JSON: {e}"))?,
            Value::Object(_) => value.clone(),
            _ => return Err("must be an object or JSON-encoded text".to_string()),
        };

        match self {
            SubDocument::Newsletter => reencode::<NewsletterSettings>(object),
            SubDocument::ContactForm => reencode::<ContactFormSettings>(object),
            SubDocument::Theme => reencode::<ThemeSettings>(object),
        }
    }
}

fn reencode<T: SubSchema>(object: Value) -> Result<String, String> {
    let typed: T = serde_json::from_value(object).map_err(|e| e.to_string())?;
    typed.check()?;
    encode(&typed).map_err(|e| e.to_string())
}

pub fn encode<T: Serialize>(document: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(document)
}

#[cfg(test)]
pub fn decode<T: DeserializeOwned>(text: Option<&str>) -> Result<Option<T>, serde_json::Error> {
    text.map(serde_json::from_str::<T>).transpose()
}
