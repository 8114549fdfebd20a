mod document;
mod field;
mod validator;

pub use document::{materialize, merge};
pub use field::{DefaultValue, FieldSpec, FieldType, Presence};
pub use validator::{Draft, FieldViolation, Patch, ValidationErrors};
