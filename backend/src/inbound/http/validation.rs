//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;
use uuid::Uuid;

use crate::domain::identity::{Identity, UserId};
use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidIdentity,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidIdentity => "invalid_identity",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn validation_error(
    field: FieldName,
    message: String,
    code: ErrorCode,
    value: Option<&str>,
) -> Error {
    let mut details = json!({
        "field": field.as_str(),
        "code": code.as_str(),
    });
    if let (Some(object), Some(value)) = (details.as_object_mut(), value) {
        object.insert("value".to_owned(), json!(value));
    }
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    validation_error(
        field,
        format!("missing required field: {name}"),
        ErrorCode::MissingField,
        None,
    )
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    validation_error(
        field,
        format!("{name} must be a valid UUID"),
        ErrorCode::InvalidUuid,
        Some(value),
    )
}

/// Parse a path or body field that must be a plain UUID.
pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse an acting identity: a builder UUID or the reserved curator token.
pub(crate) fn parse_acting_identity(value: &str, field: FieldName) -> Result<Identity, Error> {
    Identity::parse(value).map_err(|_| {
        let name = field.as_str();
        validation_error(
            field,
            format!("{name} must be a valid UUID or the reserved identity"),
            ErrorCode::InvalidIdentity,
            Some(value),
        )
    })
}

/// Parse an optional viewer id.
///
/// The curator can view anything but likes and owns nothing, so a curator
/// viewer collapses to no viewer at all.
pub(crate) fn parse_viewer_id(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<UserId>, Error> {
    match value {
        None => Ok(None),
        Some(raw) => match parse_acting_identity(raw, field)? {
            Identity::Builder(id) => Ok(Some(id)),
            Identity::Curator => Ok(None),
        },
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::identity::CURATOR_TOKEN;

    #[rstest]
    fn parse_uuid_accepts_well_formed_input() {
        let parsed = parse_uuid("3fa85f64-5717-4562-b3fc-2c963f66afa6", FieldName::new("id"))
            .expect("uuid parses");
        assert_eq!(parsed.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    fn parse_uuid_reports_the_field_and_value() {
        let error = parse_uuid("not-a-uuid", FieldName::new("id")).expect_err("must fail");
        let details = error.details().expect("details present");
        assert_eq!(details["field"], "id");
        assert_eq!(details["value"], "not-a-uuid");
        assert_eq!(details["code"], "invalid_uuid");
    }

    #[rstest]
    fn acting_identity_accepts_the_reserved_token() {
        let identity = parse_acting_identity(CURATOR_TOKEN, FieldName::new("userId"))
            .expect("token parses");
        assert!(identity.is_curator());
    }

    #[rstest]
    fn acting_identity_rejects_garbage() {
        let error =
            parse_acting_identity("friend", FieldName::new("userId")).expect_err("must fail");
        let details = error.details().expect("details present");
        assert_eq!(details["code"], "invalid_identity");
    }

    #[rstest]
    #[case::absent(None, true)]
    #[case::curator(Some(CURATOR_TOKEN), true)]
    #[case::builder(Some("3fa85f64-5717-4562-b3fc-2c963f66afa6"), false)]
    fn viewer_parsing_collapses_non_builders(#[case] raw: Option<&str>, #[case] empty: bool) {
        let viewer =
            parse_viewer_id(raw, FieldName::new("viewerId")).expect("viewer parses");
        assert_eq!(viewer.is_none(), empty);
    }

    #[rstest]
    fn missing_field_names_the_field() {
        let error = missing_field_error(FieldName::new("audio"));
        let details = error.details().expect("details present");
        assert_eq!(details.get("field"), Some(&Value::String("audio".into())));
        assert_eq!(details["code"], "missing_field");
    }
}
