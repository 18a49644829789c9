//! Payload validation: raw JSON bytes in, typed request or failure out.

use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// Why a payload was rejected.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Payload failed validation: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// Decode `bytes` as `T` and run its validation rules.
///
/// Shape errors (wrong types, missing fields, invalid JSON) and rule errors
/// (e.g. empty strings) are both reported as `PayloadError`.
pub fn parse_payload<T>(bytes: &[u8]) -> Result<T, PayloadError>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_slice(bytes)?;
    value.validate()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{CreatePostRequest, UpdatePostRequest};

    #[test]
    fn test_valid_create_payload() {
        let req: CreatePostRequest = parse_payload(br#"{"title":"A","content":"B"}"#).unwrap();
        assert_eq!(req.title, "A");
        assert_eq!(req.content, "B");
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let err = parse_payload::<CreatePostRequest>(br#"{"title":"A"}"#).unwrap_err();
        assert!(matches!(err, PayloadError::Malformed(_)));
    }

    #[test]
    fn test_non_string_field_is_malformed() {
        let err = parse_payload::<CreatePostRequest>(br#"{"title":1,"content":"B"}"#).unwrap_err();
        assert!(matches!(err, PayloadError::Malformed(_)));
    }

    #[test]
    fn test_empty_string_fails_rules() {
        let err = parse_payload::<CreatePostRequest>(br#"{"title":"","content":"B"}"#).unwrap_err();
        assert!(matches!(err, PayloadError::Invalid(_)));
    }

    #[test]
    fn test_empty_body_is_malformed() {
        assert!(parse_payload::<CreatePostRequest>(b"").is_err());
    }

    #[test]
    fn test_update_requires_numeric_id() {
        assert!(parse_payload::<UpdatePostRequest>(br#"{"title":"X","content":"Y"}"#).is_err());
        assert!(
            parse_payload::<UpdatePostRequest>(br#"{"id":"3","title":"X","content":"Y"}"#).is_err()
        );

        let req: UpdatePostRequest =
            parse_payload(br#"{"id":3,"title":"X","content":"Y"}"#).unwrap();
        assert_eq!(req.id, 3);
    }
}
