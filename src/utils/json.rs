use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::error::Error;
use crate::services::validation_service::FieldErrors;

/// `Json` extractor whose rejections are reported as field errors, so a
/// malformed body gets the same `{valid, errors}` reply as a failed validation.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "request body rejected");
        let (field, message) = rejection_field(&rejection.body_text());
        Error::Question(FieldErrors::single(field, message))
    }
}

/// Splits `"...target type: answers[0].content: missing field `text`"` into
/// the field path and the message. Anything else is reported on `body`.
fn rejection_field(text: &str) -> (String, String) {
    let detail = text
        .split_once("target type: ")
        .map(|(_, detail)| detail)
        .unwrap_or(text);
    match detail.split_once(": ") {
        Some((path, message)) if path != "." && !path.contains(' ') => {
            (path.to_string(), message.to_string())
        }
        Some((".", message)) => ("body".to_string(), message.to_string()),
        _ => ("body".to_string(), detail.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_errors_keep_their_path() {
        let (field, message) = rejection_field(
            "Failed to deserialize the JSON body into the target type: \
             question.answer_config: unknown variant `essay`",
        );
        assert_eq!(field, "question.answer_config");
        assert_eq!(message, "unknown variant `essay`");
    }

    #[test]
    fn other_rejections_land_on_body() {
        let (field, message) = rejection_field(
            "Expected request with `Content-Type: application/json`",
        );
        assert_eq!(field, "body");
        assert_eq!(message, "Expected request with `Content-Type: application/json`");

        let (field, _) = rejection_field(
            "Failed to deserialize the JSON body into the target type: .: invalid type: string",
        );
        assert_eq!(field, "body");
    }
}
