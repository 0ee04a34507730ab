use axum::{
    async_trait,
    body::Bytes,
    extract::{Form, FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::{Value, json};

use notify_core::notification::{FIELD_MESSAGE, FIELD_USER};
use notify_core::{DomainError, Entity, FieldErrors, Notification, NotificationDraft, User};

use crate::app::errors::ApiError;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /notifications`.
///
/// Accepts an HTML form (`application/x-www-form-urlencoded`) or JSON. An
/// empty body decodes to an empty draft so that field validation reports
/// what is missing.
#[derive(Debug)]
pub struct CreateNotificationRequest(pub NotificationDraft);

#[async_trait]
impl<S> FromRequest<S> for CreateNotificationRequest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(draft) = Form::<NotificationDraft>::from_request(req, state)
                .await
                .map_err(|e| ApiError::undecodable(e.body_text()))?;
            return Ok(Self(draft));
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::undecodable(e.body_text()))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(NotificationDraft::default()));
        }

        draft_from_json(&body).map(Self)
    }
}

const NOT_A_STRING: &str = "Expected a string.";

/// Decode a JSON object into a draft, reporting mistyped fields per field.
///
/// `null` counts as absent. When a field has the wrong type, the remaining
/// fields are still validated so the caller sees every problem at once.
fn draft_from_json(body: &[u8]) -> Result<NotificationDraft, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::undecodable(format!("invalid JSON body: {e}")))?;
    let Value::Object(mut object) = value else {
        return Err(ApiError::undecodable("invalid JSON body: expected an object"));
    };

    let mut errors = FieldErrors::new();
    let mut text = |field: &str| match object.remove(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(_) => {
            errors.add(field, NOT_A_STRING);
            None
        }
    };
    let draft = NotificationDraft {
        message: text(FIELD_MESSAGE),
        user: text(FIELD_USER),
    };

    if errors.is_empty() {
        return Ok(draft);
    }
    if let Err(DomainError::Validation(others)) = draft.validate() {
        errors.absorb(others);
    }
    Err(DomainError::Validation(errors).into())
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Wire shape of a notification: `{id, message}`.
pub fn notification_to_json(n: &Notification) -> Value {
    json!({
        "id": n.id().to_string(),
        "message": n.message(),
    })
}

/// Wire shape of a user: `{id, email}`.
pub fn user_to_json(u: &User) -> Value {
    json!({
        "id": u.id().as_str(),
        "email": u.email(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use notify_core::UserId;

    #[test]
    fn notification_marshals_only_id_and_message() {
        let draft = NotificationDraft {
            message: Some("Checkout this cool new feature".to_string()),
            user: Some("u1".to_string()),
        };
        let n = Notification::create(&draft, Utc::now()).unwrap();

        let json = notification_to_json(&n);
        let obj = json.as_object().unwrap();
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["id", "message"]);
        assert_eq!(obj["id"], n.id().to_string());
        assert_eq!(obj["message"], "Checkout this cool new feature");
    }

    fn fields_of(err: ApiError) -> FieldErrors {
        match err {
            ApiError::Validation { fields, .. } => fields,
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn json_draft_accepts_strings_and_treats_null_as_absent() {
        let draft = draft_from_json(br#"{"message": "hi", "user": null, "extra": 1}"#).unwrap();
        assert_eq!(draft.message.as_deref(), Some("hi"));
        assert_eq!(draft.user, None);
    }

    #[test]
    fn mistyped_field_is_reported_under_its_name() {
        let fields = fields_of(draft_from_json(br#"{"message": 5, "user": "app"}"#).unwrap_err());
        assert_eq!(fields.get("message"), Some(&[NOT_A_STRING.to_string()][..]));
        assert!(fields.get("user").is_none());
    }

    #[test]
    fn mistyped_and_missing_fields_are_reported_together() {
        let fields = fields_of(draft_from_json(br#"{"user": ["app"]}"#).unwrap_err());
        assert_eq!(fields.get("user"), Some(&[NOT_A_STRING.to_string()][..]));
        assert_eq!(
            fields.get("message"),
            Some(&["This field is required.".to_string()][..])
        );
    }

    #[test]
    fn non_object_json_is_undecodable() {
        for body in [&b"[1, 2]"[..], &b"\"hi\""[..], &b"{not json"[..]] {
            assert!(fields_of(draft_from_json(body).unwrap_err()).is_empty());
        }
    }

    #[test]
    fn user_marshals_only_id_and_email() {
        let u = User::new(UserId::parse("abc").unwrap(), "app@example.com");
        assert_eq!(user_to_json(&u), json!({"id": "abc", "email": "app@example.com"}));
    }
}
