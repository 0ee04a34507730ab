//! Notification entity and its creation rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DomainError, DomainResult, Entity, FieldErrors, NotificationId, UserId};

pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_USER: &str = "user";

const REQUIRED: &str = "This field is required.";
const INVALID_USER: &str = "Invalid user reference.";

/// A message addressed to a single user.
///
/// # Invariants
/// - `message` contains at least one non-whitespace character.
/// - The owning user is fixed at creation; there is no mutator for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    message: String,
    user: UserId,
    created_at: DateTime<Utc>,
}

impl Notification {
    /// Validate a draft and build a new notification from it.
    ///
    /// All field problems are reported together.
    pub fn create(draft: &NotificationDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        let (message, user) = draft.validate()?;
        Ok(Self {
            id: NotificationId::new(),
            message,
            user,
            created_at: now,
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The owning user reference.
    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.user == user
    }
}

impl Entity for Notification {
    type Id = NotificationId;

    fn id(&self) -> &NotificationId {
        &self.id
    }
}

/// Unvalidated input for a new notification, as decoded from a request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NotificationDraft {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

impl NotificationDraft {
    pub fn validate(&self) -> DomainResult<(String, UserId)> {
        let mut errors = FieldErrors::new();

        let message = match self.message.as_deref() {
            Some(m) if !m.trim().is_empty() => Some(m.to_string()),
            _ => {
                errors.add(FIELD_MESSAGE, REQUIRED);
                None
            }
        };

        let user = match self.user.as_deref() {
            Some(u) if !u.trim().is_empty() => match UserId::parse(u) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add(FIELD_USER, INVALID_USER);
                    None
                }
            },
            _ => {
                errors.add(FIELD_USER, REQUIRED);
                None
            }
        };

        match (message, user) {
            (Some(message), Some(user)) => Ok((message, user)),
            _ => Err(DomainError::Validation(errors)),
        }
    }
}
