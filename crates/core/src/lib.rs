//! `notify-core`: domain building blocks for the notification service.
//!
//! This crate contains **pure domain** types (no HTTP, no storage).

pub mod entity;
pub mod error;
pub mod id;
pub mod notification;
pub mod user;
pub mod validation;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, InvalidId};
pub use id::{NotificationId, UserId};
pub use notification::{Notification, NotificationDraft};
pub use user::User;
pub use validation::FieldErrors;
