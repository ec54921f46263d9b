use crate::models::UserId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MarketError>;

/// Failures surfaced to the caller of a marketplace operation.
///
/// None of these are retried automatically.
#[derive(Debug, Error, PartialEq)]
pub enum MarketError {
    /// Malformed or missing input, identified by field.
    #[error("invalid field '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// The entity is not in the state the operation requires.
    #[error("cannot {action} {entity} {id} while it is {state}")]
    InvalidStateTransition {
        entity: &'static str,
        id: String,
        state: String,
        action: &'static str,
    },

    /// The actor is not the owner or receiver the operation requires.
    #[error("user {actor} is not allowed to {action}")]
    Unauthorized { actor: UserId, action: &'static str },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Create conflict in the backing store.
    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: &'static str, id: String },
}

impl MarketError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        MarketError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        MarketError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn unauthorized(actor: &UserId, action: &'static str) -> Self {
        MarketError::Unauthorized {
            actor: actor.clone(),
            action,
        }
    }

    pub fn invalid_state(
        entity: &'static str,
        id: impl ToString,
        state: impl std::fmt::Debug,
        action: &'static str,
    ) -> Self {
        MarketError::InvalidStateTransition {
            entity,
            id: id.to_string(),
            state: format!("{:?}", state),
            action,
        }
    }

    /// Field named by a validation failure
    pub fn field(&self) -> Option<&str> {
        match self {
            MarketError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, MarketError::InvalidStateTransition { .. })
    }
}
