// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use staffdesk::CoreError;
use staffdesk_domain::DomainError;
use staffdesk_persistence::PersistenceError;

/// Authorization errors raised by the access guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The caller is not permitted to perform the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// A human-readable description of the missing permission.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized: '{action}': {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core/persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authorization failed - the caller does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// A human-readable description of the missing permission.
        reason: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A unique column would be violated.
    DuplicateKey {
        /// The field carrying the duplicate value.
        field: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized: '{action}': {reason}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::DuplicateKey { field, message } => {
                write!(f, "Duplicate value for '{field}': {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized { action, reason } => Self::Unauthorized { action, reason },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::EmptyField(field) => ApiError::InvalidInput {
            field: String::from(field),
            message: format!("'{field}' must not be empty"),
        },
        DomainError::InvalidEndDate {
            transition_date,
            end_date,
        } => ApiError::InvalidInput {
            field: String::from("end_date"),
            message: format!(
                "End date {end_date} precedes the transition date {transition_date}"
            ),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::MissingReference { entity, field } => ApiError::InvalidInput {
            field: String::from(field),
            message: format!("{entity} entry is missing its required '{field}' reference"),
        },
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::RecordNotFound { entity, id } => ApiError::ResourceNotFound {
            resource_type: String::from(entity),
            message: format!("No {entity} with id {id}"),
        },
        PersistenceError::DuplicateKey { field, value } => ApiError::DuplicateKey {
            field: String::from(field),
            message: format!("A record with {field} '{value}' already exists"),
        },
        PersistenceError::MissingIdentity(entity) => ApiError::InvalidInput {
            field: String::from("id"),
            message: format!("{entity} update requires a record id"),
        },
        PersistenceError::QueryFailed(message) | PersistenceError::Other(message) => {
            ApiError::Internal { message }
        }
    }
}
