// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The requested record was not found.
    RecordNotFound {
        /// The entity kind (e.g. "user", "designation_area").
        entity: &'static str,
        /// The requested identifier.
        id: i64,
    },
    /// A unique column already holds the given value.
    DuplicateKey {
        /// The conflicting column (e.g. "emp_id").
        field: &'static str,
        /// The conflicting value.
        value: String,
    },
    /// An update or remove was issued for a record without an identity.
    MissingIdentity(&'static str),
    /// Query execution failed.
    QueryFailed(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RecordNotFound { entity, id } => {
                write!(f, "{entity} with id {id} not found")
            }
            Self::DuplicateKey { field, value } => {
                write!(f, "Duplicate key: {field} '{value}' already exists")
            }
            Self::MissingIdentity(entity) => {
                write!(f, "Cannot address a {entity} record without an id")
            }
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}
