// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use staffdesk_domain::DomainError;

/// Errors that can occur while normalizing payload entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A required nested reference is absent from a payload entry.
    ///
    /// A missing reference would otherwise flow into storage as an undefined
    /// foreign key, so it is rejected here instead.
    MissingReference {
        /// The entity being normalized (e.g. "designation_area").
        entity: &'static str,
        /// The absent reference field (e.g. "designation").
        field: &'static str,
    },
    /// A domain rule was violated.
    DomainViolation(DomainError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingReference { entity, field } => {
                write!(f, "Entry for {entity} is missing the '{field}' reference")
            }
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
