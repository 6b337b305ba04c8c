// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required user field is empty.
    EmptyField(&'static str),
    /// An employment-status record ends before it begins.
    InvalidEndDate {
        /// The date the status took effect.
        transition_date: Date,
        /// The offending end date.
        end_date: Date,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "Field '{field}' must not be empty"),
            Self::InvalidEndDate {
                transition_date,
                end_date,
            } => {
                write!(
                    f,
                    "End date {end_date} precedes transition date {transition_date}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
