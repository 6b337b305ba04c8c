// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{EmploymentStatusRecord, UserRecord};

/// Validates field constraints on a user record.
///
/// `emp_id`, `username`, and `email` must be non-empty; names may be blank
/// for placeholder accounts.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` naming the first empty required field.
pub fn validate_user_fields(user: &UserRecord) -> Result<(), DomainError> {
    if user.emp_id.trim().is_empty() {
        return Err(DomainError::EmptyField("emp_id"));
    }
    if user.username.trim().is_empty() {
        return Err(DomainError::EmptyField("username"));
    }
    if user.email.trim().is_empty() {
        return Err(DomainError::EmptyField("email"));
    }
    Ok(())
}

/// Validates an employment-status record.
///
/// # Invariant
///
/// `end_date`, when present, must not precede `transition_date`.
///
/// # Errors
///
/// Returns `DomainError::InvalidEndDate` when the invariant is violated.
pub fn validate_status_record(record: &EmploymentStatusRecord) -> Result<(), DomainError> {
    if let Some(end_date) = record.end_date {
        if end_date < record.transition_date {
            return Err(DomainError::InvalidEndDate {
                transition_date: record.transition_date,
                end_date,
            });
        }
    }
    Ok(())
}
