// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorization guard for user-aggregate operations.
//!
//! Access is decided per request from the caller's [`AuthContext`]: HR may
//! act on anyone and touch every field; everyone else may only edit their
//! own scalar profile fields. There is no ambient or global caller state.

use staffdesk_domain::AuthContext;

use crate::error::AuthError;

/// The level of access granted for a user-aggregate write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// HR access: every field and every child collection may be written.
    Hr,
    /// Self-service access: only unrestricted scalar fields on the caller's
    /// own record may be written.
    SelfService,
}

/// Checks whether the caller may update the user aggregate `target_id`.
///
/// HR callers receive [`AccessLevel::Hr`]. A caller targeting their own
/// record receives [`AccessLevel::SelfService`]. Anyone else is refused.
///
/// # Errors
///
/// Returns [`AuthError::Unauthorized`] when the caller is neither HR nor
/// the target user.
pub fn authorize_update(auth: &AuthContext, target_id: i64) -> Result<AccessLevel, AuthError> {
    if auth.is_hr {
        return Ok(AccessLevel::Hr);
    }
    if auth.id == target_id {
        return Ok(AccessLevel::SelfService);
    }
    Err(AuthError::Unauthorized {
        action: String::from("update_user"),
        reason: String::from("only HR or the user themselves may update a user"),
    })
}

/// Checks whether the caller may create users.
///
/// # Errors
///
/// Returns [`AuthError::Unauthorized`] for non-HR callers.
pub fn authorize_create(auth: &AuthContext) -> Result<(), AuthError> {
    if auth.is_hr {
        return Ok(());
    }
    Err(AuthError::Unauthorized {
        action: String::from("create_user"),
        reason: String::from("only HR may create users"),
    })
}

/// Checks whether the caller may reassign a user's leave issuer.
///
/// # Errors
///
/// Returns [`AuthError::Unauthorized`] for non-HR callers.
pub fn authorize_leave_issuer_change(auth: &AuthContext) -> Result<(), AuthError> {
    if auth.is_hr {
        return Ok(());
    }
    Err(AuthError::Unauthorized {
        action: String::from("update_leave_issuer"),
        reason: String::from("only HR may reassign a leave issuer"),
    })
}

/// Whether the caller may see the target user's employment history.
#[must_use]
pub const fn can_view_history(auth: &AuthContext, target_id: i64) -> bool {
    auth.is_hr || auth.id == target_id
}

/// Whether the caller may see the target user's CV link.
#[must_use]
pub const fn can_view_cv(auth: &AuthContext, target_id: i64) -> bool {
    auth.is_hr || auth.is_people_ops || auth.id == target_id
}
