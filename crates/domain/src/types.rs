// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;

/// Represents an employee/user row.
///
/// `id` is the canonical identifier assigned by storage; `None` indicates
/// the user has not been persisted yet. `emp_id` and `username` are unique
/// per deployment but are not the canonical identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Canonical internal identifier (opaque, stable, immutable).
    /// Optional to support creation before persistence.
    pub id: Option<i64>,
    /// The employee number (unique).
    pub emp_id: String,
    /// The login/email username (unique).
    pub username: String,
    /// The user's first name.
    pub first_name: String,
    /// The user's last name.
    pub last_name: String,
    /// The user's contact email.
    pub email: String,
    /// The user's birthday.
    pub birthday: Option<Date>,
    /// URL of the user's avatar image, if uploaded.
    pub avatar_url: Option<String>,
    /// URL of the user's CV. Visibility is authorization-gated.
    pub cv_url: Option<String>,
    /// Reference to the supervising user, who is also the leave issuer.
    pub supervisor_id: Option<i64>,
    /// Whether this user holds the HR role.
    pub is_hr: bool,
    /// Whether this user holds the People Operations role.
    pub is_people_ops: bool,
    /// Whether this user is an account manager.
    pub is_account_manager: bool,
    /// Whether this user supervises other users.
    pub is_supervisor: bool,
}

impl UserRecord {
    /// Returns the user's display name, skipping empty parts.
    #[must_use]
    pub fn full_name(&self) -> String {
        let first: &str = self.first_name.trim();
        let last: &str = self.last_name.trim();
        [first, last]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<&str>>()
            .join(" ")
    }
}

/// A partial update to a user's scalar profile fields.
///
/// `None` leaves the stored value untouched. Which fields a caller may set
/// is decided by the authorization guard, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New birthday.
    pub birthday: Option<Date>,
    /// New avatar URL.
    pub avatar_url: Option<String>,
    /// New CV URL.
    pub cv_url: Option<String>,
    /// New supervisor reference.
    pub supervisor_id: Option<i64>,
    /// New HR role flag.
    pub is_hr: Option<bool>,
    /// New People Operations role flag.
    pub is_people_ops: Option<bool>,
    /// New account-manager role flag.
    pub is_account_manager: Option<bool>,
    /// New supervisor role flag.
    pub is_supervisor: Option<bool>,
}

impl UserPatch {
    /// Returns true when the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.birthday.is_none()
            && self.avatar_url.is_none()
            && self.cv_url.is_none()
            && self.supervisor_id.is_none()
            && self.is_hr.is_none()
            && self.is_people_ops.is_none()
            && self.is_account_manager.is_none()
            && self.is_supervisor.is_none()
    }

    /// Returns true when the patch touches any HR-only field.
    ///
    /// Role flags, the supervisor reference, and the CV URL may only be
    /// written through HR access.
    #[must_use]
    pub const fn touches_restricted_fields(&self) -> bool {
        self.supervisor_id.is_some()
            || self.cv_url.is_some()
            || self.is_hr.is_some()
            || self.is_people_ops.is_some()
            || self.is_account_manager.is_some()
            || self.is_supervisor.is_some()
    }
}

/// A skill held by an employee.
///
/// The pair `(employee_id, skill_id)` is the sole identity of an assignment;
/// there is no storage-assigned surrogate key. At most one assignment exists
/// per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillAssignment {
    /// The owning employee.
    pub employee_id: i64,
    /// The assigned skill.
    pub skill_id: i64,
}

/// A designation/area transition in an employee's history.
///
/// The record with the latest `transition_date` represents the employee's
/// present designation and area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignationAreaRecord {
    /// Storage-assigned identifier. `None` marks a record that has not
    /// been persisted yet.
    pub id: Option<i64>,
    /// The owning user.
    pub user_id: i64,
    /// The designation held from the transition date.
    pub designation_id: i64,
    /// The area, when the designation is area-scoped.
    pub area_id: Option<i64>,
    /// The date this designation took effect.
    pub transition_date: Date,
}

/// An engagement-status transition in an employee's history.
///
/// The record with the latest `transition_date` represents the employee's
/// present status. `end_date`, when present, must not precede
/// `transition_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentStatusRecord {
    /// Storage-assigned identifier. `None` marks a record that has not
    /// been persisted yet.
    pub id: Option<i64>,
    /// The owning user.
    pub user_id: i64,
    /// The engagement status held from the transition date.
    pub engagement_status_id: i64,
    /// The date this status took effect.
    pub transition_date: Date,
    /// The date this status ended, for statuses with a bounded term.
    pub end_date: Option<Date>,
}

/// A work-from-home day recorded for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WfhRecord {
    /// Storage-assigned identifier.
    pub id: i64,
    /// The employee working from home.
    pub user_id: i64,
    /// The calendar day.
    pub date: Date,
    /// Optional free-form reason.
    pub reason: Option<String>,
}

/// The authenticated caller of a request.
///
/// Request-scoped; carries only the identity and role flags needed by the
/// authorization guard. Token issuance and validation are external.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// The caller's user id.
    pub id: i64,
    /// Whether the caller holds the HR role.
    pub is_hr: bool,
    /// Whether the caller holds the People Operations role.
    pub is_people_ops: bool,
}

impl AuthContext {
    /// Creates an auth context with no elevated roles.
    #[must_use]
    pub const fn plain(id: i64) -> Self {
        Self {
            id,
            is_hr: false,
            is_people_ops: false,
        }
    }

    /// Creates an HR auth context.
    #[must_use]
    pub const fn hr(id: i64) -> Self {
        Self {
            id,
            is_hr: true,
            is_people_ops: false,
        }
    }
}
