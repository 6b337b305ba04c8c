// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response shapes for the user and work-from-home endpoints.

use serde::{Deserialize, Serialize};
use time::Date;

use staffdesk_domain::{
    DesignationAreaEntry, DesignationAreaRecord, EmploymentStatusRecord, SkillEntry, StatusEntry,
    UserPatch, UserRecord,
};

/// Payload for creating a user aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Organization-assigned employee identifier. Unique.
    pub emp_id: String,
    /// Login name. Unique.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Date of birth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<Date>,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// CV document URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_url: Option<String>,
    /// The supervising user's id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor_id: Option<i64>,
    /// HR role flag.
    #[serde(default)]
    pub is_hr: bool,
    /// People Operations role flag.
    #[serde(default)]
    pub is_people_ops: bool,
    /// Account-manager role flag.
    #[serde(default)]
    pub is_account_manager: bool,
    /// Supervisor role flag.
    #[serde(default)]
    pub is_supervisor: bool,
    /// Initial skill set.
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
    /// Initial designation-area history.
    #[serde(default)]
    pub designation_area_history: Vec<DesignationAreaEntry>,
    /// Initial employment-status history.
    #[serde(default)]
    pub emp_status_history: Vec<StatusEntry>,
}

impl CreateUserRequest {
    /// Projects the scalar fields into a storage record without an id.
    #[must_use]
    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            id: None,
            emp_id: self.emp_id.clone(),
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            birthday: self.birthday,
            avatar_url: self.avatar_url.clone(),
            cv_url: self.cv_url.clone(),
            supervisor_id: self.supervisor_id,
            is_hr: self.is_hr,
            is_people_ops: self.is_people_ops,
            is_account_manager: self.is_account_manager,
            is_supervisor: self.is_supervisor,
        }
    }
}

/// Payload for updating a user aggregate.
///
/// Scalar fields are patch-style: absent means untouched. The child
/// collections are full desired states; an absent collection leaves the
/// stored collection alone, while an empty one clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// Scalar profile changes.
    #[serde(flatten)]
    pub patch: UserPatch,
    /// Desired skill set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<SkillEntry>>,
    /// Desired designation-area history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation_area_history: Option<Vec<DesignationAreaEntry>>,
    /// Desired employment-status history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emp_status_history: Option<Vec<StatusEntry>>,
}

impl UpdateUserRequest {
    /// Returns true when any child collection is present in the payload.
    #[must_use]
    pub const fn touches_collections(&self) -> bool {
        self.skills.is_some()
            || self.designation_area_history.is_some()
            || self.emp_status_history.is_some()
    }
}

/// Query parameters accepted by the user list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersQuery {
    /// Case-insensitive substring match on the full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Restrict to direct reports of this supervisor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor_id: Option<i64>,
    /// Restrict by the supervisor role flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_supervisor: Option<bool>,
    /// Exact username match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Restrict to HR members.
    #[serde(default)]
    pub is_hr: bool,
    /// Restrict to People Operations members.
    #[serde(default)]
    pub is_people_ops: bool,
    /// Restrict to account managers.
    #[serde(default)]
    pub is_account_manager: bool,
    /// 1-based page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    /// Records per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Query parameters accepted by the work-from-home endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WfhQuery {
    /// Exact date match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    /// Inclusive lower bound on the date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    /// Inclusive upper bound on the date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
    /// Restrict to one user's records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// 1-based page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    /// Records per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// A user's scalar fields as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Storage identity.
    pub id: i64,
    /// Organization-assigned employee identifier.
    pub emp_id: String,
    /// Login name.
    pub username: String,
    /// Display name assembled from the name parts.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Avatar image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// The supervising user's id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervisor_id: Option<i64>,
}

impl UserSummary {
    /// Builds a summary from a storage record.
    ///
    /// Records without a storage id cannot be summarized; the service only
    /// passes persisted records through here.
    #[must_use]
    pub fn from_record(record: &UserRecord) -> Option<Self> {
        let id: i64 = record.id?;
        Some(Self {
            id,
            emp_id: record.emp_id.clone(),
            username: record.username.clone(),
            full_name: record.full_name(),
            email: record.email.clone(),
            avatar_url: record.avatar_url.clone(),
            supervisor_id: record.supervisor_id,
        })
    }
}

/// The full user aggregate as returned by the detail endpoint.
///
/// History collections and the CV link are present only when the caller is
/// allowed to see them. The current designation area and status are the
/// latest entries of their histories by transition date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAggregateResponse {
    /// The user's scalar fields.
    pub user: UserRecord,
    /// Skill ids held by the user.
    pub skills: Vec<i64>,
    /// Designation-area history, ascending by transition date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation_area_history: Option<Vec<DesignationAreaRecord>>,
    /// Employment-status history, ascending by transition date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emp_status_history: Option<Vec<EmploymentStatusRecord>>,
    /// The designation area in effect now.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_designation_area: Option<DesignationAreaRecord>,
    /// The employment status in effect now.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_status: Option<EmploymentStatusRecord>,
}
