// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use staffdesk_domain::{
    DesignationAreaEntry, DesignationAreaRecord, EmploymentStatusRecord, SkillAssignment,
    SkillEntry, StatusEntry, validate_status_record,
};

/// Projects a payload designation-area entry into its storage shape.
///
/// Flattens the nested `designation`/`area` references to foreign keys,
/// injects the owning `user_id`, and preserves the optional record `id`
/// verbatim (its presence marks the record as previously persisted).
///
/// # Errors
///
/// Returns `CoreError::MissingReference` when the required `designation`
/// reference is absent. The nullable `area` reference stays `None`.
pub fn normalize_designation_area(
    entry: &DesignationAreaEntry,
    user_id: i64,
) -> Result<DesignationAreaRecord, CoreError> {
    let designation = entry
        .designation
        .as_ref()
        .ok_or(CoreError::MissingReference {
            entity: "designation_area",
            field: "designation",
        })?;

    Ok(DesignationAreaRecord {
        id: entry.id,
        user_id,
        designation_id: designation.id,
        area_id: entry.area.as_ref().map(|area| area.id),
        transition_date: entry.transition_date,
    })
}

/// Projects a payload employment-status entry into its storage shape.
///
/// # Errors
///
/// Returns `CoreError::MissingReference` when the required
/// `engagement_status` reference is absent, or a domain violation when the
/// end date precedes the transition date.
pub fn normalize_status(
    entry: &StatusEntry,
    user_id: i64,
) -> Result<EmploymentStatusRecord, CoreError> {
    let status = entry
        .engagement_status
        .as_ref()
        .ok_or(CoreError::MissingReference {
            entity: "employment_status",
            field: "engagement_status",
        })?;

    let record: EmploymentStatusRecord = EmploymentStatusRecord {
        id: entry.id,
        user_id,
        engagement_status_id: status.id,
        transition_date: entry.transition_date,
        end_date: entry.end_date,
    };
    validate_status_record(&record)?;

    Ok(record)
}

/// Projects a payload skill entry into a skill assignment for `employee_id`.
#[must_use]
pub const fn normalize_skill(entry: &SkillEntry, employee_id: i64) -> SkillAssignment {
    SkillAssignment {
        employee_id,
        skill_id: entry.id,
    }
}
