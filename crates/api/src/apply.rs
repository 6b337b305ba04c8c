// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Applies computed change sets through the persistence collaborators.
//!
//! Each domain is applied phase by phase (creates, then updates, then
//! removes); within a phase the per-record calls run concurrently. The first
//! failure aborts the remaining calls in that phase.

use futures::future::try_join_all;

use staffdesk::ChangeSet;
use staffdesk_domain::{DesignationAreaRecord, EmploymentStatusRecord, SkillAssignment};
use staffdesk_persistence::{
    DesignationAreaStore, EmploymentStatusStore, PersistenceError, SkillAssignmentStore,
};

/// Applies a skill change set.
///
/// Skill assignments are immutable `(employee_id, skill_id)` pairs, so the
/// update bucket is ignored: a pair already held needs no write.
///
/// # Errors
///
/// Propagates the first persistence failure.
pub async fn apply_skills(
    store: &dyn SkillAssignmentStore,
    changes: &ChangeSet<SkillAssignment>,
    actor: i64,
) -> Result<(), PersistenceError> {
    try_join_all(
        changes
            .to_create
            .iter()
            .map(|assignment| store.create(assignment, actor)),
    )
    .await?;
    try_join_all(
        changes
            .to_remove
            .iter()
            .map(|assignment| store.remove(assignment.employee_id, assignment.skill_id)),
    )
    .await?;
    Ok(())
}

/// Applies a designation-area history change set.
///
/// # Errors
///
/// Propagates the first persistence failure, or `MissingIdentity` when a
/// record slated for removal carries no storage id.
pub async fn apply_designation_areas(
    store: &dyn DesignationAreaStore,
    changes: &ChangeSet<DesignationAreaRecord>,
    actor: i64,
) -> Result<(), PersistenceError> {
    let mut remove_ids: Vec<i64> = Vec::with_capacity(changes.to_remove.len());
    for record in &changes.to_remove {
        let id: i64 = record
            .id
            .ok_or(PersistenceError::MissingIdentity("designation_area"))?;
        remove_ids.push(id);
    }

    try_join_all(
        changes
            .to_create
            .iter()
            .map(|record| store.create(record, actor)),
    )
    .await?;
    try_join_all(
        changes
            .to_update
            .iter()
            .map(|record| store.update(record, actor)),
    )
    .await?;
    try_join_all(remove_ids.into_iter().map(|id| store.remove(id))).await?;
    Ok(())
}

/// Applies an employment-status history change set.
///
/// # Errors
///
/// Propagates the first persistence failure, or `MissingIdentity` when a
/// record slated for removal carries no storage id.
pub async fn apply_statuses(
    store: &dyn EmploymentStatusStore,
    changes: &ChangeSet<EmploymentStatusRecord>,
    actor: i64,
) -> Result<(), PersistenceError> {
    let mut remove_ids: Vec<i64> = Vec::with_capacity(changes.to_remove.len());
    for record in &changes.to_remove {
        let id: i64 = record
            .id
            .ok_or(PersistenceError::MissingIdentity("employment_status"))?;
        remove_ids.push(id);
    }

    try_join_all(
        changes
            .to_create
            .iter()
            .map(|record| store.create(record, actor)),
    )
    .await?;
    try_join_all(
        changes
            .to_update
            .iter()
            .map(|record| store.update(record, actor)),
    )
    .await?;
    try_join_all(remove_ids.into_iter().map(|id| store.remove(id))).await?;
    Ok(())
}
