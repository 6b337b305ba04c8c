// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store traits, one collaborator interface per persisted entity.
//!
//! Every mutation takes the acting user's id so adapters can stamp the
//! `created_by`/`updated_by` audit columns. Failures surface as
//! [`PersistenceError`](crate::PersistenceError).

use async_trait::async_trait;
use time::Date;

use staffdesk_domain::{
    DesignationAreaRecord, EmploymentStatusRecord, SkillAssignment, UserPatch, UserRecord,
    WfhRecord,
};

use crate::error::PersistenceError;

/// Request-scoped filter for user list queries.
///
/// Constructed fresh per request; shared mutable filter state across
/// requests is not permitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive substring match on the full name.
    pub q: Option<String>,
    /// Exact match on the supervisor reference.
    pub supervisor_id: Option<i64>,
    /// Exact match on the supervisor role flag.
    pub is_supervisor: Option<bool>,
    /// Exact match on the username.
    pub username: Option<String>,
    /// Require the HR role flag.
    pub is_hr: bool,
    /// Require the People Operations role flag.
    pub is_people_ops: bool,
    /// Require the account-manager role flag.
    pub is_account_manager: bool,
}

/// Request-scoped filter for work-from-home queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WfhFilter {
    /// Exact match on the calendar day.
    pub date: Option<Date>,
    /// Inclusive range start.
    pub start_date: Option<Date>,
    /// Inclusive range end.
    pub end_date: Option<Date>,
    /// Exact match on the employee.
    pub user_id: Option<i64>,
}

/// Persistence collaborator for user rows.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetches a page of users matching the filter.
    async fn fetch(
        &self,
        filter: &UserFilter,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<UserRecord>, PersistenceError>;

    /// Counts users matching the filter.
    async fn count(&self, filter: &UserFilter) -> Result<u64, PersistenceError>;

    /// Fetches a user by id, or `None` when absent.
    async fn fetch_by_id(&self, id: i64) -> Result<Option<UserRecord>, PersistenceError>;

    /// Returns users whose `emp_id` or `username` collides with the given
    /// values. Used for duplicate pre-validation before creation.
    async fn find_conflicts(
        &self,
        emp_id: &str,
        username: &str,
    ) -> Result<Vec<UserRecord>, PersistenceError>;

    /// Inserts a user row and returns the assigned id.
    async fn create(&self, user: &UserRecord, actor: i64) -> Result<i64, PersistenceError>;

    /// Applies a scalar-field patch to a user row.
    async fn update(&self, id: i64, patch: &UserPatch, actor: i64)
    -> Result<(), PersistenceError>;
}

/// Persistence collaborator for skill assignments.
#[async_trait]
pub trait SkillAssignmentStore: Send + Sync {
    /// Fetches all assignments for an employee.
    async fn fetch_by_employee_id(
        &self,
        employee_id: i64,
    ) -> Result<Vec<SkillAssignment>, PersistenceError>;

    /// Inserts an assignment.
    async fn create(
        &self,
        assignment: &SkillAssignment,
        actor: i64,
    ) -> Result<(), PersistenceError>;

    /// Removes the assignment for `(employee_id, skill_id)`.
    async fn remove(&self, employee_id: i64, skill_id: i64) -> Result<(), PersistenceError>;
}

/// Persistence collaborator for designation-area history records.
#[async_trait]
pub trait DesignationAreaStore: Send + Sync {
    /// Fetches a user's history, sorted ascending by transition date.
    async fn fetch_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Vec<DesignationAreaRecord>, PersistenceError>;

    /// Inserts a record and returns the assigned id.
    async fn create(
        &self,
        record: &DesignationAreaRecord,
        actor: i64,
    ) -> Result<i64, PersistenceError>;

    /// Rewrites the record addressed by `record.id`.
    async fn update(
        &self,
        record: &DesignationAreaRecord,
        actor: i64,
    ) -> Result<(), PersistenceError>;

    /// Removes a record by id.
    async fn remove(&self, id: i64) -> Result<(), PersistenceError>;
}

/// Persistence collaborator for employment-status history records.
#[async_trait]
pub trait EmploymentStatusStore: Send + Sync {
    /// Fetches a user's history, sorted ascending by transition date.
    async fn fetch_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Vec<EmploymentStatusRecord>, PersistenceError>;

    /// Inserts a record and returns the assigned id.
    async fn create(
        &self,
        record: &EmploymentStatusRecord,
        actor: i64,
    ) -> Result<i64, PersistenceError>;

    /// Rewrites the record addressed by `record.id`.
    async fn update(
        &self,
        record: &EmploymentStatusRecord,
        actor: i64,
    ) -> Result<(), PersistenceError>;

    /// Removes a record by id.
    async fn remove(&self, id: i64) -> Result<(), PersistenceError>;
}

/// Persistence collaborator for work-from-home records.
#[async_trait]
pub trait WfhStore: Send + Sync {
    /// Fetches a page of records matching the filter, sorted by date.
    async fn fetch(
        &self,
        filter: &WfhFilter,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<WfhRecord>, PersistenceError>;

    /// Counts records matching the filter.
    async fn count(&self, filter: &WfhFilter) -> Result<u64, PersistenceError>;
}
