// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory adapter implementing every store trait.
//!
//! Used by unit tests, handler tests, and the demo server. Reproduces the
//! contract a relational adapter must honor: storage-assigned ids, audit
//! stamping, `(employee_id, skill_id)` uniqueness, duplicate-key detection
//! on `emp_id`/`username`, and histories sorted ascending by transition
//! date.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use staffdesk_domain::{
    DesignationAreaRecord, EmploymentStatusRecord, SkillAssignment, UserPatch, UserRecord,
    WfhRecord,
};

use crate::error::PersistenceError;
use crate::store::{
    DesignationAreaStore, EmploymentStatusStore, SkillAssignmentStore, UserFilter, UserStore,
    WfhFilter, WfhStore,
};

/// A stored record together with its audit columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamped<T> {
    /// The stored record.
    pub record: T,
    /// The user who created the row.
    pub created_by: i64,
    /// The user who last wrote the row.
    pub updated_by: i64,
}

impl<T> Stamped<T> {
    const fn created(record: T, actor: i64) -> Self {
        Self {
            record,
            created_by: actor,
            updated_by: actor,
        }
    }
}

/// A full copy of the adapter's contents, for test inspection.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot {
    /// All user rows.
    pub users: Vec<Stamped<UserRecord>>,
    /// All skill assignments.
    pub skills: Vec<Stamped<SkillAssignment>>,
    /// All designation-area history rows.
    pub designation_areas: Vec<Stamped<DesignationAreaRecord>>,
    /// All employment-status history rows.
    pub statuses: Vec<Stamped<EmploymentStatusRecord>>,
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<Stamped<UserRecord>>,
    skills: Vec<Stamped<SkillAssignment>>,
    designation_areas: Vec<Stamped<DesignationAreaRecord>>,
    statuses: Vec<Stamped<EmploymentStatusRecord>>,
    wfh: Vec<WfhRecord>,
    next_id: i64,
}

impl Inner {
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory store implementing every persistence collaborator trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    mutations: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many mutating calls the store has served.
    ///
    /// Lets tests assert that a rejected request issued zero writes.
    pub fn mutation_count(&self) -> u64 {
        self.mutations.load(Ordering::SeqCst)
    }

    /// Returns a full copy of the store's contents.
    pub async fn snapshot(&self) -> MemorySnapshot {
        let inner = self.inner.read().await;
        MemorySnapshot {
            users: inner.users.clone(),
            skills: inner.skills.clone(),
            designation_areas: inner.designation_areas.clone(),
            statuses: inner.statuses.clone(),
        }
    }

    /// Seeds a user row directly, bypassing uniqueness checks and audit
    /// accounting. Returns the assigned id.
    pub async fn seed_user(&self, mut user: UserRecord) -> i64 {
        let mut inner = self.inner.write().await;
        let id: i64 = user.id.unwrap_or_else(|| inner.next_id + 1);
        inner.next_id = inner.next_id.max(id);
        user.id = Some(id);
        inner.users.push(Stamped::created(user, 0));
        id
    }

    /// Seeds a work-from-home record directly.
    pub async fn seed_wfh(&self, record: WfhRecord) {
        let mut inner = self.inner.write().await;
        inner.next_id = inner.next_id.max(record.id);
        inner.wfh.push(record);
    }

    fn record_mutation(&self) {
        self.mutations.fetch_add(1, Ordering::SeqCst);
    }
}

fn matches_user_filter(stamped: &Stamped<UserRecord>, filter: &UserFilter) -> bool {
    let user: &UserRecord = &stamped.record;
    if let Some(q) = &filter.q {
        if !user
            .full_name()
            .to_lowercase()
            .contains(&q.to_lowercase())
        {
            return false;
        }
    }
    if let Some(supervisor_id) = filter.supervisor_id {
        if user.supervisor_id != Some(supervisor_id) {
            return false;
        }
    }
    if let Some(is_supervisor) = filter.is_supervisor {
        if user.is_supervisor != is_supervisor {
            return false;
        }
    }
    if let Some(username) = &filter.username {
        if &user.username != username {
            return false;
        }
    }
    if filter.is_hr && !user.is_hr {
        return false;
    }
    if filter.is_people_ops && !user.is_people_ops {
        return false;
    }
    if filter.is_account_manager && !user.is_account_manager {
        return false;
    }
    true
}

fn matches_wfh_filter(record: &WfhRecord, filter: &WfhFilter) -> bool {
    if let Some(date) = filter.date {
        if record.date != date {
            return false;
        }
    }
    if let Some(start) = filter.start_date {
        if record.date < start {
            return false;
        }
    }
    if let Some(end) = filter.end_date {
        if record.date > end {
            return false;
        }
    }
    if let Some(user_id) = filter.user_id {
        if record.user_id != user_id {
            return false;
        }
    }
    true
}

fn page<T>(records: Vec<T>, offset: u64, limit: u32) -> Vec<T> {
    let skip: usize = usize::try_from(offset).unwrap_or(usize::MAX);
    let take: usize = usize::try_from(limit).unwrap_or(usize::MAX);
    records.into_iter().skip(skip).take(take).collect()
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn fetch(
        &self,
        filter: &UserFilter,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<UserRecord>, PersistenceError> {
        let inner = self.inner.read().await;
        let matched: Vec<UserRecord> = inner
            .users
            .iter()
            .filter(|stamped| matches_user_filter(stamped, filter))
            .map(|stamped| stamped.record.clone())
            .collect();
        Ok(page(matched, offset, limit))
    }

    async fn count(&self, filter: &UserFilter) -> Result<u64, PersistenceError> {
        let inner = self.inner.read().await;
        let count: usize = inner
            .users
            .iter()
            .filter(|stamped| matches_user_filter(stamped, filter))
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<UserRecord>, PersistenceError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .find(|stamped| stamped.record.id == Some(id))
            .map(|stamped| stamped.record.clone()))
    }

    async fn find_conflicts(
        &self,
        emp_id: &str,
        username: &str,
    ) -> Result<Vec<UserRecord>, PersistenceError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .filter(|stamped| {
                stamped.record.emp_id == emp_id || stamped.record.username == username
            })
            .map(|stamped| stamped.record.clone())
            .collect())
    }

    async fn create(&self, user: &UserRecord, actor: i64) -> Result<i64, PersistenceError> {
        let mut inner = self.inner.write().await;
        if inner
            .users
            .iter()
            .any(|stamped| stamped.record.emp_id == user.emp_id)
        {
            return Err(PersistenceError::DuplicateKey {
                field: "emp_id",
                value: user.emp_id.clone(),
            });
        }
        if inner
            .users
            .iter()
            .any(|stamped| stamped.record.username == user.username)
        {
            return Err(PersistenceError::DuplicateKey {
                field: "username",
                value: user.username.clone(),
            });
        }
        let id: i64 = inner.assign_id();
        let mut stored: UserRecord = user.clone();
        stored.id = Some(id);
        inner.users.push(Stamped::created(stored, actor));
        self.record_mutation();
        debug!(user_id = id, "created user row");
        Ok(id)
    }

    async fn update(
        &self,
        id: i64,
        patch: &UserPatch,
        actor: i64,
    ) -> Result<(), PersistenceError> {
        let mut inner = self.inner.write().await;
        let stamped = inner
            .users
            .iter_mut()
            .find(|stamped| stamped.record.id == Some(id))
            .ok_or(PersistenceError::RecordNotFound { entity: "user", id })?;

        let user: &mut UserRecord = &mut stamped.record;
        if let Some(first_name) = &patch.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &patch.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(email) = &patch.email {
            user.email = email.clone();
        }
        if let Some(birthday) = patch.birthday {
            user.birthday = Some(birthday);
        }
        if let Some(avatar_url) = &patch.avatar_url {
            user.avatar_url = Some(avatar_url.clone());
        }
        if let Some(cv_url) = &patch.cv_url {
            user.cv_url = Some(cv_url.clone());
        }
        if let Some(supervisor_id) = patch.supervisor_id {
            user.supervisor_id = Some(supervisor_id);
        }
        if let Some(is_hr) = patch.is_hr {
            user.is_hr = is_hr;
        }
        if let Some(is_people_ops) = patch.is_people_ops {
            user.is_people_ops = is_people_ops;
        }
        if let Some(is_account_manager) = patch.is_account_manager {
            user.is_account_manager = is_account_manager;
        }
        if let Some(is_supervisor) = patch.is_supervisor {
            user.is_supervisor = is_supervisor;
        }
        stamped.updated_by = actor;
        self.record_mutation();
        debug!(user_id = id, "updated user row");
        Ok(())
    }
}

#[async_trait]
impl SkillAssignmentStore for MemoryStore {
    async fn fetch_by_employee_id(
        &self,
        employee_id: i64,
    ) -> Result<Vec<SkillAssignment>, PersistenceError> {
        let inner = self.inner.read().await;
        Ok(inner
            .skills
            .iter()
            .filter(|stamped| stamped.record.employee_id == employee_id)
            .map(|stamped| stamped.record)
            .collect())
    }

    async fn create(
        &self,
        assignment: &SkillAssignment,
        actor: i64,
    ) -> Result<(), PersistenceError> {
        let mut inner = self.inner.write().await;
        if inner.skills.iter().any(|stamped| {
            stamped.record.employee_id == assignment.employee_id
                && stamped.record.skill_id == assignment.skill_id
        }) {
            return Err(PersistenceError::DuplicateKey {
                field: "employee_id/skill_id",
                value: format!("{}/{}", assignment.employee_id, assignment.skill_id),
            });
        }
        inner.skills.push(Stamped::created(*assignment, actor));
        self.record_mutation();
        debug!(
            employee_id = assignment.employee_id,
            skill_id = assignment.skill_id,
            "created skill assignment"
        );
        Ok(())
    }

    async fn remove(&self, employee_id: i64, skill_id: i64) -> Result<(), PersistenceError> {
        let mut inner = self.inner.write().await;
        let before: usize = inner.skills.len();
        inner.skills.retain(|stamped| {
            !(stamped.record.employee_id == employee_id && stamped.record.skill_id == skill_id)
        });
        if inner.skills.len() == before {
            return Err(PersistenceError::RecordNotFound {
                entity: "skill_assignment",
                id: skill_id,
            });
        }
        self.record_mutation();
        debug!(employee_id, skill_id, "removed skill assignment");
        Ok(())
    }
}

#[async_trait]
impl DesignationAreaStore for MemoryStore {
    async fn fetch_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Vec<DesignationAreaRecord>, PersistenceError> {
        let inner = self.inner.read().await;
        let mut records: Vec<DesignationAreaRecord> = inner
            .designation_areas
            .iter()
            .filter(|stamped| stamped.record.user_id == user_id)
            .map(|stamped| stamped.record.clone())
            .collect();
        records.sort_by_key(|record| record.transition_date);
        Ok(records)
    }

    async fn create(
        &self,
        record: &DesignationAreaRecord,
        actor: i64,
    ) -> Result<i64, PersistenceError> {
        let mut inner = self.inner.write().await;
        let id: i64 = inner.assign_id();
        let mut stored: DesignationAreaRecord = record.clone();
        stored.id = Some(id);
        inner
            .designation_areas
            .push(Stamped::created(stored, actor));
        self.record_mutation();
        debug!(
            record_id = id,
            user_id = record.user_id,
            "created designation-area record"
        );
        Ok(id)
    }

    async fn update(
        &self,
        record: &DesignationAreaRecord,
        actor: i64,
    ) -> Result<(), PersistenceError> {
        let id: i64 = record
            .id
            .ok_or(PersistenceError::MissingIdentity("designation_area"))?;
        let mut inner = self.inner.write().await;
        let stamped = inner
            .designation_areas
            .iter_mut()
            .find(|stamped| stamped.record.id == Some(id))
            .ok_or(PersistenceError::RecordNotFound {
                entity: "designation_area",
                id,
            })?;
        stamped.record = record.clone();
        stamped.updated_by = actor;
        self.record_mutation();
        debug!(record_id = id, "updated designation-area record");
        Ok(())
    }

    async fn remove(&self, id: i64) -> Result<(), PersistenceError> {
        let mut inner = self.inner.write().await;
        let before: usize = inner.designation_areas.len();
        inner
            .designation_areas
            .retain(|stamped| stamped.record.id != Some(id));
        if inner.designation_areas.len() == before {
            return Err(PersistenceError::RecordNotFound {
                entity: "designation_area",
                id,
            });
        }
        self.record_mutation();
        debug!(record_id = id, "removed designation-area record");
        Ok(())
    }
}

#[async_trait]
impl EmploymentStatusStore for MemoryStore {
    async fn fetch_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Vec<EmploymentStatusRecord>, PersistenceError> {
        let inner = self.inner.read().await;
        let mut records: Vec<EmploymentStatusRecord> = inner
            .statuses
            .iter()
            .filter(|stamped| stamped.record.user_id == user_id)
            .map(|stamped| stamped.record.clone())
            .collect();
        records.sort_by_key(|record| record.transition_date);
        Ok(records)
    }

    async fn create(
        &self,
        record: &EmploymentStatusRecord,
        actor: i64,
    ) -> Result<i64, PersistenceError> {
        let mut inner = self.inner.write().await;
        let id: i64 = inner.assign_id();
        let mut stored: EmploymentStatusRecord = record.clone();
        stored.id = Some(id);
        inner.statuses.push(Stamped::created(stored, actor));
        self.record_mutation();
        debug!(
            record_id = id,
            user_id = record.user_id,
            "created employment-status record"
        );
        Ok(id)
    }

    async fn update(
        &self,
        record: &EmploymentStatusRecord,
        actor: i64,
    ) -> Result<(), PersistenceError> {
        let id: i64 = record
            .id
            .ok_or(PersistenceError::MissingIdentity("employment_status"))?;
        let mut inner = self.inner.write().await;
        let stamped = inner
            .statuses
            .iter_mut()
            .find(|stamped| stamped.record.id == Some(id))
            .ok_or(PersistenceError::RecordNotFound {
                entity: "employment_status",
                id,
            })?;
        stamped.record = record.clone();
        stamped.updated_by = actor;
        self.record_mutation();
        debug!(record_id = id, "updated employment-status record");
        Ok(())
    }

    async fn remove(&self, id: i64) -> Result<(), PersistenceError> {
        let mut inner = self.inner.write().await;
        let before: usize = inner.statuses.len();
        inner
            .statuses
            .retain(|stamped| stamped.record.id != Some(id));
        if inner.statuses.len() == before {
            return Err(PersistenceError::RecordNotFound {
                entity: "employment_status",
                id,
            });
        }
        self.record_mutation();
        debug!(record_id = id, "removed employment-status record");
        Ok(())
    }
}

#[async_trait]
impl WfhStore for MemoryStore {
    async fn fetch(
        &self,
        filter: &WfhFilter,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<WfhRecord>, PersistenceError> {
        let inner = self.inner.read().await;
        let mut matched: Vec<WfhRecord> = inner
            .wfh
            .iter()
            .filter(|record| matches_wfh_filter(record, filter))
            .cloned()
            .collect();
        matched.sort_by_key(|record| record.date);
        Ok(page(matched, offset, limit))
    }

    async fn count(&self, filter: &WfhFilter) -> Result<u64, PersistenceError> {
        let inner = self.inner.read().await;
        let count: usize = inner
            .wfh
            .iter()
            .filter(|record| matches_wfh_filter(record, filter))
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }
}
