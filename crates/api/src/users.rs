// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User aggregate service.
//!
//! Orchestrates the pure core against the persistence collaborators for
//! every user operation: listing, detail assembly, creation, and the
//! reconciliation-based update of the aggregate's child collections.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use staffdesk::{normalize_designation_area, normalize_skill, normalize_status, reconcile};
use staffdesk_domain::{
    AuthContext, DesignationAreaRecord, EmploymentStatusRecord, SkillAssignment, UserPatch,
    UserRecord, validate_user_fields,
};
use staffdesk_persistence::{
    DesignationAreaStore, EmploymentStatusStore, PersistenceError, SkillAssignmentStore,
    UserFilter, UserStore,
};

use crate::apply::{apply_designation_areas, apply_skills, apply_statuses};
use crate::auth::{
    AccessLevel, authorize_create, authorize_leave_issuer_change, authorize_update, can_view_cv,
    can_view_history,
};
use crate::error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
use crate::notify::{Notifier, leave_issuer_changed_mail};
use crate::pagination::PageParams;
use crate::request_response::{
    CreateUserRequest, ListUsersQuery, UpdateUserRequest, UserAggregateResponse, UserSummary,
};

/// Service for user aggregate operations.
pub struct UserService {
    users: Arc<dyn UserStore>,
    skills: Arc<dyn SkillAssignmentStore>,
    designation_areas: Arc<dyn DesignationAreaStore>,
    statuses: Arc<dyn EmploymentStatusStore>,
    notifier: Arc<dyn Notifier>,
    /// Per-aggregate write locks. Serializes the snapshot/apply window of
    /// concurrent updates to the same user so neither silently overwrites
    /// the other's child reconciliation.
    locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl UserService {
    /// Creates a service over the given collaborators.
    pub fn new(
        users: Arc<dyn UserStore>,
        skills: Arc<dyn SkillAssignmentStore>,
        designation_areas: Arc<dyn DesignationAreaStore>,
        statuses: Arc<dyn EmploymentStatusStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            users,
            skills,
            designation_areas,
            statuses,
            notifier,
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn lock_for(&self, id: i64) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        Arc::clone(locks.entry(id).or_default())
    }

    /// Lists users matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error when the store query fails.
    pub async fn fetch(&self, query: &ListUsersQuery) -> Result<Vec<UserSummary>, ApiError> {
        let filter: UserFilter = build_filter(query);
        let params: PageParams = PageParams::resolve(query.page, query.page_size);
        let records: Vec<UserRecord> = self
            .users
            .fetch(&filter, params.offset(), params.page_size)
            .await
            .map_err(translate_persistence_error)?;
        Ok(records
            .iter()
            .filter_map(UserSummary::from_record)
            .collect())
    }

    /// Counts users matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error when the store query fails.
    pub async fn count(&self, query: &ListUsersQuery) -> Result<u64, ApiError> {
        let filter: UserFilter = build_filter(query);
        self.users
            .count(&filter)
            .await
            .map_err(translate_persistence_error)
    }

    /// Assembles the full user aggregate for the detail endpoint.
    ///
    /// The three child collections are fetched concurrently. History
    /// collections are included only for HR or the user themselves; the CV
    /// link additionally for People Operations.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or an internal error
    /// when a store query fails.
    pub async fn fetch_by_id(
        &self,
        auth: &AuthContext,
        id: i64,
    ) -> Result<UserAggregateResponse, ApiError> {
        let mut user: UserRecord = self
            .users
            .fetch_by_id(id)
            .await
            .map_err(translate_persistence_error)?
            .ok_or_else(|| user_not_found(id))?;

        let (skills, designation_history, status_history) = tokio::try_join!(
            self.skills.fetch_by_employee_id(id),
            self.designation_areas.fetch_by_user_id(id),
            self.statuses.fetch_by_user_id(id),
        )
        .map_err(translate_persistence_error)?;

        if !can_view_cv(auth, id) {
            user.cv_url = None;
        }
        let view_history: bool = can_view_history(auth, id);
        let current_designation_area: Option<DesignationAreaRecord> =
            designation_history.last().cloned();
        let current_status: Option<EmploymentStatusRecord> = status_history.last().cloned();

        Ok(UserAggregateResponse {
            user,
            skills: skills
                .iter()
                .map(|assignment| assignment.skill_id)
                .collect(),
            designation_area_history: view_history.then_some(designation_history),
            emp_status_history: view_history.then_some(status_history),
            current_designation_area,
            current_status,
        })
    }

    /// Creates a user aggregate.
    ///
    /// Child entries are normalized before anything is written, so a
    /// malformed entry fails the whole request with no partial state. The
    /// unique columns are pre-checked to report a conflict without
    /// attempting the insert.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for non-HR callers, `InvalidInput` for
    /// malformed fields or child entries, and `DuplicateKey` when the
    /// employee id or username is taken.
    pub async fn create(
        &self,
        auth: &AuthContext,
        request: &CreateUserRequest,
    ) -> Result<UserAggregateResponse, ApiError> {
        authorize_create(auth)?;

        let record: UserRecord = request.to_record();
        validate_user_fields(&record).map_err(translate_domain_error)?;

        // Normalize with a placeholder owner so malformed entries are
        // rejected before the root insert; the real id is patched in below.
        let mut designation_records: Vec<DesignationAreaRecord> = request
            .designation_area_history
            .iter()
            .map(|entry| normalize_designation_area(entry, 0))
            .collect::<Result<_, _>>()
            .map_err(translate_core_error)?;
        let mut status_records: Vec<EmploymentStatusRecord> = request
            .emp_status_history
            .iter()
            .map(|entry| normalize_status(entry, 0))
            .collect::<Result<_, _>>()
            .map_err(translate_core_error)?;

        let conflicts: Vec<UserRecord> = self
            .users
            .find_conflicts(&request.emp_id, &request.username)
            .await
            .map_err(translate_persistence_error)?;
        if let Some(existing) = conflicts.first() {
            let field: &str = if existing.emp_id == request.emp_id {
                "emp_id"
            } else {
                "username"
            };
            return Err(ApiError::DuplicateKey {
                field: String::from(field),
                message: format!("A user with this {field} already exists"),
            });
        }

        let id: i64 = self
            .users
            .create(&record, auth.id)
            .await
            .map_err(translate_persistence_error)?;

        let skill_records: Vec<SkillAssignment> = request
            .skills
            .iter()
            .map(|entry| normalize_skill(entry, id))
            .collect();
        for record in &mut designation_records {
            record.user_id = id;
        }
        for record in &mut status_records {
            record.user_id = id;
        }

        let actor: i64 = auth.id;
        tokio::try_join!(
            async {
                futures::future::try_join_all(
                    skill_records
                        .iter()
                        .map(|assignment| self.skills.create(assignment, actor)),
                )
                .await?;
                Ok::<(), PersistenceError>(())
            },
            async {
                futures::future::try_join_all(
                    designation_records
                        .iter()
                        .map(|record| self.designation_areas.create(record, actor)),
                )
                .await?;
                Ok(())
            },
            async {
                futures::future::try_join_all(
                    status_records
                        .iter()
                        .map(|record| self.statuses.create(record, actor)),
                )
                .await?;
                Ok(())
            },
        )
        .map_err(translate_persistence_error)?;

        self.fetch_by_id(auth, id).await
    }

    /// Updates a user aggregate.
    ///
    /// Scalar fields are patched; each child collection present in the
    /// payload is reconciled against stored state. Self-service callers may
    /// only patch unrestricted scalar fields on their own record; a payload
    /// that reaches further is refused before anything is written.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when the caller may not perform this update,
    /// `ResourceNotFound` for an unknown id, and `InvalidInput` for
    /// malformed child entries.
    pub async fn update(
        &self,
        auth: &AuthContext,
        id: i64,
        request: &UpdateUserRequest,
    ) -> Result<UserAggregateResponse, ApiError> {
        let access: AccessLevel = authorize_update(auth, id)?;
        if access == AccessLevel::SelfService
            && (request.patch.touches_restricted_fields() || request.touches_collections())
        {
            return Err(ApiError::from(AuthError::Unauthorized {
                action: String::from("update_user"),
                reason: String::from(
                    "self-service updates may not change roles, the supervisor, the CV link, \
                     or the history collections",
                ),
            }));
        }

        // Normalize everything up front so a malformed entry rejects the
        // request before the first write.
        let desired_skills: Option<Vec<SkillAssignment>> = request
            .skills
            .as_ref()
            .map(|entries| entries.iter().map(|entry| normalize_skill(entry, id)).collect());
        let desired_designations: Option<Vec<DesignationAreaRecord>> = request
            .designation_area_history
            .as_ref()
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| normalize_designation_area(entry, id))
                    .collect::<Result<_, _>>()
            })
            .transpose()
            .map_err(translate_core_error)?;
        let desired_statuses: Option<Vec<EmploymentStatusRecord>> = request
            .emp_status_history
            .as_ref()
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| normalize_status(entry, id))
                    .collect::<Result<_, _>>()
            })
            .transpose()
            .map_err(translate_core_error)?;

        let lock: Arc<Mutex<()>> = self.lock_for(id).await;
        let guard = lock.lock().await;

        if self
            .users
            .fetch_by_id(id)
            .await
            .map_err(translate_persistence_error)?
            .is_none()
        {
            return Err(user_not_found(id));
        }

        if !request.patch.is_empty() {
            self.users
                .update(id, &request.patch, auth.id)
                .await
                .map_err(translate_persistence_error)?;
        }

        let actor: i64 = auth.id;
        tokio::try_join!(
            self.reconcile_skills(id, desired_skills, actor),
            self.reconcile_designations(id, desired_designations, actor),
            self.reconcile_statuses(id, desired_statuses, actor),
        )
        .map_err(translate_persistence_error)?;

        drop(guard);
        self.fetch_by_id(auth, id).await
    }

    /// Reassigns the user's leave issuer (their supervisor) and notifies
    /// the people involved.
    ///
    /// Mail delivery is best-effort: a transport failure is logged and the
    /// reassignment still succeeds.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for non-HR callers and `ResourceNotFound`
    /// when either user is unknown.
    pub async fn update_leave_issuer(
        &self,
        auth: &AuthContext,
        user_id: i64,
        issuer_id: i64,
    ) -> Result<UserAggregateResponse, ApiError> {
        authorize_leave_issuer_change(auth)?;

        let user: UserRecord = self
            .users
            .fetch_by_id(user_id)
            .await
            .map_err(translate_persistence_error)?
            .ok_or_else(|| user_not_found(user_id))?;
        let issuer: UserRecord = self
            .users
            .fetch_by_id(issuer_id)
            .await
            .map_err(translate_persistence_error)?
            .ok_or_else(|| user_not_found(issuer_id))?;

        let previous_issuer: Option<UserRecord> = match user.supervisor_id {
            Some(previous_id) => self
                .users
                .fetch_by_id(previous_id)
                .await
                .map_err(translate_persistence_error)?,
            None => None,
        };

        let patch: UserPatch = UserPatch {
            supervisor_id: Some(issuer_id),
            ..UserPatch::default()
        };
        self.users
            .update(user_id, &patch, auth.id)
            .await
            .map_err(translate_persistence_error)?;

        let mut recipients: Vec<String> = vec![user.email.clone(), issuer.email.clone()];
        if let Some(previous) = &previous_issuer {
            recipients.push(previous.email.clone());
        }
        let (subject, body) = leave_issuer_changed_mail(&user.full_name(), &issuer.full_name());
        if let Err(err) = self.notifier.send_mail(&recipients, &subject, &body).await {
            tracing::warn!(user_id, issuer_id, error = %err, "leave issuer mail not delivered");
        }

        self.fetch_by_id(auth, user_id).await
    }

    async fn reconcile_skills(
        &self,
        id: i64,
        desired: Option<Vec<SkillAssignment>>,
        actor: i64,
    ) -> Result<(), PersistenceError> {
        let Some(desired) = desired else {
            return Ok(());
        };
        let previous: Vec<SkillAssignment> = self.skills.fetch_by_employee_id(id).await?;
        let changes = reconcile(desired, previous, |assignment: &SkillAssignment| {
            Some(assignment.skill_id)
        });
        apply_skills(self.skills.as_ref(), &changes, actor).await
    }

    async fn reconcile_designations(
        &self,
        id: i64,
        desired: Option<Vec<DesignationAreaRecord>>,
        actor: i64,
    ) -> Result<(), PersistenceError> {
        let Some(desired) = desired else {
            return Ok(());
        };
        let previous: Vec<DesignationAreaRecord> =
            self.designation_areas.fetch_by_user_id(id).await?;
        let changes = reconcile(desired, previous, |record: &DesignationAreaRecord| record.id);
        apply_designation_areas(self.designation_areas.as_ref(), &changes, actor).await
    }

    async fn reconcile_statuses(
        &self,
        id: i64,
        desired: Option<Vec<EmploymentStatusRecord>>,
        actor: i64,
    ) -> Result<(), PersistenceError> {
        let Some(desired) = desired else {
            return Ok(());
        };
        let previous: Vec<EmploymentStatusRecord> = self.statuses.fetch_by_user_id(id).await?;
        let changes = reconcile(desired, previous, |record: &EmploymentStatusRecord| record.id);
        apply_statuses(self.statuses.as_ref(), &changes, actor).await
    }
}

fn build_filter(query: &ListUsersQuery) -> UserFilter {
    UserFilter {
        q: query.q.clone(),
        supervisor_id: query.supervisor_id,
        is_supervisor: query.is_supervisor,
        username: query.username.clone(),
        is_hr: query.is_hr,
        is_people_ops: query.is_people_ops,
        is_account_manager: query.is_account_manager,
    }
}

fn user_not_found(id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("user"),
        message: format!("No user with id {id}"),
    }
}
