// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use time::macros::date;

use staffdesk_domain::{
    AuthContext, DesignationAreaEntry, DesignationAreaRecord, EmploymentStatusRecord, SkillEntry,
    UserPatch, UserRecord,
};
use staffdesk_persistence::{
    DesignationAreaStore, EmploymentStatusStore, MemoryStore, SkillAssignmentStore,
};

use crate::error::ApiError;
use crate::notify::LoggingNotifier;
use crate::request_response::{CreateUserRequest, UpdateUserRequest};
use crate::tests::helpers::{
    FailingNotifier, RecordingNotifier, designation_entry, sample_user, status_entry,
    user_service,
};

fn create_request(emp_id: &str, username: &str) -> CreateUserRequest {
    CreateUserRequest {
        emp_id: String::from(emp_id),
        username: String::from(username),
        first_name: String::from("Jane"),
        last_name: String::from("Doe"),
        email: String::from(username),
        birthday: None,
        avatar_url: None,
        cv_url: None,
        supervisor_id: None,
        is_hr: false,
        is_people_ops: false,
        is_account_manager: false,
        is_supervisor: false,
        skills: Vec::new(),
        designation_area_history: Vec::new(),
        emp_status_history: Vec::new(),
    }
}

#[tokio::test]
async fn test_hr_creates_user_with_children() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let service = user_service(&store, Arc::new(LoggingNotifier));
    let hr: AuthContext = AuthContext::hr(1);

    let mut request: CreateUserRequest = create_request("E-1", "jane@example.com");
    request.skills = vec![SkillEntry { id: 5 }, SkillEntry { id: 7 }];
    request.designation_area_history = vec![designation_entry(None, 3, date!(2024 - 01 - 01))];
    request.emp_status_history = vec![status_entry(None, 2)];

    let response = service.create(&hr, &request).await.unwrap();

    assert!(response.user.id.is_some());
    assert_eq!(response.skills, vec![5, 7]);
    let history = response.designation_area_history.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].designation_id, 3);
    assert_eq!(
        response.current_status.unwrap().engagement_status_id,
        2
    );
}

#[tokio::test]
async fn test_create_requires_hr() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let service = user_service(&store, Arc::new(LoggingNotifier));

    let result = service
        .create(&AuthContext::plain(1), &create_request("E-1", "a@example.com"))
        .await;

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    assert_eq!(store.mutation_count(), 0);
}

#[tokio::test]
async fn test_create_with_duplicate_emp_id_writes_nothing() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    store.seed_user(sample_user("E-1", "a@example.com")).await;
    let service = user_service(&store, Arc::new(LoggingNotifier));

    let result = service
        .create(&AuthContext::hr(1), &create_request("E-1", "b@example.com"))
        .await;

    assert!(matches!(
        result,
        Err(ApiError::DuplicateKey { ref field, .. }) if field == "emp_id"
    ));
    assert_eq!(store.mutation_count(), 0);
}

#[tokio::test]
async fn test_create_with_malformed_history_entry_writes_nothing() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let service = user_service(&store, Arc::new(LoggingNotifier));

    let mut request: CreateUserRequest = create_request("E-1", "a@example.com");
    request.designation_area_history = vec![DesignationAreaEntry {
        id: None,
        designation: None,
        area: None,
        transition_date: date!(2024 - 01 - 01),
    }];

    let result = service.create(&AuthContext::hr(1), &request).await;

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
    assert_eq!(store.mutation_count(), 0);
}

#[tokio::test]
async fn test_update_adds_and_removes_skills() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let id: i64 = store.seed_user(sample_user("E-1", "a@example.com")).await;
    for skill_id in [5, 7] {
        SkillAssignmentStore::create(
            store.as_ref(),
            &staffdesk_domain::SkillAssignment {
                employee_id: id,
                skill_id,
            },
            0,
        )
        .await
        .unwrap();
    }
    let service = user_service(&store, Arc::new(LoggingNotifier));

    let request: UpdateUserRequest = UpdateUserRequest {
        skills: Some(vec![SkillEntry { id: 7 }, SkillEntry { id: 9 }]),
        ..UpdateUserRequest::default()
    };
    let response = service.update(&AuthContext::hr(1), id, &request).await.unwrap();

    let mut skills = response.skills;
    skills.sort_unstable();
    assert_eq!(skills, vec![7, 9]);
}

#[tokio::test]
async fn test_self_service_updates_own_profile_fields() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let id: i64 = store.seed_user(sample_user("E-1", "a@example.com")).await;
    let service = user_service(&store, Arc::new(LoggingNotifier));

    let request: UpdateUserRequest = UpdateUserRequest {
        patch: UserPatch {
            first_name: Some(String::from("Janet")),
            ..UserPatch::default()
        },
        ..UpdateUserRequest::default()
    };
    let response = service
        .update(&AuthContext::plain(id), id, &request)
        .await
        .unwrap();

    assert_eq!(response.user.first_name, "Janet");
}

#[tokio::test]
async fn test_self_service_may_not_touch_restricted_fields() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let id: i64 = store.seed_user(sample_user("E-1", "a@example.com")).await;
    let service = user_service(&store, Arc::new(LoggingNotifier));

    let request: UpdateUserRequest = UpdateUserRequest {
        patch: UserPatch {
            is_hr: Some(true),
            ..UserPatch::default()
        },
        ..UpdateUserRequest::default()
    };
    let result = service.update(&AuthContext::plain(id), id, &request).await;

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    assert_eq!(store.mutation_count(), 0);
}

#[tokio::test]
async fn test_self_service_may_not_touch_child_collections() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let id: i64 = store.seed_user(sample_user("E-1", "a@example.com")).await;
    let service = user_service(&store, Arc::new(LoggingNotifier));

    let request: UpdateUserRequest = UpdateUserRequest {
        skills: Some(Vec::new()),
        ..UpdateUserRequest::default()
    };
    let result = service.update(&AuthContext::plain(id), id, &request).await;

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    assert_eq!(store.mutation_count(), 0);
}

#[tokio::test]
async fn test_update_reconciles_history_records() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let id: i64 = store.seed_user(sample_user("E-1", "a@example.com")).await;
    let kept: i64 = DesignationAreaStore::create(
        store.as_ref(),
        &DesignationAreaRecord {
            id: None,
            user_id: id,
            designation_id: 1,
            area_id: None,
            transition_date: date!(2023 - 01 - 01),
        },
        0,
    )
    .await
    .unwrap();
    let dropped: i64 = DesignationAreaStore::create(
        store.as_ref(),
        &DesignationAreaRecord {
            id: None,
            user_id: id,
            designation_id: 2,
            area_id: None,
            transition_date: date!(2023 - 06 - 01),
        },
        0,
    )
    .await
    .unwrap();
    let service = user_service(&store, Arc::new(LoggingNotifier));

    // Keep `kept` with a new designation, drop `dropped`, add a fresh entry.
    let request: UpdateUserRequest = UpdateUserRequest {
        designation_area_history: Some(vec![
            designation_entry(Some(kept), 4, date!(2023 - 01 - 01)),
            designation_entry(None, 5, date!(2024 - 01 - 01)),
        ]),
        ..UpdateUserRequest::default()
    };
    let response = service.update(&AuthContext::hr(1), id, &request).await.unwrap();

    let history = response.designation_area_history.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().any(|r| r.id == Some(kept) && r.designation_id == 4));
    assert!(history.iter().all(|r| r.id != Some(dropped)));
    assert_eq!(response.current_designation_area.unwrap().designation_id, 5);
}

#[tokio::test]
async fn test_update_of_unknown_user_is_not_found() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let service = user_service(&store, Arc::new(LoggingNotifier));

    let result = service
        .update(&AuthContext::hr(1), 99, &UpdateUserRequest::default())
        .await;

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[tokio::test]
async fn test_fetch_by_id_hides_history_and_cv_from_other_users() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let id: i64 = store.seed_user(sample_user("E-1", "a@example.com")).await;
    let service = user_service(&store, Arc::new(LoggingNotifier));

    let response = service
        .fetch_by_id(&AuthContext::plain(id + 1), id)
        .await
        .unwrap();

    assert!(response.designation_area_history.is_none());
    assert!(response.emp_status_history.is_none());
    assert!(response.user.cv_url.is_none());
}

#[tokio::test]
async fn test_people_ops_sees_cv_but_not_history() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let id: i64 = store.seed_user(sample_user("E-1", "a@example.com")).await;
    let service = user_service(&store, Arc::new(LoggingNotifier));

    let mut people_ops: AuthContext = AuthContext::plain(id + 1);
    people_ops.is_people_ops = true;
    let response = service.fetch_by_id(&people_ops, id).await.unwrap();

    assert!(response.user.cv_url.is_some());
    assert!(response.designation_area_history.is_none());
}

#[tokio::test]
async fn test_fetch_by_id_derives_current_status_from_latest_entry() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let id: i64 = store.seed_user(sample_user("E-1", "a@example.com")).await;
    for (status_id, day) in [(2, date!(2024 - 06 - 01)), (1, date!(2023 - 01 - 01))] {
        EmploymentStatusStore::create(
            store.as_ref(),
            &EmploymentStatusRecord {
                id: None,
                user_id: id,
                engagement_status_id: status_id,
                transition_date: day,
                end_date: None,
            },
            0,
        )
        .await
        .unwrap();
    }
    let service = user_service(&store, Arc::new(LoggingNotifier));

    let response = service.fetch_by_id(&AuthContext::hr(1), id).await.unwrap();

    let history = response.emp_status_history.unwrap();
    assert_eq!(history[0].engagement_status_id, 1);
    assert_eq!(response.current_status.unwrap().engagement_status_id, 2);
}

#[tokio::test]
async fn test_update_leave_issuer_requires_hr() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let id: i64 = store.seed_user(sample_user("E-1", "a@example.com")).await;
    let service = user_service(&store, Arc::new(LoggingNotifier));

    let result = service
        .update_leave_issuer(&AuthContext::plain(id), id, 2)
        .await;

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[tokio::test]
async fn test_update_leave_issuer_notifies_everyone_involved() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let old_issuer: i64 = store.seed_user(sample_user("E-1", "old@example.com")).await;
    let new_issuer: i64 = store.seed_user(sample_user("E-2", "new@example.com")).await;
    let mut user: UserRecord = sample_user("E-3", "jane@example.com");
    user.supervisor_id = Some(old_issuer);
    let user_id: i64 = store.seed_user(user).await;

    let notifier: Arc<RecordingNotifier> = Arc::new(RecordingNotifier::default());
    let service = user_service(&store, Arc::clone(&notifier) as Arc<dyn crate::Notifier>);

    let response = service
        .update_leave_issuer(&AuthContext::hr(1), user_id, new_issuer)
        .await
        .unwrap();

    assert_eq!(response.user.supervisor_id, Some(new_issuer));
    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let recipients = &sent[0].0;
    assert!(recipients.contains(&String::from("jane@example.com")));
    assert!(recipients.contains(&String::from("new@example.com")));
    assert!(recipients.contains(&String::from("old@example.com")));
}

#[tokio::test]
async fn test_update_leave_issuer_survives_mail_failure() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let issuer: i64 = store.seed_user(sample_user("E-1", "new@example.com")).await;
    let user_id: i64 = store.seed_user(sample_user("E-2", "jane@example.com")).await;
    let service = user_service(&store, Arc::new(FailingNotifier));

    let response = service
        .update_leave_issuer(&AuthContext::hr(1), user_id, issuer)
        .await
        .unwrap();

    assert_eq!(response.user.supervisor_id, Some(issuer));
}

#[tokio::test]
async fn test_fetch_lists_matching_users() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let mut first: UserRecord = sample_user("E-1", "jane@example.com");
    first.first_name = String::from("Jane");
    store.seed_user(first).await;
    let mut second: UserRecord = sample_user("E-2", "omar@example.com");
    second.first_name = String::from("Omar");
    store.seed_user(second).await;
    let service = user_service(&store, Arc::new(LoggingNotifier));

    let query = crate::request_response::ListUsersQuery {
        q: Some(String::from("omar")),
        ..crate::request_response::ListUsersQuery::default()
    };
    let matches = service.fetch(&query).await.unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].username, "omar@example.com");
    assert_eq!(service.count(&query).await.unwrap(), 1);
}
