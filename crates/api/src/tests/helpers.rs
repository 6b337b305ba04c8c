// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for the API tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::Date;
use time::macros::date;

use staffdesk_domain::{DesignationAreaEntry, Reference, StatusEntry, UserRecord};
use staffdesk_persistence::{
    DesignationAreaStore, EmploymentStatusStore, MemoryStore, SkillAssignmentStore, UserStore,
    WfhStore,
};

use crate::notify::{Notifier, NotifyError};
use crate::users::UserService;
use crate::wfh::WfhService;

/// A notifier that records every delivery for inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(Vec<String>, String)>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_mail(
        &self,
        recipients: &[String],
        subject: &str,
        _body: &str,
    ) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipients.to_vec(), String::from(subject)));
        Ok(())
    }
}

/// A notifier whose transport always fails.
#[derive(Debug, Default)]
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send_mail(
        &self,
        _recipients: &[String],
        _subject: &str,
        _body: &str,
    ) -> Result<(), NotifyError> {
        Err(NotifyError::DeliveryFailed(String::from("transport down")))
    }
}

pub fn user_service(store: &Arc<MemoryStore>, notifier: Arc<dyn Notifier>) -> UserService {
    UserService::new(
        Arc::clone(store) as Arc<dyn UserStore>,
        Arc::clone(store) as Arc<dyn SkillAssignmentStore>,
        Arc::clone(store) as Arc<dyn DesignationAreaStore>,
        Arc::clone(store) as Arc<dyn EmploymentStatusStore>,
        notifier,
    )
}

pub fn wfh_service(store: &Arc<MemoryStore>) -> WfhService {
    WfhService::new(Arc::clone(store) as Arc<dyn WfhStore>)
}

pub fn sample_user(emp_id: &str, username: &str) -> UserRecord {
    UserRecord {
        id: None,
        emp_id: String::from(emp_id),
        username: String::from(username),
        first_name: String::from("Jane"),
        last_name: String::from("Doe"),
        email: String::from(username),
        birthday: None,
        avatar_url: None,
        cv_url: Some(String::from("https://files.example.com/cv.pdf")),
        supervisor_id: None,
        is_hr: false,
        is_people_ops: false,
        is_account_manager: false,
        is_supervisor: false,
    }
}

pub fn designation_entry(
    id: Option<i64>,
    designation_id: i64,
    transition_date: Date,
) -> DesignationAreaEntry {
    DesignationAreaEntry {
        id,
        designation: Some(Reference { id: designation_id }),
        area: None,
        transition_date,
    }
}

pub fn status_entry(id: Option<i64>, engagement_status_id: i64) -> StatusEntry {
    StatusEntry {
        id,
        engagement_status: Some(Reference {
            id: engagement_status_id,
        }),
        transition_date: date!(2024 - 01 - 01),
        end_date: None,
    }
}
