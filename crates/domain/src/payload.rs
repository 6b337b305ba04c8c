// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incoming child-record shapes as carried by create/update payloads.
//!
//! Payload entries reference related entities through nested objects
//! (`"designation": {"id": 5}`) rather than flat foreign keys. The core
//! normalizer projects them into the flat storage records in `types`.

use serde::{Deserialize, Serialize};
use time::Date;

/// A nested reference to another entity, carried as `{"id": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// The referenced entity's id.
    pub id: i64,
}

/// A skill entry in a create/update payload.
///
/// Skills are referenced by the skill's own id; assignments carry no
/// storage-assigned identity of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    /// The skill's id.
    pub id: i64,
}

/// A designation-area history entry in a create/update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignationAreaEntry {
    /// Storage identity of an already-persisted record; absent for new
    /// entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The designation reference. Required; its absence is a payload defect.
    pub designation: Option<Reference>,
    /// The area reference, for area-scoped designations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<Reference>,
    /// The date the designation took effect.
    pub transition_date: Date,
}

/// An employment-status history entry in a create/update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    /// Storage identity of an already-persisted record; absent for new
    /// entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The engagement-status reference. Required; its absence is a payload
    /// defect.
    pub engagement_status: Option<Reference>,
    /// The date the status took effect.
    pub transition_date: Date,
    /// The date the status ended, when bounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
}
