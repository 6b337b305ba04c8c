// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod payload;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use payload::{DesignationAreaEntry, Reference, SkillEntry, StatusEntry};
pub use types::{
    AuthContext, DesignationAreaRecord, EmploymentStatusRecord, SkillAssignment, UserPatch,
    UserRecord, WfhRecord,
};
pub use validation::{validate_status_record, validate_user_fields};
