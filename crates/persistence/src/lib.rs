// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Staffdesk HR backend.
//!
//! The relational schema and query execution are external collaborators:
//! this crate defines one store trait per entity and ships an in-memory
//! adapter used by unit tests, handler tests, and the demo server. A
//! production deployment substitutes adapters backed by a durable store
//! behind the same traits.

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
mod memory;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use memory::{MemorySnapshot, MemoryStore, Stamped};
pub use store::{
    DesignationAreaStore, EmploymentStatusStore, SkillAssignmentStore, UserFilter, UserStore,
    WfhFilter, WfhStore,
};
