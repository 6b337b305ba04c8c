// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reconciliation core for the Staffdesk HR backend.
//!
//! This crate holds the pure algorithmic heart of the system: projecting
//! payload child-record entries into their flat storage shape, and
//! partitioning a desired collection against the previously persisted one
//! into create/update/remove sets. Everything here is a pure function of
//! its inputs; persistence and authorization live in the outer crates.

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
mod normalize;
mod reconcile;

#[cfg(test)]
mod tests;

pub use error::CoreError;
pub use normalize::{normalize_designation_area, normalize_skill, normalize_status};
pub use reconcile::{ChangeSet, reconcile};
