// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service layer and API contract for the Staffdesk HR backend.
//!
//! This crate orchestrates the pure core (normalization and set
//! reconciliation) against the persistence collaborators, and enforces the
//! authorization rules for every operation. Callers above this layer (the
//! HTTP server) deal only in the request/response shapes and `ApiError`.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod auth;
mod error;
mod notify;
mod pagination;
mod request_response;
mod users;
mod wfh;

#[cfg(test)]
mod tests;

pub use auth::{
    AccessLevel, authorize_create, authorize_leave_issuer_change, authorize_update, can_view_cv,
    can_view_history,
};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use notify::{LoggingNotifier, Notifier, NotifyError};
pub use pagination::PageParams;
pub use request_response::{
    CreateUserRequest, ListUsersQuery, UpdateUserRequest, UserAggregateResponse, UserSummary,
    WfhQuery,
};
pub use users::UserService;
pub use wfh::WfhService;
