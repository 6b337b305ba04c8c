// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outbound notification collaborator.
//!
//! Delivery is best-effort: the user service logs failures and completes the
//! triggering operation anyway. Nothing in this crate retries or queues.

use async_trait::async_trait;
use thiserror::Error;

/// Notification delivery errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotifyError {
    /// The transport rejected or failed to deliver the message.
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Outbound mail collaborator.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends a message to each recipient address.
    ///
    /// # Errors
    ///
    /// Returns an error when the transport fails; callers decide whether
    /// delivery is load-bearing.
    async fn send_mail(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), NotifyError>;
}

/// A notifier that records deliveries in the log instead of sending them.
///
/// Stands in wherever a real mail transport is not wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotifier;

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn send_mail(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), NotifyError> {
        tracing::info!(
            recipients = recipients.join(", "),
            subject,
            body,
            "mail delivery (logging transport)"
        );
        Ok(())
    }
}

/// Builds the notification sent when a user's leave issuer changes.
///
/// Returns the subject line and body.
#[must_use]
pub fn leave_issuer_changed_mail(user_name: &str, issuer_name: &str) -> (String, String) {
    (
        format!("Leave issuer changed for {user_name}"),
        format!("{issuer_name} is now the leave issuer for {user_name}."),
    )
}
