//! RSVP invitation fan-out.
//!
//! Invitee emails go out concurrently and independently: one recipient's
//! failure is logged and reported in that recipient's outcome, and neither
//! aborts the other sends nor touches the already-persisted event.

use crate::entities::events::Event;
use crate::gateways::email::Notifier;
use futures_util::future::join_all;

/// Per-recipient outcome, surfaced verbatim in the API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteOutcome {
    pub invitee: String,
    pub success: bool,
    pub message: String,
}

pub async fn send_invites(
    notifier: &dyn Notifier,
    event: &Event,
    invitees: &[String],
) -> Vec<InviteOutcome> {
    let subject = format!("You're invited: {}", event.title);
    let body = format!(
        "You have been invited to {} on {} at {} ({}).\n\n{}",
        event.title, event.date, event.time, event.location, event.description,
    );

    let sends = invitees.iter().map(|invitee| {
        let subject = subject.as_str();
        let body = body.as_str();
        async move {
            let outcome = notifier.send_email(invitee, subject, body).await;
            if !outcome.success {
                tracing::warn!(invitee, message = %outcome.message, "RSVP invite failed");
            }
            InviteOutcome {
                invitee: invitee.clone(),
                success: outcome.success,
                message: outcome.message,
            }
        }
    });

    join_all(sends).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::EventStatus;
    use crate::gateways::email::SendOutcome;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use time::macros::{date, datetime};
    use uuid::Uuid;

    /// Records every recipient; fails the ones on its deny list.
    struct FlakyNotifier {
        deny: &'static str,
        attempted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for FlakyNotifier {
        async fn send_email(&self, to: &str, _subject: &str, _body: &str) -> SendOutcome {
            self.attempted.lock().unwrap().push(to.to_string());
            if to == self.deny {
                SendOutcome::failed("mailbox unavailable")
            } else {
                SendOutcome::ok()
            }
        }
    }

    fn sample_event() -> Event {
        Event {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Launch Party".to_string(),
            description: "Celebrating the release".to_string(),
            date: date!(2031 - 05 - 01),
            time: "19:00".to_string(),
            location: "Lagos".to_string(),
            status: EventStatus::Free,
            event_image: None,
            capacity: None,
            free_ticket: None,
            created_at: datetime!(2031-01-01 00:00),
            updated_at: datetime!(2031-01-01 00:00),
        }
    }

    #[tokio::test]
    async fn one_failing_recipient_does_not_abort_the_rest() {
        let notifier = FlakyNotifier {
            deny: "bad@example.com",
            attempted: Mutex::new(Vec::new()),
        };
        let invitees = vec![
            "a@example.com".to_string(),
            "bad@example.com".to_string(),
            "c@example.com".to_string(),
        ];

        let outcomes = send_invites(&notifier, &sample_event(), &invitees).await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].success);
        assert!(!outcomes[1].success);
        assert!(outcomes[2].success);
        // Every recipient was attempted despite the failure in the middle.
        assert_eq!(notifier.attempted.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn empty_invitee_list_sends_nothing() {
        let notifier = FlakyNotifier {
            deny: "",
            attempted: Mutex::new(Vec::new()),
        };
        let outcomes = send_invites(&notifier, &sample_event(), &[]).await;
        assert!(outcomes.is_empty());
        assert!(notifier.attempted.lock().unwrap().is_empty());
    }
}
