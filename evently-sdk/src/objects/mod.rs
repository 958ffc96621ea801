//! API-facing objects shared between the server and its clients.
//!
//! These are pure serde types. The database-side counterparts (with
//! `sqlx::Type` / `sqlx::FromRow` derives) live in `evently-core::entities`
//! and convert to and from these via `From`.

pub mod auth;
pub mod events;
pub mod payments;
pub mod users;

use serde::{Deserialize, Serialize};

/// Account role. Controls access to role-gated routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    RegularUser,
    EventPlanner,
    Admin,
}

/// Lifecycle status of an event.
///
/// `Free` and `Available` are derived from the submitted ticket batch at
/// creation time; the moderation states (`Pending`/`Approved`/`Cancelled`)
/// are set explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Available,
    Free,
    Pending,
    Approved,
    Cancelled,
}

/// Category of ticket within one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketType {
    Regular,
    Vip,
    Free,
}

/// Payment lifecycle as reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
    Abandoned,
}

/// State of the gateway's asynchronous webhook confirmation for a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WebhookStatus {
    Pending,
    Received,
    Failed,
}

impl TicketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Regular => "REGULAR",
            TicketType::Vip => "VIP",
            TicketType::Free => "FREE",
        }
    }
}
