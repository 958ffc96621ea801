pub mod events;
pub mod payments;
pub mod ticket_prices;
pub mod users;

use evently_sdk::objects::{
    EventStatus as SdkEventStatus, PaymentStatus as SdkPaymentStatus, Role as SdkRole,
    TicketType as SdkTicketType, WebhookStatus as SdkWebhookStatus,
};

/// Account role for database operations.
///
/// This is the sqlx::Type version. For API/DTO use, see `evently_sdk::objects::Role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "snake_case", type_name = "user_role")]
pub enum Role {
    RegularUser,
    EventPlanner,
    Admin,
}

impl From<Role> for SdkRole {
    fn from(value: Role) -> Self {
        match value {
            Role::RegularUser => SdkRole::RegularUser,
            Role::EventPlanner => SdkRole::EventPlanner,
            Role::Admin => SdkRole::Admin,
        }
    }
}

impl From<SdkRole> for Role {
    fn from(value: SdkRole) -> Self {
        match value {
            SdkRole::RegularUser => Role::RegularUser,
            SdkRole::EventPlanner => Role::EventPlanner,
            SdkRole::Admin => Role::Admin,
        }
    }
}

/// Event status for database operations.
///
/// This is the sqlx::Type version. For API/DTO use, see `evently_sdk::objects::EventStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "event_status")]
pub enum EventStatus {
    Available,
    Free,
    Pending,
    Approved,
    Cancelled,
}

impl From<EventStatus> for SdkEventStatus {
    fn from(value: EventStatus) -> Self {
        match value {
            EventStatus::Available => SdkEventStatus::Available,
            EventStatus::Free => SdkEventStatus::Free,
            EventStatus::Pending => SdkEventStatus::Pending,
            EventStatus::Approved => SdkEventStatus::Approved,
            EventStatus::Cancelled => SdkEventStatus::Cancelled,
        }
    }
}

impl From<SdkEventStatus> for EventStatus {
    fn from(value: SdkEventStatus) -> Self {
        match value {
            SdkEventStatus::Available => EventStatus::Available,
            SdkEventStatus::Free => EventStatus::Free,
            SdkEventStatus::Pending => EventStatus::Pending,
            SdkEventStatus::Approved => EventStatus::Approved,
            SdkEventStatus::Cancelled => EventStatus::Cancelled,
        }
    }
}

/// Ticket type for database operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "ticket_type")]
pub enum TicketType {
    Regular,
    Vip,
    Free,
}

impl From<TicketType> for SdkTicketType {
    fn from(value: TicketType) -> Self {
        match value {
            TicketType::Regular => SdkTicketType::Regular,
            TicketType::Vip => SdkTicketType::Vip,
            TicketType::Free => SdkTicketType::Free,
        }
    }
}

impl From<SdkTicketType> for TicketType {
    fn from(value: SdkTicketType) -> Self {
        match value {
            SdkTicketType::Regular => TicketType::Regular,
            SdkTicketType::Vip => TicketType::Vip,
            SdkTicketType::Free => TicketType::Free,
        }
    }
}

/// Payment status for database operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "payment_status")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
    Abandoned,
}

impl From<PaymentStatus> for SdkPaymentStatus {
    fn from(value: PaymentStatus) -> Self {
        match value {
            PaymentStatus::Pending => SdkPaymentStatus::Pending,
            PaymentStatus::Success => SdkPaymentStatus::Success,
            PaymentStatus::Failed => SdkPaymentStatus::Failed,
            PaymentStatus::Abandoned => SdkPaymentStatus::Abandoned,
        }
    }
}

impl From<SdkPaymentStatus> for PaymentStatus {
    fn from(value: SdkPaymentStatus) -> Self {
        match value {
            SdkPaymentStatus::Pending => PaymentStatus::Pending,
            SdkPaymentStatus::Success => PaymentStatus::Success,
            SdkPaymentStatus::Failed => PaymentStatus::Failed,
            SdkPaymentStatus::Abandoned => PaymentStatus::Abandoned,
        }
    }
}

/// Webhook confirmation status for database operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "webhook_status")]
pub enum WebhookStatus {
    Pending,
    Received,
    Failed,
}

impl From<WebhookStatus> for SdkWebhookStatus {
    fn from(value: WebhookStatus) -> Self {
        match value {
            WebhookStatus::Pending => SdkWebhookStatus::Pending,
            WebhookStatus::Received => SdkWebhookStatus::Received,
            WebhookStatus::Failed => SdkWebhookStatus::Failed,
        }
    }
}

impl From<SdkWebhookStatus> for WebhookStatus {
    fn from(value: SdkWebhookStatus) -> Self {
        match value {
            SdkWebhookStatus::Pending => WebhookStatus::Pending,
            SdkWebhookStatus::Received => WebhookStatus::Received,
            SdkWebhookStatus::Failed => WebhookStatus::Failed,
        }
    }
}
