use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    #[default]
    New,
    Accepted,
    Rejected,
    Cancelled,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Rejected => "REJECTED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Completed => "COMPLETED",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "NEW" => Some(OrderStatus::New),
            "ACCEPTED" => Some(OrderStatus::Accepted),
            "REJECTED" => Some(OrderStatus::Rejected),
            "CANCELLED" => Some(OrderStatus::Cancelled),
            "COMPLETED" => Some(OrderStatus::Completed),
            _ => None,
        }
    }

    /// Statuses that count as closed for listing and reporting.
    pub const TERMINAL: [OrderStatus; 3] = [
        OrderStatus::Completed,
        OrderStatus::Rejected,
        OrderStatus::Cancelled,
    ];

    /// NEW -> ACCEPTED | REJECTED | CANCELLED,
    /// ACCEPTED -> COMPLETED | CANCELLED.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match (self, next) {
            (OrderStatus::New, OrderStatus::Accepted)
            | (OrderStatus::New, OrderStatus::Rejected)
            | (OrderStatus::New, OrderStatus::Cancelled)
            | (OrderStatus::Accepted, OrderStatus::Completed)
            | (OrderStatus::Accepted, OrderStatus::Cancelled) => true,
            _ => false,
        }
    }

    /// A user may cancel unless the order already reached a closed state.
    pub fn user_cancellable(&self) -> bool {
        !matches!(
            self,
            OrderStatus::Completed | OrderStatus::Cancelled | OrderStatus::Rejected
        )
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_transitions_only_from_new() {
        assert!(OrderStatus::New.can_transition_to(OrderStatus::Accepted));
        assert!(OrderStatus::New.can_transition_to(OrderStatus::Rejected));
        assert!(!OrderStatus::Accepted.can_transition_to(OrderStatus::Rejected));
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Accepted));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Accepted));
    }

    #[test]
    fn test_completed_only_from_accepted() {
        assert!(OrderStatus::Accepted.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::New.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::Rejected.can_transition_to(OrderStatus::Completed));
    }

    #[test]
    fn test_cancelled_from_open_states_only() {
        assert!(OrderStatus::New.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Accepted.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Rejected.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn test_user_cancellable() {
        assert!(OrderStatus::New.user_cancellable());
        assert!(OrderStatus::Accepted.user_cancellable());
        assert!(!OrderStatus::Completed.user_cancellable());
        assert!(!OrderStatus::Cancelled.user_cancellable());
        assert!(!OrderStatus::Rejected.user_cancellable());
    }
}
