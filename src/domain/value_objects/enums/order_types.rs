use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Product type of a single order item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemType {
    Magnet,
    Polaroid,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Magnet => "MAGNET",
            ItemType::Polaroid => "POLAROID",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "MAGNET" => Some(ItemType::Magnet),
            "POLAROID" => Some(ItemType::Polaroid),
            _ => None,
        }
    }
}

impl Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived order-level label. Informational only, never gates behavior.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Magnet,
    Polaroid,
    Mixed,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Magnet => "MAGNET",
            OrderType::Polaroid => "POLAROID",
            OrderType::Mixed => "MIXED",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "MAGNET" => Some(OrderType::Magnet),
            "POLAROID" => Some(OrderType::Polaroid),
            "MIXED" => Some(OrderType::Mixed),
            _ => None,
        }
    }

    /// The single shared item type, or MIXED when items disagree.
    pub fn derive(item_types: &[ItemType]) -> OrderType {
        let mut iter = item_types.iter();
        match iter.next() {
            Some(first) if iter.all(|t| t == first) => match first {
                ItemType::Magnet => OrderType::Magnet,
                ItemType::Polaroid => OrderType::Polaroid,
            },
            Some(_) => OrderType::Mixed,
            None => OrderType::Magnet,
        }
    }
}

impl Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_single_type() {
        assert_eq!(
            OrderType::derive(&[ItemType::Magnet, ItemType::Magnet]),
            OrderType::Magnet
        );
        assert_eq!(OrderType::derive(&[ItemType::Polaroid]), OrderType::Polaroid);
    }

    #[test]
    fn test_derive_mixed() {
        assert_eq!(
            OrderType::derive(&[ItemType::Magnet, ItemType::Polaroid]),
            OrderType::Mixed
        );
    }
}
