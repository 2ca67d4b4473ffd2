//! Record shapes that only exist on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use grocerease_core::{CartLine, RecordId, UserId};

/// A user's cart as stored under `/carts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRecord {
    /// Assigned by the store on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user_id: UserId,
    #[serde(default)]
    pub items: Vec<CartLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CartRecord {
    /// A record for `user_id` holding `items`, stamped now.
    #[must_use]
    pub fn new(user_id: UserId, items: Vec<CartLine>) -> Self {
        Self {
            id: None,
            user_id,
            items,
            updated_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_items_decode_as_empty() {
        let record: CartRecord = serde_json::from_str(r#"{"id": "c9", "userId": 4}"#).unwrap();
        assert_eq!(record.id, Some(RecordId::Text("c9".to_string())));
        assert!(record.items.is_empty());
        assert!(record.updated_at.is_none());
    }

    #[test]
    fn test_new_record_omits_id() {
        let json = serde_json::to_value(CartRecord::new(UserId::new(4), Vec::new())).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["userId"], serde_json::json!(4));
        assert!(json["updatedAt"].is_string());
    }
}
