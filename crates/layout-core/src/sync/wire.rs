//! Wire Format
//!
//! Request bodies and response envelopes of the layout endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::{ItemId, ItemType, LayoutItem, ParentRef};
use crate::error::{LayoutError, LayoutResult};

/// Body of `POST /layout/items`
///
/// Carries no id: a temporary id never leaves the client except as the
/// `temp_id` of a bulk save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub item_type: ItemType,
    pub parent_id: Option<u64>,
    pub position_x: u32,
    pub position_y: u32,
    pub width: u32,
    pub height: u32,
}

impl From<&LayoutItem> for CreateItemRequest {
    fn from(item: &LayoutItem) -> Self {
        Self {
            name: item.name.clone(),
            item_type: item.item_type,
            parent_id: item.parent_id,
            position_x: item.position_x,
            position_y: item.position_y,
            width: item.width,
            height: item.height,
        }
    }
}

/// One item of a bulk save: persisted items carry `id`, new ones `temp_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_id: Option<ItemId>,
    pub name: String,
    pub item_type: ItemType,
    pub parent_id: Option<u64>,
    pub position_x: u32,
    pub position_y: u32,
    pub width: u32,
    pub height: u32,
}

impl From<&LayoutItem> for BulkItem {
    fn from(item: &LayoutItem) -> Self {
        Self {
            id: item.id.server_id(),
            temp_id: item.id.is_temporary().then_some(item.id),
            name: item.name.clone(),
            item_type: item.item_type,
            parent_id: item.parent_id,
            position_x: item.position_x,
            position_y: item.position_y,
            width: item.width,
            height: item.height,
        }
    }
}

/// Body of `POST /layout/save`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkSaveRequest {
    pub parent_id: ParentRef,
    pub items: Vec<BulkItem>,
}

impl BulkSaveRequest {
    pub fn new(parent_id: ParentRef, items: &[LayoutItem]) -> Self {
        Self {
            parent_id,
            items: items.iter().map(BulkItem::from).collect(),
        }
    }
}

/// Temporary id → server id, as returned by a save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdMapping {
    pub temp_id: ItemId,
    pub new_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerItemRef {
    #[serde(default)]
    pub id: Option<u64>,
}

/// Common shape of every mutating response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub item: Option<ServerItemRef>,
    #[serde(default)]
    pub new_ids: Option<Vec<IdMapping>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ServerEnvelope {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    /// The server's own explanation, if it gave one
    pub fn reason(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }

    /// Check an HTTP status plus the envelope's `status` field
    pub fn into_result(self, http_status: u16) -> LayoutResult<Self> {
        let ok_status = (200..300).contains(&http_status);
        if ok_status && self.is_success() {
            return Ok(self);
        }
        let message = match self.reason() {
            Some(reason) => reason.to_string(),
            None if !ok_status => format!("Server error: {}", http_status),
            None => format!(
                "Server reported status '{}'",
                self.status.as_deref().unwrap_or("missing")
            ),
        };
        Err(LayoutError::Server {
            status: http_status,
            message,
        })
    }
}

/// `GET /layout/items` answers `{items: [...]}`; older servers send a bare array
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LoadResponse {
    Wrapped { items: Vec<LayoutItem> },
    Bare(Vec<LayoutItem>),
}

impl LoadResponse {
    pub fn into_items(self) -> Vec<LayoutItem> {
        match self {
            LoadResponse::Wrapped { items } | LoadResponse::Bare(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_has_no_id() {
        let item = LayoutItem::new_temporary(
            4,
            ItemType::Floor,
            ParentRef::Item(2),
            crate::geometry::Cell::new(0, 0),
        );
        let json = serde_json::to_value(CreateItemRequest::from(&item)).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["parent_id"], 2);
        assert_eq!(json["item_type"], "floor");
    }

    #[test]
    fn test_bulk_item_keeps_temp_id_out_of_id() {
        let mut persisted = LayoutItem::new_temporary(
            1,
            ItemType::Room,
            ParentRef::Item(2),
            crate::geometry::Cell::new(0, 0),
        );
        persisted.id = ItemId::Persisted(8);
        let fresh = LayoutItem::new_temporary(
            3,
            ItemType::Room,
            ParentRef::Item(2),
            crate::geometry::Cell::new(1, 0),
        );

        let request = BulkSaveRequest::new(ParentRef::Item(2), &[persisted, fresh]);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["items"][0]["id"], 8);
        assert!(json["items"][0].get("temp_id").is_none());
        assert!(json["items"][1].get("id").is_none());
        assert_eq!(json["items"][1]["temp_id"], "tmp-3");
    }

    #[test]
    fn test_envelope_success_and_failure() {
        let ok: ServerEnvelope =
            serde_json::from_str(r#"{"status":"success","item":{"id":31}}"#).unwrap();
        let ok = ok.into_result(200).unwrap();
        assert_eq!(ok.item.unwrap().id, Some(31));

        let soft: ServerEnvelope =
            serde_json::from_str(r#"{"status":"error","message":"Name taken"}"#).unwrap();
        assert_eq!(
            soft.into_result(200).unwrap_err(),
            LayoutError::Server { status: 200, message: "Name taken".into() }
        );

        let hard = ServerEnvelope::default().into_result(500).unwrap_err();
        assert_eq!(hard.to_string(), "Server error: 500");
    }

    #[test]
    fn test_new_ids_parse_temp_tokens() {
        let json = r#"{"status":"success","new_ids":[{"temp_id":"tmp-2","new_id":40}]}"#;
        let env: ServerEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(
            env.new_ids.unwrap(),
            vec![IdMapping { temp_id: ItemId::Temporary(2), new_id: 40 }]
        );
    }

    #[test]
    fn test_load_response_shapes() {
        let json = r#"{"items":[{"id":1,"name":"HQ","item_type":"building"}]}"#;
        let wrapped: LoadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(wrapped.into_items().len(), 1);
        let bare: LoadResponse = serde_json::from_str(r#"[]"#).unwrap();
        assert!(bare.into_items().is_empty());
    }
}
