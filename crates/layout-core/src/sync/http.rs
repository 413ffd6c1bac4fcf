//! HTTP Layout API
//!
//! `LayoutApi` over the server's JSON endpoints using reqwest (fetch on
//! WASM). Loaded levels are cached per parent; any mutation invalidates the
//! cache so the next load sees fresh data.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use tracing::{debug, warn};

use super::traits::LayoutApi;
use super::wire::{BulkSaveRequest, CreateItemRequest, IdMapping, LoadResponse, ServerEnvelope};
use crate::domain::{ItemPatch, LayoutItem, ParentRef};
use crate::error::{LayoutError, LayoutResult};

/// Header the server reads the CSRF token from
pub const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Clone)]
pub struct HttpLayoutApi {
    client: Client,
    base_url: String,
    csrf_token: Option<String>,
    cache: Rc<RefCell<HashMap<ParentRef, Vec<LayoutItem>>>>,
}

impl HttpLayoutApi {
    /// `base_url` must be absolute (e.g. the page origin)
    pub fn new(base_url: impl Into<String>, csrf_token: Option<String>) -> Self {
        if csrf_token.is_none() {
            warn!("CSRF token not found; mutating requests will likely be rejected");
        }
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            csrf_token,
            cache: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Drop cached items for one parent, or all of them
    pub fn clear_cache(&self, parent: Option<ParentRef>) {
        let mut cache = self.cache.borrow_mut();
        match parent {
            Some(parent) => {
                cache.remove(&parent);
            }
            None => cache.clear(),
        }
    }

    fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
        #[cfg(target_arch = "wasm32")]
        let builder = builder.fetch_credentials_same_origin();
        builder
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> LayoutResult<ServerEnvelope> {
        let url = self.url(path);
        debug!(%url, "POST");

        let mut builder = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        if let Some(token) = &self.csrf_token {
            builder = builder.header(CSRF_HEADER, token);
        }

        let response = Self::with_credentials(builder)
            .send()
            .await
            .map_err(|e| LayoutError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LayoutError::Transport(e.to_string()))?;

        // error pages are often HTML; keep the status code as the message then
        let envelope = match serde_json::from_str::<ServerEnvelope>(&text) {
            Ok(envelope) => envelope,
            Err(e) if (200..300).contains(&status) => {
                return Err(LayoutError::Decode(e.to_string()))
            }
            Err(_) => ServerEnvelope::default(),
        };
        envelope.into_result(status)
    }
}

#[async_trait(?Send)]
impl LayoutApi for HttpLayoutApi {
    async fn load_items(&self, parent: ParentRef) -> LayoutResult<Vec<LayoutItem>> {
        if let Some(items) = self.cache.borrow().get(&parent) {
            debug!(parent = %parent.query_value(), "using cached items");
            return Ok(items.clone());
        }

        let builder = self
            .client
            .get(self.url("/layout/items"))
            .query(&[("parent_id", parent.query_value())])
            .header(CACHE_CONTROL, "no-cache");
        let response = Self::with_credentials(builder)
            .send()
            .await
            .map_err(|e| LayoutError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LayoutError::Server {
                status: status.as_u16(),
                message: format!("Failed to load layout data: {}", status),
            });
        }

        let items = response
            .json::<LoadResponse>()
            .await
            .map_err(|e| LayoutError::Decode(e.to_string()))?
            .into_items();
        self.cache.borrow_mut().insert(parent, items.clone());
        Ok(items)
    }

    async fn create_item(&self, request: &CreateItemRequest) -> LayoutResult<Option<u64>> {
        let result = self.post("/layout/items", request).await;
        self.clear_cache(Some(ParentRef::from_server_id(request.parent_id)));
        Ok(result?.item.and_then(|item| item.id))
    }

    async fn update_item(&self, id: u64, patch: &ItemPatch) -> LayoutResult<()> {
        let result = self.post(&format!("/layout/items/{}", id), patch).await;
        self.clear_cache(None);
        result.map(|_| ())
    }

    async fn delete_item(&self, id: u64) -> LayoutResult<()> {
        let result = self
            .post(&format!("/layout/items/{}/delete", id), &serde_json::json!({}))
            .await;
        self.clear_cache(None);
        result.map(|_| ())
    }

    async fn save_layout(&self, request: &BulkSaveRequest) -> LayoutResult<Vec<IdMapping>> {
        let result = self.post("/layout/save", request).await;
        self.clear_cache(Some(request.parent_id));
        Ok(result?.new_ids.unwrap_or_default())
    }
}
