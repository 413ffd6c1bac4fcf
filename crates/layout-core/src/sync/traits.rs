//! Sync Layer - Server API Trait
//!
//! The abstract interface to the layout endpoints. The HTTP implementation
//! talks to the real server; tests use an in-memory one.

use std::rc::Rc;

use async_trait::async_trait;

use super::wire::{BulkSaveRequest, CreateItemRequest, IdMapping};
use crate::domain::{ItemPatch, LayoutItem, ParentRef};
use crate::error::LayoutResult;

/// Server operations used by the editor
///
/// Futures are not `Send`: the browser runs everything on one thread.
#[async_trait(?Send)]
pub trait LayoutApi {
    /// Children of a parent (Root = buildings)
    async fn load_items(&self, parent: ParentRef) -> LayoutResult<Vec<LayoutItem>>;

    /// Create an item; returns the server id the response carried, if any
    async fn create_item(&self, request: &CreateItemRequest) -> LayoutResult<Option<u64>>;

    async fn update_item(&self, id: u64, patch: &ItemPatch) -> LayoutResult<()>;

    async fn delete_item(&self, id: u64) -> LayoutResult<()>;

    /// Replace a level's children in one call
    async fn save_layout(&self, request: &BulkSaveRequest) -> LayoutResult<Vec<IdMapping>>;
}

#[async_trait(?Send)]
impl<T: LayoutApi + ?Sized> LayoutApi for Rc<T> {
    async fn load_items(&self, parent: ParentRef) -> LayoutResult<Vec<LayoutItem>> {
        (**self).load_items(parent).await
    }

    async fn create_item(&self, request: &CreateItemRequest) -> LayoutResult<Option<u64>> {
        (**self).create_item(request).await
    }

    async fn update_item(&self, id: u64, patch: &ItemPatch) -> LayoutResult<()> {
        (**self).update_item(id, patch).await
    }

    async fn delete_item(&self, id: u64) -> LayoutResult<()> {
        (**self).delete_item(id).await
    }

    async fn save_layout(&self, request: &BulkSaveRequest) -> LayoutResult<Vec<IdMapping>> {
        (**self).save_layout(request).await
    }
}
