//! In-memory `LayoutApi` for tests

use std::cell::{Cell as StdCell, RefCell};
use std::collections::HashSet;

use async_trait::async_trait;

use super::traits::LayoutApi;
use super::wire::{BulkSaveRequest, CreateItemRequest, IdMapping};
use crate::domain::{ItemId, ItemPatch, LayoutItem, ParentRef};
use crate::error::{LayoutError, LayoutResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Load(ParentRef),
    Create(CreateItemRequest),
    Update(u64, ItemPatch),
    Delete(u64),
    Bulk(BulkSaveRequest),
}

#[derive(Default)]
pub struct FakeLayoutApi {
    pub items: RefCell<Vec<LayoutItem>>,
    pub calls: RefCell<Vec<Call>>,
    pub next_id: StdCell<u64>,
    pub fail_ids: RefCell<HashSet<u64>>,
    pub fail_creates: StdCell<bool>,
    pub omit_created_id: StdCell<bool>,
    /// Server id handed to every create, to force collisions
    pub fixed_new_id: StdCell<Option<u64>>,
}

impl FakeLayoutApi {
    pub fn with_items(items: Vec<LayoutItem>) -> Self {
        let next = items.iter().filter_map(|i| i.id.server_id()).max().unwrap_or(0) + 100;
        let api = Self::default();
        *api.items.borrow_mut() = items;
        api.next_id.set(next);
        api
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    fn issue_id(&self) -> u64 {
        if let Some(id) = self.fixed_new_id.get() {
            return id;
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn check(&self, id: u64) -> LayoutResult<()> {
        if self.fail_ids.borrow().contains(&id) {
            Err(LayoutError::Server {
                status: 500,
                message: format!("Server error: item {}", id),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait(?Send)]
impl LayoutApi for FakeLayoutApi {
    async fn load_items(&self, parent: ParentRef) -> LayoutResult<Vec<LayoutItem>> {
        self.calls.borrow_mut().push(Call::Load(parent));
        Ok(self
            .items
            .borrow()
            .iter()
            .filter(|i| i.parent_id == parent.server_id())
            .cloned()
            .collect())
    }

    async fn create_item(&self, request: &CreateItemRequest) -> LayoutResult<Option<u64>> {
        self.calls.borrow_mut().push(Call::Create(request.clone()));
        if self.fail_creates.get() {
            return Err(LayoutError::Transport("connection reset".into()));
        }
        let id = self.issue_id();
        self.items.borrow_mut().push(LayoutItem {
            id: ItemId::Persisted(id),
            name: request.name.clone(),
            item_type: request.item_type,
            parent_id: request.parent_id,
            position_x: request.position_x,
            position_y: request.position_y,
            width: request.width,
            height: request.height,
            status: None,
        });
        Ok((!self.omit_created_id.get()).then_some(id))
    }

    async fn update_item(&self, id: u64, patch: &ItemPatch) -> LayoutResult<()> {
        self.calls.borrow_mut().push(Call::Update(id, patch.clone()));
        self.check(id)?;
        let mut items = self.items.borrow_mut();
        if let Some(item) = items.iter_mut().find(|i| i.id == ItemId::Persisted(id)) {
            item.apply(patch);
        }
        Ok(())
    }

    async fn delete_item(&self, id: u64) -> LayoutResult<()> {
        self.calls.borrow_mut().push(Call::Delete(id));
        self.check(id)?;
        self.items.borrow_mut().retain(|i| i.id != ItemId::Persisted(id));
        Ok(())
    }

    async fn save_layout(&self, request: &BulkSaveRequest) -> LayoutResult<Vec<IdMapping>> {
        self.calls.borrow_mut().push(Call::Bulk(request.clone()));
        if self.fail_creates.get() {
            return Err(LayoutError::Transport("connection reset".into()));
        }
        Ok(request
            .items
            .iter()
            .filter_map(|i| i.temp_id)
            .map(|temp_id| IdMapping {
                temp_id,
                new_id: self.issue_id(),
            })
            .collect())
    }
}
