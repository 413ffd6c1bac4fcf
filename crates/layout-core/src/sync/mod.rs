//! Sync Layer
//!
//! Turns a `SavePlan` into server calls and collects what happened. The
//! client never touches the session: the report is applied afterwards by
//! `LayoutSession::finish_save`, so the await points hold no borrow of
//! editor state.

mod http;
mod plan;
mod traits;
mod wire;

pub use http::{HttpLayoutApi, CSRF_HEADER};
pub use plan::{PlannedOp, SavePlan};
pub use traits::LayoutApi;
pub use wire::{
    BulkItem, BulkSaveRequest, CreateItemRequest, IdMapping, LoadResponse, ServerEnvelope,
    ServerItemRef,
};

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::{LayoutItem, ParentRef};
use crate::error::{LayoutError, LayoutResult};

/// How a save is sent to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveStrategy {
    /// One create/update/delete call per change
    #[default]
    PerItem,
    /// A single `POST /layout/save` with the whole level
    Bulk,
}

/// Outcome of one planned operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpOutcome {
    pub op: PlannedOp,
    /// For creates, the mapping the server assigned
    pub result: LayoutResult<Option<IdMapping>>,
}

/// Everything the server said about a plan
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SaveReport {
    pub outcomes: Vec<OpOutcome>,
}

impl SaveReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn mappings(&self) -> Vec<IdMapping> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().copied().flatten())
            .collect()
    }
}

#[derive(Clone)]
pub struct SyncClient<A: LayoutApi> {
    api: A,
    strategy: SaveStrategy,
}

impl<A: LayoutApi> SyncClient<A> {
    pub fn new(api: A, strategy: SaveStrategy) -> Self {
        Self { api, strategy }
    }

    pub async fn load(&self, parent: ParentRef) -> LayoutResult<Vec<LayoutItem>> {
        let items = self.api.load_items(parent).await?;
        info!(count = items.len(), parent = %parent.query_value(), "loaded layout items");
        Ok(items)
    }

    /// Send every planned operation; failures are recorded, never thrown
    pub async fn execute(&self, plan: &SavePlan) -> SaveReport {
        info!(
            ops = plan.ops.len(),
            strategy = ?self.strategy,
            "saving layout"
        );
        let report = match self.strategy {
            SaveStrategy::PerItem => self.execute_per_item(plan).await,
            SaveStrategy::Bulk => self.execute_bulk(plan).await,
        };
        for outcome in &report.outcomes {
            if let Err(e) = &outcome.result {
                error!(op = %outcome.op.describe(), error = %e, "save operation failed");
            }
        }
        report
    }

    async fn execute_per_item(&self, plan: &SavePlan) -> SaveReport {
        let mut outcomes = Vec::with_capacity(plan.ops.len());
        for op in &plan.ops {
            let result = match op {
                PlannedOp::Create(item) => self
                    .api
                    .create_item(&CreateItemRequest::from(item))
                    .await
                    .and_then(|id| {
                        id.map(|new_id| Some(IdMapping { temp_id: item.id, new_id }))
                            .ok_or(LayoutError::MissingServerId(item.id))
                    }),
                PlannedOp::Update { id, patch, .. } => {
                    self.api.update_item(*id, patch).await.map(|_| None)
                }
                PlannedOp::Delete { id, .. } => self.api.delete_item(*id).await.map(|_| None),
            };
            outcomes.push(OpOutcome { op: op.clone(), result });
        }
        SaveReport { outcomes }
    }

    async fn execute_bulk(&self, plan: &SavePlan) -> SaveReport {
        let request = BulkSaveRequest::new(plan.parent, &plan.items);
        let result = self.api.save_layout(&request).await;

        let outcomes = plan
            .ops
            .iter()
            .map(|op| {
                let result = match (&result, op) {
                    (Err(e), _) => Err(e.clone()),
                    (Ok(mappings), PlannedOp::Create(item)) => mappings
                        .iter()
                        .find(|m| m.temp_id == item.id)
                        .copied()
                        .map(Some)
                        .ok_or(LayoutError::MissingServerId(item.id)),
                    (Ok(_), _) => Ok(None),
                };
                OpOutcome { op: op.clone(), result }
            })
            .collect();

        if let Ok(mappings) = &result {
            let unknown = mappings
                .iter()
                .filter(|m| !plan.creates().any(|item| item.id == m.temp_id))
                .count();
            if unknown > 0 {
                warn!(unknown, "bulk save returned ids for items that were not created");
            }
        }
        SaveReport { outcomes }
    }
}

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;
