//! Saving
//!
//! `begin_save` plans the batch and marks it in flight; the caller runs it
//! through a `SyncClient` and hands the report to `finish_save`. Only
//! `reconcile_ids` ever rewrites a temporary id.

use std::collections::HashSet;

use tracing::{error, info, warn};

use super::LayoutSession;
use crate::domain::ItemId;
use crate::error::{LayoutError, LayoutResult};
use crate::store::SyncedChange;
use crate::sync::{IdMapping, PlannedOp, SavePlan, SaveReport};

/// What a finished save did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveSummary {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    /// Operation description and the error it failed with
    pub failures: Vec<(String, LayoutError)>,
}

impl SaveSummary {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failure_message(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        Some(
            self.failures
                .iter()
                .map(|(op, e)| format!("{}: {}", op, e))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

impl LayoutSession {
    /// Plan the changes since the snapshot and mark a save in flight
    pub fn begin_save(&mut self) -> LayoutResult<SavePlan> {
        self.require_edit()?;
        if self.saving {
            return Err(LayoutError::SaveInProgress);
        }
        let plan = SavePlan::build(&self.store, self.level.parent)?;
        self.saving = true;
        info!(
            creates = plan.creates().count(),
            updates = plan.update_count(),
            deletes = plan.delete_count(),
            "save started"
        );
        Ok(plan)
    }

    /// Swap temporary ids for server ids in the store, selection and drag
    ///
    /// Every mapping is checked before any is applied; on error nothing
    /// changes. A mapping whose item was removed meanwhile is skipped.
    pub fn reconcile_ids(&mut self, mappings: &[IdMapping]) -> LayoutResult<()> {
        let mut temps = HashSet::new();
        let mut new_ids = HashSet::new();
        for mapping in mappings {
            if !mapping.temp_id.is_temporary() || !temps.insert(mapping.temp_id) {
                return Err(LayoutError::UnknownTempId(mapping.temp_id));
            }
            if self.store.knows_server_id(mapping.new_id) || !new_ids.insert(mapping.new_id) {
                return Err(LayoutError::IdCollision(mapping.new_id));
            }
        }

        for mapping in mappings {
            let new = ItemId::Persisted(mapping.new_id);
            if self.store.contains(mapping.temp_id) {
                self.store.replace_id(mapping.temp_id, new)?;
            } else {
                warn!(
                    temp = %mapping.temp_id,
                    new_id = mapping.new_id,
                    "created item no longer in the layout"
                );
            }
            self.selection.remap(mapping.temp_id, new);
            self.drag.remap(mapping.temp_id, new);
        }
        Ok(())
    }

    /// Apply a save report
    ///
    /// Successful operations advance the snapshot, and creates with a valid
    /// server id are reconciled even when another create in the batch came
    /// back without one; that create stays temporary and its error is
    /// returned. If the mappings themselves are inconsistent no id is
    /// remapped and no create is recorded. The session leaves edit mode only
    /// when nothing failed and nothing is left to save.
    pub fn finish_save(&mut self, report: SaveReport) -> LayoutResult<SaveSummary> {
        if !self.saving {
            return Err(LayoutError::NotSaving);
        }
        self.saving = false;

        let (remapped, mut fatal) = match self.reconcile_ids(&report.mappings()) {
            Ok(()) => (true, None),
            Err(e) => (false, Some(e)),
        };
        if fatal.is_none() {
            fatal = report
                .outcomes
                .iter()
                .find_map(|o| o.result.as_ref().err().filter(|e| e.is_reconciliation()).cloned());
        }

        let mut summary = SaveSummary::default();
        for outcome in report.outcomes {
            match (outcome.op, outcome.result) {
                (PlannedOp::Create(mut item), Ok(Some(mapping))) if remapped => {
                    item.id = ItemId::Persisted(mapping.new_id);
                    self.store.mark_synced(SyncedChange::Created(item));
                    summary.created += 1;
                }
                (PlannedOp::Create(_), Ok(Some(_))) => {}
                (PlannedOp::Update { item, .. }, Ok(_)) => {
                    self.store.mark_synced(SyncedChange::Updated(item));
                    summary.updated += 1;
                }
                (PlannedOp::Delete { id, .. }, Ok(_)) => {
                    self.store.mark_synced(SyncedChange::Deleted(id));
                    summary.deleted += 1;
                }
                (op, Err(e)) => summary.failures.push((op.describe(), e)),
                (op @ PlannedOp::Create(_), Ok(None)) => {
                    let missing = LayoutError::Decode("missing id mapping".into());
                    summary.failures.push((op.describe(), missing))
                }
            }
        }

        if let Some(e) = fatal {
            error!(error = %e, created = summary.created, "save aborted, ids not reconciled");
            self.has_unsaved_changes = true;
            return Err(e);
        }

        // edits made while the request was in flight are still pending
        self.has_unsaved_changes = SavePlan::build(&self.store, self.level.parent)
            .map(|plan| !plan.is_empty())
            .unwrap_or(true);

        if summary.is_complete() && !self.has_unsaved_changes {
            self.exit_edit();
        }
        info!(
            created = summary.created,
            updated = summary.updated,
            deleted = summary.deleted,
            failed = summary.failures.len(),
            "save finished"
        );
        Ok(summary)
    }
}
