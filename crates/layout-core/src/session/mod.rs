//! Layout Session
//!
//! All editor state for one hierarchy level: the item store, selection,
//! drag state, edit mode and the pending confirmation. The UI owns exactly
//! one session and changes it only through `dispatch` and the save methods.

mod command;
mod save;

pub use command::{ConfirmRequest, EditorCommand, NavTarget, Outcome, PendingAction};
pub use save::SaveSummary;

use tracing::{debug, info};

use crate::domain::{validate_child, HierarchyLevel, ItemId, ItemPatch, ItemType, LayoutItem};
use crate::drag::{DragBounds, DragController, PointerPoint};
use crate::error::{LayoutError, LayoutResult};
use crate::geometry::GridSettings;
use crate::selection::Selection;
use crate::store::ItemStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    View,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutSession {
    level: HierarchyLevel,
    grid: GridSettings,
    store: ItemStore,
    selection: Selection,
    drag: DragController,
    mode: EditMode,
    has_unsaved_changes: bool,
    pending: Option<PendingAction>,
    saving: bool,
}

impl LayoutSession {
    pub fn new(level: HierarchyLevel, grid: GridSettings) -> Self {
        Self {
            level,
            grid,
            ..Self::default()
        }
    }

    /// Replace the level's items with server data and return to view mode
    pub fn load(&mut self, items: Vec<LayoutItem>) {
        info!(count = items.len(), parent = %self.level.parent.query_value(), "session loaded");
        self.store.load(items);
        self.exit_edit();
    }

    pub fn level(&self) -> &HierarchyLevel {
        &self.level
    }

    pub fn grid(&self) -> &GridSettings {
        &self.grid
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn items(&self) -> &[LayoutItem] {
        self.store.items()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Edit
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.selection.selected()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn dragging_id(&self) -> Option<ItemId> {
        self.drag.dragging_id()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn can_save(&self) -> bool {
        self.is_editing() && !self.saving
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    /// Rows the canvas spans right now
    pub fn rows(&self) -> u32 {
        self.grid.rows(&self.store.occupied(None))
    }

    /// Message for the browser's leave-page prompt
    pub fn leave_warning(&self) -> Option<&'static str> {
        self.has_unsaved_changes
            .then_some("You have unsaved changes that will be lost if you leave.")
    }

    pub fn dispatch(&mut self, command: EditorCommand) -> LayoutResult<Outcome> {
        debug!(?command, mode = ?self.mode, "dispatch");
        match command {
            EditorCommand::EnterEdit => Ok(self.enter_edit()),
            EditorCommand::Cancel => self.cancel(),
            EditorCommand::SelectItem(id) => self.select(id),
            EditorCommand::Deselect => Ok(Outcome::changed(self.selection.clear().is_some())),
            EditorCommand::AddItem(item_type) => self.add_item(item_type),
            EditorCommand::BeginDrag { id, pointer } => self.begin_drag(id, pointer),
            EditorCommand::PointerMove(pointer) => self.pointer_move(pointer),
            EditorCommand::PointerUp => Ok(self.pointer_up()),
            EditorCommand::Rename { id, name } => self.rename(id, &name),
            EditorCommand::RemoveSelected => self.remove_selected(),
            EditorCommand::Reset => self.reset(),
            EditorCommand::Open(id) => self.open(id),
            EditorCommand::Back => {
                let target = NavTarget::Url(self.level.back_href());
                self.navigate(target)
            }
            EditorCommand::Confirm => self.confirm(),
            EditorCommand::Dismiss => Ok(Outcome::changed(self.pending.take().is_some())),
        }
    }

    fn enter_edit(&mut self) -> Outcome {
        if self.is_editing() {
            return Outcome::Unchanged;
        }
        self.store.snapshot();
        self.mode = EditMode::Edit;
        self.has_unsaved_changes = false;
        info!("entered edit mode");
        Outcome::Changed
    }

    fn exit_edit(&mut self) {
        if self.is_editing() {
            info!("left edit mode");
        }
        self.mode = EditMode::View;
        self.selection.clear();
        self.drag.cancel();
        self.has_unsaved_changes = false;
        self.pending = None;
    }

    fn discard_and_exit(&mut self) {
        self.store.revert_to_snapshot();
        self.exit_edit();
    }

    fn require_edit(&self) -> LayoutResult<()> {
        if self.is_editing() {
            Ok(())
        } else {
            Err(LayoutError::NotInEditMode)
        }
    }

    fn require_idle(&self) -> LayoutResult<()> {
        if self.saving {
            Err(LayoutError::SaveInProgress)
        } else {
            Ok(())
        }
    }

    fn ask(&mut self, action: PendingAction) -> LayoutResult<Outcome> {
        let request = action.confirm_request();
        debug!(?action, "awaiting confirmation");
        self.pending = Some(action);
        Ok(Outcome::NeedsConfirmation(request))
    }

    fn cancel(&mut self) -> LayoutResult<Outcome> {
        if !self.is_editing() {
            return Ok(Outcome::Unchanged);
        }
        self.require_idle()?;
        if self.has_unsaved_changes {
            return self.ask(PendingAction::DiscardAndExit);
        }
        self.discard_and_exit();
        Ok(Outcome::Changed)
    }

    fn select(&mut self, id: ItemId) -> LayoutResult<Outcome> {
        if !self.is_editing() {
            return Ok(Outcome::Unchanged);
        }
        if !self.store.contains(id) {
            return Err(LayoutError::ItemNotFound(id));
        }
        let was_selected = self.selection.is_selected(id);
        self.selection.select(id);
        Ok(Outcome::changed(!was_selected))
    }

    fn add_item(&mut self, item_type: ItemType) -> LayoutResult<Outcome> {
        self.require_edit()?;
        validate_child(self.level.parent_kind, item_type)?;

        let (width, height) = item_type.footprint();
        let cell = self
            .grid
            .find_empty_position(width, height, &self.store.occupied(None));
        let temp = self.store.next_temp_id();
        let item = LayoutItem::new_temporary(temp, item_type, self.level.parent, cell);
        let id = item.id;
        self.store.add(item)?;
        self.selection.select(id);
        self.has_unsaved_changes = true;
        info!(%id, %item_type, x = cell.x, y = cell.y, "added item");
        Ok(Outcome::Changed)
    }

    fn begin_drag(&mut self, id: ItemId, pointer: PointerPoint) -> LayoutResult<Outcome> {
        if !self.is_editing() {
            return Ok(Outcome::Unchanged);
        }
        let origin = self.store.get(id).ok_or(LayoutError::ItemNotFound(id))?.cell();
        self.drag.begin(id, pointer, origin);
        self.selection.select(id);
        debug!(%id, x = origin.x, y = origin.y, "drag started");
        Ok(Outcome::Changed)
    }

    fn pointer_move(&mut self, pointer: PointerPoint) -> LayoutResult<Outcome> {
        let Some(id) = self.drag.dragging_id() else {
            return Ok(Outcome::Unchanged);
        };
        let Some(item) = self.store.get(id) else {
            self.drag.cancel();
            return Ok(Outcome::Unchanged);
        };
        let rect = item.rect();
        let bounds = DragBounds {
            cell_width_px: self.grid.cell_width_px,
            cell_height_px: self.grid.cell_height_px,
            columns: self.grid.columns,
            rows: self.rows(),
            item_width: rect.width,
            item_height: rect.height,
        };
        let Some((id, cell)) = self.drag.candidate(pointer, &bounds) else {
            return Ok(Outcome::Unchanged);
        };

        let target = rect.at(cell);
        if self.store.occupied(Some(id)).iter().any(|r| r.overlaps(&target)) {
            return Ok(Outcome::Unchanged);
        }

        self.store.update(id, &ItemPatch::move_to(cell))?;
        self.drag.commit(cell);
        self.has_unsaved_changes = true;
        Ok(Outcome::Changed)
    }

    fn pointer_up(&mut self) -> Outcome {
        match self.drag.end() {
            Some(end) => {
                debug!(
                    id = %end.id,
                    x = end.cell.x,
                    y = end.cell.y,
                    moved = end.moved(),
                    "drag ended"
                );
                Outcome::changed(end.moved())
            }
            None => Outcome::Unchanged,
        }
    }

    fn rename(&mut self, id: ItemId, name: &str) -> LayoutResult<Outcome> {
        self.require_edit()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(LayoutError::EmptyName);
        }
        let changed = self.store.update(id, &ItemPatch::rename(name))?;
        if changed {
            self.has_unsaved_changes = true;
            info!(%id, name, "renamed item");
        }
        Ok(Outcome::changed(changed))
    }

    fn remove_selected(&mut self) -> LayoutResult<Outcome> {
        self.require_edit()?;
        let id = self.selection.selected().ok_or(LayoutError::NothingSelected)?;
        let item = self.store.get(id).ok_or(LayoutError::ItemNotFound(id))?;
        if item.is_container() {
            return self.ask(PendingAction::Remove(id));
        }
        self.remove_item(id)
    }

    fn remove_item(&mut self, id: ItemId) -> LayoutResult<Outcome> {
        let item = self.store.remove(id)?;
        self.selection.forget(id);
        if self.drag.dragging_id() == Some(id) {
            self.drag.cancel();
        }
        self.has_unsaved_changes = true;
        info!(%id, name = %item.name, "removed item");
        Ok(Outcome::Changed)
    }

    fn reset(&mut self) -> LayoutResult<Outcome> {
        self.require_edit()?;
        if self.store.is_empty() {
            return Ok(Outcome::Unchanged);
        }
        self.ask(PendingAction::ResetLayout)
    }

    fn clear_level(&mut self) -> Outcome {
        let removed = self.store.clear();
        self.selection.clear();
        self.drag.cancel();
        if removed > 0 {
            self.has_unsaved_changes = true;
        }
        info!(removed, "layout reset");
        Outcome::changed(removed > 0)
    }

    fn open(&mut self, id: ItemId) -> LayoutResult<Outcome> {
        if self.is_editing() {
            return Ok(Outcome::Unchanged);
        }
        let item = self.store.get(id).ok_or(LayoutError::ItemNotFound(id))?;
        match (item.is_container(), item.id.server_id()) {
            (true, Some(server_id)) => self.navigate(NavTarget::Level(server_id)),
            _ => Ok(Outcome::Unchanged),
        }
    }

    /// Leave the level, asking first when there are unsaved changes
    fn navigate(&mut self, target: NavTarget) -> LayoutResult<Outcome> {
        self.require_idle()?;
        if self.has_unsaved_changes {
            return self.ask(PendingAction::Navigate(target));
        }
        if self.is_editing() {
            self.discard_and_exit();
        }
        Ok(Outcome::Navigate(target))
    }

    fn confirm(&mut self) -> LayoutResult<Outcome> {
        let action = self.pending.take().ok_or(LayoutError::NoPendingAction)?;
        debug!(?action, "confirmed");
        match action {
            PendingAction::DiscardAndExit => {
                self.require_idle()?;
                self.discard_and_exit();
                Ok(Outcome::Changed)
            }
            PendingAction::Remove(id) => self.remove_item(id),
            PendingAction::ResetLayout => Ok(self.clear_level()),
            PendingAction::Navigate(target) => {
                self.require_idle()?;
                if self.is_editing() {
                    self.discard_and_exit();
                }
                Ok(Outcome::Navigate(target))
            }
        }
    }
}
