//! Editor Context
//!
//! Shared state provided via Leptos Context API: the layout session, the
//! sync client and the UI store, plus the glue that runs commands and saves.

use gloo_timers::future::TimeoutFuture;
use layout_core::{
    EditorCommand, EditorConfig, HttpLayoutApi, LayoutError, LayoutSession, Outcome, SyncClient,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{error, info, warn};

use crate::dom;
use crate::store::{
    store_dismiss_toast, store_push_toast, RenameTarget, ToastKind, UiState, UiStateStoreFields,
    UiStore,
};

#[derive(Clone, Copy)]
pub struct EditorContext {
    pub session: RwSignal<LayoutSession>,
    client: StoredValue<SyncClient<HttpLayoutApi>, LocalStorage>,
    pub ui: UiStore,
    toast_timeout_ms: u32,
}

impl EditorContext {
    pub fn new(config: &EditorConfig) -> Self {
        let base = if config.api_base.is_empty() {
            dom::origin()
        } else {
            config.api_base.clone()
        };
        let api = HttpLayoutApi::new(base, dom::csrf_sources().resolve());
        Self {
            session: RwSignal::new(LayoutSession::new(config.level(), config.grid())),
            client: StoredValue::new_local(SyncClient::new(api, config.save_strategy)),
            ui: UiStore::new(UiState::default()),
            toast_timeout_ms: config.toast_timeout_ms,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.session.with(|s| s.is_editing())
    }

    pub fn is_editing_untracked(&self) -> bool {
        self.session.with_untracked(|s| s.is_editing())
    }

    /// Run a command; errors become toasts and yield None
    pub fn dispatch(&self, command: EditorCommand) -> Option<Outcome> {
        let result = self.session.try_maybe_update(|s| {
            let result = s.dispatch(command);
            let changed = !matches!(result, Ok(Outcome::Unchanged) | Err(_));
            (changed, result)
        })?;

        match result {
            Ok(outcome) => {
                match &outcome {
                    Outcome::NeedsConfirmation(request) => {
                        self.ui.confirm().set(Some(request.clone()))
                    }
                    Outcome::Navigate(target) => dom::navigate(&target.href()),
                    Outcome::Changed | Outcome::Unchanged => {}
                }
                Some(outcome)
            }
            Err(e) => {
                warn!(error = %e, "command rejected");
                self.notify(ToastKind::Error, e.to_string());
                None
            }
        }
    }

    pub fn confirm(&self) {
        self.ui.confirm().set(None);
        self.dispatch(EditorCommand::Confirm);
    }

    pub fn dismiss(&self) {
        self.ui.confirm().set(None);
        self.dispatch(EditorCommand::Dismiss);
    }

    /// Open the properties dialog for the selected item
    pub fn open_properties(&self) {
        let target = self.session.with_untracked(|s| {
            s.selected()
                .and_then(|id| s.store().get(id))
                .map(|item| RenameTarget {
                    id: item.id,
                    name: item.name.clone(),
                })
        });
        match target {
            Some(target) => self.ui.renaming().set(Some(target)),
            None => self.notify(ToastKind::Error, LayoutError::NothingSelected.to_string()),
        }
    }

    /// Show a toast that hides itself after the configured timeout
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let id = store_push_toast(&self.ui, kind, message.into());
        let ui = self.ui;
        let timeout = self.toast_timeout_ms;
        spawn_local(async move {
            TimeoutFuture::new(timeout).await;
            store_dismiss_toast(&ui, id);
        });
    }

    /// Fetch the current level from the server
    pub fn load(&self) {
        let ctx = *self;
        let parent = self.session.with_untracked(|s| s.level().parent);
        let client = self.client.get_value();
        self.ui.loading().set(true);
        spawn_local(async move {
            match client.load(parent).await {
                Ok(items) => ctx.session.update(|s| s.load(items)),
                Err(e) => {
                    error!(error = %e, "failed to load layout");
                    ctx.notify(ToastKind::Error, e.to_string());
                }
            }
            ctx.ui.loading().set(false);
        });
    }

    pub fn save(&self) {
        let plan = match self.session.try_update(|s| s.begin_save()) {
            Some(Ok(plan)) => plan,
            Some(Err(e)) => {
                self.notify(ToastKind::Error, e.to_string());
                return;
            }
            None => return,
        };

        let ctx = *self;
        let client = self.client.get_value();
        spawn_local(async move {
            let report = client.execute(&plan).await;
            match ctx.session.try_update(|s| s.finish_save(report)) {
                Some(Ok(summary)) => match summary.failure_message() {
                    None => {
                        info!(created = summary.created, "layout saved");
                        ctx.notify(ToastKind::Success, "Layout saved successfully");
                    }
                    Some(message) => {
                        ctx.notify(ToastKind::Error, format!("Failed to save layout: {}", message));
                    }
                },
                Some(Err(e)) => {
                    ctx.notify(ToastKind::Error, format!("Failed to save layout: {}", e))
                }
                None => {}
            }
        });
    }
}

/// Get the editor context
pub fn use_editor() -> EditorContext {
    expect_context::<EditorContext>()
}
