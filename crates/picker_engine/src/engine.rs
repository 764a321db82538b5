use std::sync::Arc;
use std::time::Duration;

use picker_core::{
    update, ColorId, ColorItem, Effect, LoadFailure, Msg, PickerState, PickerViewModel,
    SaveOutcome, StringKey, Strings,
};
use picker_logging::{picker_debug, picker_error, picker_info, picker_warn};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::{
    save_selection, ColorRepository, KeyValueStore, Navigator, Notifier, PersistedScalar,
    SaveError,
};

#[derive(Debug, Clone)]
pub struct PickerSettings {
    /// Cadence of the sampled progress label.
    pub sample_period: Duration,
    /// Store key holding the selected color id.
    pub selection_key: String,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            sample_period: Duration::from_millis(200),
            selection_key: "selected_color_id".to_string(),
        }
    }
}

/// External collaborators the view model calls.
#[derive(Clone)]
pub struct PickerDeps {
    pub repository: Arc<dyn ColorRepository>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
    pub strings: Arc<dyn Strings>,
    pub store: Arc<dyn KeyValueStore>,
}

/// Handle to a running color picker screen.
///
/// Commands are queued to an actor task that owns the state, applies
/// [`update`], publishes a fresh [`PickerViewModel`] whenever a source changed
/// and executes the resulting effects. Dropping the handle tears the screen
/// down: in-flight loads and saves are cancelled without notifying the user.
pub struct ColorPickerViewModel {
    msg_tx: mpsc::UnboundedSender<Msg>,
    view_rx: watch::Receiver<PickerViewModel>,
    actor: JoinHandle<()>,
    teardown: DropGuard,
}

impl ColorPickerViewModel {
    /// Open the screen and start loading colors. Must be called inside a tokio runtime.
    ///
    /// The selection starts from the persisted value, or `initial_color_id`
    /// when nothing was stored yet.
    pub fn open(deps: PickerDeps, settings: PickerSettings, initial_color_id: ColorId) -> Self {
        let selected = PersistedScalar::new(
            deps.store.as_ref(),
            &settings.selection_key,
            initial_color_id,
        )
        .get();
        picker_info!("Opening color picker with selection id={}", selected);

        let state = PickerState::new(selected);
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(state.view(deps.strings.as_ref()));
        let cancel = CancellationToken::new();

        let actor = Actor {
            state,
            deps,
            settings,
            msg_tx: msg_tx.downgrade(),
            view_tx,
            cancel: cancel.clone(),
            load_task: None,
            save_in_flight: false,
        };
        let actor = tokio::spawn(actor.run(msg_rx));

        let view_model = Self {
            msg_tx,
            view_rx,
            actor,
            teardown: cancel.drop_guard(),
        };
        view_model.load();
        view_model
    }

    /// Fetch the color list. Also serves as retry after a failure.
    pub fn load(&self) {
        self.post(Msg::LoadRequested);
    }

    /// Select a color. Ignored while a save is in progress.
    pub fn select(&self, item: ColorItem) {
        self.post(Msg::ColorSelected(item));
    }

    pub fn save(&self) {
        self.post(Msg::SaveClicked);
    }

    /// Leave the screen without saving.
    pub fn cancel(&self) {
        self.post(Msg::CancelClicked);
    }

    pub fn current(&self) -> PickerViewModel {
        self.view_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PickerViewModel> {
        self.view_rx.clone()
    }

    /// Cancel in-flight work and wait until the actor has applied the last
    /// outcome and stopped.
    pub async fn close(self) {
        let Self {
            msg_tx,
            view_rx: _,
            actor,
            teardown,
        } = self;
        drop(teardown);
        drop(msg_tx);
        if let Err(err) = actor.await {
            picker_error!("Color picker actor ended abnormally: {}", err);
        }
    }

    fn post(&self, msg: Msg) {
        if self.msg_tx.send(msg).is_err() {
            picker_warn!("Color picker actor is gone; message dropped");
        }
    }
}

struct Actor {
    state: PickerState,
    deps: PickerDeps,
    settings: PickerSettings,
    // Weak so the queue closes once the handle and every task are gone.
    msg_tx: mpsc::WeakUnboundedSender<Msg>,
    view_tx: watch::Sender<PickerViewModel>,
    cancel: CancellationToken,
    load_task: Option<JoinHandle<()>>,
    save_in_flight: bool,
}

impl Actor {
    async fn run(mut self, mut msg_rx: mpsc::UnboundedReceiver<Msg>) {
        while let Some(msg) = msg_rx.recv().await {
            self.dispatch(msg);
        }
        if let Some(task) = self.load_task.take() {
            task.abort();
        }
        picker_debug!("Color picker actor stopped");
    }

    fn dispatch(&mut self, msg: Msg) {
        match &msg {
            Msg::SaveClicked if self.save_in_flight => {
                picker_debug!("Save requested while another save is running; ignored");
                return;
            }
            Msg::SaveFinished(_) => self.save_in_flight = false,
            _ => {}
        }

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view_tx
                .send_replace(state.view(self.deps.strings.as_ref()));
        }
        self.state = state;

        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::LoadColors { generation } => self.spawn_load(generation),
            Effect::PersistSelection(id) => {
                let selection = PersistedScalar::new(
                    self.deps.store.as_ref(),
                    &self.settings.selection_key,
                    id,
                );
                if let Err(err) = selection.set(id) {
                    picker_warn!("Failed to persist selection id={}: {}", id, err);
                }
            }
            Effect::StartSave { color_id } => self.spawn_save(color_id),
            Effect::NavigateBack(Some(item)) => {
                picker_info!("Navigating back with color id={}", item.id);
                self.deps.navigator.go_back_with(item);
            }
            Effect::NavigateBack(None) => self.deps.navigator.go_back(),
            Effect::ShowGenericError => {
                let message = self.deps.strings.get(StringKey::GenericError, &[]);
                self.deps.notifier.notify(&message);
            }
        }
    }

    fn spawn_load(&mut self, generation: u64) {
        let Some(tx) = self.msg_tx.upgrade() else {
            return;
        };
        if let Some(previous) = self.load_task.take() {
            previous.abort();
        }

        let repository = self.deps.repository.clone();
        let cancel = self.cancel.clone();
        self.load_task = Some(tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => return,
                result = repository.available_colors() => result,
            };
            let result = result.map_err(|err| {
                picker_warn!("Loading colors failed: {}", err);
                LoadFailure::new(err.to_string())
            });
            if let Ok(colors) = &result {
                picker_info!("Loaded {} colors", colors.len());
            }
            let _ = tx.send(Msg::ColorsLoaded { generation, result });
        }));
    }

    fn spawn_save(&mut self, color_id: ColorId) {
        let Some(tx) = self.msg_tx.upgrade() else {
            return;
        };
        self.save_in_flight = true;

        let repository = self.deps.repository.clone();
        let sample_period = self.settings.sample_period;
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            let instant_tx = tx.clone();
            let sampled_tx = tx.clone();
            let save = save_selection(
                repository.as_ref(),
                color_id,
                sample_period,
                move |progress| {
                    let _ = instant_tx.send(Msg::InstantProgress(progress));
                },
                move |progress| {
                    let _ = sampled_tx.send(Msg::SampledProgress(progress));
                },
            );

            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => Err(SaveError::Cancelled),
                result = save => result,
            };
            let outcome = match result {
                Ok(item) => SaveOutcome::Saved(item),
                Err(err) if err.is_cancelled() => {
                    picker_info!("Save of color id={} cancelled", color_id);
                    SaveOutcome::Cancelled
                }
                Err(err) => {
                    picker_error!("Save of color id={} failed: {}", color_id, err);
                    SaveOutcome::Failed {
                        message: err.to_string(),
                    }
                }
            };
            let _ = tx.send(Msg::SaveFinished(outcome));
        });
    }
}
