use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use picker_core::{ColorId, ColorItem};
use picker_logging::picker_debug;

use crate::{ColorRepository, ProgressStream, RepositoryError};

/// Repository over a fixed catalog.
///
/// Persisting emits the configured progress steps with `step_delay` between
/// them. Failures can be injected for the list fetch and for the persist
/// stream.
pub struct StaticColorRepository {
    colors: Vec<ColorItem>,
    steps: Vec<u8>,
    step_delay: Duration,
    load_error: Mutex<Option<RepositoryError>>,
    persist_fail_after: Mutex<Option<usize>>,
    load_calls: AtomicUsize,
    persist_runs: Arc<AtomicUsize>,
    saved: Arc<Mutex<Vec<ColorItem>>>,
}

impl StaticColorRepository {
    pub const DEFAULT_STEPS: [u8; 5] = [0, 25, 50, 75, 100];

    pub fn new(colors: Vec<ColorItem>) -> Self {
        Self {
            colors,
            steps: Self::DEFAULT_STEPS.to_vec(),
            step_delay: Duration::from_millis(50),
            load_error: Mutex::new(None),
            persist_fail_after: Mutex::new(None),
            load_calls: AtomicUsize::new(0),
            persist_runs: Arc::new(AtomicUsize::new(0)),
            saved: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_steps(mut self, steps: Vec<u8>) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    /// Make `available_colors` fail until cleared with `None`.
    pub fn set_load_error(&self, err: Option<RepositoryError>) {
        *self.load_error.lock().unwrap_or_else(PoisonError::into_inner) = err;
    }

    /// Make persist streams fail after emitting `steps` values (must be fewer than the step count).
    pub fn set_persist_fail_after(&self, steps: Option<usize>) {
        *self
            .persist_fail_after
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = steps;
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    /// Number of persist streams that actually started writing.
    pub fn persist_runs(&self) -> usize {
        self.persist_runs.load(Ordering::SeqCst)
    }

    /// Colors whose persist stream ran to completion.
    pub fn saved(&self) -> Vec<ColorItem> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait::async_trait]
impl ColorRepository for StaticColorRepository {
    async fn available_colors(&self) -> Result<Vec<ColorItem>, RepositoryError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.step_delay).await;
        let load_error = self
            .load_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match load_error {
            Some(err) => Err(err),
            None => Ok(self.colors.clone()),
        }
    }

    async fn color_by_id(&self, id: ColorId) -> Result<ColorItem, RepositoryError> {
        self.colors
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    fn persist_selection(&self, item: &ColorItem) -> ProgressStream {
        let fail_after = *self
            .persist_fail_after
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let plan = PersistPlan {
            item: item.clone(),
            steps: self.steps.clone(),
            step_delay: self.step_delay,
            fail_after,
            runs: self.persist_runs.clone(),
            saved: self.saved.clone(),
        };

        stream::unfold((plan, 0usize), |(plan, index)| async move {
            if index >= plan.steps.len() {
                return None;
            }
            if index == 0 {
                plan.runs.fetch_add(1, Ordering::SeqCst);
                picker_debug!("Persist started for color id={}", plan.item.id);
            } else {
                tokio::time::sleep(plan.step_delay).await;
            }

            if plan.fail_after == Some(index) {
                let err = RepositoryError::PersistFailed(format!(
                    "write interrupted after {index} steps"
                ));
                return Some((Err(err), (plan, usize::MAX)));
            }

            let step = plan.steps[index];
            if index + 1 == plan.steps.len() {
                plan.saved
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(plan.item.clone());
            }
            Some((Ok(step), (plan, index + 1)))
        })
        .boxed()
    }
}

struct PersistPlan {
    item: ColorItem,
    steps: Vec<u8>,
    step_delay: Duration,
    fail_after: Option<usize>,
    runs: Arc<AtomicUsize>,
    saved: Arc<Mutex<Vec<ColorItem>>>,
}
