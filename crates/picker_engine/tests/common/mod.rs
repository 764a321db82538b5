#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use picker_core::{ColorItem, EnglishStrings, PickerViewModel};
use picker_engine::{
    InMemoryStore, KeyValueStore, Navigator, Notifier, PickerDeps, StaticColorRepository,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(picker_logging::initialize_for_tests);
}

pub fn red() -> ColorItem {
    ColorItem::new(1, "Red", 0xFFFF_0000)
}

pub fn blue() -> ColorItem {
    ColorItem::new(2, "Blue", 0xFF00_00FF)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Back,
    BackWith(ColorItem),
}

#[derive(Default)]
pub struct RecordingNavigator {
    calls: Mutex<Vec<Navigation>>,
}

impl RecordingNavigator {
    pub fn calls(&self) -> Vec<Navigation> {
        self.calls.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn go_back(&self) {
        self.calls.lock().unwrap().push(Navigation::Back);
    }

    fn go_back_with(&self, item: ColorItem) {
        self.calls.lock().unwrap().push(Navigation::BackWith(item));
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub struct Harness {
    pub repository: Arc<StaticColorRepository>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
    pub store: Arc<InMemoryStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_repository(StaticColorRepository::new(vec![red(), blue()]))
    }

    pub fn with_repository(repository: StaticColorRepository) -> Self {
        Self {
            repository: Arc::new(repository),
            navigator: Arc::new(RecordingNavigator::default()),
            notifier: Arc::new(RecordingNotifier::default()),
            store: Arc::new(InMemoryStore::new()),
        }
    }

    pub fn deps(&self) -> PickerDeps {
        PickerDeps {
            repository: self.repository.clone(),
            navigator: self.navigator.clone(),
            notifier: self.notifier.clone(),
            strings: Arc::new(EnglishStrings),
            store: self.store.clone() as Arc<dyn KeyValueStore>,
        }
    }
}

/// Poll `condition` on virtual time until it holds; panics after 10 virtual seconds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met in time");
}

pub fn is_saving(view: &PickerViewModel) -> bool {
    view.content
        .as_success()
        .is_some_and(|state| state.show_save_progress_bar)
}
