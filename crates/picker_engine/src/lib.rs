//! Color picker engine: collaborator contracts, stream plumbing and the
//! view-model runtime that executes effects.
mod catalog;
mod engine;
mod persist;
mod repository;
mod sample;
mod save;
mod share;
mod types;

pub use catalog::StaticColorRepository;
pub use engine::{ColorPickerViewModel, PickerDeps, PickerSettings};
pub use persist::{InMemoryStore, JsonFileStore, KeyValueStore, PersistError, PersistedScalar};
pub use repository::{ColorRepository, Navigator, Notifier, ProgressStream};
pub use sample::{sample, Sample};
pub use save::save_selection;
pub use share::{Multicast, Subscription};
pub use types::{RepositoryError, SaveError};
