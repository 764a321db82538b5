//! Color picker core: pure state machine and view-model helpers.
mod effect;
mod loadable;
mod msg;
mod progress;
mod state;
mod strings;
mod types;
mod update;
mod view_model;

pub use effect::Effect;
pub use loadable::{LoadFailure, Loadable};
pub use msg::{Msg, SaveOutcome};
pub use progress::Progress;
pub use state::PickerState;
pub use strings::{EnglishStrings, StringKey, Strings};
pub use types::{ColorId, ColorItem};
pub use update::update;
pub use view_model::{
    merge_sources, screen_title, ColorPickerViewState, ColorRow, PickerViewModel,
};
