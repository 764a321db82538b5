use crate::{ColorItem, LoadFailure, Progress};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Screen opened or user pressed retry.
    LoadRequested,
    /// Repository answered the fetch started for `generation`.
    ColorsLoaded {
        generation: u64,
        result: Result<Vec<ColorItem>, LoadFailure>,
    },
    /// User tapped a color in the list.
    ColorSelected(ColorItem),
    /// User clicked Save.
    SaveClicked,
    /// User clicked Cancel.
    CancelClicked,
    /// Raw progress tick of the running save.
    InstantProgress(Progress),
    /// Sampled progress tick of the running save.
    SampledProgress(Progress),
    /// The save workflow ended.
    SaveFinished(SaveOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(ColorItem),
    Failed { message: String },
    Cancelled,
}
