use crate::{ColorId, ColorItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the color list; the answer must carry the same `generation`.
    LoadColors { generation: u64 },
    PersistSelection(ColorId),
    StartSave { color_id: ColorId },
    /// Leave the screen, optionally handing back the saved color.
    NavigateBack(Option<ColorItem>),
    ShowGenericError,
}
