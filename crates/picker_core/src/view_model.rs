use crate::{ColorId, ColorItem, Loadable, Progress, StringKey, Strings};

/// Published snapshot of the whole screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PickerViewModel {
    pub content: Loadable<ColorPickerViewState>,
    pub screen_title: String,
}

/// Render-ready state of a loaded color list. Replaced, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPickerViewState {
    pub colors_list: Vec<ColorRow>,
    pub show_save_button: bool,
    pub show_cancel_button: bool,
    pub show_save_progress_bar: bool,
    /// Drives the progress bar; follows every raw tick.
    pub save_progress_percentage: u8,
    /// Textual label; follows the sampled progress only.
    pub save_progress_percentage_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRow {
    pub item: ColorItem,
    pub selected: bool,
}

/// Combine the four state sources into a view state.
///
/// `Loading` and `Failure` propagate unchanged so the caller can render a
/// spinner or a retry affordance.
pub fn merge_sources(
    colors: &Loadable<Vec<ColorItem>>,
    selected_id: ColorId,
    instant_progress: Progress,
    sampled_progress: Progress,
    strings: &dyn Strings,
) -> Loadable<ColorPickerViewState> {
    let colors = match colors {
        Loadable::Loading => return Loadable::Loading,
        Loadable::Failure(failure) => return Loadable::Failure(failure.clone()),
        Loadable::Success(colors) => colors,
    };

    let colors_list = colors
        .iter()
        .map(|item| ColorRow {
            item: item.clone(),
            selected: item.id == selected_id,
        })
        .collect();

    let saving = instant_progress.is_in_progress();
    let sampled = sampled_progress.get_percentage().to_string();
    let save_progress_percentage_message =
        strings.get(StringKey::SaveProgressMessage, &[sampled.as_str()]);

    Loadable::Success(ColorPickerViewState {
        colors_list,
        show_save_button: !saving,
        show_cancel_button: !saving,
        show_save_progress_bar: saving,
        save_progress_percentage: instant_progress.get_percentage(),
        save_progress_percentage_message,
    })
}

/// Title naming the selected color, or the generic fallback.
pub fn screen_title(content: &Loadable<ColorPickerViewState>, strings: &dyn Strings) -> String {
    let selected = content
        .as_success()
        .and_then(|state| state.colors_list.iter().find(|row| row.selected));
    match selected {
        Some(row) => strings.get(StringKey::ChangeColorTitleWithName, &[row.item.name.as_str()]),
        None => strings.get(StringKey::ChangeColorTitle, &[]),
    }
}
