use crate::view_model::{merge_sources, screen_title, PickerViewModel};
use crate::{ColorId, ColorItem, Loadable, Progress, Strings};

/// The four independent state sources behind the picker screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PickerState {
    available_colors: Loadable<Vec<ColorItem>>,
    selected_id: ColorId,
    instant_progress: Progress,
    sampled_progress: Progress,
    load_generation: u64,
    dirty: bool,
}

impl PickerState {
    pub fn new(selected_id: ColorId) -> Self {
        Self {
            selected_id,
            ..Self::default()
        }
    }

    pub fn view(&self, strings: &dyn Strings) -> PickerViewModel {
        let content = merge_sources(
            &self.available_colors,
            self.selected_id,
            self.instant_progress,
            self.sampled_progress,
            strings,
        );
        let screen_title = screen_title(&content, strings);
        PickerViewModel {
            content,
            screen_title,
        }
    }

    pub fn available_colors(&self) -> &Loadable<Vec<ColorItem>> {
        &self.available_colors
    }

    pub fn selected_id(&self) -> ColorId {
        self.selected_id
    }

    pub fn instant_progress(&self) -> Progress {
        self.instant_progress
    }

    pub fn sampled_progress(&self) -> Progress {
        self.sampled_progress
    }

    /// Generation of the most recent load request; older answers are stale.
    pub fn load_generation(&self) -> u64 {
        self.load_generation
    }

    /// Returns whether any source changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn next_load_generation(&mut self) -> u64 {
        self.load_generation = self.load_generation.wrapping_add(1);
        self.load_generation
    }

    pub(crate) fn set_available_colors(&mut self, colors: Loadable<Vec<ColorItem>>) {
        if self.available_colors != colors {
            self.available_colors = colors;
            self.dirty = true;
        }
    }

    pub(crate) fn set_selected_id(&mut self, id: ColorId) {
        if self.selected_id != id {
            self.selected_id = id;
            self.dirty = true;
        }
    }

    pub(crate) fn set_instant_progress(&mut self, progress: Progress) {
        if self.instant_progress != progress {
            self.instant_progress = progress;
            self.dirty = true;
        }
    }

    pub(crate) fn set_sampled_progress(&mut self, progress: Progress) {
        if self.sampled_progress != progress {
            self.sampled_progress = progress;
            self.dirty = true;
        }
    }
}
