/// Progress of the save operation: empty, or a percentage in `0..=100`.
///
/// Built only through [`Progress::EMPTY`] and [`Progress::percentage`], so an
/// out-of-range percentage cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress(Option<u8>);

impl Progress {
    pub const MAX_PERCENTAGE: u8 = 100;

    /// No operation running.
    pub const EMPTY: Progress = Progress(None);

    /// Build an in-progress value, clamping anything above 100.
    pub fn percentage(value: u8) -> Self {
        Progress(Some(value.min(Self::MAX_PERCENTAGE)))
    }

    pub fn is_in_progress(&self) -> bool {
        self.0.is_some()
    }

    /// Current percentage, 0 when empty.
    pub fn get_percentage(&self) -> u8 {
        self.0.unwrap_or(0)
    }

    /// The percentage when in progress.
    pub fn as_percentage(&self) -> Option<u8> {
        self.0
    }
}
