use futures_util::stream::BoxStream;
use picker_core::{ColorId, ColorItem};

use crate::RepositoryError;

/// Percentages 0..=100, increasing, ending when the write completes.
/// An `Err` item is terminal.
pub type ProgressStream = BoxStream<'static, Result<u8, RepositoryError>>;

#[async_trait::async_trait]
pub trait ColorRepository: Send + Sync {
    async fn available_colors(&self) -> Result<Vec<ColorItem>, RepositoryError>;

    async fn color_by_id(&self, id: ColorId) -> Result<ColorItem, RepositoryError>;

    /// Returns a cold stream: nothing is written until it is first polled.
    fn persist_selection(&self, item: &ColorItem) -> ProgressStream;
}

pub trait Navigator: Send + Sync {
    fn go_back(&self);
    fn go_back_with(&self, item: ColorItem);
}

/// Fire-and-forget user-visible message.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
