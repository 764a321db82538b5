use std::time::Duration;

use futures_util::{future, StreamExt};
use picker_core::{ColorId, ColorItem, Progress};
use picker_logging::{picker_debug, picker_info};

use crate::{sample, ColorRepository, Multicast, SaveError};

/// Persist the color with `color_id`, reporting progress to two consumers.
///
/// The repository's progress stream is shared: `on_instant` receives every
/// tick, `on_sampled` receives ticks throttled to one per `sample_period`.
/// Returns once both consumers have observed the end of the stream.
pub async fn save_selection<A, B>(
    repository: &dyn ColorRepository,
    color_id: ColorId,
    sample_period: Duration,
    mut on_instant: A,
    mut on_sampled: B,
) -> Result<ColorItem, SaveError>
where
    A: FnMut(Progress),
    B: FnMut(Progress),
{
    let item = repository.color_by_id(color_id).await?;
    picker_info!("Saving color id={} name={}", item.id, item.name);

    let mut shared = Multicast::new(repository.persist_selection(&item));
    let mut instant_ticks = shared.subscribe();
    let sampled_ticks = shared.subscribe();

    let instant = async move {
        while let Some(tick) = instant_ticks.next().await {
            on_instant(Progress::percentage(tick?));
        }
        Ok::<(), SaveError>(())
    };

    let sampled = async move {
        let values = Box::pin(sampled_ticks.filter_map(|tick| future::ready(tick.ok())));
        let mut values = sample(values, sample_period);
        while let Some(value) = values.next().await {
            on_sampled(Progress::percentage(value));
        }
    };

    let (forwarded, instant_result, ()) = tokio::join!(shared.run(), instant, sampled);
    picker_debug!("Save of color id={} forwarded {} ticks", item.id, forwarded);
    instant_result?;

    picker_info!("Saved color id={}", item.id);
    Ok(item)
}
