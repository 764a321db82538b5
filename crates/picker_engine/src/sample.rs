use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures_util::{Stream, StreamExt};
use tokio::time::{sleep_until, Instant, Sleep};

/// Throttle `source` to at most one item per `period`, keeping the latest.
///
/// Ticks fall on a fixed grid `start + k * period` measured from creation.
/// An item waits for the first grid point at or after its arrival; grid points
/// that pass while nothing is pending are skipped. Only items the source
/// produced are emitted. When the source ends with an item still pending,
/// that item is delivered on the next tick before the stream ends.
pub fn sample<S>(source: S, period: Duration) -> Sample<S>
where
    S: Stream + Unpin,
{
    Sample::new(source, period)
}

pub struct Sample<S: Stream> {
    source: S,
    period: Duration,
    deadline: Instant,
    timer: Pin<Box<Sleep>>,
    pending: Option<S::Item>,
    source_done: bool,
}

impl<S> Sample<S>
where
    S: Stream + Unpin,
{
    /// A zero `period` is raised to one nanosecond.
    pub fn new(source: S, period: Duration) -> Self {
        let period = period.max(Duration::from_nanos(1));
        let deadline = Instant::now() + period;
        Self {
            source,
            period,
            deadline,
            timer: Box::pin(sleep_until(deadline)),
            pending: None,
            source_done: false,
        }
    }

    /// Move the deadline forward to the first grid point not before `now`.
    fn realign(&mut self, now: Instant) {
        if self.deadline >= now {
            return;
        }
        let behind = (now - self.deadline).as_nanos();
        let periods = behind.div_ceil(self.period.as_nanos());
        let skip = u64::try_from(periods * self.period.as_nanos()).unwrap_or(u64::MAX);
        self.deadline += Duration::from_nanos(skip);
        self.timer.as_mut().reset(self.deadline);
    }
}

impl<S> Stream for Sample<S>
where
    S: Stream + Unpin,
    S::Item: Unpin,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let this = self.get_mut();

        while !this.source_done {
            match this.source.poll_next_unpin(cx) {
                Poll::Ready(Some(item)) => {
                    if this.pending.is_none() {
                        this.realign(Instant::now());
                    }
                    this.pending = Some(item);
                }
                Poll::Ready(None) => this.source_done = true,
                Poll::Pending => break,
            }
        }

        if this.pending.is_none() {
            return if this.source_done {
                Poll::Ready(None)
            } else {
                Poll::Pending
            };
        }

        match this.timer.as_mut().poll(cx) {
            Poll::Ready(()) => {
                this.deadline += this.period;
                this.timer.as_mut().reset(this.deadline);
                Poll::Ready(this.pending.take())
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
