use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;

/// Fans one source stream out to several subscribers.
///
/// The source is polled only by [`Multicast::run`], so its side effects happen
/// once no matter how many subscribers observe it. Subscribers see every item
/// produced after `run` starts, in order; there is no replay.
pub struct Multicast<S: Stream> {
    source: S,
    subscribers: Vec<mpsc::UnboundedSender<S::Item>>,
}

impl<S> Multicast<S>
where
    S: Stream + Unpin,
    S::Item: Clone,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self) -> Subscription<S::Item> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        Subscription { rx }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Drive the source to completion and return how many items were forwarded.
    ///
    /// Never polls the source without subscribers, and stops polling (dropping
    /// the source) once every subscription has been dropped. All subscriptions
    /// end when this returns.
    pub async fn run(self) -> usize {
        let Self {
            mut source,
            mut subscribers,
        } = self;
        let mut forwarded = 0;
        loop {
            subscribers.retain(|tx| !tx.is_closed());
            if subscribers.is_empty() {
                break;
            }
            let Some(item) = source.next().await else {
                break;
            };
            subscribers.retain(|tx| tx.send(item.clone()).is_ok());
            forwarded += 1;
        }
        forwarded
    }
}

/// One subscriber's view of a [`Multicast`].
#[derive(Debug)]
pub struct Subscription<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.get_mut().rx.poll_recv(cx)
    }
}
