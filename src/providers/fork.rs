use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};

use futures::Stream;

struct Shared<S: Stream> {
    source: S,
    queues: [VecDeque<S::Item>; 2],
    wakers: [Option<Waker>; 2],
    done: bool,
}

/// One of the two readable copies produced by [`fork`]
pub struct ForkStream<S: Stream> {
    shared: Arc<Mutex<Shared<S>>>,
    side: usize,
}

/// Split a single-producer stream into two copies that can be drained
/// independently.
///
/// Each side observes every source item exactly once and in source order,
/// regardless of which side is read first. The source is polled on demand
/// by whichever side reaches a position first; items the other side has not
/// yet read are buffered for it, so reading one copy never consumes or
/// advances the other.
pub fn fork<S>(source: S) -> (ForkStream<S>, ForkStream<S>)
where
    S: Stream + Unpin,
    S::Item: Clone,
{
    let shared = Arc::new(Mutex::new(Shared {
        source,
        queues: [VecDeque::new(), VecDeque::new()],
        wakers: [None, None],
        done: false,
    }));
    (
        ForkStream {
            shared: Arc::clone(&shared),
            side: 0,
        },
        ForkStream { shared, side: 1 },
    )
}

impl<S> Stream for ForkStream<S>
where
    S: Stream + Unpin,
    S::Item: Clone,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let side = self.side;
        let mut guard = self.shared.lock().unwrap();
        let shared = &mut *guard;

        if let Some(item) = shared.queues[side].pop_front() {
            return Poll::Ready(Some(item));
        }
        if shared.done {
            return Poll::Ready(None);
        }

        match Pin::new(&mut shared.source).poll_next(cx) {
            Poll::Ready(Some(item)) => {
                shared.queues[1 - side].push_back(item.clone());
                if let Some(waker) = shared.wakers[1 - side].take() {
                    waker.wake();
                }
                Poll::Ready(Some(item))
            }
            Poll::Ready(None) => {
                shared.done = true;
                if let Some(waker) = shared.wakers[1 - side].take() {
                    waker.wake();
                }
                Poll::Ready(None)
            }
            Poll::Pending => {
                shared.wakers[side] = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}
