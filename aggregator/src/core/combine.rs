//! Combine-latest over two fallible snapshot streams
//!
//! Both inputs are drained through a single ordered event queue: whenever
//! both sides have an item ready, the one published first is consumed first.
//! Every combination step therefore reads a pair of latest values that were
//! current together, even when several updates are queued on both inputs.

use std::task::{Context, Poll};

use futures_util::stream::{self, BoxStream, StreamExt};
use shared::Stamped;

/// Events drained from the ordered input queue
enum Event<A, B, E> {
    Left(Stamped<Result<A, E>>),
    Right(Stamped<Result<B, E>>),
    LeftClosed,
    RightClosed,
}

/// One input with its next ready item held back until it is its turn
struct Lane<T> {
    stream: BoxStream<'static, Stamped<T>>,
    head: Option<Stamped<T>>,
    closed: bool,
    close_reported: bool,
}

impl<T> Lane<T> {
    fn new(stream: BoxStream<'static, Stamped<T>>) -> Self {
        Self {
            stream,
            head: None,
            closed: false,
            close_reported: false,
        }
    }

    /// Pull the next item into the head slot if one is ready
    fn fill(&mut self, cx: &mut Context<'_>) {
        if self.head.is_some() || self.closed {
            return;
        }
        match self.stream.poll_next_unpin(cx) {
            Poll::Ready(Some(item)) => self.head = Some(item),
            Poll::Ready(None) => self.closed = true,
            Poll::Pending => {}
        }
    }

    fn head_seq(&self) -> Option<u64> {
        self.head.as_ref().map(|item| item.seq)
    }

    /// True exactly once, after the input has ended and its items are consumed
    fn take_close(&mut self) -> bool {
        if self.closed && self.head.is_none() && !self.close_reported {
            self.close_reported = true;
            return true;
        }
        false
    }
}

/// Merge both inputs into one queue ordered by publication stamp
fn ordered_events<A, B, E>(
    left: BoxStream<'static, Stamped<Result<A, E>>>,
    right: BoxStream<'static, Stamped<Result<B, E>>>,
) -> BoxStream<'static, Event<A, B, E>>
where
    A: Send + 'static,
    B: Send + 'static,
    E: Send + 'static,
{
    let mut left = Lane::new(left);
    let mut right = Lane::new(right);

    stream::poll_fn(move |cx| {
        left.fill(cx);
        right.fill(cx);

        let next = match (left.head_seq(), right.head_seq()) {
            (Some(l), Some(r)) if r < l => right.head.take().map(Event::Right),
            (Some(_), _) => left.head.take().map(Event::Left),
            (None, Some(_)) => right.head.take().map(Event::Right),
            (None, None) => None,
        };
        if let Some(event) = next {
            return Poll::Ready(Some(event));
        }

        if left.take_close() {
            return Poll::Ready(Some(Event::LeftClosed));
        }
        if right.take_close() {
            return Poll::Ready(Some(Event::RightClosed));
        }
        if left.closed && right.closed {
            Poll::Ready(None)
        } else {
            Poll::Pending
        }
    })
    .boxed()
}

/// Latest-value slots plus the combining function
struct CombineState<A, B, E, F> {
    events: BoxStream<'static, Event<A, B, E>>,
    left: Option<A>,
    right: Option<B>,
    combine: F,
}

/// Combine the latest values of two snapshot streams.
///
/// Nothing is emitted until both inputs have produced a value; afterwards
/// every value from either side yields exactly one combined value, stamped
/// like the update that triggered it. Updates queued on both inputs are
/// consumed in stamp order. The first error from either side is forwarded,
/// both inputs are dropped and the stream ends. The stream completes once
/// both inputs complete, or as soon as one completes without ever having
/// emitted. Dropping the returned stream drops both inputs.
pub fn combine_latest<A, B, E, O, F>(
    left: BoxStream<'static, Stamped<Result<A, E>>>,
    right: BoxStream<'static, Stamped<Result<B, E>>>,
    combine: F,
) -> BoxStream<'static, Stamped<Result<O, E>>>
where
    A: Send + 'static,
    B: Send + 'static,
    E: Send + 'static,
    O: Send + 'static,
    F: FnMut(&A, &B) -> O + Send + 'static,
{
    let state = CombineState {
        events: ordered_events(left, right),
        left: None,
        right: None,
        combine,
    };

    stream::unfold(state, |mut state| async move {
        while let Some(event) = state.events.next().await {
            let seq = match event {
                Event::Left(Stamped { seq, value: Ok(value) }) => {
                    state.left = Some(value);
                    seq
                }
                Event::Right(Stamped { seq, value: Ok(value) }) => {
                    state.right = Some(value);
                    seq
                }
                Event::Left(Stamped { seq, value: Err(error) })
                | Event::Right(Stamped { seq, value: Err(error) }) => {
                    // Release both subscriptions now, not on the next poll
                    state.events = stream::empty().boxed();
                    return Some((Stamped::with_seq(seq, Err(error)), state));
                }
                Event::LeftClosed if state.left.is_none() => return None,
                Event::RightClosed if state.right.is_none() => return None,
                Event::LeftClosed | Event::RightClosed => continue,
            };

            if let (Some(left), Some(right)) = (&state.left, &state.right) {
                let combined = (state.combine)(left, right);
                return Some((Stamped::with_seq(seq, Ok(combined)), state));
            }
        }

        None
    })
    .boxed()
}
