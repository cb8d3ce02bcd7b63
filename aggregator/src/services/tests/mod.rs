//! Service-specific tests
//!
//! Each service has its own test file; shared helpers live in `common`.


pub mod common {
    use std::time::Duration;

    use futures_util::StreamExt;
    use tokio::time::timeout;

    use shared::Stamped;

    use crate::traits::SourceStream;

    /// Standard timeout for async operations in tests
    pub const TEST_TIMEOUT: Duration = Duration::from_millis(100);

    /// Next stamped item of a snapshot stream, failing the test on timeout
    pub async fn next_stamped<T>(
        stream: &mut SourceStream<T>,
    ) -> Option<Stamped<shared::SharedResult<T>>> {
        timeout(TEST_TIMEOUT, stream.next())
            .await
            .expect("stream should yield within the test timeout")
    }

    /// Next item of a snapshot stream without its stamp
    pub async fn next_item<T>(stream: &mut SourceStream<T>) -> Option<shared::SharedResult<T>> {
        next_stamped(stream).await.map(Stamped::into_inner)
    }

    /// True when the stream has nothing to deliver right now
    pub async fn is_idle<T>(stream: &mut SourceStream<T>) -> bool {
        timeout(Duration::from_millis(20), stream.next()).await.is_err()
    }
}
