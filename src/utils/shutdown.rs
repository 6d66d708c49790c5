use std::{future::Future, time::Duration};

/// Drive `server` to completion, but once `shutdown_started` resolves give it
/// at most `drain_timeout` more.
///
/// Returns `None` when the drain window expired with requests still in
/// flight; the server future is dropped at that point.
pub async fn drain_with_timeout<F, S>(
    server: F,
    shutdown_started: S,
    drain_timeout: Duration,
) -> Option<F::Output>
where
    F: Future,
    S: Future<Output = ()>,
{
    tokio::pin!(server);
    tokio::pin!(shutdown_started);

    tokio::select! {
        output = &mut server => return Some(output),
        _ = &mut shutdown_started => {}
    }

    tokio::time::timeout(drain_timeout, server).await.ok()
}
