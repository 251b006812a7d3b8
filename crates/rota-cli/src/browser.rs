use std::time::Duration;

/// Open `url` in the default browser after `delay`, without blocking the caller.
///
/// Failure is logged; the server keeps running either way.
pub fn open_after(url: String, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let target = url.clone();
        // `open::that` waits on the launcher process.
        match tokio::task::spawn_blocking(move || open::that(&target)).await {
            Ok(Ok(())) => tracing::debug!(%url, "opened browser"),
            Ok(Err(error)) => {
                tracing::warn!(%error, %url, "failed to open browser; open the URL manually");
            }
            Err(error) => tracing::warn!(%error, "browser launcher task failed"),
        }
    });
}
