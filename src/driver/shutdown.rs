//! # Cancellation from OS termination signals.
//!
//! **Unix platforms:** `SIGINT`, `SIGTERM`, `SIGQUIT`.
//! **Windows platforms:** `Ctrl-C` via [`tokio::signal::ctrl_c`].

use tokio_util::sync::CancellationToken;

/// Waits for a termination signal (or for `token` to be cancelled elsewhere),
/// then cancels `token`.
///
/// Returns `Err` if signal registration fails; the token is left untouched.
pub async fn cancel_on_signal(token: CancellationToken) -> std::io::Result<()> {
    tokio::select! {
        biased;
        _ = token.cancelled() => {}
        res = wait_for_signal() => {
            res?;
            tracing::info!("termination signal received");
            token.cancel();
        }
    }
    Ok(())
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        res = tokio::signal::ctrl_c() => res?,
        _ = sigterm.recv() => {},
        _ = sigquit.recv() => {},
    }
    Ok(())
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_when_token_cancelled_elsewhere() {
        let token = CancellationToken::new();
        token.cancel();
        cancel_on_signal(token.clone()).await.unwrap();
        assert!(token.is_cancelled());
    }
}
