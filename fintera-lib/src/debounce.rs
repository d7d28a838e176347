//! Debounced search input.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::ListConfig;

/// Delays free-text search input until the user stops typing.
///
/// Every call to [`input`](Self::input) cancels the pending timer and starts a
/// new one; only when the quiet interval elapses without further input is the
/// effective term sent on the channel returned by [`new`](Self::new). Input
/// shorter than the minimum length is propagated as an empty term ("not
/// searching"). Intermediate values are never sent.
///
/// Dropping the debouncer cancels any pending timer.
///
/// Timers run on the current tokio runtime, so `input` must be called from
/// within one.
///
/// # Example
///
/// ```ignore
/// let (mut debouncer, mut terms) = FilterDebouncer::new(Duration::from_millis(500), 3);
///
/// debouncer.input("lo");
/// debouncer.input("lote");
///
/// // Half a second after the last keystroke:
/// assert_eq!(terms.recv().await.as_deref(), Some("lote"));
/// ```
#[derive(Debug)]
pub struct FilterDebouncer {
    quiet: Duration,
    min_len: usize,
    tx: mpsc::UnboundedSender<String>,
    pending: Option<CancellationToken>,
}

impl FilterDebouncer {
    /// Creates a debouncer and the receiver its settled terms arrive on.
    pub fn new(quiet: Duration, min_len: usize) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            quiet,
            min_len,
            tx,
            pending: None,
        };
        (debouncer, rx)
    }

    /// Creates a debouncer with the interval and minimum length of `config`.
    pub fn from_config(config: &ListConfig) -> (Self, mpsc::UnboundedReceiver<String>) {
        Self::new(config.debounce(), config.min_search_len)
    }

    /// Returns the effective search term for `raw` input.
    ///
    /// Input with fewer than `min_len` characters yields an empty term.
    pub fn effective_term(raw: &str, min_len: usize) -> String {
        if raw.chars().count() < min_len {
            String::new()
        } else {
            raw.to_string()
        }
    }

    /// Records a keystroke, restarting the quiet interval.
    pub fn input(&mut self, raw: &str) {
        self.cancel();

        let term = Self::effective_term(raw, self.min_len);
        let token = CancellationToken::new();
        self.pending = Some(token.clone());

        let tx = self.tx.clone();
        let quiet = self.quiet;
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(quiet) => {
                    let _ = tx.send(term);
                    token.cancel();
                }
            }
        });
    }

    /// Cancels the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    /// Returns `true` while a timer is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|token| !token.is_cancelled())
    }
}

impl Drop for FilterDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(500);

    #[test]
    fn test_effective_term() {
        assert_eq!(FilterDebouncer::effective_term("ab", 3), "");
        assert_eq!(FilterDebouncer::effective_term("abc", 3), "abc");
        assert_eq!(FilterDebouncer::effective_term("", 0), "");
        // Characters, not bytes.
        assert_eq!(FilterDebouncer::effective_term("añ", 3), "");
        assert_eq!(FilterDebouncer::effective_term("año", 3), "año");
    }

    #[tokio::test(start_paused = true)]
    async fn test_coalesces_rapid_keystrokes() {
        let (mut debouncer, mut rx) = FilterDebouncer::new(QUIET, 2);

        debouncer.input("l");
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.input("lo");
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.input("lot");
        assert!(debouncer.is_pending());

        tokio::time::sleep(QUIET + Duration::from_millis(100)).await;
        assert_eq!(rx.try_recv().ok().as_deref(), Some("lot"));
        assert!(rx.try_recv().is_err());
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_before_quiet_interval() {
        let (mut debouncer, mut rx) = FilterDebouncer::new(QUIET, 2);

        debouncer.input("lote");
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(rx.try_recv().ok().as_deref(), Some("lote"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_input_becomes_empty_term() {
        let (mut debouncer, mut rx) = FilterDebouncer::new(QUIET, 3);

        debouncer.input("ab");
        tokio::time::sleep(QUIET + Duration::from_millis(10)).await;
        assert_eq!(rx.try_recv().ok().as_deref(), Some(""));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_input() {
        let (mut debouncer, mut rx) = FilterDebouncer::new(QUIET, 1);

        debouncer.input("lote 4");
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::sleep(QUIET * 2).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_wins_over_elapsed_timer() {
        // The old timer has expired but its task has not been polled again
        // when the next keystroke arrives.
        for _ in 0..50 {
            let (mut debouncer, mut rx) = FilterDebouncer::new(QUIET, 1);

            debouncer.input("old");
            tokio::task::yield_now().await;
            tokio::time::advance(QUIET + Duration::from_millis(1)).await;
            debouncer.input("new");

            tokio::time::sleep(QUIET * 2).await;
            assert_eq!(rx.try_recv().ok().as_deref(), Some("new"));
            assert!(rx.try_recv().is_err());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_input() {
        let (mut debouncer, mut rx) = FilterDebouncer::new(QUIET, 1);

        debouncer.input("lote 4");
        drop(debouncer);

        tokio::time::sleep(QUIET * 2).await;
        assert!(rx.try_recv().is_err());
    }
}
