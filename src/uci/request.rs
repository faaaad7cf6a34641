//! The completion token for a single in-flight sentinel wait — spec §4.4/§9:
//! "three fields guarded by one short-held lock: expected sentinel,
//! single-shot future, generation... to reject stale completions."

use tokio::sync::{oneshot, Mutex};

use super::protocol::sentinel_matches;

struct Inner {
    generation: u64,
    expected: Option<String>,
    completion: Option<oneshot::Sender<String>>,
}

pub struct PendingSentinel {
    inner: Mutex<Inner>,
}

impl PendingSentinel {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner { generation: 0, expected: None, completion: None }),
        }
    }

    /// Installs a fresh sentinel wait, bumping the generation so any
    /// completion racing in for the previous one is ignored by [`Self::clear`].
    pub async fn install(&self, expected: impl Into<String>) -> (u64, oneshot::Receiver<String>) {
        let mut inner = self.inner.lock().await;
        inner.generation += 1;
        inner.expected = Some(expected.into());
        let (tx, rx) = oneshot::channel();
        inner.completion = Some(tx);
        (inner.generation, rx)
    }

    /// Called from the line-ingestion task for every line read. Completes
    /// the current wait, if any, on a sentinel match; first writer wins
    /// (`Sender::send` silently no-ops if the receiver already has a value).
    pub async fn try_complete(&self, line: &str) {
        let mut inner = self.inner.lock().await;
        let is_match = inner
            .expected
            .as_deref()
            .map(|expected| sentinel_matches(expected, line))
            .unwrap_or(false);
        if is_match {
            if let Some(tx) = inner.completion.take() {
                let _ = tx.send(line.to_string());
            }
        }
    }

    /// Resolves the current wait with "no result" — used when the child
    /// process's stdout pipe closes while a request is outstanding (spec
    /// §4.4's "a child-process Exited event must complete any pending future
    /// with 'no result'"). Dropping the sender does exactly that: the
    /// receiver resolves to `Err`.
    pub async fn fail_pending(&self) {
        let mut inner = self.inner.lock().await;
        inner.completion = None;
        inner.expected = None;
    }

    /// Clears the wait-state, but only if `generation` still matches the
    /// current one — a later `install` already happened and moved on.
    pub async fn clear(&self, generation: u64) {
        let mut inner = self.inner.lock().await;
        if inner.generation == generation {
            inner.expected = None;
            inner.completion = None;
        }
    }
}

impl Default for PendingSentinel {
    fn default() -> Self {
        Self::new()
    }
}
