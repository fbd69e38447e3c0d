use std::time::Duration;

use tokio::time::Instant;

/// Quiet period applied to search input before it reaches a query.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// A value that only propagates after its input has been quiet for `quiet`.
/// Uses the tokio clock so tests can pause and advance time.
#[derive(Debug, Clone)]
pub struct Debounced<T> {
    settled: T,
    pending: Option<(T, Instant)>,
    quiet: Duration,
}

impl<T: Clone + PartialEq> Debounced<T> {
    pub fn new(initial: T, quiet: Duration) -> Self {
        Self {
            settled: initial,
            pending: None,
            quiet,
        }
    }

    /// The last value that made it through the quiet period.
    pub fn value(&self) -> &T {
        &self.settled
    }

    /// Records new input and restarts the quiet period.
    pub fn set(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.quiet));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Commits pending input whose quiet period has elapsed.
    /// Returns true when the settled value changed.
    pub fn poll(&mut self) -> bool {
        match self.pending.take() {
            Some((value, at)) if Instant::now() >= at => {
                let changed = value != self.settled;
                self.settled = value;
                changed
            }
            other => {
                self.pending = other;
                false
            }
        }
    }

    /// Waits out the quiet period (if any) and commits.
    /// Returns true when the settled value changed.
    pub async fn settle(&mut self) -> bool {
        if let Some(deadline) = self.deadline() {
            tokio::time::sleep_until(deadline).await;
        }
        self.poll()
    }
}
