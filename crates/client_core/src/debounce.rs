use std::time::{Duration, Instant};

pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(300);

/// Holds back search box input until typing pauses.
///
/// Time is passed in by the caller so UI loops and tests drive the clock;
/// [`SearchDebouncer::settled`] is the async convenience on top.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
    last_emitted: Option<String>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DELAY)
    }
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            last_emitted: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records the latest input and restarts the quiet period.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now + self.delay));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Yields the settled text once the deadline passed, unless it matches
    /// what was emitted last.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        let (text, _) = self.pending.take()?;
        let text = text.trim().to_string();
        if self.last_emitted.as_deref() == Some(text.as_str()) {
            return None;
        }
        self.last_emitted = Some(text.clone());
        Some(text)
    }

    /// Sleeps until the pending input settles.
    pub async fn settled(&mut self) -> Option<String> {
        let deadline = self.deadline()?;
        tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        self.poll(Instant::now().max(deadline))
    }
}

#[cfg(test)]
#[path = "tests/debounce_tests.rs"]
mod tests;
