//! Backoff shared by every loop that (re)establishes a store connection.

use std::time::Duration;

use tokio::time::sleep;

/// First delay after a failed connection attempt.
pub const INITIAL_DELAY: Duration = Duration::from_millis(1_000);
/// Upper bound for the doubling delay.
pub const MAX_DELAY: Duration = Duration::from_secs(10);
/// Attempts made before a reconnect or initial ping is given up.
pub const MAX_ATTEMPTS: u32 = 3;

/// Doubling delay between connection attempts, capped at [`MAX_DELAY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    current: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            current: INITIAL_DELAY,
        }
    }
}

impl Backoff {
    /// Delay the next [`wait`](Self::wait) sleeps for.
    pub fn current(&self) -> Duration {
        self.current
    }

    /// Return the current delay and double it for the next call.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(MAX_DELAY);
        delay
    }

    /// Sleep for the current delay, then grow it.
    pub async fn wait(&mut self) {
        sleep(self.next_delay()).await;
    }

    /// Start over from [`INITIAL_DELAY`] after a successful connection.
    pub fn reset(&mut self) {
        self.current = INITIAL_DELAY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_doubles_up_to_the_cap() {
        let mut backoff = Backoff::default();
        let delays: Vec<u64> = (0..6).map(|_| backoff.next_delay().as_secs()).collect();
        assert_eq!(delays, [1, 2, 4, 8, 10, 10]);

        backoff.reset();
        assert_eq!(backoff.current(), INITIAL_DELAY);
    }
}
