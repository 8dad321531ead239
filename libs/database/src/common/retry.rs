use core_config::{ConfigError, FromEnv, env_parse_or};
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy for establishing the database connection at startup.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: u32,
    /// Scale each delay to a random 50-100% of its nominal value
    pub use_jitter: bool,
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    pub fn with_max_delay(mut self, delay_ms: u64) -> Self {
        self.max_delay_ms = delay_ms;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Nominal delay before retry number `attempt` (1-based), before jitter.
    fn nominal_delay(&self, attempt: u32) -> u64 {
        let factor = u64::from(self.backoff_multiplier.max(1)).saturating_pow(attempt.saturating_sub(1));
        self.initial_delay_ms
            .saturating_mul(factor)
            .min(self.max_delay_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2,
            use_jitter: true,
        }
    }
}

impl FromEnv for RetryConfig {
    /// Environment variables:
    /// - `DB_CONNECT_RETRIES` (default: 3)
    /// - `DB_RETRY_INITIAL_DELAY_MS` (default: 100)
    /// - `DB_RETRY_MAX_DELAY_MS` (default: 5000)
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            max_retries: env_parse_or("DB_CONNECT_RETRIES", defaults.max_retries)?,
            initial_delay_ms: env_parse_or("DB_RETRY_INITIAL_DELAY_MS", defaults.initial_delay_ms)?,
            max_delay_ms: env_parse_or("DB_RETRY_MAX_DELAY_MS", defaults.max_delay_ms)?,
            ..defaults
        })
    }
}

/// Retry an async operation with exponential backoff.
///
/// ```ignore
/// let config = RetryConfig::new().with_max_retries(5);
/// let db = retry_with_backoff(|| postgres::connect_from_config(cfg.clone()), config).await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(retries = attempt, "Operation succeeded after retrying");
                }
                return Ok(result);
            }
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries {
                    warn!(attempts = attempt, error = %e, "Giving up after repeated failures");
                    return Err(e);
                }

                let delay = config.nominal_delay(attempt);
                let delay = if config.use_jitter {
                    apply_jitter(delay)
                } else {
                    delay
                };

                warn!(
                    attempt,
                    max_retries = config.max_retries,
                    delay_ms = delay,
                    error = %e,
                    "Operation failed, retrying"
                );

                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
        }
    }
}

fn apply_jitter(delay: u64) -> u64 {
    if delay == 0 {
        return 0;
    }
    rand::rng().random_range(delay.div_ceil(2)..=delay)
}

/// [`retry_with_backoff`] with the default policy
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_retry_success_after_failures() {
        let counter = Arc::new(AtomicU32::new(0));
        let config = RetryConfig::new().with_initial_delay(1).without_jitter();

        let result = retry_with_backoff(
            || {
                let counter = counter.clone();
                async move {
                    let count = counter.fetch_add(1, Ordering::SeqCst);
                    if count < 2 {
                        Err(format!("attempt {}", count + 1))
                    } else {
                        Ok("connected")
                    }
                }
            },
            config,
        )
        .await;

        assert_eq!(result.unwrap(), "connected");
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_max_retries_exceeded() {
        let counter = Arc::new(AtomicU32::new(0));
        let config = RetryConfig::new()
            .with_max_retries(2)
            .with_initial_delay(1)
            .without_jitter();

        let result = retry_with_backoff(
            || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>("connection refused")
                }
            },
            config,
        )
        .await;

        assert_eq!(result.unwrap_err(), "connection refused");
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_nominal_delay_grows_and_caps() {
        let config = RetryConfig::new().with_initial_delay(100).with_max_delay(350);
        assert_eq!(config.nominal_delay(1), 100);
        assert_eq!(config.nominal_delay(2), 200);
        assert_eq!(config.nominal_delay(3), 350);
        assert_eq!(config.nominal_delay(40), 350);
    }

    #[test]
    fn test_apply_jitter_stays_within_half_to_full() {
        for _ in 0..50 {
            let jittered = apply_jitter(1000);
            assert!((500..=1000).contains(&jittered));
        }
        assert_eq!(apply_jitter(0), 0);
    }

    #[test]
    fn test_retry_config_from_env() {
        temp_env::with_vars(
            [
                ("DB_CONNECT_RETRIES", Some("7")),
                ("DB_RETRY_INITIAL_DELAY_MS", None::<&str>),
                ("DB_RETRY_MAX_DELAY_MS", Some("900")),
            ],
            || {
                let config = RetryConfig::from_env().unwrap();
                assert_eq!(config.max_retries, 7);
                assert_eq!(config.initial_delay_ms, 100);
                assert_eq!(config.max_delay_ms, 900);
                assert!(config.use_jitter);
            },
        );
    }
}
