use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};

use flow_core::model::Level;

use crate::deadline::within;
use crate::error::{LevelSelectionError, ProviderError};

/// Determines a learner's level, e.g. through a placement test.
#[async_trait]
pub trait LevelAssessmentProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns `ProviderError` if no level could be determined.
    async fn assess(&self) -> Result<Level, ProviderError>;
}

/// Stand-in placement test: waits, then picks one of the six levels uniformly.
pub struct SimulatedAssessment {
    delay: Duration,
    rng: Mutex<StdRng>,
}

impl SimulatedAssessment {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self::with_rng(delay, StdRng::from_os_rng())
    }

    #[must_use]
    pub fn with_rng(delay: Duration, rng: StdRng) -> Self {
        Self {
            delay,
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl LevelAssessmentProvider for SimulatedAssessment {
    async fn assess(&self) -> Result<Level, ProviderError> {
        tokio::time::sleep(self.delay).await;
        let index = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
            rng.random_range(0..Level::ALL.len())
        };
        Level::from_index(index)
            .ok_or_else(|| ProviderError::Unavailable(format!("no level at index {index}")))
    }
}

/// Runs the placement test with a deadline.
#[derive(Clone)]
pub struct PlacementService {
    provider: Arc<dyn LevelAssessmentProvider>,
    timeout: Duration,
}

impl PlacementService {
    #[must_use]
    pub fn new(provider: Arc<dyn LevelAssessmentProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// # Errors
    ///
    /// Returns `LevelSelectionError::Provider` if the test fails and
    /// `LevelSelectionError::Timeout` if it does not finish in time.
    pub async fn run(&self) -> Result<Level, LevelSelectionError> {
        match within(self.timeout, self.provider.assess()).await {
            Ok(Ok(level)) => {
                info!(%level, "placement test finished");
                Ok(level)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "placement test failed");
                Err(e.into())
            }
            Err(ms) => {
                warn!(timeout_ms = ms, "placement test timed out");
                Err(LevelSelectionError::Timeout(ms))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn placement_always_yields_a_known_level() {
        let provider = SimulatedAssessment::with_rng(
            Duration::from_millis(2000),
            StdRng::seed_from_u64(7),
        );
        for _ in 0..50 {
            let level = provider.assess().await.unwrap();
            assert!(Level::ALL.contains(&level));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn seeded_rng_reaches_every_level() {
        let provider = SimulatedAssessment::with_rng(Duration::ZERO, StdRng::seed_from_u64(42));
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..200 {
            seen.insert(provider.assess().await.unwrap());
        }
        assert_eq!(seen.len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn placement_waits_for_the_delay() {
        let provider = SimulatedAssessment::with_rng(
            Duration::from_millis(2000),
            StdRng::seed_from_u64(1),
        );
        let service = PlacementService::new(Arc::new(provider), Duration::from_secs(10));
        let started = tokio::time::Instant::now();
        service.run().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_placement_times_out() {
        let provider = SimulatedAssessment::with_rng(Duration::from_secs(60), StdRng::seed_from_u64(1));
        let service = PlacementService::new(Arc::new(provider), Duration::from_secs(10));
        assert_eq!(
            service.run().await.unwrap_err(),
            LevelSelectionError::Timeout(10_000)
        );
    }
}
