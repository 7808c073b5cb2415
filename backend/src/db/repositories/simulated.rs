//! Simulated remote repository.
//!
//! Serves a fixed dataset after a random delay and fails a configurable share
//! of requests, so the dashboard's loading and error states can be exercised
//! without a real shipment backend.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::db::dataset;
use crate::db::repository::*;
use crate::models::Shipment;

/// Message carried by simulated fetch failures.
pub const SIMULATED_FAILURE_MESSAGE: &str = "Failed to load shipment data";

/// Source of uniformly distributed values in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;
}

/// Sample returned when the OS entropy source fails.
const FALLBACK_SAMPLE: f64 = 0.5;

/// Operating-system entropy via `getrandom`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn next_unit(&self) -> f64 {
        match getrandom::u64() {
            // Top 53 bits give an exact f64 in [0, 1).
            Ok(bits) => (bits >> 11) as f64 / (1u64 << 53) as f64,
            Err(e) => {
                warn!("getrandom unavailable ({}), using fixed sample {}", e, FALLBACK_SAMPLE);
                FALLBACK_SAMPLE
            }
        }
    }
}

/// Latency and failure behaviour of the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub min_delay: Duration,
    pub max_delay: Duration,
    /// Probability in `[0, 1]` that a fetch fails.
    pub failure_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(400),
            max_delay: Duration::from_millis(1200),
            failure_rate: 0.1,
        }
    }
}

impl SimulationConfig {
    /// No delay, never fails.
    pub fn instant() -> Self {
        Self {
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            failure_rate: 0.0,
        }
    }

    pub fn validate(&self) -> RepositoryResult<()> {
        if self.min_delay > self.max_delay {
            return Err(RepositoryError::configuration(format!(
                "min_delay ({:?}) must not exceed max_delay ({:?})",
                self.min_delay, self.max_delay
            )));
        }
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(RepositoryError::configuration(format!(
                "failure_rate must be within [0, 1], got {}",
                self.failure_rate
            )));
        }
        Ok(())
    }

    /// Delay for a unit sample `u` in `[0, 1)`. Non-finite samples count as `0`.
    pub fn delay_for(&self, u: f64) -> Duration {
        let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.0 };
        let span = self.max_delay.saturating_sub(self.min_delay);
        self.min_delay + span.mul_f64(u)
    }
}

/// Repository with randomized latency and failures.
#[derive(Clone)]
pub struct SimulatedRepository {
    shipments: Arc<Vec<Shipment>>,
    config: SimulationConfig,
    random: Arc<dyn RandomSource>,
}

impl SimulatedRepository {
    /// Simulate the given dataset with OS randomness.
    pub fn new(shipments: Vec<Shipment>, config: SimulationConfig) -> RepositoryResult<Self> {
        config.validate()?;
        Ok(Self {
            shipments: Arc::new(shipments),
            config,
            random: Arc::new(OsRandom),
        })
    }

    /// Simulate the bundled dataset with default latency and failure rate.
    pub fn bundled() -> RepositoryResult<Self> {
        Self::new(dataset::bundled_shipments()?, SimulationConfig::default())
    }

    /// Replace the randomness source.
    pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

#[async_trait]
impl ShipmentRepository for SimulatedRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn get_all_shipments(&self) -> RepositoryResult<Vec<Shipment>> {
        let delay = self.config.delay_for(self.random.next_unit());
        debug!("Simulating shipment fetch with {:?} latency", delay);

        let started = Instant::now();
        tokio::time::sleep(delay).await;

        if self.random.next_unit() < self.config.failure_rate {
            warn!(
                "Simulated shipment fetch failure after {:?}",
                started.elapsed()
            );
            return Err(RepositoryError::unavailable_with_context(
                SIMULATED_FAILURE_MESSAGE,
                ErrorContext::new("get_all_shipments")
                    .with_entity("shipment")
                    .with_details("simulated failure"),
            ));
        }

        Ok(self.shipments.as_ref().clone())
    }

    fn source_name(&self) -> &'static str {
        "simulated"
    }
}
