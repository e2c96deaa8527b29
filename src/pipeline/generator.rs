//! Synthetic e-commerce event generation
//!
//! The generator owns its random source so tests can seed it for
//! deterministic batches. Unseeded batches are property-holding, not
//! value-exact.

use super::types::{Event, EventKind};
use chrono::{Duration, Utc};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Relative weights for the categorical kind distribution
/// (page views most common)
const KIND_WEIGHTS: [u32; 4] = [50, 20, 10, 5];

const USER_ID_SPACE: std::ops::RangeInclusive<i64> = 1..=1000;
const PRODUCT_ID_SPACE: std::ops::RangeInclusive<i64> = 1..=100;
const AMOUNT_RANGE: std::ops::RangeInclusive<f64> = 10.0..=500.0;

/// Occurrence timestamps fall in the trailing 7-day window ending now
const WINDOW_SECS: i64 = 7 * 24 * 60 * 60;

pub struct EventGenerator {
    rng: StdRng,
    kind_dist: WeightedIndex<u32>,
}

impl EventGenerator {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic generator for tests
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            kind_dist: WeightedIndex::new(KIND_WEIGHTS).expect("static kind weights are valid"),
        }
    }

    /// Materialize `count` events; `amount` is set only for purchases
    pub fn generate(&mut self, count: usize) -> Vec<Event> {
        log::info!("🔧 Generating {} events...", count);

        let now = Utc::now();
        (0..count)
            .map(|_| {
                let kind = EventKind::ALL[self.kind_dist.sample(&mut self.rng)];
                let offset = self.rng.gen_range(0..WINDOW_SECS);

                let amount = if kind == EventKind::Purchase {
                    Some(round_cents(self.rng.gen_range(AMOUNT_RANGE)))
                } else {
                    None
                };

                Event {
                    user_id: Some(self.rng.gen_range(USER_ID_SPACE)),
                    kind,
                    timestamp: now - Duration::seconds(offset),
                    product_id: self.rng.gen_range(PRODUCT_ID_SPACE),
                    amount,
                }
            })
            .collect()
    }
}

impl Default for EventGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
