//! Synthetic metric samples via a bounded random walk.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::state::{now_label, MetricSample, Scalars};

/// Produces one synthetic sample per tick, walking from the previous
/// scalar values. Cannot fail: it only ever consumes its own prior output,
/// and productivity/satisfaction are clamped back into range.
pub struct LiveGenerator {
    rng: StdRng,
}

impl LiveGenerator {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Deterministic generator for tests and replay.
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn next_sample(&mut self, prev: &Scalars) -> MetricSample {
        self.sample_with_label(prev, now_label())
    }

    fn sample_with_label(&mut self, prev: &Scalars, label: String) -> MetricSample {
        // Revenue steps by a whole dollar amount; the percentages drift in
        // small real-valued increments.
        let revenue = prev.revenue + self.rng.gen_range(-50..150) as f64;
        let productivity = (prev.productivity + self.rng.gen_range(-2.0..2.0)).clamp(50.0, 100.0);
        let satisfaction = (prev.satisfaction + self.rng.gen_range(-1.5..1.5)).clamp(60.0, 100.0);
        MetricSample { label, revenue, productivity, satisfaction }
    }
}

impl Default for LiveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_stay_within_walk_bounds() {
        let mut gen = LiveGenerator::from_seed(7);
        let mut prev = Scalars { revenue: 1000.0, productivity: 70.0, satisfaction: 80.0 };
        for _ in 0..500 {
            let s = gen.next_sample(&prev);
            let dr = s.revenue - prev.revenue;
            assert!((-50.0..150.0).contains(&dr), "revenue step out of range: {}", dr);
            assert_eq!(dr.fract(), 0.0, "revenue step must be integral");
            assert!((50.0..=100.0).contains(&s.productivity));
            assert!((60.0..=100.0).contains(&s.satisfaction));
            prev = Scalars {
                revenue: s.revenue,
                productivity: s.productivity,
                satisfaction: s.satisfaction,
            };
        }
    }

    #[test]
    fn clamps_hold_at_the_boundaries() {
        let mut gen = LiveGenerator::from_seed(42);
        let low = Scalars { revenue: 0.0, productivity: 50.0, satisfaction: 60.0 };
        let high = Scalars { revenue: 0.0, productivity: 100.0, satisfaction: 100.0 };
        for _ in 0..100 {
            let s = gen.next_sample(&low);
            assert!(s.productivity >= 50.0 && s.satisfaction >= 60.0);
            let s = gen.next_sample(&high);
            assert!(s.productivity <= 100.0 && s.satisfaction <= 100.0);
        }
    }

    #[test]
    fn seeded_generators_replay_identically() {
        let prev = Scalars { revenue: 1000.0, productivity: 70.0, satisfaction: 80.0 };
        let mut a = LiveGenerator::from_seed(9);
        let mut b = LiveGenerator::from_seed(9);
        for _ in 0..20 {
            let sa = a.sample_with_label(&prev, "t".to_string());
            let sb = b.sample_with_label(&prev, "t".to_string());
            assert_eq!(sa, sb);
        }
    }
}
