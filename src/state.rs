//! Metric state: headline scalars plus bounded rolling chart histories.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Incremental appends keep at most this many points per chart series.
/// Bulk application of an uploaded dataset deliberately ignores this cap
/// and shows the full sequence.
pub const HISTORY_WINDOW: usize = 10;

#[derive(Clone)]
pub struct Config {
    pub tick_ms: u64,
    pub window: usize,
    pub initial_revenue: f64,
    pub initial_productivity: f64,
    pub initial_satisfaction: f64,
    pub data_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            tick_ms: std::env::var("TICK_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(2000),
            window: std::env::var("WINDOW").ok().and_then(|v| v.parse().ok()).unwrap_or(HISTORY_WINDOW),
            initial_revenue: std::env::var("INIT_REVENUE").ok().and_then(|v| v.parse().ok()).unwrap_or(1000.0),
            initial_productivity: std::env::var("INIT_PRODUCTIVITY").ok().and_then(|v| v.parse().ok()).unwrap_or(70.0),
            initial_satisfaction: std::env::var("INIT_SATISFACTION").ok().and_then(|v| v.parse().ok()).unwrap_or(80.0),
            data_path: std::env::var("DATA_PATH").ok(),
        }
    }
}

/// One time-labeled observation of all three metrics. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub label: String,
    pub revenue: f64,
    pub productivity: f64,
    pub satisfaction: f64,
}

/// Current headline values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scalars {
    pub revenue: f64,
    pub productivity: f64,
    pub satisfaction: f64,
}

/// Ordered, validated output of ingestion. Always non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub samples: Vec<MetricSample>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> &MetricSample {
        // Ingestion rejects empty datasets, so this cannot panic.
        &self.samples[self.samples.len() - 1]
    }
}

/// Read-only copy of the full state handed to the presentation sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub scalars: Scalars,
    pub labels: Vec<String>,
    pub revenue_series: Vec<f64>,
    pub productivity_series: Vec<f64>,
    pub satisfaction_series: Vec<f64>,
}

/// Headline scalars plus one rolling history per chart series.
///
/// Invariant: labels and the three value histories always share the same
/// length and index alignment. Incremental appends evict FIFO past the
/// window; bulk dataset application replaces histories wholesale.
#[derive(Debug, Clone)]
pub struct MetricState {
    scalars: Scalars,
    window: usize,
    labels: VecDeque<String>,
    revenue_series: VecDeque<f64>,
    productivity_series: VecDeque<f64>,
    satisfaction_series: VecDeque<f64>,
}

impl MetricState {
    pub fn new(scalars: Scalars, window: usize) -> Self {
        Self {
            scalars,
            window,
            labels: VecDeque::new(),
            revenue_series: VecDeque::new(),
            productivity_series: VecDeque::new(),
            satisfaction_series: VecDeque::new(),
        }
    }

    pub fn scalars(&self) -> Scalars {
        self.scalars
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Derived doughnut split. Always sums to 100; never stored.
    pub fn satisfaction_split(&self) -> (f64, f64) {
        let v = self.scalars.satisfaction;
        (v, 100.0 - v)
    }

    /// Set scalars from the sample and append it to every history,
    /// evicting the oldest entry once the window is exceeded.
    pub fn apply_sample(&mut self, sample: &MetricSample) {
        self.scalars = Scalars {
            revenue: sample.revenue,
            productivity: sample.productivity,
            satisfaction: sample.satisfaction,
        };
        self.labels.push_back(sample.label.clone());
        self.revenue_series.push_back(sample.revenue);
        self.productivity_series.push_back(sample.productivity);
        self.satisfaction_series.push_back(sample.satisfaction);
        while self.labels.len() > self.window {
            self.labels.pop_front();
            self.revenue_series.pop_front();
            self.productivity_series.pop_front();
            self.satisfaction_series.pop_front();
        }
    }

    /// Replace the histories with the full dataset (no window cap) and set
    /// scalars from its last row.
    pub fn apply_dataset(&mut self, dataset: &Dataset) {
        let last = dataset.last();
        self.scalars = Scalars {
            revenue: last.revenue,
            productivity: last.productivity,
            satisfaction: last.satisfaction,
        };
        self.labels = dataset.samples.iter().map(|s| s.label.clone()).collect();
        self.revenue_series = dataset.samples.iter().map(|s| s.revenue).collect();
        self.productivity_series = dataset.samples.iter().map(|s| s.productivity).collect();
        self.satisfaction_series = dataset.samples.iter().map(|s| s.satisfaction).collect();
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            scalars: self.scalars,
            labels: self.labels.iter().cloned().collect(),
            revenue_series: self.revenue_series.iter().copied().collect(),
            productivity_series: self.productivity_series.iter().copied().collect(),
            satisfaction_series: self.satisfaction_series.iter().copied().collect(),
        }
    }
}

/// Wall-clock tick label, locale-independent.
pub fn now_label() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(label: &str, r: f64, p: f64, s: f64) -> MetricSample {
        MetricSample {
            label: label.to_string(),
            revenue: r,
            productivity: p,
            satisfaction: s,
        }
    }

    #[test]
    fn apply_sample_keeps_histories_aligned() {
        let mut st = MetricState::new(
            Scalars { revenue: 1000.0, productivity: 70.0, satisfaction: 80.0 },
            HISTORY_WINDOW,
        );
        for i in 0..7 {
            st.apply_sample(&sample(&format!("t{}", i), 1000.0 + i as f64, 70.0, 80.0));
        }
        let snap = st.snapshot();
        assert_eq!(snap.labels.len(), 7);
        assert_eq!(snap.revenue_series.len(), 7);
        assert_eq!(snap.productivity_series.len(), 7);
        assert_eq!(snap.satisfaction_series.len(), 7);
    }

    #[test]
    fn window_evicts_oldest_first() {
        let mut st = MetricState::new(
            Scalars { revenue: 0.0, productivity: 70.0, satisfaction: 80.0 },
            3,
        );
        for i in 0..5 {
            st.apply_sample(&sample(&format!("t{}", i), i as f64, 70.0, 80.0));
        }
        let snap = st.snapshot();
        assert_eq!(snap.labels, vec!["t2", "t3", "t4"]);
        assert_eq!(snap.revenue_series, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn dataset_apply_ignores_window() {
        let mut st = MetricState::new(
            Scalars { revenue: 0.0, productivity: 70.0, satisfaction: 80.0 },
            3,
        );
        let ds = Dataset {
            samples: (0..12).map(|i| sample(&format!("t{}", i), i as f64, 70.0, 80.0)).collect(),
        };
        st.apply_dataset(&ds);
        assert_eq!(st.len(), 12);
        assert_eq!(st.scalars().revenue, 11.0);
    }

    #[test]
    fn split_sums_to_100_at_boundaries() {
        for v in [0.0, 37.5, 100.0] {
            let st = MetricState::new(
                Scalars { revenue: 0.0, productivity: 0.0, satisfaction: v },
                HISTORY_WINDOW,
            );
            let (sat, unsat) = st.satisfaction_split();
            assert_eq!(sat, v);
            assert_eq!(sat + unsat, 100.0);
        }
    }
}
