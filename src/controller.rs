//! Mode controller: the state machine that decides who writes metric state.
//!
//! Exactly one mode is active at a time. The live tick only mutates state
//! while the generator is armed and the mode is `LiveDemo`; applying an
//! uploaded dataset disarms the generator first, so a late tick event can
//! never tear into uploaded data. Upload failures leave mode and state
//! untouched and only change the status line.

use crate::generator::LiveGenerator;
use crate::ingest::{parse_table, IngestError};
use crate::logging::{json_log, log, obj, v_num, v_str, Level};
use crate::sink::{ChartId, PresentationSink, DOUGHNUT_LABELS};
use crate::state::{Config, Dataset, MetricState, Scalars};

pub const STATUS_LIVE: &str = "Live demo mode is running…";
pub const STATUS_READING: &str = "Reading file…";
pub const STATUS_READ_ERROR: &str = "Error reading file. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Pre-dashboard gate; nothing owns metric state yet.
    Gated,
    /// Random-walk generator owns metric state, tick by tick.
    LiveDemo,
    /// An uploaded dataset owns metric state; no further mutation until
    /// the next skip or successful upload.
    UploadedStatic,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Gated => "gated",
            Mode::LiveDemo => "live_demo",
            Mode::UploadedStatic => "uploaded_static",
        }
    }
}

pub struct Controller<S: PresentationSink> {
    mode: Mode,
    armed: bool,
    dashboard_visible: bool,
    status: String,
    state: MetricState,
    generator: LiveGenerator,
    sink: S,
}

impl<S: PresentationSink> Controller<S> {
    pub fn new(cfg: &Config, generator: LiveGenerator, sink: S) -> Self {
        let scalars = Scalars {
            revenue: cfg.initial_revenue,
            productivity: cfg.initial_productivity,
            satisfaction: cfg.initial_satisfaction,
        };
        Self {
            mode: Mode::Gated,
            armed: false,
            dashboard_visible: false,
            status: String::new(),
            state: MetricState::new(scalars, cfg.window),
            generator,
            sink,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn armed(&self) -> bool {
        self.armed
    }

    pub fn dashboard_visible(&self) -> bool {
        self.dashboard_visible
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn state(&self) -> &MetricState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Skip straight to the live demo. Re-entrant from any mode; scalars
    /// continue from their current values.
    pub fn on_skip(&mut self) {
        self.status = STATUS_LIVE.to_string();
        self.dashboard_visible = true;
        let prev = self.mode;
        self.mode = Mode::LiveDemo;
        self.arm();
        if prev != Mode::LiveDemo {
            json_log(
                "mode",
                obj(&[("from", v_str(prev.as_str())), ("to", v_str(self.mode.as_str()))]),
            );
        }
    }

    /// A file read has been kicked off; result arrives via
    /// [`Controller::on_read_complete`].
    pub fn on_read_started(&mut self) {
        self.status = STATUS_READING.to_string();
    }

    /// Single-shot read outcome. `Ok` carries the raw text blob, `Err` the
    /// read-mechanism failure (not a content problem).
    pub fn on_read_complete(&mut self, result: Result<String, String>) {
        match result {
            Ok(text) => match parse_table(&text) {
                Ok(dataset) => self.apply_upload(dataset),
                Err(err) => self.reject_upload(err),
            },
            Err(reason) => {
                log(Level::Warn, "read_failed", obj(&[("reason", v_str(&reason))]));
                self.status = STATUS_READ_ERROR.to_string();
            }
        }
    }

    /// Timer tick. Has zero effect unless the generator is armed in live
    /// demo mode.
    pub fn on_tick(&mut self) {
        if !self.armed || self.mode != Mode::LiveDemo {
            return;
        }
        let sample = self.generator.next_sample(&self.state.scalars());
        self.state.apply_sample(&sample);
        log(
            Level::Debug,
            "tick",
            obj(&[
                ("label", v_str(&sample.label)),
                ("revenue", v_num(sample.revenue)),
                ("productivity", v_num(sample.productivity)),
                ("satisfaction", v_num(sample.satisfaction)),
            ]),
        );
        self.push_all();
    }

    /// Idempotent: arming while armed is a no-op.
    pub fn arm(&mut self) {
        if self.armed {
            return;
        }
        self.armed = true;
        json_log("generator", obj(&[("armed", v_str("true"))]));
    }

    /// Idempotent: no tick mutates state past this point.
    pub fn disarm(&mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;
        json_log("generator", obj(&[("armed", v_str("false"))]));
    }

    fn apply_upload(&mut self, dataset: Dataset) {
        // Disarm before touching state so an armed timer cannot interleave.
        self.disarm();
        let points = dataset.len();
        self.state.apply_dataset(&dataset);
        let prev = self.mode;
        self.mode = Mode::UploadedStatic;
        self.dashboard_visible = true;
        self.status = format!("Showing uploaded data ({} points). Demo mode paused.", points);
        json_log(
            "mode",
            obj(&[
                ("from", v_str(prev.as_str())),
                ("to", v_str(self.mode.as_str())),
                ("points", v_num(points as f64)),
            ]),
        );
        self.push_all();
    }

    fn reject_upload(&mut self, err: IngestError) {
        log(
            Level::Warn,
            "ingest_rejected",
            obj(&[
                ("error", v_str(&format!("{:?}", err))),
                ("mode", v_str(self.mode.as_str())),
            ]),
        );
        self.status = format!("Could not use file: {}", err);
    }

    /// Push scalars, all three chart series, and redraws to the sink.
    fn push_all(&mut self) {
        let snap = self.state.snapshot();
        self.sink.set_scalars(
            snap.scalars.revenue,
            snap.scalars.productivity,
            snap.scalars.satisfaction,
        );
        self.sink.set_series(ChartId::RevenueLine, &snap.labels, &snap.revenue_series);
        self.sink.refresh(ChartId::RevenueLine);
        self.sink.set_series(ChartId::ProductivityBar, &snap.labels, &snap.productivity_series);
        self.sink.refresh(ChartId::ProductivityBar);
        let (sat, unsat) = self.state.satisfaction_split();
        let labels: Vec<String> = DOUGHNUT_LABELS.iter().map(|l| l.to_string()).collect();
        self.sink.set_series(ChartId::SatisfactionDoughnut, &labels, &[sat, unsat]);
        self.sink.refresh(ChartId::SatisfactionDoughnut);
    }
}
