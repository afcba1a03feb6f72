//! Presentation sink: the rendering collaborator the core pushes to.
//!
//! The core never queries the sink; it only sends scalars and full series
//! and asks for a redraw. Rendering itself lives outside this crate.

use crate::logging::{json_log, obj, v_num, v_str};

pub const DOUGHNUT_LABELS: [&str; 2] = ["Satisfied", "Unsatisfied"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartId {
    RevenueLine,
    ProductivityBar,
    SatisfactionDoughnut,
}

impl ChartId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartId::RevenueLine => "revenue_line",
            ChartId::ProductivityBar => "productivity_bar",
            ChartId::SatisfactionDoughnut => "satisfaction_doughnut",
        }
    }
}

pub trait PresentationSink {
    fn set_scalars(&mut self, revenue: f64, productivity: f64, satisfaction: f64);
    fn set_series(&mut self, chart: ChartId, labels: &[String], values: &[f64]);
    fn refresh(&mut self, chart: ChartId);
}

/// Discards everything. Used when no rendering surface is attached.
pub struct NullSink;

impl PresentationSink for NullSink {
    fn set_scalars(&mut self, _revenue: f64, _productivity: f64, _satisfaction: f64) {}
    fn set_series(&mut self, _chart: ChartId, _labels: &[String], _values: &[f64]) {}
    fn refresh(&mut self, _chart: ChartId) {}
}

/// Logs each push as a structured event. The binary's stand-in for a real
/// chart surface.
pub struct ConsoleSink;

impl ConsoleSink {
    /// Headline revenue with thousands separators, e.g. `$1,234`.
    pub fn format_revenue(revenue: f64) -> String {
        let negative = revenue < 0.0;
        let whole = revenue.abs().trunc() as u64;
        let digits = whole.to_string();
        let mut out = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        if negative {
            format!("-${}", out)
        } else {
            format!("${}", out)
        }
    }

    /// One-decimal percentage, e.g. `71.5%`.
    pub fn format_pct(value: f64) -> String {
        format!("{:.1}%", value)
    }
}

impl PresentationSink for ConsoleSink {
    fn set_scalars(&mut self, revenue: f64, productivity: f64, satisfaction: f64) {
        json_log(
            "headline",
            obj(&[
                ("revenue", v_str(&Self::format_revenue(revenue))),
                ("productivity", v_str(&Self::format_pct(productivity))),
                ("satisfaction", v_str(&Self::format_pct(satisfaction))),
            ]),
        );
    }

    fn set_series(&mut self, chart: ChartId, labels: &[String], values: &[f64]) {
        json_log(
            "series",
            obj(&[
                ("chart", v_str(chart.as_str())),
                ("points", v_num(labels.len() as f64)),
                ("last", v_num(values.last().copied().unwrap_or(0.0))),
            ]),
        );
    }

    fn refresh(&mut self, _chart: ChartId) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revenue_formatting_groups_thousands() {
        assert_eq!(ConsoleSink::format_revenue(1000.0), "$1,000");
        assert_eq!(ConsoleSink::format_revenue(987.0), "$987");
        assert_eq!(ConsoleSink::format_revenue(1234567.0), "$1,234,567");
        assert_eq!(ConsoleSink::format_revenue(-4200.0), "-$4,200");
    }

    #[test]
    fn pct_formatting_keeps_one_decimal() {
        assert_eq!(ConsoleSink::format_pct(71.55), "71.6%");
        assert_eq!(ConsoleSink::format_pct(80.0), "80.0%");
    }
}
