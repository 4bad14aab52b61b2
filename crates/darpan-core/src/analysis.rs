//! # Pillar Analysis Engine
//!
//! Turns a region's update volume, youth ratio, and state forecast into
//! the three audit cards the dashboard renders:
//!
//! - **Inclusivity** — generation saturation, classified from the youth
//!   ratio.
//! - **Security** — service access risk, classified from update velocity
//!   (current volume against the forecast horizon).
//! - **Efficiency** — the forecast sequence itself, with its backtest
//!   accuracy and trend label.
//!
//! Thresholds are fixed program constants; changing them changes the
//! meaning of every historical report.

use serde::{Deserialize, Serialize};

use crate::status::{PillarStatus, TrendLabel};

/// Youth ratio below this is CRITICAL saturation.
pub const SATURATION_CRITICAL: f64 = 0.5;
/// Youth ratio below this (and at or above critical) is WARNING.
pub const SATURATION_WARNING: f64 = 0.7;
/// Update velocity below this is CRITICAL access risk.
pub const VELOCITY_CRITICAL: f64 = 0.75;
/// Update velocity below this (and at or above critical) is WARNING.
pub const VELOCITY_WARNING: f64 = 0.85;

/// Classify generation saturation from the youth ratio.
pub fn saturation_status(ratio: f64) -> PillarStatus {
    if ratio < SATURATION_CRITICAL {
        PillarStatus::Critical
    } else if ratio < SATURATION_WARNING {
        PillarStatus::Warning
    } else {
        PillarStatus::Safe
    }
}

/// Classify service access risk from update velocity.
pub fn velocity_status(velocity: f64) -> PillarStatus {
    if velocity < VELOCITY_CRITICAL {
        PillarStatus::Critical
    } else if velocity < VELOCITY_WARNING {
        PillarStatus::Warning
    } else {
        PillarStatus::Safe
    }
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// A state's volume projection: three forecast steps, backtest accuracy,
/// and a direction label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateForecast {
    /// Projected monthly update volumes, next three months.
    pub values: Vec<i64>,
    /// Backtest accuracy percentage, `100 − MAPE`.
    pub accuracy: f64,
    /// Direction of the projection.
    pub trend: TrendLabel,
}

impl StateForecast {
    /// Flat projection used when no fitted forecast exists for a state:
    /// three copies of `volume × factor`.
    pub fn flat(volume: f64, factor: f64, accuracy: f64, trend: TrendLabel) -> Self {
        let value = (volume * factor) as i64;
        Self {
            values: vec![value; 3],
            accuracy,
            trend,
        }
    }
}

/// Generation saturation card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InclusivityCard {
    pub status: PillarStatus,
    /// Youth ratio, rounded to 4 places.
    pub value: f64,
}

/// Service access risk card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityCard {
    pub status: PillarStatus,
    /// Update velocity as a percentage, rounded to 2 places.
    pub value: f64,
}

/// Forecast card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyCard {
    pub status: PillarStatus,
    /// Projected biometric/demographic traffic, next three months.
    pub biometric_traffic_trend: Vec<i64>,
    /// Backtest accuracy percentage.
    pub accuracy: f64,
    /// Direction of the projection.
    pub trend: TrendLabel,
}

/// The `cards` object of an audit report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditCards {
    pub inclusivity: InclusivityCard,
    pub security: SecurityCard,
    pub efficiency: EfficiencyCard,
}

/// Run the pillar engine for one region.
///
/// `volume` and `ratio` come from the region's dataset row (or the state
/// rollup); `intelligence` is the state's forecast, possibly a fallback.
/// Forecast values are floored at zero before any arithmetic so a
/// mis-trained model can never push negative traffic into a report.
pub fn analyze(volume: f64, ratio: f64, intelligence: &StateForecast) -> AuditCards {
    let forecast: Vec<i64> = intelligence.values.iter().map(|v| (*v).max(0)).collect();

    let avg_forecast = if forecast.is_empty() {
        0.0
    } else {
        forecast.iter().sum::<i64>() as f64 / forecast.len() as f64
    };
    let total_activity = volume + avg_forecast;
    let velocity = if total_activity > 0.0 {
        volume / total_activity
    } else {
        0.0
    };

    AuditCards {
        inclusivity: InclusivityCard {
            status: saturation_status(ratio),
            value: round_to(ratio, 4),
        },
        security: SecurityCard {
            status: velocity_status(velocity),
            value: round_to(velocity * 100.0, 2),
        },
        efficiency: EfficiencyCard {
            status: PillarStatus::Safe,
            biometric_traffic_trend: forecast,
            accuracy: intelligence.accuracy,
            trend: intelligence.trend,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn forecast(values: Vec<i64>) -> StateForecast {
        StateForecast {
            values,
            accuracy: 91.5,
            trend: TrendLabel::Upward,
        }
    }

    #[test]
    fn saturation_thresholds() {
        assert_eq!(saturation_status(0.49), PillarStatus::Critical);
        assert_eq!(saturation_status(0.5), PillarStatus::Warning);
        assert_eq!(saturation_status(0.69), PillarStatus::Warning);
        assert_eq!(saturation_status(0.7), PillarStatus::Safe);
        assert_eq!(saturation_status(0.98), PillarStatus::Safe);
    }

    #[test]
    fn velocity_thresholds() {
        assert_eq!(velocity_status(0.74), PillarStatus::Critical);
        assert_eq!(velocity_status(0.75), PillarStatus::Warning);
        assert_eq!(velocity_status(0.84), PillarStatus::Warning);
        assert_eq!(velocity_status(0.85), PillarStatus::Safe);
    }

    #[test]
    fn analyze_computes_velocity_from_forecast_mean() {
        // volume 900, forecast mean 100 → velocity 0.9 → SAFE, 90.00%.
        let cards = analyze(900.0, 0.8, &forecast(vec![100, 100, 100]));
        assert_eq!(cards.security.status, PillarStatus::Safe);
        assert_eq!(cards.security.value, 90.0);
        assert_eq!(cards.inclusivity.status, PillarStatus::Safe);
        assert_eq!(cards.inclusivity.value, 0.8);
    }

    #[test]
    fn analyze_floors_negative_forecast_values() {
        let cards = analyze(100.0, 0.6, &forecast(vec![-50, 20, -1]));
        assert_eq!(cards.efficiency.biometric_traffic_trend, vec![0, 20, 0]);
    }

    #[test]
    fn analyze_zero_activity_velocity_is_zero() {
        let cards = analyze(0.0, 0.6, &forecast(vec![0, 0, 0]));
        assert_eq!(cards.security.value, 0.0);
        assert_eq!(cards.security.status, PillarStatus::Critical);
    }

    #[test]
    fn analyze_empty_forecast_treats_mean_as_zero() {
        // No forecast points: velocity = volume / volume = 1.
        let cards = analyze(500.0, 0.6, &forecast(vec![]));
        assert_eq!(cards.security.value, 100.0);
        assert_eq!(cards.security.status, PillarStatus::Safe);
    }

    #[test]
    fn analyze_rounds_card_values() {
        let cards = analyze(1.0, 0.123456, &forecast(vec![1, 1, 1]));
        assert_eq!(cards.inclusivity.value, 0.1235);
        // velocity = 1/2 → 50.00
        assert_eq!(cards.security.value, 50.0);
    }

    #[test]
    fn analyze_passes_forecast_metadata_through() {
        let cards = analyze(10.0, 0.9, &forecast(vec![5, 6, 7]));
        assert_eq!(cards.efficiency.accuracy, 91.5);
        assert_eq!(cards.efficiency.trend, TrendLabel::Upward);
        assert_eq!(cards.efficiency.status, PillarStatus::Safe);
    }

    #[test]
    fn flat_forecast_repeats_scaled_volume() {
        let fallback = StateForecast::flat(200.0, 1.1, 85.0, TrendLabel::Stable);
        assert_eq!(fallback.values, vec![220, 220, 220]);
        assert_eq!(fallback.accuracy, 85.0);
        assert_eq!(fallback.trend, TrendLabel::Stable);
    }

    #[test]
    fn cards_serialize_wire_shape() {
        let cards = analyze(900.0, 0.8, &forecast(vec![100, 100, 100]));
        let json = serde_json::to_value(&cards).unwrap();
        assert_eq!(json["inclusivity"]["status"], "SAFE");
        assert_eq!(json["security"]["value"], 90.0);
        assert!(json["efficiency"]["biometric_traffic_trend"].is_array());
        assert_eq!(json["efficiency"]["trend"], "UPWARD");
    }

    proptest! {
        #[test]
        fn security_value_is_a_percentage(
            volume in 0.0f64..1e9,
            values in proptest::collection::vec(-1_000_000i64..1_000_000, 0..6),
        ) {
            let cards = analyze(volume, 0.5, &forecast(values));
            prop_assert!(cards.security.value >= 0.0);
            prop_assert!(cards.security.value <= 100.0);
        }

        #[test]
        fn forecast_values_never_negative_after_analysis(
            values in proptest::collection::vec(-1_000_000_000i64..1_000_000_000, 0..6),
        ) {
            let cards = analyze(10.0, 0.5, &forecast(values));
            prop_assert!(cards.efficiency.biometric_traffic_trend.iter().all(|v| *v >= 0));
        }
    }
}
