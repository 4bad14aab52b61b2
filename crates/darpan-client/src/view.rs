//! # Chart-Ready View Model
//!
//! Pure derivations from loaded payloads to the structures a renderer
//! binds directly: pie slices, bar heights, status tiles, choropleth
//! fills. No widget toolkit, no styling — just the numbers and the
//! categorical colors.
//!
//! Every structure here is only constructible from a successfully decoded
//! payload, so a screen's fields stay absent until its fetch succeeds.

use darpan_core::{round_to, PillarStatus, TrendLabel};

use crate::types::{AuditReport, HeatmapReport};

/// The demographic split pie: youth share vs. the adult remainder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemographicPie {
    /// Youth share of enrollment, percent.
    pub youth_percent: f64,
    /// Adult share, `100 − youth`.
    pub adult_percent: f64,
}

impl DemographicPie {
    /// Derive the pie from a youth ratio in `[0, 1]`.
    pub fn from_ratio(ratio: f64) -> Self {
        let youth = round_to((ratio * 100.0).clamp(0.0, 100.0), 2);
        Self {
            youth_percent: youth,
            adult_percent: round_to(100.0 - youth, 2),
        }
    }
}

/// One bar of the forecast chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastBar {
    /// Months ahead, starting at 1.
    pub month_offset: usize,
    /// Projected volume.
    pub value: i64,
    /// Height relative to the tallest bar, in `[0, 1]`.
    pub relative_height: f64,
}

/// One status tile.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusTile {
    /// Tile caption.
    pub title: &'static str,
    /// Pillar classification.
    pub status: PillarStatus,
    /// Formatted metric text.
    pub value_text: String,
    /// Tile fill color.
    pub color: &'static str,
}

/// Everything one audit screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Region label shown in the header.
    pub location: String,
    /// Demographic split pie.
    pub pie: DemographicPie,
    /// Forecast bars, one per projected month.
    pub bars: Vec<ForecastBar>,
    /// The three pillar tiles.
    pub tiles: Vec<StatusTile>,
    /// Forecast direction label.
    pub trend: TrendLabel,
    /// Forecast backtest accuracy, percent.
    pub accuracy: f64,
}

impl DashboardView {
    /// Derive the full view from a loaded audit report.
    pub fn from_report(report: &AuditReport) -> Self {
        let cards = &report.cards;
        let pie = DemographicPie::from_ratio(cards.inclusivity.value);

        let values = &cards.efficiency.biometric_traffic_trend;
        let tallest = values.iter().copied().max().unwrap_or(0);
        let bars = values
            .iter()
            .enumerate()
            .map(|(i, value)| ForecastBar {
                month_offset: i + 1,
                value: *value,
                relative_height: if tallest > 0 {
                    *value as f64 / tallest as f64
                } else {
                    0.0
                },
            })
            .collect();

        let tiles = vec![
            StatusTile {
                title: "Generation Saturation",
                status: cards.inclusivity.status,
                value_text: format!("{:.1}% youth", cards.inclusivity.value * 100.0),
                color: cards.inclusivity.status.color(),
            },
            StatusTile {
                title: "Service Access Risk",
                status: cards.security.status,
                value_text: format!("{:.2}% velocity", cards.security.value),
                color: cards.security.status.color(),
            },
            StatusTile {
                title: "Forecast Confidence",
                status: cards.efficiency.status,
                value_text: format!("{:.1}% accuracy", cards.efficiency.accuracy),
                color: cards.efficiency.status.color(),
            },
        ];

        Self {
            location: report.location.clone(),
            pie,
            bars,
            tiles,
            trend: cards.efficiency.trend,
            accuracy: cards.efficiency.accuracy,
        }
    }
}

/// One state's fill on the choropleth of India.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethFill {
    /// Canonical state name.
    pub state: String,
    /// Enrollment-weighted youth ratio.
    pub ratio: f64,
    /// Fill color from the state's classification.
    pub color: &'static str,
}

/// Derive choropleth fills from a loaded heatmap, in state order.
pub fn choropleth_fills(report: &HeatmapReport) -> Vec<ChoroplethFill> {
    report
        .iter()
        .map(|(state, cell)| ChoroplethFill {
            state: state.to_string(),
            ratio: cell.ratio,
            color: cell.status.color(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HeatmapCell;
    use darpan_core::{
        AuditCards, EfficiencyCard, InclusivityCard, SecurityCard,
    };
    use std::collections::BTreeMap;

    fn report(ratio: f64, forecast: Vec<i64>) -> AuditReport {
        AuditReport {
            location: "KOLLAM".to_string(),
            cards: AuditCards {
                inclusivity: InclusivityCard {
                    status: PillarStatus::Warning,
                    value: ratio,
                },
                security: SecurityCard {
                    status: PillarStatus::Safe,
                    value: 91.25,
                },
                efficiency: EfficiencyCard {
                    status: PillarStatus::Safe,
                    biometric_traffic_trend: forecast,
                    accuracy: 88.4,
                    trend: TrendLabel::Upward,
                },
            },
        }
    }

    #[test]
    fn pie_slices_sum_to_one_hundred() {
        let pie = DemographicPie::from_ratio(0.61);
        assert_eq!(pie.youth_percent, 61.0);
        assert_eq!(pie.adult_percent, 39.0);
        assert_eq!(pie.youth_percent + pie.adult_percent, 100.0);
    }

    #[test]
    fn pie_clamps_out_of_band_ratio() {
        assert_eq!(DemographicPie::from_ratio(1.4).youth_percent, 100.0);
        assert_eq!(DemographicPie::from_ratio(-0.2).youth_percent, 0.0);
    }

    #[test]
    fn bars_normalize_against_tallest() {
        let view = DashboardView::from_report(&report(0.6, vec![100, 50, 200]));
        let heights: Vec<f64> = view.bars.iter().map(|b| b.relative_height).collect();
        assert_eq!(heights, [0.5, 0.25, 1.0]);
        assert_eq!(view.bars[0].month_offset, 1);
        assert_eq!(view.bars[2].value, 200);
    }

    #[test]
    fn bars_with_zero_forecast_stay_flat() {
        let view = DashboardView::from_report(&report(0.6, vec![0, 0, 0]));
        assert!(view.bars.iter().all(|b| b.relative_height == 0.0));
    }

    #[test]
    fn tiles_carry_status_colors() {
        let view = DashboardView::from_report(&report(0.6, vec![1, 2, 3]));
        assert_eq!(view.tiles.len(), 3);
        assert_eq!(view.tiles[0].title, "Generation Saturation");
        assert_eq!(view.tiles[0].color, PillarStatus::Warning.color());
        assert_eq!(view.tiles[1].value_text, "91.25% velocity");
        assert_eq!(view.tiles[2].value_text, "88.4% accuracy");
    }

    #[test]
    fn view_keeps_location_and_trend() {
        let view = DashboardView::from_report(&report(0.6, vec![1, 2, 3]));
        assert_eq!(view.location, "KOLLAM");
        assert_eq!(view.trend, TrendLabel::Upward);
        assert_eq!(view.accuracy, 88.4);
    }

    #[test]
    fn choropleth_maps_status_to_fill_color() {
        let mut states = BTreeMap::new();
        states.insert(
            "BIHAR".to_string(),
            HeatmapCell {
                ratio: 0.42,
                status: PillarStatus::Critical,
            },
        );
        states.insert(
            "KERALA".to_string(),
            HeatmapCell {
                ratio: 0.71,
                status: PillarStatus::Safe,
            },
        );
        let fills = choropleth_fills(&HeatmapReport::new(states));
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].state, "BIHAR");
        assert_eq!(fills[0].color, PillarStatus::Critical.color());
        assert_eq!(fills[1].color, PillarStatus::Safe.color());
    }
}
