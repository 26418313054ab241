use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const LONG_LEG_MATURITY: &str = "10Y";
pub const SHORT_LEG_MATURITY: &str = "2Y";

/// Spreads below this (but non-negative) render as a flattening curve.
pub const FLATTENING_THRESHOLD_BPS: i32 = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondMarket {
    pub curve_date: NaiveDate,
    pub curve: Vec<CurvePoint>,
    pub benchmarks: Vec<BenchmarkRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurvePoint {
    pub maturity: String,
    pub yield_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalBond {
    pub country: String,
    pub maturity: String,
    pub yield_value: f64,
    #[serde(default)]
    pub change_1d: Option<f64>,
}

/// A global benchmark joined against the domestic curve on maturity label.
/// `spread_vs_curve_bps` is None when the curve has no matching point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRow {
    pub country: String,
    pub maturity: String,
    pub yield_value: f64,
    #[serde(default)]
    pub change_1d: Option<f64>,
    pub spread_vs_curve_bps: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CurveShape {
    Inverted,
    Flattening,
    Normal,
}

impl BondMarket {
    pub fn merge(curve_date: NaiveDate, curve: Vec<CurvePoint>, global: Vec<GlobalBond>) -> Self {
        let benchmarks = global
            .into_iter()
            .map(|g| {
                let spread = curve
                    .iter()
                    .find(|p| p.maturity == g.maturity)
                    .map(|p| to_bps(g.yield_value - p.yield_value));
                BenchmarkRow {
                    country: g.country,
                    maturity: g.maturity,
                    yield_value: g.yield_value,
                    change_1d: g.change_1d,
                    spread_vs_curve_bps: spread,
                }
            })
            .collect();

        Self {
            curve_date,
            curve,
            benchmarks,
        }
    }

    pub fn yield_at(&self, maturity: &str) -> Option<f64> {
        self.curve
            .iter()
            .find(|p| p.maturity == maturity)
            .map(|p| p.yield_value)
    }

    /// 10Y minus 2Y in basis points; None when either leg is absent.
    pub fn term_spread_bps(&self) -> Option<i32> {
        let long = self.yield_at(LONG_LEG_MATURITY)?;
        let short = self.yield_at(SHORT_LEG_MATURITY)?;
        Some(to_bps(long - short))
    }

    pub fn curve_shape(&self) -> Option<CurveShape> {
        self.term_spread_bps().map(classify_spread_bps)
    }
}

pub fn to_bps(pct_points: f64) -> i32 {
    (pct_points * 100.0).round() as i32
}

pub fn classify_spread_bps(bps: i32) -> CurveShape {
    if bps < 0 {
        CurveShape::Inverted
    } else if bps < FLATTENING_THRESHOLD_BPS {
        CurveShape::Flattening
    } else {
        CurveShape::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market(points: &[(&str, f64)]) -> BondMarket {
        let curve = points
            .iter()
            .map(|(m, y)| CurvePoint {
                maturity: (*m).to_string(),
                yield_value: *y,
            })
            .collect();
        BondMarket::merge(
            NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
            curve,
            Vec::new(),
        )
    }

    #[test]
    fn inverted_curve_spread_is_negative_twenty_bps() {
        let m = market(&[("2Y", 4.20), ("10Y", 4.00)]);
        assert_eq!(m.term_spread_bps(), Some(-20));
        assert_eq!(m.curve_shape(), Some(CurveShape::Inverted));
    }

    #[test]
    fn fifty_bps_spread_classifies_normal_at_threshold() {
        let m = market(&[("2Y", 4.00), ("10Y", 4.50)]);
        assert_eq!(m.term_spread_bps(), Some(50));
        assert_eq!(m.curve_shape(), Some(CurveShape::Normal));
    }

    #[test]
    fn sub_threshold_spread_classifies_flattening() {
        let m = market(&[("2Y", 4.00), ("10Y", 4.30)]);
        assert_eq!(m.term_spread_bps(), Some(30));
        assert_eq!(m.curve_shape(), Some(CurveShape::Flattening));
    }

    #[test]
    fn missing_leg_yields_none_instead_of_panicking() {
        let m = market(&[("10Y", 4.00)]);
        assert_eq!(m.term_spread_bps(), None);
        assert_eq!(m.curve_shape(), None);
    }

    #[test]
    fn merge_joins_benchmarks_on_maturity_label() {
        let curve = vec![CurvePoint {
            maturity: "10Y".to_string(),
            yield_value: 4.25,
        }];
        let global = vec![
            GlobalBond {
                country: "DE".to_string(),
                maturity: "10Y".to_string(),
                yield_value: 2.35,
                change_1d: Some(-0.02),
            },
            GlobalBond {
                country: "JP".to_string(),
                maturity: "30Y".to_string(),
                yield_value: 2.05,
                change_1d: None,
            },
        ];

        let m = BondMarket::merge(
            NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
            curve,
            global,
        );
        assert_eq!(m.benchmarks.len(), 2);
        assert_eq!(m.benchmarks[0].spread_vs_curve_bps, Some(-190));
        // No 30Y point on the curve, so the spread renders as N/A.
        assert_eq!(m.benchmarks[1].spread_vs_curve_bps, None);
    }
}
