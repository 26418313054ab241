use crate::domain::bond::{BondMarket, CurvePoint, GlobalBond};
use crate::domain::country::{CountryBoard, CountryMetrics};
use crate::domain::economy::{EconomicIndicator, EconomyBoard};
use crate::domain::equity::{EquityBoard, EquityIndex};
use crate::domain::fx::{FxBoard, FxPair};
use crate::domain::history::{HistoricalParallel, HistoryBoard};
use crate::domain::policy::{CentralBank, PolicyBoard, PolicyMeeting, PolicyStance};
use crate::domain::whale::{TradeSide, WhaleBoard, WhaleTransaction};
use chrono::{Duration, NaiveDate, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

// Base tables for the synthesized payloads. Structure (entry count, labels,
// field presence) is fixed; only magnitudes jitter, and only within bounds
// that keep the derived classifications plausible.

const CURVE_BASES: [(&str, f64); 8] = [
    ("1M", 5.32),
    ("3M", 5.28),
    ("6M", 5.12),
    ("1Y", 4.85),
    ("2Y", 4.35),
    ("5Y", 4.10),
    ("10Y", 4.25),
    ("30Y", 4.45),
];

const GLOBAL_BOND_BASES: [(&str, f64); 6] = [
    ("US", 4.25),
    ("DE", 2.35),
    ("JP", 0.95),
    ("GB", 4.05),
    ("KR", 3.45),
    ("AU", 4.15),
];

const FX_BASES: [(&str, f64, f64); 6] = [
    ("EUR/USD", 1.085, 0.010),
    ("USD/JPY", 151.40, 1.20),
    ("GBP/USD", 1.265, 0.010),
    ("USD/KRW", 1372.0, 8.0),
    ("AUD/USD", 0.655, 0.006),
    ("USD/CNY", 7.24, 0.03),
];

const EQUITY_BASES: [(&str, &str, f64, f64); 6] = [
    ("SPX", "S&P 500", 5220.0, 40.0),
    ("NDX", "Nasdaq 100", 18250.0, 180.0),
    ("DJI", "Dow Jones Industrial", 39100.0, 250.0),
    ("KOSPI", "KOSPI", 2740.0, 25.0),
    ("N225", "Nikkei 225", 38900.0, 320.0),
    ("DAX", "DAX", 18200.0, 150.0),
];

const POLICY_BASES: [(&str, &str, f64, PolicyStance); 5] = [
    ("Federal Reserve", "US", 5.50, PolicyStance::Hawkish),
    ("European Central Bank", "EU", 4.50, PolicyStance::Neutral),
    ("Bank of Japan", "JP", 0.10, PolicyStance::Dovish),
    ("Bank of England", "GB", 5.25, PolicyStance::Neutral),
    ("Bank of Korea", "KR", 3.50, PolicyStance::Neutral),
];

const MEETING_OFFSETS_DAYS: [i64; 5] = [9, 16, 23, 37, 44];

const COUNTRY_BASES: [(&str, &str, f64); 7] = [
    ("US", "United States", 82.0),
    ("DE", "Germany", 78.0),
    ("JP", "Japan", 74.0),
    ("GB", "United Kingdom", 71.0),
    ("KR", "South Korea", 76.0),
    ("BR", "Brazil", 58.0),
    ("TR", "Turkiye", 44.0),
];

const COUNTRY_PILLARS: [&str; 5] = ["growth", "inflation", "fiscal", "external", "stability"];

const ECONOMY_BASES: [(&str, f64, f64, &str, &str); 5] = [
    ("GDP Growth", 2.1, 0.3, "% y/y", "Q2 2026"),
    ("CPI", 3.2, 0.2, "% y/y", "Jun 2026"),
    ("Unemployment", 3.9, 0.2, "%", "Jun 2026"),
    ("PMI Manufacturing", 49.8, 1.0, "index", "Jul 2026"),
    ("Retail Sales", 0.4, 0.3, "% m/m", "Jun 2026"),
];

const HISTORY_BASES: [(&str, &str, f64, &str); 4] = [
    (
        "1970s",
        "Stagflation and the oil shocks",
        0.62,
        "Supply-driven inflation forced central banks to tighten into a slowdown.",
    ),
    (
        "1994",
        "The bond market massacre",
        0.71,
        "A rapid hiking cycle repriced the long end faster than consensus expected.",
    ),
    (
        "2000",
        "Dot-com valuations unwind",
        0.54,
        "Concentrated index leadership reversed once earnings stopped justifying multiples.",
    ),
    (
        "2007",
        "Credit conditions before the crunch",
        0.48,
        "Spreads stayed calm while underlying credit quality quietly deteriorated.",
    ),
];

const WHALE_BASES: [(&str, &str, TradeSide, f64, i64); 6] = [
    ("Berkshire Hathaway", "AAPL", TradeSide::Sell, 1.8e9, 2),
    ("Bridgewater Associates", "SPY", TradeSide::Buy, 6.4e8, 3),
    ("Scion Asset Management", "BABA", TradeSide::Buy, 1.1e8, 5),
    ("Appaloosa Management", "NVDA", TradeSide::Sell, 3.2e8, 6),
    ("Pershing Square", "CMG", TradeSide::Buy, 2.7e8, 9),
    ("Soros Fund Management", "TLT", TradeSide::Sell, 1.5e8, 12),
];

/// Time-seeded rng for fallback payloads. Seeding from the clock keeps the
/// generator free of OS entropy calls, so it cannot fail.
pub fn jitter_rng() -> SmallRng {
    let now = Utc::now();
    let seed = (now.timestamp() as u64) ^ u64::from(now.timestamp_subsec_nanos());
    SmallRng::seed_from_u64(seed)
}

fn jitter(rng: &mut impl Rng, base: f64, spread: f64) -> f64 {
    round2(base + rng.random_range(-spread..spread))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn bond_market(rng: &mut impl Rng) -> BondMarket {
    let curve = CURVE_BASES
        .iter()
        .map(|(maturity, base)| CurvePoint {
            maturity: (*maturity).to_string(),
            yield_value: jitter(rng, *base, 0.15),
        })
        .collect();

    let global = GLOBAL_BOND_BASES
        .iter()
        .map(|(country, base)| GlobalBond {
            country: (*country).to_string(),
            maturity: "10Y".to_string(),
            yield_value: jitter(rng, *base, 0.15),
            change_1d: Some(jitter(rng, 0.0, 0.06)),
        })
        .collect();

    BondMarket::merge(Utc::now().date_naive(), curve, global)
}

pub fn fx_board(rng: &mut impl Rng) -> FxBoard {
    let pairs = FX_BASES
        .iter()
        .map(|(pair, base, spread)| FxPair {
            pair: (*pair).to_string(),
            rate: round4(base + rng.random_range(-spread..*spread)),
            change_pct: Some(jitter(rng, 0.0, 0.8)),
        })
        .collect();
    FxBoard { pairs }
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

pub fn equity_board(rng: &mut impl Rng) -> EquityBoard {
    let indices = EQUITY_BASES
        .iter()
        .map(|(symbol, name, base, spread)| EquityIndex {
            symbol: (*symbol).to_string(),
            name: (*name).to_string(),
            price: jitter(rng, *base, *spread),
            change_pct: Some(jitter(rng, 0.0, 1.5)),
        })
        .collect();
    EquityBoard { indices }
}

pub fn policy_board(rng: &mut impl Rng) -> PolicyBoard {
    let central_banks = POLICY_BASES
        .iter()
        .map(|(bank, country, base, stance)| CentralBank {
            bank: (*bank).to_string(),
            country: (*country).to_string(),
            policy_rate: jitter(rng, *base, 0.10).max(0.0),
            stance: Some(*stance),
        })
        .collect();

    let today = Utc::now().date_naive();
    let upcoming_meetings = POLICY_BASES
        .iter()
        .zip(MEETING_OFFSETS_DAYS)
        .map(|((bank, _, _, _), offset)| PolicyMeeting {
            bank: (*bank).to_string(),
            date: mock_meeting_date(today, offset),
        })
        .collect();

    PolicyBoard {
        central_banks,
        upcoming_meetings,
    }
}

pub fn country_board(rng: &mut impl Rng) -> CountryBoard {
    let countries = COUNTRY_BASES
        .iter()
        .map(|(code, name, base)| {
            let mut scores = BTreeMap::new();
            for pillar in COUNTRY_PILLARS {
                scores.insert(
                    pillar.to_string(),
                    jitter(rng, *base, 5.0).clamp(0.0, 100.0),
                );
            }
            CountryMetrics {
                code: (*code).to_string(),
                name: (*name).to_string(),
                scores,
                overall_score: jitter(rng, *base, 3.0).clamp(0.0, 100.0),
            }
        })
        .collect();
    CountryBoard { countries }
}

pub fn economy_board(rng: &mut impl Rng) -> EconomyBoard {
    let indicators = ECONOMY_BASES
        .iter()
        .map(|(name, base, spread, unit, period)| EconomicIndicator {
            name: (*name).to_string(),
            value: jitter(rng, *base, *spread),
            unit: (*unit).to_string(),
            period: (*period).to_string(),
        })
        .collect();
    EconomyBoard { indicators }
}

pub fn history_board(rng: &mut impl Rng) -> HistoryBoard {
    let parallels = HISTORY_BASES
        .iter()
        .map(|(era, title, base, summary)| HistoricalParallel {
            era: (*era).to_string(),
            title: (*title).to_string(),
            similarity: jitter(rng, *base, 0.05).clamp(0.0, 1.0),
            summary: (*summary).to_string(),
        })
        .collect();
    HistoryBoard { parallels }
}

pub fn whale_board(rng: &mut impl Rng) -> WhaleBoard {
    let today = Utc::now().date_naive();
    let transactions = WHALE_BASES
        .iter()
        .map(|(actor, symbol, side, base, days_ago)| WhaleTransaction {
            actor: (*actor).to_string(),
            symbol: (*symbol).to_string(),
            side: *side,
            value_usd: (base * rng.random_range(0.9..1.1)).round(),
            disclosed_at: today - Duration::days(*days_ago),
        })
        .collect();
    WhaleBoard { transactions }
}

fn mock_meeting_date(today: NaiveDate, offset: i64) -> NaiveDate {
    today + Duration::days(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng_pair() -> (SmallRng, SmallRng) {
        (SmallRng::seed_from_u64(1), SmallRng::seed_from_u64(99))
    }

    #[test]
    fn bond_structure_is_deterministic_across_generations() {
        let (mut a, mut b) = rng_pair();
        let one = bond_market(&mut a);
        let two = bond_market(&mut b);

        let labels = |m: &BondMarket| -> Vec<String> {
            m.curve.iter().map(|p| p.maturity.clone()).collect()
        };
        assert_eq!(labels(&one), labels(&two));
        assert_eq!(one.benchmarks.len(), two.benchmarks.len());
        // Every benchmark carries the change field in the same way.
        assert!(one.benchmarks.iter().all(|b| b.change_1d.is_some()));
        assert!(two.benchmarks.iter().all(|b| b.change_1d.is_some()));
    }

    #[test]
    fn bond_mock_always_supports_spread_classification() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let m = bond_market(&mut rng);
            assert!(m.term_spread_bps().is_some());
            assert!(m.curve_shape().is_some());
        }
    }

    #[test]
    fn bond_yields_stay_within_jitter_bounds() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..20 {
            let m = bond_market(&mut rng);
            for (point, (label, base)) in m.curve.iter().zip(CURVE_BASES) {
                assert_eq!(point.maturity, label);
                assert!(
                    (point.yield_value - base).abs() <= 0.16,
                    "{label} drifted to {}",
                    point.yield_value
                );
            }
        }
    }

    #[test]
    fn fx_board_has_stable_pairs_and_bounded_rates() {
        let (mut a, mut b) = rng_pair();
        let one = fx_board(&mut a);
        let two = fx_board(&mut b);
        let pairs = |f: &FxBoard| -> Vec<String> {
            f.pairs.iter().map(|p| p.pair.clone()).collect()
        };
        assert_eq!(pairs(&one), pairs(&two));
        for (p, (_, base, spread)) in one.pairs.iter().zip(FX_BASES) {
            assert!((p.rate - base).abs() <= spread + 0.001);
            assert!(p.change_pct.is_some());
        }
    }

    #[test]
    fn policy_rates_never_jitter_negative() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..50 {
            let board = policy_board(&mut rng);
            assert!(board.central_banks.iter().all(|b| b.policy_rate >= 0.0));
            assert_eq!(board.upcoming_meetings.len(), POLICY_BASES.len());
            assert!(board.next_meeting().is_some());
        }
    }

    #[test]
    fn country_scores_stay_in_grading_range() {
        let mut rng = SmallRng::seed_from_u64(13);
        let board = country_board(&mut rng);
        assert_eq!(board.countries.len(), COUNTRY_BASES.len());
        for c in &board.countries {
            assert_eq!(c.scores.len(), COUNTRY_PILLARS.len());
            assert!((0.0..=100.0).contains(&c.overall_score));
        }
    }

    #[test]
    fn history_similarity_stays_in_unit_interval() {
        let mut rng = SmallRng::seed_from_u64(17);
        let board = history_board(&mut rng);
        assert_eq!(board.parallels.len(), HISTORY_BASES.len());
        assert!(board
            .parallels
            .iter()
            .all(|p| (0.0..=1.0).contains(&p.similarity)));
        assert!(board.closest_parallel().is_some());
    }

    #[test]
    fn whale_and_economy_boards_keep_fixed_entry_sets() {
        let (mut a, mut b) = rng_pair();
        let w1 = whale_board(&mut a);
        let w2 = whale_board(&mut b);
        let actors = |w: &WhaleBoard| -> Vec<String> {
            w.transactions.iter().map(|t| t.actor.clone()).collect()
        };
        assert_eq!(actors(&w1), actors(&w2));

        let (mut a, mut b) = rng_pair();
        let e1 = economy_board(&mut a);
        let e2 = economy_board(&mut b);
        let names = |e: &EconomyBoard| -> Vec<String> {
            e.indicators.iter().map(|i| i.name.clone()).collect()
        };
        assert_eq!(names(&e1), names(&e2));
    }

    #[test]
    fn meeting_dates_are_strictly_in_the_future() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        for offset in MEETING_OFFSETS_DAYS {
            assert!(mock_meeting_date(today, offset) > today);
        }
    }
}
