//! Global exchange ordering and the two-rail board layout.
//!
//! Exchanges are ranked either by today's sunrise instant at their
//! coordinates (earliest daylight first) or by raw longitude descending
//! (eastern first), a cheap spatial proxy for solar progression. Both
//! orderings are total and stable: every tie breaks by ascending id, so
//! repeated calls with the same inputs produce identical output.
//!
//! The ordered sequence is then split into two order-preserving rails.
//! With `half = ceil(n / 2)`, the first `half` entries form the left rail
//! in order and the rest form the right rail *reversed*, so that the left
//! rail read top-down followed by the right rail read bottom-up
//! reconstructs the sequence exactly. Both columns converge toward the
//! horizontal center of the board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalogue::Catalogue;
use crate::solar;

/// Which sort key to rank by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderingKey {
    Sunrise,
    Longitude,
}

/// The resolved sort key for one exchange.
///
/// `Unranked` covers both missing data (invalid coordinates) and polar
/// degeneracy (no sunrise today); either way the exchange sorts last.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Sunrise(DateTime<Utc>),
    Longitude(f64),
    Unranked,
}

/// Which display column an exchange landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rail {
    Left,
    Right,
}

/// One exchange's place in the global ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortedExchange {
    pub id: String,
    pub sort_key: SortKey,
    pub rail: Rail,
    /// Index within the rail's own display order.
    pub rail_position: usize,
}

/// The two display columns, each in its own display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rails {
    pub left: Vec<SortedExchange>,
    pub right: Vec<SortedExchange>,
}

/// Full ordering output: the global sequence plus the rail split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub sequence: Vec<SortedExchange>,
    pub rails: Rails,
}

/// Rank the whole catalogue at `instant` and split it into rails.
pub fn order(catalogue: &Catalogue, instant: DateTime<Utc>, key: OrderingKey) -> BoardLayout {
    let date = instant.date_naive();

    let mut entries: Vec<(String, SortKey)> = catalogue
        .exchanges()
        .iter()
        .map(|exchange| {
            let sort_key = match key {
                OrderingKey::Sunrise => exchange
                    .coordinates
                    .and_then(|c| solar::sunrise_utc(date, c.latitude, c.longitude))
                    .map(SortKey::Sunrise)
                    .unwrap_or(SortKey::Unranked),
                OrderingKey::Longitude => exchange
                    .coordinates
                    .map(|c| SortKey::Longitude(c.longitude))
                    .unwrap_or(SortKey::Unranked),
            };
            (exchange.id.clone(), sort_key)
        })
        .collect();

    entries.sort_by(|a, b| compare_keys(&a.1, &b.1).then_with(|| a.0.cmp(&b.0)));

    let n = entries.len();
    let half = n.div_ceil(2);
    let sequence: Vec<SortedExchange> = entries
        .into_iter()
        .enumerate()
        .map(|(i, (id, sort_key))| {
            let (rail, rail_position) = if i < half {
                (Rail::Left, i)
            } else {
                // Right rail displays bottom-up: last in sequence sits at
                // rail position 0.
                (Rail::Right, n - 1 - i)
            };
            SortedExchange {
                id,
                sort_key,
                rail,
                rail_position,
            }
        })
        .collect();

    let left = sequence[..half].to_vec();
    let right: Vec<SortedExchange> = sequence[half..].iter().rev().cloned().collect();

    BoardLayout {
        sequence,
        rails: Rails { left, right },
    }
}

fn compare_keys(a: &SortKey, b: &SortKey) -> std::cmp::Ordering {
    use std::cmp::Ordering::*;
    match (a, b) {
        // Earliest sunrise first.
        (SortKey::Sunrise(x), SortKey::Sunrise(y)) => x.cmp(y),
        // Most eastern longitude first.
        (SortKey::Longitude(x), SortKey::Longitude(y)) => y.total_cmp(x),
        (SortKey::Unranked, SortKey::Unranked) => Equal,
        (SortKey::Unranked, _) => Greater,
        (_, SortKey::Unranked) => Less,
        // Keys are homogeneous within a single ordering call.
        _ => Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{Catalogue, ExchangeRecord};
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn record(id: &str, latitude: f64, longitude: f64) -> ExchangeRecord {
        ExchangeRecord {
            id: id.to_string(),
            timezone: "UTC".to_string(),
            latitude,
            longitude,
            schedule: "CONTINUOUS_09:00_17:00".to_string(),
            workdays: None,
            exceptions: Vec::new(),
        }
    }

    fn catalogue_of(records: Vec<ExchangeRecord>) -> Catalogue {
        let (catalogue, diagnostics) = Catalogue::from_records(records);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        catalogue
    }

    fn june_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 18, 12, 0, 0).unwrap()
    }

    fn assert_rail_invariant(layout: &BoardLayout) {
        let n = layout.sequence.len();
        assert_eq!(layout.rails.left.len(), n.div_ceil(2));

        let mut reconstructed = layout.rails.left.clone();
        reconstructed.extend(layout.rails.right.iter().rev().cloned());
        assert_eq!(reconstructed, layout.sequence);

        for (i, e) in layout.rails.left.iter().enumerate() {
            assert_eq!(e.rail, Rail::Left);
            assert_eq!(e.rail_position, i);
        }
        for (i, e) in layout.rails.right.iter().enumerate() {
            assert_eq!(e.rail, Rail::Right);
            assert_eq!(e.rail_position, i);
        }
    }

    #[test]
    fn rail_invariant_at_fixed_sizes() {
        for n in [0usize, 1, 2, 5, 16] {
            let records = (0..n)
                .map(|i| record(&format!("EX{i:02}"), 10.0, i as f64 * 7.0 - 90.0))
                .collect();
            let layout = order(&catalogue_of(records), june_noon(), OrderingKey::Longitude);
            assert_eq!(layout.sequence.len(), n);
            assert_rail_invariant(&layout);
        }
    }

    #[test]
    fn longitude_ordering_is_east_first() {
        let records = vec![
            record("NYSE", 40.7128, -74.0060),
            record("LSE", 51.5074, -0.1278),
            record("TSE", 35.6762, 139.6503),
        ];
        let layout = order(&catalogue_of(records), june_noon(), OrderingKey::Longitude);
        let ids: Vec<&str> = layout.sequence.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["TSE", "LSE", "NYSE"]);
    }

    #[test]
    fn sunrise_ordering_follows_the_sun() {
        // All sunrises are compared on the same UTC calendar day. Tokyo's
        // sunrise for that UTC date falls late in the UTC day (its local
        // next morning), so on the shared axis London ranks first, then
        // New York, then Tokyo.
        let records = vec![
            record("NYSE", 40.7128, -74.0060),
            record("TSE", 35.6762, 139.6503),
            record("LSE", 51.5074, -0.1278),
        ];
        let layout = order(&catalogue_of(records), june_noon(), OrderingKey::Sunrise);
        let ids: Vec<&str> = layout.sequence.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["LSE", "NYSE", "TSE"]);
    }

    #[test]
    fn ties_break_by_ascending_id() {
        let records = vec![
            record("BBB", 48.0, 2.0),
            record("AAA", 48.0, 2.0),
            record("CCC", 48.0, 2.0),
        ];
        let layout = order(&catalogue_of(records), june_noon(), OrderingKey::Sunrise);
        let ids: Vec<&str> = layout.sequence.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["AAA", "BBB", "CCC"]);
    }

    #[test]
    fn polar_and_invalid_entries_sort_last() {
        let mut records = vec![
            record("POLAR", 85.0, 10.0),
            record("LSE", 51.5074, -0.1278),
        ];
        // Invalid latitude: degrades to unranked with a diagnostic.
        records.push(record("BROKEN", 200.0, 0.0));
        let (catalogue, diagnostics) = Catalogue::from_records(records);
        assert_eq!(diagnostics.len(), 1);

        // Winter solstice: no sunrise at 85N.
        let instant = Utc.with_ymd_and_hms(2025, 12, 21, 12, 0, 0).unwrap();
        let layout = order(&catalogue, instant, OrderingKey::Sunrise);
        let ids: Vec<&str> = layout.sequence.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["LSE", "BROKEN", "POLAR"]);
        assert_eq!(layout.sequence[1].sort_key, SortKey::Unranked);
        assert_eq!(layout.sequence[2].sort_key, SortKey::Unranked);
    }

    #[test]
    fn ordering_is_idempotent() {
        let records = vec![
            record("NYSE", 40.7128, -74.0060),
            record("TSE", 35.6762, 139.6503),
            record("LSE", 51.5074, -0.1278),
            record("ASX", -33.8688, 151.2093),
        ];
        let catalogue = catalogue_of(records);
        let a = order(&catalogue, june_noon(), OrderingKey::Sunrise);
        let b = order(&catalogue, june_noon(), OrderingKey::Sunrise);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn rails_reconstruct_sequence_for_any_size(n in 0usize..48, seed in 0u64..1000) {
            // Longitudes collide on purpose so tie-breaking is exercised.
            let records = (0..n)
                .map(|i| {
                    let lon = ((i as u64 * 37 + seed) % 24) as f64 * 15.0 - 180.0;
                    record(&format!("EX{i:02}"), 20.0, lon)
                })
                .collect();
            let layout = order(&catalogue_of(records), june_noon(), OrderingKey::Longitude);
            assert_rail_invariant(&layout);
        }
    }
}
