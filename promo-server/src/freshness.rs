//! Inventory freshness classification
//!
//! Pure threshold function over last-update timestamps: green within 7 days,
//! yellow between 7 and 9, red beyond 9 or never updated. The report covers
//! the full entity universe so stores that never reported show up red instead
//! of disappearing.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

const YELLOW_AFTER_DAYS: i64 = 7;
const RED_AFTER_DAYS: i64 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    Green,
    Yellow,
    Red,
}

/// Freshness of one store or region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastUpdate {
    pub entity_id: RecordId,
    pub updated_at: Option<DateTime<Utc>>,
    pub status: Freshness,
}

pub fn classify(updated_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Freshness {
    let Some(updated_at) = updated_at else {
        return Freshness::Red;
    };
    if updated_at < now - Duration::days(RED_AFTER_DAYS) {
        Freshness::Red
    } else if updated_at < now - Duration::days(YELLOW_AFTER_DAYS) {
        Freshness::Yellow
    } else {
        Freshness::Green
    }
}

/// Build the report for `entities`, folding `rows` to the most recent
/// timestamp per entity. Entities with no row at all classify red.
pub fn report(
    entities: Vec<RecordId>,
    rows: Vec<(RecordId, DateTime<Utc>)>,
    now: DateTime<Utc>,
) -> Vec<LastUpdate> {
    let mut latest: HashMap<RecordId, DateTime<Utc>> = HashMap::new();
    for (entity, updated_at) in rows {
        latest
            .entry(entity)
            .and_modify(|t| *t = (*t).max(updated_at))
            .or_insert(updated_at);
    }

    entities
        .into_iter()
        .map(|entity_id| {
            let updated_at = latest.get(&entity_id).copied();
            LastUpdate {
                status: classify(updated_at, now),
                entity_id,
                updated_at,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2025-06-20T12:00:00Z".parse().unwrap()
    }

    fn days_ago(days: i64) -> DateTime<Utc> {
        now() - Duration::days(days)
    }

    #[test]
    fn thresholds() {
        assert_eq!(classify(Some(days_ago(1)), now()), Freshness::Green);
        assert_eq!(classify(Some(days_ago(7)), now()), Freshness::Green);
        assert_eq!(classify(Some(days_ago(8)), now()), Freshness::Yellow);
        assert_eq!(classify(Some(days_ago(9)), now()), Freshness::Yellow);
        assert_eq!(classify(Some(days_ago(10)), now()), Freshness::Red);
        assert_eq!(classify(None, now()), Freshness::Red);
    }

    #[test]
    fn report_takes_the_most_recent_row_per_entity() {
        let store = RecordId::from_table_key("store", "s1");
        let rows = vec![
            (store.clone(), days_ago(12)),
            (store.clone(), days_ago(2)),
        ];
        let report = report(vec![store], rows, now());
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].status, Freshness::Green);
    }

    #[test]
    fn never_updated_store_shows_up_red() {
        let reported = RecordId::from_table_key("store", "s1");
        let silent = RecordId::from_table_key("store", "s2");
        let rows = vec![(reported.clone(), days_ago(1))];
        let report = report(vec![reported, silent.clone()], rows, now());

        let entry = report.iter().find(|r| r.entity_id == silent).unwrap();
        assert_eq!(entry.status, Freshness::Red);
        assert!(entry.updated_at.is_none());
    }
}
