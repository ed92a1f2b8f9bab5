use std::sync::{Mutex, MutexGuard};

use chrono::{Duration, NaiveDate};

use crate::models::{DailyMetric, MetricValue};

pub const WEEK_DAYS: i64 = 7;

/// In-memory daily series keyed by calendar date. Entries keep insertion order
/// and are never evicted.
pub struct MetricStore<V> {
    entries: Mutex<Vec<DailyMetric<V>>>,
}

impl<V: MetricValue> MetricStore<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// A store holding placeholder values for the week ending on `today`.
    pub fn seeded(today: NaiveDate) -> Self {
        let store = Self::new();
        store.reset(today);
        store
    }

    fn lock(&self) -> MutexGuard<'_, Vec<DailyMetric<V>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Drops everything and re-seeds the trailing week.
    pub fn reset(&self, today: NaiveDate) {
        let mut rng = rand::thread_rng();
        let seeded: Vec<DailyMetric<V>> = (0..WEEK_DAYS)
            .rev()
            .map(|offset| DailyMetric::new(today - Duration::days(offset), V::placeholder(&mut rng)))
            .collect();
        *self.lock() = seeded;
    }

    pub fn get(&self, date: NaiveDate) -> Option<DailyMetric<V>> {
        self.lock().iter().find(|e| e.date == date).cloned()
    }

    /// Replaces the value for `date`, or appends a new entry on first write.
    pub fn upsert(&self, date: NaiveDate, value: V) -> DailyMetric<V> {
        let mut entries = self.lock();
        match entries.iter_mut().find(|e| e.date == date) {
            Some(existing) => {
                existing.value = value;
                existing.clone()
            }
            None => {
                let entry = DailyMetric::new(date, value);
                entries.push(entry.clone());
                entry
            }
        }
    }

    pub fn all(&self) -> Vec<DailyMetric<V>> {
        self.lock().clone()
    }
}

impl<V: MetricValue> Default for MetricStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Hours, Millilitres};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_seeded_week_ends_today() {
        let today = day(2024, 3, 10);
        let store = MetricStore::<Millilitres>::seeded(today);
        let entries = store.all();
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[0].date, day(2024, 3, 4));
        assert_eq!(entries[6].date, today);
    }

    #[test]
    fn test_upsert_mutates_in_place() {
        let store = MetricStore::<Millilitres>::seeded(day(2024, 3, 10));
        let date = day(2024, 1, 1);

        store.upsert(date, Millilitres(500));
        store.upsert(date, Millilitres(750));

        let matching: Vec<_> = store.all().into_iter().filter(|e| e.date == date).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].value, Millilitres(750));
        assert_eq!(store.all().len(), 8);
    }

    #[test]
    fn test_upsert_existing_seeded_day() {
        let today = day(2024, 3, 10);
        let store = MetricStore::<Hours>::seeded(today);
        store.upsert(today, Hours(7.5));
        assert_eq!(store.get(today).map(|e| e.value), Some(Hours(7.5)));
        assert_eq!(store.all().len(), 7);
    }

    #[test]
    fn test_reset_discards_writes() {
        let today = day(2024, 3, 10);
        let store = MetricStore::<Hours>::seeded(today);
        store.upsert(day(2023, 12, 25), Hours(9.0));
        store.reset(today);
        assert!(store.get(day(2023, 12, 25)).is_none());
        assert_eq!(store.all().len(), 7);
    }

    #[test]
    fn test_stores_are_isolated() {
        let a = MetricStore::<Millilitres>::new();
        let b = MetricStore::<Millilitres>::new();
        a.upsert(day(2024, 1, 1), Millilitres(1));
        assert!(b.get(day(2024, 1, 1)).is_none());
    }
}
