use chrono::NaiveDate;
use rand::Rng;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// A daily tracked quantity. `FIELD` is the JSON key the value is exposed under.
pub trait MetricValue: Copy + Serialize + Send + Sync + 'static {
    const FIELD: &'static str;

    fn placeholder<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Millilitres(pub u32);

impl MetricValue for Millilitres {
    const FIELD: &'static str = "amount";

    fn placeholder<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Millilitres(rng.gen_range(500..1500))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Hours(pub f64);

impl MetricValue for Hours {
    const FIELD: &'static str = "hours";

    fn placeholder<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Hours(f64::from(rng.gen_range(6u8..9)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyMetric<V> {
    pub date: NaiveDate,
    pub value: V,
}

impl<V> DailyMetric<V> {
    pub fn new(date: NaiveDate, value: V) -> Self {
        Self { date, value }
    }

    pub fn day_name(&self) -> String {
        self.date.format("%a").to_string()
    }
}

impl<V: MetricValue> Serialize for DailyMetric<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entry = serializer.serialize_struct("DailyMetric", 3)?;
        entry.serialize_field("date", &self.date.format("%Y-%m-%d").to_string())?;
        entry.serialize_field("dayName", &self.day_name())?;
        entry.serialize_field(V::FIELD, &self.value)?;
        entry.end()
    }
}
