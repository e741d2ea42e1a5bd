//! Weekly schedule container and its scored totals.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::model::Visit;
use crate::time::Weekday;

/// Visits for each weekday, in visitation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklySchedule {
    days: [Vec<Visit>; 7],
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self, day: Weekday) -> &[Visit] {
        &self.days[day.index()]
    }

    /// Append a visit to the end of its own day.
    pub fn push(&mut self, visit: Visit) {
        self.days[visit.day.index()].push(visit);
    }

    /// Days in Monday-first order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[Visit])> {
        Weekday::ALL.into_iter().map(move |day| (day, self.day(day)))
    }

    pub fn visits(&self) -> impl Iterator<Item = &Visit> {
        self.days.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }

    pub fn contains(&self, location: &str) -> bool {
        self.visits().any(|visit| visit.location == location)
    }
}

impl Serialize for WeeklySchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (day, visits) in self.iter() {
            map.serialize_entry(day.as_str(), visits)?;
        }
        map.end()
    }
}

/// Aggregates computed once per candidate schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub bonus: f64,
    /// Travel minutes plus visit durations.
    pub minutes: f64,
    pub cost: f64,
    /// Zero or negative.
    pub fatigue: i32,
    pub final_score: f64,
}
