//! Domain entities: relatives to visit, ways to travel between them, and
//! the visits the route builder produces.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::time::{ClockTime, TimeWindow, Weekday, Weekdays};

/// A relative's home: the unit of scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique key.
    pub name: String,
    pub district: String,
    pub latitude: f64,
    pub longitude: f64,
    pub preferred_days: Weekdays,
    /// Arrival inside this window earns the full happiness bonus.
    pub preferred_window: TimeWindow,
    pub happiness_bonus: f64,
    pub duration_minutes: u32,
}

impl Location {
    pub fn new(
        name: impl Into<String>,
        district: impl Into<String>,
        coords: (f64, f64),
        preferred_days: Weekdays,
        preferred_window: TimeWindow,
        happiness_bonus: f64,
        duration_minutes: u32,
    ) -> Result<Self, PlannerError> {
        let location = Self {
            name: name.into(),
            district: district.into(),
            latitude: coords.0,
            longitude: coords.1,
            preferred_days,
            preferred_window,
            happiness_bonus,
            duration_minutes,
        };
        location.validate()?;
        Ok(location)
    }

    /// Check the record invariants, returning a human-readable reason on failure.
    pub fn check(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.duration_minutes == 0 {
            return Err("duration must be positive".to_string());
        }
        if !(self.happiness_bonus.is_finite() && self.happiness_bonus > 0.0) {
            return Err("happiness bonus must be positive".to_string());
        }
        if self.preferred_window.start > self.preferred_window.end {
            return Err(format!("preferred window {} is reversed", self.preferred_window));
        }
        if !(self.latitude.is_finite() && self.longitude.is_finite()) {
            return Err("coordinates must be finite".to_string());
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), PlannerError> {
        self.check().map_err(|reason| PlannerError::InvalidRecord {
            file: "<memory>".to_string(),
            line: 0,
            reason: format!("{}: {reason}", self.name),
        })
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    pub fn prefers(&self, day: Weekday) -> bool {
        self.preferred_days.contains(day)
    }
}

/// A way of getting from one location to the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportMode {
    pub name: String,
    pub speed_kmh: f64,
    pub cost_per_km: f64,
    /// Fixed minutes added to every leg using this mode.
    pub transfer_minutes: f64,
}

impl TransportMode {
    pub fn new(
        name: impl Into<String>,
        speed_kmh: f64,
        cost_per_km: f64,
        transfer_minutes: f64,
    ) -> Self {
        Self {
            name: name.into(),
            speed_kmh,
            cost_per_km,
            transfer_minutes,
        }
    }

    pub fn check(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("mode name must not be empty".to_string());
        }
        for (field, value) in [
            ("speed", self.speed_kmh),
            ("cost per km", self.cost_per_km),
            ("transfer time", self.transfer_minutes),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("{field} must be a non-negative number"));
            }
        }
        Ok(())
    }

    /// Minutes to cover `distance_km`, including the transfer time.
    ///
    /// A stationary mode (speed 0) only costs its transfer time.
    pub fn travel_minutes(&self, distance_km: f64) -> f64 {
        let hours = if self.speed_kmh > 0.0 {
            distance_km / self.speed_kmh
        } else {
            0.0
        };
        hours * 60.0 + self.transfer_minutes
    }

    pub fn travel_cost(&self, distance_km: f64) -> f64 {
        distance_km * self.cost_per_km
    }
}

/// How a visit was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum VisitMode {
    /// First visit of the day; nothing travelled.
    Start,
    Transport(String),
}

impl fmt::Display for VisitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisitMode::Start => f.write_str("Start"),
            VisitMode::Transport(name) => f.write_str(name),
        }
    }
}

/// One scheduled stop.
///
/// Export only: `arrival` and `departure` serialize as `HH:MM`, dropping the
/// seconds the route builder works with, so a serialized visit cannot be
/// read back exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visit {
    pub location: String,
    pub district: String,
    pub latitude: f64,
    pub longitude: f64,
    pub day: Weekday,
    pub arrival: ClockTime,
    pub departure: ClockTime,
    pub mode: VisitMode,
    pub distance_km: f64,
    pub travel_minutes: f64,
    pub travel_cost: f64,
}

impl Visit {
    /// The opening visit of a day: no travel leg.
    pub fn start(location: &Location, day: Weekday, arrival: ClockTime) -> Self {
        Self {
            location: location.name.clone(),
            district: location.district.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            day,
            arrival,
            departure: arrival.add_minutes(f64::from(location.duration_minutes)),
            mode: VisitMode::Start,
            distance_km: 0.0,
            travel_minutes: 0.0,
            travel_cost: 0.0,
        }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}
