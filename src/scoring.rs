//! Scoring of candidate weekly schedules.
//!
//! The final score rewards happy relatives and penalises time on the road,
//! money spent travelling and over-packed weekends:
//!
//! `final = bonus - alpha * minutes - beta * cost + fatigue`

use std::collections::HashMap;

use crate::error::PlannerError;
use crate::model::{Location, Visit};
use crate::schedule::{Totals, WeeklySchedule};
use crate::time::{ClockTime, DayPolicy, Weekday, validate_time};

/// Deduction for a weekend day scheduled at full capacity.
pub const FATIGUE_PENALTY: i32 = -2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    /// Penalty per minute of travel and visiting.
    pub alpha: f64,
    /// Penalty per unit of travel cost.
    pub beta: f64,
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            beta: 0.02,
        }
    }
}

impl Scorer {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Full bonus when the day is preferred and the arrival minute lies in
    /// the preferred window (inclusive), half bonus otherwise.
    pub fn bonus(
        &self,
        location: &Location,
        day: Weekday,
        arrival: ClockTime,
    ) -> Result<f64, PlannerError> {
        if !arrival.is_valid() {
            return Err(PlannerError::InvalidTime(arrival.to_string()));
        }

        if location.prefers(day) && location.preferred_window.contains_minute(arrival) {
            Ok(location.happiness_bonus)
        } else {
            Ok(location.happiness_bonus * 0.5)
        }
    }

    /// Same as [`Scorer::bonus`] for an `HH:MM` arrival string.
    pub fn arrival_bonus(
        &self,
        location: &Location,
        day: Weekday,
        arrival: &str,
    ) -> Result<f64, PlannerError> {
        self.bonus(location, day, validate_time(arrival)?)
    }

    pub fn visit_bonus(&self, visit: &Visit, location: &Location) -> Result<f64, PlannerError> {
        self.bonus(location, visit.day, visit.arrival)
    }

    pub fn fatigue_penalty(&self, schedule: &WeeklySchedule) -> i32 {
        schedule
            .iter()
            .filter(|(day, visits)| {
                day.is_weekend() && visits.len() == DayPolicy::WEEKEND.max_visits
            })
            .map(|_| FATIGUE_PENALTY)
            .sum()
    }

    pub fn score(
        &self,
        schedule: &WeeklySchedule,
        locations: &[Location],
    ) -> Result<Totals, PlannerError> {
        let by_name = locations
            .iter()
            .map(|location| (location.name.as_str(), location))
            .collect::<HashMap<_, _>>();

        let mut bonus = 0.0;
        let mut minutes = 0.0;
        let mut cost = 0.0;

        for visit in schedule.visits() {
            let location = by_name
                .get(visit.location.as_str())
                .ok_or_else(|| PlannerError::UnknownLocation(visit.location.clone()))?;

            bonus += self.visit_bonus(visit, location)?;
            minutes += visit.travel_minutes + f64::from(location.duration_minutes);
            cost += visit.travel_cost;
        }

        let fatigue = self.fatigue_penalty(schedule);
        let final_score = bonus - self.alpha * minutes - self.beta * cost + f64::from(fatigue);

        Ok(Totals {
            bonus,
            minutes,
            cost,
            fatigue,
            final_score,
        })
    }
}
