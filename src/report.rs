//! Text report, JSON export and map route data for a planned week.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::PlannerError;
use crate::schedule::{Totals, WeeklySchedule};
use crate::solver::PlannerResult;
use crate::time::{ClockTime, Weekday};

/// Padding in degrees around the visited points for map axis limits.
const MAP_PADDING_DEG: f64 = 0.01;

pub fn format_schedule(schedule: &WeeklySchedule, totals: &Totals) -> String {
    let mut lines = vec!["=== Best Weekly Schedule ===\n".to_string()];

    for (day, visits) in schedule.iter().filter(|(_, visits)| !visits.is_empty()) {
        lines.push(format!("Day {day}"));
        for visit in visits {
            lines.push(format!(
                concat!(
                    "  {} ({}–{})\n",
                    "    District: {}\n",
                    "    Mode: {}\n",
                    "    Distance: {:.2} km\n",
                    "    Travel Time: {:.1} min\n",
                    "    Cost: {:.2}\n",
                ),
                visit.location,
                visit.arrival,
                visit.departure,
                visit.district,
                visit.mode,
                visit.distance_km,
                visit.travel_minutes,
                visit.travel_cost,
            ));
        }
    }

    lines.push("\n=== Totals ===".to_string());
    lines.push(format!("Total Happiness Bonus: {:.2}", totals.bonus));
    lines.push(format!("Total Travel Minutes: {:.2}", totals.minutes));
    lines.push(format!("Total Travel Cost: {:.2}", totals.cost));
    lines.push(format!("Fatigue Penalty: {}", totals.fatigue));
    lines.push(format!("Final Score: {:.2}", totals.final_score));

    lines.join("\n")
}

/// Plain-text summary of a run's instrumentation.
pub fn runtime_summary(result: &PlannerResult) -> String {
    format!(
        concat!(
            "=== Runtime Log ===\n\n",
            "Function: solve\n",
            "Total candidate schedules evaluated: {}\n",
            "Best attempt: {}\n",
            "Seed: {}\n",
            "Execution time: {:.4} seconds\n",
        ),
        result.attempts,
        result.best_attempt,
        result.seed,
        result.elapsed.as_secs_f64(),
    )
}

/// One stop on a day's route, as a map renderer needs it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub arrival: ClockTime,
    pub departure: ClockTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRoute {
    pub day: Weekday,
    pub points: Vec<RoutePoint>,
}

/// Padded bounding box shared by every per-day map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMap {
    /// `None` when nothing was scheduled.
    pub bounds: Option<Bounds>,
    pub days: Vec<DayRoute>,
}

/// Ordered stops per non-empty day plus the common axis limits.
pub fn route_map(schedule: &WeeklySchedule) -> RouteMap {
    let days = schedule
        .iter()
        .filter(|(_, visits)| !visits.is_empty())
        .map(|(day, visits)| DayRoute {
            day,
            points: visits
                .iter()
                .map(|visit| RoutePoint {
                    name: visit.location.clone(),
                    latitude: visit.latitude,
                    longitude: visit.longitude,
                    arrival: visit.arrival,
                    departure: visit.departure,
                })
                .collect(),
        })
        .collect::<Vec<_>>();

    let bounds = schedule.visits().fold(None, |bounds: Option<Bounds>, visit| {
        let (lat, lon) = visit.coords();
        Some(match bounds {
            None => Bounds {
                min_lat: lat,
                max_lat: lat,
                min_lon: lon,
                max_lon: lon,
            },
            Some(b) => Bounds {
                min_lat: b.min_lat.min(lat),
                max_lat: b.max_lat.max(lat),
                min_lon: b.min_lon.min(lon),
                max_lon: b.max_lon.max(lon),
            },
        })
    });

    let bounds = bounds.map(|b| Bounds {
        min_lat: b.min_lat - MAP_PADDING_DEG,
        max_lat: b.max_lat + MAP_PADDING_DEG,
        min_lon: b.min_lon - MAP_PADDING_DEG,
        max_lon: b.max_lon + MAP_PADDING_DEG,
    });

    RouteMap { bounds, days }
}

#[derive(Serialize)]
struct ResultExport<'a> {
    schedule: &'a WeeklySchedule,
    totals: &'a Totals,
    attempts: usize,
    best_attempt: usize,
    seed: u64,
    elapsed_secs: f64,
}

pub fn to_json(result: &PlannerResult) -> Result<String, PlannerError> {
    let export = ResultExport {
        schedule: &result.schedule,
        totals: &result.totals,
        attempts: result.attempts,
        best_attempt: result.best_attempt,
        seed: result.seed,
        elapsed_secs: result.elapsed.as_secs_f64(),
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

pub fn write_file(path: impl AsRef<Path>, contents: &str) -> Result<(), PlannerError> {
    let path = path.as_ref();
    fs::write(path, contents).map_err(|source| PlannerError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_text(path: impl AsRef<Path>, result: &PlannerResult) -> Result<(), PlannerError> {
    write_file(path, &format_schedule(&result.schedule, &result.totals))
}

pub fn write_json(path: impl AsRef<Path>, result: &PlannerResult) -> Result<(), PlannerError> {
    write_file(path, &to_json(result)?)
}

pub fn write_route_map(
    path: impl AsRef<Path>,
    schedule: &WeeklySchedule,
) -> Result<(), PlannerError> {
    write_file(path, &serde_json::to_string_pretty(&route_map(schedule))?)
}
