//! Weekly visit planner solver.
//!
//! A randomized greedy route builder constructs one week at a time, day by
//! day, always hopping to the cheapest feasible next relative. The restart
//! loop repeats it with fresh random orderings and keeps the best-scoring
//! week.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::error::PlannerError;
use crate::graph::DistanceGraph;
use crate::haversine::HaversineMatrix;
use crate::model::{Location, TransportMode, Visit, VisitMode};
use crate::schedule::{Totals, WeeklySchedule};
use crate::scoring::Scorer;
use crate::time::{ClockTime, DayPolicy, Weekday};
use crate::traits::DistanceMatrixProvider;

/// Which travel metric the route builder minimises when picking the next stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    #[default]
    Time,
    Cost,
}

impl FromStr for Preference {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(Preference::Time),
            "cost" => Ok(Preference::Cost),
            other => Err(PlannerError::InvalidOptions(format!("unknown preference '{other}'"))),
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preference::Time => f.write_str("time"),
            Preference::Cost => f.write_str("cost"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolveOptions {
    pub preference: Preference,
    /// Score penalty per minute of travel and visiting.
    pub alpha: f64,
    /// Score penalty per unit of travel cost.
    pub beta: f64,
    /// Number of randomized greedy attempts.
    pub restarts: usize,
    /// Seed for reproducible runs. Drawn from the thread RNG when absent.
    pub seed: Option<u64>,
    /// Run attempts on the rayon pool. Results are identical to a sequential
    /// run with the same seed.
    pub parallel: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            preference: Preference::Time,
            alpha: 0.05,
            beta: 0.02,
            restarts: 50,
            seed: None,
            parallel: false,
        }
    }
}

impl SolveOptions {
    pub fn validate(&self) -> Result<(), PlannerError> {
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(PlannerError::InvalidOptions(format!(
                "alpha must be non-negative, got {}",
                self.alpha
            )));
        }
        if !(self.beta.is_finite() && self.beta >= 0.0) {
            return Err(PlannerError::InvalidOptions(format!(
                "beta must be non-negative, got {}",
                self.beta
            )));
        }
        if self.restarts == 0 {
            return Err(PlannerError::InvalidOptions("restarts must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn scorer(&self) -> Scorer {
        Scorer::new(self.alpha, self.beta)
    }
}

/// Validated input for a scheduling run: locations, modes and their distance graph.
#[derive(Debug, Clone)]
pub struct PlanningProblem {
    locations: Vec<Location>,
    modes: Vec<TransportMode>,
    graph: DistanceGraph,
}

impl PlanningProblem {
    /// Build a problem using great-circle distances.
    pub fn new(locations: Vec<Location>, modes: Vec<TransportMode>) -> Result<Self, PlannerError> {
        Self::with_provider(locations, modes, &HaversineMatrix)
    }

    pub fn with_provider<M>(
        locations: Vec<Location>,
        modes: Vec<TransportMode>,
        provider: &M,
    ) -> Result<Self, PlannerError>
    where
        M: DistanceMatrixProvider,
    {
        if locations.is_empty() {
            return Err(PlannerError::EmptyLocations);
        }
        if modes.is_empty() {
            return Err(PlannerError::EmptyTransportModes);
        }
        for (line, location) in locations.iter().enumerate() {
            location.check().map_err(|reason| PlannerError::InvalidRecord {
                file: "locations".to_string(),
                line: line + 1,
                reason,
            })?;
        }
        for (line, mode) in modes.iter().enumerate() {
            mode.check().map_err(|reason| PlannerError::InvalidRecord {
                file: "transport modes".to_string(),
                line: line + 1,
                reason,
            })?;
        }

        let graph = DistanceGraph::build(&locations, provider)?;

        Ok(Self {
            locations,
            modes,
            graph,
        })
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn modes(&self) -> &[TransportMode] {
        &self.modes
    }

    pub fn graph(&self) -> &DistanceGraph {
        &self.graph
    }
}

/// Distance, duration and price of one hop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    pub distance_km: f64,
    pub minutes: f64,
    pub cost: f64,
}

pub fn travel_leg(distance_km: f64, mode: &TransportMode) -> Leg {
    Leg {
        distance_km,
        minutes: mode.travel_minutes(distance_km),
        cost: mode.travel_cost(distance_km),
    }
}

/// Modes eligible for a hop of `distance_km`.
///
/// Bus and train only beyond 3 km, bicycle within 1..=3 km, walking under
/// 1 km. When the band matches nothing, every mode is allowed.
pub fn modes_for_distance(distance_km: f64, modes: &[TransportMode]) -> Vec<&TransportMode> {
    let eligible = modes
        .iter()
        .filter(|mode| {
            let name = mode.name.to_lowercase();
            match name.as_str() {
                "bus" | "train" => distance_km > 3.0,
                "bicycle" => (1.0..=3.0).contains(&distance_km),
                "walking" => distance_km < 1.0,
                _ => false,
            }
        })
        .collect::<Vec<_>>();

    if eligible.is_empty() {
        modes.iter().collect()
    } else {
        eligible
    }
}

/// Best next stop found so far within a day.
struct Candidate<'a> {
    index: usize,
    mode: &'a TransportMode,
    leg: Leg,
    arrival: ClockTime,
    departure: ClockTime,
    metric: f64,
}

/// Build one weekly schedule greedily.
///
/// `order` lists indices into the problem's locations and forms the working
/// pool; its order decides ties between equally good candidates. Each
/// location is visited at most once per week. Days that cannot be filled end
/// early; that is a normal outcome, not an error.
pub fn build_schedule<R>(
    problem: &PlanningProblem,
    order: &[usize],
    preference: Preference,
    rng: &mut R,
) -> WeeklySchedule
where
    R: Rng + ?Sized,
{
    let locations = &problem.locations;
    let mut remaining: Vec<usize> = order.to_vec();
    let mut schedule = WeeklySchedule::new();

    for day in Weekday::ALL {
        let policy = DayPolicy::for_day(day);

        // A day opens at the start of the allowed hours, so only relatives
        // whose visit fits before closing can open it.
        let openers = remaining
            .iter()
            .copied()
            .filter(|&i| locations[i].prefers(day))
            .filter(|&i| {
                let duration = f64::from(locations[i].duration_minutes);
                policy.allowed.contains(policy.allowed.start.add_minutes(duration))
            })
            .collect::<Vec<_>>();

        let Some(&start) = openers.choose(rng) else {
            trace!(%day, "no candidates, skipping day");
            continue;
        };

        let opening = Visit::start(&locations[start], day, policy.allowed.start);
        let mut clock = opening.departure;
        let mut current = start;
        let mut placed = 1;
        schedule.push(opening);
        remaining.retain(|&i| i != start);

        while placed < policy.max_visits {
            let Some(next) = best_next(
                problem,
                &remaining,
                current,
                clock,
                day,
                &policy,
                preference,
            ) else {
                trace!(%day, placed, "no feasible next stop");
                break;
            };

            let location = &locations[next.index];
            schedule.push(Visit {
                location: location.name.clone(),
                district: location.district.clone(),
                latitude: location.latitude,
                longitude: location.longitude,
                day,
                arrival: next.arrival,
                departure: next.departure,
                mode: VisitMode::Transport(next.mode.name.clone()),
                distance_km: next.leg.distance_km,
                travel_minutes: next.leg.minutes,
                travel_cost: next.leg.cost,
            });

            clock = next.departure;
            current = next.index;
            placed += 1;
            remaining.retain(|&i| i != next.index);
        }
    }

    schedule
}

/// Cheapest feasible (location, mode) pair reachable from `current` at `clock`.
/// The first pair found wins ties.
fn best_next<'a>(
    problem: &'a PlanningProblem,
    remaining: &[usize],
    current: usize,
    clock: ClockTime,
    day: Weekday,
    policy: &DayPolicy,
    preference: Preference,
) -> Option<Candidate<'a>> {
    let mut best: Option<Candidate<'a>> = None;

    for &index in remaining {
        let location = &problem.locations[index];
        if !location.prefers(day) {
            continue;
        }

        let distance = problem.graph.distance_between(current, index);
        for mode in modes_for_distance(distance, &problem.modes) {
            let leg = travel_leg(distance, mode);
            let arrival = clock.add_minutes(leg.minutes);

            if !policy.allowed.contains(arrival) || !location.preferred_window.contains(arrival) {
                continue;
            }

            let departure = arrival.add_minutes(f64::from(location.duration_minutes));
            if !policy.allowed.contains(departure) {
                continue;
            }

            let metric = match preference {
                Preference::Time => leg.minutes,
                Preference::Cost => leg.cost,
            };

            if best.as_ref().is_none_or(|b| metric < b.metric) {
                best = Some(Candidate {
                    index,
                    mode,
                    leg,
                    arrival,
                    departure,
                    metric,
                });
            }
        }
    }

    best
}

/// Best schedule of a run, with the run's instrumentation.
#[derive(Debug, Clone)]
pub struct PlannerResult {
    pub schedule: WeeklySchedule,
    pub totals: Totals,
    /// Index of the attempt that produced `schedule`.
    pub best_attempt: usize,
    /// Candidate schedules evaluated.
    pub attempts: usize,
    pub elapsed: Duration,
    /// Seed the run used; pass it back through [`SolveOptions::seed`] to reproduce.
    pub seed: u64,
}

struct Attempt {
    index: usize,
    schedule: WeeklySchedule,
    totals: Totals,
}

/// Independent RNG stream per attempt so parallel and sequential runs agree.
fn attempt_rng(seed: u64, attempt: usize) -> SmallRng {
    SmallRng::seed_from_u64(seed ^ (attempt as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn run_attempt(
    problem: &PlanningProblem,
    options: &SolveOptions,
    scorer: &Scorer,
    seed: u64,
    index: usize,
) -> Result<Attempt, PlannerError> {
    let mut rng = attempt_rng(seed, index);
    let mut order = (0..problem.locations.len()).collect::<Vec<_>>();
    order.shuffle(&mut rng);

    let schedule = build_schedule(problem, &order, options.preference, &mut rng);
    let totals = scorer.score(&schedule, &problem.locations)?;
    debug!(
        attempt = index,
        visits = schedule.len(),
        score = totals.final_score,
        "attempt finished"
    );

    Ok(Attempt {
        index,
        schedule,
        totals,
    })
}

/// Keep the incumbent unless the challenger scores strictly higher.
fn keep_better(incumbent: Attempt, challenger: Attempt) -> Attempt {
    if incumbent.totals.final_score >= challenger.totals.final_score {
        incumbent
    } else {
        challenger
    }
}

/// Run `options.restarts` randomized attempts and return the best one.
///
/// Ties go to the earliest attempt, in parallel mode as well.
/// Only the incumbent schedule is held while attempts run.
pub fn solve(
    problem: &PlanningProblem,
    options: &SolveOptions,
) -> Result<PlannerResult, PlannerError> {
    options.validate()?;

    let started = Instant::now();
    let scorer = options.scorer();
    let seed = options.seed.unwrap_or_else(|| rand::rng().random());

    // The parallel reduction combines neighbours in attempt order, so the
    // earlier attempt is always the incumbent.
    let best = if options.parallel {
        (0..options.restarts)
            .into_par_iter()
            .map(|index| run_attempt(problem, options, &scorer, seed, index))
            .try_reduce_with(|incumbent, challenger| Ok(keep_better(incumbent, challenger)))
            .transpose()?
    } else {
        (0..options.restarts).try_fold(None, |best: Option<Attempt>, index| {
            let attempt = run_attempt(problem, options, &scorer, seed, index)?;
            Ok::<_, PlannerError>(Some(match best {
                Some(incumbent) => keep_better(incumbent, attempt),
                None => attempt,
            }))
        })?
    };

    let count = options.restarts;
    let best = best
        .ok_or_else(|| PlannerError::InvalidOptions("restarts must be at least 1".to_string()))?;

    let elapsed = started.elapsed();
    info!(
        restarts = count,
        best_attempt = best.index,
        score = best.totals.final_score,
        elapsed_secs = elapsed.as_secs_f64(),
        "schedule search completed"
    );

    Ok(PlannerResult {
        schedule: best.schedule,
        totals: best.totals,
        best_attempt: best.index,
        attempts: count,
        elapsed,
        seed,
    })
}
