//! Relatives living across Seoul, for realistic planner fixtures.
//!
//! Coordinates are district landmarks; preferred days and windows mirror the
//! shape of the festival-week data set.

#![allow(dead_code)]

use visit_planner::model::{Location, TransportMode};
use visit_planner::time::{TimeWindow, Weekdays};

/// (name, district, lat, lon, preferred days, preferred window, bonus, duration)
type Row = (&'static str, &'static str, f64, f64, &'static str, &'static str, f64, u32);

pub const RELATIVES: &[Row] = &[
    ("Grandma Kim", "Jongno-gu", 37.5735, 126.9790, "Mon, Sat", "18:00-20:00", 12.0, 60),
    ("Uncle Min", "Mapo-gu", 37.5663, 126.9016, "Sat, Sun", "10:00-13:00", 8.0, 45),
    ("Aunt Soo", "Gangnam-gu", 37.5172, 127.0473, "Tue, Sun", "18:30-20:00", 10.0, 75),
    ("Cousin Jae", "Seodaemun-gu", 37.5791, 126.9368, "Wed, Sat", "18:00-19:30", 6.0, 50),
    ("Grandpa Lee", "Yongsan-gu", 37.5326, 126.9905, "Thu, Sun", "10:30-15:00", 14.0, 90),
    ("Aunt Hye", "Songpa-gu", 37.5145, 127.1059, "Fri, Sat", "18:00-20:30", 9.0, 60),
    ("Cousin Dan", "Seongdong-gu", 37.5633, 127.0371, "Mon, Wed", "18:15-20:00", 5.0, 45),
    ("Uncle Park", "Jung-gu", 37.5641, 126.9979, "Sat, Sun", "11:00-16:00", 11.0, 80),
    ("Aunt Yoon", "Dongdaemun-gu", 37.5744, 127.0396, "Tue, Thu", "18:00-20:00", 7.0, 55),
    ("Cousin Ara", "Gwanak-gu", 37.4784, 126.9516, "Fri, Sun", "18:00-19:00", 6.5, 45),
    ("Great-aunt Oh", "Eunpyeong-gu", 37.6027, 126.9291, "Sat", "12:00-17:00", 13.0, 70),
    ("Cousin Bo", "Jongno-gu", 37.5720, 126.9850, "Mon, Thu, Sun", "18:00-21:00", 4.0, 45),
];

pub fn location(row: &Row) -> Location {
    let (name, district, lat, lon, days, window, bonus, duration) = *row;
    Location::new(
        name,
        district,
        (lat, lon),
        Weekdays::parse_list(days).unwrap(),
        TimeWindow::parse(window).unwrap(),
        bonus,
        duration,
    )
    .unwrap()
}

pub fn seoul_relatives() -> Vec<Location> {
    RELATIVES.iter().map(location).collect()
}

pub fn seoul_transport() -> Vec<TransportMode> {
    vec![
        TransportMode::new("Walking", 5.0, 0.0, 0.0),
        TransportMode::new("Bicycle", 15.0, 0.1, 2.0),
        TransportMode::new("Bus", 25.0, 0.3, 5.0),
        TransportMode::new("Train", 35.0, 0.2, 8.0),
    ]
}

/// Builder for a single test relative with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestRelative {
    name: String,
    coords: (f64, f64),
    days: String,
    window: String,
    bonus: f64,
    duration: u32,
}

impl TestRelative {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            coords: (37.5665, 126.9780),
            days: "Mon".to_string(),
            window: "18:00-21:00".to_string(),
            bonus: 10.0,
            duration: 60,
        }
    }

    pub fn at(mut self, lat: f64, lon: f64) -> Self {
        self.coords = (lat, lon);
        self
    }

    pub fn days(mut self, days: &str) -> Self {
        self.days = days.to_string();
        self
    }

    pub fn window(mut self, window: &str) -> Self {
        self.window = window.to_string();
        self
    }

    pub fn bonus(mut self, bonus: f64) -> Self {
        self.bonus = bonus;
        self
    }

    pub fn duration(mut self, minutes: u32) -> Self {
        self.duration = minutes;
        self
    }

    pub fn build(self) -> Location {
        Location::new(
            self.name,
            "Jung-gu",
            self.coords,
            Weekdays::parse_list(&self.days).unwrap(),
            TimeWindow::parse(&self.window).unwrap(),
            self.bonus,
            self.duration,
        )
        .unwrap()
    }
}
