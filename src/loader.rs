//! CSV loading for relatives and transport modes.
//!
//! Relatives: `Relative,District,Lat,Lon,PreferredDays,PreferredTime,Bonus,Duration`
//! Transport: `Mode,Speed,CostPerKm,TransferTime`
//!
//! A single bad row fails the whole file.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::PlannerError;
use crate::model::{Location, TransportMode};
use crate::time::{TimeWindow, Weekdays};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RelativeRow {
    relative: String,
    district: String,
    lat: f64,
    lon: f64,
    preferred_days: String,
    preferred_time: String,
    bonus: f64,
    duration: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TransportRow {
    mode: String,
    speed: f64,
    cost_per_km: f64,
    transfer_time: f64,
}

fn read_csv_entries<T, R: Read>(reader: R, source: &str) -> Result<Vec<T>, PlannerError>
where
    for<'de> T: Deserialize<'de>,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(reader));
    let mut entries = vec![];

    for (row, entry) in reader.deserialize().enumerate() {
        let entry = entry.map_err(|err| PlannerError::InvalidRecord {
            file: source.to_string(),
            line: row + 1,
            reason: err.to_string(),
        })?;
        entries.push(entry);
    }

    Ok(entries)
}

fn invalid(source: &str, line: usize) -> impl Fn(String) -> PlannerError + '_ {
    move |reason| PlannerError::InvalidRecord {
        file: source.to_string(),
        line,
        reason,
    }
}

/// Read relatives from CSV. `source` names the input in error messages.
pub fn read_relatives<R: Read>(reader: R, source: &str) -> Result<Vec<Location>, PlannerError> {
    let rows = read_csv_entries::<RelativeRow, _>(reader, source)?;
    let mut relatives: Vec<Location> = Vec::with_capacity(rows.len());

    for (i, row) in rows.into_iter().enumerate() {
        let line = i + 1;
        let to_error = invalid(source, line);

        if relatives.iter().any(|r| r.name == row.relative) {
            return Err(to_error(format!("duplicate relative '{}'", row.relative)));
        }

        let preferred_days =
            Weekdays::parse_list(&row.preferred_days).map_err(|err| to_error(err.to_string()))?;
        let preferred_window =
            TimeWindow::parse(&row.preferred_time).map_err(|err| to_error(err.to_string()))?;

        let location = Location {
            name: row.relative,
            district: row.district,
            latitude: row.lat,
            longitude: row.lon,
            preferred_days,
            preferred_window,
            happiness_bonus: row.bonus,
            duration_minutes: row.duration,
        };
        location.check().map_err(&to_error)?;
        relatives.push(location);
    }

    Ok(relatives)
}

/// Read transport modes from CSV.
pub fn read_transport<R: Read>(
    reader: R,
    source: &str,
) -> Result<Vec<TransportMode>, PlannerError> {
    let rows = read_csv_entries::<TransportRow, _>(reader, source)?;

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            let mode = TransportMode::new(row.mode, row.speed, row.cost_per_km, row.transfer_time);
            mode.check().map_err(invalid(source, i + 1))?;
            Ok(mode)
        })
        .collect()
}

fn open(path: &Path) -> Result<File, PlannerError> {
    File::open(path).map_err(|source| PlannerError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_relatives(path: impl AsRef<Path>) -> Result<Vec<Location>, PlannerError> {
    let path = path.as_ref();
    let source = path.display().to_string();
    let relatives = read_relatives(open(path)?, &source)
        .inspect_err(|err| warn!(%err, "failed to load relatives"))?;
    info!(count = relatives.len(), path = %source, "loaded relatives");
    Ok(relatives)
}

pub fn load_transport(path: impl AsRef<Path>) -> Result<Vec<TransportMode>, PlannerError> {
    let path = path.as_ref();
    let source = path.display().to_string();
    let modes = read_transport(open(path)?, &source)
        .inspect_err(|err| warn!(%err, "failed to load transport modes"))?;
    info!(count = modes.len(), path = %source, "loaded transport modes");
    Ok(modes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{ClockTime, Weekday};

    const RELATIVES: &str = "\
Relative,District,Lat,Lon,PreferredDays,PreferredTime,Bonus,Duration
Grandma,Jongno-gu,37.5735,126.9790,\"Mon, Sat\",18:00-20:00,12,60
Uncle Min,Mapo-gu,37.5663,126.9016,Sun,10:00-13:00,8.5,45
";

    const TRANSPORT: &str = "\
Mode,Speed,CostPerKm,TransferTime
Walking,5,0,0
Bus,25,0.3,5
";

    #[test]
    fn test_reads_relatives() {
        let relatives = read_relatives(RELATIVES.as_bytes(), "relatives.csv").unwrap();
        assert_eq!(relatives.len(), 2);

        let grandma = &relatives[0];
        assert_eq!(grandma.name, "Grandma");
        assert_eq!(grandma.district, "Jongno-gu");
        assert!(grandma.prefers(Weekday::Mon));
        assert!(grandma.prefers(Weekday::Sat));
        assert!(!grandma.prefers(Weekday::Sun));
        assert_eq!(grandma.preferred_window.start, ClockTime::from_hm(18, 0));
        assert_eq!(grandma.preferred_window.end, ClockTime::from_hm(20, 0));
        assert_eq!(grandma.happiness_bonus, 12.0);
        assert_eq!(grandma.duration_minutes, 60);
        assert_eq!(relatives[1].happiness_bonus, 8.5);
    }

    #[test]
    fn test_reads_transport() {
        let modes = read_transport(TRANSPORT.as_bytes(), "transport.csv").unwrap();
        assert_eq!(modes.len(), 2);
        assert_eq!(modes[1].name, "Bus");
        assert_eq!(modes[1].speed_kmh, 25.0);
        assert_eq!(modes[1].cost_per_km, 0.3);
        assert_eq!(modes[1].transfer_minutes, 5.0);
    }

    #[test]
    fn test_header_only_is_empty() {
        let header = "Mode,Speed,CostPerKm,TransferTime\n";
        let modes = read_transport(header.as_bytes(), "transport.csv").unwrap();
        assert!(modes.is_empty());
    }

    #[test]
    fn test_bad_time_window_names_line() {
        let csv = "\
Relative,District,Lat,Lon,PreferredDays,PreferredTime,Bonus,Duration
A,Jung-gu,37.5,127.0,Mon,18:00-20:00,5,30
B,Jung-gu,37.5,127.0,Mon,25:00-20:00,5,30
";
        let err = read_relatives(csv.as_bytes(), "relatives.csv").unwrap_err();
        match err {
            PlannerError::InvalidRecord { file, line, reason } => {
                assert_eq!(file, "relatives.csv");
                assert_eq!(line, 2);
                assert!(reason.contains("25:00"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_zero_duration_and_unknown_day() {
        let zero = "\
Relative,District,Lat,Lon,PreferredDays,PreferredTime,Bonus,Duration
A,Jung-gu,37.5,127.0,Mon,18:00-20:00,5,0
";
        assert!(read_relatives(zero.as_bytes(), "r").unwrap_err().is_data());

        let day = "\
Relative,District,Lat,Lon,PreferredDays,PreferredTime,Bonus,Duration
A,Jung-gu,37.5,127.0,Someday,18:00-20:00,5,30
";
        assert!(read_relatives(day.as_bytes(), "r").is_err());
    }

    #[test]
    fn test_rejects_duplicates_and_missing_columns() {
        let dup = "\
Relative,District,Lat,Lon,PreferredDays,PreferredTime,Bonus,Duration
A,Jung-gu,37.5,127.0,Mon,18:00-20:00,5,30
A,Mapo-gu,37.6,127.1,Tue,18:00-20:00,5,30
";
        let err = read_relatives(dup.as_bytes(), "r").unwrap_err();
        assert!(err.to_string().contains("duplicate"));

        let missing = "Mode,Speed\nBus,25\n";
        assert!(read_transport(missing.as_bytes(), "t").is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_relatives("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, PlannerError::Io { .. }));
    }
}
