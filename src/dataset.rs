use crate::config::Config;
use crate::filters::{City, DayOfWeek, MonthName};
use crate::BikeshareError;
use chrono::{Datelike, NaiveDateTime, Timelike};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Read};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Which optional columns the source carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl Schema {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        Schema {
            has_gender: headers.iter().any(|h| h == "Gender"),
            has_birth_year: headers.iter().any(|h| h == "Birth Year"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

/// One trip plus the calendar fields derived from its start time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    pub month: MonthName,
    pub day_of_week: DayOfWeek,
    pub start_hour: u32,
}

impl Trip {
    pub fn new(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        duration: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        user_type: impl Into<String>,
    ) -> Self {
        Trip::from_parts(
            start_time,
            end_time,
            duration,
            start_station.into(),
            end_station.into(),
            Some(user_type.into()),
        )
    }

    fn from_parts(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        duration: f64,
        start_station: String,
        end_station: String,
        user_type: Option<String>,
    ) -> Self {
        Trip {
            start_time,
            end_time,
            duration,
            start_station,
            end_station,
            user_type,
            gender: None,
            birth_year: None,
            month: month_of(&start_time),
            day_of_week: DayOfWeek::from_weekday(start_time.weekday()),
            start_hour: start_time.hour(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    #[cfg(test)]
    pub(crate) fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    fn from_raw(raw: RawTrip, line: u64) -> Result<Self, BikeshareError> {
        let start_time = parse_timestamp(&raw.start_time, line)?;
        let end_time = parse_timestamp(&raw.end_time, line)?;
        if !raw.trip_duration.is_finite() || raw.trip_duration < 0.0 {
            return Err(BikeshareError::InvalidRecord {
                line,
                message: format!("invalid trip duration {}", raw.trip_duration),
            });
        }
        Ok(Trip {
            gender: raw.gender,
            birth_year: raw.birth_year.map(|year| year as i32),
            ..Trip::from_parts(
                start_time,
                end_time,
                raw.trip_duration,
                raw.start_station,
                raw.end_station,
                raw.user_type,
            )
        })
    }
}

fn month_of(timestamp: &NaiveDateTime) -> MonthName {
    // month0 is always 0..=11
    MonthName::ALL[timestamp.month0() as usize]
}

fn parse_timestamp(value: &str, line: u64) -> Result<NaiveDateTime, BikeshareError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|e| {
        BikeshareError::InvalidRecord {
            line,
            message: format!("bad timestamp '{}': {}", value, e),
        }
    })
}

/// An ordered, immutable collection of trips sharing a schema.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    schema: Schema,
    trips: Vec<Trip>,
}

impl Dataset {
    pub fn new(schema: Schema, trips: Vec<Trip>) -> Self {
        Dataset { schema, trips }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, BikeshareError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers = rdr.headers()?.clone();
        let schema = Schema::from_headers(&headers);

        let records: Vec<(u64, csv::StringRecord)> = rdr
            .records()
            .map(|r| {
                let record = r?;
                let line = record.position().map_or(0, |p| p.line());
                Ok((line, record))
            })
            .collect::<Result<_, BikeshareError>>()?;

        let trips = records
            .into_par_iter()
            .map(|(line, record)| {
                let raw: RawTrip = record.deserialize(Some(&headers)).map_err(|e| {
                    BikeshareError::InvalidRecord {
                        line,
                        message: e.to_string(),
                    }
                })?;
                Trip::from_raw(raw, line)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Dataset { schema, trips })
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trip> {
        self.trips.iter()
    }

    /// Up to `len` trips starting at `start`; empty once `start` passes the end.
    pub fn slice(&self, start: usize, len: usize) -> &[Trip] {
        let start = start.min(self.trips.len());
        let end = start.saturating_add(len).min(self.trips.len());
        &self.trips[start..end]
    }

    fn retain(&self, keep: impl Fn(&Trip) -> bool + Sync) -> Dataset {
        let trips = self
            .trips
            .par_iter()
            .filter(|trip| keep(trip))
            .cloned()
            .collect();
        Dataset {
            schema: self.schema,
            trips,
        }
    }

    pub fn filter_month(&self, month: MonthName) -> Dataset {
        self.retain(|trip| trip.month == month)
    }

    pub fn filter_day(&self, day: DayOfWeek) -> Dataset {
        self.retain(|trip| trip.day_of_week == day)
    }

    /// Applies both optional filters in one pass; absent filters keep everything.
    pub fn filter(&self, month: Option<MonthName>, day: Option<DayOfWeek>) -> Dataset {
        self.retain(|trip| {
            month.is_none_or(|m| trip.month == m) && day.is_none_or(|d| trip.day_of_week == d)
        })
    }
}

/// Loads the city's trips and applies the optional month and day filters.
pub fn load(
    config: &Config,
    city: City,
    month: Option<MonthName>,
    day: Option<DayOfWeek>,
) -> Result<Dataset, BikeshareError> {
    let path = config.source_path(city);
    let file = File::open(&path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => BikeshareError::DataNotFound {
            city,
            path: path.clone(),
        },
        _ => BikeshareError::Io(e),
    })?;

    let dataset = Dataset::from_reader(file)?;
    tracing::debug!(path = %path.display(), rows = dataset.len(), "loaded trip data");

    let filtered = dataset.filter(month, day);
    tracing::debug!(
        ?month,
        ?day,
        before = dataset.len(),
        after = filtered.len(),
        "applied time filters"
    );
    Ok(filtered)
}
