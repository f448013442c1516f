use crate::aggregate::{distinct_count, mode, most_common_pair, value_counts};
use crate::dataset::Dataset;
use crate::filters::{DayOfWeek, MonthName};
use crate::format::{humanize_duration, to_english_list, twelve_hour};
use comfy_table::presets::NOTHING;
use comfy_table::{Cell, CellAlignment, Table};
use serde::Serialize;
use statrs::statistics::{Data, Distribution};
use std::fmt;

const UNKNOWN: &str = "Unknown";

/// A summary that can be printed as prose or serialised.
pub trait Report: fmt::Display + Serialize {
    /// Shown before the report is computed, e.g. "Calculating User Stats...".
    const TITLE: &'static str;
}

/// Borderless label/value table with the values right-aligned.
fn write_table(f: &mut fmt::Formatter<'_>, rows: &[(String, String)]) -> fmt::Result {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    if let Some(values) = table.column_mut(1) {
        values.set_cell_alignment(CellAlignment::Right);
    }
    writeln!(f, "{}", table.trim_fmt())
}

fn counts_table(counts: &[(String, usize)]) -> Vec<(String, String)> {
    counts
        .iter()
        .map(|(label, count)| (label.clone(), count.to_string()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    /// `None` when the data only spans one month.
    pub popular_months: Option<Vec<MonthName>>,
    /// `None` when the data only spans one weekday.
    pub popular_days: Option<Vec<DayOfWeek>>,
    pub popular_hours: Vec<u32>,
}

pub fn time_stats(dataset: &Dataset) -> TimeStats {
    let months = dataset.iter().map(|t| t.month);
    let days = dataset.iter().map(|t| t.day_of_week);

    TimeStats {
        popular_months: (distinct_count(months.clone()) > 1).then(|| mode(months)),
        popular_days: (distinct_count(days.clone()) > 1).then(|| mode(days)),
        popular_hours: mode(dataset.iter().map(|t| t.start_hour)),
    }
}

impl Report for TimeStats {
    const TITLE: &'static str = "Calculating The Most Frequent Times of Travel...";
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(months) = &self.popular_months {
            writeln!(
                f,
                "The most popular month for traveling is {}.\n",
                to_english_list(months)
            )?;
        }
        if let Some(days) = &self.popular_days {
            writeln!(
                f,
                "The most popular day for traveling is {}.\n",
                to_english_list(days)
            )?;
        }
        if self.popular_hours.is_empty() {
            writeln!(f, "No trips available to find the most popular hour.")
        } else {
            let hours = self.popular_hours.iter().map(|&h| twelve_hour(h, 0));
            writeln!(
                f,
                "The most popular hour of the day to start your travels is {}.",
                to_english_list(hours)
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularTrip {
    pub start_station: String,
    pub end_station: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub popular_start_stations: Vec<String>,
    pub popular_end_stations: Vec<String>,
    pub popular_trip: Option<PopularTrip>,
}

pub fn station_stats(dataset: &Dataset) -> StationStats {
    let popular_trip = most_common_pair(
        dataset
            .iter()
            .map(|t| (t.start_station.as_str(), t.end_station.as_str())),
    )
    .map(|((start, end), count)| PopularTrip {
        start_station: start.to_string(),
        end_station: end.to_string(),
        count,
    });

    StationStats {
        popular_start_stations: mode(dataset.iter().map(|t| t.start_station.as_str()))
            .into_iter()
            .map(String::from)
            .collect(),
        popular_end_stations: mode(dataset.iter().map(|t| t.end_station.as_str()))
            .into_iter()
            .map(String::from)
            .collect(),
        popular_trip,
    }
}

impl Report for StationStats {
    const TITLE: &'static str = "Calculating The Most Popular Stations and Trip...";
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(trip) = &self.popular_trip else {
            return writeln!(f, "No trips available to rank stations.");
        };
        writeln!(
            f,
            "The most popular start station is {}.\n",
            to_english_list(&self.popular_start_stations)
        )?;
        writeln!(
            f,
            "The most popular end station is {}.\n",
            to_english_list(&self.popular_end_stations)
        )?;
        writeln!(f, "The most popular trip:")?;
        write_table(
            f,
            &[
                ("Start station".to_string(), trip.start_station.clone()),
                ("End station".to_string(), trip.end_station.clone()),
            ],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trip_count: usize,
    pub total_seconds: f64,
    /// `None` for an empty dataset.
    pub mean_seconds: Option<f64>,
}

pub fn duration_stats(dataset: &Dataset) -> DurationStats {
    let durations: Vec<f64> = dataset.iter().map(|t| t.duration).collect();
    let trip_count = durations.len();
    let total_seconds = durations.iter().sum();
    let mean_seconds = if durations.is_empty() {
        None
    } else {
        Data::new(durations).mean()
    };

    DurationStats {
        trip_count,
        total_seconds,
        mean_seconds,
    }
}

impl Report for DurationStats {
    const TITLE: &'static str = "Calculating Trip Duration...";
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(mean) = self.mean_seconds else {
            return writeln!(f, "No trips available to compute trip durations.");
        };
        writeln!(
            f,
            "The total traveling done during this period was {}.\n",
            humanize_duration(self.total_seconds)
        )?;
        writeln!(
            f,
            "The average time spent on each trip was {}.",
            humanize_duration(mean)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub oldest: Option<i32>,
    pub youngest: Option<i32>,
    pub most_popular: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    /// `None` when the source has no gender column.
    pub genders: Option<Vec<(String, usize)>>,
    /// `None` when the source has no birth year column.
    pub birth_years: Option<BirthYearStats>,
}

fn breakdown<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<(String, usize)> {
    value_counts(values.map(|v| v.unwrap_or(UNKNOWN)))
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect()
}

pub fn user_stats(dataset: &Dataset) -> UserStats {
    let schema = dataset.schema();
    let user_types = breakdown(dataset.iter().map(|t| t.user_type.as_deref()));
    let genders = schema
        .has_gender
        .then(|| breakdown(dataset.iter().map(|t| t.gender.as_deref())));
    let birth_years = schema.has_birth_year.then(|| {
        let years = dataset.iter().filter_map(|t| t.birth_year);
        BirthYearStats {
            oldest: years.clone().min(),
            youngest: years.clone().max(),
            most_popular: mode(years),
        }
    });

    UserStats {
        user_types,
        genders,
        birth_years,
    }
}

impl Report for UserStats {
    const TITLE: &'static str = "Calculating User Stats...";
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Breakdown of users:")?;
        if self.user_types.is_empty() {
            writeln!(f, "No user data available.")?;
        } else {
            write_table(f, &counts_table(&self.user_types))?;
        }

        writeln!(f, "\nBreakdown of gender:")?;
        match &self.genders {
            Some(genders) if !genders.is_empty() => write_table(f, &counts_table(genders))?,
            _ => writeln!(f, "No gender data available for this city.")?,
        }

        writeln!(f, "\nBreakdown of birth years:")?;
        match &self.birth_years {
            Some(BirthYearStats {
                oldest: Some(oldest),
                youngest: Some(youngest),
                most_popular,
            }) => write_table(
                f,
                &[
                    ("Oldest".to_string(), oldest.to_string()),
                    ("Youngest".to_string(), youngest.to_string()),
                    ("Most popular".to_string(), to_english_list(most_popular)),
                ],
            ),
            _ => writeln!(f, "No birth year data available for this city."),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::dataset::tests::trip;
    use crate::dataset::{Schema, Trip};

    /// True when some line holds exactly these cells, ignoring column padding.
    pub(crate) fn has_row(text: &str, cells: &str) -> bool {
        let wanted: Vec<&str> = cells.split_whitespace().collect();
        text.lines()
            .any(|line| line.split_whitespace().collect::<Vec<_>>() == wanted)
    }

    fn full_schema() -> Schema {
        Schema {
            has_gender: true,
            has_birth_year: true,
        }
    }

    fn sample() -> Dataset {
        Dataset::new(
            full_schema(),
            vec![
                trip(3, 6, 8, "Clark St", "Canal St").with_gender("Male").with_birth_year(1989),
                trip(3, 7, 8, "Clark St", "Canal St").with_gender("Female").with_birth_year(1992),
                trip(4, 3, 17, "Canal St", "Clark St").with_gender("Male").with_birth_year(1989),
                trip(4, 4, 17, "Canal St", "State St").with_birth_year(1992),
                Trip {
                    user_type: Some("Customer".to_string()),
                    ..trip(4, 5, 0, "State St", "Clark St")
                },
            ],
        )
    }

    #[test]
    fn test_time_stats_ties_and_hours() {
        let stats = time_stats(&sample());
        assert_eq!(stats.popular_months, Some(vec![MonthName::April]));
        assert_eq!(stats.popular_hours, vec![8, 17]);
        assert_eq!(
            stats.popular_days,
            Some(vec![DayOfWeek::Monday, DayOfWeek::Tuesday])
        );

        let text = stats.to_string();
        assert!(text.contains("The most popular month for traveling is April."));
        assert!(text.contains("is 8:00 AM, 5:00 PM."));
    }

    #[test]
    fn test_time_stats_omits_single_valued_columns() {
        let march = sample().filter_month(MonthName::March);
        let stats = time_stats(&march);
        assert_eq!(stats.popular_months, None);
        assert_eq!(stats.popular_days, Some(vec![DayOfWeek::Monday, DayOfWeek::Tuesday]));
        assert!(!stats.to_string().contains("month"));
    }

    #[test]
    fn test_time_stats_empty() {
        let stats = time_stats(&Dataset::default());
        assert_eq!(stats.popular_months, None);
        assert_eq!(stats.popular_days, None);
        assert!(stats.popular_hours.is_empty());
        assert!(stats.to_string().contains("No trips available"));
    }

    #[test]
    fn test_station_stats() {
        let stats = station_stats(&sample());
        assert_eq!(stats.popular_start_stations, vec!["Canal St", "Clark St"]);
        assert_eq!(stats.popular_end_stations, vec!["Canal St", "Clark St"]);
        assert_eq!(
            stats.popular_trip,
            Some(PopularTrip {
                start_station: "Clark St".to_string(),
                end_station: "Canal St".to_string(),
                count: 2,
            })
        );
        let text = stats.to_string();
        assert!(text.contains("The most popular start station is Canal St, Clark St."));
        assert!(has_row(&text, "Start station Clark St"));
        assert!(has_row(&text, "End station Canal St"));
    }

    #[test]
    fn test_station_stats_empty() {
        let stats = station_stats(&Dataset::default());
        assert_eq!(stats.popular_trip, None);
        assert_eq!(stats.to_string(), "No trips available to rank stations.\n");
    }

    #[test]
    fn test_duration_stats() {
        let stats = duration_stats(&sample());
        assert_eq!(stats.trip_count, 5);
        assert_eq!(stats.total_seconds, 3000.0);
        assert_eq!(stats.mean_seconds, Some(600.0));
        let text = stats.to_string();
        assert!(text.contains("during this period was 50 minutes."));
        assert!(text.contains("on each trip was 10 minutes."));
    }

    #[test]
    fn test_duration_mean_keeps_fraction() {
        let start = crate::dataset::tests::at(1, 2, 9);
        let dataset = Dataset::new(
            Schema::default(),
            vec![
                Trip::new(start, start, 61.0, "A", "B", "Subscriber"),
                Trip::new(start, start, 62.0, "A", "B", "Subscriber"),
            ],
        );
        let stats = duration_stats(&dataset);
        assert_eq!(stats.mean_seconds, Some(61.5));
        assert!(stats.to_string().contains("was 1 minute, 1 second."));
    }

    #[test]
    fn test_duration_stats_empty() {
        let stats = duration_stats(&Dataset::default());
        assert_eq!(stats.mean_seconds, None);
        assert!(stats.to_string().contains("No trips available"));
    }

    #[test]
    fn test_user_stats_breakdowns_sum_to_rows() {
        let dataset = sample();
        let stats = user_stats(&dataset);
        assert_eq!(
            stats.user_types,
            vec![("Subscriber".to_string(), 4), ("Customer".to_string(), 1)]
        );
        let genders = stats.genders.clone().unwrap();
        assert_eq!(genders[0], ("Male".to_string(), 2));
        assert!(genders.contains(&("Unknown".to_string(), 2)));
        assert_eq!(genders.iter().map(|(_, c)| c).sum::<usize>(), dataset.len());
        assert_eq!(
            stats.user_types.iter().map(|(_, c)| c).sum::<usize>(),
            dataset.len()
        );

        assert_eq!(
            stats.birth_years,
            Some(BirthYearStats {
                oldest: Some(1989),
                youngest: Some(1992),
                most_popular: vec![1989, 1992],
            })
        );
        let text = stats.to_string();
        assert!(has_row(&text, "Subscriber 4"));
        assert!(has_row(&text, "Customer 1"));
        assert!(has_row(&text, "Most popular 1989, 1992"));
        assert!(has_row(&text, "Oldest 1989"));

        // values are right-aligned, so both breakdown rows end in the same column
        let width = |label: &str| text.lines().find(|l| l.trim_start().starts_with(label)).map(str::len);
        assert_eq!(width("Subscriber"), width("Customer"));
    }

    #[test]
    fn test_user_stats_without_optional_columns() {
        let dataset = Dataset::new(Schema::default(), vec![trip(1, 2, 9, "A", "B")]);
        let stats = user_stats(&dataset);
        assert_eq!(stats.genders, None);
        assert_eq!(stats.birth_years, None);
        let text = stats.to_string();
        assert!(text.contains("No gender data available for this city."));
        assert!(text.contains("No birth year data available for this city."));
    }
}
