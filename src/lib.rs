mod aggregate;
mod browser;
mod config;
mod dataset;
mod filters;
mod format;
mod logging;
mod prompt;
mod session;
mod stats;

use std::path::PathBuf;
use thiserror::Error;

pub use browser::RawDataBrowser;
pub use config::{Config, OutputMode};
pub use dataset::{Dataset, Schema, Trip, load};
pub use filters::{City, DayOfWeek, FilterSelection, MonthName, TimeFilter};
pub use format::{humanize_duration, to_english_list, twelve_hour};
pub use logging::init_logging;
pub use prompt::Prompter;
pub use session::run;
pub use stats::{
    BirthYearStats, DurationStats, PopularTrip, StationStats, TimeStats, UserStats,
    duration_stats, station_stats, time_stats, user_stats,
};

#[derive(Debug, Error)]
pub enum BikeshareError {
    #[error("File '{}' not found for {city}", path.display())]
    DataNotFound { city: City, path: PathBuf },
    #[error("'{input}' is not one of: {expected}")]
    InvalidInput { input: String, expected: String },
    #[error("Input closed")]
    Interrupted,
    #[error("Invalid record on line {line}: {message}")]
    InvalidRecord { line: u64, message: String },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_not_found_names_file() {
        let err = BikeshareError::DataNotFound {
            city: City::Chicago,
            path: PathBuf::from("bikeshare_data/chicago.csv"),
        };
        let message = err.to_string();
        assert!(message.contains("bikeshare_data/chicago.csv"));
        assert!(message.contains("Chicago"));
    }
}
