use crate::filters::{City, MonthName};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

/// Immutable settings for one run of the explorer.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Year the datasets cover; shown in the greeting and filter summary.
    pub year: i32,
    /// Months a user may filter by.
    pub filter_months: Vec<MonthName>,
    pub page_size: usize,
    pub separator_width: usize,
    pub pause_between_reports: bool,
    pub output: OutputMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("bikeshare_data"),
            year: 2017,
            filter_months: MonthName::ALL[..6].to_vec(),
            page_size: 5,
            separator_width: 40,
            pause_between_reports: true,
            output: OutputMode::Text,
        }
    }
}

impl Config {
    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    pub fn source_path(&self, city: City) -> PathBuf {
        self.data_dir.join(city.file_name())
    }

    pub fn separator(&self) -> String {
        "-".repeat(self.separator_width)
    }
}
