use crate::dataset::{Dataset, Schema, Trip};
use comfy_table::Table;
use comfy_table::presets::NOTHING;

const MISSING: &str = "-";

/// Pages through a dataset from the first record; never rewinds.
#[derive(Debug, Clone)]
pub struct RawDataBrowser {
    cursor: usize,
    page_size: usize,
}

impl RawDataBrowser {
    pub fn new(page_size: usize) -> Self {
        RawDataBrowser {
            cursor: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The next page (short or empty near the end) and advances past it.
    pub fn next_page<'a>(&mut self, dataset: &'a Dataset) -> &'a [Trip] {
        let page = dataset.slice(self.cursor, self.page_size);
        self.cursor += page.len();
        page
    }

    pub fn is_exhausted(&self, dataset: &Dataset) -> bool {
        self.cursor >= dataset.len()
    }
}

fn cells(index: usize, trip: &Trip, schema: Schema) -> Vec<String> {
    let mut row = vec![
        index.to_string(),
        trip.start_time.to_string(),
        trip.end_time.to_string(),
        trip.duration.to_string(),
        trip.start_station.clone(),
        trip.end_station.clone(),
        trip.user_type.clone().unwrap_or_else(|| MISSING.to_string()),
    ];
    if schema.has_gender {
        row.push(trip.gender.clone().unwrap_or_else(|| MISSING.to_string()));
    }
    if schema.has_birth_year {
        row.push(trip.birth_year.map_or_else(|| MISSING.to_string(), |y| y.to_string()));
    }
    row
}

/// Renders trips as a borderless table whose first column is the row index.
pub fn render_page(trips: &[Trip], first_index: usize, schema: Schema) -> String {
    let mut header: Vec<String> = [
        "",
        "Start Time",
        "End Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
    ]
    .iter()
    .map(|h| h.to_string())
    .collect();
    if schema.has_gender {
        header.push("Gender".to_string());
    }
    if schema.has_birth_year {
        header.push("Birth Year".to_string());
    }

    let mut table = Table::new();
    table.load_preset(NOTHING).set_header(header);
    for (i, trip) in trips.iter().enumerate() {
        table.add_row(cells(first_index + i, trip, schema));
    }
    table.trim_fmt() + "\n"
}
