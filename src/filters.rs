use crate::BikeshareError;
use crate::format::to_english_list;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

fn parse_choice<T: Copy + fmt::Display>(
    input: &str,
    choices: &[T],
    matches: impl Fn(&T, &str) -> bool,
) -> Result<T, BikeshareError> {
    let needle = input.trim().to_lowercase();
    choices
        .iter()
        .find(|choice| matches(choice, &needle))
        .copied()
        .ok_or_else(|| BikeshareError::InvalidInput {
            input: input.trim().to_string(),
            expected: to_english_list(choices.iter()),
        })
}

fn by_name<T: fmt::Display>(choice: &T, needle: &str) -> bool {
    choice.to_string().to_lowercase() == needle
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum City {
    Chicago,
    #[serde(rename = "New York")]
    NewYork,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYork, City::Washington];

    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYork => "New York",
            City::Washington => "Washington",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYork => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s, &City::ALL, by_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MonthName {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl MonthName {
    pub const ALL: [MonthName; 12] = [
        MonthName::January,
        MonthName::February,
        MonthName::March,
        MonthName::April,
        MonthName::May,
        MonthName::June,
        MonthName::July,
        MonthName::August,
        MonthName::September,
        MonthName::October,
        MonthName::November,
        MonthName::December,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MonthName::January => "January",
            MonthName::February => "February",
            MonthName::March => "March",
            MonthName::April => "April",
            MonthName::May => "May",
            MonthName::June => "June",
            MonthName::July => "July",
            MonthName::August => "August",
            MonthName::September => "September",
            MonthName::October => "October",
            MonthName::November => "November",
            MonthName::December => "December",
        }
    }
}

impl fmt::Display for MonthName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MonthName {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s, &MonthName::ALL, by_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn from_weekday(weekday: chrono::Weekday) -> Self {
        Self::ALL[weekday.num_days_from_monday() as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayOfWeek {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s, &DayOfWeek::ALL, by_name)
    }
}

/// Which optional time filters the user wants to set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFilter {
    Month,
    Day,
    Both,
    Neither,
}

impl TimeFilter {
    pub const ALL: [TimeFilter; 4] = [
        TimeFilter::Month,
        TimeFilter::Day,
        TimeFilter::Both,
        TimeFilter::Neither,
    ];

    pub fn wants_month(self) -> bool {
        matches!(self, TimeFilter::Month | TimeFilter::Both)
    }

    pub fn wants_day(self) -> bool {
        matches!(self, TimeFilter::Day | TimeFilter::Both)
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeFilter::Month => "month",
            TimeFilter::Day => "day",
            TimeFilter::Both => "both",
            TimeFilter::Neither => "neither",
        })
    }
}

impl FromStr for TimeFilter {
    type Err = BikeshareError;

    // A blank answer means no filtering.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s, &TimeFilter::ALL, |choice, needle| {
            by_name(choice, needle) || (needle.is_empty() && *choice == TimeFilter::Neither)
        })
    }
}

/// The city plus optional month/day equality filters for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub city: City,
    pub month: Option<MonthName>,
    pub day: Option<DayOfWeek>,
}

impl FilterSelection {
    pub fn new(city: City, month: Option<MonthName>, day: Option<DayOfWeek>) -> Self {
        FilterSelection { city, month, day }
    }

    /// e.g. "Restricting data to Saturdays in Chicago during March 2017."
    pub fn describe(&self, year: i32) -> String {
        let day_info = self
            .day
            .map(|day| format!("{}s in ", day))
            .unwrap_or_default();
        let month_info = self
            .month
            .map(|month| format!(" {}", month))
            .unwrap_or_default();
        format!(
            "Restricting data to {}{} during{} {}.",
            day_info, self.city, month_info, year
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_parse_case_insensitive() {
        assert_eq!("chicago".parse::<City>().unwrap(), City::Chicago);
        assert_eq!("NEW YORK".parse::<City>().unwrap(), City::NewYork);
        assert_eq!("  Washington \n".parse::<City>().unwrap(), City::Washington);
        assert_eq!(City::NewYork.to_string(), "New York");
    }

    #[test]
    fn test_city_parse_rejects_unknown() {
        let err = "boston".parse::<City>().unwrap_err();
        match err {
            BikeshareError::InvalidInput { input, expected } => {
                assert_eq!(input, "boston");
                assert_eq!(expected, "Chicago, New York, Washington");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_month_and_day_parse() {
        assert_eq!("march".parse::<MonthName>().unwrap(), MonthName::March);
        assert_eq!("sUnDaY".parse::<DayOfWeek>().unwrap(), DayOfWeek::Sunday);
        assert!("mon".parse::<DayOfWeek>().is_err());
        assert!("".parse::<MonthName>().is_err());
    }

    #[test]
    fn test_day_from_weekday() {
        assert_eq!(DayOfWeek::from_weekday(chrono::Weekday::Mon), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::from_weekday(chrono::Weekday::Sun), DayOfWeek::Sunday);
    }

    #[test]
    fn test_time_filter_parse() {
        assert_eq!("Both".parse::<TimeFilter>().unwrap(), TimeFilter::Both);
        assert_eq!("".parse::<TimeFilter>().unwrap(), TimeFilter::Neither);
        assert!("weekly".parse::<TimeFilter>().is_err());
        assert!(TimeFilter::Both.wants_month() && TimeFilter::Both.wants_day());
        assert!(!TimeFilter::Neither.wants_month());
    }

    #[test]
    fn test_describe_selection() {
        let all = FilterSelection::new(City::Chicago, Some(MonthName::March), Some(DayOfWeek::Saturday));
        assert_eq!(
            all.describe(2017),
            "Restricting data to Saturdays in Chicago during March 2017."
        );
        let none = FilterSelection::new(City::NewYork, None, None);
        assert_eq!(none.describe(2017), "Restricting data to New York during 2017.");
        let day_only = FilterSelection::new(City::Washington, None, Some(DayOfWeek::Monday));
        assert_eq!(
            day_only.describe(2017),
            "Restricting data to Mondays in Washington during 2017."
        );
    }
}
