use crate::BikeshareError;
use crate::config::Config;
use crate::filters::{City, DayOfWeek, FilterSelection, MonthName, TimeFilter};
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

const INVALID_INPUT: &str = "That is not a valid input.";

/// "A, B, or C"
fn or_list<T: fmt::Display>(choices: &[T]) -> String {
    match choices {
        [] => String::new(),
        [only] => only.to_string(),
        [rest @ .., last] => {
            let head: Vec<String> = rest.iter().map(|c| c.to_string()).collect();
            format!("{}, or {}", head.join(", "), last)
        }
    }
}

/// Line-oriented console dialogue over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads one answer. End of input counts as an interrupt; undecodable
    /// bytes are kept lossily so they fail validation instead of the read.
    fn read_answer(&mut self) -> Result<String, BikeshareError> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(BikeshareError::Interrupted);
        }
        Ok(String::from_utf8_lossy(&line).trim().to_lowercase())
    }

    pub fn ask(&mut self, message: &str) -> Result<String, BikeshareError> {
        writeln!(self.output, "\n{}", message)?;
        self.output.flush()?;
        self.read_answer()
    }

    /// Re-prompts until the answer parses to one of `allowed`.
    pub fn choose<T>(&mut self, allowed: &[T], message: &str) -> Result<T, BikeshareError>
    where
        T: FromStr<Err = BikeshareError> + PartialEq,
    {
        let retry = format!("{}\n{}", INVALID_INPUT, message);
        let mut current = message;
        loop {
            let answer = self.ask(current)?;
            match answer.parse::<T>() {
                Ok(choice) if allowed.contains(&choice) => return Ok(choice),
                Ok(_) | Err(BikeshareError::InvalidInput { .. }) => {
                    tracing::debug!(%answer, "rejected input");
                    current = &retry;
                }
                Err(other) => return Err(other),
            }
        }
    }

    /// Any answer starting with "y" is a yes.
    pub fn confirm(&mut self, message: &str) -> Result<bool, BikeshareError> {
        Ok(self.ask(message)?.starts_with('y'))
    }

    pub fn pause(&mut self) -> Result<(), BikeshareError> {
        self.ask("Press Enter to continue...").map(|_| ())
    }

    pub fn get_city(&mut self) -> Result<City, BikeshareError> {
        let message = format!("Would you like to see data for {}?", or_list(&City::ALL));
        self.choose(&City::ALL, &message)
    }

    pub fn get_month(&mut self, allowed: &[MonthName]) -> Result<MonthName, BikeshareError> {
        let message = format!("Which month? - {}?", or_list(allowed));
        self.choose(allowed, &message)
    }

    pub fn get_day(&mut self) -> Result<DayOfWeek, BikeshareError> {
        let message = format!("Which day - {}?", or_list(&DayOfWeek::ALL));
        self.choose(&DayOfWeek::ALL, &message)
    }

    pub fn get_time_filters(
        &mut self,
        config: &Config,
    ) -> Result<(Option<MonthName>, Option<DayOfWeek>), BikeshareError> {
        let message = format!(
            "Would you like to filter the data by {}?",
            or_list(&TimeFilter::ALL)
        );
        let wanted = self.choose(&TimeFilter::ALL, &message)?;

        let month = if wanted.wants_month() {
            Some(self.get_month(&config.filter_months)?)
        } else {
            None
        };
        let day = if wanted.wants_day() {
            Some(self.get_day()?)
        } else {
            None
        };
        Ok((month, day))
    }

    /// Runs the full selection dialogue and prints the confirmation line.
    pub fn get_filters(&mut self, config: &Config) -> Result<FilterSelection, BikeshareError> {
        writeln!(self.output, "{}", config.separator())?;
        writeln!(
            self.output,
            "\nHello! Let's explore some US bikeshare data during {}!",
            config.year
        )?;

        let city = self.get_city()?;
        let (month, day) = self.get_time_filters(config)?;
        let selection = FilterSelection::new(city, month, day);

        writeln!(self.output, "\n{}\n", selection.describe(config.year))?;
        writeln!(self.output, "{}", config.separator())?;
        Ok(selection)
    }
}
