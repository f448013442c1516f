use crate::BikeshareError;
use crate::browser::{RawDataBrowser, render_page};
use crate::config::{Config, OutputMode};
use crate::dataset::{Dataset, load};
use crate::prompt::Prompter;
use crate::stats::{Report, duration_stats, station_stats, time_stats, user_stats};
use std::io::{BufRead, Write};

fn present<R, W, T>(
    config: &Config,
    prompter: &mut Prompter<R, W>,
    dataset: &Dataset,
    compute: fn(&Dataset) -> T,
) -> Result<(), BikeshareError>
where
    R: BufRead,
    W: Write,
    T: Report,
{
    writeln!(prompter.output(), "\n{}\n", T::TITLE)?;
    let report = compute(dataset);
    match config.output {
        OutputMode::Text => write!(prompter.output(), "{}", report)?,
        OutputMode::Json => writeln!(
            prompter.output(),
            "{}",
            serde_json::to_string_pretty(&report)?
        )?,
    }

    if config.pause_between_reports {
        prompter.pause()?;
    }
    writeln!(prompter.output(), "{}", config.separator())?;
    Ok(())
}

fn browse_raw_data<R: BufRead, W: Write>(
    config: &Config,
    prompter: &mut Prompter<R, W>,
    dataset: &Dataset,
) -> Result<(), BikeshareError> {
    let mut browser = RawDataBrowser::new(config.page_size);
    let mut wants_more = prompter.confirm("Would you like to see the raw data? Enter yes or no.")?;

    while wants_more {
        let first_index = browser.cursor();
        let page = browser.next_page(dataset);
        if page.is_empty() {
            writeln!(prompter.output(), "No raw data available.")?;
        } else {
            let text = match config.output {
                OutputMode::Text => render_page(page, first_index, dataset.schema()),
                OutputMode::Json => serde_json::to_string_pretty(page)? + "\n",
            };
            write!(prompter.output(), "{}", text)?;
        }

        if browser.is_exhausted(dataset) {
            break;
        }
        wants_more =
            prompter.confirm("Would you like to see more of the data? Enter yes or no.")?;
    }

    writeln!(prompter.output(), "{}", config.separator())?;
    Ok(())
}

/// Runs sessions until the user declines to restart.
pub fn run<R: BufRead, W: Write>(
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> Result<(), BikeshareError> {
    loop {
        let selection = prompter.get_filters(config)?;
        let dataset = load(config, selection.city, selection.month, selection.day)?;
        tracing::info!(city = %selection.city, rows = dataset.len(), "session data ready");

        if dataset.is_empty() {
            writeln!(prompter.output(), "\nNo trips match the selected filters.")?;
        }

        present(config, prompter, &dataset, time_stats)?;
        present(config, prompter, &dataset, station_stats)?;
        present(config, prompter, &dataset, duration_stats)?;
        present(config, prompter, &dataset, user_stats)?;
        browse_raw_data(config, prompter, &dataset)?;

        let restart = prompter.confirm("Would you like to restart? Enter yes or no.")?;
        writeln!(prompter.output())?;
        if !restart {
            break;
        }
        tracing::debug!("restarting session");
    }
    Ok(())
}
