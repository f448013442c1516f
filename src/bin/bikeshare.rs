use bikeshare::{BikeshareError, Config, OutputMode, Prompter, init_logging, run};
use clap::Parser;
use crossterm::style::{Color, Stylize};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Explore US bikeshare trip data interactively.", long_about = None)]
struct Args {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(short = 'd', long = "data-dir", env = "BIKESHARE_DATA_DIR", default_value = "bikeshare_data")]
    data_dir: PathBuf,
    /// Skip the "Press Enter to continue" pause after each report
    #[arg(long = "no-pause")]
    no_pause: bool,
    /// Print report summaries and raw rows as JSON
    #[arg(long = "json")]
    json: bool,
}

fn highlight(text: &str, color: Color, tty: bool) -> String {
    if tty {
        text.with(color).bold().to_string()
    } else {
        text.to_string()
    }
}

fn goodbye(reason: &str) {
    let tty = io::stdout().is_terminal();
    println!("\n{}\n", highlight(&format!("{} Goodbye.", reason), Color::Cyan, tty));
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    if let Err(e) = ctrlc::set_handler(|| {
        goodbye("Keyboard interrupt detected.");
        std::process::exit(0);
    }) {
        tracing::warn!(error = %e, "could not install interrupt handler");
    }

    let config = Config {
        pause_between_reports: !args.no_pause,
        output: if args.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        },
        ..Config::default().with_data_dir(args.data_dir)
    };

    // stdout stays unlocked so the interrupt handler can still print.
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
    match run(&config, &mut prompter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(BikeshareError::Interrupted) => {
            goodbye("End of input detected.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let tty = io::stderr().is_terminal();
            let message = format!("Error: {}. Exiting program.", err);
            eprintln!("\n{}\n", highlight(&message, Color::Red, tty));
            ExitCode::FAILURE
        }
    }
}
