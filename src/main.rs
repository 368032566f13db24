use std::{process::ExitCode, sync::LazyLock};

use chemform::ElementTable;
use clap::Parser;
use miette::IntoDiagnostic;
use molmass::{Command, INSTRUCTIONS, MAX_PRECISION, Settings, evaluate};
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

static DB: LazyLock<ElementTable> = LazyLock::new(ElementTable::default);

/// Calculates the molar masses of chemical formulae, like H2O, CO2, or Ca(NO3)2
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Formulae to evaluate once, instead of starting an interactive session
    formulae: Vec<String>,
    /// Print errors as annotated reports, instead of plain lines of text
    #[arg(long, default_value_t = false)]
    graphical: bool,
    /// The units printed after every mass
    #[arg(long, default_value = "g/mol")]
    units: String,
    /// The most decimal places that masses are printed with
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_PRECISION)))]
    precision: u32,
    /// Log what the parser is doing (to stderr), overriding RUST_LOG
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> miette::Result<ExitCode> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings {
        graphical: args.graphical,
        units: args.units,
        precision: args.precision,
    };
    debug!(?settings, "starting molmass");

    if args.formulae.is_empty() {
        repl(&settings)?;
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(evaluate_all(&args.formulae, &settings))
    }
}

fn evaluate_all(formulae: &[String], settings: &Settings) -> ExitCode {
    let mut status = ExitCode::SUCCESS;
    for formula in formulae {
        match evaluate(&DB, formula, settings) {
            Ok(mass) => println!("{mass}"),
            Err(report) => {
                eprintln!("{report}");
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}

fn repl(settings: &Settings) -> miette::Result<()> {
    let mut rl = DefaultEditor::new().into_diagnostic()?;
    println!("\n{INSTRUCTIONS}");
    loop {
        println!("\nMolecular Mass Calculator");
        let line = match rl.readline("Enter Molecule: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(error) => return Err(error).into_diagnostic(),
        };
        rl.add_history_entry(&line).into_diagnostic()?;

        match Command::parse(&line) {
            Command::Help => {
                rl.clear_screen().into_diagnostic()?;
                println!("{INSTRUCTIONS}");
            }
            Command::Clear => rl.clear_screen().into_diagnostic()?,
            Command::Exit => {
                eprintln!("Exiting");
                break;
            }
            Command::Evaluate(formula) => match evaluate(&DB, formula, settings) {
                Ok(mass) => println!("\n{mass}"),
                Err(report) => println!("\n{report}"),
            },
        }
    }
    Ok(())
}
