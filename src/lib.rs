//! Everything behind the `molmass` prompt that isn't reading from or writing to the terminal

// External Crate Imports
use chemform::{ElementTable, FormulaReport, Mass, Massive, Molecule};
use indoc::indoc;
use miette::{GraphicalReportHandler, GraphicalTheme};
use rust_decimal::Decimal;

pub const INSTRUCTIONS: &str = indoc! {"
    Instructions
    Enter molecules using element symbols and subscripts
    Examples: H2O, CO2, C6H12O6
    Use parentheses for molecules with a coefficient
    Example: 2(H2O)
    Use parentheses for groups within a molecule
    Examples: Ca(NO3)2, Al2(SO4)3
    Invalid inputs will show an error message
    Type clear to clear the terminal
    Type exit to exit the calculator
    Type help to display this message
"};

pub const MAX_PRECISION: u32 = 10;

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Settings {
    /// Print annotated reports instead of `Error: ...` lines
    pub graphical: bool,
    pub units: String,
    /// The most decimal places a mass is printed with
    pub precision: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            graphical: false,
            units: "g/mol".to_owned(),
            precision: 4,
        }
    }
}

/// A line of REPL input. Anything that isn't a command is taken to be a formula
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Command<'i> {
    Help,
    Clear,
    Exit,
    Evaluate(&'i str),
}

impl<'i> Command<'i> {
    pub fn parse(line: &'i str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "help" => Self::Help,
            "clear" => Self::Clear,
            "exit" => Self::Exit,
            _ => Self::Evaluate(line),
        }
    }
}

/// Either the formatted mass of `formula`, or a rendered report of everything wrong with it
pub fn evaluate(db: &ElementTable, formula: &str, settings: &Settings) -> Result<String, String> {
    Molecule::new(db, formula)
        .map(|molecule| format_mass(molecule.mass(), settings))
        .map_err(|report| render_report(&report, settings))
}

// NOTE: Rounding before normalizing means that trailing zeros (and a dangling decimal point) are dropped, but no more
// than `settings.precision` decimal places are ever shown
pub fn format_mass(mass: Mass, settings: &Settings) -> String {
    let mass = Decimal::from(mass)
        .round_dp(settings.precision.min(MAX_PRECISION))
        .normalize();
    format!("{mass} {}", settings.units)
}

pub fn render_report(report: &FormulaReport, settings: &Settings) -> String {
    if !settings.graphical {
        return plain_report(report);
    }

    let mut buf = String::new();
    match GraphicalReportHandler::new_themed(GraphicalTheme::unicode()).render_report(&mut buf, report) {
        Ok(()) => buf,
        Err(_) => plain_report(report),
    }
}

pub fn plain_report(report: &FormulaReport) -> String {
    let lines: Vec<_> = report.messages().map(|message| format!("Error: {message}")).collect();
    lines.join("\n")
}
