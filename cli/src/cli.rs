use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(
    name = "chemeq",
    about = "Balance chemical equations with exact arithmetic",
    version,
    author
)]
pub struct Cli {
    /// Equation to balance, e.g. "Al + HCl -> AlCl3 + H2"
    #[arg(value_name = "EQUATION")]
    pub equation: String,

    /// Feed the products into a follow-up reaction, repeatable and applied in order
    #[arg(short = 'x', long = "extend", value_name = "EQUATION", action = ArgAction::Append)]
    pub extend: Vec<String>,

    /// Keep the coefficients as written instead of balancing the equation first
    #[arg(short, long)]
    pub raw: bool,

    /// Print the element composition of every compound
    #[arg(long)]
    pub composition: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default log filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
