use std::process::ExitCode;

use anyhow::{Context, Result};
use chemeq::Equation;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> ExitCode {
    let cli = cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Parses, balances and extends the equation, returning the text to print
fn run(cli: &cli::Cli) -> Result<String> {
    let mut equation = Equation::parse(&cli.equation)
        .with_context(|| format!("failed to parse \"{}\"", cli.equation))?;

    if !cli.raw {
        equation
            .balance()
            .with_context(|| format!("failed to balance \"{}\"", cli.equation))?;
        info!(%equation, "balanced");
    }

    for text in &cli.extend {
        let mut next = Equation::parse(text).with_context(|| format!("failed to parse \"{text}\""))?;
        next.balance()
            .with_context(|| format!("failed to balance \"{text}\""))?;
        equation
            .extend(&next)
            .with_context(|| format!("failed to extend {equation} by {next}"))?;
        info!(%equation, "extended");
    }

    let mut output = equation.to_string();
    if cli.composition {
        for compound in equation.reactants().compounds().chain(equation.products().compounds()) {
            let counts: Vec<String> = compound
                .elements()
                .map(|(element, count)| format!("{} {}", element.symbol(), count))
                .collect();
            output.push_str(&format!("\n{compound}: {}", counts.join(", ")));
        }
    }
    Ok(output)
}
