//! `v3-price <reserve_x> <reserve_y>`: pool initialisation values from reserves.
//!
//! Prints the truncated price, its Q64.96 square root and the tick index.
//! Any failure prints a message and exits with status 1.

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use color_eyre::eyre::{Context, Result};
use devkit_cli::init_tracing;
use devkit_math::{align_tick, compute, parse_reserve, PriceError, PriceTick};
use serde::Serialize;

const USAGE: &str = "Usage: v3-price <reserve_x> <reserve_y>";

#[derive(Parser, Debug)]
#[command(name = "v3-price")]
#[command(about = "Convert pool reserves into price, Q64.96 sqrt price and tick index")]
#[command(version)]
struct Cli {
    /// Reserve of token X (the price denominator), base-10 integer.
    #[arg(allow_hyphen_values = true)]
    reserve_x: String,

    /// Reserve of token Y (the price numerator), base-10 integer.
    #[arg(allow_hyphen_values = true)]
    reserve_y: String,

    /// Also print the tick rounded down to this spacing.
    #[arg(long, allow_negative_numbers = true)]
    tick_spacing: Option<i32>,

    /// Print one JSON object instead of labeled lines.
    #[arg(long)]
    json: bool,

    #[arg(long, short = 'v', action = ArgAction::Count)]
    verbose: u8,

    #[arg(long, short = 'q')]
    quiet: bool,
}

/// JSON output; `price` and `sqrt_price_x96` are decimal strings since both
/// can exceed u128.
#[derive(Serialize, Debug)]
struct PriceReport {
    price: String,
    sqrt_price_x96: String,
    tick: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    aligned_tick: Option<i32>,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprintln!("error: {}", e.kind().as_str().unwrap_or("invalid arguments"));
            eprintln!("{USAGE}");
            return Ok(ExitCode::FAILURE);
        }
    };
    init_tracing(cli.verbose, cli.quiet)?;

    let (result, aligned_tick) = match run(&cli) {
        Ok(values) => values,
        Err(PriceError::InvalidInput { value }) => {
            eprintln!(
                "Invalid input {value:?}. Please provide integer values for reserve_x and reserve_y."
            );
            eprintln!("{USAGE}");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.json {
        let report = PriceReport {
            price: result.price.to_string(),
            sqrt_price_x96: result.sqrt_price_x96.to_string(),
            tick: result.tick,
            aligned_tick,
        };
        let json = serde_json::to_string(&report).wrap_err("failed to serialize JSON")?;
        println!("{json}");
    } else {
        println!("Current price: {}", result.price);
        println!("Current price (Q64.96): {}", result.sqrt_price_x96);
        println!("Tick index: {}", result.tick);
        if let (Some(spacing), Some(aligned)) = (cli.tick_spacing, aligned_tick) {
            println!("Aligned tick (spacing {spacing}): {aligned}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run(cli: &Cli) -> Result<(PriceTick, Option<i32>), PriceError> {
    let reserve_x = parse_reserve("reserve_x", &cli.reserve_x)?;
    let reserve_y = parse_reserve("reserve_y", &cli.reserve_y)?;

    let result = compute(reserve_x, reserve_y)?;
    let aligned_tick = cli
        .tick_spacing
        .map(|spacing| align_tick(result.tick, spacing))
        .transpose()?;

    tracing::debug!(
        reserve_x = %reserve_x,
        reserve_y = %reserve_y,
        price = %result.price,
        tick = result.tick,
        "reserves converted"
    );
    Ok((result, aligned_tick))
}
