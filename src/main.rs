use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use fiatconv::cli::Cli;
use fiatconv::{ConversionRequest, ConversionResult, convert_currency};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    match run(&cli).await {
        Ok(result) => println!("{}", result),
        Err(err) => {
            debug!("Conversion failed: {:?}", err);
            eprintln!("{:#}", err);
            process::exit(2);
        }
    }
}

async fn run(cli: &Cli) -> Result<ConversionResult> {
    let request = ConversionRequest::new(cli.amount, &cli.src, &cli.dst)?;

    let client = cli
        .config()
        .exchange_client()
        .context("Can't set up exchange API client")?;

    let result = convert_currency(&client, &request)
        .await
        .with_context(|| format!("Can't convert {} to {}", request.source, request.target))?;

    Ok(result)
}
