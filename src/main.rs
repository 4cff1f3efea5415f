use anyhow::Context;
use clap::{builder::RangedU64ValueParser, Parser};
use contact_scout::{configuration::get_configuration, startup::run_search};
use env_logger::Env;

/// Search ContactOut for people by name and print the results as JSON.
#[derive(Parser, Debug)]
#[command(name = "contact-scout", version)]
struct Args {
    /// Full name to search for
    name: String,

    /// Result pages to walk [default: scraper.default_page_budget]
    #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pages: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let page_budget = args
        .pages
        .unwrap_or(configuration.scraper.default_page_budget);

    let records = run_search(&configuration, &args.name, page_budget).await?;
    println!("{}", serde_json::to_string_pretty(&records)?);

    Ok(())
}
