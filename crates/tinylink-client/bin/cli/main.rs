mod cli;

use crate::cli::{Command, CLI};
use anyhow::{bail, Result};
use clap::Parser;
use tinylink_client::{browser, interactive, short_code_from, TinylinkClient};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<()> {
    let config = CLI::parse();

    tinylink_telemetry::init(config.log_format)?;

    let client = TinylinkClient::new(&config.server)?;

    match config.command.unwrap_or(Command::Interactive) {
        Command::Shorten { url } => {
            let code = client.shorten(&url).await?;
            println!("Short URL: {}", client.full_url_link(&code)?);
        }
        Command::Open { link } => {
            let code = short_code_from(&link, client.base_url());
            browser::open(&client.redirect_url(&code)?)?;
        }
        Command::Expand { link } => {
            let code = short_code_from(&link, client.base_url());
            match client.expand(&code).await? {
                Some(url) => println!("Full URL: {url}"),
                None => bail!("short URL not found: {code}"),
            }
        }
        Command::Interactive => {
            let stdin = BufReader::new(tokio::io::stdin());
            interactive::run(&client, stdin, tokio::io::stdout(), browser::open).await?;
        }
    }

    Ok(())
}
