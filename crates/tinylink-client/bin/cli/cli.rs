use clap::{Parser, Subcommand};
use tinylink_client::DEFAULT_SERVER;
use tinylink_telemetry::LogFormat;

pub const SERVER_ENV: &str = "TINYLINK_SERVER";
pub const LOG_FORMAT_ENV: &str = "TINYLINK_LOG_FORMAT";

#[derive(Debug, Parser)]
#[command(name = "tinylink", version, about = "Shorten, open and expand tinylink URLs")]
pub struct CLI {
    /// Base URL of the tinylink gateway.
    #[arg(long, global = true, env = SERVER_ENV, default_value = DEFAULT_SERVER)]
    pub server: String,

    #[arg(long, global = true, env = LOG_FORMAT_ENV, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Starts the interactive menu when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shorten a URL and print the short link.
    Shorten { url: String },
    /// Open a short link in the default browser.
    Open {
        /// A short code or a full short link.
        link: String,
    },
    /// Print the original URL behind a short link.
    Expand {
        /// A short code or a full short link.
        link: String,
    },
    /// Numbered menu reading from stdin.
    Interactive,
}
