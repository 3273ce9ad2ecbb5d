use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tinylink_storage::FlushPolicy;
use tinylink_telemetry::LogFormat;

pub const LISTEN_ADDR_ENV: &str = "TINYLINK_LISTEN_ADDR";
pub const DATA_FILE_ENV: &str = "TINYLINK_DATA_FILE";
pub const FLUSH_MODE_ENV: &str = "TINYLINK_FLUSH";
pub const FLUSH_INTERVAL_ENV: &str = "TINYLINK_FLUSH_INTERVAL_MS";
pub const LOG_FORMAT_ENV: &str = "TINYLINK_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DATA_FILE: &str = "links.jsonl";
pub const DEFAULT_FLUSH_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FlushModeArg {
    /// Rewrite the table file after every shortened link.
    #[value(name = "every-insert")]
    EveryInsert,
    /// Rewrite the table file on a fixed interval when it changed.
    #[value(name = "periodic")]
    Periodic,
}

impl Display for FlushModeArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FlushModeArg::EveryInsert => write!(f, "every-insert"),
            FlushModeArg::Periodic => write!(f, "periodic"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tinylink-gateway", version, about = "HTTP front end for the tinylink URL shortener")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Where the code to URL table is persisted.
    #[arg(long, env = DATA_FILE_ENV, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    #[arg(
        long,
        env = FLUSH_MODE_ENV,
        value_enum,
        default_value_t = FlushModeArg::EveryInsert
    )]
    pub flush: FlushModeArg,

    /// Only used with `--flush periodic`.
    #[arg(
        long,
        env = FLUSH_INTERVAL_ENV,
        default_value_t = DEFAULT_FLUSH_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub flush_interval_ms: u64,

    #[arg(long, env = LOG_FORMAT_ENV, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl CLI {
    pub fn flush_policy(&self) -> FlushPolicy {
        match self.flush {
            FlushModeArg::EveryInsert => FlushPolicy::EveryInsert,
            FlushModeArg::Periodic => FlushPolicy::Periodic {
                interval: Duration::from_millis(self.flush_interval_ms),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = CLI::try_parse_from(["gateway"]).unwrap();

        assert_eq!(cli.listen_addr.to_string(), DEFAULT_LISTEN_ADDR);
        assert_eq!(cli.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(cli.flush_policy(), FlushPolicy::EveryInsert);
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn periodic_flush() {
        let cli = CLI::try_parse_from([
            "gateway",
            "--flush",
            "periodic",
            "--flush-interval-ms",
            "250",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(
            cli.flush_policy(),
            FlushPolicy::Periodic {
                interval: Duration::from_millis(250)
            }
        );
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(CLI::try_parse_from(["gateway", "--flush-interval-ms", "0"]).is_err());
    }
}
