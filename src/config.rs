//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "bloom-timer")]
#[command(about = "A focus timer service that grows a flower while you study")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Session length in minutes when a start request omits one
    #[arg(short, long, default_value = "120", value_parser = clap::value_parser!(i64).range(0..))]
    pub default_minutes: i64,

    /// Countdown tick period in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["bloom-timer"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.default_minutes, 120);
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn rejects_zero_tick_period() {
        assert!(Config::try_parse_from(["bloom-timer", "--tick-ms", "0"]).is_err());
    }

    #[test]
    fn rejects_negative_default_minutes() {
        assert!(Config::try_parse_from(["bloom-timer", "--default-minutes=-5"]).is_err());
        let config = Config::try_parse_from(["bloom-timer", "--default-minutes", "0"]).unwrap();
        assert_eq!(config.default_minutes, 0);
    }

    #[test]
    fn verbose_enables_debug() {
        let config = Config::try_parse_from(["bloom-timer", "-v", "-d", "25"]).unwrap();
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.default_minutes, 25);
    }
}
