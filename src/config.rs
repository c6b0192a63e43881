use clap::{ArgAction, Parser};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Path of the properties resource below the base URL
pub const PROPERTIES_PATH: &str = "/api/properties";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "properties-client",
    version,
    about = "Browse and edit property listings from a properties REST API",
    long_about = "Interactive terminal client for a properties REST API.\n\nExamples:\n  properties-client\n  properties-client --base-url http://api.local:8080 --page-size 10\n  properties-client --sort price,asc -vv\n\nType `help` at the prompt for the list of commands."
)]
pub struct ClientArgs {
    #[arg(
        short = 'u',
        long = "base-url",
        value_name = "URL",
        default_value = "http://localhost:8080",
        help_heading = "Connection",
        help = "Base URL of the API server (no trailing path)."
    )]
    pub base_url: String,

    #[arg(
        short = 't',
        long = "timeout",
        value_name = "SECONDS",
        default_value_t = 30,
        help_heading = "Connection",
        help = "Request timeout in seconds."
    )]
    pub timeout: u64,

    #[arg(
        short = 's',
        long = "page-size",
        value_name = "N",
        default_value_t = 5,
        value_parser = clap::value_parser!(u32).range(1..),
        help_heading = "Listing",
        help = "Records per page."
    )]
    pub page_size: u32,

    #[arg(
        long = "sort",
        value_name = "FIELD,DIR",
        default_value = "id,desc",
        help_heading = "Listing",
        help = "Sort expression passed to the server."
    )]
    pub sort: String,

    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,
}

/// Settings shared by the API client and the page controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub page_size: u32,
    pub sort: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            page_size: 5,
            sort: "id,desc".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Collection endpoint, e.g. `http://localhost:8080/api/properties`
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), PROPERTIES_PATH)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl From<&ClientArgs> for ClientConfig {
    fn from(args: &ClientArgs) -> Self {
        Self {
            base_url: args.base_url.clone(),
            page_size: args.page_size,
            sort: args.sort.clone(),
            timeout_secs: args.timeout,
        }
    }
}

impl ClientArgs {
    /// Default log directive for the `-v` count; `RUST_LOG` overrides it.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
