//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and for configuring the enrichment step programmatically.

use clap::{Parser, ValueEnum};
use whois_rust::WhoIsServerValue;

use crate::config::constants::{DEFAULT_CONCURRENCY, DEFAULT_FOLLOW};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Options forwarded to the lookup collaborator.
///
/// This is the enrichment configuration minus the local-only switches
/// (`fast_lookup`, `extract_asn`), which never reach the lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOptions {
    /// Server override (`host` or `host:port`); empty uses default routing
    pub server: String,
    /// Maximum number of referral hops
    pub follow: u32,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            server: String::new(),
            follow: DEFAULT_FOLLOW,
        }
    }
}

/// Configuration of the whois enrichment step.
///
/// # Examples
///
/// ```
/// use whois_recon::WhoisOptions;
///
/// let options = WhoisOptions {
///     fast_lookup: true,
///     extract_asn: true,
///     ..Default::default()
/// };
/// assert_eq!(options.follow, 3);
/// assert!(options.lookup_options().server.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhoisOptions {
    /// Server to query; empty string uses default routing
    pub server: String,

    /// Number of referrals to follow
    pub follow: u32,

    /// Reuse cached reports for IPv4 addresses inside an already-seen CIDR range
    pub fast_lookup: bool,

    /// Emit an ASN node when the report names an origin AS
    pub extract_asn: bool,
}

impl Default for WhoisOptions {
    fn default() -> Self {
        Self {
            server: String::new(),
            follow: DEFAULT_FOLLOW,
            fast_lookup: false,
            extract_asn: false,
        }
    }
}

impl WhoisOptions {
    /// Returns the subset of options the lookup collaborator receives.
    pub fn lookup_options(&self) -> LookupOptions {
        LookupOptions {
            server: self.server.clone(),
            follow: self.follow,
        }
    }

    /// Validates the options at the configuration boundary.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidServer` if `server` is non-empty and is not a
    /// `host` or `host:port` value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let server = self.server.trim();
        if !server.is_empty() && WhoIsServerValue::from_string(server).is_err() {
            return Err(ConfigError::InvalidServer(self.server.clone()));
        }
        Ok(())
    }
}

/// Command-line options for the `whois_recon` binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "whois_recon",
    about = "Extract whois information for IP addresses and domains as graph nodes."
)]
pub struct Opt {
    /// Addresses or domains to investigate; use `-` to read one label per line from stdin
    #[arg(value_name = "LABEL")]
    pub labels: Vec<String>,

    /// Server to query (host or host:port)
    #[arg(long, default_value = "")]
    pub server: String,

    /// Number of redirects to follow
    #[arg(long, default_value_t = DEFAULT_FOLLOW)]
    pub follow: u32,

    /// Perform as little whois lookups as possible
    #[arg(long)]
    pub fast_lookup: bool,

    /// Extract asn nodes
    #[arg(long)]
    pub extract_asn: bool,

    /// Maximum concurrent lookups
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Print transform metadata as JSON and exit
    #[arg(long)]
    pub info: bool,
}

impl From<&Opt> for WhoisOptions {
    fn from(opt: &Opt) -> Self {
        WhoisOptions {
            server: opt.server.trim().to_string(),
            follow: opt.follow,
            fast_lookup: opt.fast_lookup,
            extract_asn: opt.extract_asn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whois_options_defaults() {
        let options = WhoisOptions::default();
        assert_eq!(options.server, "");
        assert_eq!(options.follow, 3);
        assert!(!options.fast_lookup);
        assert!(!options.extract_asn);
    }

    #[test]
    fn test_lookup_options_drop_local_switches() {
        let options = WhoisOptions {
            server: "whois.arin.net".to_string(),
            follow: 1,
            fast_lookup: true,
            extract_asn: true,
        };
        assert_eq!(
            options.lookup_options(),
            LookupOptions {
                server: "whois.arin.net".to_string(),
                follow: 1,
            }
        );
    }

    #[test]
    fn test_validate_accepts_empty_and_host_port() {
        assert!(WhoisOptions::default().validate().is_ok());
        let options = WhoisOptions {
            server: "whois.ripe.net:4343".to_string(),
            ..Default::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_server() {
        let options = WhoisOptions {
            server: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ConfigError::InvalidServer(_))
        ));
    }

    #[test]
    fn test_opt_parsing_defaults() {
        let opt = Opt::try_parse_from(["whois_recon", "8.8.8.8"]).expect("parse");
        assert_eq!(opt.labels, vec!["8.8.8.8".to_string()]);
        assert_eq!(opt.follow, 3);
        assert!(!opt.fast_lookup);
        assert_eq!(opt.concurrency, DEFAULT_CONCURRENCY);

        let options = WhoisOptions::from(&opt);
        assert_eq!(options, WhoisOptions::default());
    }

    #[test]
    fn test_opt_parsing_flags() {
        let opt = Opt::try_parse_from([
            "whois_recon",
            "--server",
            "whois.arin.net",
            "--follow",
            "0",
            "--fast-lookup",
            "--extract-asn",
            "--log-format",
            "json",
            "1.1.1.1",
            "example.com",
        ])
        .expect("parse");
        assert_eq!(opt.labels.len(), 2);
        let options = WhoisOptions::from(&opt);
        assert_eq!(options.server, "whois.arin.net");
        assert_eq!(options.follow, 0);
        assert!(options.fast_lookup);
        assert!(options.extract_asn);
        assert!(matches!(opt.log_format, LogFormat::Json));
    }

    #[test]
    fn test_opt_rejects_negative_follow() {
        assert!(Opt::try_parse_from(["whois_recon", "--follow", "-1", "x"]).is_err());
    }
}
