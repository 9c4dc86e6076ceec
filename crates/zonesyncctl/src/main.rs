// # zonesyncctl - zone record command line
//
// Thin integration layer over `zonesync-core`. It:
// 1. Parses the command line
// 2. Reads provider configuration from environment variables
// 3. Builds the provider through the `ProviderRegistry`
// 4. Runs one operation and prints the result as JSON on stdout
//
// No reconciliation logic lives here; everything record-related is in the
// provider crates.
//
// ## Configuration
//
// - `ZONESYNC_PROVIDER_TYPE`: Provider type (default: dynv6)
// - `ZONESYNC_PROVIDER_API_TOKEN`: API token, or `@/path/to/file` to read it from a file
// - `ZONESYNC_PROVIDER_BASE_URL`: API base URL override (optional)
// - `ZONESYNC_HTTP_TIMEOUT_SECS`: HTTP timeout, 1-300 seconds (optional)
// - `ZONESYNC_MODE`: `live` (default) or `dry-run`
// - `ZONESYNC_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//
// ## Example
//
// ```bash
// export ZONESYNC_PROVIDER_API_TOKEN=@/run/secrets/dynv6
//
// zonesyncctl get example.dynv6.net
// zonesyncctl set example.dynv6.net "www A 192.0.2.10" "@ MX 10 mail.example.net"
// ```
//
// Logs go to stderr so stdout carries only results.

use anyhow::{Context, Result};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use zonesync_core::{CancellationToken, GenericRecord, ProviderConfig, ProviderRegistry, ZoneProvider};

const USAGE: &str = "\
Usage:
  zonesyncctl zones
  zonesyncctl get <zone>
  zonesyncctl append <zone> <record>...
  zonesyncctl set <zone> <record>...
  zonesyncctl delete <zone> <record>...

Each <record> is \"<name> [ttl] <TYPE> <data...>\", e.g. \"www 300 A 192.0.2.1\".
Use \"@\" or \"\" for the zone apex.";

const SUPPORTED_PROVIDERS: &[&str] = &["dynv6"];

/// Exit codes for different termination scenarios
///
/// - 0: Success
/// - 1: Usage or configuration error
/// - 2: Runtime error (remote failure, cancellation)
#[derive(Debug, Clone, Copy)]
enum CtlExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<CtlExitCode> for ExitCode {
    fn from(code: CtlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Operation requested on the command line
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Help,
    Zones,
    Get {
        zone: String,
    },
    Append {
        zone: String,
        records: Vec<GenericRecord>,
    },
    Set {
        zone: String,
        records: Vec<GenericRecord>,
    },
    Delete {
        zone: String,
        records: Vec<GenericRecord>,
    },
}

impl Command {
    /// Parse the arguments following the program name
    fn parse(args: &[String]) -> Result<Self> {
        let Some((verb, rest)) = args.split_first() else {
            anyhow::bail!("missing command");
        };

        match verb.as_str() {
            "help" | "-h" | "--help" => Ok(Command::Help),
            "zones" => {
                if !rest.is_empty() {
                    anyhow::bail!("'zones' takes no arguments");
                }
                Ok(Command::Zones)
            }
            "get" => match rest {
                [zone] => Ok(Command::Get {
                    zone: normalize_zone(zone),
                }),
                _ => anyhow::bail!("'get' takes exactly one zone"),
            },
            "append" | "set" | "delete" => {
                let Some((zone, raw_records)) = rest.split_first() else {
                    anyhow::bail!("'{}' needs a zone", verb);
                };
                if raw_records.is_empty() {
                    anyhow::bail!("'{}' needs at least one record", verb);
                }

                let zone = normalize_zone(zone);
                let records = raw_records
                    .iter()
                    .map(|raw| parse_record(raw))
                    .collect::<Result<Vec<_>>>()?;

                Ok(match verb.as_str() {
                    "append" => Command::Append { zone, records },
                    "set" => Command::Set { zone, records },
                    _ => Command::Delete { zone, records },
                })
            }
            other => anyhow::bail!("unknown command '{}'", other),
        }
    }
}

/// Zone names are accepted with or without the trailing dot
fn normalize_zone(zone: &str) -> String {
    zone.trim_end_matches('.').to_string()
}

fn parse_record(raw: &str) -> Result<GenericRecord> {
    let mut record: GenericRecord = raw
        .parse()
        .with_context(|| format!("invalid record '{}'", raw))?;
    if record.name == "@" {
        record.name.clear();
    }
    Ok(record)
}

/// Application configuration
struct Config {
    provider_type: String,
    provider_api_token: String,
    provider_base_url: Option<String>,
    http_timeout_secs: Option<u64>,
    dry_run: bool,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_token = lookup("ZONESYNC_PROVIDER_API_TOKEN").ok_or_else(|| {
            anyhow::anyhow!(
                "ZONESYNC_PROVIDER_API_TOKEN is required. \
                Set it via: export ZONESYNC_PROVIDER_API_TOKEN=your_token"
            )
        })?;

        let http_timeout_secs = lookup("ZONESYNC_HTTP_TIMEOUT_SECS")
            .map(|s| {
                s.trim()
                    .parse::<u64>()
                    .with_context(|| format!("ZONESYNC_HTTP_TIMEOUT_SECS is not a number: {}", s))
            })
            .transpose()?;

        let dry_run = match lookup("ZONESYNC_MODE").as_deref().map(str::trim) {
            None | Some("") | Some("live") => false,
            Some("dry-run") => true,
            Some(other) => anyhow::bail!(
                "ZONESYNC_MODE '{}' is not valid. Valid modes: live, dry-run",
                other
            ),
        };

        Ok(Self {
            provider_type: lookup("ZONESYNC_PROVIDER_TYPE").unwrap_or_else(|| "dynv6".to_string()),
            provider_api_token: resolve_secret(&raw_token)?,
            provider_base_url: lookup("ZONESYNC_PROVIDER_BASE_URL").filter(|s| !s.is_empty()),
            http_timeout_secs,
            dry_run,
            log_level: lookup("ZONESYNC_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if !SUPPORTED_PROVIDERS.contains(&self.provider_type.as_str()) {
            anyhow::bail!(
                "ZONESYNC_PROVIDER_TYPE '{}' is not supported. \
                Supported providers: {}",
                self.provider_type,
                SUPPORTED_PROVIDERS.join(", ")
            );
        }

        if parse_log_level(&self.log_level).is_none() {
            anyhow::bail!(
                "ZONESYNC_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            );
        }

        self.provider_config()
            .validate()
            .context("Invalid provider configuration")
    }

    fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::Dynv6 {
            api_token: self.provider_api_token.clone(),
            base_url: self.provider_base_url.clone(),
            timeout_secs: self.http_timeout_secs,
            dry_run: self.dry_run,
        }
    }
}

/// Resolve `@path` token indirection, trimming surrounding whitespace
fn resolve_secret(raw: &str) -> Result<String> {
    match raw.strip_prefix('@') {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read API token file {}", path))?;
            Ok(contents.trim().to_string())
        }
        None => Ok(raw.trim().to_string()),
    }
}

fn parse_log_level(level: &str) -> Option<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return CtlExitCode::Success.into();
        }
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            return CtlExitCode::ConfigError.into();
        }
    };

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return CtlExitCode::ConfigError.into();
    }

    let log_level = parse_log_level(&config.log_level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    let registry = ProviderRegistry::new();

    #[cfg(feature = "dynv6")]
    zonesync_provider_dynv6::register(&registry);

    let provider = match registry.create_provider(&config.provider_config()) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Failed to create provider: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CtlExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        let cancel = CancellationToken::new();
        spawn_interrupt_handler(cancel.clone());

        match run(provider.as_ref(), &cancel, &command).await {
            Ok(output) => {
                println!("{}", output);
                CtlExitCode::Success
            }
            Err(e) => {
                error!("Operation failed: {:#}", e);
                CtlExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Cancel the in-flight operation on Ctrl-C
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("Interrupted, cancelling operation");
                cancel.cancel();
            }
            Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
        }
    });
}

/// Run one command and render its result as pretty JSON
async fn run(
    provider: &dyn ZoneProvider,
    cancel: &CancellationToken,
    command: &Command,
) -> Result<String> {
    let output = match command {
        Command::Help => return Ok(USAGE.to_string()),
        Command::Zones => serde_json::to_value(provider.list_zones(cancel).await?)?,
        Command::Get { zone } => serde_json::to_value(provider.get_records(cancel, zone).await?)?,
        Command::Append { zone, records } => {
            let created = provider.append_records(cancel, zone, records).await?;
            info!(zone = %zone, requested = records.len(), created = created.len(), "Append finished");
            serde_json::to_value(created)?
        }
        Command::Set { zone, records } => {
            let set = provider.set_records(cancel, zone, records).await?;
            info!(zone = %zone, set = set.len(), "Set finished");
            serde_json::to_value(set)?
        }
        Command::Delete { zone, records } => {
            let deleted = provider.delete_records(cancel, zone, records).await?;
            info!(zone = %zone, requested = records.len(), deleted = deleted.len(), "Delete finished");
            serde_json::to_value(deleted)?
        }
    };

    Ok(serde_json::to_string_pretty(&output)?)
}
