use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use secrecy::SecretString;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use things_gateway::{Action, ActionRequest, Attribute, Config, Outcome, Resolution, ThingsSkill};

/// Things - voice device control for the Things API
#[derive(Parser)]
#[command(name = "things", version, about)]
struct Cli {
    /// Things gateway URL (overrides `THINGS_HOST` and the config file)
    #[arg(long)]
    host: Option<String>,

    /// Bearer token (overrides `THINGS_TOKEN` and the config file)
    #[arg(long)]
    token: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List device names the gateway can resolve
    Entities,
    /// Resolve a request and print the mutation without sending it
    Resolve(RequestArgs),
    /// Resolve a request and send the mutation
    Send(RequestArgs),
}

#[derive(Args)]
struct RequestArgs {
    /// Device name as spoken (e.g. "kitchen lamp")
    entity: String,

    /// Action (on, off, set, ...)
    #[arg(short, long, default_value = "set")]
    action: Action,

    /// Property name or title, or a symbolic attribute such as BRIGHTNESS
    #[arg(long)]
    attribute: Option<String>,

    /// Value to write; parsed as JSON, falling back to a plain string
    #[arg(long)]
    value: Option<String>,
}

impl RequestArgs {
    fn into_request(self) -> ActionRequest {
        ActionRequest {
            entity: self.entity,
            action: self.action,
            attribute: self.attribute.map(parse_attribute),
            value: self.value.map(|v| parse_value(&v)),
        }
    }
}

/// Symbolic names (e.g. `COLOR_TEMPERATURE`) become symbolic attributes
fn parse_attribute(raw: String) -> Attribute {
    serde_json::from_value(Value::String(raw.clone())).unwrap_or(Attribute::Named(raw))
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn,things_gateway=info",
        1 => "info,things_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = Config::load();
    if let Some(host) = cli.host {
        config.host = Some(host);
    }
    if let Some(token) = cli.token {
        config.token = Some(SecretString::from(token));
    }
    tracing::debug!(?config, "loaded configuration");

    if config.host.is_none() {
        tracing::warn!("no host configured, registry will be empty");
    }

    let skill = ThingsSkill::connect(&config).await?;

    match cli.command {
        Command::Entities => {
            for name in skill.entities() {
                println!("{name}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Resolve(args) => {
            let resolution = skill.can_handle(&args.into_request());
            Ok(report(&resolution))
        }
        Command::Send(args) => match skill.handle(&args.into_request()).await? {
            Outcome::Dispatched(descriptor) => {
                println!("{}", serde_json::to_string_pretty(&descriptor)?);
                Ok(ExitCode::SUCCESS)
            }
            Outcome::NotHandled(resolution) => Ok(report(&resolution)),
        },
    }
}

/// Print a resolution; unhandled requests exit non-zero
fn report(resolution: &Resolution) -> ExitCode {
    match resolution {
        Resolution::Handled(descriptor) => {
            match serde_json::to_string_pretty(descriptor) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("failed to encode descriptor: {e}");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Resolution::UnknownDevice(name) => {
            eprintln!("unknown device: {name}");
            ExitCode::from(2)
        }
        Resolution::NoMatchingProperty => {
            eprintln!("device has no matching property");
            ExitCode::from(2)
        }
        Resolution::Deferred(action) => {
            eprintln!("action {action} is not handled by this gateway");
            ExitCode::from(2)
        }
    }
}
