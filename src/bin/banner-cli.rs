use std::io::{self, Read};
use std::time::Duration;

use anyhow::{anyhow, Result};
use banner_relay::client::RelayClient;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "banner-cli")]
#[command(about = "CLI client for the banner relay")]
struct Cli {
    /// Relay address (e.g., "http://localhost:8080")
    #[arg(short, long, default_value = "http://localhost:8080")]
    server: String,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "120")]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the relay is up
    Health,

    /// Generate a design spec from a brief
    Generate {
        #[arg(long, default_value = "1080")]
        width: f64,
        #[arg(long, default_value = "1080")]
        height: f64,
        #[arg(long)]
        purpose: String,
        #[arg(long, default_value = "")]
        requirements: String,
    },

    /// Ask for edit suggestions on an existing banner
    Chat {
        message: String,
        #[arg(long, default_value = "")]
        context: String,
    },

    /// Publish a design spec to Figma
    Publish {
        /// Figma personal access token
        #[arg(long, env = "FIGMA_TOKEN", hide_env_values = true)]
        figma_token: String,

        /// Existing file to append to; a new file is created when omitted
        #[arg(long)]
        file_key: Option<String>,

        /// Design spec file path (use "-" for stdin). Either the bare spec or a
        /// full `/api/generate` response is accepted.
        #[arg(short, long, default_value = "-")]
        input: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = RelayClient::new(cli.server.clone(), Duration::from_secs(cli.timeout));

    let output = match cli.command {
        Command::Health => json!({ "status": client.health()? }),
        Command::Generate {
            width,
            height,
            purpose,
            requirements,
        } => {
            eprintln!("Generating {width}x{height} banner spec via {}...", cli.server);
            let generated = client.generate(width, height, &purpose, &requirements)?;
            json!({
                "design_spec": generated.design_spec,
                "design_brief": generated.design_brief,
            })
        }
        Command::Chat { message, context } => json!({ "reply": client.chat(&message, &context)? }),
        Command::Publish {
            figma_token,
            file_key,
            input,
        } => {
            let spec = read_spec(&input)?;
            let published = client.publish(&figma_token, &spec, file_key.as_deref())?;
            serde_json::to_value(published)?
        }
    };

    let pretty = serde_json::to_string_pretty(&output)
        .map_err(|e| anyhow!("Failed to serialize output: {e}"))?;
    println!("{pretty}");

    Ok(())
}

fn read_spec(input: &str) -> Result<Value> {
    let text = if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow!("Failed to read from stdin: {e}"))?;
        buffer
    } else {
        std::fs::read_to_string(input)
            .map_err(|e| anyhow!("Failed to read input file {input}: {e}"))?
    };

    let mut value: Value =
        serde_json::from_str(&text).map_err(|e| anyhow!("Failed to parse input JSON: {e}"))?;

    // Allow piping `banner-cli generate` straight into `banner-cli publish`.
    if let Some(spec) = value.get_mut("design_spec") {
        return Ok(spec.take());
    }
    Ok(value)
}
