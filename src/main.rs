use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;

use trojan_go_fmt::settings::Settings;
use trojan_go_fmt::{
    build_custom_trojan_go_config, build_trojan_go_config_string, explode_trojan_go,
    parse_trojan_go_config, trojan_go_to_link,
};

/// Convert trojan-go endpoints between share links and engine configs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the settings file (TOML or YAML)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a trojan-go:// link into an engine config
    Parse {
        /// The trojan-go:// link
        link: String,

        /// Local listen port, overrides the settings file
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,

        /// Address the engine should dial instead of the server (HOST:PORT)
        #[arg(long, value_name = "ADDRESS")]
        relay: Option<String>,
    },
    /// Convert an engine config file into a trojan-go:// link
    Link {
        /// Engine config file
        file: String,
    },
    /// Overwrite the local port of an engine config file
    Rehome {
        /// Engine config file
        file: String,

        /// New local listen port
        #[arg(short, long, value_name = "PORT")]
        port: u16,
    },
    /// Print the endpoint record of a trojan-go:// link
    Inspect {
        /// The trojan-go:// link
        link: String,
    },
}

fn parse_relay(relay: &str) -> anyhow::Result<(String, u16)> {
    let Some((host, port)) = relay.rsplit_once(':') else {
        bail!("relay must be HOST:PORT, got {}", relay);
    };
    let port: u16 = port
        .parse()
        .with_context(|| format!("invalid relay port in {}", relay))?;
    let host = host.trim_start_matches('[').trim_end_matches(']');
    Ok((host.to_string(), port))
}

fn main() -> anyhow::Result<()> {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    // Parse command line arguments
    let args = Args::parse();

    let mut settings = match args.config.as_deref() {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("failed to load settings from {}", path))?,
        None => Settings::default(),
    };

    match args.command {
        Command::Parse { link, port, relay } => {
            let mut endpoint = explode_trojan_go(&link)?;
            if let Some(relay) = relay {
                let (address, relay_port) = parse_relay(&relay)?;
                endpoint = endpoint.with_resolved(&address, relay_port);
            }
            if let Some(port) = port {
                settings.runtime.local_port = port;
            }
            info!("Building engine config for {}", endpoint.display_name());
            let resolver = settings.plugin_resolver();
            println!(
                "{}",
                build_trojan_go_config_string(&endpoint, &settings.runtime, &resolver)?
            );
        }
        Command::Link { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file))?;
            let endpoint = parse_trojan_go_config(&content)?;
            println!("{}", trojan_go_to_link(&endpoint));
        }
        Command::Rehome { file, port } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file))?;
            println!("{}", build_custom_trojan_go_config(&content, port)?);
        }
        Command::Inspect { link } => {
            let endpoint = explode_trojan_go(&link)?;
            println!("{:#?}", endpoint);
        }
    }

    Ok(())
}
