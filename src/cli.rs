use clap::{ArgAction, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::client::{RawResponse, SpaceTradersClient, WaypointQuery};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::models::AgentResponse;
use crate::savefile;
use crate::{v_debug, v_info};

#[derive(Parser, Debug)]
#[command(name = "stcli")]
#[command(about = "Command-line client for the SpaceTraders API", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (created with defaults when given and missing)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL request paths are appended to
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Save file holding the agent token; looked up as given, then inside the save directory
    #[arg(long = "savefile", global = true)]
    pub save_file: Option<PathBuf>,

    /// Directory save files are written to and searched in
    #[arg(long = "save-dir", global = true)]
    pub save_dir: Option<PathBuf>,

    /// Append every API call to this file
    #[arg(long = "api-log", global = true)]
    pub api_log: Option<PathBuf>,

    /// Increase diagnostic output on stderr (-v, -vv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new agent and write its save file
    Register {
        /// Agent symbol to register
        symbol: String,

        /// Starting faction (defaults to the configured faction)
        #[arg(long)]
        faction: Option<String>,

        /// Fetch the new agent with the returned token in the same run
        #[arg(long = "then-agent")]
        then_agent: bool,
    },

    /// Print the agent details
    Agent,

    /// Print a ship's navigation state
    Nav {
        /// Ship symbol, e.g. AGENT-1
        ship: String,
    },

    /// List waypoints in a system
    Waypoints {
        /// System symbol, e.g. X1-DF55
        system: String,

        /// Only waypoints with this trait (repeatable)
        #[arg(long = "trait")]
        traits: Vec<String>,

        /// Only waypoints of this type
        #[arg(long = "type")]
        waypoint_type: Option<String>,

        /// Results per page (1-20)
        #[arg(long, default_value_t = crate::client::api::DEFAULT_WAYPOINT_PAGE_LIMIT)]
        limit: u32,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Find the waypoint closest to a ship
    Nearest {
        /// Ship symbol
        ship: String,

        /// Only waypoints with this trait (repeatable)
        #[arg(long = "trait")]
        traits: Vec<String>,

        /// Only waypoints of this type
        #[arg(long = "type")]
        waypoint_type: Option<String>,
    },
}

impl Cli {
    /// Loads the config file and applies command-line overrides.
    pub fn effective_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::load_or_create(path)?,
            None => {
                let default_path = Path::new(crate::DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    ClientConfig::load_or_create(default_path)?
                } else {
                    ClientConfig::default()
                }
            }
        };

        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(save_dir) = &self.save_dir {
            config.storage.save_dir = save_dir.to_string_lossy().into_owned();
        }
        if let Some(api_log) = &self.api_log {
            config.logging.api_log_path = Some(api_log.to_string_lossy().into_owned());
        }
        config.logging.verbosity = config.logging.verbosity.max(self.verbose);

        config.validate()?;
        Ok(config)
    }
}

/// Runs one command. Payloads go to `out`; diagnostics go to stderr.
pub async fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let config = cli.effective_config()?;
    crate::verbosity::set_verbosity_level(config.logging.verbosity);
    config.print_summary();

    let client = SpaceTradersClient::from_config(&config)?;
    let save_dir = PathBuf::from(&config.storage.save_dir);

    match cli.command {
        Commands::Register { symbol, faction, then_agent } => {
            let faction = faction.unwrap_or_else(|| config.agent.default_faction.clone());
            v_info!("🚀 Creating Agent: {} ({})", symbol, faction);

            let raw = client.register_agent(&symbol, &faction).await?.require_success()?;
            let path = savefile::write_registration(&save_dir, &symbol, &raw.body)?;
            v_info!("💾 Save file written to {}", path.display());
            emit(out, &raw)?;

            if then_agent {
                let token = savefile::decode_token(&raw.body)?;
                let client = client.with_token(&token)?;
                print_agent(&client, out).await?;
            }
            Ok(())
        }
        Commands::Agent => {
            let client = authenticate(client, cli.save_file.as_deref(), &save_dir)?;
            print_agent(&client, out).await
        }
        Commands::Nav { ship } => {
            let client = authenticate(client, cli.save_file.as_deref(), &save_dir)?;
            let raw = client.get_ship_nav(&ship).await?;
            emit(out, &raw)?;
            raw.require_success().map(|_| ())
        }
        Commands::Waypoints { system, traits, waypoint_type, limit, page } => {
            let client = authenticate(client, cli.save_file.as_deref(), &save_dir)?;
            let query = WaypointQuery { limit, page, traits, waypoint_type };
            let raw = client.list_waypoints(&system, &query).await?;
            emit(out, &raw)?;
            raw.require_success().map(|_| ())
        }
        Commands::Nearest { ship, traits, waypoint_type } => {
            let client = authenticate(client, cli.save_file.as_deref(), &save_dir)?;
            let nearest = client
                .find_nearest_waypoint(&ship, &traits, waypoint_type.as_deref())
                .await?;
            let summary = serde_json::json!({
                "ship": nearest.ship.ship_symbol,
                "system": nearest.ship.system_symbol,
                "from": nearest.ship.destination,
                "waypoint": nearest.waypoint.symbol,
                "location": nearest.waypoint.location,
                "distance": nearest.distance,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
            Ok(())
        }
    }
}

fn authenticate(client: SpaceTradersClient, save_file: Option<&Path>, save_dir: &Path) -> Result<SpaceTradersClient> {
    let name = save_file
        .ok_or_else(|| ClientError::Config("no save file given; pass --savefile".to_string()))?;
    let path = savefile::resolve_save_path(name, save_dir)?;
    v_debug!("🔑 Loading token from {}", path.display());
    let token = savefile::load_token(&path)?;
    client.with_token(&token)
}

async fn print_agent<W: Write>(client: &SpaceTradersClient, out: &mut W) -> Result<()> {
    let raw = client.get_agent().await?;
    emit(out, &raw)?;
    let raw = raw.require_success()?;
    match raw.decode::<AgentResponse>() {
        Ok(envelope) => {
            v_info!("👤 {}", envelope.data.summary());
        }
        Err(e) => {
            v_debug!("⚠️  Agent summary unavailable: {}", e);
        }
    }
    Ok(())
}

fn emit<W: Write>(out: &mut W, raw: &RawResponse) -> Result<()> {
    v_info!("📡 Status: {}", raw.status_line());
    out.write_all(&raw.body)?;
    if raw.body.last() != Some(&b'\n') {
        out.write_all(b"\n")?;
    }
    Ok(())
}
