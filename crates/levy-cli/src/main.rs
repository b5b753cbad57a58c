//! levy CLI: catalog inspection and dry-run purchase simulation for the
//! shipped data asset and user overrides. Nothing here touches a live
//! host; the simulator runs against an in-memory stand-in.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeSet;

use levy_config::LoadedCatalog;
use levy_purchase::{
    purchase, AddUnits, CultureSource, PurchaseKind, PurchaseOrder, Treasury, UnitSink,
};

#[derive(Parser)]
#[command(name = "levy")]
#[command(about = "Levy catalog and purchase tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Catalog inspection
    Catalog {
        #[command(subcommand)]
        cmd: CatalogCmd,
    },

    /// Dry-run simulation against an in-memory host
    Simulate {
        #[command(subcommand)]
        cmd: SimulateCmd,
    },
}

#[derive(Subcommand)]
enum CatalogCmd {
    /// Resolve a faction key (with fallback) and print the composition
    Resolve {
        /// Faction key, e.g. Vlandia
        #[arg(long)]
        key: String,

        /// Override YAML paths layered over the default asset, in order
        #[arg(long = "config")]
        config_paths: Vec<String>,
    },

    /// Print the canonical catalog hash and faction keys
    Hash {
        #[arg(long = "config")]
        config_paths: Vec<String>,
    },
}

#[derive(Subcommand)]
enum SimulateCmd {
    /// Run one purchase against a fresh in-memory host and print the outcome
    Purchase {
        /// Purchase kind: elite | basic | bandit | fian | sisters | pirate | other
        #[arg(long)]
        kind: String,

        /// Cost in denars
        #[arg(long)]
        cost: u64,

        /// Starting gold of the simulated host
        #[arg(long)]
        funds: u64,

        /// Raw culture id reported by the simulated host
        #[arg(long)]
        culture: Option<String>,

        /// Unit identifiers the simulated host cannot resolve
        #[arg(long = "forget")]
        forget: Vec<String>,

        #[arg(long = "config")]
        config_paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Catalog { cmd } => match cmd {
            CatalogCmd::Resolve { key, config_paths } => cmd_catalog_resolve(&key, &config_paths),
            CatalogCmd::Hash { config_paths } => cmd_catalog_hash(&config_paths),
        },
        Commands::Simulate { cmd } => match cmd {
            SimulateCmd::Purchase {
                kind,
                cost,
                funds,
                culture,
                forget,
                config_paths,
            } => cmd_simulate_purchase(&kind, cost, funds, culture, forget, &config_paths),
        },
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();
}

fn load(config_paths: &[String]) -> Result<LoadedCatalog> {
    if config_paths.is_empty() {
        levy_config::load_default()
    } else {
        let refs: Vec<&str> = config_paths.iter().map(String::as_str).collect();
        levy_config::load_with_overrides(&refs)
    }
}

fn cmd_catalog_resolve(key: &str, config_paths: &[String]) -> Result<()> {
    let loaded = load(config_paths)?;
    let composition = loaded.catalog.resolve(key);
    println!("{}", serde_json::to_string_pretty(composition)?);
    Ok(())
}

fn cmd_catalog_hash(config_paths: &[String]) -> Result<()> {
    let loaded = load(config_paths)?;
    println!("catalog_hash: {}", loaded.catalog_hash);
    println!("default_faction: {}", loaded.catalog.default_key());
    let keys: Vec<&str> = loaded.catalog.faction_keys().collect();
    println!("factions: {}", keys.join(", "));
    Ok(())
}

fn cmd_simulate_purchase(
    kind: &str,
    cost: u64,
    funds: u64,
    culture: Option<String>,
    forget: Vec<String>,
    config_paths: &[String],
) -> Result<()> {
    let loaded = load(config_paths)?;
    let kind = parse_kind(kind)?;

    let mut host = SimHost {
        gold: funds,
        culture,
        unknown: forget.into_iter().collect(),
        added: Vec::new(),
    };

    let outcome = purchase(&PurchaseOrder::new(kind, cost), &mut host, &loaded.catalog);
    tracing::debug!(gold_remaining = host.gold, "simulation finished");
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn parse_kind(s: &str) -> Result<PurchaseKind> {
    Ok(match s.trim().to_ascii_lowercase().as_str() {
        "elite" => PurchaseKind::Elite,
        "basic" => PurchaseKind::Basic,
        "bandit" => PurchaseKind::Bandit,
        "fian" | "savage" => PurchaseKind::Fian,
        "sisters" => PurchaseKind::Sisters,
        "pirate" => PurchaseKind::Pirate,
        "other" => PurchaseKind::Other,
        other => bail!("unknown purchase kind '{other}'"),
    })
}

/// Minimal in-memory host for dry runs. Knows every identifier except
/// the ones the user told it to forget.
struct SimHost {
    gold: u64,
    culture: Option<String>,
    unknown: BTreeSet<String>,
    added: Vec<(String, u32)>,
}

impl Treasury for SimHost {
    fn funds_available(&self) -> u64 {
        self.gold
    }

    fn debit(&mut self, amount: u64) {
        self.gold = self.gold.saturating_sub(amount);
    }
}

impl UnitSink for SimHost {
    fn add_units(&mut self, unit_id: &str, quantity: u32) -> AddUnits {
        if self.unknown.contains(unit_id) {
            return AddUnits::UnknownUnit;
        }
        self.added.push((unit_id.to_string(), quantity));
        AddUnits::Added
    }

    fn has_unit(&self, unit_id: &str) -> bool {
        !self.unknown.contains(unit_id)
    }
}

impl CultureSource for SimHost {
    fn current_culture_key(&self) -> Option<String> {
        self.culture.clone()
    }
}
