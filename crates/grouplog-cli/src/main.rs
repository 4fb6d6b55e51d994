//! grouplog CLI — `grouplog` command.
//!
//! Derives the access policy, identity and default store options for a
//! group from its shared seed and prints them as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use grouplog::crypto::random::random_seed;
use grouplog::{
    build_access_policy, derive_identity, resolve_default_options, AccessPolicySpec, Group,
    IdentityDocument, Keystore, MemoryKeystore, StoreOptions,
};

// ── CLI structure ─────────────────────────────────────────────────────────────

/// grouplog CLI — derive write-access policies and signed identities for
/// replicated group logs.
#[derive(Parser, Debug)]
#[command(
    name = "grouplog",
    about = "grouplog CLI",
    version,
    long_about = "grouplog — derive store configuration for replicated group logs.\n\nEvery peer holding the same group seed derives the same access policy\nand a self-consistent signed identity."
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a random group seed
    Seed,

    /// Print the public group document
    Group {
        /// Group seed (64 hex characters)
        #[arg(long)]
        seed: String,
    },

    /// Print the default access policy of a group
    Policy {
        /// Group seed (64 hex characters)
        #[arg(long)]
        seed: String,
    },

    /// Print the identity derived for a group
    Identity {
        /// Group seed (64 hex characters)
        #[arg(long)]
        seed: String,
    },

    /// Resolve default store options for a group
    Options {
        /// Group seed (64 hex characters)
        #[arg(long)]
        seed: String,

        /// JSON file holding a caller-supplied access policy
        #[arg(long)]
        access_controller: Option<PathBuf>,
    },
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_seed(seed: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(seed.trim()).context("seed is not valid hex")?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow!("seed must be 32 bytes, got {}", b.len()))
}

fn load_group(seed: &str) -> Result<Group> {
    let seed = parse_seed(seed)?;
    Group::from_seed(&seed).context("failed to derive group from seed")
}

fn keystore_for(group: &Group) -> Result<Arc<dyn Keystore>> {
    let ks = MemoryKeystore::new();
    ks.register_group(group)
        .context("failed to register group signing key")?;
    Ok(Arc::new(ks))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Printable view of resolved store options.
#[derive(Serialize)]
struct OptionsSummary {
    create: Option<bool>,
    access_controller: Option<AccessPolicySpec>,
    keystore: bool,
    identity: Option<IdentityDocument>,
}

impl From<&StoreOptions> for OptionsSummary {
    fn from(opts: &StoreOptions) -> Self {
        Self {
            create: opts.create,
            access_controller: opts.access_controller.clone(),
            keystore: opts.keystore.is_some(),
            identity: opts.identity.as_ref().map(|i| i.to_document()),
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn cmd_seed() -> Result<()> {
    println!("{}", hex::encode(random_seed()));
    Ok(())
}

fn cmd_group(seed: &str) -> Result<()> {
    let group = load_group(seed)?;
    print_json(&group.to_document()?)
}

fn cmd_policy(seed: &str) -> Result<()> {
    let group = load_group(seed)?;
    let policy = build_access_policy(&group).context("failed to build access policy")?;
    print_json(&policy)
}

fn cmd_identity(seed: &str) -> Result<()> {
    let group = load_group(seed)?;
    let ks = keystore_for(&group)?;
    let identity = derive_identity(&group, &ks).context("failed to derive identity")?;
    print_json(&identity.to_document())
}

fn cmd_options(seed: &str, access_controller: Option<PathBuf>) -> Result<()> {
    let group = load_group(seed)?;
    let ks = keystore_for(&group)?;

    let options = match access_controller {
        Some(path) => {
            let data = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let policy = AccessPolicySpec::from_json(&data)
                .with_context(|| format!("invalid access policy in {}", path.display()))?;
            Some(StoreOptions::new().with_access_controller(policy))
        }
        None => None,
    };

    let resolved =
        resolve_default_options(&group, options, ks).context("failed to resolve store options")?;
    print_json(&OptionsSummary::from(&resolved))
}

fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let result = match cli.command {
        Commands::Seed => cmd_seed(),
        Commands::Group { seed } => cmd_group(&seed),
        Commands::Policy { seed } => cmd_policy(&seed),
        Commands::Identity { seed } => cmd_identity(&seed),
        Commands::Options {
            seed,
            access_controller,
        } => cmd_options(&seed, access_controller),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
