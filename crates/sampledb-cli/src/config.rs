//! CLI configuration: flag parsing and the derived runtime configuration.

use clap::Parser;
use sampledb_persistence::StoreConfig;

/// Run-mode literal selecting the production environment. The misspelling is
/// part of the published CLI contract and is kept for compatibility.
pub const PRODUCTION_RUNMODE: &str = "producation";

#[derive(Parser, Debug)]
#[command(name = "sampledb")]
#[command(about = "Repository-pattern CRUD demo over a document store")]
pub struct Args {
    /// Demo configuration argument
    #[arg(long)]
    pub arg1: String,

    /// Run mode; pass "producation" to select the production database
    #[arg(long)]
    pub runmode: Option<String>,

    /// Document store host
    #[arg(long, env = "SAMPLEDB_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Document store port
    #[arg(long, env = "SAMPLEDB_PORT", default_value_t = 27017)]
    pub port: u16,

    /// Recreate the database and collection on startup
    #[arg(
        long,
        env = "SAMPLEDB_FORCE_DROP",
        action = clap::ArgAction::Set,
        default_value_t = true
    )]
    pub force_drop: bool,
}

/// Environment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

/// Immutable runtime configuration, built once from parsed arguments and
/// passed by reference to everything that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub arg1: String,
    pub env: Environment,
    pub store: StoreConfig,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        let env = match args.runmode.as_deref() {
            Some(PRODUCTION_RUNMODE) => Environment::Prod,
            _ => Environment::Dev,
        };

        Self {
            arg1: args.arg1,
            env,
            store: StoreConfig {
                host: args.host,
                port: args.port,
                force_drop: args.force_drop,
            },
        }
    }

    /// Database name derived from the environment.
    pub fn database_name(&self) -> &'static str {
        match self.env {
            Environment::Dev => "dev_sampleDB",
            Environment::Prod => "sampleDB",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Config {
        Config::from_args(Args::try_parse_from(argv.iter().copied()).unwrap())
    }

    #[test]
    fn test_default_environment_is_dev() {
        let config = parse(&["sampledb", "--arg1=foo"]);
        assert_eq!(config.arg1, "foo");
        assert_eq!(config.env, Environment::Dev);
        assert_eq!(config.database_name(), "dev_sampleDB");
    }

    #[test]
    fn test_production_runmode() {
        let config = parse(&["sampledb", "--arg1=foo", "--runmode=producation"]);
        assert_eq!(config.env, Environment::Prod);
        assert_eq!(config.database_name(), "sampleDB");
    }

    #[test]
    fn test_correctly_spelled_runmode_stays_dev() {
        // Only the exact historical literal selects production.
        let config = parse(&["sampledb", "--arg1=foo", "--runmode=production"]);
        assert_eq!(config.env, Environment::Dev);
    }

    #[test]
    fn test_missing_arg1_is_fatal() {
        assert!(Args::try_parse_from(["sampledb"]).is_err());
        assert!(Args::try_parse_from(["sampledb", "--runmode=producation"]).is_err());
    }

    #[test]
    fn test_store_overrides() {
        let config = parse(&[
            "sampledb",
            "--arg1=foo",
            "--host=10.0.0.5",
            "--port=27018",
            "--force-drop=false",
        ]);
        assert_eq!(config.store.host, "10.0.0.5");
        assert_eq!(config.store.port, 27018);
        assert!(!config.store.force_drop);
    }
}
