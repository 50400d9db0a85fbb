use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use paginator::PaginatorConfig;

use super::run::RunCommand;
use super::view::ViewCommand;

/// Paginator - page arithmetic and navigation for list hosts
#[derive(Debug, Parser)]
#[command(
    name = "paginator",
    version,
    about = "Page arithmetic and navigation for list hosts",
    long_about = r#"Builds a pagination state from flags, config file and environment,
then applies navigation actions and prints every page change.

Examples:
  paginator view --length 95 --page-size 10
  paginator run --length 95 --page-size 10 --page-index 2 size=5
  echo "next next last" | paginator run -l 95 -s 10 --format json"#
)]
pub struct Cli {
    /// Path to a JSON config file with default options
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply navigation actions and print each page change
    Run(RunCommand),
    /// Print the derived view without navigating
    View(ViewCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = PaginatorConfig::init(self.config.as_deref()).await?;
        debug!(?config, "Configuration initialized");

        match self.command {
            Commands::Run(run_cmd) => run_cmd.execute(&config).await,
            Commands::View(view_cmd) => view_cmd.execute(&config).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::run::Action;

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::try_parse_from([
            "paginator", "run", "--length", "95", "-s", "10", "next", "size=5",
        ])
        .unwrap();

        match cli.command {
            Commands::Run(run) => {
                assert_eq!(run.state.length.as_deref(), Some("95"));
                assert_eq!(run.state.page_size.as_deref(), Some("10"));
                let actions: Vec<Action> =
                    run.actions.iter().map(|a| a.parse().unwrap()).collect();
                assert_eq!(actions, vec![Action::Next, Action::PageSize(5)]);
            }
            Commands::View(_) => panic!("expected run command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["paginator", "view", "--debug", "-c", "p.json"]).unwrap();
        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("p.json")));
        assert!(matches!(cli.command, Commands::View(_)));
    }
}
