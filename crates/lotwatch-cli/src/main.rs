use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod run;

#[derive(Debug, Parser)]
#[command(name = "lotwatch")]
#[command(about = "Camera job-lot monitor for eBay UK")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    /// The requested command; a bare `lotwatch` is a normal run.
    fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Run { dry_run: false })
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one monitoring pass (the default when no command is given)
    Run {
        /// Log alerts instead of sending them and leave the seen-state untouched
        #[arg(long)]
        dry_run: bool,
    },
    /// Score a single title with the active rules
    Score {
        /// Listing title to evaluate
        title: String,
    },
    /// List the search term groups and mark the one active now
    Groups,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = lotwatch_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let rules = run::load_rules_for(&config)?;
    let now = chrono::Utc::now().timestamp();

    match cli.into_command() {
        Commands::Run { dry_run } => {
            run::run_monitor(&config, &rules, dry_run, now).await?;
        }
        Commands::Score { title } => {
            let scorer = lotwatch_core::RelevanceScorer::new(&rules.scoring)?;
            println!("{}", run::describe_verdict(&scorer, &title));
        }
        Commands::Groups => {
            let rotation = lotwatch_core::TermRotation::new(
                config.rotation_window_secs,
                rules.search.term_groups,
            );
            print!("{}", run::describe_groups(&rotation, now));
        }
    }

    Ok(())
}
