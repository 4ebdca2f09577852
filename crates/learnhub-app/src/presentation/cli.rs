use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast::Receiver;
use tracing::warn;

use crate::application::config::TimeoutConfig;
use crate::application::queries::{HEATMAP_DAYS, MAX_HEATMAP_DAYS};
use crate::application::services::{ConfigService, LogLevel, UiEvent};
use crate::presentation::bootstrap::{build_app_state, BootstrapOptions};
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use crate::presentation::{render, session};
use learnhub_domain::preferences::Theme;
use learnhub_domain::streak::CalendarDate;
use learnhub_domain::Clock;
use learnhub_infrastructure::clock::{FixedClock, SystemClock};
use learnhub_infrastructure::logging;
use learnhub_infrastructure::storage::StorageBackend;

/// Learning streaks, notifications and messages from the command line
#[derive(Debug, Parser)]
#[command(name = "learnhub", version, about)]
pub struct Cli {
    /// Directory holding stored data and logs
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage backend: memory, file or sqlite
    #[arg(long, global = true, value_name = "BACKEND")]
    pub storage: Option<StorageBackend>,

    /// Pretend today is this date
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    pub today: Option<CalendarDate>,

    /// error, warn, info, debug or trace
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect or update the login streak
    Streak {
        #[command(subcommand)]
        action: StreakCommand,
    },
    /// Show or change the colour theme
    Theme {
        #[command(subcommand)]
        action: ThemeCommand,
    },
    /// Show or change stored settings
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
    /// Start an interactive session (records today's login)
    Session,
}

#[derive(Debug, Subcommand)]
pub enum StreakCommand {
    /// Show the stored streak without recording a login
    Status,
    /// Record today's login
    CheckIn,
    /// Forget every recorded login
    Reset,
    /// Activity heatmap ending today
    Heatmap {
        #[arg(
            long,
            default_value_t = HEATMAP_DAYS,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_HEATMAP_DAYS))
        )]
        days: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    Show,
    /// Persist the default log level
    SetLogLevel { level: LogLevel },
}

#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    Show,
    Toggle,
    Set { theme: Theme },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Arc::new(ConfigService::from_default_location()?);
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => config.data_dir()?,
    };
    let storage = cli.storage.unwrap_or_else(|| config.storage());
    let log_level = cli.log_level.unwrap_or_else(|| config.get_log_level());

    logging::init_logger(&data_dir.join("logs"), log_level.as_str())?;
    if let Some(warning) = config.load_warning() {
        warn!("[config] {}", warning);
    }

    if let Command::Config { action } = &cli.command {
        return run_config(&config, action, &data_dir, storage);
    }

    let clock: Arc<dyn Clock> = match cli.today {
        Some(today) => Arc::new(FixedClock::on_date(today)),
        None => Arc::new(SystemClock),
    };

    let state = build_app_state(BootstrapOptions {
        config,
        data_dir,
        storage,
        clock,
        timeouts: TimeoutConfig::default(),
    })
    .await?;

    match cli.command {
        Command::Streak { action } => run_streak(&state, action).await?,
        Command::Theme { action } => run_theme(&state, action).await?,
        Command::Session => session::run(&state).await?,
        Command::Config { .. } => {}
    }

    state.drain().await;
    Ok(())
}

async fn run_streak(state: &AppState, action: StreakCommand) -> anyhow::Result<()> {
    match action {
        StreakCommand::Status => {
            print!("{}", render::streak(&state.queries.streak.status().await));
        }
        StreakCommand::CheckIn => {
            let mut events = state.runtime.ui.subscribe();
            let evaluation = state.services.streak.check_in().await?;
            println!("{}", render::check_in(&evaluation));

            state.runtime.scheduler.join_all().await;
            print_pending_events(&mut events);
            print!("{}", render::streak(&state.queries.streak.status().await));
        }
        StreakCommand::Reset => {
            state.services.streak.reset().await?;
            println!("Streak reset");
        }
        StreakCommand::Heatmap { days } => {
            print!("{}", render::heatmap(&state.queries.streak.heatmap(days).await?));
        }
    }
    Ok(())
}

async fn run_theme(state: &AppState, action: ThemeCommand) -> anyhow::Result<()> {
    let preferences = &state.services.preferences;
    let theme = match action {
        ThemeCommand::Show => preferences.theme().await,
        ThemeCommand::Toggle => preferences.toggle_theme().await?,
        ThemeCommand::Set { theme } => preferences.set_theme(theme).await?,
    };
    println!("Theme: {}", render::theme(theme));
    Ok(())
}

fn run_config(
    config: &ConfigService,
    action: &ConfigCommand,
    data_dir: &Path,
    storage: StorageBackend,
) -> anyhow::Result<()> {
    match action {
        ConfigCommand::Show => {
            println!("Config file: {}", config.config_path().display());
            println!("Log level:   {}", config.get_log_level().as_str());
            println!("Storage:     {}", storage);
            println!("Data dir:    {}", data_dir.display());
            if let Some(log_dir) = logging::get_log_dir() {
                println!("Log dir:     {}", log_dir.display());
            }
        }
        ConfigCommand::SetLogLevel { level } => {
            config.set_log_level(*level).map_err(CommandError::from)?;
            println!("Log level set to {} (applies on next start)", level.as_str());
        }
    }
    Ok(())
}

fn print_pending_events(events: &mut Receiver<UiEvent>) {
    while let Ok(event) = events.try_recv() {
        println!("{}", render::ui_event(&event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "learnhub",
            "streak",
            "check-in",
            "--storage",
            "memory",
            "--today",
            "2024-01-07",
        ])
        .unwrap();

        assert_eq!(cli.storage, Some(StorageBackend::Memory));
        assert_eq!(cli.today, CalendarDate::from_ymd(2024, 1, 7));
        assert!(matches!(
            cli.command,
            Command::Streak {
                action: StreakCommand::CheckIn
            }
        ));
    }

    #[test]
    fn test_parse_theme_and_heatmap() {
        let cli = Cli::try_parse_from(["learnhub", "theme", "set", "dark"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Theme {
                action: ThemeCommand::Set { theme: Theme::Dark }
            }
        ));

        let cli = Cli::try_parse_from(["learnhub", "streak", "heatmap"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Streak {
                action: StreakCommand::Heatmap { days: 30 }
            }
        ));
    }

    #[test]
    fn test_heatmap_days_are_bounded() {
        let cli = Cli::try_parse_from(["learnhub", "streak", "heatmap", "--days", "366"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Streak {
                action: StreakCommand::Heatmap { days: 366 }
            }
        ));

        assert!(Cli::try_parse_from(["learnhub", "streak", "heatmap", "--days", "0"]).is_err());
        assert!(Cli::try_parse_from(["learnhub", "streak", "heatmap", "--days", "367"]).is_err());
        assert!(
            Cli::try_parse_from(["learnhub", "streak", "heatmap", "--days", "4294967295"]).is_err()
        );
    }

    #[test]
    fn test_parse_config_command() {
        let cli = Cli::try_parse_from(["learnhub", "config", "set-log-level", "debug"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigCommand::SetLogLevel {
                    level: LogLevel::Debug
                }
            }
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["learnhub", "--today", "2024-13-01", "session"]).is_err());
        assert!(Cli::try_parse_from(["learnhub", "--storage", "redis", "session"]).is_err());
        assert!(Cli::try_parse_from(["learnhub", "theme", "set", "sepia"]).is_err());
        assert!(Cli::try_parse_from(["learnhub", "config", "set-log-level", "loud"]).is_err());
    }
}
