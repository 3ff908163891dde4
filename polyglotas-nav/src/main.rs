//! Navigation CLI (polyglotas-nav) - Main entry point
//!
//! Walks Next/Previous from a lesson route against the live backend or an
//! offline curriculum file, printing every route the controller pushes.
//! Useful for checking how a tier sees the curriculum and for reproducing
//! navigation reports.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};

use polyglotas_common::config::ConfigResolver;
use polyglotas_common::events::{EventBus, NavigationDirection};
use polyglotas_nav::navigator::LoggingNavigator;
use polyglotas_nav::route::parse_lesson_path;
use polyglotas_nav::source::{CurriculumSource, HttpCurriculumSource, InMemoryCurriculum};
use polyglotas_nav::{NavigationController, NavigationOutcome, Position};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Direction {
    Next,
    Previous,
}

impl From<Direction> for NavigationDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Next => NavigationDirection::Next,
            Direction::Previous => NavigationDirection::Previous,
        }
    }
}

/// Command-line arguments for polyglotas-nav
#[derive(Parser, Debug)]
#[command(name = "polyglotas-nav")]
#[command(about = "Resolve lesson navigation from a learner position")]
#[command(version)]
struct Args {
    /// Lesson route to start from, e.g. /learn/1/lesson/11/practice
    route: String,

    /// Zero-based phrase index within the starting lesson
    #[arg(short, long, default_value_t = 0)]
    phrase: usize,

    /// Direction to move
    #[arg(short, long, value_enum, default_value_t = Direction::Next)]
    direction: Direction,

    /// Number of moves to make
    #[arg(short, long, default_value_t = 1)]
    steps: usize,

    /// Offline curriculum JSON file (skips the backend)
    #[arg(long, env = "POLYGLOTAS_CURRICULUM")]
    curriculum: Option<PathBuf>,

    /// Backend base URL
    #[arg(long)]
    backend_url: Option<String>,

    /// Backend API key
    #[arg(long)]
    api_key: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Version banner from the values stamped by build.rs
fn build_info() -> String {
    format!(
        "polyglotas-nav v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = ConfigResolver::new()
        .with_backend_url(args.backend_url.clone())
        .with_api_key(args.api_key.clone())
        .with_config_file(args.config.clone())
        .resolve()
        .context("Failed to resolve configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "polyglotas_nav={level},polyglotas_common={level}",
                    level = config.log_level
                )
                .into()
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting {}", build_info());
    match &config.config_file {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => info!("No config file found, using defaults"),
    }
    debug!(
        "Backend {} (timeout {:?}, api key {})",
        config.backend_url,
        config.request_timeout,
        if config.api_key.is_some() { "set" } else { "not set" }
    );

    let (unit_id, lesson_id, activity) =
        parse_lesson_path(&args.route).context("Starting route is not a lesson route")?;
    let mut position = Position::new(unit_id, lesson_id, activity, args.phrase);

    let source: Arc<dyn CurriculumSource> = match &args.curriculum {
        Some(path) => {
            info!("Using offline curriculum {}", path.display());
            Arc::new(
                InMemoryCurriculum::from_file(path)
                    .with_context(|| format!("Failed to load curriculum {}", path.display()))?,
            )
        }
        None => {
            info!("Using backend {}", config.backend_url);
            Arc::new(HttpCurriculumSource::new(&config).context("Failed to build HTTP client")?)
        }
    };

    let events = EventBus::new(64);
    let mut rx = events.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            debug!("Navigation event: {:?}", event);
        }
    });

    let controller = NavigationController::new(source, Arc::new(LoggingNavigator)).with_event_bus(events);
    let direction: NavigationDirection = args.direction.into();

    for step in 1..=args.steps {
        controller
            .load(position.clone())
            .await
            .with_context(|| format!("Failed to load navigation context for {}", position))?;

        let outcome = match direction {
            NavigationDirection::Next => controller.navigate_next().await,
            NavigationDirection::Previous => controller.navigate_previous().await,
        };

        match outcome {
            Some(NavigationOutcome::Lesson(next)) => {
                debug!("Step {}: {}", step, next);
                position = next;
            }
            Some(NavigationOutcome::UnitOverview { unit_id }) => {
                info!("Stopped at overview of unit {}", unit_id);
                break;
            }
            None => {
                println!("No {} position from {}", direction, position);
                break;
            }
        }
    }

    Ok(())
}
