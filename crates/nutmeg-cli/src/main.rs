mod render;
mod views;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "nutmeg")]
#[command(about = "Connecticut shoreline restaurant directory")]
struct Cli {
    /// Base URL or local directory holding the JSON data files
    #[arg(long, global = true)]
    data_root: Option<String>,
    /// Path to the towns YAML file
    #[arg(long, global = true)]
    towns: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search restaurants across all towns (blank shows the featured list)
    Search {
        /// Matched against name, town and category
        text: Option<String>,
        /// Keep restaurants with a category containing this text
        #[arg(long)]
        category: Option<String>,
        /// Keep restaurants in exactly this category tab ("All" keeps everything)
        #[arg(long, conflicts_with = "category")]
        tab: Option<String>,
        /// Restrict to one town
        #[arg(long)]
        town: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Restaurants nearest a position
    Near {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Radius cap in miles (defaults to NUTMEG_NEAR_ME_RADIUS_MILES, else unbounded)
        #[arg(long)]
        radius: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// One town's page
    Town {
        town: String,
        #[arg(long)]
        json: bool,
    },
    /// Map markers for every placed restaurant
    Markers {
        #[arg(long)]
        town: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Category vocabulary per town
    Categories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = nutmeg_core::load_app_config_from_env()?;
    if let Some(root) = cli.data_root {
        config.data_root = root;
    }
    if let Some(path) = cli.towns {
        config.towns_path = path;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let towns = nutmeg_core::load_towns(&config.towns_path)?;
    let directory = views::load_directory(&config, &towns).await?;

    match cli.command {
        Some(Commands::Search {
            text,
            category,
            tab,
            town,
            json,
        }) => {
            let town = town.map(|t| views::resolve_town(&towns, &t)).transpose()?;
            let filters = views::SearchFilters {
                text: text.as_deref(),
                category: category.as_deref(),
                tab: tab.as_deref(),
                town: town.as_deref(),
            };
            views::run_search(&directory, &filters, json)?;
        }
        Some(Commands::Near {
            lat,
            lng,
            radius,
            json,
        }) => {
            views::run_near(&directory, &config, lat, lng, radius, json).await?;
        }
        Some(Commands::Town { town, json }) => {
            let town = views::resolve_town(&towns, &town)?;
            views::run_town(&directory, &town, json)?;
        }
        Some(Commands::Markers { town, json }) => {
            let town = town.map(|t| views::resolve_town(&towns, &t)).transpose()?;
            views::run_markers(&directory, town.as_deref(), json)?;
        }
        Some(Commands::Categories) => views::run_categories(&directory),
        None => {
            views::run_search(&directory, &views::SearchFilters::default(), false)?;
        }
    }

    Ok(())
}
