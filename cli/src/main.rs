mod app;
mod browse;
mod favorites;
mod generate;
mod output;
mod plan;
mod validate;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

use app::App;

#[derive(Parser)]
#[command(name = "mealswipe")]
#[command(about = "Discover recipes, keep favorites, plan the week", long_about = None)]
struct Cli {
    /// User id to act as (overrides MEALSWIPE_USER)
    #[arg(long, global = true)]
    user: Option<String>,

    /// Store directory (overrides MEALSWIPE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Recipe fields shared by `add` and `edit`.
#[derive(Args, Debug, Default)]
pub struct RecipeFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    instructions: Option<String>,
    #[arg(long)]
    area: Option<String>,
    /// Thumbnail URL
    #[arg(long)]
    thumb: Option<String>,
    /// Ingredient as "name=measure"; repeat for each ingredient
    #[arg(long = "ingredient")]
    ingredients: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a random recipe from MealDB
    Random {
        /// Swipe right: save it to favorites
        #[arg(long)]
        like: bool,
    },
    /// Search MealDB by recipe name
    Search {
        term: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 10)]
        per_page: usize,
    },
    /// Show one recipe: your version if you have one, otherwise MealDB's
    Show { id: String },
    /// Toggle a MealDB recipe in your favorites
    Like { id: String },
    /// List your favorite recipes
    Liked {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 10)]
        per_page: usize,
    },
    /// Summary of your favorites
    Profile,
    /// Repair or remove broken favorites
    Cleanup,
    /// Save your own version of a favorite
    Edit {
        id: String,
        #[command(flatten)]
        fields: RecipeFields,
    },
    /// Drop your version of a recipe and go back to the original
    Restore { id: String },
    /// Write a recipe from scratch
    Add {
        #[command(flatten)]
        fields: RecipeFields,
    },
    /// Build a weekly meal plan from your favorites
    Plan {
        /// Seed for a reproducible plan
        #[arg(long)]
        seed: Option<u64>,
        /// Day to re-roll (name or 1-7); repeatable
        #[arg(long)]
        swap: Vec<String>,
        /// Write the shopping list to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Generate a recipe with AI
    Generate {
        name: String,
        #[arg(long)]
        cuisine: Option<String>,
        /// Dietary preference; repeatable
        #[arg(long = "diet")]
        diets: Vec<String>,
        /// Save the result to favorites
        #[arg(long)]
        save: bool,
        /// Use the name exactly as typed
        #[arg(long)]
        no_correct: bool,
    },
    /// Run a stored recipe document through the sanitizer
    Validate {
        file: PathBuf,
        /// Document id (default: file name without extension)
        #[arg(long)]
        id: Option<String>,
    },
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { file, id } => validate::run(&file, id.as_deref()),
        command => {
            let app = App::from_env(cli.user, cli.data_dir)?;
            run(&app, command).await
        }
    }
}

async fn run(app: &App, command: Commands) -> Result<()> {
    match command {
        Commands::Random { like } => browse::random(app, like).await,
        Commands::Search {
            term,
            page,
            per_page,
        } => browse::search(app, &term, page, per_page).await,
        Commands::Show { id } => browse::show(app, &id).await,
        Commands::Like { id } => browse::like(app, &id).await,
        Commands::Liked { page, per_page } => favorites::liked(app, page, per_page).await,
        Commands::Profile => favorites::profile(app).await,
        Commands::Cleanup => favorites::cleanup(app).await,
        Commands::Edit { id, fields } => favorites::edit(app, &id, fields).await,
        Commands::Restore { id } => favorites::restore(app, &id).await,
        Commands::Add { fields } => favorites::add(app, fields).await,
        Commands::Plan { seed, swap, output } => plan::run(app, seed, &swap, output.as_deref()).await,
        Commands::Generate {
            name,
            cuisine,
            diets,
            save,
            no_correct,
        } => generate::run(app, &name, cuisine, diets, save, !no_correct).await,
        Commands::Validate { file, id } => validate::run(&file, id.as_deref()),
    }
}
