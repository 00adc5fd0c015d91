//! JustEat Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use justeat::prices::Price;
use justeat_app::{
    database,
    domain::catalog::{
        CatalogService, SqliteCatalogService,
        models::{NewMenuItem, NewRestaurant},
    },
};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "justeat-app", about = "JustEat CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate(MigrateArgs),
    Restaurant(RestaurantCommand),
    Menu(MenuCommand),
}

#[derive(Debug, Args)]
struct MigrateArgs {
    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct RestaurantCommand {
    #[command(subcommand)]
    command: RestaurantSubcommand,
}

#[derive(Debug, Subcommand)]
enum RestaurantSubcommand {
    Create(CreateRestaurantArgs),
}

#[derive(Debug, Args)]
struct CreateRestaurantArgs {
    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Restaurant display name
    #[arg(long)]
    name: String,

    /// Cuisine type, e.g. "Italian"
    #[arg(long)]
    cuisine: String,

    /// Street address
    #[arg(long)]
    address: String,

    /// Optional description
    #[arg(long)]
    description: Option<String>,

    /// Optional phone number
    #[arg(long)]
    phone: Option<String>,

    /// Owner UUID; generated when omitted
    #[arg(long)]
    owner: Option<Uuid>,
}

#[derive(Debug, Args)]
struct MenuCommand {
    #[command(subcommand)]
    command: MenuSubcommand,
}

#[derive(Debug, Subcommand)]
enum MenuSubcommand {
    Add(AddMenuItemArgs),
}

#[derive(Debug, Args)]
struct AddMenuItemArgs {
    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Owner UUID of the restaurant
    #[arg(long)]
    owner: Uuid,

    /// Restaurant UUID
    #[arg(long)]
    restaurant: Uuid,

    /// Item display name
    #[arg(long)]
    name: String,

    /// Price in minor currency units (pence/cents)
    #[arg(long)]
    price: u64,

    /// Menu category, e.g. "Mains"
    #[arg(long)]
    category: String,

    /// Optional description
    #[arg(long)]
    description: Option<String>,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Migrate(args) => migrate(args).await,
        Commands::Restaurant(RestaurantCommand {
            command: RestaurantSubcommand::Create(args),
        }) => create_restaurant(args).await,
        Commands::Menu(MenuCommand {
            command: MenuSubcommand::Add(args),
        }) => add_menu_item(args).await,
    }
}

async fn migrate(args: MigrateArgs) -> Result<(), String> {
    let pool = connect(&args.database_url).await?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to run migrations: {error}"))?;

    println!("migrations applied");

    Ok(())
}

async fn create_restaurant(args: CreateRestaurantArgs) -> Result<(), String> {
    let pool = connect(&args.database_url).await?;
    let service = SqliteCatalogService::new(database::Db::new(pool));
    let owner = args.owner.unwrap_or_else(Uuid::now_v7);

    let restaurant = service
        .create_restaurant(
            owner,
            NewRestaurant {
                name: args.name,
                description: args.description,
                cuisine_type: args.cuisine,
                address: args.address,
                phone: args.phone,
            },
        )
        .await
        .map_err(|error| format!("failed to create restaurant: {error}"))?;

    println!("restaurant_uuid: {}", restaurant.uuid);
    println!("owner_uuid: {owner}");

    Ok(())
}

async fn add_menu_item(args: AddMenuItemArgs) -> Result<(), String> {
    let pool = connect(&args.database_url).await?;
    let service = SqliteCatalogService::new(database::Db::new(pool));

    let item = service
        .create_menu_item(
            args.owner,
            NewMenuItem {
                restaurant: args.restaurant,
                name: args.name,
                description: args.description,
                price: Price::from_minor(args.price),
                category: args.category,
            },
        )
        .await
        .map_err(|error| format!("failed to add menu item: {error}"))?;

    println!("menu_item_uuid: {}", item.uuid);
    println!("price: {}", item.price);

    Ok(())
}

async fn connect(database_url: &str) -> Result<sqlx::SqlitePool, String> {
    database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
}
