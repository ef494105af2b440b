use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;
use ozp_auth::create_access_token;
use ozp_cli::seeder::{self, SeedConfig};
use ozp_config::JwtConfig;
use ozp_db::{MIGRATOR, PgPool, init_db_pool};

#[derive(Parser)]
#[command(name = "ozp-cli")]
#[command(about = "OZP Center CLI - Administrative tools for OZP Center", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the embedded database migrations
    Migrate,
    /// Seed the database with the sample organizations and profiles
    Seed {
        /// Number of additional generated USER profiles
        #[arg(short = 'u', long, default_value = "0")]
        extra_users: usize,
    },
    /// Clear all seeded data (profiles, accounts, organizations)
    ClearSeed {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Print a bearer token for a username (development only)
    IssueToken {
        /// Username the token identifies
        username: String,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => handle_migrate().await,
        Commands::Seed { extra_users } => handle_seed(extra_users).await,
        Commands::ClearSeed { yes } => handle_clear_seed(yes).await,
        Commands::IssueToken { username } => handle_issue_token(&username),
    }
}

async fn connect() -> PgPool {
    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        eprintln!("❌ DATABASE_URL must be set");
        std::process::exit(1);
    });

    match init_db_pool(&database_url, 5).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_migrate() {
    let pool = connect().await;
    match MIGRATOR.run(&pool).await {
        Ok(_) => println!("✅ Migrations applied"),
        Err(e) => {
            eprintln!("\n❌ Error applying migrations: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(extra_users: usize) {
    let pool = connect().await;
    let config = SeedConfig::new().with_extra_users(extra_users);

    if let Err(e) = seeder::seed_all(&pool, config).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }
}

async fn handle_clear_seed(yes: bool) {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete all profiles, accounts and organizations?")
            .default(false)
            .interact()
            .unwrap_or(false);
        if !confirmed {
            println!("Aborted");
            return;
        }
    }

    let pool = connect().await;
    if let Err(e) = seeder::clear_all(&pool).await {
        eprintln!("\n❌ Error clearing seeded data: {}", e);
        std::process::exit(1);
    }
}

fn handle_issue_token(username: &str) {
    let jwt_config = JwtConfig::from_env();
    match create_access_token(username, &jwt_config) {
        Ok(token) => println!("{}", token),
        Err(e) => {
            eprintln!("\n❌ Error issuing token: {}", e.error);
            std::process::exit(1);
        }
    }
}
