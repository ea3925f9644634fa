use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use usermanager::cli::{create_admin, seed_roles};
use usermanager::db::run_migrations;
use usermanager_config::DatabaseConfig;
use usermanager_db::init_db_pool;

#[derive(Parser)]
#[command(name = "usermanager-cli")]
#[command(about = "Administrative tools for the User Management API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user holding the Admin role
    CreateAdmin {
        #[arg(short = 'u', long)]
        username: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        #[arg(short = 'a', long)]
        age: Option<i64>,
    },
    /// Ensure the Admin and User roles exist
    SeedRoles,
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
    run_migrations(&pool).await?;

    match cli.command {
        Commands::CreateAdmin {
            username,
            email,
            password,
            age,
        } => {
            let username = match username {
                Some(username) => username,
                None => Input::new()
                    .with_prompt("Username")
                    .interact_text()
                    .context("Failed to read username")?,
            };
            let email = match email {
                Some(email) => email,
                None => Input::new()
                    .with_prompt("Email address")
                    .interact_text()
                    .context("Failed to read email")?,
            };
            let password = match password {
                Some(password) => password,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .context("Failed to read password")?,
            };
            let age = match age {
                Some(age) => age,
                None => Input::new()
                    .with_prompt("Age")
                    .interact_text()
                    .context("Failed to read age")?,
            };

            let user = create_admin(&pool, &username, &email, &password, age).await?;
            println!("Admin created");
            println!("   Id: {}", user.id);
            println!("   Username: {}", user.username);
            println!("   Email: {}", user.email);
        }
        Commands::SeedRoles => {
            for role in seed_roles(&pool).await? {
                println!("Role ready: {} ({})", role.name, role.id);
            }
        }
        Commands::Migrate => {
            println!("Migrations applied");
        }
    }

    Ok(())
}
