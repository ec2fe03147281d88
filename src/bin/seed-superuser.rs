//! Superuser Seeding CLI
//!
//! Creates the initial superuser so the user-management endpoints have an
//! authorized caller. Run once after the database is migrated:
//!
//! ```text
//! seed-superuser --username alice --email alice@example.com --password secret
//! ```

use clap::Parser;
use dotenv::dotenv;

use pathfinder_host::{
    config::AppConfig,
    models::requests::CreateUserRequest,
    service::UserService,
};

/// Seed the initial superuser account
#[derive(Parser)]
#[command(name = "seed-superuser", about = "Create the initial superuser", version)]
struct Cli {
    /// Username of the superuser
    #[arg(long)]
    username: String,

    /// Email address; doubles as the OAuth2 client_id
    #[arg(long)]
    email: String,

    /// Password; doubles as the OAuth2 client_secret
    #[arg(long)]
    password: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    let config = AppConfig::from_env()?;
    config.validate()?;

    let pool = config.database.create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let user_service = UserService::new(pool);
    let user = user_service
        .create_user(
            &CreateUserRequest {
                username: cli.username,
                email: cli.email,
                password: cli.password,
            },
            true,
        )
        .await?;

    println!("Created superuser {} <{}>", user.username, user.email);
    Ok(())
}
