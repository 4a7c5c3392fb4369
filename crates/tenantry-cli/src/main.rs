use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tenantry_auth::{Identity, issue_token};
use tenantry_config::{DatabaseConfig, JwtConfig};
use tenantry_db::{PgStore, UserStore, init_db_pool};
use tenantry_models::{NewUser, roles};

#[derive(Parser)]
#[command(name = "tenantry-cli")]
#[command(about = "Tenantry CLI - Administrative tools for Tenantry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user the role gate can resolve
    CreateUser {
        /// Display name
        #[arg(short = 'n', long)]
        name: String,

        /// Email address (unique)
        #[arg(short = 'e', long)]
        email: String,

        /// Stored role, compared exactly (e.g. ADMIN, USER)
        #[arg(short = 'r', long, default_value = roles::USER)]
        role: String,

        /// Also print a token for the new user
        #[arg(long)]
        with_token: bool,
    },
    /// Sign a token for an existing user id
    IssueToken {
        /// Subject id embedded in the token
        #[arg(short = 'u', long)]
        user_id: String,

        /// Role claim embedded in the token
        #[arg(short = 'r', long, default_value = roles::USER)]
        role: String,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::CreateUser {
            name,
            email,
            role,
            with_token,
        } => handle_create_user(name, email, role, with_token).await,
        Commands::IssueToken { user_id, role } => handle_issue_token(&user_id, &role),
    };

    if let Err(e) = result {
        eprintln!("\n❌ Error: {e:#}");
        std::process::exit(1);
    }
}

async fn handle_create_user(
    name: String,
    email: String,
    role: String,
    with_token: bool,
) -> anyhow::Result<()> {
    // Read before touching the database so a bad secret fails fast
    let jwt_config = if with_token {
        Some(JwtConfig::from_env().context("invalid token configuration")?)
    } else {
        None
    };

    let database_config = DatabaseConfig::from_env().context("invalid database configuration")?;
    database_config.require_url()?;

    let pool = init_db_pool(&database_config)
        .await
        .context("failed to connect to database")?;
    let store = PgStore::new(pool);

    if database_config.run_migrations {
        store.migrate().await.context("failed to run migrations")?;
    }

    let user = store
        .insert_user(NewUser { name, email, role })
        .await
        .map_err(|e| {
            if e.is_conflict() {
                anyhow::anyhow!("a user with that email already exists")
            } else {
                anyhow::Error::new(e).context("failed to create user")
            }
        })?;

    println!("\n✅ User created successfully!");
    println!("   Id: {}", user.id);
    println!("   Email: {}", user.email);
    println!("   Role: {}", user.role);

    if let Some(jwt_config) = jwt_config {
        let identity = Identity::new(user.id.to_string(), user.role);
        let token = issue_token(&identity, Utc::now(), &jwt_config)?;
        println!("   Token: {token}");
    }

    Ok(())
}

fn handle_issue_token(user_id: &str, role: &str) -> anyhow::Result<()> {
    let jwt_config = JwtConfig::from_env().context("invalid token configuration")?;
    let token = issue_token(&Identity::new(user_id, role), Utc::now(), &jwt_config)?;

    println!("{token}");
    Ok(())
}
