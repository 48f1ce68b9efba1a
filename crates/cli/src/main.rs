use anyhow::Result;
use clap::{Parser, Subcommand};

use usergate_cli::{ApiClient, format_user};
use usergate_core::{ListParams, UserId, UserInput};

#[derive(Parser)]
#[command(name = "usergate", version, about = "Usergate CLI - manage user records")]
struct Cli {
    /// Server URL
    #[arg(long, env = "USERGATE_URL", default_value = "http://localhost:8000")]
    server: String,

    /// Username used to obtain a token
    #[arg(long, env = "USERGATE_USERNAME", default_value = "user")]
    username: String,

    /// Password used to obtain a token
    #[arg(long, env = "USERGATE_PASSWORD", default_value = "password", hide_env_values = true)]
    password: String,

    /// Existing bearer token; skips the login round trip
    #[arg(long, env = "USERGATE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and print a bearer token
    Login,
    /// List users
    List {
        #[arg(long)]
        page: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
        /// Exact name match
        #[arg(long)]
        name: Option<String>,
        /// Exact age match
        #[arg(long)]
        age: Option<i32>,
    },
    /// Show one user
    Get { id: i64 },
    /// Create a user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        age: i32,
    },
    /// Replace a user's name, email and age
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        age: i32,
    },
    /// Delete a user
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    usergate_observability::init_cli();

    let cli = Cli::parse();
    let mut client = ApiClient::new(&cli.server);

    if let Commands::Login = cli.command {
        let token = client.login(&cli.username, &cli.password).await?;
        println!("{}", token);
        return Ok(());
    }

    match cli.token {
        Some(token) => client = client.with_token(token),
        None => {
            client.login(&cli.username, &cli.password).await?;
        }
    }

    match cli.command {
        Commands::Login => {}
        Commands::List {
            page,
            limit,
            name,
            age,
        } => {
            let params = ListParams {
                page: page.map(|v| v.to_string()),
                limit: limit.map(|v| v.to_string()),
                name,
                age: age.map(|v| v.to_string()),
            };
            let users = client.list(&params).await?;
            if users.is_empty() {
                println!("No users found.");
            }
            for user in &users {
                println!("{}", format_user(user));
            }
        }
        Commands::Get { id } => {
            let user = client.get(UserId::new(id)).await?;
            println!("{}", format_user(&user));
        }
        Commands::Create { name, email, age } => {
            let user = client.create(&UserInput::new(name, email, age)).await?;
            println!("Created user with ID: {}", user.id);
        }
        Commands::Update {
            id,
            name,
            email,
            age,
        } => {
            let user = client
                .update(UserId::new(id), &UserInput::new(name, email, age))
                .await?;
            println!("Updated: {}", format_user(&user));
        }
        Commands::Delete { id } => {
            let message = client.delete(UserId::new(id)).await?;
            println!("{}", message);
        }
    }

    Ok(())
}
