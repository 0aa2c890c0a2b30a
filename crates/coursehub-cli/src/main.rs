use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use coursehub_cli::seeder::{self, MIN_PASSWORD_LENGTH, SeedConfig};
use coursehub_db::{DatabaseConfig, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "coursehub-cli")]
#[command(about = "CourseHub CLI - Administrative tools for CourseHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed a demo course with lectures, assignments and students
    SeedDemo {
        /// Number of lectures
        #[arg(long, default_value = "8")]
        lectures: usize,

        /// Number of assignments
        #[arg(long, default_value = "4")]
        assignments: usize,

        /// Number of student accounts
        #[arg(long, default_value = "10")]
        students: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let db_config = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&db_config)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(&pool, name, email, password).await,
        Commands::SeedDemo {
            lectures,
            assignments,
            students,
        } => {
            let config = SeedConfig {
                lectures,
                assignments,
                students,
            };
            handle_seed_demo(&pool, &config).await
        }
    }
}

async fn handle_create_admin(
    pool: &sqlx::PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Name")
            .interact_text()
            .context("Failed to read name")?,
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
            .with_prompt(format!("Password (min {MIN_PASSWORD_LENGTH} characters)"))
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let id = seeder::create_admin(pool, &name, &email, &password).await?;

    println!("\n✅ Administrator created successfully!");
    println!("   ID: {id}");
    println!("   Email: {}", email.trim().to_lowercase());
    println!("   Name: {}", name.trim());

    Ok(())
}

async fn handle_seed_demo(pool: &sqlx::PgPool, config: &SeedConfig) -> anyhow::Result<()> {
    println!("🌱 Seeding demo data...");

    let summary = seeder::seed_demo(pool, config).await?;

    println!("\n✅ Demo data ready");
    println!("   Course: {} ({})", summary.course_code, summary.course_id);
    println!(
        "   Lectures: {} ({} published)",
        summary.lectures, summary.published_lectures
    );
    println!("   Assignments: {}", summary.assignments);
    println!("   Students: {} (password: password123)", summary.students);

    Ok(())
}
