use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::error::Error;
use std::path::PathBuf;

use trivia_api::db;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed categories and questions from csv files in a directory
    Seed { path: PathBuf },
    /// Export categories and questions to csv files in a directory
    Export { path: PathBuf },
}

// Categories have no create endpoint; this tool is how they come into
// existence.
#[derive(Deserialize)]
struct CategorySeed {
    r#type: String,
}

#[derive(Deserialize)]
struct QuestionSeed {
    question: String,
    answer: String,
    category: String,
    difficulty: i64,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Seed { path } => seed_data(path).await.expect("Cannot seed"),
        Commands::Export { path } => export_data(path).await.expect("Cannot export"),
    }
}

async fn connect() -> SqlitePool {
    dotenv::dotenv().ok();
    let path = dotenv::var("DB_PATH").expect("DB_PATH must be set");
    db::establish_connection(&path)
        .await
        .expect("Unable to connect to database")
}

fn read_from<T: DeserializeOwned>(path: PathBuf) -> Result<Vec<T>, Box<dyn Error>> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);
    let records = rdr.deserialize().collect::<Result<Vec<T>, _>>()?;
    Ok(records)
}

fn write_to(path: PathBuf, data: Vec<impl Serialize>) -> Result<(), Box<dyn Error>> {
    let file = std::fs::File::create(path)?;
    let mut wtr = csv::Writer::from_writer(file);
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

async fn seed_data(path: PathBuf) -> Result<(), Box<dyn Error>> {
    let pool = connect().await;
    db::run_migrations(&pool).await?;

    let categories: Vec<CategorySeed> = read_from(path.join("categories.csv"))?;
    let questions: Vec<QuestionSeed> = read_from(path.join("questions.csv"))?;
    for category in categories {
        db::queries::categories::create_category(&pool, &category.r#type).await?;
    }
    for q in questions {
        db::queries::questions::create_question(
            &pool,
            &q.question,
            &q.answer,
            &q.category,
            q.difficulty,
        )
        .await?;
    }
    Ok(())
}

async fn export_data(path: PathBuf) -> Result<(), Box<dyn Error>> {
    let pool = connect().await;
    let categories = db::queries::categories::get_categories(&pool).await?;
    let questions = db::queries::questions::get_questions(&pool).await?;
    if !path.exists() {
        std::fs::create_dir_all(&path)?
    }
    write_to(path.join("categories.csv"), categories)?;
    write_to(path.join("questions.csv"), questions)?;
    Ok(())
}
