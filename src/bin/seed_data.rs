//! Seed data script - populates the database with demo staff and formulary
//!
//! Run with: cargo run --bin seed-data
//!
//! This creates:
//! - 3 users (nurse, witness, admin)
//! - 5 schedule II-IV medications with opening stock

use chrono::Utc;
use sea_orm::{ConnectOptions, Database, EntityTrait, PaginatorTrait, Set};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use medledger_api::entities::{
    medication::{self, Schedule},
    user::{self, UserRole},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("=== Medication Inventory Seed Data ===");

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://medledger.db?mode=rwc".to_string());

    let mut options = ConnectOptions::new(database_url.clone());
    options
        .max_connections(5)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10));

    info!("Connecting to database: {}", database_url);
    let db = Database::connect(options).await?;

    // Re-runs must not duplicate staff or formulary rows
    let existing = user::Entity::find().count(&db).await?;
    if existing > 0 {
        info!("Database already seeded ({} users present), nothing to do", existing);
        return Ok(());
    }

    info!("Creating users...");
    let user_count = create_users(&db).await?;
    info!("  Created {} users", user_count);

    info!("Creating medications...");
    let medication_count = create_medications(&db).await?;
    info!("  Created {} medications", medication_count);

    info!("=== Seed Data Complete ===");
    info!("");
    info!("Try these API calls:");
    info!("  curl http://localhost:3000/api/medications");
    info!("  curl http://localhost:3000/api/transactions");
    info!("  curl http://localhost:3000/api/audit-log");
    info!("");
    info!("Or explore interactively at: http://localhost:3000/docs");

    Ok(())
}

async fn create_users(db: &sea_orm::DatabaseConnection) -> anyhow::Result<usize> {
    let users_data = vec![
        ("nurse@test.com", "Nurse Joy", UserRole::Nurse),
        ("witness@test.com", "Dr. Smith", UserRole::Witness),
        ("admin@test.com", "Admin", UserRole::Admin),
    ];

    let now = Utc::now();
    let count = users_data.len();

    let rows = users_data
        .into_iter()
        .map(|(email, name, role)| user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            role: Set(role.as_str().to_string()),
            email: Set(email.to_string()),
            created_at: Set(now),
        });

    user::Entity::insert_many(rows).exec(db).await?;

    Ok(count)
}

async fn create_medications(db: &sea_orm::DatabaseConnection) -> anyhow::Result<usize> {
    let medications_data = vec![
        ("Morphine", Schedule::Ii, "mg", 100),
        ("Oxycodone", Schedule::Ii, "mg", 50),
        ("Diazepam", Schedule::Iv, "mg", 200),
        ("Ketamine", Schedule::Iii, "ml", 75),
        ("Lorazepam", Schedule::Iv, "mg", 120),
    ];

    let now = Utc::now();
    let count = medications_data.len();

    let rows = medications_data
        .into_iter()
        .map(|(name, schedule, unit, stock)| medication::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            schedule: Set(schedule.as_str().to_string()),
            unit: Set(unit.to_string()),
            current_stock: Set(stock),
            created_at: Set(now),
            updated_at: Set(now),
        });

    medication::Entity::insert_many(rows).exec(db).await?;

    Ok(count)
}
