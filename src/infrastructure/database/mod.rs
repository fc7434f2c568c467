pub mod entities;
pub mod migrator;
pub mod repositories;

use sea_orm::{Database, DatabaseConnection};
use tracing::info;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./hotel.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./hotel.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
        }
    }

    /// Create config from environment variable
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://./hotel.db?mode=rwc".to_string()),
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let db = Database::connect(&config.url).await?;
    info!("Database connected successfully");
    Ok(db)
}

// ── Test support ────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixtures for service tests: an in-memory SQLite database
    //! with the full schema, plus seed helpers.

    use chrono::Utc;
    use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
    use sea_orm_migration::MigratorTrait;

    use super::entities::{room, room_category, user};
    use super::migrator::Migrator;

    /// One pooled connection only: every pool member of an in-memory
    /// SQLite database would otherwise see its own empty database.
    pub async fn connect_memory() -> DatabaseConnection {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = Database::connect(opts)
            .await
            .expect("connect to in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        db
    }

    pub async fn seed_user(db: &DatabaseConnection, id: &str) -> String {
        let now = Utc::now();
        user::ActiveModel {
            id: Set(id.to_string()),
            username: Set(format!("user-{id}")),
            email: Set(format!("{id}@example.com")),
            password_hash: Set("not-a-real-hash".to_string()),
            role: Set(user::UserRole::Guest),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
        }
        .insert(db)
        .await
        .expect("seed user");
        id.to_string()
    }

    pub async fn seed_category(
        db: &DatabaseConnection,
        name: &str,
        base_price: &str,
        max_occupancy: i32,
    ) -> i32 {
        let now = Utc::now();
        let model = room_category::ActiveModel {
            name: Set(name.to_string()),
            description: Set(None),
            base_price: Set(base_price.to_string()),
            max_occupancy: Set(max_occupancy),
            amenities: Set("[]".to_string()),
            images: Set("[]".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("seed category");
        model.id
    }

    pub async fn seed_room(db: &DatabaseConnection, number: &str, category_id: i32) -> i32 {
        let now = Utc::now();
        let model = room::ActiveModel {
            room_number: Set(number.to_string()),
            category_id: Set(category_id),
            status: Set("available".to_string()),
            floor: Set(1),
            notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("seed room");
        model.id
    }
}
