use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    // Повторная инициализация не нужна (важно для тестов)
    if DB_CONN.get().is_some() {
        tracing::warn!("Database connection already initialized, skipping");
        return Ok(());
    }

    let db_file = db_path.unwrap_or("target/db/webhook_console.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    // Ensure required tables exist (minimal schema bootstrap)
    let check_config_table = r#"
        SELECT name FROM sqlite_master WHERE type='table' AND name='a001_webhook_config';
    "#;
    let config_table_exists = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            check_config_table.to_string(),
        ))
        .await?;

    if config_table_exists.is_empty() {
        tracing::info!("Creating a001_webhook_config table");
        let create_config_table_sql = r#"
            CREATE TABLE a001_webhook_config (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                url TEXT NOT NULL,
                parameters TEXT NOT NULL DEFAULT '[]',
                is_active INTEGER NOT NULL DEFAULT 1,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_config_table_sql.to_string(),
        ))
        .await?;
    }

    let check_log_table = r#"
        SELECT name FROM sqlite_master WHERE type='table' AND name='a002_webhook_log';
    "#;
    let log_table_exists = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            check_log_table.to_string(),
        ))
        .await?;

    if log_table_exists.is_empty() {
        tracing::info!("Creating a002_webhook_log table");
        let create_log_table_sql = r#"
            CREATE TABLE a002_webhook_log (
                id TEXT PRIMARY KEY NOT NULL,
                webhook_id TEXT NOT NULL,
                status TEXT NOT NULL,
                request_payload TEXT NOT NULL DEFAULT '{}',
                response_payload TEXT,
                error_message TEXT,
                created_at TEXT NOT NULL
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_log_table_sql.to_string(),
        ))
        .await?;
    }

    if DB_CONN.set(conn).is_err() {
        // Гонка двух инициализаций: первая победила, вторая не нужна
        tracing::warn!("Database connection already initialized");
    }
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
