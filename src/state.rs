use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use crate::config::AppConfig;
use crate::storage::{DiskStore, ImageStore};

#[derive(Clone)]
pub struct AppState {
    pub db: MySqlPool,
    pub config: Arc<AppConfig>,
    pub images: Arc<dyn ImageStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = MySqlPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect(&config.database.url())
            .await
            .context("connect to database")?;

        let images = Arc::new(DiskStore::new(&config.upload_dir)) as Arc<dyn ImageStore>;

        Ok(Self { db, config, images })
    }

    pub fn from_parts(db: MySqlPool, config: Arc<AppConfig>, images: Arc<dyn ImageStore>) -> Self {
        Self { db, config, images }
    }

    /// State backed by a lazy pool and an in-memory store, for router tests
    /// that never reach the database.
    pub fn fake() -> Self {
        use crate::config::DatabaseConfig;
        use crate::storage::MemoryStore;

        let config = Arc::new(AppConfig {
            database: DatabaseConfig {
                host: "localhost".into(),
                user: "root".into(),
                password: "root".into(),
                database: "userfind_test".into(),
                port: 3306,
            },
            upload_dir: "img".into(),
        });

        let db = MySqlPoolOptions::new()
            .connect_lazy(&config.database.url())
            .expect("lazy pool ok");

        let images = Arc::new(MemoryStore::default()) as Arc<dyn ImageStore>;
        Self { db, config, images }
    }
}
