use crate::config::AppConfig;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;

/// Explicit MongoDB handle: opened once at startup, cloned into the store,
/// closed with `shutdown` when the server stops.
#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn connect(config: &AppConfig) -> Result<Self, Box<dyn Error>> {
        let uri = config
            .database_url
            .as_deref()
            .ok_or("DATABASE_URL must be set")?;

        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(config.max_pool_size);
        client_options.min_pool_size = Some(config.min_pool_size);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(config.timeout);
        client_options.server_selection_timeout = Some(config.timeout);
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database_name);

        let mongodb = Self { client, db };

        // Test connection
        mongodb.ping().await?;

        mongodb.ensure_user_indexes(&config.users_collection).await?;

        Ok(mongodb)
    }

    /// Unique indexes on `id` and `email`. These are the real uniqueness
    /// guarantee; the service-level email check only gives a nicer error.
    async fn ensure_user_indexes(&self, collection: &str) -> Result<(), Box<dyn Error>> {
        log::info!("🔧 Creating database indexes...");

        let users = self.collection::<Document>(collection);

        for field in ["id", "email"] {
            let mut keys = Document::new();
            keys.insert(field, 1);

            let index = IndexModel::builder()
                .keys(keys)
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name(format!("{}_unique", field))
                        .build(),
                )
                .build();

            users.create_index(index).await?;
            log::info!("   ✅ Index ready: {}({}) unique", collection, field);
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database_name(&self) -> &str {
        self.db.name()
    }

    pub async fn shutdown(self) {
        log::info!("🔌 Closing MongoDB connection...");
        self.client.shutdown().await;
        log::info!("✅ MongoDB connection closed");
    }
}
