use std::env;
use std::time::Duration;

/// Which collaborator backs the user store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    MongoDB,
    Memory,
}

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub database_name: String,
    pub users_collection: String,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub timeout: Duration,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup so it can be
    /// exercised without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("PORT", lookup("PORT"), 3000u16)?;

        let storage = match lookup("STORAGE_BACKEND")
            .map(|s| s.trim().to_lowercase())
            .as_deref()
        {
            None | Some("") | Some("mongodb") | Some("mongo") => StorageBackend::MongoDB,
            Some("memory") => StorageBackend::Memory,
            Some(other) => return Err(format!("Unknown STORAGE_BACKEND '{}'", other)),
        };

        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());
        if storage == StorageBackend::MongoDB && database_url.is_none() {
            return Err("DATABASE_URL must be set when STORAGE_BACKEND is mongodb".to_string());
        }

        let database_name = lookup("DATABASE_NAME")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| database_url.as_deref().and_then(database_name_from_uri))
            .unwrap_or_else(|| "users_db".to_string());

        let users_collection = lookup("USERS_COLLECTION").unwrap_or_else(|| "users".to_string());
        let max_pool_size = parse_or("MONGO_MAX_POOL_SIZE", lookup("MONGO_MAX_POOL_SIZE"), 20u32)?;
        let min_pool_size = parse_or("MONGO_MIN_POOL_SIZE", lookup("MONGO_MIN_POOL_SIZE"), 5u32)?;
        if min_pool_size > max_pool_size {
            return Err(format!(
                "MONGO_MIN_POOL_SIZE ({}) cannot exceed MONGO_MAX_POOL_SIZE ({})",
                min_pool_size, max_pool_size
            ));
        }
        let timeout_secs = parse_or("MONGO_TIMEOUT_SECS", lookup("MONGO_TIMEOUT_SECS"), 5u64)?;

        let cors_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            storage,
            database_url,
            database_name,
            users_collection,
            max_pool_size,
            min_pool_size,
            timeout: Duration::from_secs(timeout_secs),
            cors_origins,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, String> {
    match raw {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| format!("{} has an invalid value: '{}'", key, value)),
        _ => Ok(default),
    }
}

// mongodb://host:27017/name?opts -> name
fn database_name_from_uri(uri: &str) -> Option<String> {
    let without_scheme = uri.split("://").nth(1)?;
    let path = without_scheme.split_once('/')?.1;
    let name = path.split('?').next()?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
