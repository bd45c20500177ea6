use crate::errors::ConfigError;
use crate::store::{FileStore, HabitStore, RemoteStore, StoreError};
use std::{env, path::PathBuf, sync::Arc};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/habits.json";

#[derive(Debug, Clone, PartialEq)]
pub enum Backend {
    File { path: PathBuf },
    Remote { url: String, api_key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub backend: Backend,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        let remote_url = lookup("HABITS_REMOTE_URL").filter(|url| !url.trim().is_empty());
        let backend = match remote_url {
            Some(url) => {
                let api_key = lookup("HABITS_REMOTE_KEY")
                    .filter(|key| !key.is_empty())
                    .ok_or(ConfigError::MissingRemoteKey)?;
                Backend::Remote { url, api_key }
            }
            None => Backend::File {
                path: lookup("APP_DATA_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            },
        };

        Ok(Self { port, backend })
    }
}

pub async fn open_store(backend: &Backend) -> Result<Arc<dyn HabitStore>, StoreError> {
    let store: Arc<dyn HabitStore> = match backend {
        Backend::File { path } => Arc::new(FileStore::open(path.clone()).await?),
        Backend::Remote { url, api_key } => Arc::new(RemoteStore::new(url.clone(), api_key.clone())),
    };
    Ok(store)
}
