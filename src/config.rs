use crate::app_dirs::AppDirs;
use crate::bank::Topic;
use crate::quiz::DEFAULT_NUMBER_OF_QUESTIONS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub topic: String,
    pub number_of_questions: usize,
    pub allow_skip: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            topic: Topic::Economics.to_string(),
            number_of_questions: DEFAULT_NUMBER_OF_QUESTIONS,
            allow_skip: false,
        }
    }
}

impl Config {
    /// The configured topic, falling back to the default one when unknown
    pub fn topic(&self) -> Topic {
        self.topic.parse().unwrap_or_else(|_| {
            log::warn!("unknown topic `{}` in config, using default", self.topic);
            Topic::Economics
        })
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => log::warn!("ignoring unreadable config {}: {}", self.path.display(), e),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
