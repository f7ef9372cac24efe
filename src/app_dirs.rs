use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "quizr")
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("quizr_config.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("quizr");
            Some(state_dir.join("quizr.log"))
        } else {
            ProjectDirs::from("", "", "quizr")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("quizr.log"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_carry_app_name() {
        assert!(AppDirs::config_path().ends_with("config.json"));
        if let Some(log) = AppDirs::log_path() {
            assert_eq!(log.file_name().and_then(|n| n.to_str()), Some("quizr.log"));
        }
    }
}
