use crate::error::{GalleryError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 公開スプレッドシートのID（未設定ならローカルCSVを使う）
    pub sheet_id: Option<String>,
    pub sheet_gid: String,
    pub csv_path: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GalleryError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("works-gallery").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            sheet_id: None,
            sheet_gid: "0".into(),
            csv_path: "data/works.csv".into(),
        }
    }

    /// データソースを解決する
    ///
    /// シートID設定時は公開CSVエクスポートのエンドポイント、
    /// 未設定時はローカルCSVのパス。
    pub fn data_source(&self) -> String {
        match &self.sheet_id {
            Some(id) => format!(
                "https://docs.google.com/spreadsheets/d/{}/export?format=csv&gid={}",
                id, self.sheet_gid
            ),
            None => self.csv_path.clone(),
        }
    }

    pub fn set_sheet_id(&mut self, id: String) -> Result<()> {
        self.sheet_id = Some(id);
        self.save()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_source_local_fallback() {
        let config = Config::default();
        assert_eq!(config.data_source(), "data/works.csv");
    }

    #[test]
    fn test_data_source_sheet_endpoint() {
        let config = Config {
            sheet_id: Some("abc123".into()),
            sheet_gid: "0".into(),
            csv_path: "data/works.csv".into(),
        };
        assert_eq!(
            config.data_source(),
            "https://docs.google.com/spreadsheets/d/abc123/export?format=csv&gid=0"
        );
    }
}
