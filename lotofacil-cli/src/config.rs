use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Valeurs par défaut des commandes, surchargées par la ligne de commande.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_file: PathBuf,
    /// Fenêtre des retards (0 = tout l'historique)
    pub overdue_window: usize,
    pub top_k: usize,
    pub trend_window: usize,
    pub games: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("lotofacil.csv"),
            overdue_window: 100,
            top_k: 10,
            trend_window: 50,
            games: 1,
        }
    }
}

pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let config = serde_json::from_str(&content)
        .with_context(|| format!("Configuration invalide dans {:?}", path))?;
    Ok(config)
}
