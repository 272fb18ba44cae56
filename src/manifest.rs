use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::descriptor::{ComponentId, GameDescriptor, GameInfo};
use crate::error::RegistryError;
use crate::loader::{ComponentResolver, resolver_loader};
use crate::registry::GameRegistry;

/// A game catalog declared in a TOML manifest.
///
/// Deployments that don't want the built-in table can describe their own:
///
/// ```toml
/// [[games]]
/// name = "扫雷"
/// component = "Minesweeper"
/// description = "一个简单的扫雷游戏。"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub games: Vec<ManifestGame>,
}

/// One `[[games]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestGame {
    pub name: String,
    pub component: String,
    #[serde(default)]
    pub description: String,
    /// Free-form per-game options passed through to the host untouched.
    #[serde(default)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Manifest {
    /// Parse a manifest from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, RegistryError> {
        toml::from_str(content).map_err(|e| RegistryError::Manifest(e.to_string()))
    }

    /// Load a manifest file. A missing or unreadable file is an explicit
    /// error; there is no silent fallback to an empty catalog.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::Manifest(format!("{}: {e}", path.display())))?;
        let manifest = Self::from_toml(&content)?;
        tracing::info!(
            path = %path.display(),
            games = manifest.games.len(),
            "Loaded game manifest"
        );
        Ok(manifest)
    }

    /// Reject entries with empty fields and duplicate component ids.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut seen = HashSet::with_capacity(self.games.len());
        for game in &self.games {
            if game.name.is_empty() {
                return Err(RegistryError::InvalidDescriptor(format!(
                    "game \"{}\" has an empty name",
                    game.component
                )));
            }
            if game.component.is_empty() {
                return Err(RegistryError::InvalidDescriptor(format!(
                    "game \"{}\" has an empty component id",
                    game.name
                )));
            }
            if !seen.insert(game.component.as_str()) {
                return Err(RegistryError::DuplicateComponent(ComponentId::new(
                    game.component.as_str(),
                )));
            }
        }
        Ok(())
    }

    /// Validate and build a registry wired to `resolver`, preserving the
    /// manifest's declaration order.
    pub fn into_registry(
        self,
        resolver: Arc<dyn ComponentResolver>,
    ) -> Result<GameRegistry, RegistryError> {
        self.validate()?;
        let games: Vec<GameDescriptor> = self
            .games
            .into_iter()
            .map(|game| {
                let info = GameInfo {
                    name: game.name,
                    component: ComponentId(game.component),
                    description: game.description,
                    extra: game.extra,
                };
                let loader = resolver_loader(&resolver, info.component.clone());
                GameDescriptor::new(info, loader)
            })
            .collect();
        GameRegistry::new(games)
    }
}
