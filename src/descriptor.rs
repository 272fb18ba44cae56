use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::loader::{ComponentFuture, ComponentLoader};

/// Stable identifier for a game's implementation component.
///
/// Decoupled from the display name so relabeling a menu entry never breaks
/// routing, deep links, or persisted "last played" references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Display metadata for one catalog entry, shown on the selection menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    /// Human-readable display label.
    pub name: String,
    /// Stable id used for lookup and routing.
    pub component: ComponentId,
    /// Summary shown to the user before selecting the game.
    pub description: String,
    /// Free-form per-game options forwarded to the host. Populated from
    /// manifest files; empty for the built-in catalog.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, serde_json::Value>,
}

impl GameInfo {
    pub fn new(
        name: impl Into<String>,
        component: impl Into<ComponentId>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            component: component.into(),
            description: description.into(),
            extra: HashMap::new(),
        }
    }
}

/// A loaded game implementation, ready for the host to mount.
///
/// The actual engine behind an artifact is out of scope here; the host only
/// needs a shareable handle that identifies which component it implements.
pub trait GameComponent: Send + Sync {
    /// The stable id this artifact implements.
    fn component_id(&self) -> &ComponentId;
}

/// One catalog entry: display metadata plus the deferred loader for the
/// game's implementation.
pub struct GameDescriptor {
    pub info: GameInfo,
    loader: ComponentLoader,
}

impl GameDescriptor {
    pub fn new(info: GameInfo, loader: ComponentLoader) -> Self {
        Self { info, loader }
    }

    /// Wrap a plain closure as this entry's deferred loader.
    pub fn with_loader<F>(info: GameInfo, loader: F) -> Self
    where
        F: Fn() -> ComponentFuture + Send + Sync + 'static,
    {
        Self::new(info, Arc::new(loader))
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn component(&self) -> &ComponentId {
        &self.info.component
    }

    pub fn description(&self) -> &str {
        &self.info.description
    }

    /// Trigger on-demand retrieval of this game's implementation.
    ///
    /// Safe to invoke repeatedly; the loading subsystem may return a cached
    /// or freshly resolved artifact, always for the same implementation.
    /// Failures are returned to the caller, never swallowed.
    pub fn load_component(&self) -> ComponentFuture {
        (self.loader)()
    }
}

impl Clone for GameDescriptor {
    fn clone(&self) -> Self {
        Self {
            info: self.info.clone(),
            loader: Arc::clone(&self.loader),
        }
    }
}

impl fmt::Debug for GameDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameDescriptor")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::test_helpers::StubComponent;

    #[test]
    fn component_id_serializes_as_plain_string() {
        let id = ComponentId::new("Minesweeper");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"Minesweeper\"");

        let back: ComponentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn game_info_round_trips_without_extra() {
        let info = GameInfo::new("扫雷", "Minesweeper", "一个简单的扫雷游戏。");
        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("extra"), "empty extra should be skipped");

        let back: GameInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }

    #[tokio::test]
    async fn descriptor_loader_is_invoked_on_demand() {
        let info = GameInfo::new("扫雷", "Minesweeper", "desc");
        let descriptor = GameDescriptor::with_loader(info, || {
            Box::pin(async { Ok(StubComponent::shared("Minesweeper")) })
        });

        let artifact = descriptor.load_component().await.unwrap();
        assert_eq!(artifact.component_id().as_str(), "Minesweeper");
    }

    #[tokio::test]
    async fn descriptor_loader_surfaces_failure() {
        let info = GameInfo::new("broken", "Broken", "desc");
        let descriptor = GameDescriptor::with_loader(info, || {
            Box::pin(async { Err(LoadError::Missing(ComponentId::new("Broken"))) })
        });

        let err = descriptor.load_component().await.err().unwrap();
        assert!(matches!(err, LoadError::Missing(id) if id.as_str() == "Broken"));
    }
}
