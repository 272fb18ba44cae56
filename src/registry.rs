use std::collections::HashMap;
use std::sync::Arc;

use crate::descriptor::{ComponentId, GameComponent, GameDescriptor};
use crate::error::{LoadError, RegistryError};

/// Ordered, immutable catalog of game descriptors.
///
/// Declaration order is display order and never changes after construction.
/// Component ids are unique within a registry; duplicates are rejected when
/// the registry is built rather than left as a documented invariant.
pub struct GameRegistry {
    games: Vec<GameDescriptor>,
    index: HashMap<ComponentId, usize>,
}

impl GameRegistry {
    /// Build a registry from descriptors, preserving their order.
    pub fn new(games: Vec<GameDescriptor>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(games.len());
        for (i, game) in games.iter().enumerate() {
            if index.insert(game.component().clone(), i).is_some() {
                return Err(RegistryError::DuplicateComponent(game.component().clone()));
            }
        }
        tracing::info!(games = games.len(), "Game catalog constructed");
        Ok(Self { games, index })
    }

    /// All descriptors in display order.
    pub fn games(&self) -> &[GameDescriptor] {
        &self.games
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameDescriptor> {
        self.games.iter()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn contains(&self, component: &ComponentId) -> bool {
        self.index.contains_key(component)
    }

    /// Look up a descriptor by component id. An id not present in the
    /// registry is reported as unknown; no default is fabricated.
    pub fn get(&self, component: &ComponentId) -> Result<&GameDescriptor, RegistryError> {
        self.index
            .get(component)
            .map(|&i| &self.games[i])
            .ok_or_else(|| RegistryError::UnknownComponent(component.clone()))
    }

    /// Look up a descriptor by id and load its implementation in one step.
    ///
    /// Hosts driving selection by id (deep links, "last played" restores)
    /// get a single error channel: an unknown id surfaces as
    /// [`LoadError::Missing`], the same way a resolver miss does.
    pub async fn load(
        &self,
        component: &ComponentId,
    ) -> Result<Arc<dyn GameComponent>, LoadError> {
        let game = self
            .get(component)
            .map_err(|_| LoadError::Missing(component.clone()))?;
        match game.load_component().await {
            Ok(artifact) => {
                tracing::debug!(component = %component, "Game component loaded");
                Ok(artifact)
            },
            Err(e) => {
                tracing::warn!(component = %component, error = %e, "Game component failed to load");
                Err(e)
            },
        }
    }
}

impl<'a> IntoIterator for &'a GameRegistry {
    type Item = &'a GameDescriptor;
    type IntoIter = std::slice::Iter<'a, GameDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.games.iter()
    }
}

impl std::fmt::Debug for GameRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameRegistry")
            .field("games", &self.games)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{make_descriptors, stub_descriptor, stub_registry};

    #[test]
    fn declared_order_is_preserved() {
        let registry = GameRegistry::new(make_descriptors(4)).unwrap();
        let components: Vec<&str> = registry
            .games()
            .iter()
            .map(|g| g.component().as_str())
            .collect();
        assert_eq!(components, ["Game0", "Game1", "Game2", "Game3"]);
    }

    #[test]
    fn enumeration_is_stable_across_calls() {
        let registry = stub_registry(3);
        let first: Vec<String> = registry.games().iter().map(|g| g.name().into()).collect();
        let second: Vec<String> = registry.games().iter().map(|g| g.name().into()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn duplicate_component_rejected_at_construction() {
        let mut games = make_descriptors(2);
        games.push(stub_descriptor("again", "Game1", "duplicate id"));

        let err = GameRegistry::new(games).unwrap_err();
        assert!(
            matches!(err, RegistryError::DuplicateComponent(id) if id.as_str() == "Game1")
        );
    }

    #[test]
    fn unknown_component_lookup_is_explicit() {
        let registry = GameRegistry::new(make_descriptors(3)).unwrap();
        let err = registry.get(&ComponentId::new("NoSuchGame")).unwrap_err();
        assert!(
            matches!(err, RegistryError::UnknownComponent(id) if id.as_str() == "NoSuchGame")
        );
    }

    #[tokio::test]
    async fn load_by_id_resolves_descriptor() {
        let registry = GameRegistry::new(make_descriptors(3)).unwrap();
        let artifact = registry.load(&ComponentId::new("Game2")).await.unwrap();
        assert_eq!(artifact.component_id().as_str(), "Game2");
    }

    #[tokio::test]
    async fn load_unknown_id_surfaces_missing() {
        let registry = GameRegistry::new(make_descriptors(1)).unwrap();
        let err = registry.load(&ComponentId::new("NoSuchGame")).await.err().unwrap();
        assert!(matches!(err, LoadError::Missing(id) if id.as_str() == "NoSuchGame"));
    }

    #[test]
    fn empty_registry_is_valid() {
        let registry = GameRegistry::new(Vec::new()).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
