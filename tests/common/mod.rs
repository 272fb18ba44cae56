use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use arcade_catalog::catalog;
use arcade_catalog::descriptor::{ComponentId, GameComponent};
use arcade_catalog::error::LoadError;
use arcade_catalog::loader::{ComponentFuture, ComponentResolver};

/// Host-side implementation artifact: the handle a menu would mount.
pub struct HostComponent {
    component: ComponentId,
}

impl GameComponent for HostComponent {
    fn component_id(&self) -> &ComponentId {
        &self.component
    }
}

/// Resolver backed by the host's component table. Known ids resolve to a
/// [`HostComponent`]; unknown ids are missing; ids marked broken locate an
/// artifact that fails to initialize.
pub struct HostResolver {
    known: HashSet<ComponentId>,
    broken: HashSet<ComponentId>,
    resolutions: AtomicUsize,
}

impl HostResolver {
    /// A resolver that knows every built-in game.
    pub fn with_builtin() -> Self {
        Self {
            known: catalog::builtin_infos()
                .into_iter()
                .map(|info| info.component)
                .collect(),
            broken: HashSet::new(),
            resolutions: AtomicUsize::new(0),
        }
    }

    /// Mark `component` as present but failing to initialize.
    pub fn breaking(mut self, component: &str) -> Self {
        self.broken.insert(ComponentId::new(component));
        self
    }

    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::Relaxed)
    }
}

impl ComponentResolver for HostResolver {
    fn resolve(&self, component: &ComponentId) -> ComponentFuture {
        self.resolutions.fetch_add(1, Ordering::Relaxed);
        let known = self.known.contains(component);
        let broken = self.broken.contains(component);
        let component = component.clone();
        Box::pin(async move {
            if broken {
                return Err(LoadError::Init {
                    component,
                    reason: "component bundle failed to evaluate".to_string(),
                });
            }
            if !known {
                return Err(LoadError::Missing(component));
            }
            let artifact: Arc<dyn GameComponent> = Arc::new(HostComponent { component });
            Ok(artifact)
        })
    }
}
