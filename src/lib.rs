pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod registry;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::descriptor::{ComponentId, GameComponent, GameDescriptor, GameInfo};
    use crate::error::LoadError;
    use crate::loader::{ComponentFuture, ComponentResolver};
    use crate::registry::GameRegistry;

    /// Minimal loaded-artifact stand-in carrying only its component id.
    pub struct StubComponent {
        component: ComponentId,
    }

    impl StubComponent {
        pub fn new(component: impl Into<ComponentId>) -> Self {
            Self {
                component: component.into(),
            }
        }

        pub fn shared(component: impl Into<ComponentId>) -> Arc<dyn GameComponent> {
            Arc::new(Self::new(component))
        }
    }

    impl GameComponent for StubComponent {
        fn component_id(&self) -> &ComponentId {
            &self.component
        }
    }

    /// Resolver yielding stub artifacts for any id, with per-id failure
    /// injection and a resolution counter for laziness/caching assertions.
    #[derive(Default)]
    pub struct StubResolver {
        fail_always: HashSet<ComponentId>,
        fail_once: Mutex<HashSet<ComponentId>>,
        resolutions: AtomicUsize,
    }

    impl StubResolver {
        pub fn new() -> Self {
            Self::default()
        }

        /// Every resolution of `component` fails with `LoadError::Missing`.
        pub fn fail_on(mut self, component: &str) -> Self {
            self.fail_always.insert(ComponentId::new(component));
            self
        }

        /// Only the first resolution of `component` fails.
        pub fn fail_once_on(self, component: &str) -> Self {
            self.fail_once
                .lock()
                .unwrap()
                .insert(ComponentId::new(component));
            self
        }

        /// How many times the resolver has been invoked.
        pub fn resolutions(&self) -> usize {
            self.resolutions.load(Ordering::Relaxed)
        }
    }

    impl ComponentResolver for StubResolver {
        fn resolve(&self, component: &ComponentId) -> ComponentFuture {
            self.resolutions.fetch_add(1, Ordering::Relaxed);
            let fail = self.fail_always.contains(component)
                || self.fail_once.lock().unwrap().remove(component);
            let component = component.clone();
            Box::pin(async move {
                if fail {
                    Err(LoadError::Missing(component))
                } else {
                    Ok(StubComponent::shared(component))
                }
            })
        }
    }

    /// One descriptor backed by a stub artifact of the same component id.
    pub fn stub_descriptor(name: &str, component: &str, description: &str) -> GameDescriptor {
        let id = ComponentId::new(component);
        GameDescriptor::with_loader(GameInfo::new(name, id.clone(), description), move || {
            let id = id.clone();
            Box::pin(async move { Ok(StubComponent::shared(id)) })
        })
    }

    /// `n` descriptors named `game0..` with components `Game0..`, in order.
    pub fn make_descriptors(n: usize) -> Vec<GameDescriptor> {
        (0..n)
            .map(|i| {
                stub_descriptor(
                    &format!("game{i}"),
                    &format!("Game{i}"),
                    &format!("test game {i}"),
                )
            })
            .collect()
    }

    /// A registry of `n` stub descriptors.
    pub fn stub_registry(n: usize) -> GameRegistry {
        GameRegistry::new(make_descriptors(n)).expect("stub descriptors have unique ids")
    }
}
