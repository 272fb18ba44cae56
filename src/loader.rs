use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::Mutex;

use crate::descriptor::{ComponentId, GameComponent};
use crate::error::LoadError;

/// Future returned by a descriptor's deferred loader.
pub type ComponentFuture = BoxFuture<'static, Result<Arc<dyn GameComponent>, LoadError>>;

/// Zero-argument deferred producer for a game's implementation.
///
/// Each descriptor owns one; loaders are independent of each other, so the
/// host may run several concurrently.
pub type ComponentLoader = Arc<dyn Fn() -> ComponentFuture + Send + Sync>;

/// The module-resolution mechanism the catalog defers to.
///
/// Supplied by the host: given a component id, yield the implementation
/// artifact or an explicit [`LoadError`]. Implementations must clone whatever
/// they need into the returned future.
pub trait ComponentResolver: Send + Sync {
    fn resolve(&self, component: &ComponentId) -> ComponentFuture;
}

/// Build a descriptor loader that defers to `resolver` for `component`.
pub fn resolver_loader(
    resolver: &Arc<dyn ComponentResolver>,
    component: ComponentId,
) -> ComponentLoader {
    let resolver = Arc::clone(resolver);
    Arc::new(move || resolver.resolve(&component))
}

/// Memoizing wrapper around a [`ComponentResolver`].
///
/// Successful resolutions are cached per component id; failures are not, so
/// a later attempt can succeed. Two first loads of the same id racing each
/// other may both hit the inner resolver; both yield the same implementation
/// and the cache keeps one of them.
pub struct CachingResolver {
    inner: Arc<dyn ComponentResolver>,
    cache: Arc<Mutex<HashMap<ComponentId, Arc<dyn GameComponent>>>>,
}

impl CachingResolver {
    pub fn new(inner: Arc<dyn ComponentResolver>) -> Self {
        Self {
            inner,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl ComponentResolver for CachingResolver {
    fn resolve(&self, component: &ComponentId) -> ComponentFuture {
        let inner = Arc::clone(&self.inner);
        let cache = Arc::clone(&self.cache);
        let component = component.clone();
        Box::pin(async move {
            if let Some(hit) = cache.lock().await.get(&component) {
                tracing::debug!(component = %component, "Component served from cache");
                return Ok(Arc::clone(hit));
            }
            // The lock is released while the inner resolver runs, so loads
            // of other ids do not serialize on this fetch.
            let artifact = inner.resolve(&component).await?;
            cache
                .lock()
                .await
                .insert(component, Arc::clone(&artifact));
            Ok(artifact)
        })
    }
}
