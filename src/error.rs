use crate::descriptor::ComponentId;

/// Errors surfaced by catalog construction and lookup.
#[derive(Debug)]
pub enum RegistryError {
    /// Lookup requested a component id not present in the registry.
    UnknownComponent(ComponentId),
    /// Two descriptors declared the same component id.
    DuplicateComponent(ComponentId),
    /// A descriptor is missing a required field (empty name or component id).
    InvalidDescriptor(String),
    /// A manifest file could not be read or parsed.
    Manifest(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownComponent(id) => write!(f, "unknown component: {id}"),
            Self::DuplicateComponent(id) => write!(f, "duplicate component: {id}"),
            Self::InvalidDescriptor(reason) => write!(f, "invalid descriptor: {reason}"),
            Self::Manifest(reason) => write!(f, "manifest error: {reason}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Errors surfaced by a descriptor's deferred loader.
///
/// A load failure is never fatal to the catalog: other entries remain
/// enumerable and loadable. Retry policy belongs to the host.
#[derive(Debug, Clone)]
pub enum LoadError {
    /// No implementation artifact exists for the component id.
    Missing(ComponentId),
    /// The artifact was located but failed to initialize.
    Init {
        component: ComponentId,
        reason: String,
    },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(id) => write!(f, "component not found: {id}"),
            Self::Init { component, reason } => {
                write!(f, "component {component} failed to initialize: {reason}")
            },
        }
    }
}

impl std::error::Error for LoadError {}
