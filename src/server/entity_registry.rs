//! Resource descriptors and the registry that merges their routes

use axum::Router;

/// A resource that contributes its own routes to the application
pub trait EntityDescriptor: Send + Sync {
    /// Collection path segment, e.g. `companies`
    fn plural(&self) -> &str;

    /// Routes under `/{plural}`, with state already applied
    fn build_routes(&self) -> Router;
}

/// Ordered set of resource descriptors
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: Vec<Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        self.descriptors.push(descriptor);
    }

    /// Merge every descriptor's router into one
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .iter()
            .fold(Router::new(), |router, d| router.merge(d.build_routes()))
    }

    pub fn plurals(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.plural()).collect()
    }
}
