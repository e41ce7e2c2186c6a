//! Custom routes for extending the API router.

use axum::Router;

use crate::service::ServiceState;

/// Extra routes merged into the main API router.
///
/// Private routes sit behind the same bearer authentication gate as
/// `/protected`; public routes are reachable without a token.
///
/// # Examples
///
/// ```rust,ignore
/// use cloudauth_server::handler::CustomRoutes;
///
/// let custom = CustomRoutes::new()
///     .with_private_routes(private_router)
///     .with_public_routes(public_router);
/// ```
#[derive(Default, Clone)]
pub struct CustomRoutes {
    /// Custom private routes that require authentication.
    pub private_routes: Option<Router<ServiceState>>,
    /// Custom public routes that don't require authentication.
    pub public_routes: Option<Router<ServiceState>>,
}

impl CustomRoutes {
    /// Creates a new empty `CustomRoutes` instance.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the private routes.
    pub fn with_private_routes(mut self, routes: Router<ServiceState>) -> Self {
        self.private_routes = Some(routes);
        self
    }

    /// Sets the public routes.
    pub fn with_public_routes(mut self, routes: Router<ServiceState>) -> Self {
        self.public_routes = Some(routes);
        self
    }
}
