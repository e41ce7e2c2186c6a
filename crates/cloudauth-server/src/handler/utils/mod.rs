//! Router composition helpers.

mod custom_routes;

pub use custom_routes::CustomRoutes;
