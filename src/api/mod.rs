//! HTTP surface of the prediction service.
//!
//! Routes live under `/api/`. The router is composable: `api_router()`
//! returns a `Router` that can be mounted on any axum server instance,
//! and [`ApiServer`] owns the socket lifecycle around it.

pub mod error;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::{api_router, AppState};
pub use server::ApiServer;
