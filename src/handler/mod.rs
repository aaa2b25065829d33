//! Request handling.
//!
//! Provides:
//! - Bounded Fibonacci computation
//! - JSON payload syntax validation
//! - Method routing into a single response
//! - API gateway proxy event conversion

pub mod event;
pub mod fibonacci;
pub mod payload;
pub mod request;
pub mod router;

pub use event::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
pub use fibonacci::fibonacci;
pub use payload::validate;
pub use request::{Request, Response};
pub use router::RequestRouter;
