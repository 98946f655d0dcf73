pub mod auth;
pub mod request_id;

pub use auth::{AuthResult, AuthVerifier, BearerAuth, HmacTokenVerifier};
pub use request_id::RequestId;
