//! Authentication
//!
//! JWT + Argon2 authentication. The rest of the system consumes this as a
//! capability that yields an authenticated principal ([`CurrentUser`])
//! with an id and role.

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
