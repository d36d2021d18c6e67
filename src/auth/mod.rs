//! Authentication: bearer tokens, password hashing and the request principal

pub mod details;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;

pub use details::UserDetailsService;
pub use jwt::{Claims, JwtService, TokenRejection};
pub use middleware::{authenticate, bearer_token, require_auth};
pub use models::{JwtResponse, LoginRequest, MessageResponse, SignupRequest, UserPrincipal};
pub use password::PasswordEncoder;
