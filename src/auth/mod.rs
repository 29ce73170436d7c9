// Authentication module
// Registration, login, refresh and profile lookup for every account role

pub mod error;
pub mod handlers;
pub mod memory;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod roles;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{login_handler, me_handler, refresh_handler, register_handler};
pub use memory::{MemoryAccountStore, MemoryRefreshTokenStore};
pub use middleware::{require_auth, AuthenticatedSubject};
pub use models::{Account, Role};
pub use password::CredentialHasher;
pub use repository::{AccountStore, PgAccountStore, PgRefreshTokenStore, RefreshTokenStore};
pub use roles::{AccountKind, CoachAccount, CustomerAccount, ExecutorAccount, UserAccount};
pub use service::{AccountService, Clock, SystemClock};
pub use token::TokenService;
