pub mod auth;
pub mod export;
pub mod status;

pub use auth::{login, logout, status as auth_status};
pub use export::run as export;
pub use status::run as gateway_status;
