pub mod api;
pub mod tokens;

pub use api::GatewayClient;
pub use tokens::AccessToken;
