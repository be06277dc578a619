//! TCP relay server implementation.

mod admin;
mod error;
mod handler;
mod server;
mod signal;
pub mod state;

pub use admin::AdminInputFeeder;
pub use error::ServerError;
pub use server::Server;
pub use signal::shutdown_signal;
