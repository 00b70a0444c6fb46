//! Ultimate Top Ten Library
//!
//! This library implements a small web service that signs a user in to Spotify
//! through the OAuth 2.0 Authorization Code Flow, reads the user's all-time top
//! ten tracks and saves them into a freshly created playlist.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the login, redirect and playlist routes
//! - `config` - Configuration loaded from environment variables and `.env` files
//! - `error` - Typed errors and their HTTP rendering
//! - `management` - Token freshness handling and the playlist builder
//! - `server` - Router construction and the HTTP listener
//! - `session` - Signed cookie storage for the token record
//! - `spotify` - Spotify authorization and Web API clients
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use ultimate_top_ten::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> ultimate_top_ten::Res<()> {
//!     config::load_env();
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(config).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the outer edges of the application (startup, server loop) where
/// errors of different kinds meet. Request handling uses the typed
/// [`error::AppError`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used when a user-visible operation, such as creating a playlist, has
/// completed.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for startup failures such as missing configuration or an
/// address that cannot be bound. Request handlers must never call it.
///
/// # Example
///
/// ```
/// error!("Cannot load configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Request-level failures (rejected codes, missing sessions, Spotify errors)
/// are reported through this macro.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
