// Searchbed Core - Domain Logic & Ports
// NO infrastructure dependencies (hexagonal layout)

pub mod domain;
pub mod error;
pub mod port;

pub use error::{FixtureError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
