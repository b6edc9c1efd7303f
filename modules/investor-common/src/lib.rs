pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, KeySelection};
pub use error::{InvestorError, Result};
pub use types::*;
