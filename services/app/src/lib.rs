pub mod adapters;
pub mod config;
pub mod error;
pub mod ledger;
pub mod reference;
pub mod state;
pub mod telemetry;

pub use config::Config;
pub use error::AppError;
pub use state::App;
