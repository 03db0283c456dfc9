pub mod cli;
pub mod config;
pub mod export;
pub mod models;
pub mod storage;
pub mod store;
pub mod streak;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use models::{Activity, Streak};
pub use storage::Storage;
pub use store::ActivityStore;
pub use utils::Profile;
