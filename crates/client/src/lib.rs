pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod prefs;

pub use api::{ApiClient, BoxFuture, CaseSource};
pub use cache::PointCache;
pub use config::ApiConfig;
pub use error::ApiError;
pub use prefs::PrefsStore;
