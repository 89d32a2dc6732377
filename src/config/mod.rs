//! Configuration module

mod site;

pub use site::BlogConfig;
pub use site::ConfigError;
pub use site::SyncConfig;
pub use site::ACCOUNT_ENV;
