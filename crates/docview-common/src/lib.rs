pub mod errors;
pub mod notifications;
pub mod types;

pub use errors::{ConfigError, DocviewError};
pub use notifications::{Notification, NotificationAction, NotificationLevel, NotificationQueue};
pub use types::Color;

pub type Result<T> = std::result::Result<T, DocviewError>;
