//! Error handling for MirageKit.
//! One error enum per subsystem, aggregated by [`MiragekitError`].

pub mod config_error;
pub mod integrity_error;
pub mod load_error;
pub mod miragekit_error;

pub use config_error::ConfigError;
pub use integrity_error::IntegrityError;
pub use load_error::LoadError;
pub use miragekit_error::{MiragekitError, MiragekitResult};
