//! Core switchboard library (event bus, views, navigation, tool dispatch, config).

pub mod bootstrap;
pub mod bus;
pub mod collaborators;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod registry;
pub mod shell;
pub mod shortcuts;

pub use bootstrap::shell_from_config;
pub use bus::{EventBus, SubscriptionId};
pub use config::Config;
pub use error::{InitStep, Result, ShellError};
pub use shell::{Shell, ShellCommand, SystemStatus};
pub use shortcuts::{KeyOutcome, ShortcutAction, ShortcutTable};
