//! Telegram front-end
//!
//! ```text
//! telegram/
//! ├── mod.rs           # This file - public API
//! ├── context.rs       # AppContext shared by handlers
//! ├── bot.rs           # teloxide dispatcher, send/edit plumbing
//! ├── keyboards.rs     # Inline keyboards
//! ├── formatters.rs    # HTML message formatters
//! └── commands/        # Command handlers (return Reply values)
//!     ├── mod.rs       # Command enum and router
//!     ├── stats.rs     # Collection metrics
//!     ├── menu.rs      # Menus, search, premium, info
//!     └── callbacks.rs # Button click routing
//! ```

pub mod bot;
pub mod commands;
pub mod context;
pub mod formatters;
pub mod keyboards;

pub use bot::run_dispatcher;
pub use commands::{Command, Reply};
pub use context::AppContext;
pub use formatters::{html_escape, MetricKind};
