//! Robosprite External Tools
//!
//! Every frame is drawn by an external program (Inkscape, POV-Ray,
//! ImageMagick). This crate wraps those programs behind a small, testable
//! interface:
//!
//! - [`ToolSpec`] describes a tool and how to find it
//! - [`locate`] resolves a tool to an executable path
//! - [`Invocation`] is one fully specified command line
//! - [`CommandRunner`] runs an invocation and captures its exit status;
//!   [`SystemRunner`] is the real implementation, tests substitute fakes
//!
//! Invocations are synchronous. A run waits for each tool to exit, bounded by
//! an optional timeout, before moving on.

pub mod error;
pub mod invocation;
pub mod locate;
pub mod runner;

pub use error::{ToolError, ToolResult};
pub use invocation::Invocation;
pub use locate::{locate, probe_version, ToolSpec};
pub use runner::{CommandRunner, SystemRunner, ToolOutput, DEFAULT_TIMEOUT_SECS};
