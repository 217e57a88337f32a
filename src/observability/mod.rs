//! Observability for tfsframe
//!
//! - Structured logging (JSON lines on stderr)
//! - Scope-based begin/complete events for codec operations
//!
//! Observability is read-only: it never changes the outcome of the
//! operation being observed.
//!
//! ```ignore
//! use tfsframe::observability::{Logger, ObservationScope, Severity};
//!
//! Logger::set_min_severity(Severity::Warn);
//! Logger::warn("TFS_ROWS_RAGGED", &[("rows", "2")]);
//!
//! let scope = ObservationScope::new("TFS_SERIALIZE");
//! // ... do work ...
//! scope.complete();
//! ```

mod logger;
mod scope;

pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};
