//! Statuskit: Structured Status Reporting
//!
//! A `Status` carries a code, a severity level, a message, string payload
//! annotations and captured call-site frames. A `DictStatus` combines named
//! child statuses into one status through a pluggable combiner, and is used
//! through the same `Status` trait as a leaf.
//!
//! Statuses are plain in-memory values with no internal synchronization.

pub mod code;
pub mod config;
pub mod dict;
pub mod error;
pub mod frame;
pub mod level;
pub mod logging;
pub mod status;

pub use code::StatusCode;
pub use dict::{Children, Combined, DefaultCombiner, DictCombiner, DictStatus};
pub use error::StatusError;
pub use frame::Frame;
pub use level::Level;
pub use status::{debug, error, fatal, info, new_ok, warn, LeafStatus, Status};
