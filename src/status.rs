//! Status
//!
//! The `Status` trait is the single contract callers depend on. Leaf statuses
//! and [`DictStatus`](crate::dict::DictStatus) both implement it, so code that
//! receives a `&dyn Status` never needs to know which one it holds.
//!
//! Code, level and message are fixed at construction. Payload entries and
//! captured frames accumulate through `set_payload` and `capture`.

use crate::code::StatusCode;
use crate::error::StatusError;
use crate::frame::Frame;
use crate::level::Level;
use std::collections::HashMap;
use std::fmt;

pub trait Status: fmt::Debug {
    fn code(&self) -> StatusCode;

    fn level(&self) -> Level;

    fn message(&self) -> &str;

    /// Captured frames, oldest first.
    fn frames(&self) -> &[Frame];

    /// Payload value for `key`, or `""` when absent. Use `walk_payload` to
    /// tell an absent key from an empty value.
    fn payload(&self, key: &str) -> &str;

    /// Visit payload entries in unspecified order until `visitor` returns false.
    fn walk_payload(&self, visitor: &mut dyn FnMut(&str, &str) -> bool);

    /// Insert or overwrite a payload entry.
    fn set_payload(&mut self, key: &str, value: &str) -> &mut dyn Status;

    /// Append one frame for the caller's location.
    #[track_caller]
    fn capture(&mut self) -> &mut dyn Status;

    fn is_ok(&self) -> bool {
        self.code() == StatusCode::Ok
    }

    fn to_result(&self) -> Result<(), StatusError> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(StatusError::Failed {
                code: self.code(),
                level: self.level(),
                message: self.message().to_string(),
            })
        }
    }
}

impl<S: Status + ?Sized> Status for Box<S> {
    fn code(&self) -> StatusCode {
        (**self).code()
    }

    fn level(&self) -> Level {
        (**self).level()
    }

    fn message(&self) -> &str {
        (**self).message()
    }

    fn frames(&self) -> &[Frame] {
        (**self).frames()
    }

    fn payload(&self, key: &str) -> &str {
        (**self).payload(key)
    }

    fn walk_payload(&self, visitor: &mut dyn FnMut(&str, &str) -> bool) {
        (**self).walk_payload(visitor)
    }

    fn set_payload(&mut self, key: &str, value: &str) -> &mut dyn Status {
        (**self).set_payload(key, value)
    }

    #[track_caller]
    fn capture(&mut self) -> &mut dyn Status {
        (**self).capture()
    }

    fn is_ok(&self) -> bool {
        (**self).is_ok()
    }
}

/// Directly constructed status with no children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafStatus {
    code: StatusCode,
    level: Level,
    message: String,
    payload: HashMap<String, String>,
    frames: Vec<Frame>,
}

impl Default for LeafStatus {
    fn default() -> Self {
        Self::new(Level::Info, StatusCode::Ok, "")
    }
}

impl LeafStatus {
    pub fn new(level: Level, code: StatusCode, message: impl Into<String>) -> Self {
        LeafStatus {
            code,
            level,
            message: message.into(),
            payload: HashMap::new(),
            frames: Vec::new(),
        }
    }

    pub fn with_payload(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Append a caller-supplied frame.
    pub fn push_frame(&mut self, frame: Frame) -> &mut Self {
        self.frames.push(frame);
        self
    }
}

impl Status for LeafStatus {
    fn code(&self) -> StatusCode {
        self.code
    }

    fn level(&self) -> Level {
        self.level
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn frames(&self) -> &[Frame] {
        &self.frames
    }

    fn payload(&self, key: &str) -> &str {
        self.payload.get(key).map(String::as_str).unwrap_or("")
    }

    fn walk_payload(&self, visitor: &mut dyn FnMut(&str, &str) -> bool) {
        for (key, value) in &self.payload {
            if !visitor(key, value) {
                break;
            }
        }
    }

    fn set_payload(&mut self, key: &str, value: &str) -> &mut dyn Status {
        self.payload.insert(key.to_string(), value.to_string());
        self
    }

    #[track_caller]
    fn capture(&mut self) -> &mut dyn Status {
        self.frames.push(Frame::caller());
        self
    }
}

pub fn debug(code: StatusCode, message: impl Into<String>) -> LeafStatus {
    LeafStatus::new(Level::Debug, code, message)
}

pub fn info(code: StatusCode, message: impl Into<String>) -> LeafStatus {
    LeafStatus::new(Level::Info, code, message)
}

pub fn warn(code: StatusCode, message: impl Into<String>) -> LeafStatus {
    LeafStatus::new(Level::Warn, code, message)
}

pub fn error(code: StatusCode, message: impl Into<String>) -> LeafStatus {
    LeafStatus::new(Level::Error, code, message)
}

pub fn fatal(code: StatusCode, message: impl Into<String>) -> LeafStatus {
    LeafStatus::new(Level::Fatal, code, message)
}

/// Info-level success carrying an optional note.
pub fn new_ok(message: impl Into<String>) -> LeafStatus {
    info(StatusCode::Ok, message)
}
