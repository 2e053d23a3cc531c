//! Call-site Frames
//!
//! A frame records where a status was captured. Frames are appended in call
//! order (oldest first) and never removed.

use std::fmt;
use std::panic::Location;

/// Captured call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Program counter. Location capture does not expose one, so this is 0
    /// unless the caller supplies it through [`Frame::with_pc`].
    pub pc: usize,
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
    /// False when the location could not be resolved.
    pub ok: bool,
}

impl Frame {
    /// Frame for the caller of the outermost `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &Location<'static>) -> Self {
        Frame {
            pc: 0,
            file: location.file(),
            line: location.line(),
            column: location.column(),
            ok: true,
        }
    }

    pub fn unresolved() -> Self {
        Frame {
            pc: 0,
            file: "",
            line: 0,
            column: 0,
            ok: false,
        }
    }

    pub fn with_pc(mut self, pc: usize) -> Self {
        self.pc = pc;
        self
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ok {
            write!(f, "{}:{}:{}", self.file, self.line, self.column)
        } else {
            f.write_str("<unknown>")
        }
    }
}
