//! Dict Status
//!
//! A `DictStatus` aggregates named child statuses into one status. Children
//! are added while the dict is open. The first read runs the combiner once and
//! caches the resulting base; from then on the dict is closed and reads
//! delegate to the base.

use crate::code::StatusCode;
use crate::error::StatusError;
use crate::frame::Frame;
use crate::level::Level;
use crate::status::{info, Status};
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// Children of a dict status, keyed by name.
pub type Children = BTreeMap<String, Box<dyn Status>>;

/// Result of combining children into a base status.
#[derive(Debug)]
pub enum Combined {
    /// Use the named child as the base. The child stays in the children map,
    /// so writes to the base are visible through that child.
    Child(String),
    /// Use a status the combiner built.
    Status(Box<dyn Status>),
}

/// Policy that reduces children to a single base status.
pub trait DictCombiner {
    fn combine(&self, children: &Children) -> Combined;
}

impl<F> DictCombiner for F
where
    F: Fn(&Children) -> Combined,
{
    fn combine(&self, children: &Children) -> Combined {
        self(children)
    }
}

/// First non-OK child wins; all-OK (or no children) yields an empty Info/Ok.
///
/// Children are visited in key order, so among several failing children the
/// one with the smallest key is chosen.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCombiner;

impl DictCombiner for DefaultCombiner {
    fn combine(&self, children: &Children) -> Combined {
        children
            .iter()
            .find(|(_, child)| !child.is_ok())
            .map(|(key, _)| Combined::Child(key.clone()))
            .unwrap_or_else(|| Combined::Status(Box::new(info(StatusCode::Ok, ""))))
    }
}

pub struct DictStatus {
    children: Children,
    base: OnceCell<Combined>,
    combiner: Box<dyn DictCombiner>,
}

impl Default for DictStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictStatus")
            .field("children", &self.children)
            .field("base", &self.base.get())
            .finish_non_exhaustive()
    }
}

impl DictStatus {
    pub fn new() -> Self {
        Self::with_combiner(DefaultCombiner)
    }

    pub fn with_combiner(combiner: impl DictCombiner + 'static) -> Self {
        DictStatus {
            children: Children::new(),
            base: OnceCell::new(),
            combiner: Box::new(combiner),
        }
    }

    /// Replace the combination policy. Has no effect once combined.
    pub fn set_combiner(&mut self, combiner: impl DictCombiner + 'static) -> &mut Self {
        if self.is_combined() {
            warn!("Combiner replaced after dict status was combined; it will not run");
        }
        self.combiner = Box::new(combiner);
        self
    }

    /// Register `status` under `key`, replacing any previous child.
    ///
    /// # Panics
    ///
    /// Panics if the dict has already been combined.
    pub fn add_child(
        &mut self,
        key: impl Into<String>,
        status: impl Status + 'static,
    ) -> &mut Self {
        match self.try_add_child(key, status) {
            Ok(this) => this,
            Err(e) => panic!("{}", e),
        }
    }

    /// Like [`add_child`](Self::add_child), returning an error instead of panicking.
    pub fn try_add_child(
        &mut self,
        key: impl Into<String>,
        status: impl Status + 'static,
    ) -> Result<&mut Self, StatusError> {
        let key = key.into();
        if self.is_combined() {
            return Err(StatusError::AlreadyCombined(key));
        }
        self.children.insert(key, Box::new(status));
        Ok(self)
    }

    pub fn is_combined(&self) -> bool {
        self.base.get().is_some()
    }

    pub fn child(&self, key: &str) -> Option<&dyn Status> {
        self.children.get(key).map(|child| child.as_ref() as &dyn Status)
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &dyn Status)> + '_ {
        self.children
            .iter()
            .map(|(key, child)| (key.as_str(), child.as_ref() as &dyn Status))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn ensure_combined(&self) -> &Combined {
        self.base.get_or_init(|| {
            let combined = self.combiner.combine(&self.children);
            match &combined {
                Combined::Child(key) => {
                    if !self.children.contains_key(key) {
                        panic!("combiner selected unknown child {:?}", key);
                    }
                    debug!(children = self.children.len(), base = %key, "Combined dict status");
                }
                Combined::Status(status) => {
                    debug!(
                        children = self.children.len(),
                        code = %status.code(),
                        "Combined dict status into synthesized base"
                    );
                }
            }
            combined
        })
    }

    fn base(&self) -> &dyn Status {
        match self.ensure_combined() {
            Combined::Child(key) => self.children[key].as_ref(),
            Combined::Status(status) => status.as_ref(),
        }
    }

    fn base_mut(&mut self) -> &mut dyn Status {
        self.ensure_combined();
        match self.base.get_mut() {
            Some(Combined::Status(status)) => status.as_mut(),
            Some(Combined::Child(key)) => match self.children.get_mut(key.as_str()) {
                Some(child) => child.as_mut(),
                None => unreachable!("combined child {:?} is always present", key),
            },
            None => unreachable!("dict status is combined"),
        }
    }
}

impl Status for DictStatus {
    fn code(&self) -> StatusCode {
        self.base().code()
    }

    fn level(&self) -> Level {
        self.base().level()
    }

    fn message(&self) -> &str {
        self.base().message()
    }

    fn frames(&self) -> &[Frame] {
        self.base().frames()
    }

    fn payload(&self, key: &str) -> &str {
        self.base().payload(key)
    }

    /// Walks the base, then every child. A visitor returning false stops only
    /// the status currently being walked.
    fn walk_payload(&self, visitor: &mut dyn FnMut(&str, &str) -> bool) {
        self.base().walk_payload(visitor);
        for child in self.children.values() {
            child.walk_payload(visitor);
        }
    }

    /// Sets the payload on the base only.
    fn set_payload(&mut self, key: &str, value: &str) -> &mut dyn Status {
        self.base_mut().set_payload(key, value);
        self
    }

    /// Captures on the base and on every child.
    #[track_caller]
    fn capture(&mut self) -> &mut dyn Status {
        self.base_mut().capture();
        for child in self.children.values_mut() {
            child.capture();
        }
        self
    }
}
