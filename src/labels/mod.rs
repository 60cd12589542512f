pub mod service;

use crate::db::Thread;

pub use service::{LabelConnection, LabelService};

/// Reference to something labels can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelableId {
    Thread(i64),
}

/// A resolved labelable entity
#[derive(Debug, Clone, PartialEq)]
pub enum Labelable {
    Thread(Thread),
}

impl Labelable {
    pub fn id(&self) -> LabelableId {
        match self {
            Labelable::Thread(thread) => LabelableId::Thread(thread.id),
        }
    }
}
