use std::sync::Arc;

use crate::metadata::{tables::MethodSemanticsRc, token::Token};

/// A reference to an `Event`
pub type EventRc = Arc<Event>;

/// An event record with its semantic linkages to accessor methods.
#[derive(Debug)]
pub struct Event {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// The event name
    pub name: String,
    /// Semantic linkages to this event's accessor methods
    pub semantics: Vec<MethodSemanticsRc>,
}
