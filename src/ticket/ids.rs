//! Ticket id generation, behind a trait so tests can supply fixed ids.

#[cfg(any(test, feature = "test-mocks"))]
use mockall::automock;

use super::models::TicketId;

/// Source of fresh ticket ids
#[cfg_attr(any(test, feature = "test-mocks"), automock)]
pub trait TicketIdGenerator {
    /// Produce an id not handed out before by this generator
    fn next_id(&self) -> TicketId;
}

/// Random UUID v4 ids
pub struct UuidTicketIds;

impl TicketIdGenerator for UuidTicketIds {
    fn next_id(&self) -> TicketId {
        TicketId::new(uuid::Uuid::new_v4().simple().to_string())
    }
}

/// Monotonic ids (`t1`, `t2`, ...), useful where ids must be predictable
#[derive(Debug, Default)]
pub struct SequentialTicketIds {
    counter: std::cell::Cell<u64>,
}

impl SequentialTicketIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TicketIdGenerator for SequentialTicketIds {
    fn next_id(&self) -> TicketId {
        let n = self.counter.get() + 1;
        self.counter.set(n);
        TicketId::new(format!("t{}", n))
    }
}
