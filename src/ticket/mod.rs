mod ids;
mod models;

pub use ids::{SequentialTicketIds, TicketIdGenerator, UuidTicketIds};
pub use models::{LockState, Ticket, TicketColor, TicketId};

#[cfg(any(test, feature = "test-mocks"))]
pub use ids::MockTicketIdGenerator;
