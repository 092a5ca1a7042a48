use thiserror::Error;

use crate::ticket::TicketId;

/// Rejections raised by board operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("cannot submit a ticket while the add modal is closed")]
    ModalClosed,

    #[error("ticket {0} not found")]
    TicketNotFound(TicketId),

    #[error("ticket {0} is locked")]
    TicketLocked(TicketId),
}
