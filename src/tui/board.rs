use tracing::{debug, info};

use crate::error::BoardError;
use crate::ticket::{LockState, Ticket, TicketColor, TicketId, TicketIdGenerator, UuidTicketIds};

use super::input::TextInput;

/// Visibility of the add modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open)
    }
}

/// A priority-color selector in the add modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub color: TicketColor,
    pub active: bool,
}

/// Owns all board state: modal flag, swatches, selected color, tickets and
/// the modal's text input. Every handler goes through this instance, so two
/// boards never share anything.
pub struct BoardController {
    modal: ModalState,
    selected_color: TicketColor,
    swatches: Vec<Swatch>,
    tickets: Vec<Ticket>,
    input: TextInput,
    filter: Option<TicketColor>,
    selected_row: usize,
    ids: Box<dyn TicketIdGenerator>,
}

impl BoardController {
    pub fn new() -> Self {
        Self::with_ids(TicketColor::default(), Box::new(UuidTicketIds))
    }

    /// Board with a given initial swatch and id source
    pub fn with_ids(default_color: TicketColor, ids: Box<dyn TicketIdGenerator>) -> Self {
        let swatches = TicketColor::swatches()
            .iter()
            .map(|&color| Swatch {
                color,
                active: color == default_color,
            })
            .collect();
        Self {
            modal: ModalState::Closed,
            selected_color: default_color,
            swatches,
            tickets: vec![],
            input: TextInput::new(),
            filter: None,
            selected_row: 0,
            ids,
        }
    }

    pub fn modal(&self) -> ModalState {
        self.modal
    }

    pub fn selected_color(&self) -> TicketColor {
        self.selected_color
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// All tickets in creation order, ignoring the filter
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn ticket(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| &t.id == id)
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    /// Flip the add modal open/closed
    pub fn toggle_modal(&mut self) -> ModalState {
        self.modal = match self.modal {
            ModalState::Closed => ModalState::Open,
            ModalState::Open => ModalState::Closed,
        };
        debug!(modal = ?self.modal, "toggled add modal");
        self.modal
    }

    /// Make `color` the only active swatch and the color of the next ticket
    pub fn select_color(&mut self, color: TicketColor) {
        for swatch in &mut self.swatches {
            swatch.active = swatch.color == color;
        }
        self.selected_color = color;
        debug!(%color, "selected ticket color");
    }

    /// Select the next swatch to the right, wrapping around
    pub fn select_next_color(&mut self) {
        let colors = TicketColor::swatches();
        let next = (self.selected_color.index() + 1) % colors.len();
        self.select_color(colors[next]);
    }

    /// Select the next swatch to the left, wrapping around
    pub fn select_prev_color(&mut self) {
        let colors = TicketColor::swatches();
        let prev = (self.selected_color.index() + colors.len() - 1) % colors.len();
        self.select_color(colors[prev]);
    }

    /// Create a locked ticket with the selected color and `text` verbatim,
    /// then close the modal and clear its input. Requires the modal open.
    pub fn submit_ticket(&mut self, text: &str) -> Result<TicketId, BoardError> {
        if !self.modal.is_open() {
            return Err(BoardError::ModalClosed);
        }

        let ticket = Ticket::new(self.ids.next_id(), self.selected_color, text);
        let id = ticket.id.clone();
        info!(id = %id, color = %ticket.color(), "created ticket");
        self.tickets.push(ticket);

        self.modal = ModalState::Closed;
        self.input.clear();
        self.clamp_row();
        Ok(id)
    }

    /// Submit whatever is in the modal's text input
    pub fn submit_input(&mut self) -> Result<TicketId, BoardError> {
        let text = self.input.as_str().to_string();
        self.submit_ticket(&text)
    }

    /// Flip a ticket between locked and unlocked
    pub fn toggle_lock(&mut self, id: &TicketId) -> Result<LockState, BoardError> {
        let ticket = self.ticket_mut(id)?;
        let lock = ticket.toggle_lock();
        info!(id = %id, lock = lock.as_str(), "toggled ticket lock");
        Ok(lock)
    }

    /// Replace the content of an unlocked ticket
    pub fn edit_content(&mut self, id: &TicketId, text: &str) -> Result<(), BoardError> {
        self.ticket_mut(id)?.set_content(text)?;
        debug!(id = %id, "edited ticket content");
        Ok(())
    }

    /// Take a ticket off the board
    pub fn remove_ticket(&mut self, id: &TicketId) -> Result<Ticket, BoardError> {
        let idx = self
            .tickets
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| BoardError::TicketNotFound(id.clone()))?;
        let ticket = self.tickets.remove(idx);
        info!(id = %id, "removed ticket");
        self.clamp_row();
        Ok(ticket)
    }

    pub fn filter(&self) -> Option<TicketColor> {
        self.filter
    }

    /// Show only tickets of one color, or all with `None`
    pub fn set_filter(&mut self, filter: Option<TicketColor>) {
        self.filter = filter;
        self.selected_row = 0;
        debug!(filter = ?filter, "changed color filter");
    }

    /// All -> each color in swatch order -> all
    pub fn cycle_filter(&mut self) {
        let colors = TicketColor::swatches();
        let next = match self.filter {
            None => colors.first().copied(),
            Some(current) => colors.get(current.index() + 1).copied(),
        };
        self.set_filter(next);
    }

    /// Tickets that pass the filter, in creation order
    pub fn visible_tickets(&self) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| self.filter.map_or(true, |c| t.color() == c))
            .collect()
    }

    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    /// Currently highlighted ticket among the visible ones
    pub fn selected_ticket(&self) -> Option<&Ticket> {
        self.visible_tickets().get(self.selected_row).copied()
    }

    pub fn select_next(&mut self) {
        let count = self.visible_tickets().len();
        if self.selected_row + 1 < count {
            self.selected_row += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    /// Move one grid row down (`per_row` cards per row)
    pub fn select_down(&mut self, per_row: usize) {
        let count = self.visible_tickets().len();
        let target = self.selected_row + per_row.max(1);
        if target < count {
            self.selected_row = target;
        }
    }

    /// Move one grid row up (`per_row` cards per row)
    pub fn select_up(&mut self, per_row: usize) {
        if self.selected_row >= per_row.max(1) {
            self.selected_row -= per_row.max(1);
        }
    }

    fn ticket_mut(&mut self, id: &TicketId) -> Result<&mut Ticket, BoardError> {
        self.tickets
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| BoardError::TicketNotFound(id.clone()))
    }

    /// Ensure selected_row is valid for the visible tickets
    fn clamp_row(&mut self) {
        let count = self.visible_tickets().len();
        if count == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= count {
            self.selected_row = count - 1;
        }
    }
}

impl Default for BoardController {
    fn default() -> Self {
        Self::new()
    }
}
