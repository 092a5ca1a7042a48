use anyhow::Result;
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use std::io::{self, Stdout};

use crate::config::GlobalConfig;
use crate::error::BoardError;
use crate::ticket::{TicketColor, TicketId, TicketIdGenerator, UuidTicketIds};

use super::board::BoardController;
use super::input::{apply_shift, is_submit_key, keyboard_enhancement_flags, InputMode, TextInput};
use super::view::{self, hex_to_color, BoardView};

type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Application state (separate from terminal for borrow checker)
pub(crate) struct AppState {
    should_quit: bool,
    board: BoardController,
    input_mode: InputMode,
    config: GlobalConfig,
    // Cards per grid row at the last draw, for up/down navigation
    cards_per_row: usize,
    // In-place edit of an unlocked ticket
    editing: Option<EditState>,
    // Confirmation popup for deleting a ticket
    delete_confirm_popup: Option<DeleteConfirmPopup>,
}

/// Draft content for the ticket being edited
#[derive(Debug, Clone)]
struct EditState {
    ticket_id: TicketId,
    draft: TextInput,
}

/// State for delete confirmation popup
#[derive(Debug, Clone)]
struct DeleteConfirmPopup {
    ticket_id: TicketId,
    ticket_label: String,
}

pub struct App {
    terminal: Terminal,
    state: AppState,
    keyboard_enhanced: bool,
}

impl App {
    pub fn new(config: GlobalConfig) -> Result<Self> {
        Self::with_ids(config, Box::new(UuidTicketIds))
    }

    pub fn with_ids(config: GlobalConfig, ids: Box<dyn TicketIdGenerator>) -> Result<Self> {
        // Setup terminal; undo raw mode if anything after it fails
        enable_raw_mode()?;
        let (terminal, keyboard_enhanced) = restore_on_error(
            Self::setup_terminal(&config),
            || restore_terminal(&mut io::stdout(), false),
        )?;

        Ok(Self {
            terminal,
            state: AppState::new(config, ids),
            keyboard_enhanced,
        })
    }

    fn setup_terminal(config: &GlobalConfig) -> Result<(Terminal, bool)> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        // Shift-based commit keys need the terminal to report modifiers
        let Some(flags) = keyboard_enhancement_flags(config.submit_key) else {
            return Ok((terminal, false));
        };
        if !crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false) {
            tracing::warn!(
                submit_key = config.submit_key.label(),
                "terminal lacks keyboard enhancement; commit key may never fire"
            );
            return Ok((terminal, false));
        }
        execute!(terminal.backend_mut(), PushKeyboardEnhancementFlags(flags))?;

        Ok((terminal, true))
    }

    pub async fn run(&mut self) -> Result<()> {
        tracing::info!("board started");
        while !self.state.should_quit {
            self.draw()?;

            if event::poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.state.handle_key(key);
                    }
                }
            }
        }
        tracing::info!(tickets = self.state.board.tickets().len(), "board closed");

        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        // Grid spans the full width
        self.state.cards_per_row = view::cards_per_row(size.width);

        let state = &self.state;
        self.terminal.draw(|frame| {
            let area = frame.area();
            Self::draw_board(state, frame, area);
        })?;

        Ok(())
    }

    fn draw_board(state: &AppState, frame: &mut Frame, area: Rect) {
        view::render_board(frame, area, &state.view(), &state.config.theme);

        // Delete confirmation popup
        if let Some(ref popup) = state.delete_confirm_popup {
            let popup_area = view::centered_rect_fixed(50, 9, area);
            frame.render_widget(Clear, popup_area);

            let main_block = Block::default()
                .title(" Delete Ticket? ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red));
            frame.render_widget(main_block, popup_area);

            let inner = popup_area.inner(ratatui::layout::Margin { horizontal: 2, vertical: 2 });
            let text = format!(
                "Remove ticket {} from the board?\n\n[y] Yes, delete    [n/Esc] Cancel",
                popup.ticket_label
            );
            let content = Paragraph::new(text)
                .style(Style::default().fg(hex_to_color(&state.config.theme.color_text)))
                .alignment(ratatui::layout::Alignment::Center)
                .wrap(Wrap { trim: false });
            frame.render_widget(content, inner);
        }
    }
}

impl AppState {
    pub(crate) fn new(config: GlobalConfig, ids: Box<dyn TicketIdGenerator>) -> Self {
        Self {
            should_quit: false,
            board: BoardController::with_ids(config.default_color, ids),
            input_mode: InputMode::Normal,
            config,
            cards_per_row: 1,
            editing: None,
            delete_confirm_popup: None,
        }
    }

    fn view(&self) -> BoardView {
        let editing = self.editing.as_ref().map(|e| (&e.ticket_id, &e.draft));
        BoardView::project(&self.board, self.input_mode, self.config.submit_key, editing)
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        // Board rejections are logged and the loop carries on
        if let Err(err) = self.dispatch_key(key) {
            tracing::warn!(error = %err, "board operation rejected");
        }
    }

    fn dispatch_key(&mut self, key: KeyEvent) -> Result<(), BoardError> {
        // Under keyboard enhancement Shift+f arrives as 'f' with SHIFT held
        let key = apply_shift(key);

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        // Handle Delete confirmation popup if open
        if self.delete_confirm_popup.is_some() {
            return self.handle_delete_confirm_key(key.code);
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key.code),
            InputMode::Modal => self.handle_modal_key(key),
            InputMode::EditTicket => self.handle_edit_key(key),
        }
    }

    fn handle_delete_confirm_key(&mut self, key: KeyCode) -> Result<(), BoardError> {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(popup) = self.delete_confirm_popup.take() {
                    self.board.remove_ticket(&popup.ticket_id)?;
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.delete_confirm_popup = None;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_normal_key(&mut self, key: KeyCode) -> Result<(), BoardError> {
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('a') | KeyCode::Char('+') => self.toggle_modal(),
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if let Some(&color) = TicketColor::swatches().get(idx) {
                    self.board.select_color(color);
                }
            }
            KeyCode::Char('h') | KeyCode::Left => self.board.select_prev(),
            KeyCode::Char('l') | KeyCode::Right => self.board.select_next(),
            KeyCode::Char('j') | KeyCode::Down => self.board.select_down(self.cards_per_row),
            KeyCode::Char('k') | KeyCode::Up => self.board.select_up(self.cards_per_row),
            KeyCode::Char(' ') | KeyCode::Char('L') => {
                if let Some(id) = self.board.selected_ticket().map(|t| t.id.clone()) {
                    self.board.toggle_lock(&id)?;
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => self.start_edit()?,
            KeyCode::Char('x') => {
                if let Some(ticket) = self.board.selected_ticket() {
                    self.delete_confirm_popup = Some(DeleteConfirmPopup {
                        ticket_id: ticket.id.clone(),
                        ticket_label: ticket.id.label(),
                    });
                }
            }
            KeyCode::Char('f') => self.board.cycle_filter(),
            _ => {}
        }
        Ok(())
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> Result<(), BoardError> {
        if is_submit_key(self.config.submit_key, &key) {
            self.board.submit_input()?;
            self.input_mode = InputMode::Normal;
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => {
                self.toggle_modal();
                return Ok(());
            }
            KeyCode::Tab => {
                self.board.select_next_color();
                return Ok(());
            }
            KeyCode::BackTab => {
                self.board.select_prev_color();
                return Ok(());
            }
            _ => {}
        }

        let has_alt = key.modifiers.contains(KeyModifiers::ALT);
        let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let input = self.board.input_mut();
        match key.code {
            KeyCode::Left if has_alt => input.move_word_left(),
            KeyCode::Right if has_alt => input.move_word_right(),
            // macOS: Option+Left/Right sends Alt+b / Alt+f
            KeyCode::Char('b') if has_alt => input.move_word_left(),
            KeyCode::Char('f') if has_alt => input.move_word_right(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_home(),
            KeyCode::End => input.move_end(),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Char(c) if !has_ctrl => input.insert(c),
            _ => {}
        }
        Ok(())
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Result<(), BoardError> {
        match key.code {
            KeyCode::Esc => {
                self.editing = None;
                self.input_mode = InputMode::Normal;
                return Ok(());
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                if let Some(edit) = self.editing.take() {
                    self.board.edit_content(&edit.ticket_id, edit.draft.as_str())?;
                }
                return Ok(());
            }
            _ => {}
        }

        let Some(edit) = self.editing.as_mut() else {
            self.input_mode = InputMode::Normal;
            return Ok(());
        };

        let has_alt = key.modifiers.contains(KeyModifiers::ALT);
        let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Left if has_alt => edit.draft.move_word_left(),
            KeyCode::Right if has_alt => edit.draft.move_word_right(),
            KeyCode::Left => edit.draft.move_left(),
            KeyCode::Right => edit.draft.move_right(),
            KeyCode::Home => edit.draft.move_home(),
            KeyCode::End => edit.draft.move_end(),
            KeyCode::Backspace => edit.draft.backspace(),
            KeyCode::Delete => edit.draft.delete(),
            KeyCode::Char(c) if !has_ctrl => edit.draft.insert(c),
            _ => {}
        }
        Ok(())
    }

    /// Run the add toggle and keep the input mode in step with the modal
    fn toggle_modal(&mut self) {
        self.input_mode = if self.board.toggle_modal().is_open() {
            InputMode::Modal
        } else {
            InputMode::Normal
        };
    }

    /// Begin editing the selected ticket; locked tickets are refused
    fn start_edit(&mut self) -> Result<(), BoardError> {
        let Some(ticket) = self.board.selected_ticket() else {
            return Ok(());
        };
        if !ticket.is_editable() {
            return Err(BoardError::TicketLocked(ticket.id.clone()));
        }
        self.editing = Some(EditState {
            ticket_id: ticket.id.clone(),
            draft: TextInput::with_text(ticket.content()),
        });
        self.input_mode = InputMode::EditTicket;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        restore_terminal(self.terminal.backend_mut(), self.keyboard_enhanced);
    }
}

/// Leave raw mode and the alternate screen, popping keyboard flags if pushed
fn restore_terminal(out: &mut impl io::Write, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = execute!(out, PopKeyboardEnhancementFlags);
    }
    let _ = disable_raw_mode();
    let _ = execute!(out, LeaveAlternateScreen);
}

/// Run `restore` when a setup step failed, passing the result through
fn restore_on_error<T>(result: Result<T>, restore: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
