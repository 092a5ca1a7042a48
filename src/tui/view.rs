//! Projection of board state onto the terminal. `BoardView::project` is pure
//! and holds everything the renderer needs; `render_board` only draws it.

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::config::{SubmitKey, ThemeConfig};
use crate::ticket::{TicketColor, TicketId};

use super::board::{BoardController, Swatch};
use super::input::{InputMode, TextInput};

/// Card size in terminal cells, borders included
pub const CARD_WIDTH: u16 = 28;
pub const CARD_HEIGHT: u16 = 8;

/// Modal size in terminal cells
const MODAL_WIDTH: u16 = 60;
const MODAL_HEIGHT: u16 = 11;

const CARET: &str = "█";

/// Helper to convert hex color string to ratatui Color
pub(crate) fn hex_to_color(hex: &str) -> Color {
    ThemeConfig::parse_hex(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

pub(crate) fn ticket_color(color: TicketColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

/// How many cards fit side by side in `width` cells
pub fn cards_per_row(width: u16) -> usize {
    usize::from((width / CARD_WIDTH).max(1))
}

/// Build footer help text based on current UI state
pub fn build_footer_text(input_mode: InputMode, submit_key: SubmitKey) -> String {
    match input_mode {
        InputMode::Normal => {
            " [a] add  [1-4] color  [space] lock  [e] edit  [x] del  [f] filter  [q] quit ".to_string()
        }
        InputMode::Modal => format!(
            " Type task... [Tab] color  [{}] create  [Esc] close ",
            submit_key.label()
        ),
        InputMode::EditTicket => " Edit task... [Enter] save  [Esc] cancel ".to_string(),
    }
}

/// One ticket card as it will be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: TicketId,
    pub id_label: String,
    pub color: TicketColor,
    pub content: String,
    pub lock_icon: &'static str,
    pub created: String,
    pub editable: bool,
    pub selected: bool,
    /// Content is being edited in place; `content` carries the caret
    pub editing: bool,
}

/// The add modal as it will be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub text: String,
    pub swatches: Vec<Swatch>,
    pub submit_hint: &'static str,
}

/// Everything on screen, derived from the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub header: String,
    pub cards: Vec<CardView>,
    pub modal: Option<ModalView>,
    pub footer: String,
    pub selected_row: usize,
}

/// Text with a caret at the cursor position
fn with_caret(input: &TextInput) -> String {
    let (before, after) = input.split_at_cursor();
    format!("{}{}{}", before, CARET, after)
}

impl BoardView {
    /// Project board state to a view. `editing` is the ticket being edited in
    /// place together with its draft.
    pub fn project(
        board: &BoardController,
        input_mode: InputMode,
        submit_key: SubmitKey,
        editing: Option<(&TicketId, &TextInput)>,
    ) -> Self {
        let visible = board.visible_tickets();
        let selected = board.selected_ticket().map(|t| t.id.clone());

        let cards = visible
            .iter()
            .map(|ticket| {
                let draft = editing.filter(|(id, _)| **id == ticket.id).map(|(_, input)| input);
                CardView {
                    id: ticket.id.clone(),
                    id_label: ticket.id.label(),
                    color: ticket.color(),
                    content: draft.map_or_else(|| ticket.content().to_string(), with_caret),
                    lock_icon: ticket.lock_icon(),
                    created: ticket.created_at.format("%b %d %H:%M").to_string(),
                    editable: ticket.is_editable(),
                    selected: selected.as_ref() == Some(&ticket.id),
                    editing: draft.is_some(),
                }
            })
            .collect();

        let filter_label = board.filter().map_or("all", |c| c.as_str());
        let header = format!(
            " Tickets ({}/{})  filter: {} ",
            visible.len(),
            board.tickets().len(),
            filter_label
        );

        let modal = board.modal().is_open().then(|| ModalView {
            text: with_caret(board.input()),
            swatches: board.swatches().to_vec(),
            submit_hint: submit_key.label(),
        });

        Self {
            header,
            cards,
            modal,
            footer: build_footer_text(input_mode, submit_key),
            selected_row: board.selected_row(),
        }
    }
}

/// Draw the whole board: header, card grid, footer, and the modal when open
pub fn render_board(frame: &mut Frame, area: Rect, view: &BoardView, theme: &ThemeConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Grid
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let header = Paragraph::new(view.header.as_str())
        .style(Style::default().fg(hex_to_color(&theme.color_text)).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(hex_to_color(&theme.color_normal))),
        );
    frame.render_widget(header, chunks[0]);

    render_grid(frame, chunks[1], view, theme);

    let footer = Paragraph::new(view.footer.as_str())
        .style(Style::default().fg(hex_to_color(&theme.color_dimmed)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(hex_to_color(&theme.color_dimmed))),
        );
    frame.render_widget(footer, chunks[2]);

    if let Some(modal) = &view.modal {
        render_modal(frame, area, modal, theme);
    }
}

fn render_grid(frame: &mut Frame, area: Rect, view: &BoardView, theme: &ThemeConfig) {
    if view.cards.is_empty() {
        let empty = Paragraph::new("No tickets yet. Press [a] to add one.")
            .style(Style::default().fg(hex_to_color(&theme.color_dimmed)).italic())
            .alignment(Alignment::Center);
        let centered = Rect {
            y: area.y + area.height / 2,
            height: 1.min(area.height),
            ..area
        };
        frame.render_widget(empty, centered);
        return;
    }

    let per_row = cards_per_row(area.width);
    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));

    // Scroll so the selected card's row stays visible
    let selected_grid_row = view.selected_row / per_row;
    let first_row = selected_grid_row.saturating_sub(visible_rows - 1);

    for (i, card) in view.cards.iter().enumerate().skip(first_row * per_row) {
        let grid_row = i / per_row - first_row;
        if grid_row >= visible_rows {
            break;
        }
        let col = (i % per_row) as u16;
        let card_area = Rect {
            x: area.x + col * CARD_WIDTH,
            y: area.y + grid_row as u16 * CARD_HEIGHT,
            width: CARD_WIDTH.min(area.width),
            height: CARD_HEIGHT.min(area.height),
        };
        render_card(frame, card_area, card, theme);
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &CardView, theme: &ThemeConfig) {
    let (border_style, border_type) = if card.selected {
        (Style::default().fg(hex_to_color(&theme.color_selected)), BorderType::Thick)
    } else {
        (Style::default().fg(hex_to_color(&theme.color_normal)), BorderType::Plain)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .border_type(border_type);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    // Color strip across the top of the card
    let strip = Paragraph::new("").style(Style::default().bg(ticket_color(card.color)));
    frame.render_widget(strip, Rect { height: 1, ..inner });

    if inner.height < 2 {
        return;
    }

    let id_line = Line::from(vec![
        Span::styled(card.id_label.clone(), Style::default().fg(hex_to_color(&theme.color_dimmed))),
        Span::raw(" "),
        Span::raw(card.lock_icon),
        Span::raw(" "),
        Span::styled(card.created.clone(), Style::default().fg(hex_to_color(&theme.color_dimmed))),
    ]);
    frame.render_widget(
        Paragraph::new(id_line),
        Rect {
            y: inner.y + 1,
            height: 1,
            ..inner
        },
    );

    let content_area = Rect {
        y: inner.y + 2,
        height: inner.height.saturating_sub(2),
        ..inner
    };
    let content_style = if card.editing {
        Style::default().fg(hex_to_color(&theme.color_selected))
    } else if card.editable {
        Style::default().fg(hex_to_color(&theme.color_text))
    } else {
        Style::default().fg(hex_to_color(&theme.color_text)).italic()
    };

    // Truncate content to fit the card (char-safe for UTF-8)
    let max_chars = usize::from(content_area.width) * usize::from(content_area.height);
    let content: String = if card.content.chars().count() > max_chars {
        format!("{}...", card.content.chars().take(max_chars.saturating_sub(3)).collect::<String>())
    } else {
        card.content.clone()
    };
    let content = Paragraph::new(content)
        .style(content_style)
        .wrap(Wrap { trim: false });
    frame.render_widget(content, content_area);
}

fn render_modal(frame: &mut Frame, area: Rect, modal: &ModalView, theme: &ThemeConfig) {
    let popup_area = centered_rect_fixed(MODAL_WIDTH, MODAL_HEIGHT, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" New Ticket ")
        .title_style(Style::default().fg(hex_to_color(&theme.color_popup_header)).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(hex_to_color(&theme.color_popup_border)));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Task input
            Constraint::Length(2), // Swatches + active marker
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let input = Paragraph::new(modal.text.as_str())
        .style(Style::default().fg(hex_to_color(&theme.color_text)))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Task ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(hex_to_color(&theme.color_selected))),
        );
    frame.render_widget(input, chunks[0]);

    let mut blocks = vec![Span::raw(" ")];
    let mut markers = vec![Span::raw(" ")];
    for (n, swatch) in modal.swatches.iter().enumerate() {
        blocks.push(Span::styled(
            format!(" {} ", n + 1),
            Style::default()
                .bg(ticket_color(swatch.color))
                .fg(if swatch.color.is_dark() { Color::White } else { Color::Black }),
        ));
        blocks.push(Span::raw(" "));
        let marker = if swatch.active { " ▲ " } else { "   " };
        markers.push(Span::styled(
            marker,
            Style::default().fg(hex_to_color(&theme.color_selected)),
        ));
        markers.push(Span::raw(" "));
    }
    frame.render_widget(
        Paragraph::new(vec![Line::from(blocks), Line::from(markers)]),
        chunks[1],
    );

    let help = Paragraph::new(format!(
        " [Tab] color  [{}] create  [Esc] close ",
        modal.submit_hint
    ))
    .style(Style::default().fg(hex_to_color(&theme.color_dimmed)));
    frame.render_widget(help, chunks[2]);
}

/// Create a centered rect with fixed size, capped to the available area
pub(crate) fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + r.width.saturating_sub(width) / 2,
        y: r.y + r.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
