use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tickets::config::{SubmitKey, ThemeConfig};
use tickets::ticket::{SequentialTicketIds, TicketColor, TicketId};
use tickets::tui::input::{InputMode, TextInput};
use tickets::tui::view::{build_footer_text, cards_per_row, render_board, BoardView, CARD_WIDTH};
use tickets::tui::BoardController;

fn test_board() -> BoardController {
    BoardController::with_ids(TicketColor::Lightpink, Box::new(SequentialTicketIds::new()))
}

fn add(board: &mut BoardController, color: TicketColor, text: &str) -> TicketId {
    board.select_color(color);
    board.toggle_modal();
    board.submit_ticket(text).unwrap()
}

fn project(board: &BoardController) -> BoardView {
    BoardView::project(board, InputMode::Normal, SubmitKey::Enter, None)
}

fn render(view: &BoardView, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            render_board(frame, area, view, &ThemeConfig::default());
        })
        .unwrap();
    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|c| c.symbol()).collect()
}

// === Projection ===

#[test]
fn test_project_empty_board() {
    let board = test_board();
    let view = project(&board);

    assert!(view.cards.is_empty());
    assert!(view.modal.is_none());
    assert!(view.header.contains("(0/0)"));
    assert!(view.header.contains("filter: all"));
}

#[test]
fn test_project_cards_follow_state() {
    let mut board = test_board();
    let first = add(&mut board, TicketColor::Lightgreen, "Fix bug");
    add(&mut board, TicketColor::Black, "Ship it");
    board.toggle_lock(&first).unwrap();

    let view = project(&board);

    assert_eq!(view.cards.len(), 2);
    let card = &view.cards[0];
    assert_eq!(card.id, first);
    assert_eq!(card.id_label, "#t1");
    assert_eq!(card.color, TicketColor::Lightgreen);
    assert_eq!(card.content, "Fix bug");
    assert!(card.editable);
    assert!(card.selected);
    assert!(!card.editing);

    assert!(!view.cards[1].editable);
    assert!(!view.cards[1].selected);
    assert_ne!(view.cards[0].lock_icon, view.cards[1].lock_icon);
}

#[test]
fn test_project_modal_only_when_open() {
    let mut board = test_board();
    board.toggle_modal();
    board.select_color(TicketColor::Lightblue);
    board.input_mut().insert('h');
    board.input_mut().insert('i');

    let view = BoardView::project(&board, InputMode::Modal, SubmitKey::ShiftEnter, None);
    let modal = view.modal.expect("modal should be projected");

    assert_eq!(modal.text, "hi█");
    assert_eq!(modal.submit_hint, "Shift+Enter");
    let active: Vec<_> = modal.swatches.iter().filter(|s| s.active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].color, TicketColor::Lightblue);

    board.toggle_modal();
    assert!(project(&board).modal.is_none());
}

#[test]
fn test_project_respects_filter() {
    let mut board = test_board();
    add(&mut board, TicketColor::Lightpink, "pink");
    add(&mut board, TicketColor::Black, "black");
    board.set_filter(Some(TicketColor::Black));

    let view = project(&board);

    assert_eq!(view.cards.len(), 1);
    assert_eq!(view.cards[0].content, "black");
    assert!(view.header.contains("(1/2)"));
    assert!(view.header.contains("filter: black"));
}

#[test]
fn test_project_editing_draft() {
    let mut board = test_board();
    let id = add(&mut board, TicketColor::Lightpink, "old");
    let draft = TextInput::with_text("new");

    let view = BoardView::project(&board, InputMode::EditTicket, SubmitKey::Enter, Some((&id, &draft)));

    assert!(view.cards[0].editing);
    assert_eq!(view.cards[0].content, "new█");
    // The ticket itself is unchanged until the edit is saved
    assert_eq!(board.tickets()[0].content(), "old");
}

// === Helpers ===

#[test]
fn test_cards_per_row() {
    assert_eq!(cards_per_row(0), 1);
    assert_eq!(cards_per_row(CARD_WIDTH - 1), 1);
    assert_eq!(cards_per_row(CARD_WIDTH * 3), 3);
    assert_eq!(cards_per_row(CARD_WIDTH * 3 + 5), 3);
}

#[test]
fn test_footer_text_per_mode() {
    assert!(build_footer_text(InputMode::Normal, SubmitKey::Enter).contains("[a] add"));
    assert!(build_footer_text(InputMode::Modal, SubmitKey::Shift).contains("[Shift] create"));
    assert!(build_footer_text(InputMode::EditTicket, SubmitKey::Enter).contains("[Enter] save"));
}

// === Rendering ===

#[test]
fn test_render_empty_board_hint() {
    let board = test_board();
    let content = render(&project(&board), 100, 30);

    assert!(content.contains("No tickets yet"));
    assert!(content.contains("Tickets (0/0)"));
}

#[test]
fn test_render_cards() {
    let mut board = test_board();
    add(&mut board, TicketColor::Lightgreen, "Fix bug");
    add(&mut board, TicketColor::Lightblue, "Write docs");

    let content = render(&project(&board), 100, 30);

    assert!(content.contains("Fix bug"));
    assert!(content.contains("Write docs"));
    assert!(content.contains("#t1"));
    assert!(content.contains("#t2"));
    assert!(!content.contains("New Ticket"));
}

#[test]
fn test_render_modal_when_open() {
    let mut board = test_board();
    board.toggle_modal();
    board.input_mut().insert('x');

    let view = BoardView::project(&board, InputMode::Modal, SubmitKey::Enter, None);
    let content = render(&view, 100, 30);

    assert!(content.contains("New Ticket"));
    assert!(content.contains("[Enter] create"));
    assert!(content.contains("▲"));
}

#[test]
fn test_render_scrolls_to_selected_row() {
    let mut board = test_board();
    for n in 0..12 {
        add(&mut board, TicketColor::Lightpink, &format!("task-{:02}", n));
    }
    for _ in 0..11 {
        board.select_next();
    }

    // One card per row, room for two rows of cards
    let content = render(&project(&board), CARD_WIDTH, 22);

    assert!(content.contains("task-11"));
    assert!(!content.contains("task-00"));
}

#[test]
fn test_render_tiny_terminal_does_not_panic() {
    let mut board = test_board();
    add(&mut board, TicketColor::Lightpink, "tiny");
    board.toggle_modal();

    let view = BoardView::project(&board, InputMode::Modal, SubmitKey::Enter, None);
    let _ = render(&view, 10, 5);
}
