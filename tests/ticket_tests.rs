use tickets::error::BoardError;
use tickets::ticket::{
    LockState, SequentialTicketIds, Ticket, TicketColor, TicketId, TicketIdGenerator, UuidTicketIds,
};

// === TicketColor ===

#[test]
fn test_color_display_matches_name() {
    let names: Vec<String> = TicketColor::swatches().iter().map(|c| c.to_string()).collect();
    assert_eq!(names, vec!["lightpink", "lightblue", "lightgreen", "black"]);
    for &color in TicketColor::swatches() {
        assert_eq!(color.to_string(), color.as_str());
    }
}

#[test]
fn test_color_swatch_order_and_index() {
    let swatches = TicketColor::swatches();
    assert_eq!(swatches[0], TicketColor::Lightpink);
    for (i, color) in swatches.iter().enumerate() {
        assert_eq!(color.index(), i);
    }
}

#[test]
fn test_color_rgb_values() {
    assert_eq!(TicketColor::Lightpink.rgb(), (255, 182, 193));
    assert_eq!(TicketColor::Lightgreen.rgb(), (144, 238, 144));
    assert!(TicketColor::Black.is_dark());
    assert!(!TicketColor::Lightblue.is_dark());
}

#[test]
fn test_color_default_is_lightpink() {
    assert_eq!(TicketColor::default(), TicketColor::Lightpink);
    assert_eq!(TicketColor::default().to_string(), "lightpink");
}

// === Ticket ===

#[test]
fn test_new_ticket_is_locked() {
    let ticket = Ticket::new(TicketId::new("abc"), TicketColor::Black, "task");

    assert_eq!(ticket.lock(), LockState::Locked);
    assert!(!ticket.is_editable());
    assert_eq!(ticket.lock_icon(), LockState::Locked.icon());
    assert_eq!(ticket.content(), "task");
    assert_eq!(ticket.color(), TicketColor::Black);
}

#[test]
fn test_lock_icon_mirrors_editability() {
    let mut ticket = Ticket::new(TicketId::new("abc"), TicketColor::Black, "task");

    assert_eq!(ticket.toggle_lock(), LockState::Unlocked);
    assert!(ticket.is_editable());
    assert_eq!(ticket.lock_icon(), LockState::Unlocked.icon());
    assert_ne!(LockState::Locked.icon(), LockState::Unlocked.icon());
}

#[test]
fn test_set_content_respects_lock() {
    let mut ticket = Ticket::new(TicketId::new("abc"), TicketColor::Lightpink, "before");

    assert_eq!(
        ticket.set_content("after"),
        Err(BoardError::TicketLocked(TicketId::new("abc")))
    );
    assert_eq!(ticket.content(), "before");

    ticket.toggle_lock();
    assert!(ticket.set_content("after").is_ok());
    assert_eq!(ticket.content(), "after");
}

#[test]
fn test_lock_state_toggled() {
    assert_eq!(LockState::Locked.toggled(), LockState::Unlocked);
    assert_eq!(LockState::Unlocked.toggled(), LockState::Locked);
    assert_eq!(LockState::default(), LockState::Locked);
}

// === TicketId ===

#[test]
fn test_ticket_id_label() {
    assert_eq!(TicketId::new("0123456789abcdef").label(), "#01234567");
    assert_eq!(TicketId::new("t1").label(), "#t1");
}

#[test]
fn test_uuid_ids_are_unique() {
    let ids = UuidTicketIds;
    let a = ids.next_id();
    let b = ids.next_id();

    assert_ne!(a, b);
    assert_eq!(a.as_str().len(), 32);
}

#[test]
fn test_sequential_ids() {
    let ids = SequentialTicketIds::new();

    assert_eq!(ids.next_id().as_str(), "t1");
    assert_eq!(ids.next_id().as_str(), "t2");
}
