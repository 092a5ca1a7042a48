mod app;
pub mod board;
pub mod input;
pub mod view;

pub use app::App;
pub use board::{BoardController, ModalState, Swatch};
