pub mod board_session;
pub mod reset;
pub mod selection;

pub use board_session::{BoardSession, LoadRequest, Phase, PlayState};
pub use reset::{Pagination, ResetFlow};
pub use selection::{Reveal, Selection};
