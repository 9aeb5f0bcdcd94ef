pub mod board_grid;
pub mod clue_details;
pub mod loader;
pub mod reset_confirmation;
