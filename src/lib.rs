// Library target for integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the board core so
// that harnesses can import it via `trivia_board::session::*` and friends.
// The terminal shell (app, event, ui) lives only in the binary.
#![allow(dead_code)]

pub mod board;
pub mod config;
pub mod fetch;
pub mod session;
