//! Crate root module declarations for the Lines of Action engine.
//!
//! This file exposes the board model, move generation, search, the
//! deadline-owning controller, text encodings and the server protocol so the
//! binary, benches and tests can import stable module paths.

pub mod game_state {
    pub mod board_state;
    pub mod board_types;
    pub mod connectivity;
    pub mod line_move;
}

pub mod move_generation {
    pub mod line_move_generator;
}

pub mod search {
    pub mod alpha_beta;
    pub mod centralization_heuristic;
    pub mod evaluation;
    pub mod grouping_heuristic;
    pub mod move_orderer;
    pub mod search_control;
}

pub mod engines {
    pub mod controller;
}

pub mod utils {
    pub mod board_text;
    pub mod move_text;
}

pub mod protocol {
    pub mod messages;
    pub mod session;
}

pub mod config;
pub mod errors;
