//! InMemory 実装

mod game;

pub use game::InMemoryGameRepository;
