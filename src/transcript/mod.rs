//! Transcript Module
//!
//! Parses shell-session transcripts (`$ cd`, `$ ls`, listing entries) and
//! replays them against a navigator to reconstruct the recorded tree.

pub mod replay;
pub mod statement;

pub use replay::{replay, replay_into, ReplayError};
pub use statement::Statement;
