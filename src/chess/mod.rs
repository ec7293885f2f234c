//! Implementation of chess board primitives: 0x88 squares, pieces, positions
//! and moves.

pub mod core;
pub mod mailbox;
pub mod moves;
pub mod position;
