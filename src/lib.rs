//! Chess board representation on the [0x88 board]: square indexing, piece
//! encoding, positions parsed from Forsyth-Edwards Notation and moves in
//! coordinate notation.
//!
//! These are the primitives move generation, search and evaluation are built
//! on:
//!
//! ```
//! use ox88::chess::core::{Player, Square};
//! use ox88::chess::moves::Move;
//! use ox88::chess::position::Position;
//!
//! let position =
//!     Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
//!         .unwrap();
//! assert_eq!(position.side_to_move(), Player::Black);
//! assert_eq!(position.en_passant_square(), Some(Square::E3));
//!
//! let reply = Move::new(Square::E7, Square::E5).unwrap();
//! assert_eq!(reply.to_coordinate_notation().unwrap(), "e7e5");
//! ```
//!
//! [0x88 board]: https://www.chessprogramming.org/0x88

pub mod chess;
