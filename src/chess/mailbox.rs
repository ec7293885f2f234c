//! Square-centric board storage on the padded 0x88 layout.
//!
//! The [`Mailbox`] keeps one cell per 0x88 index. Half of the cells are
//! padding: they are never written and always read as empty, which keeps the
//! board a flat array that can be indexed by any on-board square without
//! translating coordinates.

use std::fmt::{self, Write};
use std::ops::Index;

use strum::IntoEnumIterator;

use crate::chess::core::{File, Piece, PieceKind, Player, Rank, Square, BOARD_SIZE};

/// Pieces on the back rank in the starting position, from the a-file to the
/// h-file.
const BACKRANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement indexed by 0x88 square index.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Mailbox {
    cells: [Option<Piece>; BOARD_SIZE],
}

impl Mailbox {
    /// Creates a board without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Creates the piece placement of the standard starting position.
    #[must_use]
    pub fn starting() -> Self {
        let mut result = Self::empty();
        for player in [Player::White, Player::Black] {
            for (file, kind) in File::iter().zip(BACKRANK) {
                result.set(
                    Square::new(file, Rank::backrank(player)),
                    Some(Piece::new(player, kind)),
                );
                result.set(
                    Square::new(file, Rank::pawns_starting(player)),
                    Some(Piece::new(player, PieceKind::Pawn)),
                );
            }
        }
        result
    }

    /// Returns the piece on given square, if any.
    #[must_use]
    pub const fn at(&self, square: Square) -> Option<Piece> {
        self.cells[square as usize]
    }

    pub(super) fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square as usize] = piece;
    }

    /// Returns the whole board in the signed code encoding (see
    /// [`Piece::code`]), indexed by raw 0x88 index. Padding cells are 0.
    #[must_use]
    pub fn codes(&self) -> [i8; BOARD_SIZE] {
        self.cells.map(Piece::encode)
    }

    /// Iterates over occupied squares from A1 to H8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.at(square).map(|piece| (square, piece)))
    }
}

impl Index<Square> for Mailbox {
    type Output = Option<Piece>;

    fn index(&self, square: Square) -> &Self::Output {
        &self.cells[square as usize]
    }
}

impl fmt::Display for Mailbox {
    /// Prints piece placement in FEN format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut empty_squares = 0;
            for file in File::iter() {
                if let Some(piece) = self.at(Square::new(file, rank)) {
                    if empty_squares != 0 {
                        write!(f, "{empty_squares}")?;
                        empty_squares = 0;
                    }
                    write!(f, "{piece}")?;
                } else {
                    empty_squares += 1;
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != Rank::One {
                const RANK_SEPARATOR: char = '/';
                f.write_char(RANK_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Mailbox {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece) a-la Stockfish "debug" command in UCI mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                match self.at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if file != File::H {
                    f.write_str(SQUARE_SEPARATOR)?;
                }
            }
            if rank != Rank::One {
                f.write_str(LINE_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";
