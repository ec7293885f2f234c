//! Provides fully-specified [Chess Position] implementation: stores information
//! about the board and tracks the state of castling, 50-move rule draw, etc.
//!
//! [Chess Position]: https://www.chessprogramming.org/Chess_Position

use std::fmt;
use std::num::NonZeroU16;
use std::str::FromStr;

use anyhow::{bail, Context};
use arrayvec::ArrayVec;
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::chess::core::{CastleRights, File, Piece, Player, Rank, Square, BOARD_WIDTH};
use crate::chess::mailbox::Mailbox;

/// State of the chess game: board, half-move counters and castling rights,
/// etc. It has 1:1 relationship with [Forsyth-Edwards Notation] (FEN).
///
/// [`Position::try_from()`] provides a convenient interface for creating a
/// [`Position`]. It will clean up the input (trim newlines and whitespace and
/// an optional `fen` prefix) and parse it with [`Position::from_fen`].
///
/// The position is not checked for legality: any board that can be written
/// down in FEN is accepted, e.g. a board without kings.
///
/// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    mailbox: Mailbox,
    side_to_move: Player,
    /// Castling ability exactly as it was given in FEN. Interpreted on demand
    /// by [`Position::castle_rights`].
    castling: String,
    en_passant_square: Option<Square>,
    /// [Halfmove Clock][^ply] keeps track of the number of (half-)moves
    /// since the last capture or pawn move and is used to enforce
    /// fifty[^fifty]-move draw rule.
    ///
    /// [Halfmove Clock]: https://www.chessprogramming.org/Halfmove_Clock
    /// [^ply]: "Half-move" or ["ply"](https://www.chessprogramming.org/Ply) means a move of only
    ///     one side.
    /// [^fifty]: 50 __full__ moves
    halfmove_clock: u16,
    fullmove_counter: NonZeroU16,
}

impl Position {
    /// Creates the starting position of the standard chess variant.
    ///
    /// ```
    /// use ox88::chess::position::Position;
    ///
    /// let starting_position = Position::starting();
    /// assert_eq!(
    ///     &starting_position.to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        Self {
            mailbox: Mailbox::starting(),
            side_to_move: Player::White,
            castling: CastleRights::all().to_string(),
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_counter: NonZeroU16::MIN,
        }
    }

    /// Parses board from Forsyth-Edwards Notation.
    ///
    /// FEN ::=
    ///       Piece Placement
    ///   ' ' Side to move
    ///   ' ' Castling ability
    ///   ' ' En passant target square
    ///   ' ' Halfmove clock
    ///   ' ' Fullmove counter
    ///
    /// The fields can be separated by any amount of whitespace. All six of
    /// them are required.
    ///
    /// # Errors
    ///
    /// Returns [`anyhow::Error`] describing the first problem found in the
    /// input. No partially parsed position is ever returned.
    pub fn from_fen(input: &str) -> anyhow::Result<Self> {
        log::trace!("parsing FEN: {input}");
        Self::parse_fields(input).inspect_err(|e| log::debug!("rejected FEN {input:?}: {e:#}"))
    }

    fn parse_fields(input: &str) -> anyhow::Result<Self> {
        let Some((placement, side_to_move, castling, en_passant, halfmove_clock, fullmove_counter)) =
            input.split_whitespace().collect_tuple()
        else {
            bail!(
                "incorrect FEN: expected 6 fields, got {}",
                input.split_whitespace().count()
            );
        };
        let mailbox = parse_placement(placement)?;
        let side_to_move = Player::try_from(side_to_move).context("incorrect FEN: side to move")?;
        let en_passant_square = match en_passant {
            "-" => None,
            value => Some(parse_en_passant(value)?),
        };
        Ok(Self {
            mailbox,
            side_to_move,
            castling: castling.to_owned(),
            en_passant_square,
            halfmove_clock: parse_counter(halfmove_clock, "halfmove clock")?,
            fullmove_counter: parse_counter(fullmove_counter, "fullmove counter")?,
        })
    }

    /// Returns the piece on given square, if any.
    #[must_use]
    pub const fn at(&self, square: Square) -> Option<Piece> {
        self.mailbox.at(square)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// Castling ability field of the FEN, verbatim.
    #[must_use]
    pub fn castling(&self) -> &str {
        &self.castling
    }

    /// Interprets the castling ability field.
    ///
    /// # Errors
    ///
    /// If the field is not "-" or a subsequence of `KQkq`.
    pub fn castle_rights(&self) -> anyhow::Result<CastleRights> {
        CastleRights::try_from(self.castling.as_str())
    }

    /// Square a pawn can be captured en passant on.
    #[must_use]
    pub const fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    /// Number of half-moves since the last capture or pawn move.
    #[must_use]
    pub const fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// Number of full moves, starting from 1 and incremented after Black's
    /// move.
    #[must_use]
    pub const fn fullmove_counter(&self) -> NonZeroU16 {
        self.fullmove_counter
    }
}

fn parse_placement(placement: &str) -> anyhow::Result<Mailbox> {
    let mut ranks = ArrayVec::<&str, { BOARD_WIDTH as usize }>::new();
    for rank_fen in placement.split('/') {
        if ranks.try_push(rank_fen).is_err() {
            bail!(
                "incorrect FEN: expected {BOARD_WIDTH} ranks, got {}",
                placement.split('/').count()
            );
        }
    }
    if !ranks.is_full() {
        bail!(
            "incorrect FEN: expected {BOARD_WIDTH} ranks, got {}",
            ranks.len()
        );
    }
    let mut result = Mailbox::empty();
    // Ranks are listed from the eighth to the first one.
    for (rank, rank_fen) in Rank::iter().rev().zip(ranks) {
        let mut file: u8 = 0;
        for symbol in rank_fen.chars() {
            if let Some(increment) = symbol.to_digit(10) {
                file = file.saturating_add(u8::try_from(increment)?);
            } else {
                let piece = Piece::try_from(symbol)?;
                let Ok(column) = File::try_from(file) else {
                    bail!(
                        "incorrect FEN: rank size should be exactly {BOARD_WIDTH}, got {rank_fen} \
                         with more files"
                    );
                };
                result.set(Square::new(column, rank), Some(piece));
                file += 1;
            }
            if file > BOARD_WIDTH {
                bail!(
                    "incorrect FEN: rank size should be exactly {BOARD_WIDTH}, got {rank_fen} \
                     with more files"
                );
            }
        }
        if file != BOARD_WIDTH {
            bail!(
                "incorrect FEN: rank size should be exactly {BOARD_WIDTH}, got {rank_fen} of \
                 length {file}"
            );
        }
    }
    Ok(result)
}

fn parse_en_passant(value: &str) -> anyhow::Result<Square> {
    let square = Square::try_from(value)
        .with_context(|| format!("incorrect FEN: en passant square can not be parsed {value}"))?;
    match square.rank() {
        Rank::Three | Rank::Six => Ok(square),
        rank => bail!("incorrect FEN: en passant square should be on rank 3 or 6, got {rank}"),
    }
}

fn parse_counter<T>(value: &str, name: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    // Signs are accepted by FromStr but not by FEN.
    if !value.bytes().all(|c| c.is_ascii_digit()) {
        bail!("incorrect FEN: {name} can not contain anything other than digits, got {value}");
    }
    value
        .parse::<T>()
        .with_context(|| format!("incorrect FEN: {name} can not be parsed {value}"))
}

impl TryFrom<&str> for Position {
    type Error = anyhow::Error;

    /// Trims whitespace and an optional `fen ` prefix before parsing the input
    /// with [`Position::from_fen`].
    fn try_from(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        Self::from_fen(input.strip_prefix("fen ").unwrap_or(input))
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> anyhow::Result<Self> {
        Self::try_from(input)
    }
}

impl fmt::Display for Position {
    /// Prints board in Forsyth-Edwards Notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", &self.mailbox)?;
        write!(f, "{} ", &self.side_to_move)?;
        write!(f, "{} ", &self.castling)?;
        match self.en_passant_square {
            Some(square) => write!(f, "{square} "),
            None => write!(f, "- "),
        }?;
        write!(f, "{} ", &self.halfmove_clock)?;
        write!(f, "{}", &self.fullmove_counter)?;
        Ok(())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", &self.mailbox)?;
        writeln!(f, "Player to move: {:?}", &self.side_to_move)?;
        writeln!(f, "Fullmove counter: {:?}", &self.fullmove_counter)?;
        writeln!(f, "En Passant: {:?}", &self.en_passant_square)?;
        writeln!(f, "Castling rights: {}", &self.castling)?;
        writeln!(f, "FEN: {self}")?;
        Ok(())
    }
}
