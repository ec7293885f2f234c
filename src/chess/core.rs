//! Chess primitives commonly used within [`crate::chess`].
//!
//! Squares are laid out on a padded [0x88 board]: 16 cells per rank, of which
//! only the first 8 are real files. The index of a square is `0rrr0fff` in
//! binary, so the real board occupies the indices whose `0x88` bits are unset:
//!
//! ```text
//!   a  b  c  d  e  f  g  h | padding
//! 8 70 71 72 73 74 75 76 77|78 .. 7F
//! 7 60 61 62 63 64 65 66 67|68 .. 6F
//! 6 50 51 52 53 54 55 56 57|58 .. 5F
//! 5 40 41 42 43 44 45 46 47|48 .. 4F
//! 4 30 31 32 33 34 35 36 37|38 .. 3F
//! 3 20 21 22 23 24 25 26 27|28 .. 2F
//! 2 10 11 12 13 14 15 16 17|18 .. 1F
//! 1 00 01 02 03 04 05 06 07|08 .. 0F
//! ```
//!
//! Stepping off the board in any direction always sets one of the padding
//! bits, hence a single mask test replaces four bound comparisons.
//!
//! [0x88 board]: https://www.chessprogramming.org/0x88

use std::fmt::{self, Write};

use anyhow::bail;
use itertools::Itertools;

use crate::chess::moves::MoveFlags;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
/// Number of cells in the padded board, including the padding.
pub const BOARD_SIZE: usize = 128;
/// Index distance between two vertically adjacent squares.
pub const RANK_STRIDE: i16 = 16;

/// Every bit that can not be set in an on-board index: `0x88` together with
/// all bits above the 128-cell grid (including the sign bit).
const OFF_BOARD_MASK: i16 = !0x77;

/// Board squares: from left to right, from bottom to the top. The value of
/// each square is its 0x88 index:
///
/// ```
/// use ox88::chess::core::Square;
///
/// assert_eq!(Square::A1 as u8, 0x00);
/// assert_eq!(Square::H1 as u8, 0x07);
/// assert_eq!(Square::A2 as u8, 0x10);
/// assert_eq!(Square::E4 as u8, 0x34);
/// assert_eq!(Square::H8 as u8, 0x77);
/// ```
///
/// Square is a compact representation using only one byte.
///
/// ```
/// use ox88::chess::core::Square;
///
/// assert_eq!(std::mem::size_of::<Square>(), 1);
/// ```
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[rustfmt::skip]
#[allow(missing_docs)]
pub enum Square {
    A1 = 0x00, B1, C1, D1, E1, F1, G1, H1,
    A2 = 0x10, B2, C2, D2, E2, F2, G2, H2,
    A3 = 0x20, B3, C3, D3, E3, F3, G3, H3,
    A4 = 0x30, B4, C4, D4, E4, F4, G4, H4,
    A5 = 0x40, B5, C5, D5, E5, F5, G5, H5,
    A6 = 0x50, B6, C6, D6, E6, F6, G6, H6,
    A7 = 0x60, B7, C7, D7, E7, F7, G7, H7,
    A8 = 0x70, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    #[rustfmt::skip]
    const ALL: [Self; 64] = [
        Self::A1, Self::B1, Self::C1, Self::D1, Self::E1, Self::F1, Self::G1, Self::H1,
        Self::A2, Self::B2, Self::C2, Self::D2, Self::E2, Self::F2, Self::G2, Self::H2,
        Self::A3, Self::B3, Self::C3, Self::D3, Self::E3, Self::F3, Self::G3, Self::H3,
        Self::A4, Self::B4, Self::C4, Self::D4, Self::E4, Self::F4, Self::G4, Self::H4,
        Self::A5, Self::B5, Self::C5, Self::D5, Self::E5, Self::F5, Self::G5, Self::H5,
        Self::A6, Self::B6, Self::C6, Self::D6, Self::E6, Self::F6, Self::G6, Self::H6,
        Self::A7, Self::B7, Self::C7, Self::D7, Self::E7, Self::F7, Self::G7, Self::H7,
        Self::A8, Self::B8, Self::C8, Self::D8, Self::E8, Self::F8, Self::G8, Self::H8,
    ];

    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self::ALL[rank as usize * BOARD_WIDTH as usize + file as usize]
    }

    /// Creates a square from zero-based rank and file numbers.
    ///
    /// # Errors
    ///
    /// If either `rank` or `file` is outside of `0..BOARD_WIDTH`.
    pub fn from_coordinates(rank: u8, file: u8) -> anyhow::Result<Self> {
        Ok(Self::new(File::try_from(file)?, Rank::try_from(rank)?))
    }

    /// Checks whether a raw 0x88 index refers to a square on the board.
    ///
    /// ```
    /// use ox88::chess::core::Square;
    ///
    /// assert!(Square::is_valid(0x00));
    /// assert!(Square::is_valid(0x77));
    /// assert!(!Square::is_valid(0x08));
    /// assert!(!Square::is_valid(0x80));
    /// assert!(!Square::is_valid(-1));
    /// ```
    #[must_use]
    pub const fn is_valid(index: i16) -> bool {
        index & OFF_BOARD_MASK == 0
    }

    /// Checks whether `name` is an algebraic square name: a file letter
    /// within 'a'..='h' followed by a rank digit within '1'..='8'.
    #[must_use]
    pub const fn is_valid_name(name: &str) -> bool {
        matches!(name.as_bytes(), [b'a'..=b'h', b'1'..=b'8'])
    }

    /// Returns the 0x88 index of the square.
    #[must_use]
    pub const fn index(self) -> i16 {
        self as i16
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub const fn file(self) -> File {
        File::ALL[(self as u8 & 0x7) as usize]
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self as u8 >> 4) as usize]
    }

    /// Moves the square by a raw 0x88 `delta`. Returns [`None`] if the result
    /// is off the board.
    ///
    /// ```
    /// use ox88::chess::core::Square;
    ///
    /// assert_eq!(Square::E4.offset(0x11), Some(Square::F5));
    /// // Wraps around the h-file into the padding.
    /// assert_eq!(Square::H4.offset(1), None);
    /// ```
    #[must_use]
    pub const fn offset(self, delta: i16) -> Option<Self> {
        match self.index().checked_add(delta) {
            Some(candidate) if Self::is_valid(candidate) => Some(Self::from_valid_index(candidate)),
            _ => None,
        }
    }

    /// Moves the square one step in given direction.
    #[must_use]
    pub const fn shift(self, direction: Direction) -> Option<Self> {
        self.offset(direction.offset())
    }

    /// Iterates over all squares of the board, from A1 to H8.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        Self::ALL.into_iter()
    }

    const fn from_valid_index(index: i16) -> Self {
        debug_assert!(Self::is_valid(index));
        Self::ALL[((index >> 4) * BOARD_WIDTH as i16 + (index & 0x7)) as usize]
    }
}

impl TryFrom<i16> for Square {
    type Error = anyhow::Error;

    /// Creates a square given its 0x88 index.
    ///
    /// # Errors
    ///
    /// If given index is not on the board.
    fn try_from(index: i16) -> anyhow::Result<Self> {
        if !Self::is_valid(index) {
            bail!("square index should be a valid 0x88 index, got {index:#x}");
        }
        Ok(Self::from_valid_index(index))
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let Some((file, rank)) = square.chars().collect_tuple() else {
            bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            )
        };
        Ok(Self::new(file.try_into()?, rank.try_into()?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Represents a column (vertical row) of the chessboard. In chess notation, it
/// is normally represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
#[allow(missing_docs)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    const ALL: [Self; BOARD_WIDTH as usize] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        match file {
            'a'..='h' => Ok(Self::ALL[file as usize - 'a' as usize]),
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        }
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;

    fn try_from(column: u8) -> anyhow::Result<Self> {
        match Self::ALL.get(column as usize) {
            Some(file) => Ok(*file),
            None => bail!("file should be within 0..BOARD_WIDTH, got {column}"),
        }
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
#[allow(missing_docs)]
pub enum Rank {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
}

impl Rank {
    const ALL: [Self; BOARD_WIDTH as usize] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
    ];

    pub(super) const fn backrank(player: Player) -> Self {
        match player {
            Player::White => Self::One,
            Player::Black => Self::Eight,
        }
    }

    pub(super) const fn pawns_starting(player: Player) -> Self {
        match player {
            Player::White => Self::Two,
            Player::Black => Self::Seven,
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Ok(Self::ALL[rank as usize - '1' as usize]),
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;

    fn try_from(row: u8) -> anyhow::Result<Self> {
        match Self::ALL.get(row as usize) {
            Some(rank) => Ok(*rank),
            None => bail!("rank should be within 0..BOARD_WIDTH, got {row}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// Directions on the board from a perspective of White player.
///
/// Traditionally those are North (Up), West (Left), East (Right), South (Down)
/// and their combinations. However, using cardinal directions is confusing,
/// hence they are replaced by relative directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::EnumIter)]
pub enum Direction {
    /// Also known as North-West.
    UpLeft,
    /// Also known as North.
    Up,
    /// Also known as North-East.
    UpRight,
    /// Also known as East.
    Right,
    /// Also known as West.
    Left,
    /// Also known as South-West.
    DownLeft,
    /// Also known as South.
    Down,
    /// Also known as South-East.
    DownRight,
}

impl Direction {
    /// 0x88 index delta of a single step.
    #[must_use]
    pub const fn offset(self) -> i16 {
        match self {
            Self::UpLeft => RANK_STRIDE - 1,
            Self::Up => RANK_STRIDE,
            Self::UpRight => RANK_STRIDE + 1,
            Self::Right => 1,
            Self::Left => -1,
            Self::DownLeft => -RANK_STRIDE - 1,
            Self::Down => -RANK_STRIDE,
            Self::DownRight => -RANK_STRIDE + 1,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::UpLeft => Self::DownRight,
            Self::Up => Self::Down,
            Self::UpRight => Self::DownLeft,
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::DownLeft => Self::UpRight,
            Self::Down => Self::Up,
            Self::DownRight => Self::UpLeft,
        }
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(player: &str) -> anyhow::Result<Self> {
        match player {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("player should be 'w' or 'b', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard [chess pieces]. The discriminant is the magnitude of the signed
/// piece code (see [`Piece::code`]).
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[repr(i8)]
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
pub enum PieceKind {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl TryFrom<u8> for PieceKind {
    type Error = anyhow::Error;

    fn try_from(magnitude: u8) -> anyhow::Result<Self> {
        match magnitude {
            1 => Ok(Self::Pawn),
            2 => Ok(Self::Knight),
            3 => Ok(Self::Bishop),
            4 => Ok(Self::Rook),
            5 => Ok(Self::Queen),
            6 => Ok(Self::King),
            _ => bail!("piece kind should be within 1..=6, got {magnitude}"),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        })
    }
}

/// Represents a specific piece owned by a player.
///
/// The compact encoding used by the rest of the engine is a signed code: the
/// magnitude is the [`PieceKind`] discriminant, White pieces are positive,
/// Black pieces are negative and 0 is an empty square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self { owner, kind }
    }

    /// Returns the signed piece code.
    ///
    /// ```
    /// use ox88::chess::core::{Piece, PieceKind, Player};
    ///
    /// assert_eq!(Piece::new(Player::White, PieceKind::Rook).code(), 4);
    /// assert_eq!(Piece::new(Player::Black, PieceKind::King).code(), -6);
    /// ```
    #[must_use]
    pub const fn code(self) -> i8 {
        match self.owner {
            Player::White => self.kind as i8,
            Player::Black => -(self.kind as i8),
        }
    }

    /// Same as [`Piece::code`] with 0 for an empty square.
    #[must_use]
    pub fn encode(piece: Option<Self>) -> i8 {
        piece.map_or(0, Self::code)
    }

    /// Decodes a signed piece code. 0 decodes to an empty square.
    ///
    /// # Errors
    ///
    /// If the magnitude of `code` is not a known [`PieceKind`].
    pub fn from_code(code: i8) -> anyhow::Result<Option<Self>> {
        if code == 0 {
            return Ok(None);
        }
        let owner = if code > 0 {
            Player::White
        } else {
            Player::Black
        };
        Ok(Some(Self::new(owner, PieceKind::try_from(code.unsigned_abs())?)))
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    /// Parses FEN piece symbol: uppercase for White, lowercase for Black.
    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let kind = match symbol.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        };
        let owner = if symbol.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        Ok(Self::new(owner, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        // White player: uppercase symbols.
        f.write_char(match self.owner {
            Player::White => symbol.to_ascii_uppercase(),
            Player::Black => symbol,
        })
    }
}

bitflags::bitflags! {
    /// Track the ability to [castle] each side (kingside is often referred to
    /// as O-O or h-side castle, queenside -- O-O-O or a-side castle). When the
    /// king moves, player loses ability to castle both sides. When the rook
    /// moves, player loses ability to castle its corresponding side.
    ///
    /// The bits are ordered the same way as the FEN symbols (`KQkq`), from
    /// the most significant to the least significant one.
    ///
    /// [castle]: https://www.chessprogramming.org/Castling
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CastleRights : u8 {
        #[allow(missing_docs)]
        const WHITE_SHORT = 0b1000;
        #[allow(missing_docs)]
        const WHITE_LONG = 0b0100;
        #[allow(missing_docs)]
        const WHITE_BOTH = Self::WHITE_SHORT.bits() | Self::WHITE_LONG.bits();
        #[allow(missing_docs)]
        const BLACK_SHORT = 0b0010;
        #[allow(missing_docs)]
        const BLACK_LONG = 0b0001;
        #[allow(missing_docs)]
        const BLACK_BOTH = Self::BLACK_SHORT.bits() | Self::BLACK_LONG.bits();
    }
}

impl CastleRights {
    /// Rights of a single player.
    #[must_use]
    pub const fn of(self, player: Player) -> Self {
        match player {
            Player::White => self.intersection(Self::WHITE_BOTH),
            Player::Black => self.intersection(Self::BLACK_BOTH),
        }
    }
}

impl TryFrom<&str> for CastleRights {
    type Error = anyhow::Error;

    /// Parses [`CastleRights`] for both players from the FEN format: either
    /// "-" or a non-empty subsequence of `KQkq`.
    ///
    /// # Errors
    ///
    /// Returns [`anyhow::Error`] if the input contains unknown symbols,
    /// repeats a symbol or lists them out of order.
    fn try_from(input: &str) -> anyhow::Result<Self> {
        if input == "-" {
            return Ok(Self::empty());
        }
        if input.is_empty() {
            bail!("castle rights can not be empty");
        }
        let mut rights = Self::empty();
        // Symbols come in the order of decreasing bits.
        let mut previous = u8::MAX;
        for symbol in input.chars() {
            let right = match symbol {
                'K' => Self::WHITE_SHORT,
                'Q' => Self::WHITE_LONG,
                'k' => Self::BLACK_SHORT,
                'q' => Self::BLACK_LONG,
                _ => bail!("unknown castle rights: {input}"),
            };
            if right.bits() >= previous {
                bail!("castle rights should follow KQkq order, got {input}");
            }
            previous = right.bits();
            rights |= right;
        }
        Ok(rights)
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_char('-');
        }
        for (right, symbol) in [
            (Self::WHITE_SHORT, 'K'),
            (Self::WHITE_LONG, 'Q'),
            (Self::BLACK_SHORT, 'k'),
            (Self::BLACK_LONG, 'q'),
        ] {
            if self.contains(right) {
                f.write_char(symbol)?;
            }
        }
        Ok(())
    }
}

/// A pawn can be promoted to a queen, rook, bishop or a knight.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl From<Promotion> for PieceKind {
    fn from(promotion: Promotion) -> Self {
        match promotion {
            Promotion::Queen => Self::Queen,
            Promotion::Rook => Self::Rook,
            Promotion::Bishop => Self::Bishop,
            Promotion::Knight => Self::Knight,
        }
    }
}

impl From<Promotion> for MoveFlags {
    fn from(promotion: Promotion) -> Self {
        match promotion {
            Promotion::Queen => Self::QUEEN_PROMOTION,
            Promotion::Rook => Self::ROOK_PROMOTION,
            Promotion::Bishop => Self::BISHOP_PROMOTION,
            Promotion::Knight => Self::KNIGHT_PROMOTION,
        }
    }
}

#[cfg(test)]
mod test {
    use std::mem::size_of;

    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn rank() {
        assert_eq!(
            ('0'..='9')
                .filter_map(|ch| Rank::try_from(ch).ok())
                .collect::<Vec<Rank>>(),
            Rank::iter().collect::<Vec<_>>()
        );
        assert_eq!(
            (0..=BOARD_WIDTH)
                .filter_map(|idx| Rank::try_from(idx).ok())
                .collect::<Vec<Rank>>(),
            vec![
                Rank::One,
                Rank::Two,
                Rank::Three,
                Rank::Four,
                Rank::Five,
                Rank::Six,
                Rank::Seven,
                Rank::Eight,
            ]
        );
        assert_eq!(Rank::backrank(Player::Black), Rank::Eight);
        assert_eq!(Rank::pawns_starting(Player::White), Rank::Two);
    }

    #[test]
    #[should_panic(expected = "rank should be within '1'..='8', got '9'")]
    fn rank_from_incorrect_char() {
        let _ = Rank::try_from('9').unwrap();
    }

    #[test]
    #[should_panic(expected = "rank should be within 0..BOARD_WIDTH, got 8")]
    fn rank_from_incorrect_index() {
        let _ = Rank::try_from(BOARD_WIDTH).unwrap();
    }

    #[test]
    fn file() {
        assert_eq!(
            ('a'..='i')
                .filter_map(|ch| File::try_from(ch).ok())
                .collect::<Vec<File>>(),
            File::iter().collect::<Vec<_>>()
        );
        assert_eq!(File::iter().join(""), "abcdefgh");
    }

    #[test]
    #[should_panic(expected = "file should be within 'a'..='h', got 'i'")]
    fn file_from_incorrect_char() {
        let _ = File::try_from('i').unwrap();
    }

    #[test]
    #[should_panic(expected = "file should be within 0..BOARD_WIDTH, got 8")]
    fn file_from_incorrect_index() {
        let _ = File::try_from(BOARD_WIDTH).unwrap();
    }

    #[test]
    fn coordinates_round_trip() {
        for rank in 0..BOARD_WIDTH {
            for file in 0..BOARD_WIDTH {
                let square = Square::from_coordinates(rank, file).unwrap();
                assert_eq!(square.index(), 16 * i16::from(rank) + i16::from(file));
                assert!(Square::is_valid(square.index()));
                assert_eq!(square.rank() as u8, rank);
                assert_eq!(square.file() as u8, file);
            }
        }
    }

    #[test]
    #[should_panic(expected = "rank should be within 0..BOARD_WIDTH, got 8")]
    fn coordinates_out_of_range() {
        let _ = Square::from_coordinates(8, 0).unwrap();
    }

    #[test]
    fn padding_is_invalid() {
        for square in Square::iter() {
            assert!(!Square::is_valid(square.index() | 0x88));
            assert!(!Square::is_valid(square.index() | 0x08));
            assert!(!Square::is_valid(square.index() | 0x80));
        }
        let valid = (i16::MIN..=i16::MAX)
            .filter(|index| Square::is_valid(*index))
            .collect::<Vec<_>>();
        assert_eq!(valid, Square::iter().map(Square::index).collect::<Vec<_>>());
    }

    #[test]
    fn square_from_index() {
        let squares: Vec<_> = [0x00_i16, 0x77, 0x07, 0x10, 0x25, 0x08, 0x80, -1, 0x100]
            .iter()
            .filter_map(|index| Square::try_from(*index).ok())
            .collect();
        assert_eq!(
            squares,
            vec![Square::A1, Square::H8, Square::H1, Square::A2, Square::F3]
        );
    }

    #[test]
    #[should_panic(expected = "square index should be a valid 0x88 index, got 0x78")]
    fn square_from_padding_index() {
        let _ = Square::try_from(0x78_i16).unwrap();
    }

    #[test]
    fn square_names() {
        assert_eq!(Square::from_coordinates(0, 0).unwrap().to_string(), "a1");
        assert_eq!(Square::from_coordinates(7, 7).unwrap().to_string(), "h8");
        assert_eq!(Square::from_coordinates(5, 7).unwrap().to_string(), "h6");
        assert_eq!(Square::try_from(0x57_i16).unwrap().to_string(), "h6");
        for square in Square::iter() {
            let name = square.to_string();
            assert!(Square::is_valid_name(&name));
            assert_eq!(Square::try_from(name.as_str()).unwrap(), square);
        }
        for name in ["", "a", "a0", "a9", "i1", "A1", "a1 ", "1a", "e44"] {
            assert!(!Square::is_valid_name(name), "{name}");
            assert!(Square::try_from(name).is_err(), "{name}");
        }
    }

    #[test]
    fn primitive_size() {
        assert_eq!(size_of::<Square>(), 1);
        assert_eq!(size_of::<Option<Square>>(), 1);
        // Niche optimizations keep the board compact.
        assert_eq!(size_of::<Option<Piece>>(), size_of::<Piece>());
    }

    #[test]
    fn piece_codes() {
        for kind in PieceKind::iter() {
            for owner in [Player::White, Player::Black] {
                let piece = Piece::new(owner, kind);
                let code = piece.code();
                assert!((1..=6).contains(&code.abs()));
                assert_eq!(code < 0, owner == Player::Black);
                assert_eq!(Piece::from_code(code).unwrap(), Some(piece));
                assert_eq!(Piece::encode(Some(piece)), code);
            }
        }
        assert_eq!(Piece::from_code(0).unwrap(), None);
        assert_eq!(Piece::encode(None), 0);
        assert!(Piece::from_code(7).is_err());
        assert!(Piece::from_code(-7).is_err());
        assert!(Piece::from_code(i8::MIN).is_err());
    }

    #[test]
    fn piece_symbols() {
        assert_eq!(
            "PNBRQKpnbrqk"
                .chars()
                .map(|symbol| Piece::try_from(symbol).unwrap().code())
                .collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5, 6, -1, -2, -3, -4, -5, -6]
        );
        for symbol in "PNBRQKpnbrqk".chars() {
            assert_eq!(Piece::try_from(symbol).unwrap().to_string(), symbol.to_string());
        }
        assert_eq!(PieceKind::Knight.to_string(), "n");
    }

    #[test]
    #[should_panic(expected = "piece symbol should be within \"KQRBNPkqrbnp\", got 'x'")]
    fn unknown_piece_symbol() {
        let _ = Piece::try_from('x').unwrap();
    }

    #[test]
    fn player() {
        assert_eq!(Player::try_from("w").unwrap(), Player::White);
        assert_eq!(Player::try_from("b").unwrap(), Player::Black);
        assert!(Player::try_from("W").is_err());
        assert!(Player::try_from("white").is_err());
        assert_eq!(Player::White.opponent(), Player::Black);
        assert_eq!(Player::Black.to_string(), "b");
    }

    #[test]
    fn castle_rights() {
        assert_eq!(CastleRights::try_from("-").unwrap(), CastleRights::empty());
        assert_eq!(CastleRights::try_from("KQkq").unwrap(), CastleRights::all());
        assert_eq!(
            CastleRights::try_from("Kq").unwrap(),
            CastleRights::WHITE_SHORT | CastleRights::BLACK_LONG
        );
        assert_eq!(
            CastleRights::try_from("Qk").unwrap().of(Player::White),
            CastleRights::WHITE_LONG
        );
        for input in ["", "kK", "KK", "KQkqq", "X", "K-"] {
            assert!(CastleRights::try_from(input).is_err(), "{input}");
        }
        for input in ["-", "K", "Qkq", "KQkq", "kq"] {
            assert_eq!(CastleRights::try_from(input).unwrap().to_string(), input);
        }
    }

    #[test]
    fn promotion_kinds() {
        assert_eq!(PieceKind::from(Promotion::Knight), PieceKind::Knight);
        assert_eq!(
            MoveFlags::from(Promotion::Rook).promotion(),
            Some(PieceKind::Rook)
        );
    }

    #[test]
    fn within_board_shift() {
        let square = Square::E4;
        assert_eq!(square.shift(Direction::Left), Some(Square::D4));
        assert_eq!(square.shift(Direction::Up), Some(Square::E5));
        assert_eq!(square.shift(Direction::UpLeft), Some(Square::D5));
        assert_eq!(square.shift(Direction::UpRight), Some(Square::F5));
        assert_eq!(square.shift(Direction::Right), Some(Square::F4));
        assert_eq!(square.shift(Direction::Down), Some(Square::E3));
        assert_eq!(square.shift(Direction::DownLeft), Some(Square::D3));
        assert_eq!(square.shift(Direction::DownRight), Some(Square::F3));
        for direction in Direction::iter() {
            assert_eq!(
                square
                    .shift(direction)
                    .and_then(|next| next.shift(direction.opposite())),
                Some(square)
            );
        }
    }

    #[test]
    fn border_squares_shift_a2() {
        let square = Square::A2;
        assert_eq!(square.shift(Direction::Up), Some(Square::A3));
        assert_eq!(square.shift(Direction::UpRight), Some(Square::B3));
        assert_eq!(square.shift(Direction::Down), Some(Square::A1));
        assert_eq!(square.shift(Direction::DownRight), Some(Square::B1));
        assert_eq!(square.shift(Direction::Right), Some(Square::B2));
        for direction in [Direction::Left, Direction::UpLeft, Direction::DownLeft] {
            assert_eq!(square.shift(direction), None);
        }
    }

    #[test]
    fn border_squares_shift_h6() {
        let square = Square::H6;
        assert_eq!(square.shift(Direction::Left), Some(Square::G6));
        assert_eq!(square.shift(Direction::Up), Some(Square::H7));
        assert_eq!(square.shift(Direction::UpLeft), Some(Square::G7));
        assert_eq!(square.shift(Direction::Down), Some(Square::H5));
        assert_eq!(square.shift(Direction::DownLeft), Some(Square::G5));
        for direction in [Direction::UpRight, Direction::DownRight, Direction::Right] {
            assert_eq!(square.shift(direction), None);
        }
    }

    #[test]
    fn corner_squares_shift() {
        for (square, inside) in [
            (Square::A1, [Direction::Up, Direction::UpRight, Direction::Right]),
            (Square::A8, [Direction::Down, Direction::DownRight, Direction::Right]),
            (Square::H8, [Direction::Down, Direction::DownLeft, Direction::Left]),
            (Square::H1, [Direction::Up, Direction::UpLeft, Direction::Left]),
        ] {
            for direction in Direction::iter() {
                assert_eq!(
                    square.shift(direction).is_some(),
                    inside.contains(&direction),
                    "{square} {direction:?}"
                );
            }
        }
    }

    #[test]
    fn offset_far_off_board() {
        assert_eq!(Square::A1.offset(i16::MAX), None);
        assert_eq!(Square::H8.offset(i16::MIN), None);
        assert_eq!(Square::A1.offset(0x77), Some(Square::H8));
        // Knight jump from b1.
        assert_eq!(Square::B1.offset(2 * RANK_STRIDE + 1), Some(Square::C3));
        assert_eq!(Square::B1.offset(RANK_STRIDE - 2), None);
    }
}
