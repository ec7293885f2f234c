//! Move representation and its coordinate notation.

use anyhow::{bail, Context};

use crate::chess::core::{PieceKind, Square};

bitflags::bitflags! {
    /// More information about [`Move`] that makes it possible to make that move
    /// and dump it in human-readable format.
    ///
    /// Apart from the "regular" or "quiet" moves (simply moving a piece from
    /// one square to the other), there are few important rules:
    ///
    /// - [En passant] is a capture of opponent's pawn "in passing" (when it
    ///   advances two squares from its original position).
    /// - The [Castle] move that will involve a king and a rook "jumping" over
    ///   each other. Technically, castling is a king move, so `from` and `to`
    ///   move squares will correspond to the king.
    ///
    /// The values resemble a common [Move Encoding] technique:
    ///
    /// | Index | Promotion | Capture | MSB Special | LSB Special | Move Kind |
    /// | ----- | --------- | ------- | ----------- | ----------- | --------- |
    /// | 0  | 0 | 0 | 0 | 0 | Quiet move |
    /// | 1  | 0 | 0 | 0 | 1 | Double pawn push |
    /// | 2  | 0 | 0 | 1 | 0 | Kingside castle (short castle or O-O) |
    /// | 3  | 0 | 0 | 1 | 1 | Queenside castle (long castle or O-O-O) |
    /// | 4  | 0 | 1 | 0 | 0 | Capture |
    /// | 5  | 0 | 1 | 0 | 1 | En Passant capture |
    /// | 8  | 1 | 0 | 0 | 0 | Knight promotion |
    /// | 9  | 1 | 0 | 0 | 1 | Bishop promotion |
    /// | 10 | 1 | 0 | 1 | 0 | Rook promotion |
    /// | 11 | 1 | 0 | 1 | 1 | Queen promotion |
    /// | 12 | 1 | 1 | 0 | 0 | Capture and knight promotion |
    /// | 13 | 1 | 1 | 0 | 1 | Capture and bishop promotion |
    /// | 14 | 1 | 1 | 1 | 0 | Capture and rook promotion |
    /// | 15 | 1 | 1 | 1 | 1 | Capture and queen promotion |
    ///
    /// A quiet move has no flags: [`MoveFlags::empty()`].
    ///
    /// [Castle]: https://en.wikipedia.org/wiki/Castling
    /// [En passant]: https://en.wikipedia.org/wiki/En_passant
    /// [Move Encoding]: https://www.chessprogramming.org/Encoding_Moves
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MoveFlags: u8 {
        /// Implementation detail.
        const LSB_SPECIAL = 0b0001;
        /// Implementation detail.
        const MSB_SPECIAL = 0b0010;

        /// Pawn advancement by 2 squares from the original rank (second for
        /// white and seventh for black).
        const DOUBLE_PAWN_PUSH = Self::LSB_SPECIAL.bits();
        /// Short castle or O-O.
        const KINGSIDE_CASTLE = Self::MSB_SPECIAL.bits();
        /// Long castle or O-O-O.
        const QUEENSIDE_CASTLE = Self::MSB_SPECIAL.bits() | Self::LSB_SPECIAL.bits();

        /// Moves that changes the material balance.
        const CAPTURE = 0b0100;
        /// Capturing a pawn that has just been pushed by two squares.
        const EN_PASSANT = Self::CAPTURE.bits() | Self::LSB_SPECIAL.bits();

        /// Pawn move to the opponent's "home" rank and promotion to a queen
        /// (often a default option), knight, bishop or rook.
        const PROMOTION = 0b1000;

        /// Pawn promotion to [`PieceKind::Knight`].
        const KNIGHT_PROMOTION = Self::PROMOTION.bits();
        /// Pawn promotion to [`PieceKind::Bishop`].
        const BISHOP_PROMOTION = Self::PROMOTION.bits() | Self::LSB_SPECIAL.bits();
        /// Pawn promotion to [`PieceKind::Rook`].
        const ROOK_PROMOTION = Self::PROMOTION.bits() | Self::MSB_SPECIAL.bits();
        /// Pawn promotion to [`PieceKind::Queen`].
        const QUEEN_PROMOTION = Self::PROMOTION.bits()
            | Self::MSB_SPECIAL.bits()
            | Self::LSB_SPECIAL.bits();

        /// Pawn capture and promotion to [`PieceKind::Knight`].
        const CAPTURE_KNIGHT_PROMOTION = Self::CAPTURE.bits() | Self::KNIGHT_PROMOTION.bits();
        /// Pawn capture and promotion to [`PieceKind::Bishop`].
        const CAPTURE_BISHOP_PROMOTION = Self::CAPTURE.bits() | Self::BISHOP_PROMOTION.bits();
        /// Pawn capture and promotion to [`PieceKind::Rook`].
        const CAPTURE_ROOK_PROMOTION = Self::CAPTURE.bits() | Self::ROOK_PROMOTION.bits();
        /// Pawn capture and promotion to [`PieceKind::Queen`].
        const CAPTURE_QUEEN_PROMOTION = Self::CAPTURE.bits() | Self::QUEEN_PROMOTION.bits();
    }
}

impl MoveFlags {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self.contains(Self::CAPTURE)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.contains(Self::PROMOTION)
    }

    /// Returns the piece a pawn is promoted to, if this is a promotion.
    #[must_use]
    pub const fn promotion(self) -> Option<PieceKind> {
        if !self.is_promotion() {
            return None;
        }
        match (
            self.contains(Self::MSB_SPECIAL),
            self.contains(Self::LSB_SPECIAL),
        ) {
            (false, false) => Some(PieceKind::Knight),
            (false, true) => Some(PieceKind::Bishop),
            (true, false) => Some(PieceKind::Rook),
            (true, true) => Some(PieceKind::Queen),
        }
    }
}

/// A move of a piece from one square to another with optional [`MoveFlags`].
///
/// The move does not know anything about the position it is played in: it is
/// not checked for legality. The only guarantee is that it changes the board,
/// i.e. `from` and `to` are different squares.
///
/// The [coordinate notation] (also used by UCI) is produced by
/// [`Move::to_coordinate_notation`]:
///
/// ```
/// use ox88::chess::core::Square;
/// use ox88::chess::moves::Move;
///
/// let knight_jump = Move::new(Square::A1, Square::C2).unwrap();
/// assert_eq!(knight_jump.to_coordinate_notation().unwrap(), "a1c2");
/// ```
///
/// [coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
// TODO: Parse moves from coordinate notation once UCI "position ... moves" is
// supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    flags: MoveFlags,
}

impl Move {
    /// Creates a quiet move.
    ///
    /// # Errors
    ///
    /// If `from` and `to` are the same square.
    pub fn new(from: Square, to: Square) -> anyhow::Result<Self> {
        Self::with_flags(from, to, MoveFlags::empty())
    }

    /// Creates a move with given flags.
    ///
    /// # Errors
    ///
    /// If `from` and `to` are the same square.
    pub fn with_flags(from: Square, to: Square, flags: MoveFlags) -> anyhow::Result<Self> {
        if from == to {
            bail!("invalid move: source and destination should differ, got {from}{to}");
        }
        Ok(Self { from, to, flags })
    }

    /// Creates a move from raw 0x88 indices.
    ///
    /// # Errors
    ///
    /// If either index is not on the board or both of them are the same.
    pub fn from_indices(from: i16, to: i16, flags: MoveFlags) -> anyhow::Result<Self> {
        let from = Square::try_from(from).context("invalid move source")?;
        let to = Square::try_from(to).context("invalid move destination")?;
        Self::with_flags(from, to, flags)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn from(self) -> Square {
        self.from
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn to(self) -> Square {
        self.to
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn flags(self) -> MoveFlags {
        self.flags
    }

    /// Serializes the move in pure coordinate notation: source square name
    /// followed by destination square name, e.g. "e2e4".
    ///
    /// # Errors
    ///
    /// Promotions are not supported yet: the promoted piece symbol would be
    /// lost, so such moves are rejected instead of being truncated.
    pub fn to_coordinate_notation(self) -> anyhow::Result<String> {
        if let Some(kind) = self.flags.promotion() {
            bail!(
                "coordinate notation for promotions is not implemented, got {}{} promoting to {kind:?}",
                self.from,
                self.to
            );
        }
        Ok(format!("{}{}", self.from, self.to))
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::core::Promotion;

    #[test]
    fn coordinate_notation() {
        let from = Square::from_coordinates(0, 0).unwrap();
        let to = Square::from_coordinates(1, 2).unwrap();
        assert_eq!(
            Move::new(from, to).unwrap().to_coordinate_notation().unwrap(),
            "a1c2"
        );
        assert_eq!(
            Move::with_flags(Square::E2, Square::E4, MoveFlags::DOUBLE_PAWN_PUSH)
                .unwrap()
                .to_coordinate_notation()
                .unwrap(),
            "e2e4"
        );
        assert_eq!(
            Move::with_flags(Square::E1, Square::G1, MoveFlags::KINGSIDE_CASTLE)
                .unwrap()
                .to_coordinate_notation()
                .unwrap(),
            "e1g1"
        );
        assert_eq!(
            Move::from_indices(0x64, 0x53, MoveFlags::CAPTURE)
                .unwrap()
                .to_coordinate_notation()
                .unwrap(),
            "e7d6"
        );
    }

    #[test]
    fn accessors() {
        let capture = Move::with_flags(Square::D5, Square::E6, MoveFlags::EN_PASSANT).unwrap();
        assert_eq!(capture.from(), Square::D5);
        assert_eq!(capture.to(), Square::E6);
        assert!(capture.flags().is_capture());
        assert!(!capture.flags().is_promotion());
        assert_eq!(capture.flags().promotion(), None);
    }

    #[test]
    #[should_panic(expected = "invalid move: source and destination should differ, got e4e4")]
    fn null_move() {
        let _ = Move::new(Square::E4, Square::E4).unwrap();
    }

    #[test]
    fn moves_from_invalid_indices() {
        assert!(Move::from_indices(0x00, 0x00, MoveFlags::empty()).is_err());
        assert!(Move::from_indices(0x08, 0x00, MoveFlags::empty()).is_err());
        assert!(Move::from_indices(0x00, 0x88, MoveFlags::empty()).is_err());
        assert!(Move::from_indices(-1, 0x00, MoveFlags::empty()).is_err());
        assert!(Move::from_indices(0x00, 0x12, MoveFlags::empty()).is_ok());
    }

    #[test]
    #[should_panic(expected = "coordinate notation for promotions is not implemented")]
    fn promotion_is_not_rendered() {
        let promotion =
            Move::with_flags(Square::H7, Square::H8, MoveFlags::QUEEN_PROMOTION).unwrap();
        let _ = promotion.to_coordinate_notation().unwrap();
    }

    #[test]
    fn promotion_kinds() {
        for (promotion, kind) in [
            (Promotion::Knight, PieceKind::Knight),
            (Promotion::Bishop, PieceKind::Bishop),
            (Promotion::Rook, PieceKind::Rook),
            (Promotion::Queen, PieceKind::Queen),
        ] {
            let flags = MoveFlags::from(promotion);
            assert_eq!(flags.promotion(), Some(kind));
            assert_eq!((flags | MoveFlags::CAPTURE).promotion(), Some(kind));
            assert!(Move::with_flags(Square::B7, Square::A8, flags | MoveFlags::CAPTURE)
                .unwrap()
                .to_coordinate_notation()
                .is_err());
        }
        assert_eq!(
            MoveFlags::CAPTURE_ROOK_PROMOTION.promotion(),
            Some(PieceKind::Rook)
        );
        assert_eq!(MoveFlags::QUEENSIDE_CASTLE.promotion(), None);
    }
}
