//! Piece placement as fifteen bitboards.
//!
//! The [`Board`] keeps one bitboard per slot code: one for each colored piece,
//! one per team holding the union of that team's pieces, and one for the
//! unoccupied squares. Every square is in exactly one of the twelve piece sets
//! or the unoccupied set.

use chess_core::{Bitboard, Color, FenError, FenParser, Move, MoveKind, Piece, PieceKind, Square};
use std::fmt;

/// Piece placement of a position.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    slots: [Bitboard; Piece::SLOTS],
}

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        let mut slots = [Bitboard::EMPTY; Piece::SLOTS];
        slots[Piece::UNOCCUPIED_SLOT] = Bitboard::FULL;
        Board { slots }
    }

    /// The standard starting placement.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            let (back_rank, pawn_rank) = match color {
                Color::White => (Bitboard::RANK_1, Bitboard::RANK_2),
                Color::Black => (Bitboard::RANK_8, Bitboard::RANK_7),
            };
            let placement = [
                (PieceKind::Rook, Bitboard::FILE_A | Bitboard::FILE_H),
                (PieceKind::Knight, Bitboard::FILE_B | Bitboard::FILE_G),
                (PieceKind::Bishop, Bitboard::FILE_C | Bitboard::FILE_F),
                (PieceKind::Queen, Bitboard::FILE_D),
                (PieceKind::King, Bitboard::FILE_E),
            ];
            for (kind, files) in placement {
                board.add_piece(Piece::new(kind, color), files & back_rank);
            }
            board.add_piece(Piece::new(PieceKind::Pawn, color), pawn_rank);
        }
        board
    }

    /// Builds a board from the FEN piece placement field.
    pub fn from_fen(placement: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        for (square, piece) in FenParser::parse_placement(placement)? {
            board.add_piece(piece, Bitboard::from_square(square));
        }
        Ok(board)
    }

    /// Writes the FEN piece placement field.
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(71);
        for rank in (0..8u8).rev() {
            let mut empty_run = 0;
            for file in 0..8u8 {
                let piece = Square::new(file, rank)
                    .and_then(|sq| self.piece_at(Bitboard::from_square(sq)));
                match piece {
                    Some(piece) => {
                        if empty_run > 0 {
                            fen.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                fen.push_str(&empty_run.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }
        fen
    }

    /// Squares holding the given piece.
    #[inline]
    pub fn pieces(&self, piece: Piece) -> Bitboard {
        self.slots[piece.index()]
    }

    /// Squares holding any piece of `color`.
    #[inline]
    pub fn team(&self, color: Color) -> Bitboard {
        self.slots[color.team_slot()]
    }

    #[inline]
    pub fn unoccupied(&self) -> Bitboard {
        self.slots[Piece::UNOCCUPIED_SLOT]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        !self.unoccupied()
    }

    /// Places `piece` on every square of `bits`; the squares must be empty.
    pub fn add_piece(&mut self, piece: Piece, bits: Bitboard) {
        debug_assert!(self.unoccupied().contains_all(bits));
        self.slots[piece.index()] |= bits;
        self.slots[piece.color().team_slot()] |= bits;
        self.slots[Piece::UNOCCUPIED_SLOT] &= !bits;
    }

    /// Lifts `piece` off every square of `bits`; it must stand on all of them.
    pub fn remove_piece(&mut self, piece: Piece, bits: Bitboard) {
        debug_assert!(self.pieces(piece).contains_all(bits));
        self.slots[piece.index()] &= !bits;
        self.slots[piece.color().team_slot()] &= !bits;
        self.slots[Piece::UNOCCUPIED_SLOT] |= bits;
    }

    // Moves `piece` between the two squares of `squares`: one occupied by it, one empty.
    #[inline]
    fn toggle(&mut self, piece: Piece, squares: Bitboard) {
        self.slots[piece.index()] ^= squares;
        self.slots[piece.color().team_slot()] ^= squares;
        self.slots[Piece::UNOCCUPIED_SLOT] ^= squares;
    }

    /// Plays `m` on the board.
    pub fn apply_move(&mut self, m: &Move) {
        let (piece, from, to) = (m.piece(), m.from(), m.to());
        match m.kind() {
            MoveKind::Quiet | MoveKind::DoublePush { .. } => self.toggle(piece, from | to),
            MoveKind::Capture { captured } => {
                self.remove_piece(captured, to);
                self.toggle(piece, from | to);
            }
            MoveKind::EnPassant {
                captured,
                captured_square,
            } => {
                self.remove_piece(captured, captured_square);
                self.toggle(piece, from | to);
            }
            MoveKind::Promotion { promoted, captured } => {
                if let Some(captured) = captured {
                    self.remove_piece(captured, to);
                }
                self.remove_piece(piece, from);
                self.add_piece(promoted, to);
            }
            MoveKind::Castle { rook_displacement } => {
                self.toggle(piece, from | to);
                self.toggle(piece.same_team_rook(), rook_displacement);
            }
        }
        debug_assert!(self.is_consistent(), "board corrupted by {}", m);
    }

    /// Takes back `m`, which must be the last move applied.
    pub fn undo_move(&mut self, m: &Move) {
        let (piece, from, to) = (m.piece(), m.from(), m.to());
        match m.kind() {
            MoveKind::Quiet | MoveKind::DoublePush { .. } => self.toggle(piece, from | to),
            MoveKind::Capture { captured } => {
                self.toggle(piece, from | to);
                self.add_piece(captured, to);
            }
            MoveKind::EnPassant {
                captured,
                captured_square,
            } => {
                self.toggle(piece, from | to);
                self.add_piece(captured, captured_square);
            }
            MoveKind::Promotion { promoted, captured } => {
                self.remove_piece(promoted, to);
                if let Some(captured) = captured {
                    self.add_piece(captured, to);
                }
                self.add_piece(piece, from);
            }
            MoveKind::Castle { rook_displacement } => {
                self.toggle(piece.same_team_rook(), rook_displacement);
                self.toggle(piece, from | to);
            }
        }
        debug_assert!(self.is_consistent(), "board corrupted undoing {}", m);
    }

    /// The piece on the lowest square of `bits`, if any.
    pub fn piece_at(&self, bits: Bitboard) -> Option<Piece> {
        let square = bits.lsb().map(Bitboard::from_square)?;
        PIECE_SLOTS
            .iter()
            .filter_map(|&code| Piece::from_code(code))
            .find(|&piece| self.pieces(piece).intersects(square))
    }

    /// Like [`Board::piece_at`] but only considers pieces of `color`.
    pub fn piece_at_from_team(&self, bits: Bitboard, color: Color) -> Option<Piece> {
        let square = bits.lsb().map(Bitboard::from_square)?;
        if !self.team(color).intersects(square) {
            return None;
        }
        PieceKind::ALL
            .into_iter()
            .map(|kind| Piece::new(kind, color))
            .find(|&piece| self.pieces(piece).intersects(square))
    }

    /// Returns true if neither side can ever checkmate, whatever is played.
    ///
    /// Dead positions are bare kings, king and one minor piece against a bare
    /// king, and king and bishop against king and bishop with both bishops on
    /// the same square color.
    pub fn is_dead_position(&self) -> bool {
        let white = self.team(Color::White).count();
        let black = self.team(Color::Black).count();
        if white > 2 || black > 2 {
            return false;
        }
        if white == 1 && black == 1 {
            return true;
        }

        let kind = |kind| {
            self.pieces(Piece::new(kind, Color::White))
                | self.pieces(Piece::new(kind, Color::Black))
        };
        let knights = kind(PieceKind::Knight);
        let bishops = kind(PieceKind::Bishop);
        let others = self.occupied() & !kind(PieceKind::King) & !knights & !bishops;
        if others.is_not_empty() {
            return false;
        }
        if white + black == 3 {
            return true;
        }
        if knights.is_not_empty() {
            return false;
        }
        !bishops.intersects(Bitboard::DARK_SQUARES) || Bitboard::DARK_SQUARES.contains_all(bishops)
    }

    /// Checks the occupancy partition: every square in exactly one of the
    /// piece sets or the unoccupied set, and team sets equal to the union of
    /// their pieces.
    pub fn is_consistent(&self) -> bool {
        let mut covered = Bitboard::EMPTY;
        let mut teams = [Bitboard::EMPTY; 2];
        for code in PIECE_SLOTS {
            let Some(piece) = Piece::from_code(code) else {
                return false;
            };
            let bits = self.pieces(piece);
            if covered.intersects(bits) {
                return false;
            }
            covered |= bits;
            teams[piece.color().index()] |= bits;
        }
        covered ^ self.unoccupied() == Bitboard::FULL
            && !covered.intersects(self.unoccupied())
            && Color::ALL
                .into_iter()
                .all(|color| self.team(color) == teams[color.index()])
    }
}

const PIECE_SLOTS: [u8; 12] = [1, 2, 3, 4, 5, 6, 9, 10, 11, 12, 13, 14];

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "  +---+---+---+---+---+---+---+---+";
        writeln!(f, "{}", RULE)?;
        for rank in (0..8u8).rev() {
            write!(f, "{} |", rank + 1)?;
            for file in 0..8u8 {
                let piece = Square::new(file, rank)
                    .and_then(|sq| self.piece_at(Bitboard::from_square(sq)));
                let c = piece.map_or(' ', Piece::to_fen_char);
                write!(f, " {} |", c)?;
            }
            writeln!(f)?;
            writeln!(f, "{}", RULE)?;
        }
        write!(f, "    a   b   c   d   e   f   g   h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDARD_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    fn sq(name: &str) -> Bitboard {
        Bitboard::from_algebraic(name).unwrap()
    }

    fn board(placement: &str) -> Board {
        Board::from_fen(placement).unwrap()
    }

    #[test]
    fn empty_board() {
        let board = Board::empty();
        assert_eq!(board.unoccupied(), Bitboard::FULL);
        assert_eq!(board.team(Color::White), Bitboard::EMPTY);
        assert!(board.is_consistent());
    }

    #[test]
    fn standard_board() {
        let board = Board::standard();
        assert_eq!(board.to_fen(), STANDARD_PLACEMENT);
        assert_eq!(board.team(Color::White), Bitboard::RANK_1 | Bitboard::RANK_2);
        assert_eq!(board.team(Color::Black), Bitboard::RANK_7 | Bitboard::RANK_8);
        assert_eq!(board.pieces(Piece::WHITE_KING), sq("e1"));
        assert_eq!(board.pieces(Piece::BLACK_QUEEN), sq("d8"));
        assert!(board.is_consistent());
    }

    #[test]
    fn fen_roundtrip() {
        assert_eq!(Board::from_fen(&Board::standard().to_fen()), Ok(Board::standard()));
        for placement in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8",
            "8/8/8/8/8/8/8/8",
        ] {
            assert_eq!(board(placement).to_fen(), placement);
        }
    }

    #[test]
    fn malformed_placement_is_rejected() {
        assert!(matches!(
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn piece_lookup() {
        let board = Board::standard();
        assert_eq!(board.piece_at(sq("e1")), Some(Piece::WHITE_KING));
        assert_eq!(board.piece_at(sq("g8")), Some(Piece::BLACK_KNIGHT));
        assert_eq!(board.piece_at(sq("e4")), None);
        assert_eq!(board.piece_at(Bitboard::EMPTY), None);
        assert_eq!(
            board.piece_at_from_team(sq("d7"), Color::Black),
            Some(Piece::BLACK_PAWN)
        );
        assert_eq!(board.piece_at_from_team(sq("d7"), Color::White), None);
    }

    #[test]
    fn add_and_remove_piece() {
        let mut board = Board::empty();
        board.add_piece(Piece::WHITE_ROOK, sq("a1") | sq("h1"));
        assert_eq!(board.team(Color::White), sq("a1") | sq("h1"));
        assert!(board.is_consistent());
        board.remove_piece(Piece::WHITE_ROOK, sq("a1"));
        assert_eq!(board.pieces(Piece::WHITE_ROOK), sq("h1"));
        assert_eq!(board.unoccupied(), !sq("h1"));
        assert!(board.is_consistent());
    }

    fn assert_apply_undo(placement: &str, m: Move, expected: &str) {
        let mut board = board(placement);
        let original = board.clone();
        board.apply_move(&m);
        assert_eq!(board.to_fen(), expected);
        assert!(board.is_consistent());
        board.undo_move(&m);
        assert_eq!(board, original);
    }

    #[test]
    fn apply_and_undo_quiet_and_double_push() {
        assert_apply_undo(
            STANDARD_PLACEMENT,
            Move::quiet(sq("g1"), sq("f3"), Piece::WHITE_KNIGHT),
            "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R",
        );
        assert_apply_undo(
            STANDARD_PLACEMENT,
            Move::double_push(sq("e2"), sq("e4"), Piece::WHITE_PAWN, sq("e3")),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR",
        );
    }

    #[test]
    fn apply_and_undo_capture() {
        assert_apply_undo(
            "k7/8/8/3p4/4P3/8/8/7K",
            Move::capture(sq("e4"), sq("d5"), Piece::WHITE_PAWN, Piece::BLACK_PAWN),
            "k7/8/8/3P4/8/8/8/7K",
        );
    }

    #[test]
    fn apply_and_undo_en_passant() {
        assert_apply_undo(
            "k7/8/8/3Pp3/8/8/8/7K",
            Move::en_passant(sq("d5"), sq("e6"), Piece::WHITE_PAWN, Piece::BLACK_PAWN, sq("e5")),
            "k7/8/4P3/8/8/8/8/7K",
        );
    }

    #[test]
    fn apply_and_undo_promotions() {
        assert_apply_undo(
            "1r5k/P7/8/8/8/8/8/7K",
            Move::promotion(sq("a7"), sq("a8"), Piece::WHITE_PAWN, Piece::WHITE_QUEEN, None),
            "Qr5k/8/8/8/8/8/8/7K",
        );
        assert_apply_undo(
            "1r5k/P7/8/8/8/8/8/7K",
            Move::promotion(
                sq("a7"),
                sq("b8"),
                Piece::WHITE_PAWN,
                Piece::WHITE_KNIGHT,
                Some(Piece::BLACK_ROOK),
            ),
            "1N5k/8/8/8/8/8/8/7K",
        );
    }

    #[test]
    fn apply_and_undo_castles() {
        assert_apply_undo(
            "r3k2r/8/8/8/8/8/8/R3K2R",
            Move::castle(sq("e1"), sq("g1"), Piece::WHITE_KING, sq("h1") | sq("f1")),
            "r3k2r/8/8/8/8/8/8/R4RK1",
        );
        assert_apply_undo(
            "r3k2r/8/8/8/8/8/8/R3K2R",
            Move::castle(sq("e8"), sq("c8"), Piece::BLACK_KING, sq("a8") | sq("d8")),
            "2kr3r/8/8/8/8/8/8/R3K2R",
        );
    }

    #[test]
    fn dead_positions() {
        assert!(board("k7/8/8/8/8/8/8/7K").is_dead_position());
        assert!(board("k7/8/8/3n4/8/8/8/7K").is_dead_position());
        assert!(board("k7/8/8/8/3B4/8/8/7K").is_dead_position());
        // Both bishops on dark squares (a1 is dark: d4 and c7 are dark).
        assert!(board("k7/2b5/8/8/3B4/8/8/7K").is_dead_position());
    }

    #[test]
    fn live_positions() {
        // Opposite colored bishops.
        assert!(!board("k7/3b4/8/8/3B4/8/8/7K").is_dead_position());
        assert!(!board("k7/8/8/8/3R4/8/8/7K").is_dead_position());
        assert!(!board("k7/8/8/8/3P4/8/8/7K").is_dead_position());
        assert!(!board("k7/8/8/3n4/8/8/8/3R3K").is_dead_position());
        assert!(!board("k7/8/8/3n4/3N4/8/8/7K").is_dead_position());
        assert!(!board("k7/8/8/3b4/3N4/8/8/7K").is_dead_position());
        assert!(!board("k7/8/8/8/3NN3/8/8/7K").is_dead_position());
        assert!(!Board::standard().is_dead_position());
    }

    #[test]
    fn display_grid() {
        let text = Board::standard().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 18);
        assert_eq!(lines[0], "  +---+---+---+---+---+---+---+---+");
        assert_eq!(lines[1], "8 | r | n | b | q | k | b | n | r |");
        assert_eq!(lines[9], "4 |   |   |   |   |   |   |   |   |");
        assert_eq!(lines[17], "    a   b   c   d   e   f   g   h");
    }
}
