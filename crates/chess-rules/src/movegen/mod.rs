//! Legal move generation.
//!
//! [`analyze`] computes everything the side to move needs in one pass:
//! the squares the enemy attacks, whether the king is in (double) check,
//! which own pieces are pinned and along which axis, and finally the list of
//! legal moves. No move is ever tried and taken back; pins and check masks
//! make every generated move legal by construction.

mod attacks;

use crate::castling::{castle_move, CastleSide, CastlingRights};
use crate::Board;
use chess_core::{Bitboard, Color, Direction, Move, Piece, PieceKind};

/// A list of legal moves.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    #[inline]
    pub const fn new() -> Self {
        MoveList { moves: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        MoveList {
            moves: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Copies the moves out, for callers that mutate the game while iterating.
    pub fn to_vec(&self) -> Vec<Move> {
        self.moves.clone()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.moves.clear();
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// A line through the king along which an own piece can be pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinAxis {
    Horizontal = 0,
    Vertical = 1,
    /// The a1-h8 direction.
    DiagonalPositive = 2,
    /// The a8-h1 direction.
    DiagonalNegative = 3,
}

impl PinAxis {
    pub const ALL: [PinAxis; 4] = [
        PinAxis::Horizontal,
        PinAxis::Vertical,
        PinAxis::DiagonalPositive,
        PinAxis::DiagonalNegative,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The two directions running along this axis.
    pub const fn directions(self) -> &'static [Direction; 2] {
        match self {
            PinAxis::Horizontal => &Direction::HORIZONTAL,
            PinAxis::Vertical => &Direction::VERTICAL,
            PinAxis::DiagonalPositive => &Direction::DIAGONAL_POSITIVE,
            PinAxis::DiagonalNegative => &Direction::DIAGONAL_NEGATIVE,
        }
    }

    /// The axis `dir` runs along; `None` for knight jumps.
    pub const fn of(dir: Direction) -> Option<PinAxis> {
        match dir {
            Direction::East | Direction::West => Some(PinAxis::Horizontal),
            Direction::North | Direction::South => Some(PinAxis::Vertical),
            Direction::NorthEast | Direction::SouthWest => Some(PinAxis::DiagonalPositive),
            Direction::NorthWest | Direction::SouthEast => Some(PinAxis::DiagonalNegative),
            _ => None,
        }
    }

    /// True for the two straight axes rooks move along.
    #[inline]
    pub const fn is_straight(self) -> bool {
        matches!(self, PinAxis::Horizontal | PinAxis::Vertical)
    }

    /// The enemy slider kind, besides the queen, that attacks along this axis.
    #[inline]
    const fn slider(self) -> PieceKind {
        if self.is_straight() {
            PieceKind::Rook
        } else {
            PieceKind::Bishop
        }
    }
}

/// Everything known about a position from the side to move's point of view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    moves: MoveList,
    threatened: Bitboard,
    movable: Bitboard,
    pins: [Bitboard; 4],
    all_pins: Bitboard,
    check: bool,
    double_check: bool,
}

impl Analysis {
    /// All legal moves.
    #[inline]
    pub fn moves(&self) -> &MoveList {
        &self.moves
    }

    /// Squares attacked by the enemy, seen through the own king.
    #[inline]
    pub fn threatened(&self) -> Bitboard {
        self.threatened
    }

    /// Squares a non-king piece may move to.
    ///
    /// Outside check this is every square not holding an own piece. In check
    /// it shrinks to the checker and, for a slider, the squares between it
    /// and the king.
    #[inline]
    pub fn movable(&self) -> Bitboard {
        self.movable
    }

    /// Union of all pin rays.
    #[inline]
    pub fn pins(&self) -> Bitboard {
        self.all_pins
    }

    /// Pin rays along one axis, each running from the square next to the
    /// king up to and including the pinning slider.
    #[inline]
    pub fn pin_on(&self, axis: PinAxis) -> Bitboard {
        self.pins[axis.index()]
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.check
    }

    #[inline]
    pub fn is_double_check(&self) -> bool {
        self.double_check
    }

    pub(crate) fn clear_moves(&mut self) {
        self.moves.clear();
    }
}

/// Analyses the position for `side` and generates its legal moves.
///
/// `en_passant` is the target square left by the previous double push, or
/// empty.
pub fn analyze(
    board: &Board,
    side: Color,
    castling: CastlingRights,
    en_passant: Bitboard,
) -> Analysis {
    let mut generator = Generator::new(board, side, castling, en_passant);
    generator.find_threats();
    generator.find_pins();
    generator.generate();
    generator.finish()
}

/// Working state of one [`analyze`] call.
struct Generator<'a> {
    board: &'a Board,
    side: Color,
    castling: CastlingRights,
    king: Bitboard,
    own: Bitboard,
    enemy: Bitboard,
    unoccupied: Bitboard,
    en_passant: Bitboard,
    threatened: Bitboard,
    movable: Bitboard,
    pins: [Bitboard; 4],
    all_pins: Bitboard,
    check: bool,
    double_check: bool,
    moves: MoveList,
}

impl<'a> Generator<'a> {
    fn new(
        board: &'a Board,
        side: Color,
        castling: CastlingRights,
        en_passant: Bitboard,
    ) -> Self {
        let enemy = board.team(side.opposite());
        let unoccupied = board.unoccupied();
        Generator {
            board,
            side,
            castling,
            king: board.pieces(Piece::new(PieceKind::King, side)),
            own: board.team(side),
            enemy,
            unoccupied,
            en_passant,
            threatened: Bitboard::EMPTY,
            movable: enemy | unoccupied,
            pins: [Bitboard::EMPTY; 4],
            all_pins: Bitboard::EMPTY,
            check: false,
            double_check: false,
            moves: MoveList::with_capacity(64),
        }
    }

    fn finish(self) -> Analysis {
        Analysis {
            moves: self.moves,
            threatened: self.threatened,
            movable: self.movable,
            pins: self.pins,
            all_pins: self.all_pins,
            check: self.check,
            double_check: self.double_check,
        }
    }

    #[inline]
    fn own_pieces(&self, kind: PieceKind) -> Bitboard {
        self.board.pieces(Piece::new(kind, self.side))
    }

    #[inline]
    fn enemy_pieces(&self, kind: PieceKind) -> Bitboard {
        self.board.pieces(Piece::new(kind, self.side.opposite()))
    }

    fn generate(&mut self) {
        if !self.double_check {
            if !self.check {
                self.generate_castles();
            }
            self.generate_pawn_moves();
            self.generate_knight_moves();
            for kind in [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen] {
                self.generate_slider_moves(kind);
            }
        }
        self.generate_king_moves();
    }

    fn generate_castles(&mut self) {
        for side in CastleSide::ALL {
            let castle = castle_move(self.board, self.side, side, self.castling, self.threatened);
            if let Some(m) = castle {
                self.moves.push(m);
            }
        }
    }

    /// Quiet move or capture of whatever enemy piece stands on `to`.
    fn push_step(&mut self, piece: Piece, from: Bitboard, to: Bitboard) {
        let m = match self.board.piece_at_from_team(to, self.side.opposite()) {
            Some(captured) => Move::capture(from, to, piece, captured),
            None => Move::quiet(from, to, piece),
        };
        self.moves.push(m);
    }

    fn push_pawn_arrival(&mut self, from: Bitboard, to: Bitboard, captured: Option<Piece>) {
        let pawn = Piece::new(PieceKind::Pawn, self.side);
        if to.intersects(self.side.promotion_rank()) {
            for kind in PieceKind::PROMOTIONS {
                let promoted = Piece::new(kind, self.side);
                self.moves
                    .push(Move::promotion(from, to, pawn, promoted, captured));
            }
        } else {
            let m = match captured {
                Some(captured) => Move::capture(from, to, pawn, captured),
                None => Move::quiet(from, to, pawn),
            };
            self.moves.push(m);
        }
    }

    fn generate_pawn_moves(&mut self) {
        let pawn = Piece::new(PieceKind::Pawn, self.side);
        let pawns = self.own_pieces(PieceKind::Pawn);
        let forward = self.side.forward();
        let backward = self.side.backward();
        let targets = self.unoccupied & self.movable;

        // Only a vertical pin leaves a pawn free to push.
        let pushable = pawns & !(self.all_pins ^ self.pins[PinAxis::Vertical.index()]);
        for from in (pushable & targets.directional_shift(backward)).singles() {
            self.push_pawn_arrival(from, from.directional_shift(forward), None);
        }

        let double_pushable = pushable
            & self.side.pawn_start_rank()
            & (self.unoccupied & targets.directional_shift(backward)).directional_shift(backward);
        for from in double_pushable.singles() {
            let skipped = from.directional_shift(forward);
            let to = skipped.directional_shift(forward);
            self.moves.push(Move::double_push(from, to, pawn, skipped));
        }

        for dir in self.side.pawn_attack_directions() {
            let Some(axis) = PinAxis::of(dir) else {
                continue;
            };
            let capable = pawns & !(self.all_pins ^ self.pins[axis.index()]);
            let destinations = capable.directional_shift_bounded(dir)
                & ((self.movable & self.enemy) | self.en_passant);
            for to in destinations.singles() {
                let from = to.opposite_directional_shift(dir);
                if to == self.en_passant {
                    self.push_en_passant(from, to);
                } else if let Some(captured) =
                    self.board.piece_at_from_team(to, self.side.opposite())
                {
                    self.push_pawn_arrival(from, to, Some(captured));
                }
            }
        }
    }

    fn push_en_passant(&mut self, from: Bitboard, to: Bitboard) {
        let captured = Piece::new(PieceKind::Pawn, self.side.opposite());
        let captured_square = to.directional_shift(self.side.backward());
        if !self.board.pieces(captured).intersects(captured_square) {
            return;
        }
        let resolves = self.movable.intersects(to | captured_square);
        if resolves && !self.en_passant_exposes_king(from, to, captured_square) {
            let pawn = Piece::new(PieceKind::Pawn, self.side);
            self.moves
                .push(Move::en_passant(from, to, pawn, captured, captured_square));
        }
    }

    /// True if the capture uncovers an enemy slider on any line through the
    /// king. The two pawns leave their squares and the landing square fills.
    fn en_passant_exposes_king(
        &self,
        from: Bitboard,
        to: Bitboard,
        captured_square: Bitboard,
    ) -> bool {
        let area = (self.unoccupied | from | captured_square) & !to;
        let queens = self.enemy_pieces(PieceKind::Queen);
        PinAxis::ALL.into_iter().any(|axis| {
            let sliders = queens | self.enemy_pieces(axis.slider());
            axis.directions().iter().any(|&dir| {
                let line = self.king.fill(dir, area);
                line.directional_shift_bounded(dir).intersects(sliders)
            })
        })
    }

    fn generate_knight_moves(&mut self) {
        let knight = Piece::new(PieceKind::Knight, self.side);
        let knights = self.own_pieces(PieceKind::Knight) & !self.all_pins;
        for from in knights.singles() {
            for dir in Direction::L_SHAPES {
                let to = from.directional_shift_bounded_within(dir, self.movable);
                if to.is_not_empty() {
                    self.push_step(knight, from, to);
                }
            }
        }
    }

    fn generate_slider_moves(&mut self, kind: PieceKind) {
        let piece = Piece::new(kind, self.side);
        for from in self.own_pieces(kind).singles() {
            for &dir in self.slider_directions(kind, from) {
                let reach = from.fill(dir, self.unoccupied);
                for to in ((reach ^ from) & self.movable).singles() {
                    self.moves.push(Move::quiet(from, to, piece));
                }
                let hit = reach.directional_shift_bounded(dir) & self.enemy & self.movable;
                if hit.is_not_empty() {
                    self.push_step(piece, from, hit);
                }
            }
        }
    }

    /// Directions a slider on `from` may move in, honouring its pin.
    fn slider_directions(&self, kind: PieceKind, from: Bitboard) -> &'static [Direction] {
        let pinned_on = PinAxis::ALL
            .into_iter()
            .find(|axis| self.pins[axis.index()].intersects(from));
        match (kind, pinned_on) {
            (PieceKind::Bishop, None) => &Direction::DIAGONAL,
            (PieceKind::Rook, None) => &Direction::CARDINAL,
            (PieceKind::Queen, None) => &Direction::EVERY_DIRECTION,
            (PieceKind::Queen, Some(axis)) => axis.directions(),
            (_, Some(axis)) if axis.slider() == kind => axis.directions(),
            _ => &[],
        }
    }

    fn generate_king_moves(&mut self) {
        let king = Piece::new(PieceKind::King, self.side);
        let targets = (self.unoccupied | self.enemy) & !self.threatened;
        for dir in Direction::EVERY_DIRECTION {
            let to = self.king.directional_shift_bounded_within(dir, targets);
            if to.is_not_empty() {
                self.push_step(king, self.king, to);
            }
        }
    }
}
