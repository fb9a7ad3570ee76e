//! Threat, check and pin detection.

use super::{Generator, PinAxis};
use chess_core::{Bitboard, Direction, PieceKind};

impl Generator<'_> {
    /// Marks every square the enemy attacks and records checks from
    /// pawns, knights and the king.
    ///
    /// Slider rays pass through the own king so that it cannot step back
    /// along the line it is checked on.
    pub(super) fn find_threats(&mut self) {
        let enemy = self.side.opposite();
        self.step_threats(
            self.enemy_pieces(PieceKind::Pawn),
            &enemy.pawn_attack_directions(),
        );
        self.step_threats(self.enemy_pieces(PieceKind::Knight), &Direction::L_SHAPES);
        self.step_threats(
            self.enemy_pieces(PieceKind::King),
            &Direction::EVERY_DIRECTION,
        );

        let queens = self.enemy_pieces(PieceKind::Queen);
        let area = self.unoccupied | self.king;
        for (sliders, directions) in [
            (self.enemy_pieces(PieceKind::Bishop) | queens, &Direction::DIAGONAL),
            (self.enemy_pieces(PieceKind::Rook) | queens, &Direction::CARDINAL),
        ] {
            for &dir in directions {
                self.threatened |= sliders.fill(dir, area).directional_shift_bounded(dir);
            }
        }
    }

    fn step_threats(&mut self, pieces: Bitboard, directions: &[Direction]) {
        for &dir in directions {
            let attacked = pieces.directional_shift_bounded(dir);
            self.threatened |= attacked;
            if attacked.intersects(self.king) {
                self.flag_check(self.king.opposite_directional_shift(dir));
            }
        }
    }

    /// Records a check that is resolved by moving a piece onto `resolving`.
    fn flag_check(&mut self, resolving: Bitboard) {
        if self.check {
            self.double_check = true;
        } else {
            self.check = true;
            self.movable = resolving;
        }
    }

    /// Walks out from the king along every axis, recording slider checks and
    /// pins of exactly one own piece.
    pub(super) fn find_pins(&mut self) {
        let queens = self.enemy_pieces(PieceKind::Queen);
        for axis in PinAxis::ALL {
            let sliders = self.enemy_pieces(axis.slider()) | queens;
            for &dir in axis.directions() {
                let ray = self
                    .king
                    .fill(dir, self.unoccupied)
                    .directional_shift_bounded(dir);
                if ray.intersects(sliders) {
                    self.flag_check(ray);
                } else if ray.intersects(self.own) {
                    let mut ray = ray.fill(dir, self.unoccupied);
                    ray |= ray.directional_shift_bounded(dir);
                    if ray.intersects(sliders) {
                        self.pins[axis.index()] |= ray;
                        self.all_pins |= ray;
                    }
                }
            }
        }
    }
}
