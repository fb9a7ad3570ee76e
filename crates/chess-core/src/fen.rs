//! FEN (Forsyth-Edwards Notation) parsing and serialization.
//!
//! Only canonical FEN is accepted, so that every string that parses is
//! reproduced exactly when written back out.

use crate::{Bitboard, Color, Piece, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Parsed FEN data.
///
/// This struct holds the validated FEN fields. The rules crate converts
/// them into a board and game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Piece placement string (e.g., "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")
    pub piece_placement: String,
    pub active_color: Color,
    /// Castling availability (e.g., "KQkq", "-")
    pub castling: String,
    /// En passant target, empty when the field is "-".
    pub en_passant: Bitboard,
    /// Halfmove clock (plies since the last pawn move or capture)
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl FenParser {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        // Fields are separated by exactly one space.
        let parts: Vec<&str> = fen.split(' ').collect();

        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let piece_placement = parts[0];
        Self::parse_placement(piece_placement)?;

        let active_color = Color::from_fen(parts[1])
            .ok_or_else(|| FenError::InvalidActiveColor(parts[1].to_string()))?;

        let castling = parts[2];
        Self::validate_castling(castling)?;

        let en_passant = Self::parse_en_passant(parts[3])?;

        let halfmove_clock = Self::parse_counter(parts[4])
            .ok_or_else(|| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = Self::parse_counter(parts[5])
            .ok_or_else(|| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(FenParser {
            piece_placement: piece_placement.to_string(),
            active_color,
            castling: castling.to_string(),
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Parses the piece placement field into occupied squares.
    ///
    /// Ranks run from 8 down to 1; a rank must describe exactly eight squares
    /// with empty runs written as a single digit 1-8.
    pub fn parse_placement(placement: &str) -> Result<Vec<(Square, Piece)>, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut pieces = Vec::with_capacity(32);
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            let mut previous_was_digit = false;
            for c in rank_str.chars() {
                match c {
                    '1'..='8' if !previous_was_digit => {
                        file += c as u8 - b'0';
                        previous_was_digit = true;
                    }
                    _ => {
                        let piece = Piece::from_fen_char(c).ok_or_else(|| {
                            FenError::InvalidPiecePlacement(format!(
                                "invalid character '{}' in rank {}",
                                c,
                                rank + 1
                            ))
                        })?;
                        if let Some(square) = Square::new(file, rank) {
                            pieces.push((square, piece));
                        }
                        file += 1;
                        previous_was_digit = false;
                    }
                }
                if file > 8 {
                    break;
                }
            }
            if file != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} does not describe 8 squares",
                    rank + 1
                )));
            }
        }

        Ok(pieces)
    }

    fn validate_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }

        // Letters must be a non-empty subsequence of "KQkq".
        let mut order = "KQkq".chars();
        for c in castling.chars() {
            if !order.any(|allowed| allowed == c) {
                return Err(FenError::InvalidCastlingRights(castling.to_string()));
            }
        }

        Ok(())
    }

    fn parse_en_passant(ep: &str) -> Result<Bitboard, FenError> {
        let target = Bitboard::from_algebraic(ep)
            .ok_or_else(|| FenError::InvalidEnPassantSquare(ep.to_string()))?;
        if target.intersects(!(Bitboard::RANK_3 | Bitboard::RANK_6)) {
            return Err(FenError::InvalidEnPassantSquare(ep.to_string()));
        }
        Ok(target)
    }

    // Rejects signs and leading zeros so the number prints back identically.
    fn parse_counter(field: &str) -> Option<u32> {
        if (field.len() > 1 && field.starts_with('0')) || !field.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        field.parse().ok()
    }

    /// Converts the parsed FEN back to a FEN string.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.piece_placement,
            self.active_color.to_fen_char(),
            self.castling,
            self.en_passant.to_algebraic(),
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_startpos() {
        let fen = FenParser::parse(FenParser::STARTPOS).unwrap();
        assert_eq!(fen.active_color, Color::White);
        assert_eq!(fen.castling, "KQkq");
        assert_eq!(fen.en_passant, Bitboard::EMPTY);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
    }

    #[test]
    fn parse_black_to_move_with_target() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let parsed = FenParser::parse(fen).unwrap();
        assert_eq!(parsed.active_color, Color::Black);
        assert_eq!(parsed.en_passant, Bitboard::from_algebraic("e3").unwrap());
        assert_eq!(parsed.to_fen(), fen);

        let parsed = FenParser::parse("4k3/8/8/8/8/8/8/4K2R w K - 17 42").unwrap();
        assert_eq!((parsed.halfmove_clock, parsed.fullmove_number), (17, 42));
        assert_eq!(parsed.castling, "K");
    }

    #[test]
    fn extra_whitespace_is_rejected() {
        let fen = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
        assert!(FenParser::parse(fen).is_ok());
        assert_eq!(
            FenParser::parse(&format!("{} ", fen)),
            Err(FenError::InvalidPartCount(7))
        );
        assert_eq!(
            FenParser::parse(&fen.replacen(' ', "  ", 1)),
            Err(FenError::InvalidPartCount(7))
        );
        assert_eq!(
            FenParser::parse(&fen.replacen(' ', "\t", 1)),
            Err(FenError::InvalidPartCount(5))
        );
    }

    #[test]
    fn placement_squares() {
        let pieces = FenParser::parse_placement("k7/8/8/8/8/8/8/7K").unwrap();
        assert_eq!(
            pieces,
            vec![(Square::A8, Piece::BLACK_KING), (Square::H1, Piece::WHITE_KING)]
        );
    }

    #[test]
    fn invalid_fen() {
        assert!(matches!(
            FenParser::parse("invalid"),
            Err(FenError::InvalidPartCount(1))
        ));
        assert!(matches!(
            FenParser::parse("k7/8/8/8/8/8/8/7K w"),
            Err(FenError::InvalidPartCount(2))
        ));
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 x KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn invalid_piece_placement() {
        for placement in [
            "8/8/8/8/8/8/8",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR",
            "rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "7/8/8/8/8/8/8/8",
            "9/8/8/8/8/8/8/8",
            "44/8/8/8/8/8/8/8",
            "08/8/8/8/8/8/8/8",
        ] {
            assert!(
                matches!(
                    FenParser::parse(&format!("{} w - - 0 1", placement)),
                    Err(FenError::InvalidPiecePlacement(_))
                ),
                "{}",
                placement
            );
        }
    }

    #[test]
    fn invalid_castling_rights() {
        for castling in ["XYZ", "qK", "KK", "K-"] {
            assert!(matches!(
                FenParser::parse(&format!("8/8/8/8/8/8/8/8 w {} - 0 1", castling)),
                Err(FenError::InvalidCastlingRights(_))
            ));
        }
    }

    #[test]
    fn invalid_en_passant() {
        for ep in ["abc", "x3", "e4", "E3"] {
            assert!(matches!(
                FenParser::parse(&format!("8/8/8/8/8/8/8/8 w - {} 0 1", ep)),
                Err(FenError::InvalidEnPassantSquare(_))
            ));
        }
    }

    #[test]
    fn invalid_counters() {
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 w - - abc 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 w - - +1 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 w - - 0 xyz"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 w - - 0 01"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
    }

    #[test]
    fn error_messages_name_the_field() {
        assert_eq!(
            FenError::InvalidPartCount(3).to_string(),
            "invalid FEN: expected 6 parts, got 3"
        );
        assert_eq!(
            FenError::InvalidActiveColor("x".into()).to_string(),
            "invalid active color: expected 'w' or 'b', got 'x'"
        );
    }

    proptest! {
        #[test]
        fn counters_roundtrip(
            halfmove in 0u32..500,
            fullmove in 1u32..10_000,
            black in any::<bool>()
        ) {
            let fen = format!(
                "r3k2r/8/8/8/8/8/8/R3K2R {} Kk - {} {}",
                if black { 'b' } else { 'w' },
                halfmove,
                fullmove
            );
            prop_assert_eq!(FenParser::parse(&fen).unwrap().to_fen(), fen);
        }
    }
}
