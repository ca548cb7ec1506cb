//! The position the session last asserted to the engine.

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Tracks the FEN sent with the last `position` command.
///
/// The FEN is stored verbatim; checking that it describes a legal board is
/// left to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionTracker {
    fen: String,
}

impl Default for PositionTracker {
    fn default() -> Self {
        Self { fen: STARTING_FEN.to_string() }
    }
}

impl PositionTracker {
    pub fn fen(&self) -> &str {
        &self.fen
    }

    pub fn set_fen(&mut self, fen: impl Into<String>) {
        self.fen = fen.into();
    }

    /// Command that re-asserts the tracked position.
    pub fn position_command(&self) -> String {
        format!("position fen {}", self.fen)
    }
}
