//! 服務層模組
//!
//! 提供 gRPC 服務所需的狀態管理與計分功能

pub mod scoring;
pub mod state;

pub use scoring::{build_selected, score, score_batch, score_play, PlayScore, ScoreInput};
pub use state::{GameState, PlayOutcome};
