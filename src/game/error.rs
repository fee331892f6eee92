//! 遊戲錯誤類型

use super::blinds::{BlindType, Stage};

/// 規則違反與無效輸入
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// 點數不在 2..=14
    InvalidRank(u8),
    /// 花色索引不在 0..=3
    InvalidSuit(u8),
    /// 選牌無效（空選、重複索引等）
    InvalidSelection(String),
    /// 動作與目前階段不符
    WrongStage { expected: Stage, actual: Stage },
    /// Blind 必須依 Small -> Big -> Boss 順序選擇
    BlindOutOfOrder(BlindType),
    NoPlaysLeft,
    NoDiscardsLeft,
    InsufficientFunds { cost: i64, money: i64 },
    JokerSlotsFull,
    IndexOutOfRange(usize),
    UnknownSession(u64),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidRank(r) => write!(f, "rank must be between 2 and 14, got {}", r),
            GameError::InvalidSuit(s) => write!(f, "suit must be between 0 and 3, got {}", s),
            GameError::InvalidSelection(msg) => write!(f, "invalid selection: {}", msg),
            GameError::WrongStage { expected, actual } => {
                write!(f, "expected stage {:?}, currently {:?}", expected, actual)
            }
            GameError::BlindOutOfOrder(b) => {
                write!(f, "cannot select {:?} blind yet, complete the previous blind first", b)
            }
            GameError::NoPlaysLeft => write!(f, "no plays left this blind"),
            GameError::NoDiscardsLeft => write!(f, "no discards left this blind"),
            GameError::InsufficientFunds { cost, money } => {
                write!(f, "not enough money: cost ${}, have ${}", cost, money)
            }
            GameError::JokerSlotsFull => write!(f, "all joker slots are full"),
            GameError::IndexOutOfRange(i) => write!(f, "index {} out of range", i),
            GameError::UnknownSession(id) => write!(f, "unknown session {}", id),
        }
    }
}

impl std::error::Error for GameError {}
