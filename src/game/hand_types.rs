//! 牌型定義

use super::cards::Card;

/// 牌型 ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandId {
    HighCard,
    Pair,
    TwoPair,
    ThreeKind,
    Straight,
    Flush,
    FullHouse,
    FourKind,
    StraightFlush,
    RoyalFlush,
}

/// 牌型總數
pub const HAND_TYPE_COUNT: usize = 10;

impl HandId {
    /// 獲取牌型的基礎 chips 和 mult
    pub fn base_values(&self) -> (i64, i64) {
        match self {
            HandId::HighCard => (5, 1),
            HandId::Pair => (10, 2),
            HandId::TwoPair => (20, 2),
            HandId::ThreeKind => (30, 3),
            HandId::Straight => (30, 4),
            HandId::Flush => (35, 4),
            HandId::FullHouse => (40, 4),
            HandId::FourKind => (60, 7),
            HandId::StraightFlush => (100, 8),
            HandId::RoyalFlush => (100, 8),
        }
    }

    pub fn to_index(&self) -> usize {
        match self {
            HandId::HighCard => 0,
            HandId::Pair => 1,
            HandId::TwoPair => 2,
            HandId::ThreeKind => 3,
            HandId::Straight => 4,
            HandId::Flush => 5,
            HandId::FullHouse => 6,
            HandId::FourKind => 7,
            HandId::StraightFlush => 8,
            HandId::RoyalFlush => 9,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HandId::HighCard => "High Card",
            HandId::Pair => "Pair",
            HandId::TwoPair => "Two Pair",
            HandId::ThreeKind => "Three of a Kind",
            HandId::Straight => "Straight",
            HandId::Flush => "Flush",
            HandId::FullHouse => "Full House",
            HandId::FourKind => "Four of a Kind",
            HandId::StraightFlush => "Straight Flush",
            HandId::RoyalFlush => "Royal Flush",
        }
    }
}

/// 牌型判定結果（每次判定產生新值，不可變）
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandResult {
    pub id: HandId,
    pub base_chips: i64,
    pub base_mult: i64,
    pub cards: Vec<Card>,
}

impl HandResult {
    pub fn new(id: HandId, cards: &[Card]) -> Self {
        let (base_chips, base_mult) = id.base_values();
        Self {
            id,
            base_chips,
            base_mult,
            cards: cards.to_vec(),
        }
    }
}

// ============================================================================
// 單元測試
// ============================================================================
