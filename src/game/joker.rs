//! Joker 系統
//!
//! 每個 Joker 以 `JokerId` 列舉識別，效果為純函式：輸入打出的牌與環境快照
//! (`AmbientState`)，輸出 mult 加成與 chips 加成。效果彼此獨立、可加總。
//!
//! 名稱字串只用於載入與顯示（`JokerId::from_name`），計分時不做字串比對。

use super::cards::{Card, Suit};
use super::scoring::{has_pair, is_flush, suit_count};

// ============================================================================
// Joker ID 系統
// ============================================================================

/// Joker 總數
pub const JOKER_COUNT: usize = 12;

/// Joker 唯一識別碼
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JokerId {
    Joker = 0,           // +4 Mult
    GreedyJoker = 1,     // +3 Mult per Diamond
    LustyJoker = 2,      // +3 Mult per Heart
    WrathfulJoker = 3,   // +3 Mult per Spade
    GluttonousJoker = 4, // +3 Mult per Club
    JollyJoker = 5,      // +8 Mult (Pair)
    DrollJoker = 6,      // +10 Mult (Flush)
    SlyJoker = 7,        // +50 Chips (Flush)
    Banner = 8,          // +30 Chips per remaining discard
    MysticSummit = 9,    // +15 Mult, +1000 Chips if 0 discards left
    PairJoker = 10,      // +2 Mult (Pair)，不在商店出現
    FlushJoker = 11,     // +3 Mult (Flush)，不在商店出現
}

/// Joker 靜態定義
#[derive(Clone, Copy, Debug)]
pub struct JokerDef {
    pub name: &'static str,
    pub key: &'static str,
    pub description: &'static str,
    pub cost: i64,
    pub shop_eligible: bool,
}

/// Joker 定義表（順序與 JokerId 枚舉值一致）
pub static JOKER_DEFS: [JokerDef; JOKER_COUNT] = [
    JokerDef { name: "Joker", key: "joker", description: "Adds +4 mult", cost: 2, shop_eligible: true },
    JokerDef { name: "Greedy Joker", key: "greedy", description: "Each diamond card played gives +3 mult when scored", cost: 5, shop_eligible: true },
    JokerDef { name: "Lusty Joker", key: "lusty", description: "Each heart card played gives +3 mult when scored", cost: 5, shop_eligible: true },
    JokerDef { name: "Wrathful Joker", key: "wrathful", description: "Each spade card played gives +3 mult when scored", cost: 5, shop_eligible: true },
    JokerDef { name: "Gluttonous Joker", key: "gluttonous", description: "Each club card played gives +3 mult when scored", cost: 5, shop_eligible: true },
    JokerDef { name: "Jolly Joker", key: "jolly", description: "+8 mult if hand contains pair", cost: 3, shop_eligible: true },
    JokerDef { name: "Droll Joker", key: "droll", description: "+10 mult if hand contains flush", cost: 4, shop_eligible: true },
    JokerDef { name: "Sly Joker", key: "sly", description: "+50 chips if hand contains flush", cost: 3, shop_eligible: true },
    JokerDef { name: "Banner Joker", key: "banner", description: "+30 chips for each remaining discard", cost: 5, shop_eligible: true },
    JokerDef { name: "Mystic Summit", key: "mystic", description: "+15 mult when 0 discards remaining", cost: 5, shop_eligible: true },
    JokerDef { name: "Pair Joker", key: "pair", description: "+2 mult if hand contains pair", cost: 3, shop_eligible: false },
    JokerDef { name: "Flush Joker", key: "flush", description: "+3 mult if hand contains flush", cost: 4, shop_eligible: false },
];

impl JokerId {
    pub fn def(&self) -> &'static JokerDef {
        &JOKER_DEFS[self.to_index()]
    }

    pub fn name(&self) -> &'static str {
        self.def().name
    }

    pub fn description(&self) -> &'static str {
        self.def().description
    }

    /// 購買價格
    pub fn cost(&self) -> i64 {
        self.def().cost
    }

    /// 賣出價格（購買價 - 1）
    pub fn sell_value(&self) -> i64 {
        (self.cost() - 1).max(0)
    }

    pub fn to_index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    pub fn all() -> &'static [JokerId] {
        &[
            JokerId::Joker,
            JokerId::GreedyJoker,
            JokerId::LustyJoker,
            JokerId::WrathfulJoker,
            JokerId::GluttonousJoker,
            JokerId::JollyJoker,
            JokerId::DrollJoker,
            JokerId::SlyJoker,
            JokerId::Banner,
            JokerId::MysticSummit,
            JokerId::PairJoker,
            JokerId::FlushJoker,
        ]
    }

    /// 商店可出現的 Joker
    pub fn all_shop_eligible() -> Vec<JokerId> {
        Self::all()
            .iter()
            .copied()
            .filter(|j| j.def().shop_eligible)
            .collect()
    }

    /// 以顯示名稱或短鍵查找（不分大小寫），未知名稱回傳 None
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all().iter().copied().find(|j| {
            let def = j.def();
            def.name.eq_ignore_ascii_case(name) || def.key.eq_ignore_ascii_case(name)
        })
    }

    /// 針對單一花色計數的 Joker
    fn suit_target(&self) -> Option<Suit> {
        match self {
            JokerId::GreedyJoker => Some(Suit::Diamonds),
            JokerId::LustyJoker => Some(Suit::Hearts),
            JokerId::WrathfulJoker => Some(Suit::Spades),
            JokerId::GluttonousJoker => Some(Suit::Clubs),
            _ => None,
        }
    }

    /// Mult 加成
    pub fn mult_bonus(&self, cards: &[Card], ambient: &AmbientState) -> f64 {
        if let Some(suit) = self.suit_target() {
            return suit_count(cards, suit) as f64 * 3.0;
        }
        match self {
            JokerId::Joker => 4.0,
            JokerId::JollyJoker if has_pair(cards) => 8.0,
            JokerId::DrollJoker if is_flush(cards) => 10.0,
            JokerId::MysticSummit if ambient.discards_remaining == 0 => 15.0,
            JokerId::PairJoker if has_pair(cards) => 2.0,
            JokerId::FlushJoker if is_flush(cards) => 3.0,
            _ => 0.0,
        }
    }

    /// Chips 加成
    pub fn chip_bonus(&self, cards: &[Card], ambient: &AmbientState) -> i64 {
        match self {
            JokerId::SlyJoker if is_flush(cards) => 50,
            JokerId::Banner => ambient.discards_remaining.max(0) as i64 * 30,
            JokerId::MysticSummit if ambient.discards_remaining == 0 => 1000,
            _ => 0,
        }
    }
}

// ============================================================================
// 計分環境快照
// ============================================================================

/// Joker 計分時讀取的玩家狀態快照（唯讀）
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AmbientState {
    pub discards_remaining: i32,
}

impl AmbientState {
    pub fn new(discards_remaining: i32) -> Self {
        Self { discards_remaining }
    }
}

// ============================================================================
// Joker Slot 結構
// ============================================================================

/// 玩家持有的 Joker
#[derive(Clone, Debug, PartialEq)]
pub struct JokerSlot {
    pub id: JokerId,
    pub active: bool,
}

impl JokerSlot {
    pub fn new(id: JokerId) -> Self {
        Self { id, active: true }
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// 未啟用的 Joker 不提供加成
    pub fn mult_bonus(&self, cards: &[Card], ambient: &AmbientState) -> f64 {
        if self.active {
            self.id.mult_bonus(cards, ambient)
        } else {
            0.0
        }
    }

    pub fn chip_bonus(&self, cards: &[Card], ambient: &AmbientState) -> i64 {
        if self.active {
            self.id.chip_bonus(cards, ambient)
        } else {
            0
        }
    }
}

/// 由名稱清單建立 Joker 欄位，未知名稱略過
pub fn resolve_jokers<'a, I>(entries: I) -> Vec<JokerSlot>
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    entries
        .into_iter()
        .filter_map(|(name, active)| match JokerId::from_name(name) {
            Some(id) => Some(JokerSlot { id, active }),
            None => {
                log::warn!("unknown joker {:?} ignored", name);
                None
            }
        })
        .collect()
}

// ============================================================================
// 兩階段累加
// ============================================================================

/// 第一階段：加總所有啟用 Joker 的 mult 加成
pub fn sum_mult_bonus(jokers: &[JokerSlot], cards: &[Card], ambient: &AmbientState) -> f64 {
    jokers.iter().map(|j| j.mult_bonus(cards, ambient)).sum()
}

/// 第二階段：加總所有啟用 Joker 的 chips 加成
pub fn sum_chip_bonus(jokers: &[JokerSlot], cards: &[Card], ambient: &AmbientState) -> i64 {
    jokers.iter().map(|j| j.chip_bonus(cards, ambient)).sum()
}

// ============================================================================
// 單元測試
// ============================================================================
