//! 遊戲常量定義

// ============================================================================
// 遊戲規則常量
// ============================================================================

pub const HAND_SIZE: usize = 8;          // 手牌數量
pub const MAX_SELECTED: usize = 5;       // 最多選擇 5 張打出
pub const JOKER_SLOTS: usize = 5;        // Joker 欄位數
pub const PLAYS_PER_BLIND: i32 = 3;      // 每 Blind 出牌次數
pub const DISCARDS_PER_BLIND: i32 = 3;   // 每 Blind 棄牌次數
pub const STARTING_MONEY: i64 = 4;       // 起始金幣
pub const INTEREST_STEP: i64 = 5;        // 每 $5 得 $1 利息
pub const MAX_INTEREST: i64 = 5;         // 最大利息
pub const SHOP_JOKER_COUNT: usize = 2;   // 商店 Joker 數量
pub const FINAL_ANTE: i32 = 8;           // 通過此 Ante 的 Boss 即獲勝

// ============================================================================
// 環境倍率
// ============================================================================

pub const DEFAULT_AMBIENT_MULTIPLIER: f64 = 1.0;
