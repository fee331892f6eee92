//! 計分服務
//!
//! 出牌計分流程：
//! 1. 判定牌型，取得基礎 chips / mult
//! 2. 基礎 chips 加上每張牌的 chips
//! 3. mult 階段：加上所有啟用 Joker 的 mult 加成
//! 4. chips 階段：加總所有啟用 Joker 的 chips 加成
//! 5. mult 乘上環境倍率
//! 6. 分數 = round(chips × mult) + chips 加成

use rayon::prelude::*;

use crate::game::joker::{sum_chip_bonus, sum_mult_bonus};
use crate::game::weather::sanitize_multiplier;
use crate::game::{
    card_chip_value, evaluate_hand, AmbientState, Card, GameError, HandId, HandResult, JokerSlot,
    MAX_SELECTED,
};

/// 出牌計分明細
#[derive(Clone, Debug, PartialEq)]
pub struct PlayScore {
    pub hand: HandResult,
    /// 牌型基礎 chips + 每張牌 chips
    pub base_chips: i64,
    /// 套用環境倍率後的總 mult
    pub total_mult: f64,
    pub chip_bonus: i64,
    pub score: i64,
}

impl PlayScore {
    /// 無效出牌（0 分）
    fn zero(cards: &[Card]) -> Self {
        Self {
            hand: HandResult::new(HandId::HighCard, cards),
            base_chips: 0,
            total_mult: 0.0,
            chip_bonus: 0,
            score: 0,
        }
    }
}

/// 一次計分所需的輸入（批次計分時每筆獨立）
#[derive(Clone, Debug)]
pub struct ScoreInput {
    pub cards: Vec<Card>,
    pub jokers: Vec<JokerSlot>,
    pub ambient: AmbientState,
    pub ambient_multiplier: f64,
}

/// 從手牌中依索引取出選中的牌（最多 5 張，超過的索引忽略）
pub fn build_selected(hand: &[Card], indices: &[usize]) -> Result<Vec<Card>, GameError> {
    if indices.is_empty() {
        return Err(GameError::InvalidSelection("no cards selected".to_string()));
    }
    let indices = &indices[..indices.len().min(MAX_SELECTED)];

    let mut selected = Vec::with_capacity(indices.len());
    for (pos, &idx) in indices.iter().enumerate() {
        if indices[..pos].contains(&idx) {
            return Err(GameError::InvalidSelection(format!("index {} selected twice", idx)));
        }
        let card = hand.get(idx).ok_or(GameError::IndexOutOfRange(idx))?;
        selected.push(*card);
    }
    Ok(selected)
}

/// mult 階段：牌型基礎 mult 加上 Joker mult 加成
pub fn multiplier_pass(hand: &HandResult, jokers: &[JokerSlot], ambient: &AmbientState) -> f64 {
    hand.base_mult as f64 + sum_mult_bonus(jokers, &hand.cards, ambient)
}

/// chips 階段：Joker 的固定 chips 加成（在 mult 相乘之後才加上）
pub fn chip_bonus_pass(hand: &HandResult, jokers: &[JokerSlot], ambient: &AmbientState) -> i64 {
    sum_chip_bonus(jokers, &hand.cards, ambient)
}

/// 計算出牌分數
///
/// 空選或超過 5 張視為無效出牌，得 0 分。
pub fn score_play(
    played: &[Card],
    jokers: &[JokerSlot],
    ambient: &AmbientState,
    ambient_multiplier: f64,
) -> PlayScore {
    if played.is_empty() {
        return PlayScore::zero(played);
    }
    if played.len() > MAX_SELECTED {
        log::warn!("played {} cards, at most {} allowed; scoring 0", played.len(), MAX_SELECTED);
        return PlayScore::zero(played);
    }

    let hand = evaluate_hand(played);
    let card_chips: i64 = played.iter().map(card_chip_value).sum();
    let base_chips = hand.base_chips + card_chips;

    let mult = multiplier_pass(&hand, jokers, ambient);
    let chip_bonus = chip_bonus_pass(&hand, jokers, ambient);

    let total_mult = mult * sanitize_multiplier(ambient_multiplier);
    // 極大倍率時 `as i64` 飽和至 i64::MAX，加總也需飽和
    let multiplied = (base_chips as f64 * total_mult).round() as i64;
    let score = multiplied.saturating_add(chip_bonus).max(0);

    log::debug!(
        "{} [{}]: chips {} x mult {:.2} + bonus {} = {}",
        hand.id.name(),
        played.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" "),
        base_chips,
        total_mult,
        chip_bonus,
        score
    );

    PlayScore {
        hand,
        base_chips,
        total_mult,
        chip_bonus,
        score,
    }
}

/// 只回傳最終分數
pub fn score(played: &[Card], jokers: &[JokerSlot], ambient: &AmbientState, ambient_multiplier: f64) -> i64 {
    score_play(played, jokers, ambient, ambient_multiplier).score
}

/// 平行計分多筆獨立輸入，結果順序與輸入一致
pub fn score_batch(inputs: &[ScoreInput]) -> Vec<PlayScore> {
    inputs
        .par_iter()
        .map(|input| score_play(&input.cards, &input.jokers, &input.ambient, input.ambient_multiplier))
        .collect()
}

// ============================================================================
// 單元測試
// ============================================================================
