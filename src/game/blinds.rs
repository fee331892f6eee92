//! Blind 與 Ante 定義

use super::constants::{FINAL_ANTE, INTEREST_STEP, MAX_INTEREST};

/// 遊戲階段
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    PreBlind,
    Blind,
    Shop,
    End(GameEnd),
}

impl Stage {
    pub fn to_int(&self) -> i32 {
        match self {
            Stage::PreBlind => 0,
            Stage::Blind => 1,
            Stage::Shop => 2,
            Stage::End(_) => 3,
        }
    }
}

/// 遊戲結束狀態
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEnd {
    Win,
    Lose,
}

impl GameEnd {
    pub fn to_int(&self) -> i32 {
        match self {
            GameEnd::Win => 1,
            GameEnd::Lose => 2,
        }
    }
}

/// Blind 類型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlindType {
    Small,
    Big,
    Boss,
}

impl BlindType {
    /// 過關基礎獎勵
    pub fn reward(&self) -> i64 {
        match self {
            BlindType::Small => 3,
            BlindType::Big => 4,
            BlindType::Boss => 5,
        }
    }

    /// 目標分數倍率 (分子, 分母)，以整數運算保持截斷行為
    fn target_ratio(&self) -> (i64, i64) {
        match self {
            BlindType::Small => (1, 1),
            BlindType::Big => (3, 2),
            BlindType::Boss => (2, 1),
        }
    }

    pub fn next(&self) -> Option<BlindType> {
        match self {
            BlindType::Small => Some(BlindType::Big),
            BlindType::Big => Some(BlindType::Boss),
            BlindType::Boss => None, // Boss 之後進入下一個 Ante
        }
    }

    pub fn to_int(&self) -> i32 {
        match self {
            BlindType::Small => 0,
            BlindType::Big => 1,
            BlindType::Boss => 2,
        }
    }

    pub fn from_int(value: i32) -> Option<BlindType> {
        match value {
            0 => Some(BlindType::Small),
            1 => Some(BlindType::Big),
            2 => Some(BlindType::Boss),
            _ => None,
        }
    }
}

/// Ante 定義
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ante {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}

impl Ante {
    pub fn base_score(&self) -> i64 {
        match self {
            Ante::One => 300,
            Ante::Two => 800,
            Ante::Three => 2_000,
            Ante::Four => 5_000,
            Ante::Five => 11_000,
            Ante::Six => 20_000,
            Ante::Seven => 35_000,
            Ante::Eight => 50_000,
        }
    }

    pub fn next(&self) -> Option<Ante> {
        Ante::from_int(self.to_int() + 1)
    }

    pub fn to_int(&self) -> i32 {
        match self {
            Ante::One => 1,
            Ante::Two => 2,
            Ante::Three => 3,
            Ante::Four => 4,
            Ante::Five => 5,
            Ante::Six => 6,
            Ante::Seven => 7,
            Ante::Eight => 8,
        }
    }

    pub fn from_int(level: i32) -> Option<Ante> {
        match level {
            1 => Some(Ante::One),
            2 => Some(Ante::Two),
            3 => Some(Ante::Three),
            4 => Some(Ante::Four),
            5 => Some(Ante::Five),
            6 => Some(Ante::Six),
            7 => Some(Ante::Seven),
            8 => Some(Ante::Eight),
            _ => None,
        }
    }

    pub fn is_final(&self) -> bool {
        self.to_int() == FINAL_ANTE
    }
}

/// 指定 Ante 等級與 Blind 的目標分數（超出 1..=8 的等級使用 Ante 1 分數）
pub fn blind_target(ante_level: i32, blind: BlindType) -> i64 {
    let base = Ante::from_int(ante_level).unwrap_or(Ante::One).base_score();
    let (num, den) = blind.target_ratio();
    base * num / den
}

/// 利息：每 $5 得 $1，上限 $5
pub fn interest(money: i64) -> i64 {
    (money.max(0) / INTEREST_STEP).min(MAX_INTEREST)
}

/// 過關獎勵 = 基礎獎勵 + 剩餘出牌 + 剩餘棄牌 + 利息（以領獎前金額計）
pub fn clear_reward(blind: BlindType, plays_left: i32, discards_left: i32, money: i64) -> i64 {
    blind.reward() + plays_left.max(0) as i64 + discards_left.max(0) as i64 + interest(money)
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blind_type_basics() {
        assert_eq!(BlindType::Small.reward(), 3);
        assert_eq!(BlindType::Big.reward(), 4);
        assert_eq!(BlindType::Boss.reward(), 5);
        assert_eq!(BlindType::Small.next(), Some(BlindType::Big));
        assert_eq!(BlindType::Big.next(), Some(BlindType::Boss));
        assert_eq!(BlindType::Boss.next(), None);
        assert_eq!(BlindType::Big.to_int(), 1);
        assert_eq!(BlindType::from_int(2), Some(BlindType::Boss));
        assert_eq!(BlindType::from_int(3), None);
    }

    #[test]
    fn test_ante_progression() {
        assert_eq!(Ante::One.base_score(), 300);
        assert_eq!(Ante::Five.base_score(), 11_000);
        assert_eq!(Ante::One.next(), Some(Ante::Two));
        assert_eq!(Ante::Seven.next(), Some(Ante::Eight));
        assert_eq!(Ante::Eight.next(), None);
        assert_eq!(Ante::Four.to_int(), 4);
        assert!(Ante::Eight.is_final());
        assert!(!Ante::Seven.is_final());
    }

    #[test]
    fn test_blind_targets() {
        assert_eq!(blind_target(1, BlindType::Small), 300);
        assert_eq!(blind_target(1, BlindType::Big), 450);
        assert_eq!(blind_target(1, BlindType::Boss), 600);
        assert_eq!(blind_target(5, BlindType::Big), 16_500);
        assert_eq!(blind_target(8, BlindType::Boss), 100_000);
        // 超出範圍使用預設值
        assert_eq!(blind_target(0, BlindType::Small), 300);
        assert_eq!(blind_target(9, BlindType::Small), 300);
    }

    #[test]
    fn test_interest_and_reward() {
        assert_eq!(interest(0), 0);
        assert_eq!(interest(4), 0);
        assert_eq!(interest(14), 2);
        assert_eq!(interest(100), 5);
        assert_eq!(interest(-3), 0);

        // Small: 3 + 2 plays + 1 discard + $2 interest
        assert_eq!(clear_reward(BlindType::Small, 2, 1, 10), 8);
        assert_eq!(clear_reward(BlindType::Boss, 0, 0, 0), 5);
    }

    #[test]
    fn test_stage_ints() {
        assert_eq!(Stage::PreBlind.to_int(), 0);
        assert_eq!(Stage::Shop.to_int(), 2);
        assert_eq!(Stage::End(GameEnd::Lose).to_int(), 3);
        assert_eq!(GameEnd::Win.to_int(), 1);
    }
}
