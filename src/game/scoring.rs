//! 牌型判定
//!
//! 依固定優先序判定牌型（第一個符合者勝出），並提供 Joker 效果共用的判定函式。
//! 同花與順子需要剛好 5 張牌；點數重複類牌型（對子、三條、四條）不限張數。

use super::cards::{Card, Suit, ACE};
use super::constants::MAX_SELECTED;
use super::hand_types::{HandId, HandResult};

/// 同花 / 順子所需張數
pub const FIVE_CARD_HAND: usize = 5;

/// 以點數為索引的計數表（索引 0 為 joker 標記牌）
pub type RankCounts = [u8; ACE as usize + 1];

/// 計算各點數出現次數
pub fn rank_counts(cards: &[Card]) -> RankCounts {
    let mut counts = [0u8; ACE as usize + 1];
    for card in cards {
        counts[card.rank() as usize] += 1;
    }
    counts
}

/// 同一點數的最多張數
pub fn max_rank_multiplicity(counts: &RankCounts) -> u8 {
    counts.iter().copied().max().unwrap_or(0)
}

/// 出現至少兩次的點數個數
pub fn pair_count(counts: &RankCounts) -> usize {
    counts.iter().filter(|&&c| c >= 2).count()
}

/// 是否包含對子（任一點數 >= 2 張）
pub fn has_pair(cards: &[Card]) -> bool {
    max_rank_multiplicity(&rank_counts(cards)) >= 2
}

/// 指定花色的張數（joker 標記牌不計）
pub fn suit_count(cards: &[Card], suit: Suit) -> usize {
    cards
        .iter()
        .filter(|c| !c.is_joker() && c.suit() == suit)
        .count()
}

/// 是否為同花：剛好 5 張且花色相同
pub fn is_flush(cards: &[Card]) -> bool {
    if cards.len() != FIVE_CARD_HAND {
        return false;
    }
    let first = cards[0].suit();
    cards.iter().all(|c| c.suit() == first)
}

/// 是否為順子：剛好 5 張且點數連續
///
/// Ace 可當 1 湊成 A-2-3-4-5（把 14 換成 1 後重新排序再檢查）。
pub fn is_straight(cards: &[Card]) -> bool {
    if cards.len() != FIVE_CARD_HAND {
        return false;
    }
    let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank()).collect();
    ranks.sort_unstable();

    if ranks.contains(&ACE) {
        let mut low_ace: Vec<u8> = ranks
            .iter()
            .map(|&r| if r == ACE { 1 } else { r })
            .collect();
        low_ace.sort_unstable();
        if is_consecutive(&low_ace) {
            return true;
        }
    }

    is_consecutive(&ranks)
}

fn is_consecutive(sorted: &[u8]) -> bool {
    sorted.windows(2).all(|w| w[1] == w[0] + 1)
}

/// 同花順且最低點數為 10、最高為 A
pub fn is_royal_flush(cards: &[Card]) -> bool {
    if !(is_flush(cards) && is_straight(cards)) {
        return false;
    }
    let min = cards.iter().map(|c| c.rank()).min();
    let max = cards.iter().map(|c| c.rank()).max();
    min == Some(10) && max == Some(ACE)
}

/// 判定牌型並取得基礎 chips / mult
///
/// 最多取前 5 張。空手牌回傳 High Card。
pub fn evaluate_hand(cards: &[Card]) -> HandResult {
    let cards = &cards[..cards.len().min(MAX_SELECTED)];
    HandResult::new(classify(cards), cards)
}

fn classify(cards: &[Card]) -> HandId {
    if cards.is_empty() {
        return HandId::HighCard;
    }

    let counts = rank_counts(cards);
    let flush = is_flush(cards);
    let straight = is_straight(cards);
    let max_count = max_rank_multiplicity(&counts);

    if flush && straight {
        if is_royal_flush(cards) {
            HandId::RoyalFlush
        } else {
            HandId::StraightFlush
        }
    } else if max_count >= 4 {
        HandId::FourKind
    } else if counts.contains(&3) && counts.contains(&2) {
        HandId::FullHouse
    } else if flush {
        HandId::Flush
    } else if straight {
        HandId::Straight
    } else if max_count >= 3 {
        HandId::ThreeKind
    } else if pair_count(&counts) >= 2 {
        HandId::TwoPair
    } else if max_count >= 2 {
        HandId::Pair
    } else {
        HandId::HighCard
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_cards(ranks_suits: &[(u8, u8)]) -> Vec<Card> {
        ranks_suits
            .iter()
            .map(|&(r, s)| Card::new(r, s).unwrap())
            .collect()
    }

    #[test]
    fn test_high_card() {
        let cards = make_cards(&[(2, 0), (4, 1), (6, 2), (8, 3), (10, 0)]);
        let result = evaluate_hand(&cards);
        assert_eq!(result.id, HandId::HighCard);
        assert_eq!(result.base_chips, 5);
        assert_eq!(result.base_mult, 1);
    }

    #[test]
    fn test_pair() {
        let cards = make_cards(&[(2, 0), (2, 1), (6, 2), (8, 3), (10, 0)]);
        let result = evaluate_hand(&cards);
        assert_eq!(result.id, HandId::Pair);
        assert_eq!((result.base_chips, result.base_mult), (10, 2));
    }

    #[test]
    fn test_two_pair_is_not_full_house() {
        let cards = make_cards(&[(2, 0), (2, 1), (3, 2), (3, 3), (5, 0)]);
        let result = evaluate_hand(&cards);
        assert_eq!(result.id, HandId::TwoPair);
        assert_eq!((result.base_chips, result.base_mult), (20, 2));
    }

    #[test]
    fn test_three_of_a_kind() {
        let cards = make_cards(&[(5, 0), (5, 1), (5, 2), (8, 3), (10, 0)]);
        let result = evaluate_hand(&cards);
        assert_eq!(result.id, HandId::ThreeKind);
        assert_eq!((result.base_chips, result.base_mult), (30, 3));
    }

    #[test]
    fn test_straight() {
        let cards = make_cards(&[(5, 0), (6, 1), (7, 2), (8, 3), (9, 0)]);
        let result = evaluate_hand(&cards);
        assert_eq!(result.id, HandId::Straight);
        assert_eq!((result.base_chips, result.base_mult), (30, 4));
    }

    #[test]
    fn test_straight_ace_low() {
        // A-2-3-4-5
        let cards = make_cards(&[(14, 0), (2, 1), (3, 2), (4, 3), (5, 0)]);
        assert_eq!(evaluate_hand(&cards).id, HandId::Straight);
    }

    #[test]
    fn test_straight_ace_high() {
        // 10-J-Q-K-A
        let cards = make_cards(&[(10, 0), (11, 1), (12, 2), (13, 3), (14, 0)]);
        assert_eq!(evaluate_hand(&cards).id, HandId::Straight);
    }

    #[test]
    fn test_ace_does_not_wrap_around() {
        // Q-K-A-2-3 不是順子
        let cards = make_cards(&[(12, 0), (13, 1), (14, 2), (2, 3), (3, 0)]);
        assert_eq!(evaluate_hand(&cards).id, HandId::HighCard);
    }

    #[test]
    fn test_flush() {
        // 非連續同花
        let cards = make_cards(&[(2, 0), (3, 0), (5, 0), (7, 0), (9, 0)]);
        let result = evaluate_hand(&cards);
        assert_eq!(result.id, HandId::Flush);
        assert_eq!((result.base_chips, result.base_mult), (35, 4));
    }

    #[test]
    fn test_full_house() {
        let cards = make_cards(&[(5, 0), (5, 1), (5, 2), (8, 0), (8, 1)]);
        let result = evaluate_hand(&cards);
        assert_eq!(result.id, HandId::FullHouse);
        assert_eq!((result.base_chips, result.base_mult), (40, 4));
    }

    #[test]
    fn test_four_of_a_kind() {
        let cards = make_cards(&[(7, 0), (7, 1), (7, 2), (7, 3), (10, 0)]);
        let result = evaluate_hand(&cards);
        assert_eq!(result.id, HandId::FourKind);
        assert_eq!((result.base_chips, result.base_mult), (60, 7));
    }

    #[test]
    fn test_straight_flush() {
        let cards = make_cards(&[(5, 2), (6, 2), (7, 2), (8, 2), (9, 2)]);
        let result = evaluate_hand(&cards);
        assert_eq!(result.id, HandId::StraightFlush);
        assert_eq!((result.base_chips, result.base_mult), (100, 8));
    }

    #[test]
    fn test_ace_low_straight_flush_is_not_royal() {
        let cards = make_cards(&[(14, 1), (2, 1), (3, 1), (4, 1), (5, 1)]);
        assert_eq!(evaluate_hand(&cards).id, HandId::StraightFlush);
    }

    #[test]
    fn test_royal_flush() {
        let cards = make_cards(&[(10, 3), (11, 3), (12, 3), (13, 3), (14, 3)]);
        let result = evaluate_hand(&cards);
        assert_eq!(result.id, HandId::RoyalFlush);
        assert_eq!((result.base_chips, result.base_mult), (100, 8));
    }

    #[test]
    fn test_empty_hand() {
        let result = evaluate_hand(&[]);
        assert_eq!(result.id, HandId::HighCard);
        assert!(result.cards.is_empty());
    }

    // ========================================================================
    // 少於 5 張
    // ========================================================================

    #[test]
    fn test_four_card_four_of_a_kind() {
        let cards = make_cards(&[(9, 0), (9, 1), (9, 2), (9, 3)]);
        assert_eq!(evaluate_hand(&cards).id, HandId::FourKind);
    }

    #[test]
    fn test_four_same_suit_is_not_flush() {
        let cards = make_cards(&[(2, 2), (4, 2), (6, 2), (8, 2)]);
        assert_eq!(evaluate_hand(&cards).id, HandId::HighCard);
    }

    #[test]
    fn test_four_consecutive_is_not_straight() {
        let cards = make_cards(&[(5, 0), (6, 1), (7, 2), (8, 3)]);
        assert_eq!(evaluate_hand(&cards).id, HandId::HighCard);
    }

    #[test]
    fn test_small_plays() {
        assert_eq!(evaluate_hand(&make_cards(&[(13, 0)])).id, HandId::HighCard);
        assert_eq!(evaluate_hand(&make_cards(&[(4, 0), (4, 3)])).id, HandId::Pair);
        assert_eq!(
            evaluate_hand(&make_cards(&[(4, 0), (4, 3), (6, 1), (6, 2)])).id,
            HandId::TwoPair
        );
        assert_eq!(
            evaluate_hand(&make_cards(&[(4, 0), (4, 3), (4, 1)])).id,
            HandId::ThreeKind
        );
    }

    #[test]
    fn test_only_first_five_cards_evaluated() {
        let cards = make_cards(&[(2, 0), (3, 0), (5, 0), (7, 0), (9, 0), (9, 1)]);
        let result = evaluate_hand(&cards);
        assert_eq!(result.id, HandId::Flush);
        assert_eq!(result.cards.len(), 5);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let cards = make_cards(&[(5, 0), (5, 1), (5, 2), (8, 0), (8, 1)]);
        assert_eq!(evaluate_hand(&cards), evaluate_hand(&cards));
    }

    // ========================================================================
    // 共用判定函式
    // ========================================================================

    #[test]
    fn test_predicates() {
        let pair = make_cards(&[(3, 0), (3, 1), (9, 2)]);
        assert!(has_pair(&pair));
        assert!(!has_pair(&make_cards(&[(3, 0), (4, 1)])));

        let counts = rank_counts(&make_cards(&[(3, 0), (3, 1), (9, 2), (9, 3), (9, 0)]));
        assert_eq!(max_rank_multiplicity(&counts), 3);
        assert_eq!(pair_count(&counts), 2);

        assert!(is_flush(&make_cards(&[(2, 1), (4, 1), (6, 1), (8, 1), (13, 1)])));
        assert!(!is_flush(&make_cards(&[(2, 1), (4, 1), (6, 1), (8, 1), (13, 0)])));
        assert!(!is_straight(&make_cards(&[(2, 1), (3, 1), (4, 1), (5, 1), (5, 0)])));

        let mixed = make_cards(&[(2, 1), (4, 1), (6, 3)]);
        assert_eq!(suit_count(&mixed, Suit::Diamonds), 2);
        assert_eq!(suit_count(&mixed, Suit::Spades), 1);
        assert_eq!(suit_count(&mixed, Suit::Hearts), 0);
    }
}
