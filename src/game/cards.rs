//! 卡牌定義

use std::fmt;

use super::error::GameError;

/// 花色
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// 從整數索引建立 (0=Hearts, 1=Diamonds, 2=Clubs, 3=Spades)
    pub fn from_index(index: u8) -> Result<Self, GameError> {
        match index {
            0 => Ok(Suit::Hearts),
            1 => Ok(Suit::Diamonds),
            2 => Ok(Suit::Clubs),
            3 => Ok(Suit::Spades),
            n => Err(GameError::InvalidSuit(n)),
        }
    }

    pub fn to_index(&self) -> u8 {
        match self {
            Suit::Hearts => 0,
            Suit::Diamonds => 1,
            Suit::Clubs => 2,
            Suit::Spades => 3,
        }
    }

    pub fn all() -> &'static [Suit] {
        &[Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades]
    }

    pub fn symbol(&self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

pub const ACE: u8 = 14;
pub const KING: u8 = 13;
pub const QUEEN: u8 = 12;
pub const JACK: u8 = 11;

/// 卡牌（建立後不可變）
///
/// 兩張同點數同花色的牌視為相同。`is_joker` 標記非標準牌，
/// 其 rank 為 0，不會與任何標準牌相等。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Card {
    rank: u8, // 2..=14 (Ace = 14)，joker 標記牌為 0
    suit: Suit,
    is_joker: bool,
}

impl Card {
    /// 建立標準牌，點數或花色超出範圍時拒絕
    pub fn new(rank: u8, suit: u8) -> Result<Self, GameError> {
        if !(2..=ACE).contains(&rank) {
            return Err(GameError::InvalidRank(rank));
        }
        let suit = Suit::from_index(suit)?;
        Ok(Self::of(rank, suit))
    }

    fn of(rank: u8, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            is_joker: false,
        }
    }

    /// Joker 標記牌
    pub fn joker() -> Self {
        Self {
            rank: 0,
            suit: Suit::Hearts,
            is_joker: true,
        }
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn is_joker(&self) -> bool {
        self.is_joker
    }

    /// 是否為面牌 (J, Q, K)
    pub fn is_face(&self) -> bool {
        (JACK..=KING).contains(&self.rank)
    }

    /// 單張牌的 chips
    pub fn chip_value(&self) -> i64 {
        card_chip_value(self)
    }
}

/// 單張牌的 chips，只取決於點數：J/Q/K = 10，A = 11，其餘為面值
pub fn card_chip_value(card: &Card) -> i64 {
    match card.rank {
        ACE => 11,
        JACK..=KING => 10,
        n => n as i64,
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_joker {
            return write!(f, "Joker");
        }
        match self.rank {
            JACK => write!(f, "J")?,
            QUEEN => write!(f, "Q")?,
            KING => write!(f, "K")?,
            ACE => write!(f, "A")?,
            n => write!(f, "{}", n)?,
        }
        write!(f, "{}", self.suit.symbol())
    }
}

/// 創建標準 52 張牌組
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for &suit in Suit::all() {
        for rank in 2..=ACE {
            deck.push(Card::of(rank, suit));
        }
    }
    deck
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_card_construction_rejects_bad_input() {
        assert_eq!(Card::new(1, 0), Err(GameError::InvalidRank(1)));
        assert_eq!(Card::new(15, 0), Err(GameError::InvalidRank(15)));
        assert_eq!(Card::new(7, 4), Err(GameError::InvalidSuit(4)));
        assert!(Card::new(2, 3).is_ok());
        assert!(Card::new(14, 0).is_ok());
    }

    #[test]
    fn test_card_chip_value() {
        assert_eq!(Card::new(14, 0).unwrap().chip_value(), 11);
        assert_eq!(Card::new(11, 1).unwrap().chip_value(), 10);
        assert_eq!(Card::new(12, 2).unwrap().chip_value(), 10);
        assert_eq!(Card::new(13, 3).unwrap().chip_value(), 10);
        assert_eq!(Card::new(10, 3).unwrap().chip_value(), 10);
        assert_eq!(Card::new(7, 2).unwrap().chip_value(), 7);
        assert_eq!(Card::joker().chip_value(), 0);
    }

    #[test]
    fn test_chip_value_ignores_suit() {
        for rank in 2..=14 {
            let values: HashSet<i64> = (0..4)
                .map(|s| Card::new(rank, s).unwrap().chip_value())
                .collect();
            assert_eq!(values.len(), 1);
        }
    }

    #[test]
    fn test_card_equality_by_rank_and_suit() {
        assert_eq!(Card::new(9, 1).unwrap(), Card::new(9, 1).unwrap());
        assert_ne!(Card::new(9, 1).unwrap(), Card::new(9, 2).unwrap());
        assert_ne!(Card::joker(), Card::new(2, 0).unwrap());
    }

    #[test]
    fn test_face_cards() {
        assert!(Card::new(11, 0).unwrap().is_face());
        assert!(Card::new(13, 0).unwrap().is_face());
        assert!(!Card::new(14, 0).unwrap().is_face());
        assert!(!Card::new(10, 0).unwrap().is_face());
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(10, 0).unwrap().to_string(), "10♥");
        assert_eq!(Card::new(14, 3).unwrap().to_string(), "A♠");
        assert_eq!(Card::new(11, 1).unwrap().to_string(), "J♦");
        assert_eq!(Card::joker().to_string(), "Joker");
    }

    #[test]
    fn test_standard_deck() {
        let deck = standard_deck();
        assert_eq!(deck.len(), 52);

        let seen: HashSet<Card> = deck.iter().copied().collect();
        assert_eq!(seen.len(), 52);
        assert!(!seen.contains(&Card::joker()));
        for &suit in Suit::all() {
            assert_eq!(deck.iter().filter(|c| c.suit() == suit).count(), 13);
        }
    }
}
