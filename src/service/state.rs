//! 遊戲狀態管理
//!
//! 每張牌同一時間只存在於一個容器：牌組、手牌、待計分區、棄牌堆。

use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};

use crate::game::weather::{ambient_multiplier, sanitize_multiplier};
use crate::game::{
    blind_target, blinds::clear_reward, standard_deck, AmbientState, Ante, BlindType, Card,
    GameEnd, GameError, JokerId, JokerSlot, Shop, Stage, WeatherReport,
    DEFAULT_AMBIENT_MULTIPLIER, DISCARDS_PER_BLIND, HAND_SIZE, JOKER_SLOTS, PLAYS_PER_BLIND,
    SHOP_JOKER_COUNT, STARTING_MONEY,
};

use super::scoring::{build_selected, score_play, PlayScore};

/// 出牌結果
#[derive(Clone, Debug, PartialEq)]
pub struct PlayOutcome {
    pub score: PlayScore,
    pub blind_cleared: bool,
}

/// 遊戲狀態
pub struct GameState {
    pub rng: StdRng,

    // 牌組（只能經由出牌、棄牌、發牌移動）
    pub(crate) deck: Vec<Card>,
    pub(crate) hand: Vec<Card>,
    pub(crate) to_be_scored: Vec<Card>,
    pub(crate) discarded: Vec<Card>,

    // Joker
    pub jokers: Vec<JokerSlot>,

    // 商店
    pub shop: Shop,

    // 遊戲進度
    pub stage: Stage,
    pub blind_type: Option<BlindType>,
    pub next_blind: BlindType,
    pub ante: Ante,
    pub round: i32,

    // 當前 Blind 狀態
    pub plays_left: i32,
    pub discards_left: i32,
    pub score: i64,

    // 經濟
    pub money: i64,
    pub reward: i64,

    // 環境倍率
    pub weather: Option<WeatherReport>,
    pub ambient_multiplier: f64,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            deck: standard_deck(),
            hand: Vec::new(),
            to_be_scored: Vec::new(),
            discarded: Vec::new(),
            jokers: Vec::new(),
            shop: Shop::new(),
            stage: Stage::PreBlind,
            blind_type: None,
            next_blind: BlindType::Small,
            ante: Ante::One,
            round: 1,
            plays_left: PLAYS_PER_BLIND,
            discards_left: DISCARDS_PER_BLIND,
            score: 0,
            money: STARTING_MONEY,
            reward: 0,
            weather: None,
            ambient_multiplier: DEFAULT_AMBIENT_MULTIPLIER,
        }
    }

    /// 當前（或下一個）Blind 的目標分數
    pub fn required_score(&self) -> i64 {
        blind_target(self.ante.to_int(), self.blind_type.unwrap_or(self.next_blind))
    }

    /// Joker 計分用的狀態快照
    pub fn ambient_state(&self) -> AmbientState {
        AmbientState::new(self.discards_left)
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn discarded(&self) -> &[Card] {
        &self.discarded
    }

    /// 牌組剩餘張數
    pub fn deck_remaining(&self) -> usize {
        self.deck.len()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.stage, Stage::End(_))
    }

    fn expect_stage(&self, expected: Stage) -> Result<(), GameError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(GameError::WrongStage {
                expected,
                actual: self.stage,
            })
        }
    }

    // ========================================================================
    // Blind 流程
    // ========================================================================

    /// 選擇 Blind（必須依 Small -> Big -> Boss 順序）
    pub fn select_blind(&mut self, blind: BlindType) -> Result<(), GameError> {
        self.expect_stage(Stage::PreBlind)?;
        if blind != self.next_blind {
            return Err(GameError::BlindOutOfOrder(blind));
        }

        self.blind_type = Some(blind);
        self.stage = Stage::Blind;
        self.plays_left = PLAYS_PER_BLIND;
        self.discards_left = DISCARDS_PER_BLIND;
        self.score = 0;
        self.reward = 0;
        self.deal();

        log::info!(
            "ante {} {:?} blind started, target {}",
            self.ante.to_int(),
            blind,
            self.required_score()
        );
        Ok(())
    }

    /// 重建洗好的 52 張牌組並發牌
    pub fn deal(&mut self) {
        self.deck = standard_deck();
        self.deck.shuffle(&mut self.rng);
        self.hand.clear();
        self.to_be_scored.clear();
        self.discarded.clear();
        self.fill_hand();
    }

    /// 從牌組補牌至手牌上限
    pub fn fill_hand(&mut self) {
        let need = HAND_SIZE.saturating_sub(self.hand.len()).min(self.deck.len());
        self.hand.extend(self.deck.drain(..need));
    }

    /// 依索引把牌移出手牌（保留選擇順序）
    fn take_selected(&mut self, indices: &[usize]) -> Result<Vec<Card>, GameError> {
        let selected = build_selected(&self.hand, indices)?;
        let taken = &indices[..selected.len()];
        let mut position = 0;
        self.hand.retain(|_| {
            let keep = !taken.contains(&position);
            position += 1;
            keep
        });
        Ok(selected)
    }

    /// 出牌
    pub fn play(&mut self, indices: &[usize]) -> Result<PlayOutcome, GameError> {
        self.expect_stage(Stage::Blind)?;
        if self.plays_left <= 0 {
            return Err(GameError::NoPlaysLeft);
        }

        self.to_be_scored = self.take_selected(indices)?;
        let result = score_play(
            &self.to_be_scored,
            &self.jokers,
            &self.ambient_state(),
            self.ambient_multiplier,
        );
        self.discarded.append(&mut self.to_be_scored);

        self.plays_left -= 1;
        self.score = self.score.saturating_add(result.score);
        self.fill_hand();

        log::debug!(
            "played {} for {} ({} / {})",
            result.hand.id.name(),
            result.score,
            self.score,
            self.required_score()
        );

        let blind_cleared = self.score >= self.required_score();
        if blind_cleared {
            self.clear_blind();
        } else if self.plays_left == 0 {
            self.game_over();
        }

        Ok(PlayOutcome {
            score: result,
            blind_cleared,
        })
    }

    /// 棄牌，回傳棄掉的張數
    pub fn discard(&mut self, indices: &[usize]) -> Result<usize, GameError> {
        self.expect_stage(Stage::Blind)?;
        if self.discards_left <= 0 {
            return Err(GameError::NoDiscardsLeft);
        }

        let mut cards = self.take_selected(indices)?;
        let count = cards.len();
        self.discarded.append(&mut cards);
        self.discards_left -= 1;
        self.fill_hand();
        Ok(count)
    }

    /// 過關：發放獎勵，Boss 之後進入下一個 Ante，通過最終 Ante 即獲勝
    fn clear_blind(&mut self) {
        let blind = self.blind_type.unwrap_or(self.next_blind);
        self.reward = clear_reward(blind, self.plays_left, self.discards_left, self.money);
        self.money += self.reward;

        log::info!(
            "{:?} blind cleared with {} points, reward ${}",
            blind,
            self.score,
            self.reward
        );

        match blind.next() {
            Some(next) => self.next_blind = next,
            None => match self.ante.next() {
                Some(next_ante) if !self.ante.is_final() => {
                    self.ante = next_ante;
                    self.next_blind = BlindType::Small;
                }
                _ => {
                    self.stage = Stage::End(GameEnd::Win);
                    log::info!("run won at ante {}", self.ante.to_int());
                    return;
                }
            },
        }

        self.round += 1;
        self.stage = Stage::Shop;
        self.shop.refresh(&mut self.rng, SHOP_JOKER_COUNT);
    }

    /// 出牌次數用完仍未達標：清空 Joker，金幣與 Ante 重置
    fn game_over(&mut self) {
        log::info!(
            "run lost at ante {} with {} / {}",
            self.ante.to_int(),
            self.score,
            self.required_score()
        );
        self.stage = Stage::End(GameEnd::Lose);
        self.jokers.clear();
        self.shop.clear();
        self.money = STARTING_MONEY;
        self.ante = Ante::One;
        self.next_blind = BlindType::Small;
        self.blind_type = None;
    }

    // ========================================================================
    // 商店
    // ========================================================================

    pub fn leave_shop(&mut self) -> Result<(), GameError> {
        self.expect_stage(Stage::Shop)?;
        self.shop.clear();
        self.blind_type = None;
        self.stage = Stage::PreBlind;
        Ok(())
    }

    /// 購買商店中的 Joker
    pub fn buy_joker(&mut self, index: usize) -> Result<JokerId, GameError> {
        self.expect_stage(Stage::Shop)?;
        let cost = self
            .shop
            .item(index)
            .map(|item| item.cost)
            .ok_or(GameError::IndexOutOfRange(index))?;
        if self.jokers.len() >= JOKER_SLOTS {
            return Err(GameError::JokerSlotsFull);
        }
        if self.money < cost {
            return Err(GameError::InsufficientFunds {
                cost,
                money: self.money,
            });
        }

        let item = self
            .shop
            .buy(index)
            .ok_or(GameError::IndexOutOfRange(index))?;
        self.money -= item.cost;
        self.jokers.push(JokerSlot::new(item.joker));
        log::info!("bought {} for ${}", item.joker.name(), item.cost);
        Ok(item.joker)
    }

    /// 賣出持有的 Joker，回傳獲得金額
    pub fn sell_joker(&mut self, index: usize) -> Result<i64, GameError> {
        self.expect_stage(Stage::Shop)?;
        if index >= self.jokers.len() {
            return Err(GameError::IndexOutOfRange(index));
        }
        let slot = self.jokers.remove(index);
        let value = slot.id.sell_value();
        self.money += value;
        log::info!("sold {} for ${}", slot.id.name(), value);
        Ok(value)
    }

    // ========================================================================
    // 環境倍率
    // ========================================================================

    /// 更新天氣並依當地時段重新計算環境倍率
    pub fn set_weather(&mut self, report: Option<WeatherReport>, seconds_of_day: u32) {
        self.ambient_multiplier = ambient_multiplier(report.as_ref(), seconds_of_day);
        self.weather = report;
    }

    /// 直接指定環境倍率（無效值以 1.0 取代）
    pub fn set_ambient_multiplier(&mut self, value: f64) {
        self.ambient_multiplier = sanitize_multiplier(value);
    }
}

// ============================================================================
// 單元測試
// ============================================================================
