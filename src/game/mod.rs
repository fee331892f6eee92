//! 遊戲核心模組
//!
//! 純規則定義，不持有狀態：
//! - `constants`: 遊戲常量
//! - `error`: 錯誤類型
//! - `cards`: 卡牌定義
//! - `hand_types`: 牌型定義
//! - `scoring`: 牌型判定與共用判定函式
//! - `joker`: Joker 系統
//! - `blinds`: Blind、Ante 定義
//! - `shop`: 商店系統
//! - `weather`: 環境倍率（天氣 × 時段）

pub mod constants;
pub mod error;
pub mod cards;
pub mod hand_types;
pub mod scoring;
pub mod joker;
pub mod blinds;
pub mod shop;
pub mod weather;

pub use constants::*;
pub use error::GameError;
pub use cards::{Card, Suit, card_chip_value, standard_deck};
pub use hand_types::{HandId, HandResult, HAND_TYPE_COUNT};
pub use scoring::evaluate_hand;
pub use joker::{AmbientState, JokerId, JokerSlot, resolve_jokers, JOKER_COUNT};
pub use blinds::{Ante, BlindType, GameEnd, Stage, blind_target};
pub use shop::{Shop, ShopItem};
pub use weather::{WeatherReport, parse_weather_payload};
