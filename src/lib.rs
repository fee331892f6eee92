//! Badatro 計分引擎
//!
//! - `game`: 純規則（卡牌、牌型判定、Joker、Blind、商店、天氣倍率）
//! - `service`: 計分管線與遊戲狀態
//! - `config`: 伺服器設定
//! - `proto`: gRPC 產生碼

pub mod proto {
    tonic::include_proto!("badatro");
}

pub mod config;
pub mod game;
pub mod service;
