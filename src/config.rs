//! 伺服器設定（環境變數）
//!
//! - `BADATRO_ADDR`: 監聽位址，預設 `127.0.0.1:50051`
//! - `BADATRO_UTC_OFFSET_MINUTES`: 當地時區偏移（分鐘），預設 0
//! - `BADATRO_AMBIENT_MULTIPLIER`: 固定環境倍率（未設定時依天氣與時段計算）

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::game::weather::local_seconds_of_day;

pub const ADDR_VAR: &str = "BADATRO_ADDR";
pub const UTC_OFFSET_VAR: &str = "BADATRO_UTC_OFFSET_MINUTES";
pub const AMBIENT_VAR: &str = "BADATRO_AMBIENT_MULTIPLIER";

pub const DEFAULT_ADDR: &str = "127.0.0.1:50051";

/// 時區偏移上限（±14 小時）
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub utc_offset_minutes: i32,
    pub ambient_override: Option<f64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 50051)),
            utc_offset_minutes: 0,
            ambient_override: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 由任意查詢函式載入，無效值退回預設並記錄警告
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let addr = parse_or(&lookup, ADDR_VAR, defaults.addr);

        let utc_offset_minutes = match parse_or(&lookup, UTC_OFFSET_VAR, defaults.utc_offset_minutes) {
            m if m.abs() <= MAX_UTC_OFFSET_MINUTES => m,
            m => {
                log::warn!("{}={} out of range, using 0", UTC_OFFSET_VAR, m);
                0
            }
        };

        let ambient_override = lookup(AMBIENT_VAR).and_then(|raw| match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
            _ => {
                log::warn!("ignoring {}={:?}", AMBIENT_VAR, raw);
                None
            }
        });

        Self {
            addr,
            utc_offset_minutes,
            ambient_override,
        }
    }

    /// 目前當地時間在一天中的秒數
    pub fn local_seconds_of_day(&self) -> u32 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        local_seconds_of_day(now, self.utc_offset_minutes)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Debug,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("invalid {}={:?}, using {:?}", key, raw, default);
            default
        }),
    }
}
