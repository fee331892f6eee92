//! 環境倍率
//!
//! 最終分數會乘上一個環境倍率：天氣係數 × 時段係數。
//! 天氣資料由呼叫端提供（天氣 API 的 JSON 原文），這裡只負責解析與換算。

use serde_json::Value;

use super::constants::DEFAULT_AMBIENT_MULTIPLIER;

const SECONDS_PER_HOUR: u32 = 3_600;
const SECONDS_PER_DAY: u32 = 86_400;

/// 天氣條件關鍵字與係數，依序比對，第一個命中者生效
const WEATHER_FACTORS: &[(&[&str], f64)] = &[
    (&["sunny", "clear"], 1.2),
    (&["partly cloudy"], 1.1),
    (&["cloudy", "overcast"], 0.9),
    (&["rain", "drizzle"], 0.8),
    (&["thunder", "storm"], 0.7),
    (&["snow", "sleet"], 0.6),
];

/// 時段區間（開區間，單位：小時）與係數
const TIME_FACTORS: &[(u32, u32, f64)] = &[
    (5, 7, 1.3),   // 清晨
    (7, 9, 1.2),   // 早上通勤
    (17, 19, 1.2), // 傍晚
    (19, 21, 1.3), // 夜晚
];

/// 天氣報告
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherReport {
    pub condition: String,
    pub temperature_f: Option<f64>,
}

/// 天氣係數（不分大小寫的子字串比對）
pub fn weather_multiplier(condition: &str) -> f64 {
    let condition = condition.to_lowercase();
    WEATHER_FACTORS
        .iter()
        .find(|(keys, _)| keys.iter().any(|k| condition.contains(k)))
        .map(|&(_, factor)| factor)
        .unwrap_or(DEFAULT_AMBIENT_MULTIPLIER)
}

/// 時段係數，輸入為當地時間一天中的秒數
///
/// 區間端點不算在內，例如 07:00:00 整點不屬於任何區間。
pub fn time_of_day_multiplier(seconds_of_day: u32) -> f64 {
    let t = seconds_of_day % SECONDS_PER_DAY;
    TIME_FACTORS
        .iter()
        .find(|&&(start, end, _)| t > start * SECONDS_PER_HOUR && t < end * SECONDS_PER_HOUR)
        .map(|&(_, _, factor)| factor)
        .unwrap_or(DEFAULT_AMBIENT_MULTIPLIER)
}

/// 環境倍率 = 天氣係數 × 時段係數，沒有天氣報告時天氣係數為 1.0
pub fn ambient_multiplier(report: Option<&WeatherReport>, seconds_of_day: u32) -> f64 {
    let weather = report
        .map(|r| weather_multiplier(&r.condition))
        .unwrap_or(DEFAULT_AMBIENT_MULTIPLIER);
    weather * time_of_day_multiplier(seconds_of_day)
}

/// 負數或非有限值的倍率以 1.0 取代
pub fn sanitize_multiplier(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("unusable ambient multiplier {}, using {}", value, DEFAULT_AMBIENT_MULTIPLIER);
        DEFAULT_AMBIENT_MULTIPLIER
    }
}

/// 解析天氣 API 回應，讀取 `current.condition.text` 與 `current.temp_f`
///
/// 解析失敗或缺少條件文字時回傳 None。
pub fn parse_weather_payload(payload: &str) -> Option<WeatherReport> {
    let root: Value = match serde_json::from_str(payload) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("weather payload is not valid JSON: {}", e);
            return None;
        }
    };
    let current = root.get("current")?;
    let condition = current.get("condition")?.get("text")?.as_str()?.to_string();
    let temperature_f = current.get("temp_f").and_then(Value::as_f64);
    Some(WeatherReport {
        condition,
        temperature_f,
    })
}

/// 以 UTC 秒數與時區偏移（分鐘）換算當地一天中的秒數
pub fn local_seconds_of_day(unix_seconds: u64, utc_offset_minutes: i32) -> u32 {
    let offset = utc_offset_minutes as i64 * 60;
    let local = unix_seconds as i64 + offset;
    local.rem_euclid(SECONDS_PER_DAY as i64) as u32
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> u32 {
        hour * 3_600 + minute * 60
    }

    #[test]
    fn test_weather_multiplier() {
        assert_eq!(weather_multiplier("Sunny"), 1.2);
        assert_eq!(weather_multiplier("Clear"), 1.2);
        assert_eq!(weather_multiplier("Partly cloudy"), 1.1);
        assert_eq!(weather_multiplier("Overcast"), 0.9);
        assert_eq!(weather_multiplier("Cloudy"), 0.9);
        assert_eq!(weather_multiplier("Light rain shower"), 0.8);
        assert_eq!(weather_multiplier("Patchy light drizzle"), 0.8);
        assert_eq!(weather_multiplier("Thundery outbreaks"), 0.7);
        assert_eq!(weather_multiplier("Blizzard snow"), 0.6);
        assert_eq!(weather_multiplier("Mist"), 1.0);
        assert_eq!(weather_multiplier(""), 1.0);
    }

    #[test]
    fn test_time_multiplier_open_intervals() {
        assert_eq!(time_of_day_multiplier(at(6, 0)), 1.3);
        assert_eq!(time_of_day_multiplier(at(8, 30)), 1.2);
        assert_eq!(time_of_day_multiplier(at(18, 0)), 1.2);
        assert_eq!(time_of_day_multiplier(at(20, 59)), 1.3);
        assert_eq!(time_of_day_multiplier(at(12, 0)), 1.0);
        assert_eq!(time_of_day_multiplier(at(23, 0)), 1.0);
        // 端點不算
        assert_eq!(time_of_day_multiplier(at(5, 0)), 1.0);
        assert_eq!(time_of_day_multiplier(at(7, 0)), 1.0);
        assert_eq!(time_of_day_multiplier(at(21, 0)), 1.0);
        assert_eq!(time_of_day_multiplier(at(7, 0) + 1), 1.2);
    }

    #[test]
    fn test_ambient_multiplier() {
        let report = WeatherReport {
            condition: "Sunny".to_string(),
            temperature_f: Some(75.0),
        };
        let m = ambient_multiplier(Some(&report), at(6, 0));
        assert!((m - 1.56).abs() < 1e-9);
        assert_eq!(ambient_multiplier(None, at(12, 0)), 1.0);
        assert!((ambient_multiplier(None, at(20, 0)) - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_sanitize_multiplier() {
        assert_eq!(sanitize_multiplier(1.5), 1.5);
        assert_eq!(sanitize_multiplier(0.0), 0.0);
        assert_eq!(sanitize_multiplier(-2.0), 1.0);
        assert_eq!(sanitize_multiplier(f64::NAN), 1.0);
        assert_eq!(sanitize_multiplier(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_parse_weather_payload() {
        let payload = r#"{"location":{"name":"Taipei"},"current":{"temp_f":82.4,"condition":{"text":"Partly cloudy","code":1003}}}"#;
        let report = parse_weather_payload(payload).unwrap();
        assert_eq!(report.condition, "Partly cloudy");
        assert_eq!(report.temperature_f, Some(82.4));
    }

    #[test]
    fn test_parse_weather_payload_failures() {
        assert_eq!(parse_weather_payload("not json"), None);
        assert_eq!(parse_weather_payload("{}"), None);
        assert_eq!(parse_weather_payload(r#"{"current":{"temp_f":50}}"#), None);

        let no_temp = parse_weather_payload(r#"{"current":{"condition":{"text":"Rain"}}}"#).unwrap();
        assert_eq!(no_temp.temperature_f, None);
    }

    #[test]
    fn test_local_seconds_of_day() {
        // 1970-01-01 00:00 UTC
        assert_eq!(local_seconds_of_day(0, 0), 0);
        assert_eq!(local_seconds_of_day(0, 480), at(8, 0));
        assert_eq!(local_seconds_of_day(0, -60), at(23, 0));
        assert_eq!(local_seconds_of_day(86_400 + 3_600, 0), at(1, 0));
    }
}
