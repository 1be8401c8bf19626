//! Short weather/time-of-day blurb shown above the recommendations.

use chrono::{DateTime, Local, TimeDelta, Timelike, Utc};

use crate::model::WeatherPayload;

const HOT_SUGGESTION: &str =
    "Perfect time to enjoy cold drinks, ice-creams, and light refreshing dishes.";
const COOL_SUGGESTION: &str =
    "A bit cool, so mildly warm meals, soups, and baked dishes will feel great.";
const MILD_SUGGESTION: &str = "Great for grills, balanced meals, and not-too-heavy dishes.";
const CLOUDS_SUGGESTION: &str =
    "Mildly warm bowls, sandwiches, and snacks work really well right now.";
const RAIN_SUGGESTION: &str =
    "Comfort foods, hot soups, pakoras, and tea/coffee are a perfect match.";
const STORM_SUGGESTION: &str = "Stay in with hot, comforting meals and warm drinks.";
const SNOW_SUGGESTION: &str = "Rich curries, baked dishes, and hearty soups are ideal.";
const DEFAULT_SUGGESTION: &str = "Here are some options you might enjoy right now.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Night,
    Morning,
    Afternoon,
    Evening,
    Day,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            20..=23 | 0..=5 => TimeOfDay::Night,
            6..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=19 => TimeOfDay::Evening,
            _ => TimeOfDay::Day,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Night => "night",
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Day => "day",
        }
    }
}

/// Build the context text for `weather` as of now.
pub fn weather_context(weather: Option<&WeatherPayload>) -> String {
    weather_context_at(weather, Utc::now())
}

/// Build the two-line context text for `weather` at instant `now`.
///
/// Returns an empty string when there is no payload or it carries no
/// condition entries.
pub fn weather_context_at(weather: Option<&WeatherPayload>, now: DateTime<Utc>) -> String {
    let Some(weather) = weather else {
        return String::new();
    };
    let Some(keyword) = weather.condition_keyword() else {
        return String::new();
    };

    let temp_c = weather.temperature_c().map(round_half_up);
    let time = local_hour(now, weather.timezone).map_or(TimeOfDay::Day, TimeOfDay::from_hour);
    let band = time.as_str();

    let (mood, suggestion) = match keyword.as_str() {
        "clear" => {
            let feel = if time == TimeOfDay::Night { "pleasant" } else { "sunny" };
            let suggestion = match temp_c {
                Some(t) if t >= 28 => HOT_SUGGESTION,
                Some(t) if t <= 15 => COOL_SUGGESTION,
                _ => MILD_SUGGESTION,
            };
            (format!("a clear, {feel} {band}"), suggestion)
        }
        "clouds" => (format!("a cozy, cloudy {band}"), CLOUDS_SUGGESTION),
        "rain" | "drizzle" => (format!("a rainy {band}"), RAIN_SUGGESTION),
        "thunderstorm" => (format!("a stormy {band}"), STORM_SUGGESTION),
        "snow" => (format!("a cold, snowy {band}"), SNOW_SUGGESTION),
        _ => (format!("a nice {band}"), DEFAULT_SUGGESTION),
    };

    let temp_text = temp_c.map(|t| format!("around {t}°C, ")).unwrap_or_default();

    format!("Right now it is {temp_text}{mood}.\n{suggestion}")
}

/// Wall-clock hour at the target location, or the host's own hour when the
/// offset is unknown. `None` when the offset is out of range.
fn local_hour(now: DateTime<Utc>, utc_offset_secs: Option<i64>) -> Option<u32> {
    match utc_offset_secs {
        Some(offset) => TimeDelta::try_seconds(offset)
            .and_then(|delta| now.checked_add_signed(delta))
            .map(|local| local.hour()),
        None => Some(now.with_timezone(&Local).hour()),
    }
}

// Halves round towards +inf, so -2.5 becomes -2.
fn round_half_up(t: f64) -> i64 {
    (t + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{WeatherCondition, WeatherMain};
    use chrono::TimeZone;

    fn payload(main: &str, temp: Option<f64>, timezone: Option<i64>) -> WeatherPayload {
        WeatherPayload {
            weather: vec![WeatherCondition { main: Some(main.to_string()), description: None }],
            main: Some(WeatherMain { temp }),
            timezone,
            name: None,
        }
    }

    fn at_utc(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, 15, 0).single().expect("valid instant")
    }

    #[test]
    fn empty_for_missing_payload_or_conditions() {
        assert_eq!(weather_context_at(None, at_utc(12)), "");

        let empty = WeatherPayload::default();
        assert_eq!(weather_context_at(Some(&empty), at_utc(12)), "");
    }

    #[test]
    fn clear_suggestion_follows_temperature() {
        let hot = weather_context_at(Some(&payload("Clear", Some(30.0), Some(0))), at_utc(13));
        assert!(hot.contains(HOT_SUGGESTION));
        assert!(hot.starts_with("Right now it is around 30°C, a clear, sunny afternoon."));

        let cool = weather_context_at(Some(&payload("clear", Some(10.0), Some(3600))), at_utc(13));
        assert!(cool.contains(COOL_SUGGESTION));

        let mild = weather_context_at(Some(&payload("clear", Some(20.0), Some(-7200))), at_utc(13));
        assert!(mild.contains(MILD_SUGGESTION));
    }

    #[test]
    fn clear_without_temperature_is_mild() {
        let text = weather_context_at(Some(&payload("clear", None, Some(0))), at_utc(9));
        assert_eq!(text, format!("Right now it is a clear, sunny morning.\n{MILD_SUGGESTION}"));
    }

    #[test]
    fn offset_zero_at_22_utc_is_night() {
        let text = weather_context_at(Some(&payload("clear", Some(18.0), Some(0))), at_utc(22));
        assert!(text.contains("a clear, pleasant night"));
    }

    #[test]
    fn offset_shifts_the_band() {
        // 22:15 UTC is 07:15 at +09:00.
        let text = weather_context_at(Some(&payload("clouds", None, Some(9 * 3600))), at_utc(22));
        assert!(text.contains("a cozy, cloudy morning"));

        // 03:15 UTC is 18:15 at -09:00.
        let text = weather_context_at(Some(&payload("snow", None, Some(-9 * 3600))), at_utc(3));
        assert!(text.contains("a cold, snowy evening"));
    }

    #[test]
    fn condition_table() {
        let now = at_utc(14);
        let cases = [
            ("Rain", "a rainy afternoon", RAIN_SUGGESTION),
            ("Drizzle", "a rainy afternoon", RAIN_SUGGESTION),
            ("Thunderstorm", "a stormy afternoon", STORM_SUGGESTION),
            ("Snow", "a cold, snowy afternoon", SNOW_SUGGESTION),
            ("Clouds", "a cozy, cloudy afternoon", CLOUDS_SUGGESTION),
            ("Haze", "a nice afternoon", DEFAULT_SUGGESTION),
        ];

        for (main, mood, suggestion) in cases {
            let text = weather_context_at(Some(&payload(main, Some(21.6), Some(0))), now);
            assert_eq!(text, format!("Right now it is around 22°C, {mood}.\n{suggestion}"));
        }
    }

    #[test]
    fn two_lines_joined_by_single_newline() {
        let text = weather_context_at(Some(&payload("rain", Some(5.0), Some(0))), at_utc(18));
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Right now it is around 5°C, a rainy evening.");
    }

    #[test]
    fn out_of_range_offset_falls_back_to_day() {
        let weather: WeatherPayload =
            serde_json::from_str(r#"{"weather":[{"main":"Clear"}],"timezone":1e15}"#)
                .expect("payload should decode");
        let text = weather_context_at(Some(&weather), at_utc(22));
        assert!(text.starts_with("Right now it is a clear, sunny day."));

        let weather = payload("rain", Some(9.0), Some(i64::MAX));
        let text = weather_context_at(Some(&weather), at_utc(22));
        assert!(text.contains("a rainy day"));
    }

    #[test]
    fn hour_bands() {
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(20), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(24), TimeOfDay::Day);
    }

    #[test]
    fn temperature_rounds_half_up() {
        assert_eq!(round_half_up(27.5), 28);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(15.4), 15);
    }
}
