//! Mood Preset Table
//!
//! Every mood the mascot can show maps to one immutable preset: how wide
//! each eye is drawn, how the mouth curves, and what the robot says when
//! the caller does not supply its own bubble text.
//!
//! Lookup never fails. Mood names arrive from page collaborators as plain
//! strings (form heuristics, JSON props), so anything unrecognized resolves
//! to the idle preset instead of surfacing an error.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic expressive state driving every visual parameter of the mascot
///
/// Deserializes from any value: exact lowercase names select a mood, and
/// everything else (other strings, `null`, numbers, objects) is idle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Resting state
    #[default]
    Idle,
    /// Politely looking away (password entry)
    Peek,
    /// Watching the user type
    Typing,
    /// Something caught its attention
    Curious,
    /// Celebrating a success
    Happy,
    /// Something went wrong
    Sad,
    /// Saying hello or goodbye
    Wave,
}

/// Static expressive parameters for one mood
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoodPreset {
    /// Scale applied to the left eye (1.0 = neutral)
    pub eye_left_scale: f32,
    /// Scale applied to the right eye (1.0 = neutral)
    pub eye_right_scale: f32,
    /// Mouth curvature; negative smiles, positive frowns
    pub mouth_curve: f32,
    /// Caption shown when the caller leaves the bubble text undefined
    pub default_speech: &'static str,
}

const IDLE: MoodPreset = MoodPreset {
    eye_left_scale: 1.0,
    eye_right_scale: 1.0,
    mouth_curve: 0.0,
    default_speech: "Chào bạn! Tôi là Robot học tập! 🤖",
};

const PEEK: MoodPreset = MoodPreset {
    eye_left_scale: 1.0,
    eye_right_scale: 1.0,
    mouth_curve: 0.0,
    default_speech: "Tôi sẽ không nhìn đâu! Bảo mật tối đa! 🔒",
};

const TYPING: MoodPreset = MoodPreset {
    eye_left_scale: 1.0,
    eye_right_scale: 1.0,
    mouth_curve: 0.0,
    default_speech: "Đang xử lý thông tin... ⚡",
};

const CURIOUS: MoodPreset = MoodPreset {
    eye_left_scale: 1.1,
    eye_right_scale: 1.1,
    mouth_curve: 0.0,
    default_speech: "Hmm... Có gì đó thú vị đây! 🤔",
};

const HAPPY: MoodPreset = MoodPreset {
    eye_left_scale: 1.2,
    eye_right_scale: 1.2,
    mouth_curve: -8.0,
    default_speech: "Tuyệt vời! Bạn làm tốt lắm! 🎉✨",
};

const SAD: MoodPreset = MoodPreset {
    eye_left_scale: 0.9,
    eye_right_scale: 0.9,
    mouth_curve: 8.0,
    default_speech: "Ôi không... Hãy thử lại nhé! 😢",
};

const WAVE: MoodPreset = MoodPreset {
    eye_left_scale: 1.0,
    eye_right_scale: 1.0,
    mouth_curve: -4.0,
    default_speech: "Hẹn gặp lại! Nhớ luyện tập nhé! 👋",
};

impl Mood {
    /// Every mood, in declaration order
    pub const ALL: [Mood; 7] = [
        Mood::Idle,
        Mood::Peek,
        Mood::Typing,
        Mood::Curious,
        Mood::Happy,
        Mood::Sad,
        Mood::Wave,
    ];

    /// The immutable preset for this mood
    #[must_use]
    pub fn preset(self) -> &'static MoodPreset {
        match self {
            Self::Idle => &IDLE,
            Self::Peek => &PEEK,
            Self::Typing => &TYPING,
            Self::Curious => &CURIOUS,
            Self::Happy => &HAPPY,
            Self::Sad => &SAD,
            Self::Wave => &WAVE,
        }
    }

    /// Lowercase name used in props and logs
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Peek => "peek",
            Self::Typing => "typing",
            Self::Curious => "curious",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Wave => "wave",
        }
    }

    /// Parse a mood name, falling back to [`Mood::Idle`] for anything unknown
    #[must_use]
    pub fn from_name_or_idle(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: UnknownMood| {
            tracing::debug!(mood = %err.0, "Unknown mood, falling back to idle");
            Self::Idle
        })
    }
}

/// Returned by the strict [`FromStr`] impl when a name matches no mood
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown mood: {0}")]
pub struct UnknownMood(pub String);

impl FromStr for Mood {
    type Err = UnknownMood;

    /// Exact match against the lowercase names; no trimming or case folding
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mood| mood.as_str() == s)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

impl From<String> for Mood {
    fn from(name: String) -> Self {
        Self::from_name_or_idle(&name)
    }
}

struct MoodVisitor;

impl MoodVisitor {
    fn fallback(kind: &str) -> Mood {
        tracing::debug!(kind, "Non-string mood, falling back to idle");
        Mood::Idle
    }
}

impl<'de> Visitor<'de> for MoodVisitor {
    type Value = Mood;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mood name or any other value")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Mood, E> {
        Ok(Mood::from_name_or_idle(v))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Mood, E> {
        Ok(Self::fallback("bool"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Mood, E> {
        Ok(Self::fallback("integer"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Mood, E> {
        Ok(Self::fallback("integer"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Mood, E> {
        Ok(Self::fallback("float"))
    }

    fn visit_bytes<E: de::Error>(self, _: &[u8]) -> Result<Mood, E> {
        Ok(Self::fallback("bytes"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Mood, E> {
        Ok(Self::fallback("null"))
    }

    fn visit_none<E: de::Error>(self) -> Result<Mood, E> {
        Ok(Self::fallback("null"))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Mood, D::Error> {
        Mood::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Mood, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Self::fallback("sequence"))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Mood, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Self::fallback("map"))
    }
}

impl<'de> Deserialize<'de> for Mood {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoodVisitor)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look up the preset for a mood
#[must_use]
pub fn lookup(mood: Mood) -> &'static MoodPreset {
    mood.preset()
}

/// Look up the preset for a mood name; unknown names get the idle preset
#[must_use]
pub fn lookup_name(name: &str) -> &'static MoodPreset {
    lookup(Mood::from_name_or_idle(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mood_has_its_own_preset() {
        let expected = [
            (Mood::Idle, 1.0, 1.0, 0.0),
            (Mood::Peek, 1.0, 1.0, 0.0),
            (Mood::Typing, 1.0, 1.0, 0.0),
            (Mood::Curious, 1.1, 1.1, 0.0),
            (Mood::Happy, 1.2, 1.2, -8.0),
            (Mood::Sad, 0.9, 0.9, 8.0),
            (Mood::Wave, 1.0, 1.0, -4.0),
        ];

        for (mood, left, right, curve) in expected {
            let preset = lookup(mood);
            assert!((preset.eye_left_scale - left).abs() < f32::EPSILON, "{mood}");
            assert!((preset.eye_right_scale - right).abs() < f32::EPSILON, "{mood}");
            assert!((preset.mouth_curve - curve).abs() < f32::EPSILON, "{mood}");
            assert_eq!(lookup_name(mood.as_str()), preset);
        }
    }

    #[test]
    fn test_default_speech_is_distinct_per_mood() {
        let mut speeches: Vec<_> = Mood::ALL.iter().map(|m| m.preset().default_speech).collect();
        speeches.sort_unstable();
        speeches.dedup();
        assert_eq!(speeches.len(), Mood::ALL.len());
    }

    #[test]
    fn test_unknown_name_falls_back_to_idle() {
        assert_eq!(lookup_name("grumpy"), lookup(Mood::Idle));
        assert_eq!(lookup_name(""), lookup(Mood::Idle));
        assert_eq!(Mood::from_name_or_idle("dancing"), Mood::Idle);
    }

    #[test]
    fn test_names_match_exactly() {
        assert_eq!("happy".parse::<Mood>(), Ok(Mood::Happy));
        assert_eq!(
            "HAPPY".parse::<Mood>(),
            Err(UnknownMood("HAPPY".to_string()))
        );
        assert_eq!(lookup_name("HAPPY"), lookup(Mood::Idle));
        assert_eq!(lookup_name(" sad "), lookup(Mood::Idle));
        assert_eq!(Mood::from_name_or_idle("Sad"), Mood::Idle);
    }

    #[test]
    fn test_deserialize_any_value() {
        let cases = [
            (r#""sad""#, Mood::Sad),
            (r#""SAD""#, Mood::Idle),
            ("null", Mood::Idle),
            ("3", Mood::Idle),
            ("-1.5", Mood::Idle),
            ("true", Mood::Idle),
            (r#"{"name": "happy"}"#, Mood::Idle),
            (r#"["happy"]"#, Mood::Idle),
        ];
        for (json, expected) in cases {
            let mood: Mood = serde_json::from_str(json).unwrap();
            assert_eq!(mood, expected, "{json}");
        }
    }

    #[test]
    fn test_default_mood_is_idle() {
        assert_eq!(Mood::default(), Mood::Idle);
    }
}
