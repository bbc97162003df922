//! Speech Bubble Resolver
//!
//! Bubble text is tri-state: the caller can suppress the bubble, leave it
//! to the mood's default line, or supply its own text (even an empty one).

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::mood::{lookup, Mood};

/// Caller-supplied bubble text
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum BubbleText {
    /// Explicitly suppressed (`null`)
    Suppressed,
    /// Not supplied; the mood's default speech is shown
    #[default]
    MoodDefault,
    /// Shown verbatim, including the empty string
    Custom(String),
}

impl BubbleText {
    /// Custom text
    pub fn custom(text: impl Into<String>) -> Self {
        Self::Custom(text.into())
    }

    /// Build from the nullable-optional form hosts often carry
    ///
    /// `None` is "not supplied", `Some(None)` is "suppressed".
    #[must_use]
    pub fn from_override(value: Option<Option<String>>) -> Self {
        match value {
            None => Self::MoodDefault,
            Some(None) => Self::Suppressed,
            Some(Some(text)) => Self::Custom(text),
        }
    }

    /// Whether the mood's default line applies
    #[must_use]
    pub fn is_mood_default(&self) -> bool {
        matches!(self, Self::MoodDefault)
    }
}

impl From<&str> for BubbleText {
    fn from(text: &str) -> Self {
        Self::Custom(text.to_string())
    }
}

/// A present field is either `null` or a string; an absent field never
/// reaches this impl (use `#[serde(default)]` on the containing field).
/// Serialization mirrors that: pair it with
/// `skip_serializing_if = "BubbleText::is_mood_default"`.
impl<'de> Deserialize<'de> for BubbleText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<String>::deserialize(deserializer)? {
            None => Self::Suppressed,
            Some(text) => Self::Custom(text),
        })
    }
}

impl Serialize for BubbleText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Suppressed | Self::MoodDefault => serializer.serialize_none(),
            Self::Custom(text) => serializer.serialize_some(text),
        }
    }
}

/// Resolve the caption shown in the bubble, or `None` when suppressed
#[must_use]
pub fn resolve(bubble: &BubbleText, mood: Mood) -> Option<String> {
    match bubble {
        BubbleText::Suppressed => None,
        BubbleText::MoodDefault => Some(lookup(mood).default_speech.to_string()),
        BubbleText::Custom(text) => Some(text.clone()),
    }
}

/// Optional headline shown under the mascot, with a subline beneath it
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Caption {
    /// Main line
    pub headline: String,
    /// Secondary line
    pub subline: Option<String>,
}

impl Caption {
    /// Caption for the given lines; a subline without a headline is dropped
    #[must_use]
    pub fn from_lines(headline: Option<&str>, subline: Option<&str>) -> Option<Self> {
        headline.map(|headline| Self {
            headline: headline.to_string(),
            subline: subline.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_uses_mood_default() {
        assert_eq!(
            resolve(&BubbleText::MoodDefault, Mood::Happy).as_deref(),
            Some(Mood::Happy.preset().default_speech)
        );
    }

    #[test]
    fn test_null_suppresses_for_every_mood() {
        for mood in Mood::ALL {
            assert_eq!(resolve(&BubbleText::Suppressed, mood), None);
        }
    }

    #[test]
    fn test_custom_text_is_verbatim() {
        for mood in Mood::ALL {
            assert_eq!(
                resolve(&BubbleText::custom("Custom text"), mood).as_deref(),
                Some("Custom text")
            );
        }
        assert_eq!(resolve(&BubbleText::from(""), Mood::Sad).as_deref(), Some(""));
    }

    #[test]
    fn test_from_override() {
        assert_eq!(BubbleText::from_override(None), BubbleText::MoodDefault);
        assert_eq!(BubbleText::from_override(Some(None)), BubbleText::Suppressed);
        assert_eq!(
            BubbleText::from_override(Some(Some("hi".into()))),
            BubbleText::custom("hi")
        );
    }

    #[test]
    fn test_caption_requires_headline() {
        assert_eq!(Caption::from_lines(None, Some("sub")), None);

        let caption = Caption::from_lines(Some("Xin chào"), Some("sub"));
        assert_eq!(
            caption,
            Some(Caption {
                headline: "Xin chào".to_string(),
                subline: Some("sub".to_string()),
            })
        );
    }
}
