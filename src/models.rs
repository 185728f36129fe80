//! Data models shared across the study client
//!
//! Everything here mirrors what the remote study service owns. Scheduling
//! fields (`ease_factor`, `interval_days`, `due_at`) are only ever written
//! from a successful review submission; the client never computes them.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A knowledge entry: free text captured by the user, the raw material
/// cards are derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub tags: TagSet,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Type of flashcard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    /// Simple question and answer
    Basic,
    /// Can be reviewed in both directions
    Reversible,
    /// Fill-in-the-blank; the answer is embedded in the front text
    Cloze,
}

impl Default for CardType {
    fn default() -> Self {
        Self::Basic
    }
}

impl CardType {
    pub fn as_str(self) -> &'static str {
        match self {
            CardType::Basic => "basic",
            CardType::Reversible => "reversible",
            CardType::Cloze => "cloze",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(CardType::Basic),
            "reversible" => Ok(CardType::Reversible),
            "cloze" => Ok(CardType::Cloze),
            other => Err(format!(
                "unknown card type '{}' (expected basic, reversible, or cloze)",
                other
            )),
        }
    }
}

/// A flashcard with its scheduler-owned review state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    #[serde(default)]
    pub card_type: CardType,
    pub front: String,
    #[serde(default)]
    pub back: Option<String>,
    /// Entry this card was derived from, if any
    #[serde(default)]
    pub entry_id: Option<i64>,
    #[serde(default)]
    pub tags: TagSet,
    pub ease_factor: f32,
    pub interval_days: i32,
    pub due_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Check if the card is eligible for review
    pub fn is_due(&self) -> bool {
        Utc::now() >= self.due_at
    }

    /// Answer text to show once revealed. Cloze cards carry their answer
    /// in the front, so an absent or empty back gets a placeholder.
    pub fn answer_text(&self) -> &str {
        match self.back.as_deref() {
            Some(back) if !back.is_empty() => back,
            _ => "(No answer - cloze deletion)",
        }
    }
}

/// Recall-quality rating, worst to best. The ordinal is the wire value;
/// its meaning is defined entirely by the scheduler's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rating {
    Again = 0,
    Hard = 1,
    Good = 2,
    Easy = 3,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::Again => "Again",
            Rating::Hard => "Hard",
            Rating::Good => "Good",
            Rating::Easy => "Easy",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Rating::Again => "Forgot completely",
            Rating::Hard => "Barely remembered",
            Rating::Good => "Remembered with effort",
            Rating::Easy => "Perfect recall",
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.ordinal()
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Rating::Again),
            1 => Ok(Rating::Hard),
            2 => Ok(Rating::Good),
            3 => Ok(Rating::Easy),
            other => Err(format!("rating must be 0-3, got {}", other)),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized set of tags: trimmed, deduplicated, no empty strings.
/// Normalization happens at construction and deserialization so call
/// sites never deal with raw comma-split strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated tag string from user input
    pub fn parse(input: &str) -> Self {
        input.split(',').map(str::to_string).collect()
    }

    /// Insert a tag, trimming it first. Empty tags are discarded.
    pub fn insert(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }
        self.0.insert(tag.to_string())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for TagSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut tags = TagSet::new();
        for tag in iter {
            tags.insert(&tag);
        }
        tags
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagSet> for Vec<String> {
    fn from(tags: TagSet) -> Self {
        tags.0.into_iter().collect()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for tag in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(tag)?;
            first = false;
        }
        Ok(())
    }
}

/// A recorded review, as returned by the scheduler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: i64,
    pub card_id: i64,
    pub rating: Rating,
    pub reviewed_at: DateTime<Utc>,
}

/// Result of a successful review submission: the recorded review, the
/// card with its updated scheduling state, and a human-readable summary.
/// The message is displayed verbatim, never parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub review: ReviewRecord,
    pub card: Card,
    pub message: String,
}

/// Aggregate counters for the summary view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_entries: u64,
    pub total_cards: u64,
    pub due_today: u64,
    pub reviews_this_week: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagset_parse_normalizes() {
        let tags = TagSet::parse(" biology, science ,cells,, biology ");
        assert_eq!(tags.len(), 3);
        assert!(tags.contains("biology"));
        assert!(tags.contains("science"));
        assert!(tags.contains("cells"));
    }

    #[test]
    fn test_tagset_discards_empty() {
        let tags = TagSet::parse("  ,, ,");
        assert!(tags.is_empty());

        let mut tags = TagSet::new();
        assert!(!tags.insert("   "));
        assert!(tags.insert("rust"));
        assert!(!tags.insert("rust"));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_tagset_wire_roundtrip() {
        let json = r#"[" b ", "a", "", "a"]"#;
        let tags: TagSet = serde_json::from_str(json).unwrap();
        let back: Vec<String> = tags.into();
        assert_eq!(back, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_rating_ordinals() {
        assert_eq!(Rating::Again.ordinal(), 0);
        assert_eq!(Rating::Easy.ordinal(), 3);
        assert_eq!(Rating::try_from(2).unwrap(), Rating::Good);
        assert!(Rating::try_from(4).is_err());
    }

    #[test]
    fn test_rating_serde_uses_ordinal() {
        assert_eq!(serde_json::to_string(&Rating::Hard).unwrap(), "1");
        let rating: Rating = serde_json::from_str("3").unwrap();
        assert_eq!(rating, Rating::Easy);
    }

    #[test]
    fn test_card_type_wire_casing() {
        assert_eq!(serde_json::to_string(&CardType::Cloze).unwrap(), "\"cloze\"");
        assert_eq!("reversible".parse::<CardType>().unwrap(), CardType::Reversible);
        assert!("sm2".parse::<CardType>().is_err());
    }

    #[test]
    fn test_answer_text_placeholder() {
        let card = Card {
            id: 1,
            card_type: CardType::Cloze,
            front: "The capital of France is {{Paris}}".to_string(),
            back: None,
            entry_id: None,
            tags: TagSet::new(),
            ease_factor: 2.5,
            interval_days: 0,
            due_at: Utc::now(),
            created_at: Utc::now(),
        };
        assert_eq!(card.answer_text(), "(No answer - cloze deletion)");

        let card = Card {
            back: Some("Paris".to_string()),
            ..card
        };
        assert_eq!(card.answer_text(), "Paris");
    }
}
