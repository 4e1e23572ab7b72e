//! Card definitions - static trivia card data.
//!
//! A `Card` is a prompt the describing player tries to get their team to
//! guess. Cards come from the external catalog and are never mutated by
//! the session; identity is the `id`.

use serde::{Deserialize, Serialize};

/// Lowest point value a card may carry.
pub const MIN_POINTS: u8 = 1;

/// Highest point value a card may carry.
pub const MAX_POINTS: u8 = 4;

/// Unique identifier for a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use chhota_pandit::cards::Card;
///
/// let card = Card::new("bw-1", "Sholay", "Bollywood", 2).with_hints("1975, Gabbar");
///
/// assert_eq!(card.points, 2);
/// assert!(card.has_valid_points());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,

    /// Text the describing player must get their team to say.
    pub title: String,

    pub category: String,

    /// Score awarded when the card is guessed (1-4).
    pub points: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<String>,
}

impl Card {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        points: u8,
    ) -> Self {
        Self {
            id: CardId::new(id),
            title: title.into(),
            category: category.into(),
            points,
            hints: None,
        }
    }

    #[must_use]
    pub fn with_hints(mut self, hints: impl Into<String>) -> Self {
        self.hints = Some(hints.into());
        self
    }

    #[must_use]
    pub fn has_valid_points(&self) -> bool {
        (MIN_POINTS..=MAX_POINTS).contains(&self.points)
    }
}

/// Sum of the point values of `cards`.
pub fn total_points<'a>(cards: impl IntoIterator<Item = &'a Card>) -> u32 {
    cards.into_iter().map(|c| u32::from(c.points)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new("sp-42");
        assert_eq!(id.as_str(), "sp-42");
        assert_eq!(format!("{}", id), "sp-42");
        assert_eq!(CardId::from("sp-42"), id);
    }

    #[test]
    fn test_points_range() {
        assert!(Card::new("a", "A", "X", 1).has_valid_points());
        assert!(Card::new("a", "A", "X", 4).has_valid_points());
        assert!(!Card::new("a", "A", "X", 0).has_valid_points());
        assert!(!Card::new("a", "A", "X", 5).has_valid_points());
    }

    #[test]
    fn test_total_points() {
        let cards = vec![
            Card::new("a", "A", "X", 1),
            Card::new("b", "B", "X", 3),
            Card::new("c", "C", "Y", 4),
        ];
        assert_eq!(total_points(&cards), 8);
        assert_eq!(total_points(&[]), 0);
    }

    #[test]
    fn test_card_json_shape() {
        let json = r#"{"id":"bw-1","title":"Sholay","category":"Bollywood","points":2}"#;
        let card: Card = serde_json::from_str(json).unwrap();

        assert_eq!(card.id, CardId::new("bw-1"));
        assert_eq!(card.hints, None);
        assert_eq!(serde_json::to_string(&card).unwrap(), json);
    }
}
