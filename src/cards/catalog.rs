//! Card catalog for category lookup.
//!
//! The `CardCatalog` is the immutable card pool a session draws from. It
//! keeps the cards in their supplied order and indexes them by id.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId};
use crate::core::{GameError, GameResult};

/// Immutable, ordered collection of cards.
///
/// ## Example
///
/// ```
/// use chhota_pandit::cards::{Card, CardCatalog, CardId};
///
/// let catalog = CardCatalog::new(vec![
///     Card::new("bw-1", "Sholay", "Bollywood", 2),
///     Card::new("sp-1", "Sachin", "Sports", 1),
/// ])
/// .unwrap();
///
/// assert_eq!(catalog.get(&CardId::new("bw-1")).unwrap().title, "Sholay");
/// assert_eq!(catalog.categories(), vec!["Bollywood", "Sports"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
    index: FxHashMap<CardId, usize>,
}

impl CardCatalog {
    /// Build a catalog, rejecting duplicate ids and out-of-range points.
    pub fn new(cards: Vec<Card>) -> GameResult<Self> {
        let mut index = FxHashMap::default();
        for (pos, card) in cards.iter().enumerate() {
            if !card.has_valid_points() {
                return Err(GameError::InvalidCatalog(format!(
                    "card {} has {} points",
                    card.id, card.points
                )));
            }
            if index.insert(card.id.clone(), pos).is_some() {
                return Err(GameError::InvalidCatalog(format!(
                    "duplicate card id {}",
                    card.id
                )));
            }
        }
        Ok(Self { cards, index })
    }

    /// Parse a catalog from a JSON array of card records.
    pub fn from_json(json: &str) -> GameResult<Self> {
        let cards: Vec<Card> =
            serde_json::from_str(json).map_err(|e| GameError::InvalidCatalog(e.to_string()))?;
        Self::new(cards)
    }

    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.index.get(id).map(|&pos| &self.cards[pos])
    }

    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over cards in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Sorted, unique category names.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.cards.iter().map(|c| c.category.as_str()).collect();
        set.into_iter().collect()
    }

    /// Cards whose category is in `categories`, in catalog order.
    pub fn cards_in_categories<'a>(
        &'a self,
        categories: &'a BTreeSet<String>,
    ) -> impl Iterator<Item = &'a Card> {
        self.cards
            .iter()
            .filter(move |c| categories.contains(&c.category))
    }

    /// Cards of a single category, in catalog order.
    pub fn cards_in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Card> {
        self.cards.iter().filter(move |c| c.category == category)
    }

    /// Check that a deck of `deck_size` cards can be built from `categories`
    /// with at least one card per category.
    pub fn validate_deck_constraints(
        &self,
        categories: &BTreeSet<String>,
        deck_size: usize,
        min_categories: usize,
    ) -> GameResult<()> {
        if categories.len() < min_categories {
            return Err(GameError::InvalidConfig(format!(
                "at least {} categories must be selected",
                min_categories
            )));
        }

        let available = self.cards_in_categories(categories).count();
        if available < deck_size {
            return Err(GameError::InsufficientCards {
                available,
                required: deck_size,
            });
        }

        if deck_size < categories.len() {
            return Err(GameError::InvalidConfig(format!(
                "deck size must be at least {} to include one card from each category",
                categories.len()
            )));
        }

        Ok(())
    }
}
