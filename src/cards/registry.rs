//! Card catalog for template lookup.
//!
//! The `CardCatalog` holds every card template for a run. It is passed
//! explicitly to whatever needs lookups; there is no global table.

use rustc_hash::FxHashMap;

use super::definition::Card;
use crate::core::error::CatalogError;

/// Catalog of card templates keyed by id.
///
/// ## Example
///
/// ```
/// use frontier_engine::cards::{Card, CardCatalog, CardType};
///
/// let mut catalog = CardCatalog::new();
/// catalog.insert(Card::new("jerky", "Jerky", CardType::Provision)).unwrap();
///
/// assert_eq!(catalog.get("jerky").unwrap().name, "Jerky");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<String, Card>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from templates, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` on the first repeated id.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for card in cards {
            catalog.insert(card)?;
        }
        Ok(catalog)
    }

    /// Load a catalog from a JSON array of card templates.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or contains duplicate ids.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        Self::from_cards(cards)
    }

    /// Register a template.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if the id is already present.
    pub fn insert(&mut self, card: Card) -> Result<(), CatalogError> {
        let key = card.id.as_str().to_string();
        if self.cards.contains_key(&key) {
            return Err(CatalogError::DuplicateId(card.id));
        }
        self.cards.insert(key, card);
        Ok(())
    }

    /// Get a template by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.cards.contains_key(id)
    }

    /// The catalog template an instance was made from, if any.
    #[must_use]
    pub fn base_of(&self, card: &Card) -> Option<&Card> {
        self.get(card.id.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all templates (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// All templates sorted by id, for deterministic pool construction.
    #[must_use]
    pub fn sorted(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.cards.values().cloned().collect();
        cards.sort_by(|a, b| a.id.cmp(&b.id));
        cards
    }

    /// Find templates matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }
}
