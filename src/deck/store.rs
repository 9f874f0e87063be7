//! Store deck construction.

use im::Vector;
use rustc_hash::FxHashSet;

use crate::cards::{get_scaled_card, Card, CardId};
use crate::core::GameRng;

/// Every buyable card in `pool`, priced for the NG+ level and shuffled.
///
/// Events, spoils and `reserved` ids are never stocked.
pub fn build_store_deck(
    pool: &[Card],
    ng_plus_level: u32,
    reserved: &FxHashSet<CardId>,
    rng: &mut GameRng,
) -> Vector<Card> {
    let mut stock: Vec<Card> = pool
        .iter()
        .filter(|card| card.buy_cost > 0 && !card.is_event() && !card.is_spoil())
        .filter(|card| !reserved.contains(&card.id))
        .map(|card| get_scaled_card(card, ng_plus_level).into_owned())
        .collect();
    rng.shuffle(&mut stock);
    stock.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardType, SubType};

    #[test]
    fn test_store_deck_prices_and_filters() {
        let pool = vec![
            Card::new("rope", "Rope", CardType::Item).with_buy_cost(3),
            Card::new("jerky", "Jerky", CardType::Provision).with_buy_cost(2),
            Card::new("pebble", "Pebble", CardType::Item),
            Card::new("wolf", "Wolf", CardType::Event)
                .with_sub_type(SubType::Animal)
                .with_buy_cost(9),
        ];
        let mut rng = GameRng::new(5);
        let deck = build_store_deck(&pool, 5, &FxHashSet::default(), &mut rng);

        assert_eq!(deck.len(), 2);
        let rope = deck.iter().find(|c| c.id.as_str() == "rope").unwrap();
        assert_eq!(rope.buy_cost, 5);
        assert_eq!(rope.normalized().buy_cost, 3);
    }
}
