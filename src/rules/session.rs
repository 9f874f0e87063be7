//! One run's worth of engine context.

use rustc_hash::FxHashSet;

use super::context::{EffectSink, ResolveContext};
use super::engine::{resolve, Resolution};
use super::turn::{begin_turn, reveal_next_event};
use crate::cards::{CardCatalog, CardId};
use crate::core::{Action, EngineConfig, GameRng, GameRngState, PlayerState, WorldState};
use crate::deck::{build_event_deck, build_store_deck};

/// Owns the catalog, configuration and random stream for a run.
///
/// ## Example
///
/// ```
/// use frontier_engine::cards::{Card, CardCatalog, CardType};
/// use frontier_engine::core::{EngineConfig, WorldState};
/// use frontier_engine::rules::RunSession;
/// use rustc_hash::FxHashSet;
///
/// let catalog = CardCatalog::from_cards([
///     Card::new("rope", "Rope", CardType::Item).with_buy_cost(2),
/// ])
/// .unwrap();
/// let mut session = RunSession::new(catalog, EngineConfig::default(), 7);
/// let world = session.new_run_decks(0, &FxHashSet::default());
///
/// assert_eq!(world.store_display.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct RunSession {
    pub catalog: CardCatalog,
    pub config: EngineConfig,
    rng: GameRng,
}

impl RunSession {
    pub fn new(catalog: CardCatalog, config: EngineConfig, seed: u64) -> Self {
        Self {
            catalog,
            config,
            rng: GameRng::new(seed),
        }
    }

    /// Resume a run from a saved random state.
    pub fn resume(catalog: CardCatalog, config: EngineConfig, rng: &GameRngState) -> Self {
        Self {
            catalog,
            config,
            rng: GameRng::from_state(rng),
        }
    }

    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    fn context<'a>(&'a mut self, sink: &'a mut dyn EffectSink) -> ResolveContext<'a> {
        ResolveContext::new(&self.catalog, &self.config, &mut self.rng, sink)
    }

    /// Resolve a player action.
    pub fn apply(
        &mut self,
        action: &Action,
        player: &PlayerState,
        world: &WorldState,
        sink: &mut dyn EffectSink,
    ) -> Resolution {
        resolve(action, player, world, &mut self.context(sink))
    }

    pub fn reveal(
        &mut self,
        player: &PlayerState,
        world: &WorldState,
        sink: &mut dyn EffectSink,
    ) -> Resolution {
        reveal_next_event(player, world, &mut self.context(sink))
    }

    pub fn begin_turn(
        &mut self,
        player: &PlayerState,
        world: &WorldState,
        sink: &mut dyn EffectSink,
    ) -> Resolution {
        begin_turn(player, world, &mut self.context(sink))
    }

    /// Fresh event and store decks for an NG+ level, with the store display
    /// filled. `reserved` ids (character starting items) stay out of both.
    pub fn new_run_decks(
        &mut self,
        ng_plus_level: u32,
        reserved: &FxHashSet<CardId>,
    ) -> WorldState {
        let pool = self.catalog.sorted();
        let run = self.rng.split();
        let mut deck_rng = run.for_context("deck");
        let mut store_rng = run.for_context("store");

        let mut world = WorldState::new();
        world.event_deck =
            build_event_deck(&pool, ng_plus_level, &self.config, reserved, &mut deck_rng);
        world.store_deck = build_store_deck(&pool, ng_plus_level, reserved, &mut store_rng);
        world.refill_store_display(self.config.store_display_size);
        world
    }
}
