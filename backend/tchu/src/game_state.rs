use crate::card::{Card, Color};
use crate::card_state::{CardState, PublicCardState};
use crate::constants::{
    CAR_CARDS_COUNT, INITIAL_CARDS_COUNT, LAST_TURN_CAR_COUNT, LOCOMOTIVE_CARDS_COUNT,
    MIN_CARDS_TO_DRAW,
};
use crate::deck::Deck;
use crate::error::{check_argument, TchuResult};
use crate::player::PlayerId;
use crate::player_state::{PlayerState, PublicPlayerState};
use crate::route::Route;
use crate::sorted_bag::{Builder, SortedBag};
use crate::ticket::Ticket;

use array_init::{array_init, try_array_init};
use rand::Rng;
use serde::Serialize;
use strum::IntoEnumIterator;

/// The part of the game state every player may see.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PublicGameState {
    tickets_count: usize,
    card_state: PublicCardState,
    current_player_id: PlayerId,
    player_states: [PublicPlayerState; 2],
    /// The player playing the very last turn, once known.
    last_player: Option<PlayerId>,
}

impl PublicGameState {
    pub fn new(
        tickets_count: usize,
        card_state: PublicCardState,
        current_player_id: PlayerId,
        player_states: [PublicPlayerState; 2],
        last_player: Option<PlayerId>,
    ) -> Self {
        Self {
            tickets_count,
            card_state,
            current_player_id,
            player_states,
            last_player,
        }
    }

    #[inline]
    pub fn tickets_count(&self) -> usize {
        self.tickets_count
    }

    #[inline]
    pub fn can_draw_tickets(&self) -> bool {
        self.tickets_count > 0
    }

    #[inline]
    pub fn card_state(&self) -> &PublicCardState {
        &self.card_state
    }

    /// Drawing cards is only allowed while the deck and the discards hold at least five cards.
    #[inline]
    pub fn can_draw_cards(&self) -> bool {
        self.card_state.total_size() >= MIN_CARDS_TO_DRAW
    }

    #[inline]
    pub fn current_player_id(&self) -> PlayerId {
        self.current_player_id
    }

    #[inline]
    pub fn player_state(&self, player_id: PlayerId) -> &PublicPlayerState {
        &self.player_states[player_id.index()]
    }

    #[inline]
    pub fn current_player_state(&self) -> &PublicPlayerState {
        self.player_state(self.current_player_id)
    }

    #[inline]
    pub fn player_states(&self) -> &[PublicPlayerState; 2] {
        &self.player_states
    }

    /// Routes claimed by either player.
    pub fn claimed_routes(&self) -> Vec<Route> {
        self.player_states
            .iter()
            .flat_map(|state| state.routes().iter().copied())
            .collect()
    }

    /// A route may be claimed unless it, or a parallel route between the same stations, already is.
    pub fn is_route_available(&self, route: &Route) -> bool {
        self.player_states
            .iter()
            .flat_map(|state| state.routes())
            .all(|claimed| claimed != route && !claimed.has_same_stations(route))
    }

    #[inline]
    pub fn last_player(&self) -> Option<PlayerId> {
        self.last_player
    }
}

/// The authoritative state of a game.
///
/// Every transition returns a new state, leaving the current one untouched. The public view is
/// always derived from the private parts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameState {
    public: PublicGameState,
    tickets: Deck<Ticket>,
    card_state: CardState,
    player_states: [PlayerState; 2],
}

/// The 110 cards of a game: 12 cards of each color, and 14 locomotives.
pub fn all_cards() -> SortedBag<Card> {
    Color::iter()
        .fold(Builder::new(), |builder, color| {
            builder.add_count(CAR_CARDS_COUNT, Card::of(color))
        })
        .add_count(LOCOMOTIVE_CARDS_COUNT, Card::Locomotive)
        .build()
}

impl GameState {
    fn new(
        tickets: Deck<Ticket>,
        card_state: CardState,
        current_player_id: PlayerId,
        player_states: [PlayerState; 2],
        last_player: Option<PlayerId>,
    ) -> Self {
        let public = PublicGameState::new(
            tickets.size(),
            card_state.public().clone(),
            current_player_id,
            array_init(|index| player_states[index].public().clone()),
            last_player,
        );

        Self {
            public,
            tickets,
            card_state,
            player_states,
        }
    }

    /// Same state, with other cards.
    fn with_card_state(&self, card_state: CardState) -> Self {
        Self::new(
            self.tickets.clone(),
            card_state,
            self.public.current_player_id,
            self.player_states.clone(),
            self.public.last_player,
        )
    }

    /// Same state, with another state for `player_id`.
    fn with_player_state(&self, player_id: PlayerId, player_state: PlayerState) -> Self {
        let mut player_states = self.player_states.clone();
        player_states[player_id.index()] = player_state;

        Self::new(
            self.tickets.clone(),
            self.card_state.clone(),
            self.public.current_player_id,
            player_states,
            self.public.last_player,
        )
    }

    /// Shuffles every card and `tickets`, deals four cards to each player, turns five cards face
    /// up, and picks who plays first.
    pub fn initial(tickets: &SortedBag<Ticket>, rng: &mut impl Rng) -> TchuResult<Self> {
        let mut deck = Deck::of(&all_cards(), rng);

        let player_states: [PlayerState; 2] = try_array_init(|_| -> TchuResult<PlayerState> {
            let cards = deck.top_cards(INITIAL_CARDS_COUNT)?;
            deck = deck.without_top_cards(INITIAL_CARDS_COUNT)?;
            PlayerState::initial(cards)
        })?;

        let card_state = CardState::of(&deck)?;
        let first_player = PlayerId::ALL[rng.gen_range(0..PlayerId::ALL.len())];

        Ok(Self::new(
            Deck::of(tickets, rng),
            card_state,
            first_player,
            player_states,
            None,
        ))
    }

    #[inline]
    pub fn public(&self) -> &PublicGameState {
        &self.public
    }

    #[inline]
    pub fn current_player_id(&self) -> PlayerId {
        self.public.current_player_id
    }

    #[inline]
    pub fn last_player(&self) -> Option<PlayerId> {
        self.public.last_player
    }

    #[inline]
    pub fn player_state(&self, player_id: PlayerId) -> &PlayerState {
        &self.player_states[player_id.index()]
    }

    #[inline]
    pub fn current_player_state(&self) -> &PlayerState {
        self.player_state(self.public.current_player_id)
    }

    #[inline]
    pub fn card_state(&self) -> &CardState {
        &self.card_state
    }

    /// Returns an `Err` if fewer than `count` tickets are left.
    pub fn top_tickets(&self, count: usize) -> TchuResult<SortedBag<Ticket>> {
        self.tickets.top_cards(count)
    }

    /// Returns an `Err` if fewer than `count` tickets are left.
    pub fn without_top_tickets(&self, count: usize) -> TchuResult<Self> {
        Ok(Self::new(
            self.tickets.without_top_cards(count)?,
            self.card_state.clone(),
            self.public.current_player_id,
            self.player_states.clone(),
            self.public.last_player,
        ))
    }

    /// Returns an `Err` if the deck is empty.
    pub fn top_card(&self) -> TchuResult<Card> {
        self.card_state.top_deck_card()
    }

    /// Returns an `Err` if the deck is empty.
    pub fn without_top_card(&self) -> TchuResult<Self> {
        Ok(self.with_card_state(self.card_state.without_top_deck_card()?))
    }

    pub fn with_more_discarded_cards(&self, cards: &SortedBag<Card>) -> TchuResult<Self> {
        Ok(self.with_card_state(self.card_state.with_more_discarded_cards(cards)?))
    }

    /// Shuffles the discards into a new deck if the deck is empty, otherwise returns the same state.
    pub fn with_cards_deck_recreated_if_needed(&self, rng: &mut impl Rng) -> TchuResult<Self> {
        if self.card_state.public().is_deck_empty() {
            Ok(self.with_card_state(self.card_state.with_deck_recreated_from_discards(rng)?))
        } else {
            Ok(self.clone())
        }
    }

    /// Gives `chosen_tickets` to `player_id` at the start of the game.
    ///
    /// Returns an `Err` if the player already has tickets.
    pub fn with_initially_chosen_tickets(
        &self,
        player_id: PlayerId,
        chosen_tickets: &SortedBag<Ticket>,
    ) -> TchuResult<Self> {
        let player_state = self.player_state(player_id);
        check_argument(player_state.tickets().is_empty(), || {
            format!("The {} already chose their initial tickets.", player_id)
        })?;

        Ok(self.with_player_state(player_id, player_state.with_added_tickets(chosen_tickets)?))
    }

    /// Removes `drawn_tickets` from the top of the tickets, and gives `chosen_tickets` to the
    /// current player.
    ///
    /// Returns an `Err` if `chosen_tickets` are not among `drawn_tickets`, or if there are not
    /// enough tickets left.
    pub fn with_chosen_additional_tickets(
        &self,
        drawn_tickets: &SortedBag<Ticket>,
        chosen_tickets: &SortedBag<Ticket>,
    ) -> TchuResult<Self> {
        check_argument(drawn_tickets.contains_all(chosen_tickets), || {
            format!(
                "Chosen tickets {} are not among the drawn tickets {}.",
                chosen_tickets, drawn_tickets
            )
        })?;

        let current = self.public.current_player_id;
        let player_state = self.current_player_state().with_added_tickets(chosen_tickets)?;
        let mut player_states = self.player_states.clone();
        player_states[current.index()] = player_state;

        Ok(Self::new(
            self.tickets.without_top_cards(drawn_tickets.size())?,
            self.card_state.clone(),
            current,
            player_states,
            self.public.last_player,
        ))
    }

    fn check_can_draw_cards(&self) -> TchuResult<()> {
        check_argument(self.public.can_draw_cards(), || {
            format!(
                "Cannot draw cards with only {} cards left in the deck and discards.",
                self.public.card_state.total_size()
            )
        })
    }

    /// Gives the face-up card at `slot` to the current player, and replaces it with the top of the
    /// deck.
    ///
    /// Returns an `Err` if drawing cards is not allowed, or if `slot` is out of bounds.
    pub fn with_drawn_face_up_card(&self, slot: usize) -> TchuResult<Self> {
        self.check_can_draw_cards()?;

        let card = self.card_state.public().face_up_card(slot)?;
        let card_state = self.card_state.with_drawn_face_up_card(slot)?;
        let player_state = self.current_player_state().with_added_card(card)?;

        Ok(self
            .with_card_state(card_state)
            .with_player_state(self.public.current_player_id, player_state))
    }

    /// Gives the top card of the deck to the current player.
    ///
    /// Returns an `Err` if drawing cards is not allowed, or if the deck is empty.
    pub fn with_blindly_drawn_card(&self) -> TchuResult<Self> {
        self.check_can_draw_cards()?;

        let card = self.card_state.top_deck_card()?;
        let card_state = self.card_state.without_top_deck_card()?;
        let player_state = self.current_player_state().with_added_card(card)?;

        Ok(self
            .with_card_state(card_state)
            .with_player_state(self.public.current_player_id, player_state))
    }

    /// The current player claims `route`, paying `cards` which go to the discards.
    ///
    /// Returns an `Err` if the route, or a parallel one, was already claimed, or if the current
    /// player cannot pay.
    pub fn with_claimed_route(&self, route: Route, cards: &SortedBag<Card>) -> TchuResult<Self> {
        check_argument(self.public.is_route_available(&route), || {
            format!("Route {} cannot be claimed anymore.", route.id())
        })?;

        let player_state = self.current_player_state().with_claimed_route(route, cards)?;

        Ok(self
            .with_card_state(self.card_state.with_more_discarded_cards(cards)?)
            .with_player_state(self.public.current_player_id, player_state))
    }

    /// Whether the current player's turn is the one triggering the last turn of the game.
    pub fn last_turn_begins(&self) -> bool {
        self.public.last_player.is_none()
            && self.current_player_state().car_count() <= LAST_TURN_CAR_COUNT
    }

    /// Hands over to the other player. If the player ending their turn triggers the last turn,
    /// they become the last player.
    pub fn for_next_turn(&self) -> Self {
        let current = self.public.current_player_id;
        let last_player = if self.last_turn_begins() {
            Some(current)
        } else {
            self.public.last_player
        };

        Self::new(
            self.tickets.clone(),
            self.card_state.clone(),
            current.next(),
            self.player_states.clone(),
            last_player,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOTAL_CARDS_COUNT;
    use crate::map;

    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2021)
    }

    fn six_tickets() -> SortedBag<Ticket> {
        map::tickets()[..6].iter().cloned().collect()
    }

    fn initial() -> GameState {
        GameState::initial(&six_tickets(), &mut rng()).unwrap()
    }

    fn route(id: &str) -> Route {
        map::route(id).unwrap()
    }

    fn held_tickets(state: &GameState) -> usize {
        PlayerId::ALL
            .iter()
            .map(|id| state.player_state(*id).tickets().size())
            .sum()
    }

    /// The initial state, where the current player holds `cards` and has claimed `routes`.
    fn with_current_player(cards: SortedBag<Card>, routes: Vec<Route>) -> GameState {
        let state = initial();
        let player_state = PlayerState::new(SortedBag::new(), cards, routes).unwrap();
        state.with_player_state(state.current_player_id(), player_state)
    }

    #[test]
    fn all_cards_count() {
        let cards = all_cards();

        assert_eq!(cards.size(), TOTAL_CARDS_COUNT);
        assert_eq!(cards.count_of(&Card::Locomotive), 14);
        assert_eq!(cards.count_of(&Card::Violet), 12);
    }

    #[test]
    fn initial_deals_cards() {
        let state = initial();

        assert_eq!(
            state.public().card_state().deck_size(),
            TOTAL_CARDS_COUNT - 2 * 4 - 5
        );
        assert_eq!(state.public().card_state().discards_size(), 0);
        assert_eq!(state.public().tickets_count(), 6);
        assert_eq!(state.last_player(), None);
        for id in PlayerId::ALL {
            assert_eq!(state.player_state(id).cards().size(), 4);
            assert_eq!(state.public().player_state(id).card_count(), 4);
            assert!(state.player_state(id).tickets().is_empty());
            assert!(state.player_state(id).routes().is_empty());
        }
    }

    #[test]
    fn initial_same_seed_same_state() {
        assert_eq!(initial(), initial());
    }

    #[test]
    fn initial_first_player_is_random() {
        let first_players: std::collections::HashSet<PlayerId> = (0..32)
            .map(|seed| {
                GameState::initial(&six_tickets(), &mut StdRng::seed_from_u64(seed))
                    .unwrap()
                    .current_player_id()
            })
            .collect();

        assert_eq!(first_players.len(), 2);
    }

    #[test]
    fn drawn_face_up_card_replaced_by_deck_top() {
        let state = initial();
        let top = state.top_card().unwrap();
        let face_up = state.public().card_state().face_up_card(2).unwrap();
        let current = state.current_player_id();

        let next = state.with_drawn_face_up_card(2).unwrap();

        assert_eq!(next.public().card_state().face_up_card(2), Ok(top));
        assert_eq!(
            next.public().card_state().deck_size(),
            state.public().card_state().deck_size() - 1
        );
        assert_eq!(
            next.player_state(current).cards(),
            &state.player_state(current).cards().union(&SortedBag::of(1, face_up))
        );
        assert_eq!(
            next.player_state(current.next()),
            state.player_state(current.next())
        );
    }

    #[test]
    fn blindly_drawn_card() {
        let state = initial();
        let top = state.top_card().unwrap();
        let current = state.current_player_id();

        let next = state.with_blindly_drawn_card().unwrap();

        assert_eq!(next.player_state(current).cards().size(), 5);
        assert!(next.player_state(current).cards().contains(&top));
        assert_eq!(next.public().current_player_state().card_count(), 5);
        assert_eq!(
            next.public().card_state().face_up_cards(),
            state.public().card_state().face_up_cards()
        );
    }

    #[test]
    fn cannot_draw_cards_when_too_few_left() {
        let mut state = initial();
        while state.public().card_state().deck_size() > 4 {
            state = state.without_top_card().unwrap();
        }

        assert!(!state.public().can_draw_cards());
        assert!(state.with_blindly_drawn_card().is_err());
        assert!(state.with_drawn_face_up_card(0).is_err());

        let state = state
            .with_more_discarded_cards(&SortedBag::of(1, Card::Red))
            .unwrap();
        assert!(state.public().can_draw_cards());
    }

    #[test]
    fn deck_recreated_from_discards_only_when_empty() {
        let mut state = initial();
        let recreated = state.with_cards_deck_recreated_if_needed(&mut rng()).unwrap();
        assert_eq!(recreated, state);

        while state.public().card_state().deck_size() > 0 {
            state = state.without_top_card().unwrap();
        }
        let discards = SortedBag::of_two(3, Card::Red, 4, Card::Locomotive);
        let state = state
            .with_more_discarded_cards(&discards)
            .unwrap()
            .with_cards_deck_recreated_if_needed(&mut rng())
            .unwrap();

        assert_eq!(state.public().card_state().deck_size(), 7);
        assert_eq!(state.public().card_state().discards_size(), 0);
    }

    #[test]
    fn tickets_are_only_moved() {
        let total = six_tickets().size();
        let state = initial();
        let offered = state.top_tickets(2).unwrap();
        let state = state
            .without_top_tickets(2)
            .unwrap()
            .with_initially_chosen_tickets(PlayerId::Player1, &offered)
            .unwrap();

        assert_eq!(state.public().tickets_count() + held_tickets(&state), total);
        assert!(state
            .with_initially_chosen_tickets(PlayerId::Player1, &offered)
            .is_err());

        let drawn = state.top_tickets(3).unwrap();
        let kept = SortedBag::of(1, drawn.get(0).unwrap().clone());
        let state = state.with_chosen_additional_tickets(&drawn, &kept).unwrap();
        let discarded = drawn.size() - kept.size();

        assert_eq!(
            state.public().tickets_count() + held_tickets(&state) + discarded,
            total
        );
        assert_eq!(state.public().tickets_count(), 1);
    }

    #[test]
    fn chosen_tickets_must_be_drawn() {
        let state = initial();
        let drawn = state.top_tickets(3).unwrap();
        let other = state.without_top_tickets(3).unwrap().top_tickets(1).unwrap();

        assert!(state.with_chosen_additional_tickets(&drawn, &other).is_err());
        assert!(state.top_tickets(7).is_err());
    }

    #[test]
    fn claimed_route() {
        let state = with_current_player(SortedBag::of(4, Card::Red), vec![]);
        let current = state.current_player_id();

        let next = state
            .with_claimed_route(route("FRI_LAU_1"), &SortedBag::of(3, Card::Red))
            .unwrap();

        assert_eq!(next.player_state(current).routes(), &[route("FRI_LAU_1")]);
        assert_eq!(next.player_state(current).cards(), &SortedBag::of(1, Card::Red));
        assert_eq!(next.public().card_state().discards_size(), 3);
        assert_eq!(next.public().claimed_routes(), vec![route("FRI_LAU_1")]);
    }

    #[test]
    fn claimed_route_makes_parallel_route_unavailable() {
        let state = with_current_player(SortedBag::of(6, Card::Red), vec![]);
        let next = state
            .with_claimed_route(route("FRI_LAU_1"), &SortedBag::of(3, Card::Red))
            .unwrap();

        assert!(!next.public().is_route_available(&route("FRI_LAU_1")));
        assert!(!next.public().is_route_available(&route("FRI_LAU_2")));
        assert!(next.public().is_route_available(&route("BER_FRI_1")));
        assert!(next
            .with_claimed_route(route("FRI_LAU_1"), &SortedBag::of(3, Card::Red))
            .is_err());
    }

    #[test]
    fn claimed_route_without_cards() {
        let state = with_current_player(SortedBag::of(2, Card::Red), vec![]);

        assert!(state
            .with_claimed_route(route("FRI_LAU_1"), &SortedBag::of(3, Card::Red))
            .is_err());
    }

    #[test]
    fn next_turn_alternates_players() {
        let state = initial();
        let next = state.for_next_turn();

        assert_eq!(next.current_player_id(), state.current_player_id().next());
        assert_eq!(next.for_next_turn().current_player_id(), state.current_player_id());
        assert_eq!(next.last_player(), None);
    }

    #[test]
    fn last_turn_designates_player_ending_their_turn() {
        let routes = vec![
            route("GEN_YVE_1"),
            route("BRI_LOC_1"),
            route("BRU_COI_1"),
            route("COI_WAS_1"),
            route("BEL_WAS_1"),
            route("BER_LUC_1"),
            route("BER_LUC_2"),
            route("AT1_STG_1"),
        ];
        let state = with_current_player(SortedBag::new(), routes);
        let ending = state.current_player_id();

        assert_eq!(state.current_player_state().car_count(), 2);
        assert!(state.last_turn_begins());

        let next = state.for_next_turn();
        assert_eq!(next.last_player(), Some(ending));
        assert_eq!(next.current_player_id(), ending.next());
        assert!(!next.last_turn_begins());

        // The last player is never replaced.
        let after = next.for_next_turn();
        assert_eq!(after.last_player(), Some(ending));
        assert_eq!(after.current_player_id(), ending);
    }
}
