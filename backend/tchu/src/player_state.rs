use crate::card::Card;
use crate::constants::{ADDITIONAL_TUNNEL_CARDS, INITIAL_CARDS_COUNT, INITIAL_CAR_COUNT};
use crate::error::{check_argument, TchuResult};
use crate::route::Route;
use crate::sorted_bag::SortedBag;
use crate::station_partition::StationPartition;
use crate::ticket::Ticket;

use serde::Serialize;

/// Information about a player's state that is visible to all players.
///
/// The car count and claim points are derived from the claimed routes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PublicPlayerState {
    ticket_count: usize,
    card_count: usize,
    routes: Vec<Route>,
    car_count: u32,
    claim_points: i32,
}

impl PublicPlayerState {
    /// Returns an `Err` if the routes are longer, in total, than the cars a player starts with.
    pub fn new(ticket_count: usize, card_count: usize, routes: Vec<Route>) -> TchuResult<Self> {
        let used_cars: u32 = routes.iter().map(|route| route.length() as u32).sum();
        check_argument(used_cars <= INITIAL_CAR_COUNT, || {
            format!(
                "Routes of total length {} need more than the {} cars a player has.",
                used_cars, INITIAL_CAR_COUNT
            )
        })?;
        let claim_points = routes.iter().map(Route::claim_points).sum();

        Ok(Self {
            ticket_count,
            card_count,
            routes,
            car_count: INITIAL_CAR_COUNT - used_cars,
            claim_points,
        })
    }

    #[inline]
    pub fn ticket_count(&self) -> usize {
        self.ticket_count
    }

    #[inline]
    pub fn card_count(&self) -> usize {
        self.card_count
    }

    #[inline]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    #[inline]
    pub fn car_count(&self) -> u32 {
        self.car_count
    }

    #[inline]
    pub fn claim_points(&self) -> i32 {
        self.claim_points
    }
}

/// The complete state of a player: their public state, along with the tickets and cards only
/// they can see.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayerState {
    public: PublicPlayerState,
    tickets: SortedBag<Ticket>,
    cards: SortedBag<Card>,
}

impl PlayerState {
    pub fn new(
        tickets: SortedBag<Ticket>,
        cards: SortedBag<Card>,
        routes: Vec<Route>,
    ) -> TchuResult<Self> {
        Ok(Self {
            public: PublicPlayerState::new(tickets.size(), cards.size(), routes)?,
            tickets,
            cards,
        })
    }

    /// The state of a player right after the initial cards were dealt: no tickets, no routes.
    ///
    /// Returns an `Err` unless exactly four cards are given.
    pub fn initial(cards: SortedBag<Card>) -> TchuResult<Self> {
        check_argument(cards.size() == INITIAL_CARDS_COUNT, || {
            format!(
                "A player starts with {} cards, not {}.",
                INITIAL_CARDS_COUNT,
                cards.size()
            )
        })?;

        Self::new(SortedBag::new(), cards, Vec::new())
    }

    #[inline]
    pub fn public(&self) -> &PublicPlayerState {
        &self.public
    }

    #[inline]
    pub fn tickets(&self) -> &SortedBag<Ticket> {
        &self.tickets
    }

    #[inline]
    pub fn cards(&self) -> &SortedBag<Card> {
        &self.cards
    }

    #[inline]
    pub fn routes(&self) -> &[Route] {
        self.public.routes()
    }

    #[inline]
    pub fn car_count(&self) -> u32 {
        self.public.car_count()
    }

    pub fn with_added_tickets(&self, tickets: &SortedBag<Ticket>) -> TchuResult<Self> {
        Self::new(
            self.tickets.union(tickets),
            self.cards.clone(),
            self.routes().to_vec(),
        )
    }

    pub fn with_added_card(&self, card: Card) -> TchuResult<Self> {
        self.with_added_cards(&SortedBag::of(1, card))
    }

    pub fn with_added_cards(&self, cards: &SortedBag<Card>) -> TchuResult<Self> {
        Self::new(
            self.tickets.clone(),
            self.cards.union(cards),
            self.routes().to_vec(),
        )
    }

    /// Whether the player has enough cars, and the cards to pay for `route`.
    pub fn can_claim_route(&self, route: &Route) -> bool {
        match self.possible_claim_cards(route) {
            Ok(options) => !options.is_empty(),
            Err(_) => false,
        }
    }

    /// Among the cards that could claim `route`, those the player actually holds.
    ///
    /// Returns an `Err` if the player does not have enough cars left for `route`.
    pub fn possible_claim_cards(&self, route: &Route) -> TchuResult<Vec<SortedBag<Card>>> {
        check_argument(self.car_count() >= route.length() as u32, || {
            format!(
                "Cannot claim route {} of length {}, whilst having only {} cars left.",
                route.id(),
                route.length(),
                self.car_count()
            )
        })?;

        Ok(route
            .possible_claim_cards()
            .into_iter()
            .filter(|option| self.cards.contains_all(option))
            .collect())
    }

    /// Every way the player can pay `additional_count` more cards to claim a tunnel initially
    /// paid with `initial_cards`, sorted by ascending number of locomotives.
    ///
    /// Only locomotives, and cards of the same kind as `initial_cards`, may be added. The result
    /// is empty if the player cannot afford the extra cost.
    ///
    /// Returns an `Err` if `additional_count` is not between 1 and 3, if `initial_cards` is
    /// empty or holds more than two kinds of cards, or if `drawn_cards` does not hold exactly
    /// three cards.
    pub fn possible_additional_cards(
        &self,
        additional_count: usize,
        initial_cards: &SortedBag<Card>,
        drawn_cards: &SortedBag<Card>,
    ) -> TchuResult<Vec<SortedBag<Card>>> {
        check_argument(
            (1..=ADDITIONAL_TUNNEL_CARDS).contains(&additional_count),
            || {
                format!(
                    "Between 1 and {} additional cards may be required, not {}.",
                    ADDITIONAL_TUNNEL_CARDS, additional_count
                )
            },
        )?;
        check_argument(
            !initial_cards.is_empty() && initial_cards.to_set().len() <= 2,
            || {
                format!(
                    "Initial claim cards {} must hold one or two kinds of cards.",
                    initial_cards
                )
            },
        )?;
        check_argument(drawn_cards.size() == ADDITIONAL_TUNNEL_CARDS, || {
            format!(
                "Exactly {} cards must be drawn to claim a tunnel, but {} were.",
                ADDITIONAL_TUNNEL_CARDS,
                drawn_cards.size()
            )
        })?;

        let usable: SortedBag<Card> = self
            .cards
            .difference(initial_cards)
            .iter()
            .filter(|card| card.is_locomotive() || initial_cards.contains(card))
            .copied()
            .collect();
        if usable.size() < additional_count {
            return Ok(Vec::new());
        }

        let mut options: Vec<SortedBag<Card>> = usable
            .subsets_of_size(additional_count)?
            .into_iter()
            .collect();
        options.sort_by_key(|option| option.count_of(&Card::Locomotive));

        Ok(options)
    }

    /// The state of the player after claiming `route` with `claim_cards`.
    ///
    /// Returns an `Err` if the player does not hold `claim_cards`, or lacks the cars.
    pub fn with_claimed_route(&self, route: Route, claim_cards: &SortedBag<Card>) -> TchuResult<Self> {
        check_argument(self.cards.contains_all(claim_cards), || {
            format!(
                "Cannot claim route {} using {}, whilst holding {}.",
                route.id(),
                claim_cards,
                self.cards
            )
        })?;

        let mut routes = self.routes().to_vec();
        routes.push(route);

        Self::new(
            self.tickets.clone(),
            self.cards.difference(claim_cards),
            routes,
        )
    }

    /// Points won, or lost, with the tickets given the routes claimed so far.
    pub fn ticket_points(&self) -> i32 {
        let station_count = self
            .routes()
            .iter()
            .flat_map(|route| route.stations())
            .map(|station| station.id() + 1)
            .max()
            .unwrap_or_default();

        let partition = self
            .routes()
            .iter()
            .fold(StationPartition::builder(station_count), |builder, route| {
                builder.connect(&route.station_1(), &route.station_2())
            })
            .build();

        self.tickets
            .iter()
            .map(|ticket| ticket.points(&partition))
            .sum()
    }

    /// Claim points plus ticket points, without the longest trail bonus.
    pub fn final_points(&self) -> i32 {
        self.public.claim_points() + self.ticket_points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map;
    use crate::sorted_bag::Builder;

    use pretty_assertions::assert_eq;

    fn route(id: &str) -> Route {
        map::route(id).unwrap()
    }

    fn ticket(text: &str) -> Ticket {
        map::tickets()
            .iter()
            .find(|ticket| ticket.text() == text)
            .cloned()
            .unwrap()
    }

    fn player(cards: SortedBag<Card>, routes: Vec<Route>) -> PlayerState {
        PlayerState::new(SortedBag::new(), cards, routes).unwrap()
    }

    // Tests for `PublicPlayerState`.

    #[test]
    fn public_player_state_derives_cars_and_points() {
        let state = PublicPlayerState::new(
            2,
            7,
            vec![route("BER_FRI_1"), route("FRI_LAU_1"), route("GEN_YVE_1")],
        )
        .unwrap();

        assert_eq!(state.car_count(), 40 - 1 - 3 - 6);
        assert_eq!(state.claim_points(), 1 + 4 + 15);
        assert_eq!(state.ticket_count(), 2);
        assert_eq!(state.card_count(), 7);
    }

    #[test]
    fn public_player_state_too_many_cars() {
        let routes = vec![route("GEN_YVE_1"); 7];
        assert!(PublicPlayerState::new(0, 0, routes).is_err());
    }

    // Tests for `PlayerState`.

    #[test]
    fn initial_needs_four_cards() {
        assert!(PlayerState::initial(SortedBag::of(3, Card::Red)).is_err());

        let state = PlayerState::initial(SortedBag::of(4, Card::Red)).unwrap();
        assert_eq!(state.public().card_count(), 4);
        assert_eq!(state.public().ticket_count(), 0);
        assert_eq!(state.car_count(), 40);
    }

    #[test]
    fn added_tickets_and_cards() {
        let state = PlayerState::initial(SortedBag::of(4, Card::Red)).unwrap();
        let tickets = SortedBag::of(1, ticket("Berne - Zürich (6)"));

        let state = state
            .with_added_tickets(&tickets)
            .unwrap()
            .with_added_card(Card::Locomotive)
            .unwrap()
            .with_added_cards(&SortedBag::of(2, Card::Blue))
            .unwrap();

        assert_eq!(state.tickets(), &tickets);
        assert_eq!(state.public().ticket_count(), 1);
        assert_eq!(state.public().card_count(), 7);
        assert_eq!(state.cards().count_of(&Card::Locomotive), 1);
    }

    #[test]
    fn can_claim_route() {
        let state = player(SortedBag::of_two(3, Card::Red, 1, Card::Locomotive), vec![]);

        assert!(state.can_claim_route(&route("FRI_LAU_1")));
        assert!(!state.can_claim_route(&route("FRI_LAU_2")));
        // A colorless surface route cannot use the locomotive.
        assert!(!state.can_claim_route(&route("LAU_NEU_1")));
        // A tunnel can.
        assert!(state.can_claim_route(&route("AT1_STG_1")));
    }

    #[test]
    fn cannot_claim_without_cars() {
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
        let state = player(SortedBag::of(6, Card::Red), routes);

        assert_eq!(state.car_count(), 2);
        assert!(state.possible_claim_cards(&route("FRI_LAU_1")).is_err());
        assert!(!state.can_claim_route(&route("FRI_LAU_1")));
        assert!(state.can_claim_route(&route("AT2_VAD_1")));
    }

    #[test]
    fn possible_claim_cards_filters_held_cards() {
        let state = player(
            SortedBag::of_two(1, Card::Blue, 2, Card::Locomotive),
            vec![],
        );

        assert_eq!(
            state.possible_claim_cards(&route("BRU_DAV_1")).unwrap(),
            vec![]
        );
        assert_eq!(
            state.possible_claim_cards(&route("BAL_OLT_1")).unwrap(),
            vec![SortedBag::of(2, Card::Locomotive)]
        );
        assert_eq!(
            state.possible_claim_cards(&route("STG_VAD_1")).unwrap(),
            vec![
                SortedBag::of_two(1, Card::Blue, 1, Card::Locomotive),
                SortedBag::of(2, Card::Locomotive),
            ]
        );
    }

    #[test]
    fn possible_additional_cards() {
        let cards = Builder::new()
            .add_count(3, Card::Green)
            .add_count(2, Card::Blue)
            .add_count(2, Card::Locomotive)
            .build();
        let state = player(cards, vec![]);
        let initial = SortedBag::of(1, Card::Green);
        let drawn = SortedBag::of(3, Card::Green);

        assert_eq!(
            state.possible_additional_cards(2, &initial, &drawn).unwrap(),
            vec![
                SortedBag::of(2, Card::Green),
                SortedBag::of_two(1, Card::Green, 1, Card::Locomotive),
                SortedBag::of(2, Card::Locomotive),
            ]
        );
    }

    #[test]
    fn possible_additional_cards_not_enough() {
        let state = player(SortedBag::of_two(2, Card::Red, 4, Card::Blue), vec![]);
        let initial = SortedBag::of(2, Card::Red);
        let drawn = SortedBag::of(3, Card::Red);

        assert_eq!(
            state.possible_additional_cards(1, &initial, &drawn).unwrap(),
            vec![]
        );
    }

    #[test]
    fn possible_additional_cards_invalid() {
        let state = player(SortedBag::of(6, Card::Red), vec![]);
        let initial = SortedBag::of(1, Card::Red);
        let drawn = SortedBag::of(3, Card::Red);

        assert!(state.possible_additional_cards(0, &initial, &drawn).is_err());
        assert!(state.possible_additional_cards(4, &initial, &drawn).is_err());
        assert!(state
            .possible_additional_cards(1, &SortedBag::new(), &drawn)
            .is_err());
        let three_kinds = Builder::new()
            .add(Card::Red)
            .add(Card::Blue)
            .add(Card::Locomotive)
            .build();
        assert!(state.possible_additional_cards(1, &three_kinds, &drawn).is_err());
        assert!(state
            .possible_additional_cards(1, &initial, &SortedBag::of(2, Card::Red))
            .is_err());
    }

    #[test]
    fn with_claimed_route() {
        let state = player(SortedBag::of_two(4, Card::Red, 1, Card::Blue), vec![]);
        let claimed = state
            .with_claimed_route(route("FRI_LAU_1"), &SortedBag::of(3, Card::Red))
            .unwrap();

        assert_eq!(claimed.routes(), &[route("FRI_LAU_1")]);
        assert_eq!(
            claimed.cards(),
            &SortedBag::of_two(1, Card::Red, 1, Card::Blue)
        );
        assert_eq!(claimed.car_count(), 37);
        assert_eq!(claimed.public().claim_points(), 4);
        // The original state is left untouched.
        assert!(state.routes().is_empty());

        assert!(state
            .with_claimed_route(route("FRI_LAU_1"), &SortedBag::of(5, Card::Red))
            .is_err());
    }

    #[test]
    fn ticket_points() {
        let tickets = Builder::new()
            .add(ticket("Berne - Zürich (6)"))
            .add(ticket("Fribourg - Lucerne (5)"))
            .build();
        let routes = vec![
            route("BER_SOL_1"),
            route("OLT_SOL_1"),
            route("OLT_ZUR_1"),
            route("BER_FRI_1"),
        ];
        let state = PlayerState::new(tickets, SortedBag::new(), routes).unwrap();

        assert_eq!(state.ticket_points(), 6 - 5);
        assert_eq!(state.final_points(), 8 + 1);
    }

    #[test]
    fn country_ticket_points() {
        let tickets = SortedBag::of(
            1,
            ticket("Berne - {Allemagne (6), Autriche (11), France (5), Italie (8)}"),
        );
        let routes = vec![route("BER_NEU_1"), route("LCF_NEU_1"), route("FR3_LCF_1")];
        let state = PlayerState::new(tickets, SortedBag::new(), routes).unwrap();

        assert_eq!(state.ticket_points(), 5);
    }

    #[test]
    fn ticket_points_without_routes() {
        let tickets = SortedBag::of(1, ticket("Berne - Zürich (6)"));
        let state = PlayerState::new(tickets, SortedBag::new(), vec![]).unwrap();

        assert_eq!(state.ticket_points(), -6);
    }
}
