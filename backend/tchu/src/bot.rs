use crate::card::Card;
use crate::constants::{DECK_SLOT, INITIAL_TICKETS_KEPT_MIN, IN_GAME_TICKETS_KEPT_MIN};
use crate::game_state::PublicGameState;
use crate::map;
use crate::player::{Player, PlayerError, PlayerId, PlayerResult, TurnKind};
use crate::player_state::PlayerState;
use crate::route::Route;
use crate::sorted_bag::SortedBag;
use crate::ticket::Ticket;

use tracing::trace;

/// A deterministic computer player.
///
/// Claims the longest route it can afford whenever possible, with the cheapest cards. Otherwise it
/// draws cards, alternating between the leftmost face-up card and the deck, and draws tickets
/// only when no card is left. It keeps as few tickets as allowed, the cheapest ones.
#[derive(Debug, Default)]
pub struct GreedyPlayer {
    own_id: Option<PlayerId>,
    state: Option<(PublicGameState, PlayerState)>,
    initial_tickets: SortedBag<Ticket>,
    claim: Option<(Route, SortedBag<Card>)>,
    draws: usize,
}

impl GreedyPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> PlayerResult<&(PublicGameState, PlayerState)> {
        self.state
            .as_ref()
            .ok_or_else(|| PlayerError::Protocol(String::from("No state received yet.")))
    }

    /// The longest route `own_state` can claim, with the cards to claim it.
    fn best_claim(
        public_state: &PublicGameState,
        own_state: &PlayerState,
    ) -> Option<(Route, SortedBag<Card>)> {
        map::routes()
            .iter()
            .filter(|route| public_state.is_route_available(route))
            .filter_map(|route| {
                let options = own_state.possible_claim_cards(route).ok()?;
                options.into_iter().next().map(|cards| (*route, cards))
            })
            .fold(None, |best: Option<(Route, SortedBag<Card>)>, claim| match best {
                Some(best) if best.0.length() >= claim.0.length() => Some(best),
                _ => Some(claim),
            })
    }
}

/// Tickets sorted by increasing value, the value of a ticket being its best trip.
fn cheapest_tickets(tickets: &SortedBag<Ticket>, count: usize) -> SortedBag<Ticket> {
    let mut tickets = tickets.to_vec();
    tickets.sort_by_key(|ticket| ticket.trips().iter().map(|trip| trip.points()).max());
    tickets.into_iter().take(count).collect()
}

impl Player for GreedyPlayer {
    fn init_players(&mut self, own_id: PlayerId, player_names: &[String; 2]) -> PlayerResult<()> {
        trace!("{} plays as {}.", player_names[own_id.index()], own_id);
        self.own_id = Some(own_id);
        Ok(())
    }

    fn receive_info(&mut self, info: &str) -> PlayerResult<()> {
        trace!("{:?} received: {}", self.own_id, info);
        Ok(())
    }

    fn update_state(
        &mut self,
        new_state: &PublicGameState,
        own_state: &PlayerState,
    ) -> PlayerResult<()> {
        self.state = Some((new_state.clone(), own_state.clone()));
        Ok(())
    }

    fn set_initial_ticket_choice(&mut self, tickets: SortedBag<Ticket>) -> PlayerResult<()> {
        self.initial_tickets = tickets;
        Ok(())
    }

    fn choose_initial_tickets(&mut self) -> PlayerResult<SortedBag<Ticket>> {
        Ok(cheapest_tickets(&self.initial_tickets, INITIAL_TICKETS_KEPT_MIN))
    }

    fn next_turn_kind(&mut self) -> PlayerResult<TurnKind> {
        let (public_state, own_state) = self.state()?;
        let claim = Self::best_claim(public_state, own_state);
        let turn_kind = if claim.is_some() {
            TurnKind::ClaimRoute
        } else if public_state.can_draw_cards() || !public_state.can_draw_tickets() {
            TurnKind::DrawCards
        } else {
            TurnKind::DrawTickets
        };

        self.claim = claim;
        Ok(turn_kind)
    }

    fn choose_tickets(&mut self, options: SortedBag<Ticket>) -> PlayerResult<SortedBag<Ticket>> {
        Ok(cheapest_tickets(&options, IN_GAME_TICKETS_KEPT_MIN))
    }

    fn draw_slot(&mut self) -> PlayerResult<i32> {
        self.draws += 1;
        Ok(if self.draws % 2 == 1 { 0 } else { DECK_SLOT })
    }

    fn claimed_route(&mut self) -> PlayerResult<Route> {
        self.claim
            .as_ref()
            .map(|(route, _)| *route)
            .ok_or_else(|| PlayerError::Protocol(String::from("No route to claim.")))
    }

    fn initial_claim_cards(&mut self) -> PlayerResult<SortedBag<Card>> {
        self.claim
            .take()
            .map(|(_, cards)| cards)
            .ok_or_else(|| PlayerError::Protocol(String::from("No route to claim.")))
    }

    fn choose_additional_cards(
        &mut self,
        options: Vec<SortedBag<Card>>,
    ) -> PlayerResult<SortedBag<Card>> {
        Ok(options.into_iter().next().unwrap_or_default())
    }
}
