use crate::constants::{
    ADDITIONAL_TUNNEL_CARDS, DECK_SLOT, FACE_UP_CARDS_COUNT, INITIAL_TICKETS_COUNT,
    INITIAL_TICKETS_KEPT_MIN, IN_GAME_TICKETS_COUNT, IN_GAME_TICKETS_KEPT_MIN,
    LONGEST_TRAIL_BONUS_POINTS,
};
use crate::error::{check_argument, check_index, TchuError, TchuResult};
use crate::game_state::GameState;
use crate::info::Info;
use crate::player::{Player, PlayerError, PlayerId, TurnKind};
use crate::route::Level;
use crate::sorted_bag::{Builder, SortedBag};
use crate::ticket::Ticket;
use crate::trail::Trail;

use array_init::array_init;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{EnumCount, IntoEnumIterator};
use thiserror::Error;
use tracing::{debug, info};

/// Phases of the game, which act as states in the game's finite-state machine.
///
/// # JSON
/// Phases are serialized in snake_case.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Players are told who they are, and choose their initial tickets.
    Starting,
    /// The main, turn-based phase of the game.
    Playing,
    /// A player is left with two cars or less: each player has one turn left.
    LastTurn,
    /// Each player has played their last turn, and points are counted.
    Done,
}

/// Why a game stopped before its end.
#[derive(Debug, Error)]
pub enum GameError {
    /// A player attempted a move the rules forbid.
    #[error("Illegal move: {0}")]
    Rules(#[from] TchuError),
    /// A player could not answer.
    #[error(transparent)]
    Player(#[from] PlayerError),
}

pub type GameResult<T> = Result<T, GameError>;

/// How a game ended.
#[derive(Debug)]
pub struct GameOutcome {
    /// Final points of each player, longest trail bonus included, indexed by `PlayerId::index`.
    pub points: [i32; 2],
    /// `None` on a draw.
    pub winner: Option<PlayerId>,
    pub final_state: GameState,
}

/// Runs a game between two players, from the initial deal to the final count.
///
/// Players are called synchronously, one at a time. The game state is threaded through each turn:
/// every step takes the current state and returns the next one.
pub struct Game<R: Rng> {
    phase: GamePhase,
    players: [Box<dyn Player>; 2],
    player_names: [String; 2],
    infos: [Info; 2],
    tickets: SortedBag<Ticket>,
    rng: R,
}

impl<R: Rng> Game<R> {
    /// Creates a game between `players`, named `player_names`, drawing from `tickets`.
    pub fn new(
        players: [Box<dyn Player>; 2],
        player_names: [String; 2],
        tickets: SortedBag<Ticket>,
        rng: R,
    ) -> Self {
        let infos = array_init(|index| Info::new(player_names[index].clone()));

        Self {
            phase: GamePhase::Starting,
            players,
            player_names,
            infos,
            tickets,
            rng,
        }
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[inline]
    fn player(&mut self, player_id: PlayerId) -> &mut dyn Player {
        self.players[player_id.index()].as_mut()
    }

    #[inline]
    fn info(&self, player_id: PlayerId) -> &Info {
        &self.infos[player_id.index()]
    }

    /// Sends `info` to both players.
    fn broadcast(&mut self, info: &str) -> GameResult<()> {
        for player in self.players.iter_mut() {
            player.receive_info(info)?;
        }
        Ok(())
    }

    /// Sends the public state, and their own state, to both players.
    fn update_states(&mut self, state: &GameState) -> GameResult<()> {
        for player_id in PlayerId::iter() {
            self.player(player_id)
                .update_state(state.public(), state.player_state(player_id))?;
        }
        Ok(())
    }

    /// Plays the whole game.
    ///
    /// Returns an `Err` as soon as a player fails to answer, or attempts an illegal move. The game
    /// cannot be resumed afterwards.
    pub fn play(&mut self) -> GameResult<GameOutcome> {
        info!(
            "Starting a game between {} and {}.",
            self.player_names[0], self.player_names[1]
        );
        self.phase = GamePhase::Starting;

        let state = self.start()?;
        let state = self.play_turns(state)?;

        self.phase = GamePhase::Done;
        self.end(state)
    }

    /// Deals, and lets both players choose their initial tickets.
    fn start(&mut self) -> GameResult<GameState> {
        let names = self.player_names.clone();
        for player_id in PlayerId::iter() {
            self.player(player_id).init_players(player_id, &names)?;
        }

        let mut state = GameState::initial(&self.tickets, &mut self.rng)?;
        let first = self.info(state.current_player_id()).will_play_first();
        self.broadcast(&first)?;

        let mut offers = Vec::with_capacity(PlayerId::COUNT);
        for player_id in PlayerId::iter() {
            let offered = state.top_tickets(INITIAL_TICKETS_COUNT)?;
            state = state.without_top_tickets(INITIAL_TICKETS_COUNT)?;
            self.player(player_id)
                .set_initial_ticket_choice(offered.clone())?;
            offers.push(offered);
        }
        self.update_states(&state)?;

        for (player_id, offered) in PlayerId::iter().zip(offers) {
            let chosen = self.player(player_id).choose_initial_tickets()?;
            check_kept_tickets(&offered, &chosen, INITIAL_TICKETS_KEPT_MIN)?;
            state = state.with_initially_chosen_tickets(player_id, &chosen)?;
        }
        for player_id in PlayerId::iter() {
            let kept = self
                .info(player_id)
                .kept_tickets(state.player_state(player_id).tickets().size());
            self.broadcast(&kept)?;
        }

        Ok(state)
    }

    /// Plays turns until the last player has played their last turn.
    fn play_turns(&mut self, mut state: GameState) -> GameResult<GameState> {
        self.phase = GamePhase::Playing;

        loop {
            let current = state.current_player_id();
            let can_play = self.info(current).can_play();
            self.broadcast(&can_play)?;
            self.update_states(&state)?;

            let turn_kind = self.player(current).next_turn_kind()?;
            debug!("The {} takes a {} turn.", current, turn_kind);
            state = match turn_kind {
                TurnKind::DrawTickets => self.draw_tickets(state)?,
                TurnKind::DrawCards => self.draw_cards(state)?,
                TurnKind::ClaimRoute => self.claim_route(state)?,
            };

            if state.last_turn_begins() {
                debug!("The {} triggers the last turn.", current);
                let last_turn = self
                    .info(current)
                    .last_turn_begins(state.current_player_state().car_count());
                self.broadcast(&last_turn)?;
                self.phase = GamePhase::LastTurn;
            }

            if state.last_player() == Some(current) {
                return Ok(state);
            }
            state = state.for_next_turn();
        }
    }

    /// Does nothing if no ticket is left.
    fn draw_tickets(&mut self, state: GameState) -> GameResult<GameState> {
        if !state.public().can_draw_tickets() {
            debug!("No ticket left to draw: the turn is skipped.");
            return Ok(state);
        }

        let current = state.current_player_id();
        let count = IN_GAME_TICKETS_COUNT.min(state.public().tickets_count());
        let drew = self.info(current).drew_tickets(count);
        self.broadcast(&drew)?;

        let drawn = state.top_tickets(count)?;
        let chosen = self.player(current).choose_tickets(drawn.clone())?;
        check_kept_tickets(&drawn, &chosen, IN_GAME_TICKETS_KEPT_MIN)?;

        let kept = self.info(current).kept_tickets(chosen.size());
        self.broadcast(&kept)?;

        Ok(state.with_chosen_additional_tickets(&drawn, &chosen)?)
    }

    /// Two draws, the state being sent again in-between. Does nothing if too few cards are left.
    fn draw_cards(&mut self, mut state: GameState) -> GameResult<GameState> {
        let current = state.current_player_id();

        for draw in 0..2 {
            if !state.public().can_draw_cards() {
                debug!("Too few cards left to draw: the draw is skipped.");
                break;
            }
            if draw == 1 {
                self.update_states(&state)?;
            }

            let slot = self.player(current).draw_slot()?;
            state = self.with_deck_recreated_if_needed(state)?;

            if slot == DECK_SLOT {
                state = state.with_blindly_drawn_card()?;
                let drew = self.info(current).drew_blind_card();
                self.broadcast(&drew)?;
            } else {
                let slot = face_up_slot(slot)?;
                let card = state.public().card_state().face_up_card(slot)?;
                state = state.with_drawn_face_up_card(slot)?;
                let drew = self.info(current).drew_visible_card(card);
                self.broadcast(&drew)?;
            }
        }

        Ok(state)
    }

    fn with_deck_recreated_if_needed(&mut self, state: GameState) -> GameResult<GameState> {
        if state.public().card_state().is_deck_empty() {
            debug!("Shuffling the discards into a new deck.");
        }
        Ok(state.with_cards_deck_recreated_if_needed(&mut self.rng)?)
    }

    /// Claims a route, drawing three more cards first for a tunnel.
    ///
    /// A tunnel is not claimed when fewer than three cards are left to draw.
    fn claim_route(&mut self, mut state: GameState) -> GameResult<GameState> {
        let current = state.current_player_id();
        let route = self.player(current).claimed_route()?;
        let initial_cards = self.player(current).initial_claim_cards()?;

        check_argument(state.public().is_route_available(&route), || {
            format!("Route {} cannot be claimed anymore.", route.id())
        })?;
        let possible_cards = state.current_player_state().possible_claim_cards(&route)?;
        check_argument(possible_cards.contains(&initial_cards), || {
            format!(
                "Route {} cannot be claimed using {}.",
                route.id(),
                initial_cards
            )
        })?;

        if route.level() == Level::Overground {
            let claimed = self.info(current).claimed_route(&route, &initial_cards);
            self.broadcast(&claimed)?;
            return Ok(state.with_claimed_route(route, &initial_cards)?);
        }

        if state.public().card_state().total_size() < ADDITIONAL_TUNNEL_CARDS {
            debug!("Too few cards left to attempt tunnel {}.", route.id());
            let not_claimed = self.info(current).did_not_claim_route(&route);
            self.broadcast(&not_claimed)?;
            return Ok(state);
        }

        let attempt = self
            .info(current)
            .attempts_tunnel_claim(&route, &initial_cards);
        self.broadcast(&attempt)?;

        let mut drawn_cards = Builder::new();
        for _ in 0..ADDITIONAL_TUNNEL_CARDS {
            state = self.with_deck_recreated_if_needed(state)?;
            drawn_cards = drawn_cards.add(state.top_card()?);
            state = state.without_top_card()?;
        }
        let drawn_cards = drawn_cards.build();

        let additional_count = route.additional_claim_cards_count(&initial_cards, &drawn_cards)?;
        debug!(
            "Tunnel {} requires {} additional cards.",
            route.id(),
            additional_count
        );
        self.broadcast(&Info::drew_additional_cards(&drawn_cards, additional_count))?;

        let claim_cards = if additional_count == 0 {
            Some(initial_cards)
        } else {
            let options = state.current_player_state().possible_additional_cards(
                additional_count,
                &initial_cards,
                &drawn_cards,
            )?;
            let chosen = if options.is_empty() {
                SortedBag::new()
            } else {
                self.player(current)
                    .choose_additional_cards(options.clone())?
            };

            if chosen.is_empty() {
                None
            } else {
                check_argument(options.contains(&chosen), || {
                    format!(
                        "Additional cards {} are not among the options.",
                        chosen
                    )
                })?;
                Some(initial_cards.union(&chosen))
            }
        };

        state = match claim_cards {
            Some(cards) => {
                let claimed = self.info(current).claimed_route(&route, &cards);
                self.broadcast(&claimed)?;
                state.with_claimed_route(route, &cards)?
            }
            None => {
                let not_claimed = self.info(current).did_not_claim_route(&route);
                self.broadcast(&not_claimed)?;
                state
            }
        };

        Ok(state.with_more_discarded_cards(&drawn_cards)?)
    }

    /// Counts the points, and announces the longest trail bonus and the winner.
    fn end(&mut self, state: GameState) -> GameResult<GameOutcome> {
        self.update_states(&state)?;

        let trails: [Trail; 2] =
            array_init(|index| Trail::longest(state.player_state(PlayerId::ALL[index]).routes()));
        let bonus_player = match trails[0].length().cmp(&trails[1].length()) {
            Ordering::Greater => Some(PlayerId::Player1),
            Ordering::Less => Some(PlayerId::Player2),
            Ordering::Equal => None,
        };

        let mut points: [i32; 2] =
            array_init(|index| state.player_state(PlayerId::ALL[index]).final_points());
        if let Some(player_id) = bonus_player {
            points[player_id.index()] += LONGEST_TRAIL_BONUS_POINTS;
            let bonus = self
                .info(player_id)
                .gets_longest_trail_bonus(&trails[player_id.index()]);
            self.broadcast(&bonus)?;
        }

        let winner = match points[0].cmp(&points[1]) {
            Ordering::Greater => Some(PlayerId::Player1),
            Ordering::Less => Some(PlayerId::Player2),
            Ordering::Equal => None,
        };
        let result = match winner {
            Some(winner) => self
                .info(winner)
                .won(points[winner.index()], points[winner.next().index()]),
            None => Info::draw(&self.player_names, points[0]),
        };
        self.broadcast(&result)?;
        info!("Game over: {}", result);

        Ok(GameOutcome {
            points,
            winner,
            final_state: state,
        })
    }
}

/// Converts a slot sent by a player into a face-up slot index.
fn face_up_slot(slot: i32) -> TchuResult<usize> {
    let index = usize::try_from(slot).map_err(|_| TchuError::IndexOutOfBounds {
        index: slot.unsigned_abs() as usize,
        size: FACE_UP_CARDS_COUNT,
    })?;
    check_index(index, FACE_UP_CARDS_COUNT)
}

/// Checks that `chosen` tickets are among `offered`, and that at least `min` were kept.
fn check_kept_tickets(
    offered: &SortedBag<Ticket>,
    chosen: &SortedBag<Ticket>,
    min: usize,
) -> TchuResult<()> {
    check_argument(offered.contains_all(chosen), || {
        format!(
            "Chosen tickets {} are not among the offered tickets {}.",
            chosen, offered
        )
    })?;
    check_argument(chosen.size() >= min.min(offered.size()), || {
        format!(
            "At least {} tickets must be kept, but only {} were.",
            min.min(offered.size()),
            chosen.size()
        )
    })
}
