use crate::card::Card;
use crate::game_state::PublicGameState;
use crate::player_state::PlayerState;
use crate::route::Route;
use crate::sorted_bag::SortedBag;
use crate::ticket::Ticket;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::io;
use strum_macros::{Display, EnumCount, EnumIter};
use thiserror::Error;

/// Identifies each of the two players of a game.
///
/// # JSON
/// Serialized as its position, i.e. `0` or `1`, like on the wire.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize_repr,
    Display,
    EnumCount,
    EnumIter,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize_repr,
)]
#[repr(u8)]
pub enum PlayerId {
    #[strum(serialize = "player 1")]
    Player1 = 0,
    #[strum(serialize = "player 2")]
    Player2 = 1,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::Player1, PlayerId::Player2];

    /// The other player.
    ///
    /// # Example
    /// ```
    /// use tchu::player::PlayerId;
    ///
    /// assert_eq!(PlayerId::Player1.next(), PlayerId::Player2);
    /// assert_eq!(PlayerId::Player2.next(), PlayerId::Player1);
    /// ```
    #[inline]
    pub fn next(&self) -> Self {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }

    /// Position of the player, to index per-player arrays.
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// The three kinds of turns a player can take.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumCount,
    EnumIter,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TurnKind {
    DrawTickets,
    DrawCards,
    ClaimRoute,
}

/// Any failure of a `Player` to answer, be it local or remote.
///
/// The game cannot go on without an answer, so these errors end it.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("I/O error while talking to the player: {0}")]
    Io(#[from] io::Error),
    #[error("The player sent invalid data: {0}")]
    Protocol(String),
    #[error("The player is gone.")]
    Disconnected,
}

pub type PlayerResult<T> = Result<T, PlayerError>;

/// A decision-maker taking part in a game.
///
/// The [`crate::game::Game`] calls these methods in a fixed order, and never calls a second one
/// before the first one returned. Notifications (`init_players`, `receive_info`,
/// `update_state`, `set_initial_ticket_choice`) expect no answer.
pub trait Player: Send {
    /// Tells the player who they are, and what both players are called.
    fn init_players(&mut self, own_id: PlayerId, player_names: &[String; 2]) -> PlayerResult<()>;

    /// A human-readable event of the game.
    fn receive_info(&mut self, info: &str) -> PlayerResult<()>;

    /// The public state of the game, along with the player's own complete state.
    fn update_state(
        &mut self,
        new_state: &PublicGameState,
        own_state: &PlayerState,
    ) -> PlayerResult<()>;

    /// The five tickets offered when the game starts.
    fn set_initial_ticket_choice(&mut self, tickets: SortedBag<Ticket>) -> PlayerResult<()>;

    /// Which of the initially offered tickets the player keeps.
    fn choose_initial_tickets(&mut self) -> PlayerResult<SortedBag<Ticket>>;

    fn next_turn_kind(&mut self) -> PlayerResult<TurnKind>;

    /// Which of the offered tickets the player keeps, during the game.
    fn choose_tickets(&mut self, options: SortedBag<Ticket>) -> PlayerResult<SortedBag<Ticket>>;

    /// Where to draw a card from: a face-up slot in `0..5`, or `DECK_SLOT` for the deck.
    fn draw_slot(&mut self) -> PlayerResult<i32>;

    /// The route the player attempts to claim.
    fn claimed_route(&mut self) -> PlayerResult<Route>;

    /// The cards the player initially pays for the route they attempt to claim.
    fn initial_claim_cards(&mut self) -> PlayerResult<SortedBag<Card>>;

    /// Which additional cards the player pays to claim a tunnel. An empty bag abandons the claim.
    fn choose_additional_cards(
        &mut self,
        options: Vec<SortedBag<Card>>,
    ) -> PlayerResult<SortedBag<Card>>;
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn init_players(&mut self, own_id: PlayerId, player_names: &[String; 2]) -> PlayerResult<()> {
        (**self).init_players(own_id, player_names)
    }

    fn receive_info(&mut self, info: &str) -> PlayerResult<()> {
        (**self).receive_info(info)
    }

    fn update_state(
        &mut self,
        new_state: &PublicGameState,
        own_state: &PlayerState,
    ) -> PlayerResult<()> {
        (**self).update_state(new_state, own_state)
    }

    fn set_initial_ticket_choice(&mut self, tickets: SortedBag<Ticket>) -> PlayerResult<()> {
        (**self).set_initial_ticket_choice(tickets)
    }

    fn choose_initial_tickets(&mut self) -> PlayerResult<SortedBag<Ticket>> {
        (**self).choose_initial_tickets()
    }

    fn next_turn_kind(&mut self) -> PlayerResult<TurnKind> {
        (**self).next_turn_kind()
    }

    fn choose_tickets(&mut self, options: SortedBag<Ticket>) -> PlayerResult<SortedBag<Ticket>> {
        (**self).choose_tickets(options)
    }

    fn draw_slot(&mut self) -> PlayerResult<i32> {
        (**self).draw_slot()
    }

    fn claimed_route(&mut self) -> PlayerResult<Route> {
        (**self).claimed_route()
    }

    fn initial_claim_cards(&mut self) -> PlayerResult<SortedBag<Card>> {
        (**self).initial_claim_cards()
    }

    fn choose_additional_cards(
        &mut self,
        options: Vec<SortedBag<Card>>,
    ) -> PlayerResult<SortedBag<Card>> {
        (**self).choose_additional_cards(options)
    }
}
