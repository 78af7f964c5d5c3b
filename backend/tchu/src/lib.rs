//! Rules engine of _tCHu_, a two-player game of claiming railway routes across Switzerland.
//!
//! Game states are immutable: every move produces a new [`game_state::GameState`]. The
//! [`game::Game`] drives the turns, asking two [`player::Player`]s for their decisions.

pub mod bot;
pub mod card;
pub mod card_state;
pub mod constants;
pub mod deck;
pub mod dispatch;
pub mod error;
pub mod game;
pub mod game_state;
pub mod info;
pub mod map;
pub mod player;
pub mod player_state;
pub mod route;
pub mod sorted_bag;
pub mod station;
pub mod station_partition;
pub mod ticket;
pub mod trail;

#[macro_use]
extern crate lazy_static;
