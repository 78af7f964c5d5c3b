//! Network play for _tCHu_: a [`proxy::RemotePlayerProxy`] stands for a player in the process
//! running the game, and forwards every call over TCP to a [`client::RemotePlayerClient`], which
//! plays it against a local player.
//!
//! Messages are single lines of text, described in [`message`] and [`codec`].

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod message;
pub mod proxy;

#[macro_use]
extern crate lazy_static;
