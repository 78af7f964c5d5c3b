//! Text encoding of every value exchanged between a proxy and a client.
//!
//! Values from a closed catalog (player ids, turn kinds, cards, routes, tickets) are sent as their
//! index in that catalog, which both ends must share. Text is sent as base64, so that it never
//! holds a separator. Lists are joined with `,`, lists of card bags with `;`, and records join
//! their fields in a fixed order with `;`, or `:` for the public game state.

use crate::error::{ProtocolError, ProtocolResult};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::collections::HashMap;
use std::str::FromStr;
use strum::IntoEnumIterator;
use tchu::card::Card;
use tchu::card_state::PublicCardState;
use tchu::game_state::PublicGameState;
use tchu::map;
use tchu::player::{PlayerId, TurnKind};
use tchu::player_state::{PlayerState, PublicPlayerState};
use tchu::route::Route;
use tchu::sorted_bag::SortedBag;
use tchu::ticket::Ticket;

const LIST_SEPARATOR: &str = ",";
const BAG_LIST_SEPARATOR: &str = ";";
const RECORD_SEPARATOR: &str = ";";
const GAME_STATE_SEPARATOR: &str = ":";

lazy_static! {
    static ref ROUTE_INDICES: HashMap<&'static str, usize> = map::routes()
        .iter()
        .enumerate()
        .map(|(index, route)| (route.id(), index))
        .collect();
    // Country tickets appear twice in the catalog: the first index wins.
    static ref TICKET_INDICES: HashMap<&'static str, usize> = map::tickets()
        .iter()
        .enumerate()
        .rev()
        .map(|(index, ticket)| (ticket.text(), index))
        .collect();
}

/// A value that can travel on the wire.
pub trait Wire: Sized {
    /// Encodes the value. Never contains a space or a line break.
    fn encode(&self) -> ProtocolResult<String>;

    fn decode(text: &str) -> ProtocolResult<Self>;
}

fn encode_all<'a, T: Wire + 'a>(
    values: impl IntoIterator<Item = &'a T>,
    separator: &str,
) -> ProtocolResult<String> {
    let encoded = values
        .into_iter()
        .map(T::encode)
        .collect::<ProtocolResult<Vec<_>>>()?;
    Ok(encoded.join(separator))
}

/// The empty text decodes to no value at all.
fn decode_all<T: Wire>(text: &str, separator: &str) -> ProtocolResult<Vec<T>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(separator).map(T::decode).collect()
}

/// Splits `text` into exactly `count` fields.
pub(crate) fn split_fields<'a>(
    text: &'a str,
    separator: &str,
    count: usize,
) -> ProtocolResult<Vec<&'a str>> {
    let fields: Vec<&str> = text.split(separator).collect();
    if fields.len() == count {
        Ok(fields)
    } else {
        Err(ProtocolError::FieldCount {
            expected: count,
            found: fields.len(),
        })
    }
}

fn parse_integer<T: FromStr<Err = std::num::ParseIntError>>(text: &str) -> ProtocolResult<T> {
    text.parse().map_err(|source| ProtocolError::InvalidInteger {
        text: text.to_owned(),
        source,
    })
}

fn from_catalog<T: Clone>(kind: &'static str, catalog: &[T], text: &str) -> ProtocolResult<T> {
    let index: usize = parse_integer(text)?;
    catalog
        .get(index)
        .cloned()
        .ok_or(ProtocolError::OutOfCatalog { kind, index })
}

impl Wire for i32 {
    fn encode(&self) -> ProtocolResult<String> {
        Ok(self.to_string())
    }

    fn decode(text: &str) -> ProtocolResult<Self> {
        parse_integer(text)
    }
}

impl Wire for usize {
    fn encode(&self) -> ProtocolResult<String> {
        Ok(self.to_string())
    }

    fn decode(text: &str) -> ProtocolResult<Self> {
        parse_integer(text)
    }
}

impl Wire for String {
    fn encode(&self) -> ProtocolResult<String> {
        Ok(STANDARD.encode(self.as_bytes()))
    }

    fn decode(text: &str) -> ProtocolResult<Self> {
        Ok(String::from_utf8(STANDARD.decode(text)?)?)
    }
}

impl Wire for PlayerId {
    fn encode(&self) -> ProtocolResult<String> {
        Ok(self.index().to_string())
    }

    fn decode(text: &str) -> ProtocolResult<Self> {
        from_catalog("player", &PlayerId::ALL, text)
    }
}

impl Wire for TurnKind {
    fn encode(&self) -> ProtocolResult<String> {
        let index = TurnKind::iter()
            .position(|turn_kind| turn_kind == *self)
            .ok_or_else(|| ProtocolError::NotInCatalog(self.to_string()))?;
        Ok(index.to_string())
    }

    fn decode(text: &str) -> ProtocolResult<Self> {
        let index: usize = parse_integer(text)?;
        TurnKind::iter().nth(index).ok_or(ProtocolError::OutOfCatalog {
            kind: "turn kind",
            index,
        })
    }
}

impl Wire for Card {
    fn encode(&self) -> ProtocolResult<String> {
        let index = Card::ALL
            .iter()
            .position(|card| card == self)
            .ok_or_else(|| ProtocolError::NotInCatalog(self.to_string()))?;
        Ok(index.to_string())
    }

    fn decode(text: &str) -> ProtocolResult<Self> {
        from_catalog("card", &Card::ALL, text)
    }
}

impl Wire for Route {
    fn encode(&self) -> ProtocolResult<String> {
        ROUTE_INDICES
            .get(self.id())
            .map(usize::to_string)
            .ok_or_else(|| ProtocolError::NotInCatalog(format!("Route {}", self.id())))
    }

    fn decode(text: &str) -> ProtocolResult<Self> {
        from_catalog("route", map::routes(), text)
    }
}

impl Wire for Ticket {
    fn encode(&self) -> ProtocolResult<String> {
        TICKET_INDICES
            .get(self.text())
            .map(usize::to_string)
            .ok_or_else(|| ProtocolError::NotInCatalog(format!("Ticket {}", self.text())))
    }

    fn decode(text: &str) -> ProtocolResult<Self> {
        from_catalog("ticket", map::tickets(), text)
    }
}

/// Each element is repeated as many times as it is contained.
impl<E: Wire + Ord + Clone> Wire for SortedBag<E> {
    fn encode(&self) -> ProtocolResult<String> {
        encode_all(self.iter(), LIST_SEPARATOR)
    }

    fn decode(text: &str) -> ProtocolResult<Self> {
        Ok(decode_all::<E>(text, LIST_SEPARATOR)?.into_iter().collect())
    }
}

impl Wire for Vec<Route> {
    fn encode(&self) -> ProtocolResult<String> {
        encode_all(self, LIST_SEPARATOR)
    }

    fn decode(text: &str) -> ProtocolResult<Self> {
        decode_all(text, LIST_SEPARATOR)
    }
}

impl Wire for Vec<SortedBag<Card>> {
    fn encode(&self) -> ProtocolResult<String> {
        encode_all(self, BAG_LIST_SEPARATOR)
    }

    /// An empty bag in the list decodes fine, but a list holding a single empty bag cannot be
    /// told apart from an empty list.
    fn decode(text: &str) -> ProtocolResult<Self> {
        decode_all(text, BAG_LIST_SEPARATOR)
    }
}

/// Player names. Names must not be empty.
impl Wire for [String; 2] {
    fn encode(&self) -> ProtocolResult<String> {
        encode_all(self, LIST_SEPARATOR)
    }

    fn decode(text: &str) -> ProtocolResult<Self> {
        let names: Vec<String> = decode_all(text, LIST_SEPARATOR)?;
        names
            .try_into()
            .map_err(|names: Vec<String>| ProtocolError::FieldCount {
                expected: 2,
                found: names.len(),
            })
    }
}

/// `face-up cards;deck size;discards size`
impl Wire for PublicCardState {
    fn encode(&self) -> ProtocolResult<String> {
        Ok([
            encode_all(self.face_up_cards(), LIST_SEPARATOR)?,
            self.deck_size().encode()?,
            self.discards_size().encode()?,
        ]
        .join(RECORD_SEPARATOR))
    }

    fn decode(text: &str) -> ProtocolResult<Self> {
        let fields = split_fields(text, RECORD_SEPARATOR, 3)?;

        Ok(PublicCardState::new(
            decode_all(fields[0], LIST_SEPARATOR)?,
            usize::decode(fields[1])?,
            usize::decode(fields[2])?,
        )?)
    }
}

/// `ticket count;card count;routes`
impl Wire for PublicPlayerState {
    fn encode(&self) -> ProtocolResult<String> {
        Ok([
            self.ticket_count().encode()?,
            self.card_count().encode()?,
            encode_all(self.routes(), LIST_SEPARATOR)?,
        ]
        .join(RECORD_SEPARATOR))
    }

    fn decode(text: &str) -> ProtocolResult<Self> {
        let fields = split_fields(text, RECORD_SEPARATOR, 3)?;

        Ok(PublicPlayerState::new(
            usize::decode(fields[0])?,
            usize::decode(fields[1])?,
            Vec::<Route>::decode(fields[2])?,
        )?)
    }
}

/// `tickets;cards;routes`
impl Wire for PlayerState {
    fn encode(&self) -> ProtocolResult<String> {
        Ok([
            self.tickets().encode()?,
            self.cards().encode()?,
            encode_all(self.routes(), LIST_SEPARATOR)?,
        ]
        .join(RECORD_SEPARATOR))
    }

    fn decode(text: &str) -> ProtocolResult<Self> {
        let fields = split_fields(text, RECORD_SEPARATOR, 3)?;

        Ok(PlayerState::new(
            SortedBag::decode(fields[0])?,
            SortedBag::decode(fields[1])?,
            Vec::<Route>::decode(fields[2])?,
        )?)
    }
}

/// `tickets count:card state:current player:player 1 state:player 2 state:last player`, the last
/// player being empty until known.
impl Wire for PublicGameState {
    fn encode(&self) -> ProtocolResult<String> {
        let last_player = match self.last_player() {
            Some(player_id) => player_id.encode()?,
            None => String::new(),
        };

        Ok([
            self.tickets_count().encode()?,
            self.card_state().encode()?,
            self.current_player_id().encode()?,
            self.player_state(PlayerId::Player1).encode()?,
            self.player_state(PlayerId::Player2).encode()?,
            last_player,
        ]
        .join(GAME_STATE_SEPARATOR))
    }

    fn decode(text: &str) -> ProtocolResult<Self> {
        let fields = split_fields(text, GAME_STATE_SEPARATOR, 6)?;
        let last_player = match fields[5] {
            "" => None,
            last_player => Some(PlayerId::decode(last_player)?),
        };

        Ok(PublicGameState::new(
            usize::decode(fields[0])?,
            PublicCardState::decode(fields[1])?,
            PlayerId::decode(fields[2])?,
            [
                PublicPlayerState::decode(fields[3])?,
                PublicPlayerState::decode(fields[4])?,
            ],
            last_player,
        ))
    }
}
