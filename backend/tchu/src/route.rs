use crate::card::{Card, Color};
use crate::constants::{
    ADDITIONAL_TUNNEL_CARDS, MAX_ROUTE_LENGTH, MIN_ROUTE_LENGTH, ROUTE_CLAIM_POINTS,
};
use crate::error::{check_argument, TchuError, TchuResult};
use crate::sorted_bag::SortedBag;
use crate::station::Station;

use serde::Serialize;
use std::fmt;
use strum::IntoEnumIterator;

/// Whether a route runs on the surface, or underground (a tunnel).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Overground,
    /// Claiming a tunnel may cost up to three additional cards.
    Underground,
}

/// An undirected connection between two distinct stations.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Route {
    id: &'static str,
    station_1: Station,
    station_2: Station,
    length: u8,
    level: Level,
    /// `None` means that cards of any single color can be used.
    color: Option<Color>,
}

impl Route {
    /// Builds a route, checking that both stations differ and that the length is valid.
    ///
    /// # Example
    /// ```
    /// use tchu::card::Color;
    /// use tchu::route::{Level, Route};
    /// use tchu::station::Station;
    ///
    /// let berne = Station::new(3, "Berne");
    /// let fribourg = Station::new(9, "Fribourg");
    ///
    /// assert!(Route::new("BER_FRI_1", berne, fribourg, 1, Level::Overground, Some(Color::Orange)).is_ok());
    /// assert!(Route::new("BER_BER_1", berne, berne, 1, Level::Overground, None).is_err());
    /// assert!(Route::new("BER_FRI_3", berne, fribourg, 7, Level::Overground, None).is_err());
    /// ```
    pub fn new(
        id: &'static str,
        station_1: Station,
        station_2: Station,
        length: u8,
        level: Level,
        color: Option<Color>,
    ) -> TchuResult<Self> {
        check_argument(station_1 != station_2, || {
            format!("Route {} cannot connect {} to itself.", id, station_1)
        })?;
        check_argument(
            (MIN_ROUTE_LENGTH..=MAX_ROUTE_LENGTH).contains(&length),
            || {
                format!(
                    "Route {} has length {}, which is not between {} and {}.",
                    id, length, MIN_ROUTE_LENGTH, MAX_ROUTE_LENGTH
                )
            },
        )?;

        Ok(Self::new_unchecked(
            id, station_1, station_2, length, level, color,
        ))
    }

    /// Used by the static map catalog, whose data is known to be valid.
    pub(crate) const fn new_unchecked(
        id: &'static str,
        station_1: Station,
        station_2: Station,
        length: u8,
        level: Level,
        color: Option<Color>,
    ) -> Self {
        Self {
            id,
            station_1,
            station_2,
            length,
            level,
            color,
        }
    }

    #[inline]
    pub fn id(&self) -> &'static str {
        self.id
    }

    #[inline]
    pub fn station_1(&self) -> Station {
        self.station_1
    }

    #[inline]
    pub fn station_2(&self) -> Station {
        self.station_2
    }

    #[inline]
    pub fn length(&self) -> u8 {
        self.length
    }

    #[inline]
    pub fn level(&self) -> Level {
        self.level
    }

    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn stations(&self) -> [Station; 2] {
        [self.station_1, self.station_2]
    }

    /// The station at the other end of the route.
    ///
    /// Returns an `Err` if `station` is not an end of this route.
    pub fn station_opposite(&self, station: &Station) -> TchuResult<Station> {
        if *station == self.station_1 {
            Ok(self.station_2)
        } else if *station == self.station_2 {
            Ok(self.station_1)
        } else {
            Err(TchuError::InvalidArgument(format!(
                "{} is not an end of route {}.",
                station, self.id
            )))
        }
    }

    /// Whether both routes connect the same two stations, i.e. they are parallel ("double") routes.
    pub fn has_same_stations(&self, other: &Route) -> bool {
        (self.station_1 == other.station_1 && self.station_2 == other.station_2)
            || (self.station_1 == other.station_2 && self.station_2 == other.station_1)
    }

    /// Points granted for claiming this route.
    #[inline]
    pub fn claim_points(&self) -> i32 {
        ROUTE_CLAIM_POINTS[self.length as usize]
    }

    /// All the combinations of cards that could be used to claim this route, ignoring what a
    /// player actually holds.
    ///
    /// Options are sorted by ascending number of locomotives, then by color. On the surface,
    /// locomotives are never usable; in a tunnel, the all-locomotive option comes last.
    ///
    /// # Example
    /// ```
    /// use tchu::map;
    ///
    /// // A black tunnel of length 1: one black card, or one locomotive.
    /// let route = map::route("BEL_LOC_1").unwrap();
    /// assert_eq!(route.possible_claim_cards().len(), 2);
    /// ```
    pub fn possible_claim_cards(&self) -> Vec<SortedBag<Card>> {
        let length = self.length as usize;
        let cars: Vec<Card> = match self.color {
            Some(color) => vec![Card::of(color)],
            None => Color::iter().map(Card::of).collect(),
        };
        let max_locomotives = match self.level {
            Level::Overground => 0,
            Level::Underground => length,
        };

        let mut options = Vec::new();
        for locomotives in 0..=max_locomotives {
            if locomotives == length {
                options.push(SortedBag::of(length, Card::Locomotive));
            } else {
                for car in &cars {
                    options.push(SortedBag::of_two(
                        length - locomotives,
                        *car,
                        locomotives,
                        Card::Locomotive,
                    ));
                }
            }
        }

        options
    }

    /// How many additional cards must be played to claim this tunnel with `claim_cards`, given the
    /// three cards `drawn_cards` drawn from the deck.
    ///
    /// Every drawn locomotive counts, and so does every drawn car card whose color is present in
    /// `claim_cards`.
    ///
    /// Returns an `Err` if this route is not a tunnel, or if exactly three cards were not drawn.
    pub fn additional_claim_cards_count(
        &self,
        claim_cards: &SortedBag<Card>,
        drawn_cards: &SortedBag<Card>,
    ) -> TchuResult<usize> {
        check_argument(self.level == Level::Underground, || {
            format!(
                "Route {} is not a tunnel, so no additional cards are needed.",
                self.id
            )
        })?;
        check_argument(drawn_cards.size() == ADDITIONAL_TUNNEL_CARDS, || {
            format!(
                "Exactly {} cards must be drawn to claim a tunnel, but {} were.",
                ADDITIONAL_TUNNEL_CARDS,
                drawn_cards.size()
            )
        })?;

        Ok(drawn_cards
            .iter()
            .filter(|card| card.is_locomotive() || claim_cards.contains(card))
            .count())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.station_1, self.station_2)
    }
}
