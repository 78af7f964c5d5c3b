use crate::error::{check_argument, TchuResult};
use crate::station::{Station, StationConnectivity};

use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A trip from one station to another, worth `points` if both are connected at the end of the game.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Trip {
    from: Station,
    to: Station,
    points: u32,
}

impl Trip {
    pub fn new(from: Station, to: Station, points: u32) -> TchuResult<Self> {
        check_argument(points > 0, || {
            format!("Trip from {} to {} must be worth some points.", from, to)
        })?;
        Ok(Self { from, to, points })
    }

    /// Used by the static map catalog, whose data is known to be valid.
    pub(crate) const fn new_unchecked(from: Station, to: Station, points: u32) -> Self {
        Self { from, to, points }
    }

    /// Every trip from each of the `from` stations to each of the `to` stations, all worth `points`.
    pub fn all(from: &[Station], to: &[Station], points: u32) -> TchuResult<Vec<Trip>> {
        check_argument(!from.is_empty() && !to.is_empty(), || {
            String::from("Trips need at least one departure and one arrival station.")
        })?;

        from.iter()
            .flat_map(|from| to.iter().map(move |to| Trip::new(*from, *to, points)))
            .collect()
    }

    #[inline]
    pub fn from(&self) -> Station {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Station {
        self.to
    }

    #[inline]
    pub fn points(&self) -> u32 {
        self.points
    }

    /// `points` if both ends are connected, `-points` otherwise.
    pub fn points_for(&self, connectivity: &impl StationConnectivity) -> i32 {
        let points = self.points as i32;
        if connectivity.connected(&self.from, &self.to) {
            points
        } else {
            -points
        }
    }
}

/// A destination ticket: one or more trips sharing the same departure.
///
/// Country tickets hold one trip per pair of border stations, but read as a single destination,
/// e.g. "Allemagne - {Autriche (5), France (5), Italie (13)}".
/// Tickets are compared and ordered by their text.
#[derive(Clone, Debug)]
pub struct Ticket {
    trips: SmallVec<[Trip; 1]>,
    text: String,
}

impl Ticket {
    /// # Example
    /// ```
    /// use tchu::station::Station;
    /// use tchu::ticket::{Ticket, Trip};
    ///
    /// let lausanne = Station::new(13, "Lausanne");
    /// let saint_gall = Station::new(27, "Saint-Gall");
    ///
    /// let ticket = Ticket::new(vec![Trip::new(lausanne, saint_gall, 13).unwrap()]).unwrap();
    /// assert_eq!(ticket.text(), "Lausanne - Saint-Gall (13)");
    /// ```
    pub fn new(trips: Vec<Trip>) -> TchuResult<Self> {
        check_argument(!trips.is_empty(), || {
            String::from("A ticket needs at least one trip.")
        })?;

        let origin = trips[0].from.name();
        check_argument(
            trips.iter().all(|trip| trip.from.name() == origin),
            || format!("All trips of a ticket must depart from {}.", origin),
        )?;

        let text = Self::compute_text(&trips);
        Ok(Self {
            trips: SmallVec::from_vec(trips),
            text,
        })
    }

    /// Used by the static map catalog, whose trips are known to share their origin.
    pub(crate) fn new_unchecked(trips: Vec<Trip>) -> Self {
        let text = Self::compute_text(&trips);
        Self {
            trips: SmallVec::from_vec(trips),
            text,
        }
    }

    /// Shortcut for a ticket holding a single trip.
    pub fn single(from: Station, to: Station, points: u32) -> TchuResult<Self> {
        Self::new(vec![Trip::new(from, to, points)?])
    }

    fn compute_text(trips: &[Trip]) -> String {
        let destinations: BTreeSet<String> = trips
            .iter()
            .map(|trip| format!("{} ({})", trip.to.name(), trip.points))
            .collect();
        let destinations: Vec<String> = destinations.into_iter().collect();
        let origin = trips[0].from.name();

        if destinations.len() == 1 {
            format!("{} - {}", origin, destinations[0])
        } else {
            format!("{} - {{{}}}", origin, destinations.join(", "))
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// The best outcome among the trips: positive if any trip is connected, otherwise the
    /// smallest penalty.
    pub fn points(&self, connectivity: &impl StationConnectivity) -> i32 {
        self.trips
            .iter()
            .map(|trip| trip.points_for(connectivity))
            .max()
            .unwrap_or_default()
    }
}

impl PartialEq for Ticket {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Ticket {}

impl PartialOrd for Ticket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ticket {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl Hash for Ticket {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Tickets are shown to observers by their text only.
impl Serialize for Ticket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    const BERNE: Station = Station::new(3, "Berne");
    const LAUSANNE: Station = Station::new(13, "Lausanne");
    const ZURICH: Station = Station::new(33, "Zürich");
    const DE1: Station = Station::new(34, "Allemagne");
    const DE2: Station = Station::new(35, "Allemagne");
    const AT1: Station = Station::new(39, "Autriche");
    const FR1: Station = Station::new(47, "France");

    /// Connects exactly the listed pairs of station ids (plus each station to itself).
    struct Connected(Vec<(usize, usize)>);

    impl StationConnectivity for Connected {
        fn connected(&self, first: &Station, second: &Station) -> bool {
            first == second
                || self.0.iter().any(|(a, b)| {
                    (*a, *b) == (first.id(), second.id()) || (*b, *a) == (first.id(), second.id())
                })
        }
    }

    // Tests for `Trip`.

    #[test]
    fn trip_requires_points() {
        assert!(Trip::new(BERNE, ZURICH, 0).is_err());
    }

    #[test]
    fn trip_all_pairs() {
        let trips = Trip::all(&[DE1, DE2], &[AT1, FR1], 5).unwrap();

        assert_eq!(trips.len(), 4);
        assert!(trips.iter().all(|trip| trip.points() == 5));
        assert!(Trip::all(&[], &[AT1], 5).is_err());
    }

    #[test]
    fn trip_points() {
        let trip = Trip::new(BERNE, ZURICH, 6).unwrap();

        assert_eq!(trip.points_for(&Connected(vec![(3, 33)])), 6);
        assert_eq!(trip.points_for(&Connected(vec![])), -6);
    }

    // Tests for `Ticket`.

    #[test]
    fn ticket_needs_trips() {
        assert!(Ticket::new(vec![]).is_err());
    }

    #[test]
    fn ticket_trips_share_origin_name() {
        let trips = vec![
            Trip::new(DE1, AT1, 5).unwrap(),
            Trip::new(DE2, FR1, 5).unwrap(),
        ];
        assert!(Ticket::new(trips).is_ok());

        let trips = vec![
            Trip::new(BERNE, ZURICH, 6).unwrap(),
            Trip::new(LAUSANNE, ZURICH, 7).unwrap(),
        ];
        assert!(Ticket::new(trips).is_err());
    }

    #[test]
    fn single_trip_text() {
        assert_eq!(
            Ticket::single(BERNE, ZURICH, 6).unwrap().to_string(),
            "Berne - Zürich (6)"
        );
    }

    #[test]
    fn multiple_trips_text() {
        let mut trips = Trip::all(&[DE1, DE2], &[FR1], 5).unwrap();
        trips.extend(Trip::all(&[DE1, DE2], &[AT1], 5).unwrap());

        assert_eq!(
            Ticket::new(trips).unwrap().text(),
            "Allemagne - {Autriche (5), France (5)}"
        );
    }

    #[test]
    fn ticket_points_best_trip() {
        let ticket = Ticket::new(vec![
            Trip::new(BERNE, ZURICH, 6).unwrap(),
            Trip::new(BERNE, LAUSANNE, 4).unwrap(),
        ])
        .unwrap();

        assert_eq!(ticket.points(&Connected(vec![(3, 33)])), 6);
        assert_eq!(ticket.points(&Connected(vec![(3, 13)])), 4);
        assert_eq!(ticket.points(&Connected(vec![])), -4);
    }

    #[test]
    fn tickets_ordered_by_text() {
        let lausanne = Ticket::single(LAUSANNE, ZURICH, 8).unwrap();
        let berne = Ticket::single(BERNE, ZURICH, 6).unwrap();

        assert!(berne < lausanne);
        assert_eq!(berne, Ticket::single(BERNE, ZURICH, 6).unwrap());
    }

    #[test]
    fn ticket_to_json() -> serde_json::Result<()> {
        assert_eq!(
            serde_json::to_string(&Ticket::single(BERNE, ZURICH, 6).unwrap())?,
            r#""Berne - Zürich (6)""#
        );
        Ok(())
    }
}
