use crate::route::Route;
use crate::station::Station;

use serde::Serialize;
use std::fmt;

/// A walk through claimed routes, where stations may repeat but routes may not.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Trail {
    routes: Vec<Route>,
    /// Stations in walking order. Holds one more station than `routes`, unless the trail is empty.
    stations: Vec<Station>,
    length: u32,
}

impl Trail {
    /// One of the longest trails that can be walked through `routes`.
    ///
    /// Every route seeds two trails, one per direction. Each round extends every trail by one unused
    /// route leaving its last station, until no trail can grow any further.
    ///
    /// # Example
    /// ```
    /// use tchu::map;
    /// use tchu::trail::Trail;
    ///
    /// let routes = [map::route("LAU_NEU_1").unwrap(), map::route("BER_NEU_1").unwrap()];
    /// assert_eq!(Trail::longest(&routes).length(), 6);
    /// assert_eq!(Trail::longest(&[]).length(), 0);
    /// ```
    pub fn longest(routes: &[Route]) -> Trail {
        let mut frontier: Vec<Trail> = routes
            .iter()
            .flat_map(|route| {
                [
                    Trail::of_route(*route, route.station_1(), route.station_2()),
                    Trail::of_route(*route, route.station_2(), route.station_1()),
                ]
            })
            .collect();
        let mut longest = Trail::default();

        while !frontier.is_empty() {
            let mut extended = Vec::new();

            for trail in frontier {
                for route in routes {
                    if let Some(next) = trail.extended_with(route) {
                        extended.push(next);
                    }
                }

                if trail.length > longest.length {
                    longest = trail;
                }
            }

            frontier = extended;
        }

        longest
    }

    fn of_route(route: Route, from: Station, to: Station) -> Trail {
        Trail {
            routes: vec![route],
            stations: vec![from, to],
            length: route.length() as u32,
        }
    }

    /// This trail followed by `route`, if `route` is unused and leaves the last station.
    fn extended_with(&self, route: &Route) -> Option<Trail> {
        let last = *self.stations.last()?;
        if self.routes.iter().any(|used| used.id() == route.id()) {
            return None;
        }
        let next = route.station_opposite(&last).ok()?;

        let mut trail = self.clone();
        trail.routes.push(*route);
        trail.stations.push(next);
        trail.length += route.length() as u32;
        Some(trail)
    }

    #[inline]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// First station of the trail, `None` if it is empty.
    pub fn station_1(&self) -> Option<Station> {
        self.stations.first().copied()
    }

    /// Last station of the trail, `None` if it is empty.
    pub fn station_2(&self) -> Option<Station> {
        self.stations.last().copied()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.stations.iter().map(Station::name).collect();
        write!(f, "{} ({})", names.join(" - "), self.length)
    }
}
