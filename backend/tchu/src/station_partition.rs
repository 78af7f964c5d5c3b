use crate::station::{Station, StationConnectivity};

/// A flattened union-find over station ids: every id maps directly to the representative of its
/// connected component.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StationPartition {
    representatives: Vec<usize>,
}

impl StationPartition {
    /// Starts a partition where every station with an id below `station_count` is alone.
    pub fn builder(station_count: usize) -> Builder {
        Builder::new(station_count)
    }

    fn representative(&self, id: usize) -> Option<usize> {
        self.representatives.get(id).copied()
    }
}

impl StationConnectivity for StationPartition {
    /// Stations outside the partition are only connected to themselves.
    fn connected(&self, first: &Station, second: &Station) -> bool {
        match (
            self.representative(first.id()),
            self.representative(second.id()),
        ) {
            (Some(first), Some(second)) => first == second,
            _ => first.id() == second.id(),
        }
    }
}

/// Accumulates connections before producing a flattened `StationPartition`.
#[derive(Clone, Debug)]
pub struct Builder {
    parents: Vec<usize>,
}

impl Builder {
    pub fn new(station_count: usize) -> Self {
        Self {
            parents: (0..station_count).collect(),
        }
    }

    fn representative(&self, mut id: usize) -> usize {
        while self.parents[id] != id {
            id = self.parents[id];
        }
        id
    }

    /// Joins the components of both stations. The larger representative id wins.
    ///
    /// Stations outside the partition are ignored.
    pub fn connect(mut self, first: &Station, second: &Station) -> Self {
        if first.id() >= self.parents.len() || second.id() >= self.parents.len() {
            return self;
        }

        let first = self.representative(first.id());
        let second = self.representative(second.id());
        if first < second {
            self.parents[first] = second;
        } else {
            self.parents[second] = first;
        }

        self
    }

    pub fn build(self) -> StationPartition {
        let representatives = (0..self.parents.len())
            .map(|id| self.representative(id))
            .collect();

        StationPartition { representatives }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: u8) -> Station {
        Station::new(id, "Station")
    }

    #[test]
    fn every_station_connected_to_itself() {
        let partition = StationPartition::builder(5).build();

        for id in 0..5 {
            assert!(partition.connected(&station(id), &station(id)));
        }
        assert!(!partition.connected(&station(0), &station(1)));
    }

    #[test]
    fn connect_is_symmetric() {
        let partition = StationPartition::builder(5)
            .connect(&station(1), &station(3))
            .build();

        assert!(partition.connected(&station(1), &station(3)));
        assert!(partition.connected(&station(3), &station(1)));
        assert!(!partition.connected(&station(1), &station(2)));
    }

    #[test]
    fn connect_is_transitive() {
        let partition = StationPartition::builder(10)
            .connect(&station(0), &station(4))
            .connect(&station(7), &station(2))
            .connect(&station(4), &station(7))
            .connect(&station(5), &station(6))
            .build();

        for (a, b) in [(0, 2), (2, 4), (0, 7), (5, 6)] {
            assert!(partition.connected(&station(a), &station(b)));
        }
        assert!(!partition.connected(&station(0), &station(5)));
        assert!(!partition.connected(&station(6), &station(7)));
    }

    #[test]
    fn build_flattens_representatives() {
        let partition = StationPartition::builder(4)
            .connect(&station(0), &station(1))
            .connect(&station(1), &station(2))
            .connect(&station(2), &station(3))
            .build();

        assert_eq!(partition.representatives, vec![3, 3, 3, 3]);
    }

    #[test]
    fn stations_out_of_range() {
        let partition = StationPartition::builder(3)
            .connect(&station(0), &station(8))
            .build();

        assert!(partition.connected(&station(8), &station(8)));
        assert!(!partition.connected(&station(0), &station(8)));
        assert!(!partition.connected(&station(8), &station(9)));
    }
}
