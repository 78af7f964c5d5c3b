use serde::Serialize;
use std::fmt;

/// A station of the map. Identity is by `id`, which is unique and dense (`0..map::stations().len()`).
///
/// # JSON
/// Stations are serialized as an object holding their id and name.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Station {
    id: u8,
    name: &'static str,
}

impl Station {
    pub const fn new(id: u8, name: &'static str) -> Self {
        Self { id, name }
    }

    #[inline]
    pub fn id(&self) -> usize {
        self.id as usize
    }

    /// Border stations of the same country share their name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Anything able to tell whether two stations are connected.
pub trait StationConnectivity {
    fn connected(&self, first: &Station, second: &Station) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_to_string() {
        assert_eq!(Station::new(3, "Berne").to_string(), "Berne");
    }

    #[test]
    fn station_to_json() -> serde_json::Result<()> {
        assert_eq!(
            serde_json::to_string(&Station::new(33, "Zürich"))?,
            r#"{"id":33,"name":"Zürich"}"#
        );
        Ok(())
    }
}
