use std::fmt;
use std::str::FromStr;

/// One of the two independent gallery halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pane {
    Source,
    Destination,
}

impl Pane {
    pub const ALL: [Pane; 2] = [Pane::Source, Pane::Destination];

    pub fn index(self) -> usize {
        match self {
            Self::Source => 0,
            Self::Destination => 1,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Source => "Source",
            Self::Destination => "Destination",
        }
    }
}

impl fmt::Display for Pane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

impl FromStr for Pane {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "source" | "left" => Ok(Self::Source),
            "destination" | "right" => Ok(Self::Destination),
            other => Err(format!("unknown pane: {other}")),
        }
    }
}

/// A value kept once per pane, indexed by [`Pane`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerPane<T> {
    source: T,
    destination: T,
}

impl<T> PerPane<T> {
    pub fn new(source: T, destination: T) -> Self {
        Self {
            source,
            destination,
        }
    }

    pub fn get(&self, pane: Pane) -> &T {
        match pane {
            Pane::Source => &self.source,
            Pane::Destination => &self.destination,
        }
    }

    pub fn get_mut(&mut self, pane: Pane) -> &mut T {
        match pane {
            Pane::Source => &mut self.source,
            Pane::Destination => &mut self.destination,
        }
    }
}

impl<T: Clone> PerPane<T> {
    pub fn splat(value: T) -> Self {
        Self::new(value.clone(), value)
    }
}
