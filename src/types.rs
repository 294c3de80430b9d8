use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::MhubError;

/// A physical source port on the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Input {
    #[serde(rename = "1")]
    I1,
    #[serde(rename = "2")]
    I2,
    #[serde(rename = "3")]
    I3,
    #[serde(rename = "4")]
    I4,
    #[serde(rename = "5")]
    I5,
    #[serde(rename = "6")]
    I6,
    #[serde(rename = "7")]
    I7,
    #[serde(rename = "8")]
    I8,
}

impl Input {
    /// Wire token for this input, as used in switch URLs and JSON payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Input::I1 => "1",
            Input::I2 => "2",
            Input::I3 => "3",
            Input::I4 => "4",
            Input::I5 => "5",
            Input::I6 => "6",
            Input::I7 => "7",
            Input::I8 => "8",
        }
    }
}

impl Input {
    /// Parse a wire token, e.g. from a command line
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "1" => Some(Input::I1),
            "2" => Some(Input::I2),
            "3" => Some(Input::I3),
            "4" => Some(Input::I4),
            "5" => Some(Input::I5),
            "6" => Some(Input::I6),
            "7" => Some(Input::I7),
            "8" => Some(Input::I8),
            _ => None,
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A physical destination port on the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Output {
    /// Wire token for this output, as used in switch URLs and JSON payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Output::A => "a",
            Output::B => "b",
            Output::C => "c",
            Output::D => "d",
            Output::E => "e",
            Output::F => "f",
            Output::G => "g",
            Output::H => "h",
        }
    }
}

impl Output {
    /// Parse a wire token, e.g. from a command line
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "a" => Some(Output::A),
            "b" => Some(Output::B),
            "c" => Some(Output::C),
            "d" => Some(Output::D),
            "e" => Some(Output::E),
            "f" => Some(Output::F),
            "g" => Some(Output::G),
            "h" => Some(Output::H),
            _ => None,
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The assignment of inputs to outputs currently active on the device.
///
/// One entry per configured output; outputs absent from the map are
/// unknown/unset. A fresh table is produced on every status query and
/// replaces the previous one wholesale. The ordered map also fixes the
/// dispatch order for multi-output switches (ascending output).
pub type RoutingTable = BTreeMap<Output, Input>;

/// A named, predefined routing configuration a user can select.
///
/// Presets are static catalog data. Their routing need not cover every
/// output; unmentioned outputs are left alone when the preset is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    /// Stable identifier, e.g. for persisting the last selection
    pub id: String,
    /// Human-readable title for menus
    pub title: String,
    pub routing: RoutingTable,
}

impl Preset {
    pub fn new(id: impl Into<String>, title: impl Into<String>, routing: RoutingTable) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            routing,
        }
    }

    /// Exact match: the table routes exactly the preset's outputs, with the
    /// preset's inputs, and nothing else.
    pub fn matches(&self, table: &RoutingTable) -> bool {
        self.routing == *table
    }

    /// Subset match: every pair in the preset is present in the table;
    /// extra outputs routed by the table are ignored.
    pub fn is_subset_of(&self, table: &RoutingTable) -> bool {
        self.routing
            .iter()
            .all(|(output, input)| table.get(output) == Some(input))
    }
}

/// Find the preset an observed table corresponds to, for UI highlighting.
///
/// Returns the first preset (in declared order) whose routing equals the
/// table exactly, or failing that the first whose routing is a subset of
/// it. `None` means "unknown configuration", which is a valid user-visible
/// state, not an error.
pub fn match_preset<'a>(presets: &'a [Preset], table: &RoutingTable) -> Option<&'a Preset> {
    presets
        .iter()
        .find(|p| p.matches(table))
        .or_else(|| presets.iter().find(|p| p.is_subset_of(table)))
}

/// Result of a status query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSnapshot {
    /// The device answered and reported this routing
    Online(RoutingTable),
    /// The device could not be queried
    Offline,
}

impl StatusSnapshot {
    pub fn routing(&self) -> Option<&RoutingTable> {
        match self {
            StatusSnapshot::Online(table) => Some(table),
            StatusSnapshot::Offline => None,
        }
    }
}

/// Result of an orchestrated multi-output switch.
///
/// A routing change is not transactional: outputs that switched stay
/// switched even when others failed. `errors` holds every per-command
/// failure in dispatch order, plus the final status query's error if that
/// failed too. The snapshot is always attempted, even after total failure.
#[derive(Debug)]
pub struct SwitchOutcome {
    pub snapshot: StatusSnapshot,
    pub errors: Vec<MhubError>,
}

impl SwitchOutcome {
    /// True when every command and the confirming status query succeeded
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && matches!(self.snapshot, StatusSnapshot::Online(_))
    }
}
