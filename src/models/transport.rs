//! Transport mode model

use serde::{Deserialize, Serialize};

/// The fixed set of transport modes the schedule API understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Bus,
    Train,
    Plane,
    Suburban,
}

impl TransportMode {
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Bus,
        TransportMode::Train,
        TransportMode::Plane,
        TransportMode::Suburban,
    ];

    /// API/storage code
    pub fn code(&self) -> &'static str {
        match self {
            TransportMode::Bus => "bus",
            TransportMode::Train => "train",
            TransportMode::Plane => "plane",
            TransportMode::Suburban => "suburban",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "bus" => Some(TransportMode::Bus),
            "train" => Some(TransportMode::Train),
            "plane" => Some(TransportMode::Plane),
            "suburban" => Some(TransportMode::Suburban),
            _ => None,
        }
    }

    /// User-facing name
    pub fn name_ru(&self) -> &'static str {
        match self {
            TransportMode::Bus => "автобус",
            TransportMode::Train => "поезд",
            TransportMode::Plane => "самолёт",
            TransportMode::Suburban => "электричка",
        }
    }

    /// Inline keyboard button label
    pub fn picker_label(&self) -> &'static str {
        match self {
            TransportMode::Bus => "🚌 автобус 🚍",
            TransportMode::Train => "🚂 поезд 🚃",
            TransportMode::Plane => "🛫 самолёт 🛬",
            TransportMode::Suburban => "🚉 электричка 🚊",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for mode in TransportMode::ALL {
            assert_eq!(TransportMode::from_code(mode.code()), Some(mode));
        }
        assert_eq!(TransportMode::from_code("boat"), None);
    }
}
