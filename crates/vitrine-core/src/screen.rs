use serde::{Deserialize, Serialize};

/// Identifier for one screen in the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenId {
    Clock,
    Weather,
    Transit,
}

impl ScreenId {
    /// Parse a screen name as written in the config file.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "clock" => Some(Self::Clock),
            "weather" => Some(Self::Weather),
            "transit" | "bus" => Some(Self::Transit),
            _ => None,
        }
    }

    /// Whether this screen is backed by a refresh agent.
    pub fn is_data_backed(self) -> bool {
        matches!(self, Self::Weather | Self::Transit)
    }
}

impl std::fmt::Display for ScreenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Clock => "clock",
            Self::Weather => "weather",
            Self::Transit => "transit",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_names() {
        assert_eq!(ScreenId::parse("clock"), Some(ScreenId::Clock));
        assert_eq!(ScreenId::parse("Weather"), Some(ScreenId::Weather));
        assert_eq!(ScreenId::parse(" transit "), Some(ScreenId::Transit));
        assert_eq!(ScreenId::parse("bus"), Some(ScreenId::Transit));
    }

    #[test]
    fn parse_unknown_name() {
        assert_eq!(ScreenId::parse("news"), None);
    }

    #[test]
    fn data_backed_screens() {
        assert!(!ScreenId::Clock.is_data_backed());
        assert!(ScreenId::Weather.is_data_backed());
        assert!(ScreenId::Transit.is_data_backed());
    }
}
