//! Color policy for the map's filter modes.
//!
//! Each category has one fixed palette; values outside a palette fall back
//! to [`DEFAULT_COLOR`].

use crate::atlas::SystemRecord;

pub(in crate::app) const DEFAULT_COLOR: &str = "#808080";
pub(in crate::app) const HOME_COLOR: &str = "#FFD700";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(in crate::app) enum FilterMode {
    #[default]
    None,
    Security,
    Spectral,
    Resource,
}

impl FilterMode {
    pub(in crate::app) const ALL: [Self; 4] =
        [Self::None, Self::Security, Self::Spectral, Self::Resource];

    pub(in crate::app) fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Security => "Security status",
            Self::Spectral => "Spectral class",
            Self::Resource => "Spice",
        }
    }

    fn attribute(self, system: &SystemRecord) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Security => system.security.as_deref(),
            Self::Spectral => system.spectral_class.as_deref(),
            Self::Resource => system.spice.as_deref(),
        }
    }

    /// Palette lookup for a raw attribute value under this mode.
    pub(in crate::app) fn color_for(self, value: Option<&str>) -> &'static str {
        let Some(value) = value else {
            return DEFAULT_COLOR;
        };
        let mapped = match self {
            Self::None => None,
            Self::Security => security_color(value),
            Self::Spectral => spectral_color(value),
            Self::Resource => spice_color(value),
        };
        mapped.unwrap_or(DEFAULT_COLOR)
    }

    pub(in crate::app) fn system_color(self, system: &SystemRecord) -> &'static str {
        self.color_for(self.attribute(system))
    }
}

fn security_color(value: &str) -> Option<&'static str> {
    Some(match value {
        "Core" => "#21cb21",
        "Secure" => "#217ccb",
        "Wild" => "#a820cb",
        "Contested" => "#cb6c20",
        "Unsecure" => "#cb2020",
        _ => return None,
    })
}

fn spectral_color(value: &str) -> Option<&'static str> {
    Some(match value {
        "K" => "#ffaa00",
        "M" => "#ff0000",
        "B" => "#00aaff",
        "F" => "#ffffcc",
        "A" => "#00ffff",
        "G" => "#ffff00",
        _ => return None,
    })
}

fn spice_color(value: &str) -> Option<&'static str> {
    Some(match value {
        "Red" => "#FF0000",
        "Blue" => "#0000FF",
        "Green" => "#00FF00",
        "Yellow" => "#FFFF00",
        "Purple" => "#800080",
        "Orange" => "#FFA500",
        "Black" => "#000000",
        "White" => "#FFFFFF",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_mode_uses_its_own_palette() {
        assert_eq!(FilterMode::Security.color_for(Some("Wild")), "#a820cb");
        assert_eq!(FilterMode::Spectral.color_for(Some("K")), "#ffaa00");
        assert_eq!(FilterMode::Resource.color_for(Some("Orange")), "#FFA500");
        assert_eq!(FilterMode::Spectral.color_for(Some("Wild")), DEFAULT_COLOR);
    }

    #[test]
    fn unmapped_and_missing_values_are_gray() {
        assert_eq!(FilterMode::Security.color_for(Some("core")), DEFAULT_COLOR);
        assert_eq!(FilterMode::Resource.color_for(None), DEFAULT_COLOR);
        assert_eq!(FilterMode::None.color_for(Some("Core")), DEFAULT_COLOR);
    }

    #[test]
    fn system_color_reads_the_mode_attribute() {
        let mut system = SystemRecord::new("x", "X", [0.0, 0.0]);
        system.security = Some("Core".to_owned());
        system.spectral_class = Some("M".to_owned());

        assert_eq!(FilterMode::Security.system_color(&system), "#21cb21");
        assert_eq!(FilterMode::Spectral.system_color(&system), "#ff0000");
        assert_eq!(FilterMode::Resource.system_color(&system), DEFAULT_COLOR);
    }
}
