//! Quality presets for the Ghostscript `-dPDFSETTINGS` argument.
//!
//! The names match Ghostscript's distiller parameter sets exactly and must
//! not be renamed: they are passed verbatim on the command line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A named quality/compression level for the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Low-resolution output, smallest files (72 dpi images)
    #[default]
    Screen,
    /// Medium-resolution output (150 dpi images)
    Ebook,
    /// High-quality prepress output (300 dpi images, color preserved)
    Prepress,
    /// Print-quality output (300 dpi images)
    Printer,
    /// Ghostscript's own defaults, largest files
    Default,
}

/// Catalog order. Significant only for default selection: the first entry
/// is what a fresh UI selects.
pub const ALL_PRESETS: [Preset; 5] = [
    Preset::Screen,
    Preset::Ebook,
    Preset::Prepress,
    Preset::Printer,
    Preset::Default,
];

impl Preset {
    /// All presets in catalog order.
    pub fn all() -> &'static [Preset] {
        &ALL_PRESETS
    }

    /// The Ghostscript parameter-set name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Screen => "screen",
            Preset::Ebook => "ebook",
            Preset::Prepress => "prepress",
            Preset::Printer => "printer",
            Preset::Default => "default",
        }
    }

    /// Pure membership check against the catalog.
    pub fn is_valid(name: &str) -> bool {
        name.parse::<Preset>().is_ok()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "screen" => Ok(Preset::Screen),
            "ebook" => Ok(Preset::Ebook),
            "prepress" => Ok(Preset::Prepress),
            "printer" => Ok(Preset::Printer),
            "default" => Ok(Preset::Default),
            other => Err(UnknownPreset(other.to_string())),
        }
    }
}

/// Error returned when a preset name is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown preset '{0}'")]
pub struct UnknownPreset(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_default() {
        let names: Vec<&str> = Preset::all().iter().map(|p| p.as_str()).collect();
        assert_eq!(names, ["screen", "ebook", "prepress", "printer", "default"]);
        assert_eq!(Preset::default(), Preset::Screen);
    }

    #[test]
    fn test_round_trip_names() {
        for preset in Preset::all() {
            assert_eq!(preset.as_str().parse::<Preset>().unwrap(), *preset);
        }
    }

    #[test]
    fn test_unknown_name_rejected() {
        assert!(!Preset::is_valid("ultra"));
        let err = "ultra".parse::<Preset>().unwrap_err();
        assert_eq!(err.to_string(), "unknown preset 'ultra'");
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Preset::Ebook).unwrap();
        assert_eq!(json, "\"ebook\"");
        let back: Preset = serde_json::from_str("\"default\"").unwrap();
        assert_eq!(back, Preset::Default);
    }
}
