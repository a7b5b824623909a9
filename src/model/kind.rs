//! Classification registry for annotation kinds.
//!
//! Every drawn line carries exactly one [`ClassificationKind`]. The registry
//! is a total mapping from kind to display name and color: adding a kind
//! means adding an enum variant, and the compiler keeps the mapping total.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The interpretation assigned to a digitized line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationKind {
    /// Transition between compacted snow (firn) and glacier ice.
    FirnIceInterface,
    /// Upper surface of water-saturated firn.
    WaterTable,
    /// Open fracture reaching down from the surface.
    Crevasse,
    /// Diffraction hyperbola from a point reflector.
    Hyperbola,
    /// Glacier bed, thermal regime not determined.
    BedUnspecified,
    /// Glacier bed below cold ice.
    BedCold,
    /// Stretch where the bed return is lost.
    BedMissing,
    /// Internal reflection marking temperate ice.
    TemperateIce,
}

impl ClassificationKind {
    /// All registered kinds, in the order they are presented for selection.
    pub fn all() -> &'static [ClassificationKind] {
        &[
            ClassificationKind::FirnIceInterface,
            ClassificationKind::WaterTable,
            ClassificationKind::Crevasse,
            ClassificationKind::Hyperbola,
            ClassificationKind::BedUnspecified,
            ClassificationKind::BedCold,
            ClassificationKind::BedMissing,
            ClassificationKind::TemperateIce,
        ]
    }

    /// Stable wire identifier for this kind.
    pub fn key(&self) -> &'static str {
        match self {
            ClassificationKind::FirnIceInterface => "firn_ice_interface",
            ClassificationKind::WaterTable => "water_table",
            ClassificationKind::Crevasse => "crevasse",
            ClassificationKind::Hyperbola => "hyperbola",
            ClassificationKind::BedUnspecified => "bed_unspecified",
            ClassificationKind::BedCold => "bed_cold",
            ClassificationKind::BedMissing => "bed_missing",
            ClassificationKind::TemperateIce => "temperate_ice",
        }
    }

    /// Human-readable name shown in the UI and written to documents.
    pub fn display_name(&self) -> &'static str {
        match self {
            ClassificationKind::FirnIceInterface => "Firn-ice interface",
            ClassificationKind::WaterTable => "Water table",
            ClassificationKind::Crevasse => "Crevasse",
            ClassificationKind::Hyperbola => "Hyperbola",
            ClassificationKind::BedUnspecified => "Glacier bed",
            ClassificationKind::BedCold => "Cold glacier bed",
            ClassificationKind::BedMissing => "Glacier bed missing",
            ClassificationKind::TemperateIce => "Temperate ice",
        }
    }

    /// Hex color used to render lines of this kind.
    pub fn color(&self) -> &'static str {
        match self {
            ClassificationKind::FirnIceInterface => "#00a2ff",
            ClassificationKind::WaterTable => "#1ec8c8",
            ClassificationKind::Crevasse => "#ff8c00",
            ClassificationKind::Hyperbola => "#ffd500",
            ClassificationKind::BedUnspecified => "#d62728",
            ClassificationKind::BedCold => "#4363d8",
            ClassificationKind::BedMissing => "#911eb4",
            ClassificationKind::TemperateIce => "#3cb44b",
        }
    }

    /// Look up a kind by its wire identifier.
    pub fn from_key(key: &str) -> Result<Self, UnknownKindError> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.key() == key)
            .ok_or_else(|| UnknownKindError {
                key: key.to_string(),
            })
    }

    /// Resolve a kind from a display name.
    ///
    /// Documents written before the `kind` property existed carry only the
    /// display name, so this accepts every current display name. The names
    /// are matched verbatim; anything unrecognized is `None`.
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.display_name() == name)
    }
}

/// A classification key that does not resolve against the registry.
#[derive(Debug, Error)]
#[error("unknown classification kind '{key}'")]
pub struct UnknownKindError {
    /// The key that failed to resolve.
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_total() {
        for kind in ClassificationKind::all() {
            assert!(!kind.display_name().is_empty());
            assert!(kind.color().starts_with('#'));
            assert_eq!(ClassificationKind::from_key(kind.key()).unwrap(), *kind);
        }
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = ClassificationKind::from_key("moulin").unwrap_err();
        assert_eq!(err.key, "moulin");
    }

    #[test]
    fn test_legacy_name_lookup() {
        assert_eq!(
            ClassificationKind::from_display_name("Glacier bed"),
            Some(ClassificationKind::BedUnspecified)
        );
        assert_eq!(
            ClassificationKind::from_display_name("Cold glacier bed"),
            Some(ClassificationKind::BedCold)
        );
        assert_eq!(
            ClassificationKind::from_display_name("Glacier bed missing"),
            Some(ClassificationKind::BedMissing)
        );
        assert_eq!(
            ClassificationKind::from_display_name("Temperate ice"),
            Some(ClassificationKind::TemperateIce)
        );
        assert_eq!(ClassificationKind::from_display_name("Moulin"), None);
    }

    #[test]
    fn test_wire_key_serialization() {
        let json = serde_json::to_string(&ClassificationKind::FirnIceInterface).unwrap();
        assert_eq!(json, "\"firn_ice_interface\"");

        let kind: ClassificationKind = serde_json::from_str("\"water_table\"").unwrap();
        assert_eq!(kind, ClassificationKind::WaterTable);
    }
}
