use crate::aspects::DEFAULT_ORB;
use crate::bodies::Body;
use crate::houses::{HouseSystem, DEFAULT_ANGLE_EPSILON};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest orb that keeps the Sextile/Square/Trine windows apart.
pub const MAX_ORB: f64 = 15.0;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("orb must be between 0 and {max} degrees, got {orb}")]
    OrbOutOfRange { orb: f64, max: f64 },
    #[error("angle_epsilon must be a positive number of degrees, got {0}")]
    InvalidEpsilon(f64),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse chart settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Engine configuration, read from the `[chart]` table of a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub house_system: HouseSystem,
    /// Orb tolerance in degrees, shared by every aspect kind
    pub orb: f64,
    /// Append Lilith (mean apogee) to the 13 standard bodies
    pub include_lilith: bool,
    /// Swiss Ephemeris data directory; `SWISS_EPHEMERIS_PATH` applies when unset
    pub ephemeris_path: Option<PathBuf>,
    /// Allowed disagreement between the provider's Asc/MC and cusps 1/10
    pub angle_epsilon: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::Placidus,
            orb: DEFAULT_ORB,
            include_lilith: false,
            ephemeris_path: None,
            angle_epsilon: DEFAULT_ANGLE_EPSILON,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    chart: ChartSettings,
}

impl ChartSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_orb(self.orb)?;
        if !(self.angle_epsilon.is_finite() && self.angle_epsilon > 0.0) {
            return Err(SettingsError::InvalidEpsilon(self.angle_epsilon));
        }
        Ok(())
    }

    /// Parse the `[chart]` table of a TOML document; other tables are ignored.
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let file: SettingsFile = toml::from_str(text)?;
        file.chart.validate()?;
        Ok(file.chart)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn bodies(&self) -> Vec<Body> {
        Body::chart_set(self.include_lilith)
    }
}

/// Orb policy: finite and within [0, MAX_ORB].
pub fn validate_orb(orb: f64) -> Result<f64, SettingsError> {
    if orb.is_finite() && (0.0..=MAX_ORB).contains(&orb) {
        Ok(orb)
    } else {
        Err(SettingsError::OrbOutOfRange { orb, max: MAX_ORB })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = ChartSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.house_system, HouseSystem::Placidus);
        assert_eq!(settings.orb, 8.0);
        assert_eq!(settings.bodies().len(), 13);
    }

    #[test]
    fn parses_chart_table_and_ignores_others() {
        let text = r#"
            [server]
            bind = "0.0.0.0:3000"

            [chart]
            house_system = "whole_sign"
            orb = 6.5
            include_lilith = true
        "#;
        let settings = ChartSettings::from_toml_str(text).unwrap();
        assert_eq!(settings.house_system, HouseSystem::WholeSign);
        assert_eq!(settings.orb, 6.5);
        assert_eq!(settings.bodies().len(), 14);
        assert_eq!(settings.angle_epsilon, DEFAULT_ANGLE_EPSILON);
    }

    #[test]
    fn missing_chart_table_means_defaults() {
        assert_eq!(ChartSettings::from_toml_str("").unwrap(), ChartSettings::default());
    }

    #[test]
    fn rejects_overlapping_orb() {
        let err = ChartSettings::from_toml_str("[chart]\norb = 20.0").unwrap_err();
        assert!(matches!(err, SettingsError::OrbOutOfRange { .. }));
        assert!(validate_orb(-1.0).is_err());
        assert!(validate_orb(f64::NAN).is_err());
    }

    #[test]
    fn house_system_accepts_request_spellings() {
        let settings = ChartSettings::from_toml_str("[chart]\nhouse_system = \"Placidus\"").unwrap();
        assert_eq!(settings.house_system, HouseSystem::Placidus);
        let settings = ChartSettings::from_toml_str("[chart]\nhouse_system = \"whole-sign\"").unwrap();
        assert_eq!(settings.house_system, HouseSystem::WholeSign);
    }

    #[test]
    fn rejects_unknown_house_system() {
        assert!(matches!(
            ChartSettings::from_toml_str("[chart]\nhouse_system = \"topocentric\""),
            Err(SettingsError::Parse(e)) if e.to_string().contains("topocentric")
        ));
    }
}
