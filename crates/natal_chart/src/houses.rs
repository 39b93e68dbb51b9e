//! House cusps and the four chart angles.
//!
//! Cusps are labelled in rotational order from the Ascendant. The angles are
//! the cusps at indices 0, 3, 6 and 9 under a second name; they are never
//! computed on their own.

use crate::angle::{angular_distance, ensure_finite, normalize};
use crate::ephemeris::RawHouses;
use crate::zodiac::{sign_of, Sign};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default tolerance between the provider's direct angles and their cusps.
pub const DEFAULT_ANGLE_EPSILON: f64 = 1e-6;

/// Mean obliquity of the ecliptic in degrees, close enough for the polar cutoff.
pub const MEAN_OBLIQUITY: f64 = 23.44;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HouseError {
    #[error("{angle} from provider ({direct}) disagrees with cusp {cusp_number} ({cusp}) by more than {epsilon}")]
    AngleMismatch {
        angle: HouseLabel,
        direct: f64,
        cusp_number: u8,
        cusp: f64,
        epsilon: f64,
    },
    #[error("cusp {number} is not a finite longitude: {value}")]
    MalformedCusp { number: u8, value: f64 },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
}

/// Serialized in snake_case; deserialized through [`FromStr`], so config
/// files accept the same spellings as requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    Equal,
    WholeSign,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Porphyry,
    Morinus,
}

/// House system mapping
const HOUSE_SYSTEMS: &[(&str, HouseSystem)] = &[
    ("placidus", HouseSystem::Placidus),
    ("koch", HouseSystem::Koch),
    ("equal", HouseSystem::Equal),
    ("whole_sign", HouseSystem::WholeSign),
    ("regiomontanus", HouseSystem::Regiomontanus),
    ("campanus", HouseSystem::Campanus),
    ("alcabitius", HouseSystem::Alcabitius),
    ("porphyry", HouseSystem::Porphyry),
    ("morinus", HouseSystem::Morinus),
];

impl HouseSystem {
    pub fn name(self) -> &'static str {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, s)| *s == self)
            .map(|(name, _)| *name)
            .unwrap_or("placidus")
    }

    /// House system byte understood by Swiss Ephemeris.
    pub const fn swiss_code(self) -> u8 {
        match self {
            Self::Placidus => b'P',
            Self::Koch => b'K',
            Self::Equal => b'E',
            Self::WholeSign => b'W',
            Self::Regiomontanus => b'R',
            Self::Campanus => b'C',
            Self::Alcabitius => b'B',
            Self::Porphyry => b'O',
            Self::Morinus => b'M',
        }
    }

    /// Whether the first and tenth cusps are the Ascendant and MC.
    pub const fn is_quadrant(self) -> bool {
        matches!(
            self,
            Self::Placidus
                | Self::Koch
                | Self::Regiomontanus
                | Self::Campanus
                | Self::Alcabitius
                | Self::Porphyry
        )
    }

    /// Whether cusps exist for this system at `latitude`.
    ///
    /// Placidus and Koch divide semi-arcs that vanish inside the polar
    /// circles, so they have no cusps once `|latitude| >= 90 - obliquity`.
    pub fn available_at(self, latitude: f64, obliquity: f64) -> bool {
        match self {
            Self::Placidus | Self::Koch => latitude.abs() < 90.0 - obliquity,
            _ => true,
        }
    }
}

impl FromStr for HouseSystem {
    type Err = HouseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        HOUSE_SYSTEMS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, system)| *system)
            .ok_or_else(|| HouseError::InvalidHouseSystem {
                system: s.to_string(),
                valid: HOUSE_SYSTEMS.iter().map(|(name, _)| name.to_string()).collect(),
            })
    }
}

impl TryFrom<String> for HouseSystem {
    type Error = HouseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HouseLabel {
    Asc,
    II,
    III,
    IC,
    V,
    VI,
    Desc,
    VIII,
    IX,
    MC,
    XI,
    XII,
}

pub const HOUSE_LABELS: [HouseLabel; 12] = [
    HouseLabel::Asc,
    HouseLabel::II,
    HouseLabel::III,
    HouseLabel::IC,
    HouseLabel::V,
    HouseLabel::VI,
    HouseLabel::Desc,
    HouseLabel::VIII,
    HouseLabel::IX,
    HouseLabel::MC,
    HouseLabel::XI,
    HouseLabel::XII,
];

const ASC_INDEX: usize = 0;
const IC_INDEX: usize = 3;
const DESC_INDEX: usize = 6;
const MC_INDEX: usize = 9;

impl HouseLabel {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Asc => "Asc",
            Self::II => "II",
            Self::III => "III",
            Self::IC => "IC",
            Self::V => "V",
            Self::VI => "VI",
            Self::Desc => "Desc",
            Self::VIII => "VIII",
            Self::IX => "IX",
            Self::MC => "MC",
            Self::XI => "XI",
            Self::XII => "XII",
        }
    }
}

impl fmt::Display for HouseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    pub name: HouseLabel,
    /// 1-based house number
    pub number: u8,
    pub longitude: f64,
    pub sign: Sign,
}

/// The four angles, copies of cusps 1, 4, 7 and 10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Angles {
    pub ascendant: HouseCusp,
    #[serde(rename = "imumCoeli")]
    pub imum_coeli: HouseCusp,
    pub descendant: HouseCusp,
    pub midheaven: HouseCusp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Houses {
    pub system: HouseSystem,
    pub houses: Vec<HouseCusp>,
    pub angles: Angles,
}

impl Houses {
    pub fn cusp(&self, label: HouseLabel) -> &HouseCusp {
        &self.houses[label as usize]
    }
}

/// Label raw provider cusps and derive the angles.
///
/// `Ok(None)` means the provider had no houses for this place. For quadrant
/// systems the provider's own Ascendant and MC must match cusps 1 and 10
/// within `epsilon`; a disagreement is an error, never patched over.
pub fn derive_houses(
    raw: Option<&RawHouses>,
    system: HouseSystem,
    epsilon: f64,
) -> Result<Option<Houses>, HouseError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let mut houses = Vec::with_capacity(12);
    for (i, (&value, &name)) in raw.cusps.iter().zip(HOUSE_LABELS.iter()).enumerate() {
        let number = i as u8 + 1;
        let value = ensure_finite("cusp", value)
            .map_err(|e| HouseError::MalformedCusp { number, value: e.value })?;
        let longitude = normalize(value);
        houses.push(HouseCusp {
            name,
            number,
            longitude,
            sign: sign_of(longitude),
        });
    }

    if system.is_quadrant() {
        check_angle(HouseLabel::Asc, raw.ascendant, &houses[ASC_INDEX], epsilon)?;
        check_angle(HouseLabel::MC, raw.mc, &houses[MC_INDEX], epsilon)?;
    }

    let angles = Angles {
        ascendant: houses[ASC_INDEX].clone(),
        imum_coeli: houses[IC_INDEX].clone(),
        descendant: houses[DESC_INDEX].clone(),
        midheaven: houses[MC_INDEX].clone(),
    };

    Ok(Some(Houses {
        system,
        houses,
        angles,
    }))
}

fn check_angle(angle: HouseLabel, direct: f64, cusp: &HouseCusp, epsilon: f64) -> Result<(), HouseError> {
    if !direct.is_finite() || angular_distance(direct, cusp.longitude) > epsilon {
        return Err(HouseError::AngleMismatch {
            angle,
            direct,
            cusp_number: cusp.number,
            cusp: cusp.longitude,
            epsilon,
        });
    }
    Ok(())
}
