//! Loosely-typed request bodies, as clients send them.

use crate::chart::types::ChartRequest;
use crate::error::InputError;
use crate::ephemeris::GeoLocation;
use crate::gazetteer::find_city;
use crate::houses::HouseSystem;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

/// A chart request before validation.
///
/// Two shapes are accepted:
/// - `{ date, longitude, latitude }` with an RFC 3339 `date`
/// - `{ date: "YYYY-MM-DD", time: "HH:MM", city }`, UTC, resolved through the gazetteer
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartQuery {
    pub date: Option<String>,
    pub time: Option<String>,
    pub city: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub orb: Option<f64>,
    pub house_system: Option<String>,
}

impl ChartQuery {
    pub fn into_request(self) -> Result<ChartRequest, InputError> {
        let date = self.date.as_deref().ok_or(InputError::MissingField("date"))?;

        let timestamp = match self.time.as_deref() {
            Some(time) => parse_date_time(date, time)?,
            None => parse_timestamp(date)?,
        };

        let location = match self.city.as_deref() {
            Some(name) => {
                if self.time.is_none() {
                    return Err(InputError::MissingField("time"));
                }
                let city = find_city(name).ok_or_else(|| InputError::UnknownCity(name.to_string()))?;
                GeoLocation::new(city.lat, city.lon)
            }
            None => {
                let longitude = self.longitude.ok_or(InputError::MissingField("longitude"))?;
                let latitude = self.latitude.ok_or(InputError::MissingField("latitude"))?;
                GeoLocation::new(latitude, longitude)
            }
        };

        let house_system = self
            .house_system
            .as_deref()
            .map(|s| {
                s.parse::<HouseSystem>().map_err(|e| InputError::InvalidField {
                    field: "houseSystem",
                    message: e.to_string(),
                })
            })
            .transpose()?;

        Ok(ChartRequest {
            timestamp,
            location,
            house_system,
            orb: self.orb,
        })
    }
}

fn parse_timestamp(date: &str) -> Result<DateTime<Utc>, InputError> {
    DateTime::parse_from_rfc3339(date.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| InputError::InvalidField {
            field: "date",
            message: format!("expected an RFC 3339 timestamp, got {:?}: {}", date, e),
        })
}

fn parse_date_time(date: &str, time: &str) -> Result<DateTime<Utc>, InputError> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| InputError::InvalidField {
        field: "date",
        message: format!("expected YYYY-MM-DD, got {:?}: {}", date, e),
    })?;
    let clock = NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|e| InputError::InvalidField {
        field: "time",
        message: format!("expected HH:MM, got {:?}: {}", time, e),
    })?;
    Ok(day.and_time(clock).and_utc())
}
