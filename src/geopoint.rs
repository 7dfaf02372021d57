// src/geopoint.rs

use std::fmt;
use std::ops::{Add, Sub};

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GeoError;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Represents a geographical point, expressed as latitude (-90 to 90) and
/// longitude (-180 to 180) in degrees.
///
/// A `GeoPoint` can only be obtained through validation, so both coordinates are
/// always in range. Adding or subtracting points clamps the latitude at the poles
/// and wraps the longitude across the antimeridian.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Creates a new `GeoPoint` from any numeric latitude and longitude.
    ///
    /// # Errors
    /// Returns `GeoError::InvalidValue` if latitude is not within [-90, 90] or
    /// longitude is not within [-180, 180]. Latitude is checked first.
    pub fn new(latitude: impl Into<f64>, longitude: impl Into<f64>) -> Result<Self, GeoError> {
        let latitude = latitude.into();
        let longitude = longitude.into();

        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(GeoError::InvalidValue(format!(
                "invalid latitude value: expected [-90.0, 90.0]: got: {:.2}",
                latitude
            )));
        }
        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(GeoError::InvalidValue(format!(
                "invalid longitude value: expected [-180.0, 180.0], got: {:.2}",
                longitude
            )));
        }

        Ok(GeoPoint {
            latitude,
            longitude,
        })
    }

    /// Creates a `GeoPoint` from dynamic JSON data.
    ///
    /// Accepts either `{"latitude": <number>, "longitude": <number>}` or a
    /// two-element array `[<latitude>, <longitude>]`.
    ///
    /// # Errors
    /// `GeoError::InvalidType` if the value has neither shape or a coordinate is not a
    /// number, `GeoError::InvalidValue` if a coordinate is out of range.
    pub fn from_value(value: &Value) -> Result<Self, GeoError> {
        Self::from_value_for(value, "point")
    }

    /// Same as [`GeoPoint::from_value`], naming `context` in the error when the value
    /// is not point-shaped at all.
    pub(crate) fn from_value_for(value: &Value, context: &str) -> Result<Self, GeoError> {
        let (latitude, longitude) = match value {
            Value::Object(map) => (map.get("latitude"), map.get("longitude")),
            Value::Array(items) if items.len() == 2 => (items.first(), items.get(1)),
            other => return Err(GeoError::invalid_type(context, "GeoPoint", Some(other))),
        };

        let latitude = latitude
            .and_then(Value::as_f64)
            .ok_or_else(|| GeoError::invalid_type("latitude", "number", latitude))?;
        let longitude = longitude
            .and_then(Value::as_f64)
            .ok_or_else(|| GeoError::invalid_type("longitude", "number", longitude))?;

        GeoPoint::new(latitude, longitude)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Adds a point supplied as dynamic JSON data.
    ///
    /// # Errors
    /// `GeoError::InvalidType` if `other` is not a point.
    pub fn add_value(&self, other: &Value) -> Result<GeoPoint, GeoError> {
        let other = GeoPoint::from_value_for(other, "add")?;
        Ok(*self + other)
    }

    /// Subtracts a point supplied as dynamic JSON data.
    ///
    /// # Errors
    /// `GeoError::InvalidType` if `other` is not a point.
    pub fn sub_value(&self, other: &Value) -> Result<GeoPoint, GeoError> {
        let other = GeoPoint::from_value_for(other, "subtract")?;
        Ok(*self - other)
    }

    // Both inputs come from sums of in-range coordinates, so the result is always
    // in range and needs no further validation.
    fn from_raw(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint {
            latitude: clamp_latitude(latitude),
            longitude: wrap_longitude(longitude),
        }
    }
}

/// Latitude never wraps; anything past a pole is pinned to the pole.
fn clamp_latitude(latitude: f64) -> f64 {
    if latitude > MAX_LATITUDE || latitude < MIN_LATITUDE {
        log::trace!("Clamping latitude {} to the pole", latitude);
    }
    latitude.clamp(MIN_LATITUDE, MAX_LATITUDE)
}

/// Single-revolution wrap of a longitude sum or difference.
///
/// Only correct for inputs in (-540, 540). Sums of two valid longitudes lie in
/// [-360, 360], so one correction is always enough. Not a modulo:
/// a raw value of exactly ±180 is kept as is.
fn wrap_longitude(longitude: f64) -> f64 {
    if longitude > MAX_LONGITUDE {
        log::trace!("Wrapping longitude {} across the antimeridian", longitude);
        -180.0 + (longitude - 180.0)
    } else if longitude < MIN_LONGITUDE {
        log::trace!("Wrapping longitude {} across the antimeridian", longitude);
        180.0 + (longitude + 180.0)
    } else {
        longitude
    }
}

impl Add for GeoPoint {
    type Output = GeoPoint;

    fn add(self, other: GeoPoint) -> GeoPoint {
        GeoPoint::from_raw(
            self.latitude + other.latitude,
            self.longitude + other.longitude,
        )
    }
}

impl<'a> Add<&'a GeoPoint> for &'a GeoPoint {
    type Output = GeoPoint;

    fn add(self, other: &'a GeoPoint) -> GeoPoint {
        *self + *other
    }
}

impl Sub for GeoPoint {
    type Output = GeoPoint;

    fn sub(self, other: GeoPoint) -> GeoPoint {
        GeoPoint::from_raw(
            self.latitude - other.latitude,
            self.longitude - other.longitude,
        )
    }
}

impl<'a> Sub<&'a GeoPoint> for &'a GeoPoint {
    type Output = GeoPoint;

    fn sub(self, other: &'a GeoPoint) -> GeoPoint {
        *self - *other
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.latitude, self.longitude)
    }
}

impl TryFrom<&Value> for GeoPoint {
    type Error = GeoError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        GeoPoint::from_value(value)
    }
}

impl TryFrom<Value> for GeoPoint {
    type Error = GeoError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        GeoPoint::from_value(&value)
    }
}

// Both the sequence and the map form go through `GeoPoint::new`, so decoded
// points obey the same ranges as constructed ones.
impl<'de> Deserialize<'de> for GeoPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(field_identifier, rename_all = "lowercase")]
        enum Field {
            Latitude,
            Longitude,
            #[serde(other)]
            Other,
        }

        struct GeoPointVisitor;

        impl<'de> Visitor<'de> for GeoPointVisitor {
            type Value = GeoPoint;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("struct GeoPoint")
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<GeoPoint, V::Error>
            where
                V: SeqAccess<'de>,
            {
                let latitude: f64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let longitude: f64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                GeoPoint::new(latitude, longitude).map_err(de::Error::custom)
            }

            fn visit_map<V>(self, mut map: V) -> Result<GeoPoint, V::Error>
            where
                V: MapAccess<'de>,
            {
                let mut latitude: Option<f64> = None;
                let mut longitude: Option<f64> = None;
                while let Some(key) = map.next_key()? {
                    match key {
                        Field::Latitude => {
                            if latitude.is_some() {
                                return Err(de::Error::duplicate_field("latitude"));
                            }
                            latitude = Some(map.next_value()?);
                        }
                        Field::Longitude => {
                            if longitude.is_some() {
                                return Err(de::Error::duplicate_field("longitude"));
                            }
                            longitude = Some(map.next_value()?);
                        }
                        Field::Other => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                let latitude = latitude.ok_or_else(|| de::Error::missing_field("latitude"))?;
                let longitude = longitude.ok_or_else(|| de::Error::missing_field("longitude"))?;
                GeoPoint::new(latitude, longitude).map_err(de::Error::custom)
            }
        }

        const FIELDS: &[&str] = &["latitude", "longitude"];
        deserializer.deserialize_struct("GeoPoint", FIELDS, GeoPointVisitor)
    }
}
