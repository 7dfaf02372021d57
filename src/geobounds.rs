// src/geobounds.rs

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GeoError;
use crate::geopoint::GeoPoint;

/// Represents the bounds of a geographic area, defined by a southwest corner and
/// a northeast corner.
///
/// When the southwest longitude is greater than the northeast longitude the area
/// spans the antimeridian and covers `[southwest, 180]` plus `[-180, northeast]`.
/// Containment is strictly interior: points on any edge are outside.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    southwest: GeoPoint,
    northeast: GeoPoint,
    #[serde(skip_serializing)]
    crosses_antimeridian: bool,
}

impl GeoBounds {
    /// Creates new bounds from two corner points.
    ///
    /// # Errors
    /// `GeoError::InvalidValue` if the southwest latitude is not strictly below the
    /// northeast latitude, or if both corners share a longitude.
    pub fn new(southwest: GeoPoint, northeast: GeoPoint) -> Result<Self, GeoError> {
        if southwest.latitude() >= northeast.latitude() {
            return Err(GeoError::InvalidValue(format!(
                "invalid latitude bounds: south coord: {} must be less than north coord: {}",
                southwest, northeast
            )));
        }
        if southwest.longitude() == northeast.longitude() {
            return Err(GeoError::InvalidValue(format!(
                "invalid longitude bounds: west coord: {} must not be equal to east coord: {}",
                southwest, northeast
            )));
        }

        let crosses_antimeridian = southwest.longitude() > northeast.longitude();
        if crosses_antimeridian {
            log::debug!(
                "Bounds {} - {} cross the antimeridian",
                southwest,
                northeast
            );
        }

        Ok(GeoBounds {
            southwest,
            northeast,
            crosses_antimeridian,
        })
    }

    /// Creates bounds from two corners supplied as dynamic JSON data.
    ///
    /// # Errors
    /// `GeoError::InvalidType` if either corner is not a point (southwest is checked
    /// first), otherwise the same errors as [`GeoBounds::new`].
    pub fn from_values(southwest: &Value, northeast: &Value) -> Result<Self, GeoError> {
        let southwest = GeoPoint::from_value_for(southwest, "SW point")?;
        let northeast = GeoPoint::from_value_for(northeast, "NE point")?;
        GeoBounds::new(southwest, northeast)
    }

    /// Creates bounds from `{"southwest": <point>, "northeast": <point>}`.
    pub fn from_value(value: &Value) -> Result<Self, GeoError> {
        let map = value
            .as_object()
            .ok_or_else(|| GeoError::invalid_type("bounds", "GeoBounds", Some(value)))?;

        let southwest = map
            .get("southwest")
            .ok_or_else(|| GeoError::invalid_type("SW point", "GeoPoint", None))?;
        let northeast = map
            .get("northeast")
            .ok_or_else(|| GeoError::invalid_type("NE point", "GeoPoint", None))?;

        GeoBounds::from_values(southwest, northeast)
    }

    pub fn southwest(&self) -> GeoPoint {
        self.southwest
    }

    pub fn northeast(&self) -> GeoPoint {
        self.northeast
    }

    /// Whether the area spans the ±180° longitude line. Fixed at construction.
    pub fn crosses_antimeridian(&self) -> bool {
        self.crosses_antimeridian
    }

    /// Checks whether `point` lies strictly inside these bounds.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        let sw = &self.southwest;
        let ne = &self.northeast;

        if self.crosses_antimeridian {
            let mut contained = true;
            if point.latitude() <= sw.latitude() || point.latitude() >= ne.latitude() {
                contained = false;
            }
            // the gap between the two fragments, edges included
            if point.longitude() >= ne.longitude() && point.longitude() <= sw.longitude() {
                contained = false;
            }
            contained
        } else {
            point.latitude() > sw.latitude()
                && point.latitude() < ne.latitude()
                && point.longitude() > sw.longitude()
                && point.longitude() < ne.longitude()
        }
    }

    /// Checks containment of a point supplied as dynamic JSON data.
    ///
    /// # Errors
    /// `GeoError::InvalidType` if `point` is not a point.
    pub fn contains_value(&self, point: &Value) -> Result<bool, GeoError> {
        let point = GeoPoint::from_value_for(point, "point")?;
        Ok(self.contains(&point))
    }
}

impl fmt::Display for GeoBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.southwest, self.northeast)
    }
}

impl TryFrom<&Value> for GeoBounds {
    type Error = GeoError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        GeoBounds::from_value(value)
    }
}

impl TryFrom<Value> for GeoBounds {
    type Error = GeoError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        GeoBounds::from_value(&value)
    }
}

// The antimeridian flag is never read from the input; `GeoBounds::new` recomputes it.
impl<'de> Deserialize<'de> for GeoBounds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(field_identifier, rename_all = "lowercase")]
        enum Field {
            Southwest,
            Northeast,
            #[serde(other)]
            Other,
        }

        struct GeoBoundsVisitor;

        impl<'de> Visitor<'de> for GeoBoundsVisitor {
            type Value = GeoBounds;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("struct GeoBounds")
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<GeoBounds, V::Error>
            where
                V: SeqAccess<'de>,
            {
                let southwest: GeoPoint = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let northeast: GeoPoint = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                GeoBounds::new(southwest, northeast).map_err(de::Error::custom)
            }

            fn visit_map<V>(self, mut map: V) -> Result<GeoBounds, V::Error>
            where
                V: MapAccess<'de>,
            {
                let mut southwest: Option<GeoPoint> = None;
                let mut northeast: Option<GeoPoint> = None;
                while let Some(key) = map.next_key()? {
                    match key {
                        Field::Southwest => {
                            if southwest.is_some() {
                                return Err(de::Error::duplicate_field("southwest"));
                            }
                            southwest = Some(map.next_value()?);
                        }
                        Field::Northeast => {
                            if northeast.is_some() {
                                return Err(de::Error::duplicate_field("northeast"));
                            }
                            northeast = Some(map.next_value()?);
                        }
                        Field::Other => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                let southwest = southwest.ok_or_else(|| de::Error::missing_field("southwest"))?;
                let northeast = northeast.ok_or_else(|| de::Error::missing_field("northeast"))?;
                GeoBounds::new(southwest, northeast).map_err(de::Error::custom)
            }
        }

        const FIELDS: &[&str] = &["southwest", "northeast"];
        deserializer.deserialize_struct("GeoBounds", FIELDS, GeoBoundsVisitor)
    }
}
