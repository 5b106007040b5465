use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::SpatialPoint;
use crate::error::{GeopolarError, InputError, Result};
use crate::math::Dimensions;

/// Labeled coordinate structure: `{ "x": .., "y": .. }` with an optional `z`.
///
/// A missing `z` denotes a planar point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateMap {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

/// The input shapes a point can be built from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PointInput {
    /// Comma-delimited literal, e.g. `"1, 2, 3"`.
    Text(String),
    /// Ordered numeric sequence.
    Sequence(Vec<f64>),
    /// Labeled structure.
    Map(CoordinateMap),
}

impl TryFrom<&Value> for PointInput {
    type Error = InputError;

    fn try_from(value: &Value) -> std::result::Result<Self, Self::Error> {
        let shape = shape_name(value);
        let input = PointInput::deserialize(value)
            .map_err(|_| InputError::UnsupportedInputType(shape.into()))?;
        tracing::debug!(shape, "classified point input");
        Ok(input)
    }
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl SpatialPoint {
    /// Parses a literal of the form `"x, y"` or `"x, y, z"`.
    ///
    /// Whitespace around each comma-separated field is ignored. Infinite and
    /// NaN values are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidLiteral`] if the literal does not hold
    /// exactly two or three decimal numbers.
    pub fn from_str_literal(literal: &str) -> Result<Self> {
        let invalid = |reason: String| {
            tracing::debug!(literal, %reason, "rejected coordinate literal");
            InputError::InvalidLiteral {
                literal: literal.to_owned(),
                reason,
            }
        };

        let fields: Vec<&str> = literal.split(',').map(str::trim).collect();
        if !(2..=3).contains(&fields.len()) {
            return Err(invalid(format!(
                "expected 2 or 3 coordinates, found {}",
                fields.len()
            ))
            .into());
        }

        let coords = fields
            .iter()
            .map(|field| match field.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                Ok(_) => Err(invalid(format!("{field:?} is not a finite number"))),
                Err(e) => Err(invalid(format!("{field:?}: {e}"))),
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self::from_array(&coords))
    }

    /// Builds a point from an ordered sequence.
    ///
    /// Three or more values give a 3D point from the first three; shorter
    /// sequences give a planar point with missing values set to zero.
    #[must_use]
    pub fn from_array(values: &[f64]) -> Self {
        match values {
            [x, y, z, ..] => Self::new(*x, *y, *z),
            _ => {
                let at = |i: usize| values.get(i).copied().unwrap_or(0.0);
                Self::planar(at(0), at(1))
            }
        }
    }

    /// Builds a point from a labeled structure. `z` is used only if present.
    #[must_use]
    pub fn from_object(map: &CoordinateMap) -> Self {
        match map.z {
            Some(z) => Self::new(map.x, map.y, z),
            None => Self::planar(map.x, map.y),
        }
    }

    /// Builds a point from whichever input shape was supplied.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidLiteral`] if a text input fails to parse.
    pub fn from_input(input: PointInput) -> Result<Self> {
        match input {
            PointInput::Text(text) => Self::from_str_literal(&text),
            PointInput::Sequence(values) => Ok(Self::from_array(&values)),
            PointInput::Map(map) => Ok(Self::from_object(&map)),
        }
    }

    /// Builds a point from untyped JSON data.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnsupportedInputType`] if the value is neither a
    /// string, a numeric array, nor an object with `x` and `y`, and
    /// [`InputError::InvalidLiteral`] if a string fails to parse.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_input(PointInput::try_from(value)?)
    }

    /// Returns the coordinates as a labeled structure.
    ///
    /// `dimensions` defaults to the point's own dimensionality.
    #[must_use]
    pub fn to_object(&self, dimensions: Option<Dimensions>) -> CoordinateMap {
        let c = self.cartesian();
        let z = match dimensions.unwrap_or(self.dimensions) {
            Dimensions::Two => None,
            Dimensions::Three => Some(c.z),
        };
        CoordinateMap { x: c.x, y: c.y, z }
    }
}

impl FromStr for SpatialPoint {
    type Err = GeopolarError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_literal(s)
    }
}

impl Serialize for SpatialPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_object(None).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SpatialPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        CoordinateMap::deserialize(deserializer).map(|map| Self::from_object(&map))
    }
}
