//! Scalar and 2D vector value types matching the document's number and
//! `[x, y]` array shapes.
//!
//! Game assets write numeric fields in whichever form the author typed
//! (`2` or `2.0`, `[0, 0]` or `[0.0, 0.0]`). Values loaded from a document
//! remember that exact representation so saving echoes it back unchanged;
//! editor-constructed values serialize in decimal form.

use serde_json::{json, Number, Value};

/// Floating-point document value that remembers how the document wrote it.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonNumber(Number);

impl JsonNumber {
    /// Editor-supplied value; serializes in decimal form.
    /// Non-finite values cannot be represented in JSON and collapse to 0.
    pub fn new(value: f64) -> Self {
        JsonNumber(Number::from_f64(value).unwrap_or_else(|| Number::from(0)))
    }

    /// Value as `f64`.
    pub fn get(&self) -> f64 {
        self.0.as_f64().unwrap_or(0.0)
    }

    pub(crate) fn from_json(value: &Value) -> Option<Self> {
        value.as_number().cloned().map(JsonNumber)
    }

    pub(crate) fn to_json(&self) -> Value {
        Value::Number(self.0.clone())
    }
}

/// 2D floating-point vector (`imagePosition`, `lightPosition`).
///
/// Carries the source components when parsed from a document, so
/// integer-written coordinates round-trip without picking up a decimal
/// point. Equality compares the numeric value only.
#[derive(Debug, Clone, Default)]
pub struct Vec2F {
    x: f64,
    y: f64,
    raw: Option<[Number; 2]>,
}

impl Vec2F {
    /// Origin vector.
    pub const ZERO: Vec2F = Vec2F { x: 0.0, y: 0.0, raw: None };

    /// Build from components.
    pub fn new(x: f64, y: f64) -> Self {
        Vec2F { x, y, raw: None }
    }

    /// Horizontal component, in asset pixels.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical component, in asset pixels.
    pub fn y(&self) -> f64 {
        self.y
    }

    pub(crate) fn from_json(value: &Value) -> Option<Self> {
        let arr = value.as_array()?;
        if arr.len() != 2 {
            return None;
        }
        let rx = arr[0].as_number()?.clone();
        let ry = arr[1].as_number()?.clone();
        Some(Vec2F {
            x: rx.as_f64()?,
            y: ry.as_f64()?,
            raw: Some([rx, ry]),
        })
    }

    pub(crate) fn to_json(&self) -> Value {
        match &self.raw {
            Some([x, y]) => json!([x.clone(), y.clone()]),
            None => json!([self.x, self.y]),
        }
    }
}

impl PartialEq for Vec2F {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// 2D integer vector (tile spaces, anchor coordinates, frame grids).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec2I {
    /// Horizontal component, in tiles or frame cells.
    pub x: i32,
    /// Vertical component, in tiles or frame cells.
    pub y: i32,
}

impl Vec2I {
    /// Build from components.
    pub fn new(x: i32, y: i32) -> Self {
        Vec2I { x, y }
    }

    pub(crate) fn from_json(value: &Value) -> Option<Self> {
        let arr = value.as_array()?;
        if arr.len() != 2 {
            return None;
        }
        Some(Vec2I {
            x: i32::try_from(arr[0].as_i64()?).ok()?,
            y: i32::try_from(arr[1].as_i64()?).ok()?,
        })
    }

    pub(crate) fn to_json(self) -> Value {
        json!([self.x, self.y])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_arity_and_shape() {
        assert_eq!(Vec2F::from_json(&json!([1.5, 2.0])), Some(Vec2F::new(1.5, 2.0)));
        assert_eq!(Vec2F::from_json(&json!([1.5])), None);
        assert_eq!(Vec2F::from_json(&json!("nope")), None);

        assert_eq!(Vec2I::from_json(&json!([3, -4])), Some(Vec2I::new(3, -4)));
        assert_eq!(Vec2I::from_json(&json!([3.5, 0])), None);
        assert_eq!(Vec2I::from_json(&json!([1, 2, 3])), None);
    }

    #[test]
    fn parsed_vectors_echo_the_source_form() {
        let ints = json!([0, 0]);
        let parsed = Vec2F::from_json(&ints).expect("parse");
        assert_eq!(parsed, Vec2F::ZERO);
        assert_eq!(parsed.to_json(), ints);

        let floats = json!([0.0, 0.0]);
        let parsed = Vec2F::from_json(&floats).expect("parse");
        assert_eq!(parsed.to_json(), floats);

        // Editor-built vectors serialize in decimal form.
        assert_eq!(Vec2F::new(0.0, 0.0).to_json(), json!([0.0, 0.0]));
    }

    #[test]
    fn numbers_echo_the_source_form() {
        let int = json!(2);
        let parsed = JsonNumber::from_json(&int).expect("parse");
        assert_eq!(parsed.get(), 2.0);
        assert_eq!(parsed.to_json(), int);

        let float = json!(0.5);
        let parsed = JsonNumber::from_json(&float).expect("parse");
        assert_eq!(parsed.to_json(), float);

        assert_eq!(JsonNumber::new(90.0).to_json(), json!(90.0));
        assert_eq!(JsonNumber::from_json(&json!("fast")), None);
    }
}
