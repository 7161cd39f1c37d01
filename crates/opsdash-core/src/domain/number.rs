//! Serde helpers for JSON numbers held as `f64`.
//!
//! `serde_json` writes every `f64` with a fractional part (`600.0`).  The
//! dashboard document is read and hand-edited by operators, so whole numbers
//! are written as integers instead (`600`).  Deserialization is unchanged.

use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serializer};

/// Largest magnitude at which every integer is exactly representable in `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn write_number<S: Serializer>(value: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(value as i64)
    } else {
        serializer.serialize_f64(value)
    }
}

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    write_number(*value, serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer)
}

/// Same rules for a fixed three-element array.
pub mod triple {
    use super::*;

    struct Whole(f64);

    impl serde::Serialize for Whole {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            write_number(self.0, serializer)
        }
    }

    pub fn serialize<S: Serializer>(values: &[f64; 3], serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        for value in values {
            tuple.serialize_element(&Whole(*value))?;
        }
        tuple.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[f64; 3], D::Error> {
        <[f64; 3]>::deserialize(deserializer)
    }
}
