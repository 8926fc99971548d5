//! Conversion to and from `serde_json::Value`.
//!
//! Values with no JSON form are dropped from objects and become `null` inside
//! arrays. Dates become their millisecond timestamp (`null` when invalid), and
//! a cycle is an error.

use serde_json::{Map, Number, Value as Json};

use crate::collections::ArrayRef;
use crate::error::ValueError;
use crate::identity::Identity;
use crate::object::ObjectRef;
use crate::value::Value;

/// Largest integer a `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Value {
    /// Builds a fresh value graph from JSON. Objects become records.
    pub fn from_json(json: &Json) -> Value {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::from(s.as_str()),
            Json::Array(arr) => {
                Value::Array(ArrayRef::from_vec(arr.iter().map(Value::from_json).collect()))
            }
            Json::Object(obj) => {
                let record = ObjectRef::record();
                for (key, val) in obj {
                    record.set(key, Value::from_json(val));
                }
                Value::Object(record)
            }
        }
    }

    /// Serializes to JSON. `Ok(None)` when the value itself has no JSON form
    /// (`undefined` or a function).
    pub fn to_json(&self) -> Result<Option<Json>, ValueError> {
        let mut stack = Vec::new();
        to_json(self, &mut stack)
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        Value::from_json(&json)
    }
}

impl From<&Json> for Value {
    fn from(json: &Json) -> Self {
        Value::from_json(json)
    }
}

fn number(n: f64) -> Json {
    if !n.is_finite() {
        return Json::Null;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Json::Number(Number::from(n as i64));
    }
    Number::from_f64(n).map_or(Json::Null, Json::Number)
}

fn to_json(value: &Value, stack: &mut Vec<Identity>) -> Result<Option<Json>, ValueError> {
    let json = match value {
        Value::Undefined | Value::Function(_) => return Ok(None),
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Number(n) => number(*n),
        Value::String(s) => Json::String(s.to_string()),
        Value::Date(d) => number(d.time()),
        Value::RegExp(_) | Value::Map(_) | Value::Set(_) => Json::Object(Map::new()),
        Value::Array(arr) => {
            enter(arr.identity(), stack)?;
            let mut out = Vec::with_capacity(arr.len());
            for item in arr.snapshot()? {
                out.push(to_json(&item, stack)?.unwrap_or(Json::Null));
            }
            stack.pop();
            Json::Array(out)
        }
        Value::Object(obj) => {
            enter(obj.identity(), stack)?;
            let mut out = Map::new();
            for (key, descriptor) in obj.descriptors()? {
                if !descriptor.enumerable {
                    continue;
                }
                if let Some(json) = to_json(&obj.try_get(&key)?, stack)? {
                    out.insert(key, json);
                }
            }
            stack.pop();
            Json::Object(out)
        }
    };
    Ok(Some(json))
}

fn enter(id: Identity, stack: &mut Vec<Identity>) -> Result<(), ValueError> {
    if stack.contains(&id) {
        return Err(ValueError::Cyclic);
    }
    stack.push(id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip_plain_json() {
        let doc = json!({"a": [1, 2.5, "x", null, true], "b": {"c": {}}});
        let value = Value::from(&doc);
        assert_eq!(value.to_json().unwrap(), Some(doc));
    }

    #[test]
    fn test_integers_stay_integers() {
        assert_eq!(Value::from(3.0).to_json().unwrap(), Some(json!(3)));
    }

    #[test]
    fn test_non_finite_numbers_become_null() {
        assert_eq!(Value::from(f64::NAN).to_json().unwrap(), Some(json!(null)));
        assert_eq!(Value::from(f64::INFINITY).to_json().unwrap(), Some(json!(null)));
    }

    #[test]
    fn test_undefined_dropped_from_objects_nulled_in_arrays() {
        let rec = Value::record([("a", Value::Undefined), ("b", Value::from(1))]);
        assert_eq!(rec.to_json().unwrap(), Some(json!({"b": 1})));

        let arr = Value::array([Value::Undefined, Value::from(1)]);
        assert_eq!(arr.to_json().unwrap(), Some(json!([null, 1])));

        assert_eq!(Value::Undefined.to_json().unwrap(), None);
    }

    #[test]
    fn test_dates_and_containers() {
        assert_eq!(Value::date(1500.0).to_json().unwrap(), Some(json!(1500)));
        assert_eq!(Value::set([1, 2]).to_json().unwrap(), Some(json!({})));
        assert_eq!(Value::regexp("a", "g").unwrap().to_json().unwrap(), Some(json!({})));
    }

    #[test]
    fn test_cycle_is_an_error() {
        let obj = ObjectRef::record();
        obj.set("self", obj.clone());
        assert!(matches!(Value::from(obj).to_json(), Err(ValueError::Cyclic)));
    }

    #[test]
    fn test_shared_reference_is_not_a_cycle() {
        let shared = Value::record([("v", 1)]);
        let root = Value::record([("a", shared.clone()), ("b", shared)]);
        assert_eq!(
            root.to_json().unwrap(),
            Some(json!({"a": {"v": 1}, "b": {"v": 1}}))
        );
    }
}
