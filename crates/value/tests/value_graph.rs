use serde_json::json;
use structural_value::{
    ArrayRef, Class, FunctionRef, Key, MapRef, ObjectRef, PropertyDescriptor, SetRef, Tag, Value,
    ValueError,
};

#[test]
fn map_keys_use_same_value_zero() {
    let map = MapRef::new();
    map.insert(f64::NAN, "nan");
    map.insert(-0.0, "zero");
    assert_eq!(map.get(&Value::from(f64::NAN)).unwrap().as_str(), Some("nan"));
    assert_eq!(map.get(&Value::from(0.0)).unwrap().as_str(), Some("zero"));
    assert_eq!(map.len(), 2);
}

#[test]
fn composite_map_keys_are_identities() {
    let key = Value::record([("id", 1)]);
    let look_alike = Value::record([("id", 1)]);
    let map = MapRef::new();
    map.insert(key.clone(), 1);
    assert!(map.contains_key(&key));
    assert!(!map.contains_key(&look_alike));
}

#[test]
fn set_of_composites_keeps_distinct_equal_looking_members() {
    let set = SetRef::new();
    set.insert(Value::array([1]));
    set.insert(Value::array([1]));
    assert_eq!(set.len(), 2);
}

#[test]
fn key_round_trips_its_value() {
    let arr = ArrayRef::new();
    let key = Key::new(arr.clone());
    assert!(Value::same(key.value(), &Value::from(arr)));
}

#[test]
fn records_from_json_are_plain() {
    let value = Value::from(json!({"a": {"b": [1, 2]}}));
    assert_eq!(value.tag(), Tag::Record);
    let inner = value.as_object().unwrap().get("a");
    assert_eq!(inner.tag(), Tag::Record);
    assert_eq!(inner.as_object().unwrap().get("b").tag(), Tag::Array);
}

#[test]
fn to_json_reads_accessors_and_skips_hidden_properties() {
    let obj = ObjectRef::with_class(Class::new("User"));
    obj.define("name", PropertyDescriptor::data("ada"));
    obj.define("secret", PropertyDescriptor::data("x").enumerable(false));
    let getter = FunctionRef::new("upper", |this, _| match this {
        Value::Object(o) => Value::from(o.get("name").as_str().unwrap_or("").to_uppercase()),
        _ => Value::Undefined,
    });
    obj.define("shout", PropertyDescriptor::accessor(Some(getter), None));
    obj.define("callback", PropertyDescriptor::data(FunctionRef::new("cb", |_, _| Value::Null)));

    assert_eq!(
        Value::from(obj).to_json().unwrap(),
        Some(json!({"name": "ada", "shout": "ADA"}))
    );
}

#[test]
fn cycle_through_array_is_rejected() {
    let arr = ArrayRef::new();
    let rec = Value::record([("list", arr.clone())]);
    arr.push(rec.clone());
    assert!(matches!(rec.to_json(), Err(ValueError::Cyclic)));
}

#[test]
fn invalid_regex_reports_pattern() {
    let err = Value::regexp("[", "").unwrap_err();
    assert!(err.to_string().contains("/[/"));
}
