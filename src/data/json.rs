// JSON conversion for dynamic values
// Author: Gabriel Demetrios Lafis

use serde_json::{Map, Value as JsonValue};

use super::{Row, Value};

impl From<&JsonValue> for Value {
    fn from(json: &JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Boolean(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => Value::String(s.clone()),
            JsonValue::Array(arr) => Value::Array(arr.iter().map(Value::from).collect()),
            JsonValue::Object(obj) => Value::Map(Row::from(obj)),
        }
    }
}

impl From<&Map<String, JsonValue>> for Row {
    fn from(obj: &Map<String, JsonValue>) -> Self {
        let mut row = Row::new();
        for (key, value) in obj {
            row.insert(key.clone(), Value::from(value));
        }
        row
    }
}

impl Row {
    /// Build a row from any JSON value; non-objects yield an empty row
    pub fn from_json(json: &JsonValue) -> Self {
        json.as_object().map(Row::from).unwrap_or_default()
    }

    /// Convert the row back to a JSON object
    pub fn to_json(&self) -> JsonValue {
        let mut obj = Map::new();
        for (key, value) in self.iter() {
            obj.insert(key.to_string(), value.to_json());
        }
        JsonValue::Object(obj)
    }
}

impl Value {
    /// Convert the value back to JSON; non-finite floats become null
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Boolean(b) => JsonValue::Bool(*b),
            Value::Integer(i) => JsonValue::Number((*i).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Array(values) => JsonValue::Array(values.iter().map(Value::to_json).collect()),
            Value::Map(row) => row.to_json(),
        }
    }
}
