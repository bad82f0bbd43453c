use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Flat property record of one district or precinct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureProperties(Map<String, Value>);

impl FeatureProperties {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn insert<V: Into<Value>>(&mut self, key: &str, value: V) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric value of `key`, or 0 when the field is missing or not a number.
    pub fn number(&self, key: &str) -> f64 {
        self.get(key).map(coerce_number).unwrap_or(0.0)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    /// Precinct number; datasets store it either as a number or a string.
    /// Empty, zero, false and null values mean the record is not a precinct.
    pub fn uik_num(&self) -> Option<String> {
        match self.get("uik_num")? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => match n.as_f64() {
                Some(f) if f == 0.0 || f.is_nan() => None,
                Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", f as i64)),
                _ => Some(n.to_string()),
            },
            other => Some(other.to_string()),
        }
    }

    /// `name`, else `УИК №<uik_num>`, else a generic label.
    pub fn title(&self) -> String {
        if let Some(name) = self.name() {
            return name.to_string();
        }
        match self.uik_num() {
            Some(num) => format!("УИК №{}", num),
            None => "Участок".to_string(),
        }
    }

    pub fn granularity(&self) -> Granularity {
        if self.uik_num().is_some() {
            Granularity::Precinct
        } else {
            Granularity::District
        }
    }
}

impl From<Map<String, Value>> for FeatureProperties {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Value> for FeatureProperties {
    /// Non-object values produce an empty record.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::new(),
        }
    }
}

/// Loose numeric coercion: numbers as-is, numeric strings parsed, anything else 0.
pub fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Resolution of a geographic unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    District,
    Precinct,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::District => write!(f, "district"),
            Granularity::Precinct => write!(f, "precinct"),
        }
    }
}

/// GeoJSON feature. Geometry is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub properties: FeatureProperties,
    #[serde(default)]
    pub geometry: Value,
}

impl Feature {
    pub fn new(properties: FeatureProperties) -> Self {
        Self {
            id: None,
            properties,
            geometry: Value::Null,
        }
    }

    pub fn title(&self) -> String {
        self.properties.title()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
