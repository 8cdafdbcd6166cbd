//! Observed values, representation types and modification flags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single traced value, as delivered by the trace reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    IntArray(Vec<i64>),
    StrArray(Vec<String>),
    Null,
}

impl Value {
    /// Integer payload for int and hashcode slots.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Number of elements for array values.
    pub fn array_len(&self) -> Option<usize> {
        match self {
            Self::IntArray(v) => Some(v.len()),
            Self::StrArray(v) => Some(v.len()),
            _ => None,
        }
    }

    /// Element at `index` of an array value.
    pub fn element(&self, index: usize) -> Option<Value> {
        match self {
            Self::IntArray(v) => v.get(index).map(|e| Value::Int(*e)),
            Self::StrArray(v) => v.get(index).map(|e| Value::Str(e.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::IntArray(v) => {
                let parts: Vec<String> = v.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::StrArray(v) => {
                let parts: Vec<String> = v.iter().map(|e| format!("\"{e}\"")).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::Null => f.write_str("null"),
        }
    }
}

/// Representation type of a variable slot: how its values are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepType {
    Int,
    Float,
    Hashcode,
    String,
    IntArray,
    StringArray,
}

impl RepType {
    pub fn is_array(self) -> bool {
        matches!(self, Self::IntArray | Self::StringArray)
    }

    /// Element representation of an array type.
    pub fn element_type(self) -> Option<RepType> {
        match self {
            Self::IntArray => Some(Self::Int),
            Self::StringArray => Some(Self::String),
            _ => None,
        }
    }

    /// Coerce a raw trace value into this representation.
    /// Returns `None` when the value cannot be represented.
    pub fn coerce(self, value: &Value) -> Option<Value> {
        match (self, value) {
            (Self::Int, Value::Int(_)) => Some(value.clone()),
            (Self::Int, Value::Str(s)) => s.trim().parse::<i64>().ok().map(Value::Int),
            (Self::Float, Value::Float(_)) => Some(value.clone()),
            (Self::Float, Value::Int(v)) => Some(Value::Float(*v as f64)),
            (Self::Float, Value::Str(s)) => s.trim().parse::<f64>().ok().map(Value::Float),
            (Self::Hashcode, Value::Int(_)) => Some(value.clone()),
            (Self::Hashcode, Value::Null) => Some(Value::Int(0)),
            (Self::String, Value::Str(_)) => Some(value.clone()),
            (Self::IntArray, Value::IntArray(_)) => Some(value.clone()),
            (Self::StringArray, Value::StrArray(_)) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "double",
            Self::Hashcode => "hashcode",
            Self::String => "java.lang.String",
            Self::IntArray => "int[]",
            Self::StringArray => "java.lang.String[]",
        }
    }
}

impl fmt::Display for RepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a value changed since the previous sample at the same point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModBit {
    Unmodified,
    Modified,
    Missing,
}

impl ModBit {
    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Combine the flags of the inputs of a derived value.
    pub fn combine(self, other: ModBit) -> ModBit {
        match (self, other) {
            (Self::Missing, _) | (_, Self::Missing) => Self::Missing,
            (Self::Unmodified, Self::Unmodified) => Self::Unmodified,
            _ => Self::Modified,
        }
    }
}

/// One execution sample at a program point: a value and flag for every
/// non-constant declared variable, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueObservation {
    pub values: Vec<(Value, ModBit)>,
    /// How many identical samples this observation stands for.
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

impl ValueObservation {
    pub fn new(values: Vec<(Value, ModBit)>, count: u32) -> Self {
        Self { values, count }
    }

    /// An observation where every value is flagged modified.
    pub fn modified(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            values: values.into_iter().map(|v| (v, ModBit::Modified)).collect(),
            count: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
