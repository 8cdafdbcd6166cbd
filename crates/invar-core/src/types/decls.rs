//! Declarations: the program points and variable schemas read before any
//! trace data.

use serde::{Deserialize, Serialize};

use super::value::{RepType, Value};

/// Declared types that are not object references.
const PRIMITIVE_TYPES: &[&str] = &[
    "int", "long", "short", "byte", "char", "double", "float", "boolean",
    "java.lang.String",
];

/// Formatting class of a slot, derived from its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    Boolean,
    /// Object or array reference: only identity is observable.
    Hashcode,
    Plain,
}

/// One declared variable of a program point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    pub name: String,
    /// Source-language type, possibly followed by auxiliary text.
    pub declared_type: String,
    pub rep_type: RepType,
    /// Comparability tag; only slots with equal tags are related.
    #[serde(default)]
    pub comparability: String,
    /// Statically known value. Such variables occupy no tuple slot.
    #[serde(default)]
    pub static_constant: Option<Value>,
}

impl VarDecl {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, rep_type: RepType) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            rep_type,
            comparability: String::new(),
            static_constant: None,
        }
    }

    pub fn with_comparability(mut self, tag: impl Into<String>) -> Self {
        self.comparability = tag.into();
        self
    }

    pub fn with_constant(mut self, value: Value) -> Self {
        self.static_constant = Some(value);
        self
    }

    /// Declared type without auxiliary information.
    pub fn type_name(&self) -> &str {
        self.declared_type
            .split_whitespace()
            .next()
            .unwrap_or_default()
    }

    pub fn is_static_constant(&self) -> bool {
        self.static_constant.is_some()
    }

    pub fn kind(&self) -> SlotKind {
        let type_name = self.type_name();
        if type_name == "boolean" {
            SlotKind::Boolean
        } else if self.rep_type == RepType::Hashcode || !PRIMITIVE_TYPES.contains(&type_name) {
            SlotKind::Hashcode
        } else {
            SlotKind::Plain
        }
    }
}

/// One declared program point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDecl {
    pub name: String,
    pub vars: Vec<VarDecl>,
}

impl PointDecl {
    pub fn new(name: impl Into<String>, vars: Vec<VarDecl>) -> Self {
        Self {
            name: name.into(),
            vars,
        }
    }

    /// Number of values a trace tuple for this point carries.
    pub fn tuple_arity(&self) -> usize {
        self.vars.iter().filter(|v| !v.is_static_constant()).count()
    }
}
