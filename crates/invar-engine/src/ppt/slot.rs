//! Variable slots of a program point.

use invar_core::types::{RepType, SlotKind, Value, VarDecl};

use crate::derive::Derivation;

/// One variable of a program point, declared or derived.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSlot {
    /// Position in the point's slot list.
    pub index: usize,
    pub name: String,
    pub declared_type: String,
    pub rep_type: RepType,
    pub kind: SlotKind,
    pub comparability: String,
    /// Position in incoming tuples; `None` for static constants and derived
    /// slots.
    pub value_index: Option<usize>,
    pub static_constant: Option<Value>,
    pub derivation: Option<Derivation>,
    /// Excluded by the variable omit pattern: carried in tuples, never
    /// related by candidates.
    pub omitted: bool,
}

impl VariableSlot {
    pub fn from_decl(index: usize, decl: &VarDecl, value_index: Option<usize>, omitted: bool) -> Self {
        Self {
            index,
            name: decl.name.clone(),
            declared_type: decl.declared_type.clone(),
            rep_type: decl.rep_type,
            kind: decl.kind(),
            comparability: decl.comparability.clone(),
            value_index,
            static_constant: decl.static_constant.clone(),
            derivation: None,
            omitted,
        }
    }

    pub fn derived(
        index: usize,
        name: String,
        rep_type: RepType,
        kind: SlotKind,
        comparability: &str,
        derivation: Derivation,
    ) -> Self {
        Self {
            index,
            name,
            declared_type: rep_type.name().to_string(),
            rep_type,
            kind,
            comparability: comparability.to_string(),
            value_index: None,
            static_constant: None,
            derivation: Some(derivation),
            omitted: false,
        }
    }

    pub fn is_static_constant(&self) -> bool {
        self.static_constant.is_some()
    }

    pub fn is_derived(&self) -> bool {
        self.derivation.is_some()
    }

    /// A non-boolean, non-reference integer.
    pub fn is_plain_int(&self) -> bool {
        self.rep_type == RepType::Int && self.kind == SlotKind::Plain
    }

    /// Whether candidates may relate this slot to `other`.
    pub fn comparable_with(&self, other: &VariableSlot, ignore_comparability: bool) -> bool {
        ignore_comparability || self.comparability == other.comparability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decl() {
        let decl = VarDecl::new("flag", "boolean", RepType::Int).with_comparability("3");
        let slot = VariableSlot::from_decl(4, &decl, Some(2), false);
        assert_eq!(slot.kind, SlotKind::Boolean);
        assert_eq!(slot.value_index, Some(2));
        assert!(!slot.is_plain_int());
        assert!(!slot.is_derived());
    }

    #[test]
    fn test_comparability() {
        let a = VariableSlot::from_decl(0, &VarDecl::new("x", "int", RepType::Int).with_comparability("1"), Some(0), false);
        let b = VariableSlot::from_decl(1, &VarDecl::new("y", "int", RepType::Int).with_comparability("2"), Some(1), false);
        assert!(!a.comparable_with(&b, false));
        assert!(a.comparable_with(&b, true));
    }
}
