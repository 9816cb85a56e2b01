use crate::symbols::types::TypeSymbol;

/// How a value of one type can become another.
///
/// No pair of distinct built-in types converts implicitly.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Conversion {
    Identity,
    /// Only allowed through the `int(x)`, `bool(x)` and `string(x)` call forms.
    Explicit,
    None,
}

impl Conversion {
    pub fn classify(from: TypeSymbol, to: TypeSymbol) -> Conversion {
        if from == to {
            return Conversion::Identity;
        }

        match (from, to) {
            (TypeSymbol::Int, TypeSymbol::Bool)
            | (TypeSymbol::Bool, TypeSymbol::Int)
            | (TypeSymbol::Int, TypeSymbol::String)
            | (TypeSymbol::Bool, TypeSymbol::String)
            | (TypeSymbol::String, TypeSymbol::Int)
            | (TypeSymbol::String, TypeSymbol::Bool) => Conversion::Explicit,
            _ => Conversion::None,
        }
    }

    pub fn exists(&self) -> bool {
        *self != Conversion::None
    }

    pub fn is_identity(&self) -> bool {
        *self == Conversion::Identity
    }

    pub fn is_explicit(&self) -> bool {
        *self == Conversion::Explicit
    }
}
