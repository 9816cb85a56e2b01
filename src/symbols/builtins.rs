use lazy_static::lazy_static;

use super::{
    symbols::{FunctionSymbol, VariableKind, VariableSymbol},
    types::TypeSymbol,
};

lazy_static! {
    pub static ref PRINT: FunctionSymbol = FunctionSymbol::new(
        "print",
        vec![VariableSymbol::new("text", VariableKind::Parameter, true, TypeSymbol::String)],
        TypeSymbol::Void,
        None,
    );
    pub static ref INPUT: FunctionSymbol =
        FunctionSymbol::new("input", vec![], TypeSymbol::String, None);
    pub static ref RND: FunctionSymbol = FunctionSymbol::new(
        "rnd",
        vec![VariableSymbol::new("max", VariableKind::Parameter, true, TypeSymbol::Int)],
        TypeSymbol::Int,
        None,
    );
}

/// Every built-in function, in the order they are declared in the root scope.
pub fn all() -> Vec<FunctionSymbol> {
    vec![PRINT.clone(), INPUT.clone(), RND.clone()]
}
