use std::collections::HashMap;

use crate::symbols::symbols::{FunctionSymbol, Symbol, VariableSymbol};

/// One layer of name to symbol bindings. Declaration order is kept so the symbols of
/// a submission can be replayed in the order they were written.
#[derive(Debug, Default)]
pub struct Scope {
    symbols: Vec<Symbol>,
    lookup: HashMap<String, usize>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    /// Declares `symbol`, failing when the name already exists in this layer.
    pub fn try_declare(&mut self, symbol: Symbol) -> bool {
        if self.lookup.contains_key(symbol.name()) {
            return false;
        }

        self.lookup.insert(symbol.name().to_string(), self.symbols.len());
        self.symbols.push(symbol);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.lookup.get(name).map(|index| &self.symbols[*index])
    }

    pub fn functions(&self) -> Vec<FunctionSymbol> {
        self.symbols
            .iter()
            .filter_map(|symbol| match symbol {
                Symbol::Function(function) => Some(function.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn variables(&self) -> Vec<VariableSymbol> {
        self.symbols
            .iter()
            .filter_map(|symbol| match symbol {
                Symbol::Variable(variable) => Some(variable.clone()),
                _ => None,
            })
            .collect()
    }
}

/// The stack of scopes the binder is currently inside, innermost last.
#[derive(Debug)]
pub struct ScopeChain {
    scopes: Vec<Scope>,
}

impl ScopeChain {
    pub fn new(root: Scope) -> Self {
        ScopeChain { scopes: vec![root] }
    }

    pub fn push(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Pops the innermost scope. The root scope is never removed.
    pub fn pop(&mut self) -> Option<Scope> {
        if self.scopes.len() > 1 {
            self.scopes.pop()
        } else {
            None
        }
    }

    pub fn current(&self) -> &Scope {
        // The chain always holds at least the root scope
        &self.scopes[self.scopes.len() - 1]
    }

    pub fn declare(&mut self, symbol: Symbol) -> bool {
        let index = self.scopes.len() - 1;
        self.scopes[index].try_declare(symbol)
    }

    /// Finds the nearest declaration of `name`, walking from the innermost scope out.
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .cloned()
    }
}
