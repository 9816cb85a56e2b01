use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::ast::statements::FnDeclStmt;

use super::types::TypeSymbol;

/// Symbol Kinds
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SymbolKind {
    Function,
    GlobalVariable,
    LocalVariable,
    Parameter,
    Type,
}

/// Where a variable lives. Globals are stored in the caller-owned map, everything else
/// in the current local frame.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VariableKind {
    Global,
    Local,
    Parameter,
}

#[derive(Debug)]
pub struct VariableData {
    pub name: String,
    pub kind: VariableKind,
    pub is_read_only: bool,
    pub ty: TypeSymbol,
}

/// A declared variable or parameter.
///
/// Cloning shares the same declaration; equality and hashing follow the declaration,
/// never the name.
#[derive(Debug, Clone)]
pub struct VariableSymbol(Arc<VariableData>);

impl VariableSymbol {
    pub fn new(name: impl Into<String>, kind: VariableKind, is_read_only: bool, ty: TypeSymbol) -> Self {
        VariableSymbol(Arc::new(VariableData {
            name: name.into(),
            kind,
            is_read_only,
            ty,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn kind(&self) -> VariableKind {
        self.0.kind
    }

    pub fn is_read_only(&self) -> bool {
        self.0.is_read_only
    }

    pub fn ty(&self) -> TypeSymbol {
        self.0.ty
    }

    pub fn symbol_kind(&self) -> SymbolKind {
        match self.0.kind {
            VariableKind::Global => SymbolKind::GlobalVariable,
            VariableKind::Local => SymbolKind::LocalVariable,
            VariableKind::Parameter => SymbolKind::Parameter,
        }
    }
}

impl PartialEq for VariableSymbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for VariableSymbol {}

impl Hash for VariableSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl Display for VariableSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.name)
    }
}

#[derive(Debug)]
pub struct FunctionData {
    pub name: String,
    pub parameters: Vec<VariableSymbol>,
    pub ty: TypeSymbol,
    pub declaration: Option<Arc<FnDeclStmt>>,
}

/// A declared function. Built-ins have no declaration.
#[derive(Debug, Clone)]
pub struct FunctionSymbol(Arc<FunctionData>);

impl FunctionSymbol {
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<VariableSymbol>,
        ty: TypeSymbol,
        declaration: Option<Arc<FnDeclStmt>>,
    ) -> Self {
        FunctionSymbol(Arc::new(FunctionData {
            name: name.into(),
            parameters,
            ty,
            declaration,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn parameters(&self) -> &[VariableSymbol] {
        &self.0.parameters
    }

    pub fn ty(&self) -> TypeSymbol {
        self.0.ty
    }

    pub fn declaration(&self) -> Option<&Arc<FnDeclStmt>> {
        self.0.declaration.as_ref()
    }
}

impl PartialEq for FunctionSymbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for FunctionSymbol {}

impl Hash for FunctionSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl Display for FunctionSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "function {}(", self.0.name)?;
        for (i, parameter) in self.0.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", parameter.name(), parameter.ty())?;
        }
        write!(f, "): {}", self.0.ty)
    }
}

/// Anything a name can resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Function(FunctionSymbol),
    Variable(VariableSymbol),
    Type(TypeSymbol),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Function(function) => function.name(),
            Symbol::Variable(variable) => variable.name(),
            Symbol::Type(ty) => ty.name(),
        }
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Function(_) => SymbolKind::Function,
            Symbol::Variable(variable) => variable.symbol_kind(),
            Symbol::Type(_) => SymbolKind::Type,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Function(function) => write!(f, "{function}"),
            Symbol::Variable(variable) => {
                let keyword = if variable.is_read_only() { "let" } else { "var" };
                match variable.kind() {
                    VariableKind::Parameter => write!(f, "{}: {}", variable.name(), variable.ty()),
                    _ => write!(f, "{keyword} {}: {}", variable.name(), variable.ty()),
                }
            }
            Symbol::Type(ty) => write!(f, "type {ty}"),
        }
    }
}
