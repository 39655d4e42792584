use std::fmt::Display;

use serde::Serialize;

use crate::expr::{Expr, Identifier, TypeExpr};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExprDef {
    pub name: Identifier,
    pub ty: Option<TypeExpr>,
    pub body: Expr,
}

impl Display for ExprDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.ty {
            Some(ty) => write!(f, "def {} : {} := {}", self.name, ty, self.body),
            None => write!(f, "def {} := {}", self.name, self.body),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum Definition {
    ExprDef(ExprDef),
}

impl Definition {
    pub fn name(&self) -> &Identifier {
        match self {
            Definition::ExprDef(def) => &def.name,
        }
    }
}

impl Display for Definition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Definition::ExprDef(def) => write!(f, "{def}"),
        }
    }
}

/// Definitions in source order. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Program {
    pub definitions: Vec<Definition>,
}

impl Program {
    pub fn new(definitions: Vec<Definition>) -> Program {
        Program { definitions }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Definition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl IntoIterator for Program {
    type Item = Definition;
    type IntoIter = std::vec::IntoIter<Definition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Definition;
    type IntoIter = std::slice::Iter<'a, Definition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.iter()
    }
}

fn write_definitions(f: &mut std::fmt::Formatter<'_>, defs: &[Definition]) -> std::fmt::Result {
    for def in defs {
        writeln!(f, "{def}")?;
    }

    Ok(())
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_definitions(f, &self.definitions)
    }
}

/// What a single interactive submission turned out to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReplInput {
    Expression(Expr),
    /// Never empty.
    Definitions(Vec<Definition>),
}

impl Display for ReplInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplInput::Expression(e) => write!(f, "{e}."),
            ReplInput::Definitions(defs) => write_definitions(f, defs),
        }
    }
}
