//! Node-kind catalog for structural tooling.
//!
//! The catalog mirrors the `node-types.json` layout used by tree-sitter
//! grammars, so highlighters and editors can bind to the same kind and field
//! names that [`to_sexp`] prints. Those names are a stability contract.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::{
    def::{Definition, Program, ReplInput},
    expr::{Expr, TypeExpr},
};

pub mod kind {
    pub const PROGRAM: &str = "program";
    pub const EXPR_DEF: &str = "expr_def";
    pub const TY_RESTR: &str = "ty_restr";
    pub const IDENT: &str = "ident";
    pub const CONSTANT: &str = "constant";
    pub const NUMBER_N: &str = "number_N";

    pub const DEFINITIONS_OR_EXPRESSION: &str = "definitions_or_expression";
    pub const DEFINITIONS: &str = "definitions";
    pub const EXPRESSION: &str = "expression";

    pub const DEFINITION: &str = "_definition";
    pub const EXPR: &str = "_expr";
    pub const TY: &str = "_ty";
}

pub mod field {
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const BODY: &str = "body";
}

const ANONYMOUS_TOKENS: [&str; 6] = ["(", ")", ".", ":", ":=", "def"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// Whole files: a sequence of definitions.
    Start,
    /// Interactive input: one expression or one-or-more definitions.
    StartRepl,
}

impl Grammar {
    pub fn name(self) -> &'static str {
        match self {
            Grammar::Start => "start",
            Grammar::StartRepl => "start_repl",
        }
    }

    pub fn root(self) -> &'static str {
        match self {
            Grammar::Start => kind::PROGRAM,
            Grammar::StartRepl => kind::DEFINITIONS_OR_EXPRESSION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeTypeRef {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub named: bool,
}

impl NodeTypeRef {
    fn named(kind: &'static str) -> NodeTypeRef {
        NodeTypeRef { kind, named: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    pub multiple: bool,
    pub required: bool,
    #[serde(rename = "types")]
    pub allowed_types: Vec<NodeTypeRef>,
}

impl FieldInfo {
    fn new(multiple: bool, required: bool, kinds: &[&'static str]) -> FieldInfo {
        FieldInfo {
            multiple,
            required,
            allowed_types: kinds.iter().map(|&k| NodeTypeRef::named(k)).collect(),
        }
    }
}

/// One entry of the catalog.
///
/// Supertypes carry `subtypes`; concrete inner nodes carry `fields` and
/// optionally `children`; leaves and anonymous tokens carry neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeType {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub named: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtypes: Option<Vec<NodeTypeRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<&'static str, FieldInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<FieldInfo>,
}

impl NodeType {
    fn supertype(kind: &'static str, subtypes: &[&'static str]) -> NodeType {
        NodeType {
            kind,
            named: true,
            subtypes: Some(subtypes.iter().map(|&k| NodeTypeRef::named(k)).collect()),
            fields: None,
            children: None,
        }
    }

    fn inner(
        kind: &'static str,
        fields: Vec<(&'static str, FieldInfo)>,
        children: Option<FieldInfo>,
    ) -> NodeType {
        NodeType {
            kind,
            named: true,
            subtypes: None,
            fields: Some(fields.into_iter().collect()),
            children,
        }
    }

    fn leaf(kind: &'static str, named: bool) -> NodeType {
        NodeType {
            kind,
            named,
            subtypes: None,
            fields: None,
            children: None,
        }
    }

    /// Every kind this entry points at.
    pub fn referenced_kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<&'static str> = Vec::new();

        if let Some(subtypes) = &self.subtypes {
            kinds.extend(subtypes.iter().map(|t| t.kind));
        }
        if let Some(fields) = &self.fields {
            for info in fields.values() {
                kinds.extend(info.allowed_types.iter().map(|t| t.kind));
            }
        }
        if let Some(children) = &self.children {
            kinds.extend(children.allowed_types.iter().map(|t| t.kind));
        }

        kinds
    }
}

fn shared_node_types() -> Vec<NodeType> {
    vec![
        NodeType::supertype(kind::DEFINITION, &[kind::EXPR_DEF]),
        NodeType::supertype(kind::EXPR, &[kind::CONSTANT, kind::IDENT]),
        NodeType::supertype(kind::TY, &[kind::IDENT]),
        NodeType::inner(
            kind::CONSTANT,
            vec![],
            Some(FieldInfo::new(false, true, &[kind::NUMBER_N])),
        ),
        NodeType::inner(
            kind::EXPR_DEF,
            vec![
                (field::BODY, FieldInfo::new(false, true, &[kind::EXPR])),
                (field::NAME, FieldInfo::new(false, true, &[kind::IDENT])),
                (field::TYPE, FieldInfo::new(false, false, &[kind::TY_RESTR])),
            ],
            None,
        ),
        NodeType::inner(
            kind::TY_RESTR,
            vec![],
            Some(FieldInfo::new(false, true, &[kind::TY])),
        ),
        NodeType::leaf(kind::IDENT, true),
        NodeType::leaf(kind::NUMBER_N, true),
    ]
}

fn start_node_types() -> Vec<NodeType> {
    let mut types = shared_node_types();
    types.push(NodeType::inner(
        kind::PROGRAM,
        vec![],
        Some(FieldInfo::new(true, false, &[kind::DEFINITION])),
    ));
    types.extend(ANONYMOUS_TOKENS.into_iter().map(|t| NodeType::leaf(t, false)));
    types
}

fn start_repl_node_types() -> Vec<NodeType> {
    let mut types = shared_node_types();
    types.extend([
        NodeType::inner(
            kind::DEFINITIONS,
            vec![],
            Some(FieldInfo::new(true, true, &[kind::DEFINITION])),
        ),
        NodeType::inner(
            kind::DEFINITIONS_OR_EXPRESSION,
            vec![],
            Some(FieldInfo::new(
                false,
                true,
                &[kind::DEFINITIONS, kind::EXPRESSION],
            )),
        ),
        NodeType::inner(
            kind::EXPRESSION,
            vec![],
            Some(FieldInfo::new(false, true, &[kind::EXPR])),
        ),
    ]);
    types.extend(ANONYMOUS_TOKENS.into_iter().map(|t| NodeType::leaf(t, false)));
    types
}

lazy_static! {
    static ref START_NODE_TYPES: Vec<NodeType> = start_node_types();
    static ref START_REPL_NODE_TYPES: Vec<NodeType> = start_repl_node_types();
}

pub fn node_types(grammar: Grammar) -> &'static [NodeType] {
    match grammar {
        Grammar::Start => START_NODE_TYPES.as_slice(),
        Grammar::StartRepl => START_REPL_NODE_TYPES.as_slice(),
    }
}

pub fn node_types_json(grammar: Grammar) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(node_types(grammar))
}

/// Renders a node as a tree-sitter style s-expression, using catalog names.
pub trait Sexp {
    fn write_sexp(&self, out: &mut String);
}

pub fn to_sexp<T: Sexp + ?Sized>(node: &T) -> String {
    let mut out = String::new();
    node.write_sexp(&mut out);
    out
}

fn open(out: &mut String, kind: &str) {
    out.push('(');
    out.push_str(kind);
}

fn leaf(out: &mut String, kind: &str) {
    open(out, kind);
    out.push(')');
}

fn field_label(out: &mut String, name: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str(": ");
}

impl Sexp for Expr {
    fn write_sexp(&self, out: &mut String) {
        match self {
            Expr::IdentRef(_) => leaf(out, kind::IDENT),
            Expr::Constant(_) => {
                open(out, kind::CONSTANT);
                out.push(' ');
                leaf(out, kind::NUMBER_N);
                out.push(')');
            }
        }
    }
}

impl Sexp for TypeExpr {
    fn write_sexp(&self, out: &mut String) {
        match self {
            TypeExpr::NamedType(_) => {
                open(out, kind::TY_RESTR);
                out.push(' ');
                leaf(out, kind::IDENT);
                out.push(')');
            }
        }
    }
}

impl Sexp for Definition {
    fn write_sexp(&self, out: &mut String) {
        match self {
            Definition::ExprDef(def) => {
                open(out, kind::EXPR_DEF);
                field_label(out, field::NAME);
                leaf(out, kind::IDENT);
                if let Some(ty) = &def.ty {
                    field_label(out, field::TYPE);
                    ty.write_sexp(out);
                }
                field_label(out, field::BODY);
                def.body.write_sexp(out);
                out.push(')');
            }
        }
    }
}

fn write_list(out: &mut String, kind: &str, defs: &[Definition]) {
    open(out, kind);
    for def in defs {
        out.push(' ');
        def.write_sexp(out);
    }
    out.push(')');
}

impl Sexp for Program {
    fn write_sexp(&self, out: &mut String) {
        write_list(out, kind::PROGRAM, &self.definitions);
    }
}

impl Sexp for ReplInput {
    fn write_sexp(&self, out: &mut String) {
        open(out, kind::DEFINITIONS_OR_EXPRESSION);
        out.push(' ');
        match self {
            ReplInput::Expression(e) => {
                open(out, kind::EXPRESSION);
                out.push(' ');
                e.write_sexp(out);
                out.push(')');
            }
            ReplInput::Definitions(defs) => write_list(out, kind::DEFINITIONS, defs),
        }
        out.push(')');
    }
}
