use std::fmt::{Debug, Display};

use serde::Serialize;
use start_compiler::node_types::{to_sexp, Sexp};

use crate::{cli::Emit, error::StartError};

pub fn render<T>(node: &T, emit: Emit) -> Result<String, StartError>
where
    T: Display + Debug + Serialize + Sexp,
{
    Ok(match emit {
        Emit::Canonical => node.to_string().trim_end().to_owned(),
        Emit::Ast => format!("{node:#?}"),
        Emit::Json => serde_json::to_string_pretty(node)?,
        Emit::Sexp => to_sexp(node),
    })
}
