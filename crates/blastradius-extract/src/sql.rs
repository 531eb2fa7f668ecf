//! Column extraction from SQL model files
//!
//! Parses the first `SELECT ... FROM` of a model and yields one descriptor
//! per projected column, stripping aliases, table qualifiers, quoting, and
//! function-call wrappers.

use crate::ExtractError;
use blastradius_core::ColumnDescriptor;
use sqlparser::ast::{
    Expr, FunctionArg, FunctionArgExpr, FunctionArguments, SelectItem, SetExpr, Statement,
};
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;
use std::collections::HashSet;

/// Extract the projected column names from a SQL model body
///
/// `SELECT *` items contribute nothing (there is no catalog to expand
/// them against). Duplicate names keep their first occurrence.
pub fn extract_sql_columns(sql: &str) -> Result<Vec<ColumnDescriptor>, ExtractError> {
    let statements = Parser::parse_sql(&GenericDialect {}, sql)
        .map_err(|e| ExtractError::SqlParse(e.to_string()))?;

    let query = statements
        .iter()
        .find_map(|s| match s {
            Statement::Query(query) => Some(query.as_ref()),
            _ => None,
        })
        .ok_or(ExtractError::NoSelect)?;

    let select = first_select(&query.body).ok_or(ExtractError::NoSelect)?;

    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for item in select {
        let name = match item {
            SelectItem::UnnamedExpr(expr) => column_name(expr),
            // Alias stripped: the underlying column is what changed, not
            // the exposed name.
            SelectItem::ExprWithAlias { expr, .. } => column_name(expr),
            SelectItem::Wildcard(..) | SelectItem::QualifiedWildcard(..) => None,
        };

        if let Some(name) = name {
            if seen.insert(name.clone()) {
                columns.push(ColumnDescriptor::new(name));
            }
        }
    }

    Ok(columns)
}

/// Find the projection of the first SELECT in a set expression
fn first_select(body: &SetExpr) -> Option<&[SelectItem]> {
    match body {
        SetExpr::Select(select) => Some(&select.projection),
        SetExpr::Query(query) => first_select(&query.body),
        SetExpr::SetOperation { left, .. } => first_select(left),
        _ => None,
    }
}

/// Resolve an expression to the column name it projects, if any
///
/// `t.col` yields `col`; `f(col)` yields the first column identifier
/// found inside the call; literals and other expressions yield nothing.
fn column_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Identifier(ident) => Some(ident.value.clone()),
        Expr::CompoundIdentifier(parts) => parts.last().map(|i| i.value.clone()),
        Expr::Function(func) => first_function_column(&func.args),
        Expr::Cast { expr, .. } => column_name(expr),
        Expr::Nested(inner) => column_name(inner),
        _ => None,
    }
}

/// First column identifier inside a function argument list
fn first_function_column(args: &FunctionArguments) -> Option<String> {
    let list = match args {
        FunctionArguments::List(list) => &list.args,
        _ => return None,
    };

    list.iter().find_map(|arg| {
        let arg_expr = match arg {
            FunctionArg::Unnamed(arg_expr) => arg_expr,
            FunctionArg::Named { arg, .. } => arg,
            FunctionArg::ExprNamed { arg, .. } => arg,
        };
        match arg_expr {
            FunctionArgExpr::Expr(expr) => column_name(expr),
            _ => None,
        }
    })
}
