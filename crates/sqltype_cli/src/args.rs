use std::path::PathBuf;

use clap::Args;
use sqltype_core::ast::QualifiedName;
use sqltype_core::datatype::DataType;
use sqltype_core::scalar::ScalarValue;

#[derive(Args)]
pub struct CheckArgs {
    /// File containing the JSON encoded expression. Reads stdin if omitted.
    pub file: Option<PathBuf>,

    /// Type to steer untyped constants and parameters towards.
    #[clap(long, value_parser = parse_datatype)]
    pub desired: Option<DataType>,

    /// Pre-bind a parameter, e.g. `--param a=int`.
    #[clap(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, DataType)>,

    /// Make a column available, e.g. `--column t.a=string`.
    #[clap(long = "column", value_parser = parse_column)]
    pub columns: Vec<(QualifiedName, DataType)>,

    /// Override a setting, e.g. `--set max_expression_depth=64`.
    #[clap(long = "set", value_parser = parse_setting)]
    pub settings: Vec<(String, ScalarValue)>,
}

#[derive(Args)]
pub struct FunctionsArgs {
    /// Also list the signatures backing the SQL operators.
    #[clap(long)]
    pub operators: bool,
}

fn parse_datatype(s: &str) -> Result<DataType, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn split_assignment(s: &str) -> Result<(&str, &str), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value.trim())),
        _ => Err(format!("expected NAME=VALUE, got '{s}'")),
    }
}

fn parse_param(s: &str) -> Result<(String, DataType), String> {
    let (name, datatype) = split_assignment(s)?;
    let name = name.strip_prefix('$').unwrap_or(name);
    Ok((name.to_string(), parse_datatype(datatype)?))
}

fn parse_column(s: &str) -> Result<(QualifiedName, DataType), String> {
    let (name, datatype) = split_assignment(s)?;
    Ok((QualifiedName::new(name.split('.')), parse_datatype(datatype)?))
}

/// Values are parsed as a bool, then an int, falling back to a string.
fn parse_setting(s: &str) -> Result<(String, ScalarValue), String> {
    let (name, value) = split_assignment(s)?;
    let scalar = if let Ok(b) = value.parse::<bool>() {
        ScalarValue::Boolean(b)
    } else if let Ok(i) = value.parse::<i64>() {
        ScalarValue::Int(i)
    } else {
        ScalarValue::String(value.to_string())
    };
    Ok((name.to_string(), scalar))
}
