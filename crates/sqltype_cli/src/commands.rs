use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Subcommand;
use sqltype_core::ast::Expr;
use sqltype_core::config::TypeCheckConfig;
use sqltype_core::expr::{TypedExpr, TypedExprKind};
use sqltype_core::functions::builtin::BUILTIN_OPERATOR_SETS;
use sqltype_core::functions::{FunctionKind, FunctionRegistry, FunctionSet};
use sqltype_core::resolver::ColumnTypes;
use sqltype_core::{PlaceholderTypes, TypeChecker};
use tracing::{debug, info};

use crate::args::{CheckArgs, FunctionsArgs};

#[derive(Subcommand)]
pub enum Commands {
    /// Type check a JSON encoded expression.
    Check(CheckArgs),
    /// List the functions known to the type checker.
    Functions(FunctionsArgs),
    /// List the available settings and their defaults.
    Settings,
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Check(check) => check.run(),
            Commands::Functions(functions) => functions.run(),
            Commands::Settings => list_settings(),
        }
    }
}

trait RunCommand {
    fn run(self) -> Result<()>;
}

impl RunCommand for CheckArgs {
    fn run(self) -> Result<()> {
        let input = match &self.file {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            None => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read stdin")?;
                buf
            }
        };

        let expr: Expr = serde_json::from_str(&input).context("failed to parse expression")?;
        info!(%expr, "parsed expression");

        let mut config = TypeCheckConfig::default();
        for (name, value) in self.settings {
            config.set_from_scalar(&name, value)?;
        }

        let mut columns = ColumnTypes::new();
        for (name, datatype) in self.columns {
            columns.insert(name, datatype);
        }

        let mut bindings: PlaceholderTypes = self.params.into_iter().collect();

        let checker = TypeChecker::new(FunctionRegistry::builtin(), &columns).with_config(config);
        let typed = checker.type_check(&expr, &mut bindings, self.desired.as_ref())?;
        debug!(datatype = %typed.datatype, "type checked");

        print!("{}", format_tree(&typed));
        println!("result: {}", typed.datatype);
        if !bindings.is_empty() {
            println!("parameters:");
            for (name, datatype) in bindings.iter() {
                println!("  ${name}: {datatype}");
            }
        }

        Ok(())
    }
}

impl RunCommand for FunctionsArgs {
    fn run(self) -> Result<()> {
        for set in FunctionRegistry::builtin().iter() {
            print!("{}", format_function_set(set));
        }
        if self.operators {
            for set in BUILTIN_OPERATOR_SETS {
                print!("{}", format_function_set(set));
            }
        }
        Ok(())
    }
}

fn list_settings() -> Result<()> {
    let defaults = TypeCheckConfig::default();
    for (name, description) in TypeCheckConfig::settings() {
        let value = defaults.get_as_scalar(name)?;
        println!("{name} = {value}");
        println!("    {description}");
    }
    Ok(())
}

/// One line per node, children indented under their parent.
fn format_tree(expr: &TypedExpr) -> String {
    let mut out = String::new();
    expr.walk(&mut |node, depth| {
        let _ = writeln!(
            out,
            "{:indent$}{}: {}",
            "",
            node_label(node),
            node.datatype,
            indent = depth * 2
        );
    });
    out
}

fn node_label(expr: &TypedExpr) -> String {
    match &expr.kind {
        TypedExprKind::Literal(value) => value.to_string(),
        TypedExprKind::Placeholder(placeholder) => placeholder.to_string(),
        TypedExprKind::Column(name) => name.to_string(),
        TypedExprKind::Unary { op, .. } => format!("unary {op}"),
        TypedExprKind::Binary { op, .. } => format!("binary {op}"),
        TypedExprKind::Comparison { op, .. } => format!("comparison {op}"),
        TypedExprKind::Conjunction { op, .. } => op.to_string(),
        TypedExprKind::Not(_) => "NOT".to_string(),
        TypedExprKind::Case { operand, .. } => match operand {
            Some(_) => "CASE <operand>".to_string(),
            None => "CASE".to_string(),
        },
        TypedExprKind::If { .. } => "IF".to_string(),
        TypedExprKind::IfNull { .. } => "IFNULL".to_string(),
        TypedExprKind::NullIf { .. } => "NULLIF".to_string(),
        TypedExprKind::Coalesce(_) => "COALESCE".to_string(),
        TypedExprKind::Function { function, .. } => {
            format!("function {}{}", function.name(), function.signature)
        }
        TypedExprKind::Cast(_) => "CAST".to_string(),
        TypedExprKind::Tuple(_) => "tuple".to_string(),
        TypedExprKind::InList { negated, .. } => negatable("IN", *negated),
        TypedExprKind::InSubquery {
            subquery, negated, ..
        } => format!("{} ({})", negatable("IN", *negated), subquery.sql),
        TypedExprKind::Between { negated, .. } => negatable("BETWEEN", *negated),
        TypedExprKind::IsNull { negated, .. } => {
            if *negated {
                "IS NOT NULL".to_string()
            } else {
                "IS NULL".to_string()
            }
        }
        TypedExprKind::IsBool { value, negated, .. } => {
            let not = if *negated { "NOT " } else { "" };
            let value = if *value { "TRUE" } else { "FALSE" };
            format!("IS {not}{value}")
        }
        TypedExprKind::Subquery(subquery) => format!("({})", subquery.sql),
    }
}

fn negatable(op: &str, negated: bool) -> String {
    if negated {
        format!("NOT {op}")
    } else {
        op.to_string()
    }
}

fn format_function_set(set: &FunctionSet) -> String {
    let mut out = String::new();
    let kind = match set.kind {
        FunctionKind::Scalar => "scalar",
        FunctionKind::Aggregate => "aggregate",
    };
    let _ = write!(out, "{} ({kind}", set.name);
    if !set.aliases.is_empty() {
        let _ = write!(out, ", aliases: {}", set.aliases.join(", "));
    }
    let _ = writeln!(out, ")");

    if let Some(doc) = set.doc.first() {
        let _ = writeln!(out, "  {} [{}]", doc.description, doc.category.as_str());
    }
    for signature in set.signatures {
        let _ = writeln!(out, "    {}{signature}", set.name);
    }
    out
}
