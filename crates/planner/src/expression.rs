//! The expression algebra supplied by the upstream SQL parser. The planner
//! treats every type in this module as read-only input: it never
//! constructs novel expression shapes itself, only matches on and
//! recombines the ones the parser hands it (e.g. `AND`-combining two
//! filter conditions during predicate pushdown).

use itertools::Itertools;
use value::Value;

/// Binary operators, corresponding to the lexer's comparison and
/// arithmetic token codes (`EQ, NEQ, LT, GT, LTE, GTE, AND, OR, PLUS,
/// MINUS, STAR, SLASH`) plus the two pattern operators the selectivity
/// model special-cases (`LIKE`, `IN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    And,
    Or,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Like,
    In,
}

impl BinaryOp {
    pub fn is_column_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::Neq
                | BinaryOp::Lt
                | BinaryOp::Lte
                | BinaryOp::Gt
                | BinaryOp::Gte
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
    IsNull,
    IsNotNull,
}

/// A parsed expression tree, as supplied by the upstream parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Value),
    ColumnRef(String),
    BinaryExpr {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    UnaryExpr {
        op: UnaryOp,
        right: Box<Expression>,
    },
    FunctionCall {
        name: String,
        args: Vec<Expression>,
    },
    WindowFunction {
        name: String,
        args: Vec<Expression>,
        partition_by: Vec<Expression>,
        order_by: Vec<Expression>,
    },
}

impl Expression {
    pub fn column(name: impl Into<String>) -> Self {
        Expression::ColumnRef(name.into())
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Combines a list of conditions with `AND`, collapsing a
    /// single-element or empty list without introducing a spurious node.
    pub fn and_all(mut conditions: Vec<Expression>) -> Option<Expression> {
        if conditions.is_empty() {
            return None;
        }
        if conditions.len() == 1 {
            return conditions.pop();
        }
        let mut iter = conditions.into_iter();
        let first = iter.next().expect("checked non-empty above");
        Some(iter.fold(first, |acc, next| {
            Expression::binary(BinaryOp::And, acc, next)
        }))
    }

    /// Flattens nested `AND`/`OR` nodes of the given operator into a flat
    /// list of atomic predicates, per the index-selection algorithm's
    /// first step.
    pub fn flatten(&self, op: BinaryOp) -> Vec<&Expression> {
        let mut out = Vec::new();
        self.flatten_into(op, &mut out);
        out
    }

    fn flatten_into<'a>(&'a self, op: BinaryOp, out: &mut Vec<&'a Expression>) {
        match self {
            Expression::BinaryExpr { op: node_op, left, right } if *node_op == op => {
                left.flatten_into(op, out);
                right.flatten_into(op, out);
            },
            other => out.push(other),
        }
    }

    /// The set of bare column names this expression references, walking
    /// through binary/unary operands, function arguments, and window
    /// function clauses. Literals contribute nothing.
    pub fn referenced_columns(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns(&self, out: &mut Vec<String>) {
        match self {
            Expression::Literal(_) => {},
            Expression::ColumnRef(name) => out.push(name.clone()),
            Expression::BinaryExpr { left, right, .. } => {
                left.collect_columns(out);
                right.collect_columns(out);
            },
            Expression::UnaryExpr { right, .. } => right.collect_columns(out),
            Expression::FunctionCall { args, .. } => {
                for arg in args {
                    arg.collect_columns(out);
                }
            },
            Expression::WindowFunction {
                args,
                partition_by,
                order_by,
                ..
            } => {
                for e in args.iter().chain(partition_by).chain(order_by) {
                    e.collect_columns(out);
                }
            },
        }
    }

    /// Canonical string form used to compare an expression-index's stored
    /// source against a candidate query expression: function names
    /// upper-cased, whitespace stripped. This is a textual canonicalization
    /// only; it does not reparse or re-typecheck the expression.
    pub fn canonical_source(&self) -> String {
        match self {
            Expression::Literal(v) => format!("{v:?}"),
            Expression::ColumnRef(name) => name.clone(),
            Expression::BinaryExpr { op, left, right } => {
                format!("{:?}({},{})", op, left.canonical_source(), right.canonical_source())
            },
            Expression::UnaryExpr { op, right } => {
                format!("{:?}({})", op, right.canonical_source())
            },
            Expression::FunctionCall { name, args } => {
                let args = args.iter().map(Expression::canonical_source).join(",");
                format!("{}({})", name.to_uppercase(), args)
            },
            Expression::WindowFunction { name, args, .. } => {
                let args = args.iter().map(Expression::canonical_source).join(",");
                format!("{}({})", name.to_uppercase(), args)
            },
        }
        .split_whitespace()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_all_collapses_single_element() {
        let only = Expression::column("a");
        assert_eq!(Expression::and_all(vec![only.clone()]), Some(only));
        assert_eq!(Expression::and_all(vec![]), None);
    }

    #[test]
    fn flatten_splits_nested_and() {
        let expr = Expression::binary(
            BinaryOp::And,
            Expression::binary(
                BinaryOp::Eq,
                Expression::column("a"),
                Expression::Literal(Value::Integer(1)),
            ),
            Expression::binary(
                BinaryOp::Eq,
                Expression::column("b"),
                Expression::Literal(Value::Integer(2)),
            ),
        );
        assert_eq!(expr.flatten(BinaryOp::And).len(), 2);
    }

    #[test]
    fn referenced_columns_walks_function_args() {
        let expr = Expression::FunctionCall {
            name: "lower".into(),
            args: vec![Expression::column("email")],
        };
        assert_eq!(expr.referenced_columns(), vec!["email".to_string()]);
    }

    #[test]
    fn canonical_source_normalizes_case_and_whitespace() {
        let a = Expression::FunctionCall {
            name: "Lower".into(),
            args: vec![Expression::column("email")],
        };
        let b = Expression::FunctionCall {
            name: "LOWER".into(),
            args: vec![Expression::column("email")],
        };
        assert_eq!(a.canonical_source(), b.canonical_source());
    }
}
