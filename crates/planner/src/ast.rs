//! The shape of a parsed `SELECT` statement, as the upstream SQL parser
//! hands it to the plan builder. Read-only input to this crate.

use crate::expression::Expression;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStmt {
    pub select_columns: Vec<SelectColumn>,
    pub from_tableref: Option<TableReference>,
    pub where_expression: Option<Expression>,
    pub order_by: Vec<OrderByItem>,
    pub group_by: Vec<Expression>,
    pub having: Option<Expression>,
    pub limit: Option<Expression>,
    pub offset: Option<Expression>,
}

impl SelectStmt {
    /// A bare `SELECT * FROM <table>` with no filter, grouping, or limit.
    pub fn star_from(table: TableReference) -> Self {
        Self {
            select_columns: vec![SelectColumn::Star],
            from_tableref: Some(table),
            where_expression: None,
            order_by: Vec::new(),
            group_by: Vec::new(),
            having: None,
            limit: None,
            offset: None,
        }
    }

    /// Is the select list exactly `*`, with nothing else in it?
    pub fn is_star_projection(&self) -> bool {
        matches!(self.select_columns.as_slice(), [SelectColumn::Star])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectColumn {
    /// `*`
    Star,
    Expr {
        expr: Expression,
        alias: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByItem {
    pub expr: Expression,
    pub direction: OrderDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableReference {
    Table {
        name: String,
        alias: Option<String>,
    },
    Join {
        left: Box<TableReference>,
        right: Box<TableReference>,
        join_type: JoinType,
        condition: Option<Expression>,
    },
    DerivedTable {
        subquery: Box<SelectStmt>,
        alias: String,
    },
}

impl TableReference {
    pub fn table(name: impl Into<String>) -> Self {
        TableReference::Table {
            name: name.into(),
            alias: None,
        }
    }

    pub fn join(left: TableReference, right: TableReference, join_type: JoinType) -> Self {
        TableReference::Join {
            left: Box::new(left),
            right: Box::new(right),
            join_type,
            condition: None,
        }
    }
}
