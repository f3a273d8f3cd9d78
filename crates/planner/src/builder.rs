//! Translates a parsed `SELECT` into an initial logical plan tree via a
//! single post-order traversal. No cost-based decisions are made here;
//! that's the optimizer's job. See [`crate::optimizer::optimize`].

use anyhow::Result;
use catalog::Catalog;
use errors::ErrorMetadata;

use crate::ast::{
    SelectColumn,
    SelectStmt,
    TableReference,
};
use crate::expression::Expression;
use crate::plan::PlanNode;

/// Row count assumed for a freshly-scanned base table when the catalog
/// has no statistics on file yet.
const PLACEHOLDER_ROW_COUNT: u64 = 1000;

pub struct PlanBuilder<'c> {
    catalog: &'c Catalog,
}

impl<'c> PlanBuilder<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    pub fn build(&self, stmt: &SelectStmt) -> Result<PlanNode> {
        let mut node = match &stmt.from_tableref {
            Some(tableref) => self.build_tableref(tableref)?,
            None => PlanNode::Dual,
        };

        if let Some(where_expr) = &stmt.where_expression {
            node = PlanNode::Filter {
                child: Box::new(node),
                condition: where_expr.clone(),
                selectivity: 0.1,
            };
        }

        if !stmt.is_star_projection() {
            let expressions = stmt
                .select_columns
                .iter()
                .filter_map(|col| match col {
                    SelectColumn::Star => None,
                    SelectColumn::Expr { expr, .. } => Some(expr.clone()),
                })
                .collect();
            node = PlanNode::Projection {
                child: Box::new(node),
                expressions,
            };
        }

        Ok(node)
    }

    fn build_tableref(&self, tableref: &TableReference) -> Result<PlanNode> {
        match tableref {
            TableReference::Table { name, .. } => {
                let def = self
                    .catalog
                    .get_table(name)
                    .ok_or_else(|| table_not_found(name))?;
                let row_count = self
                    .catalog
                    .get_table_statistics(&def.name)
                    .map(|s| s.row_count)
                    .unwrap_or(PLACEHOLDER_ROW_COUNT);
                Ok(PlanNode::TableScan {
                    table_name: def.name,
                    row_count,
                    total_columns: def.columns.len(),
                    required_columns: Vec::new(),
                })
            },
            TableReference::DerivedTable { subquery, alias } => {
                let child = self.build(subquery)?;
                Ok(PlanNode::SubqueryScan {
                    child: Box::new(child),
                    alias: Some(alias.clone()),
                })
            },
            TableReference::Join {
                left,
                right,
                join_type,
                condition,
            } => {
                let left = self.build_tableref(left)?;
                let right = self.build_tableref(right)?;
                Ok(PlanNode::NestedLoopJoin {
                    left: Box::new(left),
                    right: Box::new(right),
                    join_type: *join_type,
                    condition: condition.clone(),
                })
            },
        }
    }
}

/// Applies a bare-column select list item as a `ColumnRef`, used by
/// callers constructing `SelectStmt` programmatically in tests.
pub fn column_select(name: impl Into<String>) -> SelectColumn {
    SelectColumn::Expr {
        expr: Expression::column(name),
        alias: None,
    }
}

fn table_not_found(name: &str) -> anyhow::Error {
    ErrorMetadata::not_found("TableNotFound", format!("table {name:?} not found")).into()
}

#[cfg(test)]
mod tests {
    use catalog::TableDef;
    use errors::ErrorMetadataAnyhowExt;

    use super::*;
    use crate::ast::JoinType;

    fn catalog_with_users() -> Catalog {
        let catalog = Catalog::new();
        let mut def = TableDef::new("users", 1);
        def.columns.push(catalog::ColumnDef::new("id", value::ColumnType::Int64));
        def.columns.push(catalog::ColumnDef::new("email", value::ColumnType::Text));
        catalog.create_table(def).unwrap();
        catalog
    }

    #[test]
    fn star_select_produces_bare_table_scan() {
        let catalog = catalog_with_users();
        let builder = PlanBuilder::new(&catalog);
        let stmt = SelectStmt::star_from(TableReference::table("users"));
        let plan = builder.build(&stmt).unwrap();
        assert!(matches!(plan, PlanNode::TableScan { .. }));
    }

    #[test]
    fn missing_table_is_not_found() {
        let catalog = Catalog::new();
        let builder = PlanBuilder::new(&catalog);
        let stmt = SelectStmt::star_from(TableReference::table("ghost"));
        let err = builder.build(&stmt).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn where_clause_wraps_with_filter() {
        let catalog = catalog_with_users();
        let builder = PlanBuilder::new(&catalog);
        let mut stmt = SelectStmt::star_from(TableReference::table("users"));
        stmt.where_expression = Some(Expression::column("id"));
        let plan = builder.build(&stmt).unwrap();
        assert!(matches!(plan, PlanNode::Filter { .. }));
    }

    #[test]
    fn non_star_select_wraps_with_projection() {
        let catalog = catalog_with_users();
        let builder = PlanBuilder::new(&catalog);
        let mut stmt = SelectStmt::star_from(TableReference::table("users"));
        stmt.select_columns = vec![column_select("email")];
        let plan = builder.build(&stmt).unwrap();
        assert!(matches!(plan, PlanNode::Projection { .. }));
    }

    #[test]
    fn join_tableref_becomes_nested_loop_join() {
        let catalog = catalog_with_users();
        let mut other = TableDef::new("orders", 2);
        other.columns.push(catalog::ColumnDef::new("user_id", value::ColumnType::Int64));
        catalog.create_table(other).unwrap();

        let builder = PlanBuilder::new(&catalog);
        let stmt = SelectStmt::star_from(TableReference::join(
            TableReference::table("users"),
            TableReference::table("orders"),
            JoinType::Inner,
        ));
        let plan = builder.build(&stmt).unwrap();
        match plan {
            PlanNode::NestedLoopJoin { left, right, .. } => {
                assert!(matches!(*left, PlanNode::TableScan { .. }));
                assert!(matches!(*right, PlanNode::TableScan { .. }));
            },
            other => panic!("expected NestedLoopJoin, got {other:?}"),
        }
    }

    #[test]
    fn no_from_clause_builds_dual() {
        let catalog = Catalog::new();
        let builder = PlanBuilder::new(&catalog);
        let stmt = SelectStmt {
            select_columns: vec![SelectColumn::Star],
            from_tableref: None,
            where_expression: None,
            order_by: Vec::new(),
            group_by: Vec::new(),
            having: None,
            limit: None,
            offset: None,
        };
        assert_eq!(builder.build(&stmt).unwrap(), PlanNode::Dual);
    }
}
