//! The physical plan node taxonomy: a sum type over every node shape the
//! optimizer can produce, with `estimated_cost`/`estimated_rows` computed
//! by a match over the variant rather than dynamic dispatch.

use crate::ast::{
    JoinType,
    OrderByItem,
};
use crate::cost;
use crate::expression::Expression;

#[derive(Debug, Clone, PartialEq)]
pub enum PlanNode {
    TableScan {
        table_name: String,
        row_count: u64,
        total_columns: usize,
        /// Populated by projection pushdown; empty means "all columns".
        required_columns: Vec<String>,
    },
    SubqueryScan {
        child: Box<PlanNode>,
        alias: Option<String>,
    },
    /// Cost and rows are set once by the index-selection pass, which has
    /// already run the cost model; this node just remembers the result.
    IndexScan {
        table_name: String,
        index_name: String,
        cost: f64,
        rows: u64,
        required_columns: Vec<String>,
    },
    Filter {
        child: Box<PlanNode>,
        condition: Expression,
        selectivity: f64,
    },
    Projection {
        child: Box<PlanNode>,
        expressions: Vec<Expression>,
    },
    NestedLoopJoin {
        left: Box<PlanNode>,
        right: Box<PlanNode>,
        join_type: JoinType,
        condition: Option<Expression>,
    },
    HashJoin {
        left: Box<PlanNode>,
        right: Box<PlanNode>,
        join_type: JoinType,
        condition: Option<Expression>,
    },
    Sort {
        child: Box<PlanNode>,
        order_by: Vec<OrderByItem>,
    },
    Limit {
        child: Box<PlanNode>,
        limit: Option<Expression>,
    },
    Aggregate {
        child: Box<PlanNode>,
        group_by: Vec<Expression>,
    },
    Window {
        child: Box<PlanNode>,
    },
    /// A scan of a materialized CTE result; `stored_rows` was already
    /// computed when the CTE was planned.
    CTEScan {
        name: String,
        stored_rows: u64,
    },
    /// `SELECT 1` with no FROM clause.
    Dual,
    TableFunction {
        name: String,
        args: Vec<Expression>,
        /// `Some(k)` when the function's arity/behavior lets the planner
        /// predict its row count (e.g. `generate_series` with a literal
        /// bound); `None` falls back to the default estimate.
        known_rows: Option<u64>,
    },
}

impl PlanNode {
    pub fn estimated_cost(&self) -> f64 {
        match self {
            PlanNode::TableScan {
                row_count,
                required_columns,
                total_columns,
                ..
            } => cost::table_scan_cost(*row_count, required_columns, *total_columns).0,
            PlanNode::SubqueryScan { child, .. } => child.estimated_cost(),
            PlanNode::IndexScan { cost, .. } => *cost,
            PlanNode::Filter { child, .. } => {
                child.estimated_cost() + child.estimated_rows() as f64 * 0.01
            },
            PlanNode::Projection { child, .. } => {
                child.estimated_cost() + child.estimated_rows() as f64 * 0.001
            },
            PlanNode::NestedLoopJoin { left, right, .. } => {
                left.estimated_cost() + left.estimated_rows() as f64 * right.estimated_cost()
            },
            PlanNode::HashJoin { left, right, .. } => {
                left.estimated_cost()
                    + right.estimated_cost()
                    + left.estimated_rows() as f64 * 0.01
                    + right.estimated_rows() as f64 * 0.001
            },
            PlanNode::Sort { child, .. } => {
                let r = child.estimated_rows() as f64;
                let log2_r = if r > 0.0 { r.log2() } else { 0.0 };
                child.estimated_cost() + r * log2_r * 0.01
            },
            PlanNode::Limit { child, .. } => child.estimated_cost() + 0.001,
            PlanNode::Aggregate { child, .. } => {
                child.estimated_cost() + child.estimated_rows() as f64 * 0.02
            },
            PlanNode::Window { child } => {
                child.estimated_cost() + child.estimated_rows() as f64 * 0.03
            },
            PlanNode::CTEScan { stored_rows, .. } => *stored_rows as f64 * 0.001,
            PlanNode::Dual => 0.001,
            PlanNode::TableFunction { .. } => 1.0,
        }
    }

    pub fn estimated_rows(&self) -> u64 {
        match self {
            PlanNode::TableScan { row_count, .. } => *row_count,
            PlanNode::SubqueryScan { child, .. } => child.estimated_rows(),
            PlanNode::IndexScan { rows, .. } => *rows,
            PlanNode::Filter { child, selectivity, .. } => {
                (child.estimated_rows() as f64 * selectivity) as u64
            },
            PlanNode::Projection { child, .. } => child.estimated_rows(),
            PlanNode::NestedLoopJoin { left, right, .. }
            | PlanNode::HashJoin { left, right, .. } => {
                left.estimated_rows().min(right.estimated_rows())
            },
            PlanNode::Sort { child, .. } => child.estimated_rows(),
            PlanNode::Limit { child, .. } => child.estimated_rows() / 2,
            PlanNode::Aggregate { child, .. } => (child.estimated_rows() as f64).sqrt().ceil() as u64,
            PlanNode::Window { child } => child.estimated_rows(),
            PlanNode::CTEScan { stored_rows, .. } => *stored_rows,
            PlanNode::Dual => 1,
            PlanNode::TableFunction { known_rows, .. } => known_rows.unwrap_or(10),
        }
    }

    /// Walks the plan tree and collects every base-table name reachable
    /// from `TableScan`/`IndexScan` leaves, in tree order (duplicates kept
    /// if a table is scanned more than once).
    pub fn base_table_names(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_base_tables(&mut out);
        out
    }

    fn collect_base_tables(&self, out: &mut Vec<String>) {
        match self {
            PlanNode::TableScan { table_name, .. } => out.push(table_name.clone()),
            PlanNode::IndexScan { table_name, .. } => out.push(table_name.clone()),
            PlanNode::SubqueryScan { child, .. } => child.collect_base_tables(out),
            PlanNode::Filter { child, .. }
            | PlanNode::Projection { child, .. }
            | PlanNode::Sort { child, .. }
            | PlanNode::Limit { child, .. }
            | PlanNode::Aggregate { child, .. }
            | PlanNode::Window { child } => child.collect_base_tables(out),
            PlanNode::NestedLoopJoin { left, right, .. }
            | PlanNode::HashJoin { left, right, .. } => {
                left.collect_base_tables(out);
                right.collect_base_tables(out);
            },
            PlanNode::CTEScan { .. } | PlanNode::Dual | PlanNode::TableFunction { .. } => {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(rows: u64) -> PlanNode {
        PlanNode::TableScan {
            table_name: "t".into(),
            row_count: rows,
            total_columns: 3,
            required_columns: Vec::new(),
        }
    }

    #[test]
    fn empty_table_scan_has_positive_cost_and_zero_rows() {
        let n = scan(0);
        assert!(n.estimated_cost() > 0.0);
        assert_eq!(n.estimated_rows(), 0);
    }

    #[test]
    fn dual_is_one_row() {
        assert_eq!(PlanNode::Dual.estimated_rows(), 1);
        assert!(PlanNode::Dual.estimated_cost() > 0.0);
    }

    #[test]
    fn filter_applies_selectivity_floor() {
        let filter = PlanNode::Filter {
            child: Box::new(scan(1_000)),
            condition: Expression::column("x"),
            selectivity: 0.1,
        };
        assert_eq!(filter.estimated_rows(), 100);
    }

    #[test]
    fn join_rows_is_min_of_children() {
        let join = PlanNode::NestedLoopJoin {
            left: Box::new(scan(10)),
            right: Box::new(scan(1_000)),
            join_type: JoinType::Inner,
            condition: None,
        };
        assert_eq!(join.estimated_rows(), 10);
    }

    #[test]
    fn base_table_names_preserves_multiset_across_join_tree() {
        let join = PlanNode::NestedLoopJoin {
            left: Box::new(PlanNode::NestedLoopJoin {
                left: Box::new(scan(10)),
                right: Box::new(PlanNode::TableScan {
                    table_name: "c".into(),
                    row_count: 100,
                    total_columns: 2,
                    required_columns: Vec::new(),
                }),
                join_type: JoinType::Inner,
                condition: None,
            }),
            right: Box::new(PlanNode::TableScan {
                table_name: "d".into(),
                row_count: 50,
                total_columns: 2,
                required_columns: Vec::new(),
            }),
            join_type: JoinType::Inner,
            condition: None,
        };
        let mut names = join.base_table_names();
        names.sort();
        assert_eq!(names, vec!["c".to_string(), "d".to_string(), "t".to_string()]);
    }

    #[test]
    fn all_nodes_have_nonnegative_cost_and_rows() {
        let nodes = vec![
            scan(0),
            scan(10),
            PlanNode::Dual,
            PlanNode::Limit {
                child: Box::new(scan(10)),
                limit: None,
            },
            PlanNode::Sort {
                child: Box::new(scan(10)),
                order_by: Vec::new(),
            },
        ];
        for n in nodes {
            assert!(n.estimated_cost() >= 0.0);
            // u64 is always >= 0; this documents the invariant explicitly.
            let _: u64 = n.estimated_rows();
        }
    }
}
