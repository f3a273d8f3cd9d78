//! The three (four, counting index selection as its own step folded into
//! the projection-pushdown stage) rewrite passes run over a freshly built
//! plan tree: predicate pushdown, projection pushdown (which also drives
//! index selection, since it's the pass that computes `required_columns`),
//! and join reordering. Each pass is structural and idempotent.

use std::cmp::Ordering as CmpOrdering;
use std::collections::{
    HashSet,
    VecDeque,
};

use catalog::{
    Catalog,
    IndexDef,
    IndexKind,
};
use value::Value;

use crate::ast::JoinType;
use crate::cost;
use crate::expression::{
    BinaryOp,
    Expression,
};
use crate::plan::PlanNode;

/// Parses a stored partial-index predicate (SQL source text) into a list
/// of `column = literal` equality clauses, for implication checking.
/// Supplied by the upstream SQL parser; the planner only ever calls this
/// to test whether a partial index's predicate is implied by a query's
/// WHERE clause, never to build new SQL. Returns `None` when the text
/// isn't parseable by this narrow grammar, which the caller treats the
/// same as "index unusable" — it is silently skipped, never an error.
pub trait PartialPredicateParser {
    fn parse_equalities(&self, source: &str) -> Option<Vec<(String, Value)>>;
}

/// Per-query knobs for the optimizer passes that aren't part of the cost
/// model proper. `force_exhaustive_join_dp` is the "manual DP flag": when
/// set, join reordering runs the exhaustive `O(n * 2^n)` search even above
/// the [`EXHAUSTIVE_DP_LEAF_CUTOFF`]-leaf cutoff, instead of falling back
/// to the greedy heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimizerConfig {
    pub force_exhaustive_join_dp: bool,
}

/// Runs all rewrite passes over `plan` in the fixed order: predicate
/// pushdown, projection pushdown (with index selection), join reordering.
/// Running this twice on its own output produces a structurally equal
/// tree, since every pass below is idempotent on an already-rewritten
/// tree.
pub fn optimize(
    plan: PlanNode,
    catalog: &Catalog,
    predicate_parser: &dyn PartialPredicateParser,
) -> PlanNode {
    optimize_with_config(plan, catalog, predicate_parser, &OptimizerConfig::default())
}

/// Same as [`optimize`], but with the manual DP flag and any future
/// per-query knobs exposed via `config`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn optimize_with_config(
    plan: PlanNode,
    catalog: &Catalog,
    predicate_parser: &dyn PartialPredicateParser,
    config: &OptimizerConfig,
) -> PlanNode {
    tracing::debug!("running predicate pushdown");
    let plan = pushdown_predicates(plan);
    tracing::debug!("running projection pushdown");
    let plan = pushdown_projections(plan);
    tracing::debug!("running index selection");
    let plan = select_indexes(plan, catalog, predicate_parser);
    tracing::debug!(force_dp = config.force_exhaustive_join_dp, "running join reordering");
    reorder_joins_with_config(plan, catalog, config)
}

// ---- predicate pushdown --------------------------------------------------

/// `Filter(Projection(X)) -> Projection(Filter(X))`;
/// `Filter1(Filter2(X)) -> Filter(X, AND(c2, c1))` with combined
/// selectivity `s1 * s2`; recurses into join children without splitting
/// predicates across the join; otherwise reattaches the optimized child.
pub fn pushdown_predicates(node: PlanNode) -> PlanNode {
    match node {
        PlanNode::Filter {
            child,
            condition,
            selectivity,
        } => {
            let child = pushdown_predicates(*child);
            match child {
                PlanNode::Projection { child: inner, expressions } => {
                    let filter = PlanNode::Filter {
                        child: inner,
                        condition,
                        selectivity,
                    };
                    PlanNode::Projection {
                        child: Box::new(filter),
                        expressions,
                    }
                },
                PlanNode::Filter {
                    child: inner,
                    condition: inner_condition,
                    selectivity: inner_selectivity,
                } => PlanNode::Filter {
                    child: inner,
                    condition: Expression::binary(BinaryOp::And, inner_condition, condition),
                    selectivity: inner_selectivity * selectivity,
                },
                other => PlanNode::Filter {
                    child: Box::new(other),
                    condition,
                    selectivity,
                },
            }
        },
        PlanNode::NestedLoopJoin {
            left,
            right,
            join_type,
            condition,
        } => PlanNode::NestedLoopJoin {
            left: Box::new(pushdown_predicates(*left)),
            right: Box::new(pushdown_predicates(*right)),
            join_type,
            condition,
        },
        PlanNode::HashJoin {
            left,
            right,
            join_type,
            condition,
        } => PlanNode::HashJoin {
            left: Box::new(pushdown_predicates(*left)),
            right: Box::new(pushdown_predicates(*right)),
            join_type,
            condition,
        },
        PlanNode::SubqueryScan { child, alias } => PlanNode::SubqueryScan {
            child: Box::new(pushdown_predicates(*child)),
            alias,
        },
        PlanNode::Projection { child, expressions } => PlanNode::Projection {
            child: Box::new(pushdown_predicates(*child)),
            expressions,
        },
        PlanNode::Sort { child, order_by } => PlanNode::Sort {
            child: Box::new(pushdown_predicates(*child)),
            order_by,
        },
        PlanNode::Limit { child, limit } => PlanNode::Limit {
            child: Box::new(pushdown_predicates(*child)),
            limit,
        },
        PlanNode::Aggregate { child, group_by } => PlanNode::Aggregate {
            child: Box::new(pushdown_predicates(*child)),
            group_by,
        },
        PlanNode::Window { child } => PlanNode::Window {
            child: Box::new(pushdown_predicates(*child)),
        },
        leaf => leaf,
    }
}

// ---- projection pushdown --------------------------------------------------

/// Pushes the set of columns required by ancestors down the tree,
/// recording it on every `TableScan`, and collapses consecutive
/// projections.
///
/// `required` is `None` until a `Projection` is crossed on the way down:
/// absent a controlling `Projection` the query asked for every column (a
/// bare `SELECT *`), so `TableScan.required_columns` must stay empty
/// ("all columns", per its own doc comment) rather than being narrowed to
/// whatever a `Filter`'s condition happens to reference. Once a
/// `Projection` is seen, `required` becomes `Some(set)` and every `Filter`
/// / join condition below it augments that set.
pub fn pushdown_projections(node: PlanNode) -> PlanNode {
    push_required_columns(node, None)
}

fn push_required_columns(node: PlanNode, required: Option<HashSet<String>>) -> PlanNode {
    match node {
        PlanNode::Projection { child, expressions } => {
            // Projection(Projection(X)) -> Projection(X): drop the inner
            // projection's own node, keep recursing into its child.
            let child = match *child {
                PlanNode::Projection { child: inner, .. } => *inner,
                other => other,
            };
            let mut set = required.unwrap_or_default();
            for expr in &expressions {
                set.extend(expr.referenced_columns());
            }
            let child = push_required_columns(child, Some(set));
            PlanNode::Projection {
                child: Box::new(child),
                expressions,
            }
        },
        PlanNode::Filter {
            child,
            condition,
            selectivity,
        } => {
            let required = required.map(|mut set| {
                set.extend(condition.referenced_columns());
                set
            });
            let child = push_required_columns(*child, required);
            PlanNode::Filter {
                child: Box::new(child),
                condition,
                selectivity,
            }
        },
        PlanNode::NestedLoopJoin {
            left,
            right,
            join_type,
            condition,
        } => {
            let required = required.map(|mut set| {
                if let Some(cond) = &condition {
                    set.extend(cond.referenced_columns());
                }
                set
            });
            let left = push_required_columns(*left, required.clone());
            let right = push_required_columns(*right, required);
            PlanNode::NestedLoopJoin {
                left: Box::new(left),
                right: Box::new(right),
                join_type,
                condition,
            }
        },
        PlanNode::HashJoin {
            left,
            right,
            join_type,
            condition,
        } => {
            let required = required.map(|mut set| {
                if let Some(cond) = &condition {
                    set.extend(cond.referenced_columns());
                }
                set
            });
            let left = push_required_columns(*left, required.clone());
            let right = push_required_columns(*right, required);
            PlanNode::HashJoin {
                left: Box::new(left),
                right: Box::new(right),
                join_type,
                condition,
            }
        },
        PlanNode::SubqueryScan { child, alias } => PlanNode::SubqueryScan {
            child: Box::new(push_required_columns(*child, required)),
            alias,
        },
        PlanNode::Sort { child, order_by } => PlanNode::Sort {
            child: Box::new(push_required_columns(*child, required)),
            order_by,
        },
        PlanNode::Limit { child, limit } => PlanNode::Limit {
            child: Box::new(push_required_columns(*child, required)),
            limit,
        },
        PlanNode::Aggregate { child, group_by } => PlanNode::Aggregate {
            child: Box::new(push_required_columns(*child, required)),
            group_by,
        },
        PlanNode::Window { child } => PlanNode::Window {
            child: Box::new(push_required_columns(*child, required)),
        },
        PlanNode::TableScan {
            table_name,
            row_count,
            total_columns,
            ..
        } => {
            let mut required_columns: Vec<String> =
                required.map(|set| set.into_iter().collect()).unwrap_or_default();
            required_columns.sort();
            PlanNode::TableScan {
                table_name,
                row_count,
                total_columns,
                required_columns,
            }
        },
        leaf => leaf,
    }
}

// ---- index selection --------------------------------------------------

#[derive(Debug, Clone)]
enum AtomicPredicate {
    Column {
        column: String,
        op: BinaryOp,
        value: Value,
    },
    Expression(Expression),
}

fn flip_comparison(op: BinaryOp) -> BinaryOp {
    match op {
        BinaryOp::Lt => BinaryOp::Gt,
        BinaryOp::Gt => BinaryOp::Lt,
        BinaryOp::Lte => BinaryOp::Gte,
        BinaryOp::Gte => BinaryOp::Lte,
        other => other,
    }
}

fn classify_predicate(expr: &Expression) -> AtomicPredicate {
    if let Expression::BinaryExpr { op, left, right } = expr {
        if op.is_column_comparison() {
            match (left.as_ref(), right.as_ref()) {
                (Expression::ColumnRef(name), Expression::Literal(v)) => {
                    return AtomicPredicate::Column {
                        column: name.clone(),
                        op: *op,
                        value: v.clone(),
                    };
                },
                (Expression::Literal(v), Expression::ColumnRef(name)) => {
                    return AtomicPredicate::Column {
                        column: name.clone(),
                        op: flip_comparison(*op),
                        value: v.clone(),
                    };
                },
                _ => {},
            }
        }
    }
    AtomicPredicate::Expression(expr.clone())
}

/// Recursively walks the tree looking for `Filter` nodes whose child is a
/// `TableScan`, and replaces the scan with an `IndexScan` whenever a
/// cheaper index candidate is found.
pub fn select_indexes(
    node: PlanNode,
    catalog: &Catalog,
    predicate_parser: &dyn PartialPredicateParser,
) -> PlanNode {
    match node {
        PlanNode::Filter {
            child,
            condition,
            selectivity,
        } => {
            let child = select_indexes(*child, catalog, predicate_parser);
            let new_child = if let PlanNode::TableScan {
                table_name,
                row_count,
                total_columns: _,
                required_columns,
            } = &child
            {
                find_best_index_scan(
                    table_name,
                    *row_count,
                    &required_columns.clone(),
                    &condition,
                    catalog,
                    predicate_parser,
                )
                .unwrap_or(child)
            } else {
                child
            };
            PlanNode::Filter {
                child: Box::new(new_child),
                condition,
                selectivity,
            }
        },
        PlanNode::Projection { child, expressions } => PlanNode::Projection {
            child: Box::new(select_indexes(*child, catalog, predicate_parser)),
            expressions,
        },
        PlanNode::SubqueryScan { child, alias } => PlanNode::SubqueryScan {
            child: Box::new(select_indexes(*child, catalog, predicate_parser)),
            alias,
        },
        PlanNode::NestedLoopJoin {
            left,
            right,
            join_type,
            condition,
        } => PlanNode::NestedLoopJoin {
            left: Box::new(select_indexes(*left, catalog, predicate_parser)),
            right: Box::new(select_indexes(*right, catalog, predicate_parser)),
            join_type,
            condition,
        },
        PlanNode::HashJoin {
            left,
            right,
            join_type,
            condition,
        } => PlanNode::HashJoin {
            left: Box::new(select_indexes(*left, catalog, predicate_parser)),
            right: Box::new(select_indexes(*right, catalog, predicate_parser)),
            join_type,
            condition,
        },
        PlanNode::Sort { child, order_by } => PlanNode::Sort {
            child: Box::new(select_indexes(*child, catalog, predicate_parser)),
            order_by,
        },
        PlanNode::Limit { child, limit } => PlanNode::Limit {
            child: Box::new(select_indexes(*child, catalog, predicate_parser)),
            limit,
        },
        PlanNode::Aggregate { child, group_by } => PlanNode::Aggregate {
            child: Box::new(select_indexes(*child, catalog, predicate_parser)),
            group_by,
        },
        PlanNode::Window { child } => PlanNode::Window {
            child: Box::new(select_indexes(*child, catalog, predicate_parser)),
        },
        leaf => leaf,
    }
}

fn partial_index_is_implied(
    index: &IndexDef,
    atomics: &[AtomicPredicate],
    predicate_parser: &dyn PartialPredicateParser,
) -> bool {
    let Some(text) = &index.partial_predicate else {
        return true;
    };
    let Some(equalities) = predicate_parser.parse_equalities(text) else {
        return false;
    };
    equalities.iter().all(|(col, val)| {
        atomics.iter().any(|p| match p {
            AtomicPredicate::Column { column, op: BinaryOp::Eq, value } => {
                column == col && value.compare(val) == CmpOrdering::Equal
            },
            _ => false,
        })
    })
}

/// Leftmost-prefix match: walks `index.columns`, extending the matched
/// prefix as long as the next column has a query predicate. Returns the
/// prefix length and the first matched predicate (used to estimate `k`).
fn leftmost_prefix_match<'a>(
    index: &IndexDef,
    atomics: &'a [AtomicPredicate],
) -> Option<(usize, &'a AtomicPredicate)> {
    let mut prefix = 0;
    let mut first = None;
    for col in &index.columns {
        let Some(p) = atomics.iter().find(|p| matches!(p, AtomicPredicate::Column { column, .. } if column == col))
        else {
            break;
        };
        prefix += 1;
        if first.is_none() {
            first = Some(p);
        }
    }
    if prefix == 0 {
        None
    } else {
        Some((prefix, first.expect("prefix > 0 implies a match was recorded")))
    }
}

fn expression_index_matches(index: &IndexDef, atomics: &[AtomicPredicate]) -> bool {
    atomics.iter().any(|p| match p {
        AtomicPredicate::Expression(expr) => index
            .expressions
            .iter()
            .any(|src| canonicalize_source(src) == expr.canonical_source()),
        _ => false,
    })
}

fn canonicalize_source(src: &str) -> String {
    src.to_uppercase().split_whitespace().collect()
}

/// A matched candidate before cost evaluation: the first matched
/// predicate's column (if any — expression indexes have none) and
/// comparison operator, used to estimate `k`.
struct MatchedPredicate {
    column: Option<String>,
    op: BinaryOp,
}

fn find_best_index_scan(
    table_name: &str,
    row_count: u64,
    required_columns: &[String],
    condition: &Expression,
    catalog: &Catalog,
    predicate_parser: &dyn PartialPredicateParser,
) -> Option<PlanNode> {
    let atomics: Vec<AtomicPredicate> = condition
        .flatten(BinaryOp::And)
        .into_iter()
        .map(classify_predicate)
        .collect();

    let total_columns = catalog
        .get_table(table_name)
        .map(|t| t.columns.len())
        .unwrap_or(required_columns.len());
    let (table_scan_cost, _) = cost::table_scan_cost(row_count, required_columns, total_columns);

    let mut best: Option<(String, f64, u64)> = None;
    for index in catalog.get_indexes_for_table(table_name) {
        if index.is_partial() && !partial_index_is_implied(&index, &atomics, predicate_parser) {
            continue;
        }

        let matched = if index.is_expression_index() {
            if !expression_index_matches(&index, &atomics) {
                continue;
            }
            MatchedPredicate { column: None, op: BinaryOp::Eq }
        } else {
            match leftmost_prefix_match(&index, &atomics) {
                Some((_prefix, AtomicPredicate::Column { column, op, .. })) => MatchedPredicate {
                    column: Some(column.clone()),
                    op: *op,
                },
                _ => continue,
            }
        };

        let distinct_count = matched.column.as_ref().and_then(|col| {
            catalog
                .get_table_statistics(table_name)
                .and_then(|s| s.columns.get(col).map(|c| c.distinct_count))
        });

        let selectivity = if matched.op == BinaryOp::Eq {
            cost::stats_aware_equality_selectivity(distinct_count)
        } else {
            cost::default_operator_selectivity(matched.op)
        };
        let k = (row_count as f64 * selectivity) as u64;

        let candidate_cost = match index.kind {
            IndexKind::BTree => cost::btree_scan_cost(k, row_count),
            // `hnsw_params` only ever carries M and efConstruction (index
            // build-time parameters); there is no stored search-time `ef`,
            // so the cost model always falls back to its own default (100)
            // rather than conflating the two.
            IndexKind::Hnsw => cost::hnsw_scan_cost(k, row_count, None),
        };

        if !cost::index_beats_table_scan(candidate_cost, table_scan_cost) {
            continue;
        }
        if best.as_ref().map_or(true, |(_, best_cost, _)| candidate_cost < *best_cost) {
            best = Some((index.name.clone(), candidate_cost, k));
        }
    }

    best.map(|(index_name, cost, rows)| PlanNode::IndexScan {
        table_name: table_name.to_string(),
        index_name,
        cost,
        rows,
        required_columns: required_columns.to_vec(),
    })
}

// ---- join reordering --------------------------------------------------

const EXHAUSTIVE_DP_LEAF_CUTOFF: usize = 12;

fn collect_join_region(node: PlanNode, leaves: &mut Vec<PlanNode>, conditions: &mut Vec<Expression>) {
    match node {
        PlanNode::NestedLoopJoin {
            left,
            right,
            condition,
            ..
        } => {
            collect_join_region(*left, leaves, conditions);
            collect_join_region(*right, leaves, conditions);
            if let Some(c) = condition {
                conditions.push(c);
            }
        },
        other => leaves.push(other),
    }
}

fn assign_conditions(node: PlanNode, conditions: &mut VecDeque<Expression>) -> PlanNode {
    match node {
        PlanNode::NestedLoopJoin {
            left,
            right,
            join_type,
            ..
        } => {
            let left = assign_conditions(*left, conditions);
            let right = assign_conditions(*right, conditions);
            let condition = conditions.pop_front();
            PlanNode::NestedLoopJoin {
                left: Box::new(left),
                right: Box::new(right),
                join_type,
                condition,
            }
        },
        other => other,
    }
}

fn left_deep_unchanged(leaves: Vec<PlanNode>, conditions: Vec<Expression>) -> PlanNode {
    let mut iter = leaves.into_iter();
    let first = iter.next().expect("join region always has at least one leaf");
    let skeleton = iter.fold(first, |acc, next| PlanNode::NestedLoopJoin {
        left: Box::new(acc),
        right: Box::new(next),
        join_type: JoinType::Inner,
        condition: None,
    });
    let mut bag: VecDeque<Expression> = conditions.into();
    assign_conditions(skeleton, &mut bag)
}

fn leaf_cardinality(leaf: &PlanNode, catalog: &Catalog) -> u64 {
    if let PlanNode::TableScan { table_name, .. } = leaf {
        if let Some(stats) = catalog.get_table_statistics(table_name) {
            return stats.row_count;
        }
    }
    leaf.estimated_rows()
}

/// Smallest-first left-deep heuristic: sort leaves by ascending
/// cardinality and fold them left to right, which is equivalent to
/// "repeatedly take the next smallest leaf from what remains".
fn greedy_join(mut leaves: Vec<PlanNode>, catalog: &Catalog) -> PlanNode {
    leaves.sort_by_key(|l| leaf_cardinality(l, catalog));
    let mut iter = leaves.into_iter();
    let first = iter.next().expect("caller guarantees >= 3 leaves");
    iter.fold(first, |acc, next| PlanNode::NestedLoopJoin {
        left: Box::new(acc),
        right: Box::new(next),
        join_type: JoinType::Inner,
        condition: None,
    })
}

/// Exhaustive DP over subsets of `leaves`: `O(n * 2^n)`, gated by
/// [`EXHAUSTIVE_DP_LEAF_CUTOFF`].
fn dp_join(leaves: Vec<PlanNode>, catalog: &Catalog) -> PlanNode {
    let n = leaves.len();
    let full_mask = (1usize << n) - 1;
    let mut best_cost = vec![f64::INFINITY; 1 << n];
    let mut best_rows = vec![0u64; 1 << n];
    let mut best_plan: Vec<Option<PlanNode>> = vec![None; 1 << n];

    for (i, leaf) in leaves.into_iter().enumerate() {
        let mask = 1usize << i;
        best_cost[mask] = leaf.estimated_cost();
        best_rows[mask] = leaf.estimated_rows();
        best_plan[mask] = Some(leaf);
    }

    for mask in 1..=full_mask {
        if mask.count_ones() < 2 {
            continue;
        }
        let mut sub = (mask - 1) & mask;
        while sub > 0 {
            let complement = mask ^ sub;
            if let (Some(lhs), Some(rhs)) = (&best_plan[sub], &best_plan[complement]) {
                let candidate_cost = best_cost[sub] + best_rows[sub] as f64 * best_cost[complement];
                if candidate_cost < best_cost[mask] {
                    best_cost[mask] = candidate_cost;
                    best_rows[mask] = best_rows[sub].min(best_rows[complement]);
                    best_plan[mask] = Some(PlanNode::NestedLoopJoin {
                        left: Box::new(lhs.clone()),
                        right: Box::new(rhs.clone()),
                        join_type: JoinType::Inner,
                        condition: None,
                    });
                }
            }
            sub = (sub - 1) & mask;
        }
    }

    best_plan[full_mask]
        .take()
        .expect("full mask always reachable by folding every base case")
}

fn reorder_joins_rec(node: PlanNode, catalog: &Catalog, config: &OptimizerConfig) -> PlanNode {
    match node {
        PlanNode::NestedLoopJoin { .. } => {
            let mut leaves = Vec::new();
            let mut conditions = Vec::new();
            collect_join_region(node, &mut leaves, &mut conditions);
            let leaves: Vec<PlanNode> = leaves
                .into_iter()
                .map(|l| reorder_joins_rec(l, catalog, config))
                .collect();

            if leaves.len() < 3 {
                return left_deep_unchanged(leaves, conditions);
            }
            let use_dp =
                config.force_exhaustive_join_dp || leaves.len() <= EXHAUSTIVE_DP_LEAF_CUTOFF;
            tracing::trace!(
                leaves = leaves.len(),
                use_dp,
                "reordering join region"
            );
            let skeleton = if use_dp {
                dp_join(leaves, catalog)
            } else {
                greedy_join(leaves, catalog)
            };
            let mut bag: VecDeque<Expression> = conditions.into();
            assign_conditions(skeleton, &mut bag)
        },
        PlanNode::HashJoin {
            left,
            right,
            join_type,
            condition,
        } => PlanNode::HashJoin {
            left: Box::new(reorder_joins_rec(*left, catalog, config)),
            right: Box::new(reorder_joins_rec(*right, catalog, config)),
            join_type,
            condition,
        },
        PlanNode::SubqueryScan { child, alias } => PlanNode::SubqueryScan {
            child: Box::new(reorder_joins_rec(*child, catalog, config)),
            alias,
        },
        PlanNode::Filter {
            child,
            condition,
            selectivity,
        } => PlanNode::Filter {
            child: Box::new(reorder_joins_rec(*child, catalog, config)),
            condition,
            selectivity,
        },
        PlanNode::Projection { child, expressions } => PlanNode::Projection {
            child: Box::new(reorder_joins_rec(*child, catalog, config)),
            expressions,
        },
        PlanNode::Sort { child, order_by } => PlanNode::Sort {
            child: Box::new(reorder_joins_rec(*child, catalog, config)),
            order_by,
        },
        PlanNode::Limit { child, limit } => PlanNode::Limit {
            child: Box::new(reorder_joins_rec(*child, catalog, config)),
            limit,
        },
        PlanNode::Aggregate { child, group_by } => PlanNode::Aggregate {
            child: Box::new(reorder_joins_rec(*child, catalog, config)),
            group_by,
        },
        PlanNode::Window { child } => PlanNode::Window {
            child: Box::new(reorder_joins_rec(*child, catalog, config)),
        },
        leaf => leaf,
    }
}

pub fn reorder_joins(node: PlanNode, catalog: &Catalog) -> PlanNode {
    reorder_joins_with_config(node, catalog, &OptimizerConfig::default())
}

/// Same as [`reorder_joins`], but honoring the manual DP flag in `config`.
pub fn reorder_joins_with_config(
    node: PlanNode,
    catalog: &Catalog,
    config: &OptimizerConfig,
) -> PlanNode {
    reorder_joins_rec(node, catalog, config)
}
