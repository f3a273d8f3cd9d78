//! Per-table and per-column cardinality statistics consulted by the cost
//! model. Histogram buckets are carried as an opaque ordered list; nothing
//! in this core searches into them today (see [`HistogramBucket`]).

use value::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct TableStatistics {
    pub row_count: u64,
    /// Unix timestamp (seconds) of the last ANALYZE that produced these
    /// numbers.
    pub last_analyzed: i64,
    pub columns: std::collections::BTreeMap<String, ColumnStatistics>,
}

impl TableStatistics {
    pub fn empty(row_count: u64, last_analyzed: i64) -> Self {
        Self {
            row_count,
            last_analyzed,
            columns: std::collections::BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStatistics {
    pub distinct_count: u64,
    pub null_count: u64,
    pub avg_byte_width: f64,
    pub min_value: Option<Value>,
    pub max_value: Option<Value>,
    /// Ordered, non-overlapping buckets covering the observed value range.
    /// Opaque to the cost model today; a future selectivity refinement may
    /// binary-search into this list.
    pub histogram: Vec<HistogramBucket>,
}

impl ColumnStatistics {
    pub fn new(distinct_count: u64, null_count: u64) -> Self {
        Self {
            distinct_count,
            null_count,
            avg_byte_width: 0.0,
            min_value: None,
            max_value: None,
            histogram: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBucket {
    pub lower_bound: Value,
    pub upper_bound: Value,
    pub row_count: u64,
    pub distinct_count: u64,
}
