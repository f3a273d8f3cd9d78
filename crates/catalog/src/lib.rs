//! The schema catalog: an in-memory, reader/writer-locked registry of
//! tables, indexes, views, triggers, and per-table statistics.
//!
//! Grounded in the registry pattern the backend crate uses for its table
//! and index registries: a handful of name-keyed maps behind a single
//! lock, with read methods taking the shared lock and DDL-shaped mutation
//! methods taking the exclusive lock. This crate generalizes that pattern
//! to all four schema-object kinds plus statistics, rather than one
//! object kind per registry.

mod catalog;
mod schema;
mod statistics;

pub use catalog::{
    Catalog,
    ForeignKeyReference,
};
pub use schema::{
    ColumnDef,
    Constraint,
    ForeignKeyAction,
    ForeignKeyRef,
    HnswParams,
    IndexDef,
    IndexKind,
    TableConstraint,
    TableDef,
    TriggerDef,
    TriggerEvent,
    TriggerTiming,
    ViewDef,
};
pub use statistics::{
    ColumnStatistics,
    HistogramBucket,
    TableStatistics,
};
