//! Logical schema object definitions: columns, tables, indexes, views,
//! and triggers.

use value::{
    ColumnType,
    Value,
};

/// One column of a [`TableDef`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub value_type: ColumnType,
    pub default: Option<Value>,
    /// Column-level constraints, in declaration order.
    pub constraints: Vec<Constraint>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, value_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            value_type,
            default: None,
            constraints: Vec::new(),
        }
    }

    pub fn is_primary_key(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c, Constraint::PrimaryKey))
    }
}

/// A constraint attached to a column or, for the multi-column variants
/// (`PrimaryKey` over several names, `ForeignKey`, `Check`), to a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    PrimaryKey,
    Unique,
    NotNull,
    Check(String),
    ForeignKey(ForeignKeyRef),
    Default(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyRef {
    pub ref_table: String,
    pub ref_column: String,
    pub on_delete: ForeignKeyAction,
    pub on_update: ForeignKeyAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyAction {
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

/// A table-level constraint, mirroring [`Constraint`] but addressing one
/// or more columns by name (composite primary keys, composite foreign
/// keys, table-level checks).
#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraint {
    PrimaryKey(Vec<String>),
    Unique(Vec<String>),
    Check(String),
    ForeignKey {
        columns: Vec<String>,
        reference: ForeignKeyRef,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDef {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    /// Opaque handle into the storage layer; the catalog never
    /// interprets it.
    pub root_page: i64,
    pub table_constraints: Vec<TableConstraint>,
}

impl TableDef {
    pub fn new(name: impl Into<String>, root_page: i64) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            root_page,
            table_constraints: Vec::new(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    BTree,
    Hnsw,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HnswParams {
    pub m: u32,
    pub ef_construction: u32,
}

impl Default for HnswParams {
    fn default() -> Self {
        Self {
            m: 16,
            ef_construction: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexDef {
    pub name: String,
    pub table_name: String,
    /// Indexed column names, in order. Empty for a pure expression index.
    pub columns: Vec<String>,
    /// Indexed expression source strings, in order. Empty for a pure
    /// column index.
    pub expressions: Vec<String>,
    pub kind: IndexKind,
    pub unique: bool,
    pub root_page: i64,
    pub hnsw_params: Option<HnswParams>,
    /// SQL source text of the WHERE clause, for a partial index.
    pub partial_predicate: Option<String>,
}

impl IndexDef {
    pub fn btree(name: impl Into<String>, table_name: impl Into<String>, root_page: i64) -> Self {
        Self {
            name: name.into(),
            table_name: table_name.into(),
            columns: Vec::new(),
            expressions: Vec::new(),
            kind: IndexKind::BTree,
            unique: false,
            root_page,
            hnsw_params: None,
            partial_predicate: None,
        }
    }

    pub fn hnsw(name: impl Into<String>, table_name: impl Into<String>, root_page: i64) -> Self {
        Self {
            kind: IndexKind::Hnsw,
            hnsw_params: Some(HnswParams::default()),
            ..Self::btree(name, table_name, root_page)
        }
    }

    pub fn is_partial(&self) -> bool {
        self.partial_predicate.is_some()
    }

    pub fn is_expression_index(&self) -> bool {
        !self.expressions.is_empty()
    }

    /// Does this index cover `column` in any position (not necessarily
    /// as a leftmost prefix)?
    pub fn contains_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewDef {
    pub name: String,
    pub select_sql: String,
    pub column_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerTiming {
    Before,
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriggerDef {
    pub name: String,
    pub table_name: String,
    pub timing: TriggerTiming,
    pub event: TriggerEvent,
    pub body_sql: String,
}
