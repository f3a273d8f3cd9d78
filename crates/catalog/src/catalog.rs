//! [`Catalog`]: the process-local, reader/writer-locked registry of
//! tables, indexes, views, triggers, and statistics.
//!
//! All mutating operations take the exclusive lock and perform a single
//! in-memory map update; nothing here blocks on I/O. Lookups take the
//! shared lock. See the module docs in `lib.rs` for the registry pattern
//! this generalizes.

use std::collections::BTreeMap;

use anyhow::Result;
use errors::ErrorMetadata;
use parking_lot::RwLock;

use crate::schema::{
    ForeignKeyAction,
    ForeignKeyRef,
    IndexDef,
    TableDef,
    TriggerDef,
    TriggerEvent,
    TriggerTiming,
    ViewDef,
};
use crate::statistics::TableStatistics;

#[derive(Debug, Default)]
struct CatalogState {
    tables: BTreeMap<String, TableDef>,
    indexes: BTreeMap<String, IndexDef>,
    views: BTreeMap<String, ViewDef>,
    /// Insertion order matters here: triggers sharing a (table, timing,
    /// event) fire in the order they were created.
    triggers: Vec<TriggerDef>,
    statistics: BTreeMap<String, TableStatistics>,
}

/// A foreign-key reference discovered while scanning the catalog for
/// constraints pointing at a given (table, column).
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyReference {
    pub referencing_table: String,
    pub referencing_columns: Vec<String>,
    pub on_delete: ForeignKeyAction,
    pub on_update: ForeignKeyAction,
}

#[derive(Debug, Default)]
pub struct Catalog {
    state: RwLock<CatalogState>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- tables ----------------------------------------------------

    #[tracing::instrument(level = "debug", skip(self, def), fields(table = %def.name))]
    pub fn create_table(&self, def: TableDef) -> Result<()> {
        let mut state = self.state.write();
        if state.tables.contains_key(&def.name) {
            return Err(ErrorMetadata::already_exists(
                "TableExists",
                format!("table {:?} already exists", def.name),
            )
            .into());
        }
        state.tables.insert(def.name.clone(), def);
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn drop_table(&self, name: &str) -> Result<()> {
        let mut state = self.state.write();
        if state.tables.remove(name).is_none() {
            return Err(table_not_found(name));
        }
        // Dropping a table removes its statistics entry. Indexes and
        // triggers referring to the dropped table are left in place; the
        // caller owns cascading those (see the catalog's open questions).
        state.statistics.remove(name);
        tracing::debug!("dropped table");
        Ok(())
    }

    pub fn get_table(&self, name: &str) -> Option<TableDef> {
        self.state.read().tables.get(name).cloned()
    }

    pub fn list_tables(&self) -> Vec<String> {
        self.state.read().tables.keys().cloned().collect()
    }

    pub fn add_column(
        &self,
        table: &str,
        col: crate::schema::ColumnDef,
    ) -> Result<()> {
        let mut state = self.state.write();
        let def = state
            .tables
            .get_mut(table)
            .ok_or_else(|| table_not_found(table))?;
        if def.column(&col.name).is_some() {
            return Err(ErrorMetadata::already_exists(
                "ColumnExists",
                format!("column {:?} already exists on table {:?}", col.name, table),
            )
            .into());
        }
        def.columns.push(col);
        Ok(())
    }

    pub fn drop_column(&self, table: &str, column: &str) -> Result<()> {
        let mut state = self.state.write();
        let def = state
            .tables
            .get_mut(table)
            .ok_or_else(|| table_not_found(table))?;
        let before = def.columns.len();
        def.columns.retain(|c| c.name != column);
        if def.columns.len() == before {
            return Err(column_not_found(table, column));
        }
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn rename_table(&self, old: &str, new: &str) -> Result<()> {
        let mut state = self.state.write();
        if state.tables.contains_key(new) {
            return Err(ErrorMetadata::already_exists(
                "TableExists",
                format!("table {new:?} already exists"),
            )
            .into());
        }
        let mut def = state
            .tables
            .remove(old)
            .ok_or_else(|| table_not_found(old))?;
        def.name = new.to_string();
        state.tables.insert(new.to_string(), def);
        if let Some(stats) = state.statistics.remove(old) {
            state.statistics.insert(new.to_string(), stats);
        }
        Ok(())
    }

    // ---- indexes -----------------------------------------------------

    #[tracing::instrument(level = "debug", skip(self, def), fields(index = %def.name, table = %def.table_name))]
    pub fn create_index(&self, def: IndexDef) -> Result<()> {
        let mut state = self.state.write();
        if state.indexes.contains_key(&def.name) {
            return Err(ErrorMetadata::already_exists(
                "IndexExists",
                format!("index {:?} already exists", def.name),
            )
            .into());
        }
        state.indexes.insert(def.name.clone(), def);
        Ok(())
    }

    pub fn drop_index(&self, name: &str) -> Result<()> {
        let mut state = self.state.write();
        if state.indexes.remove(name).is_none() {
            return Err(index_not_found(name));
        }
        Ok(())
    }

    pub fn get_index(&self, name: &str) -> Option<IndexDef> {
        self.state.read().indexes.get(name).cloned()
    }

    pub fn list_indexes(&self) -> Vec<String> {
        self.state.read().indexes.keys().cloned().collect()
    }

    /// Indexes on `table`, sorted by index name.
    pub fn get_indexes_for_table(&self, table: &str) -> Vec<IndexDef> {
        self.state
            .read()
            .indexes
            .values()
            .filter(|idx| idx.table_name == table)
            .cloned()
            .collect()
    }

    /// The first index (by name, since [`get_indexes_for_table`] is
    /// sorted) that contains `column` in *any* position, not necessarily
    /// as a leftmost prefix. See the catalog's open questions: this may
    /// surface an index whose cost is misleading for a non-prefix match.
    pub fn get_index_by_column(&self, table: &str, column: &str) -> Option<IndexDef> {
        self.get_indexes_for_table(table)
            .into_iter()
            .find(|idx| idx.contains_column(column))
    }

    // ---- views ---------------------------------------------------------

    pub fn create_view(&self, def: ViewDef) -> Result<()> {
        let mut state = self.state.write();
        if state.views.contains_key(&def.name) {
            return Err(ErrorMetadata::already_exists(
                "ViewExists",
                format!("view {:?} already exists", def.name),
            )
            .into());
        }
        state.views.insert(def.name.clone(), def);
        Ok(())
    }

    pub fn drop_view(&self, name: &str) -> Result<()> {
        let mut state = self.state.write();
        if state.views.remove(name).is_none() {
            return Err(view_not_found(name));
        }
        Ok(())
    }

    pub fn get_view(&self, name: &str) -> Option<ViewDef> {
        self.state.read().views.get(name).cloned()
    }

    pub fn list_views(&self) -> Vec<String> {
        self.state.read().views.keys().cloned().collect()
    }

    // ---- triggers --------------------------------------------------

    pub fn create_trigger(&self, def: TriggerDef) -> Result<()> {
        let mut state = self.state.write();
        if state.triggers.iter().any(|t| t.name == def.name) {
            return Err(ErrorMetadata::already_exists(
                "TriggerExists",
                format!("trigger {:?} already exists", def.name),
            )
            .into());
        }
        state.triggers.push(def);
        Ok(())
    }

    pub fn drop_trigger(&self, name: &str) -> Result<()> {
        let mut state = self.state.write();
        let before = state.triggers.len();
        state.triggers.retain(|t| t.name != name);
        if state.triggers.len() == before {
            return Err(trigger_not_found(name));
        }
        Ok(())
    }

    pub fn get_trigger(&self, name: &str) -> Option<TriggerDef> {
        self.state
            .read()
            .triggers
            .iter()
            .find(|t| t.name == name)
            .cloned()
    }

    pub fn list_triggers(&self) -> Vec<String> {
        let mut names: Vec<String> =
            self.state.read().triggers.iter().map(|t| t.name.clone()).collect();
        names.sort();
        names
    }

    /// Triggers on `table` for the given (timing, event), in creation
    /// order — the order they fire in.
    pub fn get_triggers_for_table(
        &self,
        table: &str,
        timing: TriggerTiming,
        event: TriggerEvent,
    ) -> Vec<TriggerDef> {
        self.state
            .read()
            .triggers
            .iter()
            .filter(|t| t.table_name == table && t.timing == timing && t.event == event)
            .cloned()
            .collect()
    }

    // ---- statistics --------------------------------------------------

    pub fn get_table_statistics(&self, table: &str) -> Option<TableStatistics> {
        self.state.read().statistics.get(table).cloned()
    }

    #[tracing::instrument(level = "debug", skip(self, stats))]
    pub fn update_table_statistics(&self, table: &str, stats: TableStatistics) -> Result<()> {
        let mut state = self.state.write();
        if !state.tables.contains_key(table) {
            return Err(table_not_found(table));
        }
        tracing::debug!(row_count = stats.row_count, "updated table statistics");
        state.statistics.insert(table.to_string(), stats);
        Ok(())
    }

    // ---- foreign keys --------------------------------------------------

    /// Foreign-key references across the whole catalog that point at
    /// `(table, column)`, scanning both column-level and table-level
    /// constraints of every table.
    pub fn get_foreign_key_references(
        &self,
        table: &str,
        column: &str,
    ) -> Vec<ForeignKeyReference> {
        let state = self.state.read();
        let mut out = Vec::new();
        for def in state.tables.values() {
            for col in &def.columns {
                for constraint in &col.constraints {
                    if let crate::schema::Constraint::ForeignKey(fk) = constraint {
                        if fk.ref_table == table && fk.ref_column == column {
                            out.push(ForeignKeyReference {
                                referencing_table: def.name.clone(),
                                referencing_columns: vec![col.name.clone()],
                                on_delete: fk.on_delete,
                                on_update: fk.on_update,
                            });
                        }
                    }
                }
            }
            for constraint in &def.table_constraints {
                if let crate::schema::TableConstraint::ForeignKey { columns, reference } =
                    constraint
                {
                    if reference.ref_table == table && reference.ref_column == column {
                        out.push(ForeignKeyReference {
                            referencing_table: def.name.clone(),
                            referencing_columns: columns.clone(),
                            on_delete: reference.on_delete,
                            on_update: reference.on_update,
                        });
                    }
                }
            }
        }
        out
    }
}

fn table_not_found(name: &str) -> anyhow::Error {
    ErrorMetadata::not_found("TableNotFound", format!("table {name:?} not found")).into()
}

fn column_not_found(table: &str, column: &str) -> anyhow::Error {
    ErrorMetadata::not_found(
        "ColumnNotFound",
        format!("column {column:?} not found on table {table:?}"),
    )
    .into()
}

fn index_not_found(name: &str) -> anyhow::Error {
    ErrorMetadata::not_found("IndexNotFound", format!("index {name:?} not found")).into()
}

fn view_not_found(name: &str) -> anyhow::Error {
    ErrorMetadata::not_found("ViewNotFound", format!("view {name:?} not found")).into()
}

fn trigger_not_found(name: &str) -> anyhow::Error {
    ErrorMetadata::not_found("TriggerNotFound", format!("trigger {name:?} not found")).into()
}

#[cfg(test)]
mod tests {
    use errors::ErrorMetadataAnyhowExt;

    use super::*;
    use crate::schema::ColumnDef;
    use crate::statistics::TableStatistics;
    use value::ColumnType;

    fn users_table() -> TableDef {
        let mut def = TableDef::new("users", 2);
        def.columns.push(ColumnDef::new("id", ColumnType::Int64));
        def.columns.push(ColumnDef::new("email", ColumnType::Text));
        def
    }

    #[test]
    fn create_table_rejects_duplicates() {
        let catalog = Catalog::new();
        catalog.create_table(users_table()).unwrap();
        let err = catalog.create_table(users_table()).unwrap_err();
        assert!(err.is_already_exists());
    }

    #[test]
    fn drop_table_removes_statistics() {
        let catalog = Catalog::new();
        catalog.create_table(users_table()).unwrap();
        catalog
            .update_table_statistics("users", TableStatistics::empty(10, 0))
            .unwrap();
        assert!(catalog.get_table_statistics("users").is_some());

        catalog.drop_table("users").unwrap();
        assert!(catalog.get_table("users").is_none());
        assert!(catalog.get_table_statistics("users").is_none());
    }

    #[test]
    fn drop_table_missing_is_not_found() {
        let catalog = Catalog::new();
        let err = catalog.drop_table("ghost").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn rename_table_rekeys_statistics_and_round_trips() {
        let catalog = Catalog::new();
        catalog.create_table(users_table()).unwrap();
        catalog
            .update_table_statistics("users", TableStatistics::empty(5, 0))
            .unwrap();

        catalog.rename_table("users", "accounts").unwrap();
        assert!(catalog.get_table("users").is_none());
        assert!(catalog.get_table("accounts").is_some());
        assert!(catalog.get_table_statistics("accounts").is_some());

        catalog.rename_table("accounts", "users").unwrap();
        let restored = catalog.get_table("users").unwrap();
        assert_eq!(restored, users_table());
        assert!(catalog.get_table_statistics("users").is_some());
    }

    #[test]
    fn list_tables_is_lexicographically_sorted() {
        let catalog = Catalog::new();
        catalog.create_table(TableDef::new("zebra", 1)).unwrap();
        catalog.create_table(TableDef::new("alpha", 2)).unwrap();
        catalog.create_table(TableDef::new("mid", 3)).unwrap();
        assert_eq!(catalog.list_tables(), vec!["alpha", "mid", "zebra"]);
    }

    #[test]
    fn add_and_drop_column() {
        let catalog = Catalog::new();
        catalog.create_table(users_table()).unwrap();
        catalog
            .add_column("users", ColumnDef::new("status", ColumnType::Text))
            .unwrap();
        let def = catalog.get_table("users").unwrap();
        assert!(def.column("status").is_some());

        catalog.drop_column("users", "status").unwrap();
        let def = catalog.get_table("users").unwrap();
        assert!(def.column("status").is_none());

        let err = catalog.drop_column("users", "status").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn get_indexes_for_table_sorted_by_name() {
        let catalog = Catalog::new();
        catalog.create_table(users_table()).unwrap();
        catalog
            .create_index(IndexDef::btree("idx_z", "users", 10))
            .unwrap();
        catalog
            .create_index(IndexDef::btree("idx_a", "users", 11))
            .unwrap();
        let names: Vec<_> = catalog
            .get_indexes_for_table("users")
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["idx_a", "idx_z"]);
    }

    #[test]
    fn get_index_by_column_matches_any_position() {
        let catalog = Catalog::new();
        catalog.create_table(users_table()).unwrap();
        let mut idx = IndexDef::btree("idx_email_id", "users", 10);
        idx.columns = vec!["email".into(), "id".into()];
        catalog.create_index(idx).unwrap();

        assert!(catalog.get_index_by_column("users", "id").is_some());
        assert!(catalog.get_index_by_column("users", "email").is_some());
        assert!(catalog.get_index_by_column("users", "nope").is_none());
    }

    #[test]
    fn triggers_preserve_creation_order() {
        let catalog = Catalog::new();
        catalog.create_table(users_table()).unwrap();
        for name in ["t_first", "t_second", "t_third"] {
            catalog
                .create_trigger(TriggerDef {
                    name: name.into(),
                    table_name: "users".into(),
                    timing: TriggerTiming::Before,
                    event: TriggerEvent::Insert,
                    body_sql: "SELECT 1".into(),
                })
                .unwrap();
        }
        let ordered: Vec<_> = catalog
            .get_triggers_for_table("users", TriggerTiming::Before, TriggerEvent::Insert)
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(ordered, vec!["t_first", "t_second", "t_third"]);
    }

    #[test]
    fn foreign_key_references_are_discovered_across_tables() {
        let catalog = Catalog::new();
        catalog.create_table(users_table()).unwrap();

        let mut orders = TableDef::new("orders", 3);
        let mut user_id_col = ColumnDef::new("user_id", ColumnType::Int64);
        user_id_col
            .constraints
            .push(crate::schema::Constraint::ForeignKey(ForeignKeyRef {
                ref_table: "users".into(),
                ref_column: "id".into(),
                on_delete: ForeignKeyAction::Cascade,
                on_update: ForeignKeyAction::NoAction,
            }));
        orders.columns.push(user_id_col);
        catalog.create_table(orders).unwrap();

        let refs = catalog.get_foreign_key_references("users", "id");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].referencing_table, "orders");
        assert_eq!(refs[0].referencing_columns, vec!["user_id".to_string()]);
        assert_eq!(refs[0].on_delete, ForeignKeyAction::Cascade);
    }
}

#[cfg(any(test, feature = "testing"))]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    fn table_name_strategy() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,8}"
    }

    proptest! {
        /// However many distinct table names get created, `list_tables`
        /// always comes back in strictly ascending lexicographic order.
        #[test]
        fn list_tables_always_sorted(mut names in prop::collection::vec(table_name_strategy(), 1..12)) {
            names.sort();
            names.dedup();
            let catalog = Catalog::new();
            for name in &names {
                catalog.create_table(TableDef::new(name.clone(), 1)).unwrap();
            }
            let listed = catalog.list_tables();
            let mut expected = listed.clone();
            expected.sort();
            prop_assert_eq!(&listed, &expected);
        }

        /// Renaming a table away and then back restores both the table
        /// definition and its statistics under the original name.
        #[test]
        fn rename_round_trip_restores_state(
            old in table_name_strategy(),
            new in table_name_strategy(),
            row_count in 0u64..1_000_000,
        ) {
            prop_assume!(old != new);
            let catalog = Catalog::new();
            catalog.create_table(TableDef::new(old.clone(), 1)).unwrap();
            catalog
                .update_table_statistics(&old, TableStatistics::empty(row_count, 0))
                .unwrap();

            catalog.rename_table(&old, &new).unwrap();
            catalog.rename_table(&new, &old).unwrap();

            prop_assert!(catalog.get_table(&old).is_some());
            prop_assert_eq!(
                catalog.get_table_statistics(&old).map(|s| s.row_count),
                Some(row_count)
            );
        }

        /// A failed mutation (duplicate create) never changes what a
        /// subsequent lookup observes.
        #[test]
        fn failed_create_leaves_catalog_unchanged(name in table_name_strategy()) {
            let catalog = Catalog::new();
            catalog.create_table(TableDef::new(name.clone(), 1)).unwrap();
            let before = catalog.get_table(&name);

            let err = catalog.create_table(TableDef::new(name.clone(), 2)).unwrap_err();
            prop_assert!(err.is_already_exists());
            prop_assert_eq!(catalog.get_table(&name), before);
        }
    }
}
