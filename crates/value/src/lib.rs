//! The value/type system the planner treats as an external collaborator:
//! declared column types ([`ColumnType`]) and the runtime [`Value`]s that
//! appear as literals, defaults, and statistics bounds, with a total order
//! across heterogeneous variants for partial-index predicate implication.

mod column_type;
mod numeric;
mod value;

pub use column_type::ColumnType;
pub use numeric::is_integral;
pub use value::Value;
