mod lookup_table;
mod parser;

pub use lookup_table::{LookupTable, LookupTableConfig, LookupTableRound};
pub use parser::{PersistedTables, VerbParser};
