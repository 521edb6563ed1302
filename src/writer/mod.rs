pub mod schema_gen;
pub mod sqlite;

pub use schema_gen::{generate_create_table, generate_indexes};
pub use sqlite::SqliteStore;
