use crate::schema::TableSchema;

/// Generate an idempotent CREATE TABLE statement for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", schema.name);

    let mut columns: Vec<String> = schema
        .columns
        .iter()
        .map(|col| {
            let pk = if col.primary_key { " PRIMARY KEY" } else { "" };
            let null_constraint = if !col.nullable && !col.primary_key {
                " NOT NULL"
            } else {
                ""
            };
            format!("    {} {}{}{}", col.name, col.col_type.sql_type(), pk, null_constraint)
        })
        .collect();

    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for foreign key columns
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .foreign_keys
        .iter()
        .map(|fk| {
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{}_{} ON {}({})",
                schema.name, fk.column, schema.name, fk.column
            )
        })
        .collect()
}
