use super::tables::{get_table, ALL_TABLES};
use super::types::TableSchema;
use crate::error::{EtlError, Result};
use std::collections::{HashMap, HashSet};

/// Orders tables so that FK parents are created and loaded before children
pub struct DependencyResolver {
    /// Map of table name -> tables it depends on
    deps: HashMap<&'static str, HashSet<&'static str>>,
}

impl DependencyResolver {
    pub fn new() -> Self {
        let deps = ALL_TABLES
            .iter()
            .map(|table| (table.name, table.dependencies()))
            .collect();

        Self { deps }
    }

    /// Return all tables in dependency order (parents before children).
    ///
    /// Ties are broken by declaration order in `ALL_TABLES` so the order is stable.
    pub fn load_order(&self) -> Result<Vec<&'static TableSchema>> {
        let mut result = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut temp_visited: HashSet<&str> = HashSet::new();

        let mut names: Vec<&'static str> = ALL_TABLES.iter().map(|t| t.name).collect();
        // Visit independent tables first so dimensions keep their declared order
        names.sort_by_key(|name| self.deps.get(name).map_or(0, |d| d.len()));

        for table_name in names {
            self.visit(table_name, &mut visited, &mut temp_visited, &mut result)?;
        }

        Ok(result)
    }

    fn visit<'a>(
        &self,
        name: &'a str,
        visited: &mut HashSet<&'a str>,
        temp_visited: &mut HashSet<&'a str>,
        result: &mut Vec<&'static TableSchema>,
    ) -> Result<()> {
        if temp_visited.contains(name) {
            return Err(EtlError::CircularDependency(name.to_string()));
        }
        if visited.contains(name) {
            return Ok(());
        }

        temp_visited.insert(name);

        if let Some(deps) = self.deps.get(name) {
            let mut deps: Vec<&'static str> = deps.iter().copied().collect();
            deps.sort_unstable();
            for dep in deps {
                if dep != name {
                    self.visit(dep, visited, temp_visited, result)?;
                }
            }
        }

        temp_visited.remove(name);
        visited.insert(name);

        if let Some(table) = get_table(name) {
            result.push(table);
        }

        Ok(())
    }
}

impl Default for DependencyResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Table names in load order
pub fn table_names() -> Result<Vec<&'static str>> {
    Ok(DependencyResolver::new()
        .load_order()?
        .into_iter()
        .map(|t| t.name)
        .collect())
}
