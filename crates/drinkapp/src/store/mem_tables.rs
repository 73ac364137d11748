use super::tables::{Filter, Row, Select, TableClient};
use crate::date;
use crate::error::{DrinkError, Result};
use chrono::Utc;
use serde_json::Value;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableOp {
    Select,
    Insert,
    Update,
    Delete,
}

/// Foreign key from `child.foreign_key` to `parent.id`, deleted with the parent.
#[derive(Debug, Clone)]
struct Relation {
    child: String,
    foreign_key: String,
    parent: String,
}

/// In-memory relational backend for testing.
///
/// Behaves like the hosted schema where it matters to callers: ids are
/// generated uuids, `created_at`/`updated_at` are maintained, child rows must
/// reference an existing parent, and deleting a parent cascades. Individual
/// operations on a table can be made to fail.
#[derive(Default)]
pub struct MemTables {
    tables: RefCell<HashMap<String, Vec<Row>>>,
    relations: Vec<Relation>,
    failing: RefCell<HashSet<(TableOp, String)>>,
    calls: RefCell<Vec<(TableOp, String)>>,
}

impl MemTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `child.foreign_key` as referencing `parent.id` with cascading delete.
    pub fn with_cascade(mut self, child: &str, foreign_key: &str, parent: &str) -> Self {
        self.relations.push(Relation {
            child: child.to_string(),
            foreign_key: foreign_key.to_string(),
            parent: parent.to_string(),
        });
        self
    }

    /// Make every `op` on `table` fail until [`MemTables::clear_failures`].
    pub fn fail_on(&self, op: TableOp, table: &str) {
        self.failing.borrow_mut().insert((op, table.to_string()));
    }

    pub fn clear_failures(&self) {
        self.failing.borrow_mut().clear();
    }

    /// Every operation attempted so far, in order.
    pub fn calls(&self) -> Vec<(TableOp, String)> {
        self.calls.borrow().clone()
    }

    /// Raw rows of a table, without embedding.
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables.borrow().get(table).cloned().unwrap_or_default()
    }

    fn enter(&self, op: TableOp, table: &str) -> Result<()> {
        self.calls.borrow_mut().push((op, table.to_string()));
        if self.failing.borrow().contains(&(op, table.to_string())) {
            return Err(DrinkError::Remote {
                status: 500,
                message: format!("Simulated {:?} failure on {}", op, table),
            });
        }
        Ok(())
    }

    fn check_references(&self, table: &str, row: &Row) -> Result<()> {
        let tables = self.tables.borrow();
        for rel in self.relations.iter().filter(|r| r.child == table) {
            let target = row.get(&rel.foreign_key).cloned().unwrap_or(Value::Null);
            let exists = tables
                .get(&rel.parent)
                .is_some_and(|rows| rows.iter().any(|p| Filter::eq("id", target.clone()).matches(p)));
            if !exists {
                return Err(DrinkError::Remote {
                    status: 409,
                    message: format!(
                        "insert on {} violates foreign key {} -> {}",
                        table, rel.foreign_key, rel.parent
                    ),
                });
            }
        }
        Ok(())
    }

    fn remove_matching(&self, table: &str, filters: &[Filter]) -> Vec<Row> {
        let removed = {
            let mut tables = self.tables.borrow_mut();
            let rows = tables.entry(table.to_string()).or_default();
            let (removed, kept): (Vec<Row>, Vec<Row>) = rows
                .drain(..)
                .partition(|row| filters.iter().all(|f| f.matches(row)));
            *rows = kept;
            removed
        };

        for rel in self.relations.iter().filter(|r| r.parent == table) {
            for parent in &removed {
                if let Some(id) = parent.get("id") {
                    self.remove_matching(&rel.child, &[Filter::eq(rel.foreign_key.clone(), id.clone())]);
                }
            }
        }
        removed
    }
}

fn now() -> Value {
    Value::String(date::to_wire(&Utc::now()))
}

/// Dates stored as wire strings compare as instants; other values by type.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => {
            match (date::parse_wire(x), date::parse_wire(y)) {
                (Ok(dx), Ok(dy)) => dx.cmp(&dy),
                _ => x.cmp(y),
            }
        }
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

impl TableClient for MemTables {
    async fn select(&self, table: &str, query: &Select) -> Result<Vec<Row>> {
        self.enter(TableOp::Select, table)?;
        let tables = self.tables.borrow();
        let mut rows: Vec<Row> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| f.matches(row)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare_values(a.get(&order.column), b.get(&order.column));
                if order.descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }

        if let Some(embed) = &query.embed {
            let children = tables.get(&embed.table).cloned().unwrap_or_default();
            for row in rows.iter_mut() {
                let id = row.get("id").cloned().unwrap_or(Value::Null);
                let filter = Filter::eq(embed.foreign_key.clone(), id);
                let nested: Vec<Value> = children
                    .iter()
                    .filter(|child| filter.matches(child))
                    .cloned()
                    .map(Value::Object)
                    .collect();
                row.insert(embed.table.clone(), Value::Array(nested));
            }
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>> {
        self.enter(TableOp::Insert, table)?;
        for row in &rows {
            self.check_references(table, row)?;
        }

        let stamp = now();
        let stored: Vec<Row> = rows
            .into_iter()
            .map(|mut row| {
                row.entry("id")
                    .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
                row.insert("created_at".to_string(), stamp.clone());
                row.insert("updated_at".to_string(), stamp.clone());
                row
            })
            .collect();

        self.tables
            .borrow_mut()
            .entry(table.to_string())
            .or_default()
            .extend(stored.iter().cloned());
        Ok(stored)
    }

    async fn update(&self, table: &str, values: Row, filters: &[Filter]) -> Result<Vec<Row>> {
        self.enter(TableOp::Update, table)?;
        let stamp = now();
        let mut tables = self.tables.borrow_mut();
        let mut updated = Vec::new();
        for row in tables.entry(table.to_string()).or_default().iter_mut() {
            if filters.iter().all(|f| f.matches(row)) {
                for (column, value) in &values {
                    row.insert(column.clone(), value.clone());
                }
                row.insert("updated_at".to_string(), stamp.clone());
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<()> {
        self.enter(TableOp::Delete, table)?;
        self.remove_matching(table, filters);
        Ok(())
    }
}
