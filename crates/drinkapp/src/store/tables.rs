use crate::error::Result;
use serde_json::{Map, Value};

/// One table row as returned by the backend: column name to JSON value.
pub type Row = Map<String, Value>;

/// Equality filter on a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        row.get(&self.column).is_some_and(|v| same_value(v, &self.value))
    }
}

/// Ids may come back as numbers or strings depending on the schema.
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(s), Value::Number(n)) | (Value::Number(n), Value::String(s)) => {
            n.to_string() == *s
        }
        _ => a == b,
    }
}

/// A child table embedded into each selected row, keyed by the child's
/// foreign key column pointing at the parent's `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    pub table: String,
    pub foreign_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub column: String,
    pub descending: bool,
}

/// A select over one table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Select {
    pub embed: Option<Embed>,
    pub filters: Vec<Filter>,
    pub order: Option<OrderBy>,
}

impl Select {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn embed(mut self, table: impl Into<String>, foreign_key: impl Into<String>) -> Self {
        self.embed = Some(Embed {
            table: table.into(),
            foreign_key: foreign_key.into(),
        });
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, descending: bool) -> Self {
        self.order = Some(OrderBy {
            column: column.into(),
            descending,
        });
        self
    }
}

/// Abstract interface for a relational backend.
///
/// This is the minimal surface the remote repository needs: row-level
/// select/insert/update/delete with equality filters, ordering, and one
/// level of child-table embedding. Identifiers and `created_at`/`updated_at`
/// columns are assigned by the backend.
#[allow(async_fn_in_trait)]
pub trait TableClient {
    /// Rows of `table` matching the query.
    ///
    /// Only the top-level rows follow `query.order`. Embedded child rows come
    /// back in whatever order the backend returns them: PostgREST does not
    /// guarantee one, the in-memory tables keep insertion order.
    async fn select(&self, table: &str, query: &Select) -> Result<Vec<Row>>;

    /// Insert rows, returning them as stored (with server-assigned columns).
    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>>;

    /// Update every row matching all `filters`, returning the updated rows.
    async fn update(&self, table: &str, values: Row, filters: &[Filter]) -> Result<Vec<Row>>;

    /// Delete every row matching all `filters`.
    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<()>;
}

impl<T: TableClient + ?Sized> TableClient for &T {
    async fn select(&self, table: &str, query: &Select) -> Result<Vec<Row>> {
        (**self).select(table, query).await
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>> {
        (**self).insert(table, rows).await
    }

    async fn update(&self, table: &str, values: Row, filters: &[Filter]) -> Result<Vec<Row>> {
        (**self).update(table, values, filters).await
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<()> {
        (**self).delete(table, filters).await
    }
}
