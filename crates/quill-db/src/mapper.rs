//! Generic row mapper: query results into [`Record`] values.

use crate::error::{DbError, DbResult};
use crate::record::{Binding, Record};
use crate::traits::Database;
use crate::value::{ResultSet, Value};

/// Column-to-binding plan for one result set.
///
/// Built once per query from the column names; each column is served by the
/// first binding whose column name matches it case-insensitively.
pub struct RowMapper<R> {
    columns: Vec<String>,
    plan: Vec<Option<Binding<R>>>,
}

impl<R: Record> RowMapper<R> {
    pub fn new(columns: &[String]) -> Self {
        let bindings = R::bindings();
        let plan = columns
            .iter()
            .map(|column| bindings.iter().find(|b| b.matches(column)).copied())
            .collect();
        Self {
            columns: columns.to_vec(),
            plan,
        }
    }

    /// Number of columns that will populate a field.
    pub fn bound_columns(&self) -> usize {
        self.plan.iter().filter(|b| b.is_some()).count()
    }

    /// Build one record from a row laid out like the planned columns.
    pub fn map_row(&self, row: &[Value]) -> DbResult<R> {
        let mut record = R::default();
        for ((column, binding), value) in self.columns.iter().zip(&self.plan).zip(row) {
            let Some(binding) = binding else { continue };
            binding
                .set(&mut record, value)
                .map_err(|source| DbError::Coercion {
                    column: column.clone(),
                    field: binding.field(),
                    source,
                })?;
        }
        Ok(record)
    }

    /// Map every row of `result`, appending to `out` in result order.
    pub fn map_into(&self, result: &ResultSet, out: &mut Vec<R>) -> DbResult<()> {
        out.reserve(result.rows.len());
        for row in &result.rows {
            out.push(self.map_row(row)?);
        }
        Ok(())
    }
}

/// Run `sql` and map the first row.
///
/// Zero rows is [`DbError::NoRows`]; rows past the first are ignored.
pub async fn query_one<R: Record>(db: &dyn Database, sql: &str, params: &[Value]) -> DbResult<R> {
    let result = db.query(sql, params).await?;
    let Some(first) = result.rows.first() else {
        return Err(DbError::NoRows {
            query: sql.to_string(),
        });
    };
    if result.rows.len() > 1 {
        log::debug!(
            "query_one ignoring {} extra row(s) for: {sql}",
            result.rows.len() - 1
        );
    }
    RowMapper::<R>::new(&result.columns).map_row(first)
}

/// Run `sql` and map every row. Zero rows yields an empty vector.
pub async fn query_many<R: Record>(
    db: &dyn Database,
    sql: &str,
    params: &[Value],
) -> DbResult<Vec<R>> {
    let mut out = Vec::new();
    query_many_into(db, &mut out, sql, params).await?;
    Ok(out)
}

/// Run `sql` and append every mapped row to `out`.
pub async fn query_many_into<R: Record>(
    db: &dyn Database,
    out: &mut Vec<R>,
    sql: &str,
    params: &[Value],
) -> DbResult<()> {
    let result = db.query(sql, params).await?;
    RowMapper::<R>::new(&result.columns).map_into(&result, out)
}

#[cfg(test)]
#[path = "mapper_test.rs"]
mod tests;
