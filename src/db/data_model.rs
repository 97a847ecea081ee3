use oracle::{Connection, Row};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::db::catalog;
use crate::db::models::TableField;
use crate::db::quoting::{quote_id, TableRef};
use crate::error::{Error, Result};

/// Cast length used when the catalog reports no length for a column.
const MAX_VARCHAR2_LEN: i64 = 4000;

#[derive(Debug, Clone)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}

/// Select-list entry that renders one column as text: geometries collapse to
/// a `GEOMETRY` marker, dates and everything else are cast to VARCHAR2.
pub fn sanitize_field(field: &TableField) -> String {
    let col = quote_id(&field.name);
    match field.data_type.to_lowercase().as_str() {
        "sdo_geometry" => format!("CASE WHEN {col} IS NULL THEN NULL ELSE 'GEOMETRY' END AS {col}"),
        "date" => format!("CAST({col} AS VARCHAR2(8)) AS {col}"),
        _ => {
            let len = field
                .char_max_len
                .filter(|len| *len > 0)
                .unwrap_or(MAX_VARCHAR2_LEN)
                .min(MAX_VARCHAR2_LEN);
            format!("CAST({col} As VARCHAR2({len})) AS {col}")
        }
    }
}

pub fn table_data_sql(table: &TableRef, fields: &[TableField]) -> String {
    let fields_txt = fields
        .iter()
        .map(sanitize_field)
        .collect::<Vec<_>>()
        .join(", ");
    format!("SELECT {} FROM {}", fields_txt, table.quoted())
}

fn paged_sql(sql: &str, start: usize, count: usize) -> String {
    format!("{sql} OFFSET {start} ROWS FETCH NEXT {count} ROWS ONLY")
}

fn row_to_strings(row: &Row, width: usize) -> Vec<String> {
    (0..width)
        .map(|i| {
            let value: Option<String> = row.get(i).unwrap_or(None);
            value.unwrap_or_else(|| "NULL".to_string())
        })
        .collect()
}

/// Table contents rendered as text, fetched a page at a time.
pub struct TableDataModel {
    conn: Arc<Connection>,
    table: TableRef,
    header: Vec<String>,
    sql: String,
    row_count: Option<i64>,
}

impl TableDataModel {
    pub fn new(conn: Arc<Connection>, table: TableRef, fields: &[TableField]) -> Self {
        Self {
            conn,
            header: fields.iter().map(|f| f.name.clone()).collect(),
            sql: table_data_sql(&table, fields),
            table,
            row_count: None,
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Counted on first use, then remembered.
    pub fn row_count(&mut self) -> Result<i64> {
        if let Some(count) = self.row_count {
            return Ok(count);
        }
        let sql = catalog::row_count(&self.table);
        let count = match self.conn.query_row_as::<i64>(&sql, &[]) {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!(table = %self.table, "Row count failed: {err}");
                return Err(Error::database(&sql, err));
            }
        };
        self.row_count = Some(count);
        Ok(count)
    }

    pub fn fetch_more(&self, start: usize, count: usize) -> Result<Vec<Vec<String>>> {
        let sql = paged_sql(&self.sql, start, count);
        let rows = self
            .conn
            .query(&sql, &[])
            .map_err(|err| Error::database(&sql, err))?;
        let mut data = Vec::with_capacity(count);
        for row_result in rows {
            let row = row_result.map_err(|err| Error::database(&sql, err))?;
            data.push(row_to_strings(&row, self.header.len()));
        }
        tracing::debug!(table = %self.table, start, fetched = data.len(), "fetched table rows");
        Ok(data)
    }
}

/// Outcome of an ad-hoc statement.
#[derive(Debug, Clone)]
pub struct SqlResultModel {
    pub sql: String,
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Vec<String>>,
    pub affected_rows: u64,
    pub elapsed: Duration,
    pub executed_at: String,
}

impl SqlResultModel {
    /// Runs one statement and commits. Queries return their rows; other
    /// statements report the affected row count.
    pub fn run(conn: &Connection, sql: &str) -> Result<Self> {
        let sql = sql.trim();
        let start = Instant::now();
        let executed_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let mut stmt = conn
            .statement(sql)
            .build()
            .map_err(|err| Error::database(sql, err))?;

        let mut columns: Vec<ColumnInfo> = Vec::new();
        let mut rows: Vec<Vec<String>> = Vec::new();
        let affected_rows = if stmt.is_query() {
            let result_set = stmt.query(&[]).map_err(|err| Error::database(sql, err))?;
            columns = result_set
                .column_info()
                .iter()
                .map(|col| ColumnInfo {
                    name: col.name().to_string(),
                    data_type: format!("{:?}", col.oracle_type()),
                })
                .collect();
            for row_result in result_set {
                let row = row_result.map_err(|err| Error::database(sql, err))?;
                rows.push(row_to_strings(&row, columns.len()));
            }
            rows.len() as u64
        } else {
            stmt.execute(&[]).map_err(|err| Error::database(sql, err))?;
            stmt.row_count().map_err(|err| Error::database(sql, err))?
        };

        let elapsed = start.elapsed();
        if let Err(err) = conn.commit() {
            tracing::warn!("Commit after statement failed: {err}");
            return Err(Error::database("COMMIT", err));
        }
        tracing::info!(
            affected_rows,
            elapsed_ms = elapsed.as_millis() as u64,
            "statement executed"
        );

        Ok(Self {
            sql: sql.to_string(),
            columns,
            rows,
            affected_rows,
            elapsed,
            executed_at,
        })
    }

    pub fn header(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn message(&self) -> String {
        if self.columns.is_empty() {
            format!("{} row(s) affected", self.affected_rows)
        } else {
            format!("{} rows fetched", self.rows.len())
        }
    }
}
