//! SQLite adapter: edge relations in, centrality relations out.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection};
use tracing::debug;

use super::{StorageError, StorageResult};
use crate::analysis::AnalysisConfig;
use crate::api::{self, AnalysisRequest, ColumnValue, EdgeRow};

/// Suffix of the node result relation.
pub const NODE_CENT_SUFFIX: &str = "_NODE_CENT";
/// Suffix of the edge result relation.
pub const EDGE_CENT_SUFFIX: &str = "_EDGE_CENT";

const REQUIRED_EDGE_COLUMNS: [&str; 3] = ["EDGE_ID", "START_NODE", "END_NODE"];
const NODE_ID_COLUMN: &str = "NODE_ID";

/// SQLite-backed edge-table source and result sink.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a database file.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    /// Create an in-memory database (useful for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Borrow the underlying connection, e.g. for seeding input relations.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Read an edge relation into typed rows.
    ///
    /// The relation must carry `EDGE_ID`, `START_NODE` and `END_NODE` (any
    /// case); every remaining column rides along by name so one of them can
    /// be selected as the weight.
    pub fn read_edges(&self, table: &str) -> StorageResult<Vec<EdgeRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {}", quote_ident(table)))?;
        let names: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        let mut required = [0usize; 3];
        for (slot, column) in REQUIRED_EDGE_COLUMNS.iter().enumerate() {
            required[slot] = names
                .iter()
                .position(|name| name.eq_ignore_ascii_case(column))
                .ok_or_else(|| StorageError::MissingColumn {
                    table: table.to_string(),
                    column: column.to_string(),
                })?;
        }
        let [edge_id_at, start_at, end_at] = required;

        let mut rows = stmt.query([])?;
        let mut edges = Vec::new();
        while let Some(row) = rows.next()? {
            let mut edge = EdgeRow::new(
                row.get(edge_id_at)?,
                row.get(start_at)?,
                row.get(end_at)?,
            );
            for (index, name) in names.iter().enumerate() {
                if index == edge_id_at || index == start_at || index == end_at {
                    continue;
                }
                edge.columns.insert(name.clone(), column_value(row.get_ref(index)?));
            }
            edges.push(edge);
        }
        Ok(edges)
    }

    /// Read a declared-node relation (a `NODE_ID` column, any case).
    pub fn read_nodes(&self, table: &str) -> StorageResult<Vec<i64>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {}", quote_ident(table)))?;
        let position = stmt
            .column_names()
            .iter()
            .position(|name| name.eq_ignore_ascii_case(NODE_ID_COLUMN))
            .ok_or_else(|| StorageError::MissingColumn {
                table: table.to_string(),
                column: NODE_ID_COLUMN.to_string(),
            })?;
        let mut rows = stmt.query([])?;
        let mut nodes = Vec::new();
        while let Some(row) = rows.next()? {
            nodes.push(row.get(position)?);
        }
        Ok(nodes)
    }

    /// Analyze `table` and materialize `<table>_NODE_CENT` and
    /// `<table>_EDGE_CENT`. Returns `true` on success.
    pub fn graph_analysis(
        &mut self,
        table: &str,
        orientation: &str,
        weight_column: Option<&str>,
    ) -> StorageResult<bool> {
        self.graph_analysis_with_config(table, None, orientation, weight_column, AnalysisConfig::default())
    }

    /// [`graph_analysis`](Self::graph_analysis) with a declared-node
    /// relation and explicit worker-pool/cancellation settings.
    ///
    /// The destination relations must not already exist; creating over an
    /// existing relation is a caller error ([`StorageError::TableExists`]),
    /// and nothing is written when it happens. The two relations appear
    /// atomically: a failure mid-write rolls both back.
    pub fn graph_analysis_with_config(
        &mut self,
        table: &str,
        nodes_table: Option<&str>,
        orientation: &str,
        weight_column: Option<&str>,
        config: AnalysisConfig,
    ) -> StorageResult<bool> {
        let node_table = format!("{table}{NODE_CENT_SUFFIX}");
        let edge_table = format!("{table}{EDGE_CENT_SUFFIX}");
        for destination in [&node_table, &edge_table] {
            if self.table_exists(destination)? {
                return Err(StorageError::TableExists(destination.clone()));
            }
        }

        let edges = self.read_edges(table)?;
        let mut request = AnalysisRequest::new(edges, orientation);
        if let Some(nodes) = nodes_table {
            request = request.with_nodes(self.read_nodes(nodes)?);
        }
        if let Some(column) = weight_column {
            request = request.with_weight_column(column);
        }
        let tables = api::graph_analysis_with_config(&request, config)?;

        let tx = self.conn.transaction()?;
        tx.execute(
            &format!(
                "CREATE TABLE {} (NODE_ID INTEGER PRIMARY KEY, BETWEENNESS REAL NOT NULL, CLOSENESS REAL NOT NULL)",
                quote_ident(&node_table)
            ),
            [],
        )?;
        {
            let mut insert = tx.prepare(&format!(
                "INSERT INTO {} (NODE_ID, BETWEENNESS, CLOSENESS) VALUES (?1, ?2, ?3)",
                quote_ident(&node_table)
            ))?;
            for row in &tables.node_centrality {
                insert.execute(params![row.node_id, row.betweenness, row.closeness])?;
            }
        }
        tx.execute(
            &format!(
                "CREATE TABLE {} (EDGE_ID INTEGER PRIMARY KEY, BETWEENNESS REAL NOT NULL)",
                quote_ident(&edge_table)
            ),
            [],
        )?;
        {
            let mut insert = tx.prepare(&format!(
                "INSERT INTO {} (EDGE_ID, BETWEENNESS) VALUES (?1, ?2)",
                quote_ident(&edge_table)
            ))?;
            for row in &tables.edge_centrality {
                insert.execute(params![row.edge_id, row.betweenness])?;
            }
        }
        tx.commit()?;

        debug!(
            table,
            nodes = tables.node_centrality.len(),
            edges = tables.edge_centrality.len(),
            "materialized centrality relations"
        );
        Ok(true)
    }

    fn table_exists(&self, name: &str) -> StorageResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

fn column_value(value: ValueRef<'_>) -> ColumnValue {
    match value {
        ValueRef::Null => ColumnValue::Null,
        ValueRef::Integer(value) => ColumnValue::Int(value),
        ValueRef::Real(value) => ColumnValue::Float(value),
        ValueRef::Text(text) => ColumnValue::Text(String::from_utf8_lossy(text).into_owned()),
        // No relational meaning here; treated as an absent value.
        ValueRef::Blob(_) => ColumnValue::Null,
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
