//! Neo4j graph store client.
//!
//! Talks to the Neo4j HTTP transactional endpoint
//! (`POST /db/{database}/tx/commit`), which runs Cypher statements in an
//! auto-committed transaction and returns rows as JSON arrays.
//!
//! The network is stored as `(:Station {name})` nodes joined by
//! `[:CONNECTED_TO {time}]` relationships, `time` being minutes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::domain::{Edge, Station};

use super::NetworkStore;
use super::error::GatewayError;

/// Default database name.
const DEFAULT_DATABASE: &str = "neo4j";

const STATIONS_QUERY: &str = "MATCH (n:Station) RETURN n.name AS name ORDER BY n.name";

const EDGES_QUERY: &str = "MATCH (n:Station)-[r:CONNECTED_TO]->(m:Station) \
     RETURN n.name AS from_station, m.name AS to_station, r.time AS time";

/// Configuration for the Neo4j client.
#[derive(Debug, Clone)]
pub struct Neo4jConfig {
    /// Base URL of the HTTP endpoint, e.g. `http://localhost:7474`
    pub base_url: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Database name
    pub database: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Neo4jConfig {
    /// Create a new config for the default database.
    pub fn new(
        base_url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            user: user.into(),
            password: password.into(),
            database: DEFAULT_DATABASE.to_string(),
            timeout_secs: 30,
        }
    }

    /// Use a different database.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// URL of the auto-commit transaction endpoint.
    pub fn commit_url(&self) -> String {
        format!(
            "{}/db/{}/tx/commit",
            self.base_url.trim_end_matches('/'),
            self.database
        )
    }
}

/// Neo4j HTTP API client.
#[derive(Debug, Clone)]
pub struct Neo4jClient {
    http: reqwest::Client,
    commit_url: String,
}

impl Neo4jClient {
    /// Create a new client with the given configuration.
    pub fn new(config: Neo4jConfig) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();

        let credentials = BASE64.encode(format!("{}:{}", config.user, config.password));
        let auth = HeaderValue::from_str(&format!("Basic {credentials}")).map_err(|_| {
            GatewayError::Api {
                status: 0,
                message: "Invalid credentials format".to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            commit_url: config.commit_url(),
        })
    }

    /// Run one statement and return its rows.
    async fn run(&self, statement: &str) -> Result<Vec<Vec<Value>>, GatewayError> {
        let request = TxRequest {
            statements: vec![Statement { statement }],
        };

        let response = self
            .http
            .post(&self.commit_url)
            .json(&request)
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(GatewayError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let rows = parse_rows(&body)?;
        debug!(rows = rows.len(), "neo4j statement completed");
        Ok(rows)
    }
}

impl NetworkStore for Neo4jClient {
    async fn all_stations(&self) -> Result<Vec<Station>, GatewayError> {
        let rows = self.run(STATIONS_QUERY).await?;
        stations_from_rows(&rows)
    }

    async fn all_edges(&self) -> Result<Vec<Edge>, GatewayError> {
        let rows = self.run(EDGES_QUERY).await?;
        edges_from_rows(&rows)
    }
}

#[derive(Debug, Serialize)]
struct TxRequest<'a> {
    statements: Vec<Statement<'a>>,
}

#[derive(Debug, Serialize)]
struct Statement<'a> {
    statement: &'a str,
}

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<StatementResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct StatementResult {
    #[serde(default)]
    data: Vec<RowEntry>,
}

#[derive(Debug, Deserialize)]
struct RowEntry {
    row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct TxError {
    code: String,
    message: String,
}

/// Extract the rows of the first statement result.
///
/// Neo4j reports statement failures in the `errors` array of a 200
/// response, so those are checked before any rows are read.
fn parse_rows(body: &str) -> Result<Vec<Vec<Value>>, GatewayError> {
    let response: TxResponse = serde_json::from_str(body).map_err(|e| GatewayError::Json {
        message: e.to_string(),
    })?;

    if let Some(err) = response.errors.into_iter().next() {
        return Err(GatewayError::Query {
            code: err.code,
            message: err.message,
        });
    }

    Ok(response
        .results
        .into_iter()
        .next()
        .map(|r| r.data.into_iter().map(|d| d.row).collect())
        .unwrap_or_default())
}

fn text_cell<'a>(row: &'a [Value], idx: usize, column: &str) -> Result<&'a str, GatewayError> {
    row.get(idx)
        .and_then(Value::as_str)
        .ok_or_else(|| GatewayError::InvalidRow {
            message: format!("expected text in column {column}, got {:?}", row.get(idx)),
        })
}

fn stations_from_rows(rows: &[Vec<Value>]) -> Result<Vec<Station>, GatewayError> {
    let mut stations = rows
        .iter()
        .map(|row| -> Result<Station, GatewayError> {
            let name = text_cell(row, 0, "name")?;
            Station::parse(name).map_err(|e| GatewayError::InvalidData(e.into()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // ORDER BY already sorts, but collation in the store may differ.
    stations.sort();
    stations.dedup();
    Ok(stations)
}

fn edges_from_rows(rows: &[Vec<Value>]) -> Result<Vec<Edge>, GatewayError> {
    rows.iter()
        .map(|row| -> Result<Edge, GatewayError> {
            let from = text_cell(row, 0, "from_station")?;
            let to = text_cell(row, 1, "to_station")?;
            let time = row
                .get(2)
                .and_then(Value::as_f64)
                .ok_or_else(|| GatewayError::InvalidRow {
                    message: format!(
                        "expected number in column time for {from} -> {to}, got {:?}",
                        row.get(2)
                    ),
                })?;
            Ok(Edge::parse(from, to, time)?)
        })
        .collect()
}
