//! SQLite persistence for companion chat turns.
//!
//! Turns are partitioned by namespace and collection, so one database file can
//! hold several deployment stages side by side.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use aria_core::{AgentError, ChatLog, ChatTurn, HistoryScope};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use tracing::{debug, info};

/// Initializes the database, creating tables if needed.
pub fn init_db(path: &str) -> Result<Connection> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).context("failed to create db directory")?;
    }
    let conn = Connection::open(path).context("failed to open database")?;
    create_schema(&conn)?;
    info!("Database initialized at {}", path);
    Ok(conn)
}

/// Creates the chat turn table and its lookup index.
pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS chat_turns (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            namespace TEXT NOT NULL,
            collection TEXT NOT NULL,
            user_id TEXT NOT NULL,
            chat_id INTEGER NOT NULL,
            turn_id INTEGER NOT NULL,
            timestamp TEXT NOT NULL,
            human_message TEXT NOT NULL,
            ai_message TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS chat_turns_user
            ON chat_turns (namespace, collection, user_id, chat_id, turn_id);"
    ).context("failed to create table")?;
    Ok(())
}

fn storage_err(e: impl ToString) -> AgentError {
    AgentError::Storage(e.to_string())
}

/// [`ChatLog`] backed by a single SQLite connection.
///
/// Queries run on the blocking pool.
#[derive(Clone)]
pub struct SqliteChatLog {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteChatLog {
    pub fn new(conn: Connection) -> Self {
        Self { conn: Arc::new(Mutex::new(conn)) }
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, AgentError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| storage_err("chat log lock poisoned"))?;
            f(&guard).map_err(storage_err)
        })
        .await
        .map_err(storage_err)?
    }
}

#[async_trait]
impl ChatLog for SqliteChatLog {
    async fn append(&self, namespace: &str, collection: &str, turn: ChatTurn) -> Result<(), AgentError> {
        let namespace = namespace.to_string();
        let collection = collection.to_string();
        debug!("Appending turn {} of chat {} for {}", turn.turn_id, turn.chat_id, turn.user_id);

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO chat_turns
                    (namespace, collection, user_id, chat_id, turn_id, timestamp, human_message, ai_message)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    namespace,
                    collection,
                    turn.user_id,
                    turn.chat_id,
                    turn.turn_id,
                    turn.timestamp,
                    turn.human_message,
                    turn.ai_message,
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn history(
        &self,
        namespace: &str,
        collection: &str,
        user_id: &str,
        chat_id: i64,
        scope: HistoryScope,
    ) -> Result<Vec<ChatTurn>, AgentError> {
        let only_chat = match scope {
            HistoryScope::None => return Ok(Vec::new()),
            HistoryScope::All => false,
            HistoryScope::CurrentChat => true,
        };
        let namespace = namespace.to_string();
        let collection = collection.to_string();
        let user_id = user_id.to_string();

        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT user_id, chat_id, turn_id, timestamp, human_message, ai_message
                 FROM chat_turns
                 WHERE namespace = ?1 AND collection = ?2 AND user_id = ?3
                   AND (?4 = 0 OR chat_id = ?5)
                 ORDER BY chat_id, turn_id, id",
            )?;
            let rows = stmt.query_map(
                params![namespace, collection, user_id, only_chat, chat_id],
                |row| {
                    Ok(ChatTurn {
                        user_id: row.get(0)?,
                        chat_id: row.get(1)?,
                        turn_id: row.get(2)?,
                        timestamp: row.get(3)?,
                        human_message: row.get(4)?,
                        ai_message: row.get(5)?,
                    })
                },
            )?;
            let turns = rows.collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(turns)
        })
        .await
    }
}
