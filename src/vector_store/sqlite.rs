//! SQLite-based vector store implementation.
//!
//! Uses SQLite with cosine similarity computed in Rust for simplicity.
//! Collections are rows in `collections`; chunks are keyed by
//! `(collection, id)`.

use super::{
    cosine_similarity, ChunkMetadata, ChunkRecord, CollectionInfo, SearchResult, StoredDocument,
    VectorStore,
};
use crate::error::{Result, VidrecallError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument};

/// File name of the database inside the persistence directory.
const DATABASE_FILE: &str = "index.db";

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS collections (
        name TEXT PRIMARY KEY,
        embedding_model TEXT,
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS chunks (
        collection TEXT NOT NULL,
        id TEXT NOT NULL,
        document TEXT NOT NULL,
        metadata TEXT NOT NULL,
        embedding BLOB,
        PRIMARY KEY (collection, id)
    );
"#;

/// SQLite-based vector store.
pub struct SqliteVectorStore {
    conn: Mutex<Connection>,
}

impl SqliteVectorStore {
    /// Open (or create) the store inside a persistence directory.
    #[instrument(skip_all)]
    pub fn open(persist_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(persist_dir).map_err(|e| {
            VidrecallError::StoreUnavailable(format!(
                "cannot create persistence directory {:?}: {}",
                persist_dir, e
            ))
        })?;

        let path = persist_dir.join(DATABASE_FILE);
        let conn = Self::init(&path).map_err(|e| {
            VidrecallError::StoreUnavailable(format!("cannot open {:?}: {}", path, e))
        })?;

        info!("Initialized SQLite vector store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init(path: &Path) -> rusqlite::Result<Connection> {
        let conn = Connection::open(path)?;
        // WAL lets a second process read while one writes.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| VidrecallError::VectorStore(format!("Failed to acquire lock: {}", e)))
    }

    /// Serialize embedding to bytes.
    fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
        embedding
            .iter()
            .flat_map(|f| f.to_le_bytes())
            .collect()
    }

    /// Deserialize embedding from bytes.
    fn bytes_to_embedding(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| {
                let arr: [u8; 4] = chunk.try_into().unwrap_or_default();
                f32::from_le_bytes(arr)
            })
            .collect()
    }

    fn ensure_collection(tx: &Transaction<'_>, name: &str) -> Result<()> {
        tx.execute(
            "INSERT OR IGNORE INTO collections (name, embedding_model, created_at) VALUES (?1, NULL, ?2)",
            params![name, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn write_records(tx: &Transaction<'_>, collection: &str, records: &[ChunkRecord]) -> Result<()> {
        let mut stmt = tx.prepare(
            r#"
            INSERT OR REPLACE INTO chunks (collection, id, document, metadata, embedding)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )?;

        for record in records {
            let metadata = serde_json::to_string(&record.metadata)?;
            let embedding = record.embedding.as_deref().map(Self::embedding_to_bytes);
            stmt.execute(params![collection, record.id, record.document, metadata, embedding])?;
        }
        Ok(())
    }
}

/// Numeric suffix of a `chunk-<n>` id.
fn chunk_ordinal(id: &str) -> Option<usize> {
    id.strip_prefix("chunk-")?.parse().ok()
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[async_trait]
impl VectorStore for SqliteVectorStore {
    #[instrument(skip(self))]
    async fn create_collection(&self, name: &str, embedding_model: Option<&str>) -> Result<bool> {
        let conn = self.lock()?;

        let created = conn.execute(
            "INSERT OR IGNORE INTO collections (name, embedding_model, created_at) VALUES (?1, ?2, ?3)",
            params![name, embedding_model, Utc::now().to_rfc3339()],
        )? > 0;

        if !created && embedding_model.is_some() {
            conn.execute(
                "UPDATE collections SET embedding_model = ?2 WHERE name = ?1",
                params![name, embedding_model],
            )?;
        }

        if created {
            info!("Created collection {}", name);
        }
        Ok(created)
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn upsert(&self, collection: &str, records: &[ChunkRecord]) -> Result<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        Self::ensure_collection(&tx, collection)?;
        Self::write_records(&tx, collection, records)?;

        tx.commit()?;
        info!("Upserted {} chunks into {}", records.len(), collection);
        Ok(records.len())
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn replace(&self, collection: &str, records: &[ChunkRecord]) -> Result<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        Self::ensure_collection(&tx, collection)?;
        let removed = tx.execute("DELETE FROM chunks WHERE collection = ?1", params![collection])?;
        Self::write_records(&tx, collection, records)?;

        tx.commit()?;
        info!(
            "Replaced {} chunks in {} with {}",
            removed,
            collection,
            records.len()
        );
        Ok(records.len())
    }

    #[instrument(skip(self, query_embedding))]
    async fn query(
        &self,
        collection: &str,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchResult>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, document, metadata, embedding
            FROM chunks
            WHERE collection = ?1 AND embedding IS NOT NULL
            "#,
        )?;

        let rows = stmt.query_map(params![collection], |row| {
            let metadata: String = row.get(2)?;
            let embedding_bytes: Vec<u8> = row.get(3)?;
            Ok((
                StoredDocument {
                    id: row.get(0)?,
                    document: row.get(1)?,
                    metadata: ChunkMetadata::parse(&metadata),
                },
                Self::bytes_to_embedding(&embedding_bytes),
            ))
        })?;

        let mut results: Vec<SearchResult> = rows
            .filter_map(|row| row.ok())
            .filter(|(_, embedding)| embedding.len() == query_embedding.len())
            .map(|(document, embedding)| SearchResult {
                score: cosine_similarity(query_embedding, &embedding),
                document,
            })
            .collect();

        // Sort by score descending
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(limit);

        debug!("Found {} matching chunks in {}", results.len(), collection);
        Ok(results)
    }

    #[instrument(skip(self))]
    async fn documents(&self, collection: &str) -> Result<Vec<StoredDocument>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT id, document, metadata FROM chunks WHERE collection = ?1",
        )?;

        let rows = stmt.query_map(params![collection], |row| {
            let metadata: String = row.get(2)?;
            Ok(StoredDocument {
                id: row.get(0)?,
                document: row.get(1)?,
                metadata: ChunkMetadata::parse(&metadata),
            })
        })?;

        let mut docs: Vec<StoredDocument> = rows.filter_map(|d| d.ok()).collect();
        docs.sort_by(|a, b| {
            a.metadata
                .start
                .partial_cmp(&b.metadata.start)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| chunk_ordinal(&a.id).cmp(&chunk_ordinal(&b.id)))
                .then_with(|| a.id.cmp(&b.id))
        });

        debug!("Read {} chunks from {}", docs.len(), collection);
        Ok(docs)
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        let conn = self.lock()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM chunks WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    #[instrument(skip(self))]
    async fn delete_collection(&self, name: &str) -> Result<bool> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let chunks = tx.execute("DELETE FROM chunks WHERE collection = ?1", params![name])?;
        let existed = tx.execute("DELETE FROM collections WHERE name = ?1", params![name])? > 0;

        tx.commit()?;
        info!("Deleted collection {} ({} chunks)", name, chunks);
        Ok(existed)
    }

    #[instrument(skip(self))]
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT c.name, c.embedding_model, c.created_at, COUNT(k.id)
            FROM collections c
            LEFT JOIN chunks k ON k.collection = c.name
            GROUP BY c.name
            ORDER BY c.name
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            let created_at: String = row.get(2)?;
            let chunk_count: i64 = row.get(3)?;
            Ok(CollectionInfo {
                name: row.get(0)?,
                embedding_model: row.get(1)?,
                created_at: parse_timestamp(&created_at),
                chunk_count: chunk_count as usize,
            })
        })?;

        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    async fn has_collection(&self, name: &str) -> Result<bool> {
        let conn = self.lock()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM collections WHERE name = ?1",
                params![name],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }
}
