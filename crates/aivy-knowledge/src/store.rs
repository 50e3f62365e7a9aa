// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed knowledge store with vector BLOB storage.

use aivy_core::AivyError;
use aivy_core::types::RetrievedChunk;
use tokio_rusqlite::Connection;

use crate::types::{KnowledgeChunk, blob_to_vec, cosine_similarity, vec_to_blob};

/// Helper to convert tokio_rusqlite errors into AivyError::Retrieval.
fn retrieval_err(e: tokio_rusqlite::Error) -> AivyError {
    AivyError::Retrieval {
        message: "knowledge store query failed".to_string(),
        source: Some(Box::new(e)),
    }
}

/// Persistent store for knowledge chunks in SQLite.
///
/// Stores embeddings as little-endian f32 BLOBs. The connection should
/// already have the `knowledge_chunks` migration applied.
pub struct KnowledgeStore {
    conn: Connection,
}

impl KnowledgeStore {
    /// Creates a new KnowledgeStore wrapping an existing connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Creates a KnowledgeStore sharing the main database's writer thread.
    ///
    /// The `knowledge_chunks` table is created by the storage crate's
    /// migrations, so any opened [`Database`](aivy_storage::Database) is
    /// ready to serve chunk queries.
    pub fn from_database(db: &aivy_storage::Database) -> Self {
        Self {
            conn: db.connection().clone(),
        }
    }

    /// Save a chunk to the store.
    pub async fn insert_chunk(&self, chunk: &KnowledgeChunk) -> Result<(), AivyError> {
        let id = chunk.id.clone();
        let content = chunk.content.clone();
        let embedding_blob = vec_to_blob(&chunk.embedding);
        let source_document = chunk.source_document.clone();
        let created_at = chunk.created_at.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO knowledge_chunks (id, content, embedding, source_document, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    rusqlite::params![id, content, embedding_blob, source_document, created_at],
                )?;
                Ok(())
            })
            .await
            .map_err(retrieval_err)
    }

    /// Search for chunks whose embedding clears the similarity threshold.
    ///
    /// Returns chunks sorted descending by cosine similarity, capped at
    /// `limit`. Returns an empty list (not an error) when nothing clears
    /// the threshold.
    pub async fn search_similar(
        &self,
        query_embedding: &[f32],
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<RetrievedChunk>, AivyError> {
        let query = query_embedding.to_vec();
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare("SELECT content, embedding FROM knowledge_chunks")?;
                let rows = stmt.query_map([], |row| {
                    let content: String = row.get(0)?;
                    let blob: Vec<u8> = row.get(1)?;
                    Ok((content, blob_to_vec(&blob)))
                })?;

                let mut results: Vec<RetrievedChunk> = Vec::new();
                for row in rows {
                    let (content, embedding) = row?;
                    if embedding.len() != query.len() {
                        continue;
                    }
                    let similarity = cosine_similarity(&query, &embedding);
                    if similarity >= threshold {
                        results.push(RetrievedChunk {
                            content,
                            similarity,
                        });
                    }
                }

                results.sort_by(|a, b| {
                    b.similarity
                        .partial_cmp(&a.similarity)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                results.truncate(limit);
                Ok(results)
            })
            .await
            .map_err(retrieval_err)
    }

    /// Number of stored chunks.
    pub async fn count(&self) -> Result<i64, AivyError> {
        self.conn
            .call(|conn| {
                let n = conn.query_row("SELECT count(*) FROM knowledge_chunks", [], |row| {
                    row.get(0)
                })?;
                Ok(n)
            })
            .await
            .map_err(retrieval_err)
    }
}
