use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::embedding::cosine_similarity;
use crate::vectordb::{SearchResult, VectorDbClient, VectorDbError, VectorPoint};

/// In-memory index with exact cosine search.
#[derive(Default)]
pub struct MockVectorDbClient {
    collections: std::sync::RwLock<HashMap<String, MockCollection>>,
    fail_upserts: AtomicBool,
    fail_searches: AtomicBool,
    upsert_calls: AtomicUsize,
    search_calls: AtomicUsize,
}

#[derive(Default, Clone)]
struct MockCollection {
    vector_size: u64,
    points: HashMap<String, MockStoredPoint>,
}

#[derive(Clone)]
struct MockStoredPoint {
    vector: Vec<f32>,
    video_id: String,
}

impl MockVectorDbClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point_count(&self, collection: &str) -> Option<usize> {
        self.collections
            .read()
            .ok()?
            .get(collection)
            .map(|c| c.points.len())
    }

    /// Returns `true` if a point with `id` is stored in `collection`.
    pub fn contains(&self, collection: &str, id: &str) -> bool {
        self.collections
            .read()
            .ok()
            .and_then(|c| c.get(collection).map(|coll| coll.points.contains_key(id)))
            .unwrap_or(false)
    }

    /// Video ids stored in `collection`, sorted.
    pub fn video_ids(&self, collection: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .collections
            .read()
            .ok()
            .and_then(|c| {
                c.get(collection)
                    .map(|coll| coll.points.values().map(|p| p.video_id.clone()).collect())
            })
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// Makes every subsequent upsert fail with [`VectorDbError::UpsertFailed`].
    pub fn set_fail_upserts(&self, fail: bool) {
        self.fail_upserts.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent search fail with [`VectorDbError::SearchFailed`].
    pub fn set_fail_searches(&self, fail: bool) {
        self.fail_searches.store(fail, Ordering::SeqCst);
    }

    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

impl VectorDbClient for MockVectorDbClient {
    async fn ensure_collection(&self, name: &str, vector_size: u64) -> Result<(), VectorDbError> {
        let mut collections =
            self.collections
                .write()
                .map_err(|_| VectorDbError::CollectionSetupFailed {
                    collection: name.to_string(),
                    message: "lock poisoned".to_string(),
                })?;

        let coll = collections
            .entry(name.to_string())
            .or_insert_with(|| MockCollection {
                vector_size,
                points: HashMap::new(),
            });

        if coll.vector_size != vector_size {
            return Err(VectorDbError::InvalidDimension {
                expected: vector_size as usize,
                actual: coll.vector_size as usize,
            });
        }
        Ok(())
    }

    async fn upsert_points(
        &self,
        collection: &str,
        points: Vec<VectorPoint>,
    ) -> Result<(), VectorDbError> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_upserts.load(Ordering::SeqCst) {
            return Err(VectorDbError::UpsertFailed {
                collection: collection.to_string(),
                message: "mock upsert failure".to_string(),
            });
        }

        let mut collections =
            self.collections
                .write()
                .map_err(|_| VectorDbError::UpsertFailed {
                    collection: collection.to_string(),
                    message: "lock poisoned".to_string(),
                })?;

        let coll =
            collections
                .get_mut(collection)
                .ok_or_else(|| VectorDbError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        for point in points {
            if point.vector.len() as u64 != coll.vector_size {
                return Err(VectorDbError::InvalidDimension {
                    expected: coll.vector_size as usize,
                    actual: point.vector.len(),
                });
            }

            coll.points.insert(
                point.id,
                MockStoredPoint {
                    vector: point.vector,
                    video_id: point.video_id,
                },
            );
        }

        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<SearchResult>, VectorDbError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_searches.load(Ordering::SeqCst) {
            return Err(VectorDbError::SearchFailed {
                collection: collection.to_string(),
                message: "mock search failure".to_string(),
            });
        }

        let collections = self
            .collections
            .read()
            .map_err(|_| VectorDbError::SearchFailed {
                collection: collection.to_string(),
                message: "lock poisoned".to_string(),
            })?;

        let coll =
            collections
                .get(collection)
                .ok_or_else(|| VectorDbError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        let mut results: Vec<SearchResult> = coll
            .points
            .iter()
            .map(|(id, p)| SearchResult {
                id: id.clone(),
                score: cosine_similarity(&query, &p.vector),
                video_id: Some(p.video_id.clone()),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        results.truncate(limit as usize);
        Ok(results)
    }

    async fn count_points(&self, collection: &str) -> Result<u64, VectorDbError> {
        self.point_count(collection)
            .map(|n| n as u64)
            .ok_or_else(|| VectorDbError::CollectionNotFound {
                collection: collection.to_string(),
            })
    }
}
