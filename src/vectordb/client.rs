use std::future::Future;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::vectors_config::Config as VectorsConfigKind;
use qdrant_client::qdrant::{
    CollectionInfo, CountPointsBuilder, CreateCollectionBuilder, Distance, PointStruct,
    SearchPointsBuilder, UpsertPointsBuilder, VectorParamsBuilder,
};
use tracing::{debug, info};

use super::error::VectorDbError;
use super::model::{SearchResult, VectorPoint};

/// Video embedding index backed by Qdrant (cosine distance, one unnamed vector per point).
#[derive(Clone)]
pub struct QdrantClient {
    client: Qdrant,
    url: String,
}

impl std::fmt::Debug for QdrantClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QdrantClient")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl QdrantClient {
    /// Builds a client for `url`. No request is sent until first use.
    pub fn new(url: &str) -> Result<Self, VectorDbError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| VectorDbError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub async fn health_check(&self) -> Result<(), VectorDbError> {
        self.client
            .health_check()
            .await
            .map_err(|e| VectorDbError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Creates `name` if missing; otherwise checks that its vectors are
    /// `vector_size` wide.
    pub async fn ensure_collection(
        &self,
        name: &str,
        vector_size: u64,
    ) -> Result<(), VectorDbError> {
        let setup_failed = |e: qdrant_client::QdrantError| VectorDbError::CollectionSetupFailed {
            collection: name.to_string(),
            message: e.to_string(),
        };

        if !self.client.collection_exists(name).await.map_err(setup_failed)? {
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(name)
                        .vectors_config(VectorParamsBuilder::new(vector_size, Distance::Cosine))
                        .on_disk_payload(true),
                )
                .await
                .map_err(setup_failed)?;
            info!(collection = %name, vector_size, "Created video embedding collection");
            return Ok(());
        }

        let info = self
            .client
            .collection_info(name)
            .await
            .map_err(setup_failed)?
            .result;

        match info.as_ref().and_then(configured_vector_size) {
            Some(existing) if existing != vector_size => Err(VectorDbError::InvalidDimension {
                expected: vector_size as usize,
                actual: existing as usize,
            }),
            _ => Ok(()),
        }
    }

    pub async fn upsert_points(
        &self,
        collection: &str,
        points: Vec<VectorPoint>,
    ) -> Result<(), VectorDbError> {
        if points.is_empty() {
            return Ok(());
        }

        let count = points.len();
        let points: Vec<PointStruct> = points
            .into_iter()
            .map(|p| {
                let payload = p.payload();
                PointStruct::new(p.id, p.vector, payload)
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection, points).wait(true))
            .await
            .map_err(|e| VectorDbError::UpsertFailed {
                collection: collection.to_string(),
                message: e.to_string(),
            })?;

        debug!(collection = %collection, count, "Upserted video embeddings");
        Ok(())
    }

    /// Up to `limit` nearest points, best match first.
    pub async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<SearchResult>, VectorDbError> {
        let response = self
            .client
            .search_points(SearchPointsBuilder::new(collection, query, limit).with_payload(true))
            .await
            .map_err(|e| VectorDbError::SearchFailed {
                collection: collection.to_string(),
                message: e.to_string(),
            })?;

        Ok(response
            .result
            .into_iter()
            .filter_map(SearchResult::from_scored_point)
            .collect())
    }

    pub async fn count_points(&self, collection: &str) -> Result<u64, VectorDbError> {
        let response = self
            .client
            .count(CountPointsBuilder::new(collection).exact(true))
            .await
            .map_err(|e| VectorDbError::CountFailed {
                collection: collection.to_string(),
                message: e.to_string(),
            })?;

        Ok(response.result.map_or(0, |r| r.count))
    }
}

fn configured_vector_size(info: &CollectionInfo) -> Option<u64> {
    let vectors = info.config.as_ref()?.params.as_ref()?.vectors_config.as_ref()?;
    match vectors.config.as_ref()? {
        VectorsConfigKind::Params(params) => Some(params.size),
        VectorsConfigKind::ParamsMap(_) => None,
    }
}

/// The index operations the scoring pipeline relies on.
pub trait VectorDbClient: Send + Sync {
    /// Creates the collection if missing, rejecting an existing one of another width.
    fn ensure_collection(
        &self,
        name: &str,
        vector_size: u64,
    ) -> impl Future<Output = Result<(), VectorDbError>> + Send;

    /// Returns once the points are searchable.
    fn upsert_points(
        &self,
        collection: &str,
        points: Vec<VectorPoint>,
    ) -> impl Future<Output = Result<(), VectorDbError>> + Send;

    /// Up to `limit` nearest points by cosine similarity, best match first.
    fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<SearchResult>, VectorDbError>> + Send;

    fn count_points(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<u64, VectorDbError>> + Send;
}

impl VectorDbClient for QdrantClient {
    async fn ensure_collection(&self, name: &str, vector_size: u64) -> Result<(), VectorDbError> {
        QdrantClient::ensure_collection(self, name, vector_size).await
    }

    async fn upsert_points(
        &self,
        collection: &str,
        points: Vec<VectorPoint>,
    ) -> Result<(), VectorDbError> {
        QdrantClient::upsert_points(self, collection, points).await
    }

    async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<SearchResult>, VectorDbError> {
        QdrantClient::search(self, collection, query, limit).await
    }

    async fn count_points(&self, collection: &str) -> Result<u64, VectorDbError> {
        QdrantClient::count_points(self, collection).await
    }
}
