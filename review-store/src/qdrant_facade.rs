//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! The corpus never ranks by vector: every point carries the same
//! one-dimensional placeholder vector and all reads are filtered scrolls.

use std::collections::HashMap;

use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, Filter, PointStruct, ScrollPointsBuilder,
    UpsertPointsBuilder, Value as QValue, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::errors::StoreError;

/// Dimensionality of the placeholder vector stored with each point.
const PLACEHOLDER_DIM: u64 = 1;

/// A facade over the Qdrant client bound to one collection.
pub struct QdrantFacade {
    client: Qdrant,
    pub(crate) collection: String,
}

impl QdrantFacade {
    /// Creates a new facade from the given configuration.
    ///
    /// No network call happens here; connectivity problems surface on first use.
    pub fn new(cfg: &StoreConfig) -> Result<Self, StoreError> {
        cfg.validate()?;

        let mut builder = Qdrant::from_url(cfg.qdrant_url.trim());
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
        })
    }

    /// Ensures that the collection exists.
    ///
    /// - Already present → no-op.
    /// - Missing → created with the placeholder vector space.
    /// - A concurrent creator winning the race ("already exists") → success.
    pub async fn ensure_collection(&self) -> Result<(), StoreError> {
        if self.client.collection_exists(&self.collection).await? {
            debug!("Collection '{}' already exists", self.collection);
            return Ok(());
        }

        info!("Creating collection '{}'", self.collection);
        let created = self
            .client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(PLACEHOLDER_DIM, Distance::Dot)),
            )
            .await;

        match created {
            Ok(_) => {
                info!("Collection '{}' created successfully", self.collection);
                Ok(())
            }
            Err(err) if is_already_exists(&err.to_string()) => {
                warn!(
                    "Collection '{}' was created concurrently (error={})",
                    self.collection, err
                );
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Appends one point with a fresh UUID and the given payload.
    pub async fn insert(&self, payload: serde_json::Value) -> Result<(), StoreError> {
        let payload =
            Payload::try_from(payload).map_err(|e| StoreError::Payload(e.to_string()))?;
        let id = uuid::Uuid::new_v4().to_string();
        let point = PointStruct::new(id.clone(), vec![1.0_f32; PLACEHOLDER_DIM as usize], payload);

        let res = self
            .client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, vec![point]).wait(true))
            .await?;

        debug!(point_id = %id, result = ?res.result, "point appended");
        Ok(())
    }

    /// Returns payloads of up to `limit` points matching `filter`.
    pub async fn scroll(
        &self,
        filter: Filter,
        limit: u32,
    ) -> Result<Vec<serde_json::Value>, StoreError> {
        let res = self
            .client
            .scroll(
                ScrollPointsBuilder::new(&self.collection)
                    .filter(filter)
                    .limit(limit)
                    .with_payload(true)
                    .with_vectors(false),
            )
            .await?;

        let out: Vec<serde_json::Value> = res
            .result
            .into_iter()
            .map(|p| qpayload_to_json(p.payload))
            .collect();

        debug!("Scroll completed: {} points returned", out.len());
        Ok(out)
    }
}

/// Whether a Qdrant error message reports an existing collection.
fn is_already_exists(msg: &str) -> bool {
    msg.to_ascii_lowercase().contains("already exists")
}

/// Converts a Qdrant payload into JSON.
///
/// Only scalar values are kept; nested objects/lists map to `Null`.
fn qpayload_to_json(mut p: HashMap<String, QValue>) -> serde_json::Value {
    use qdrant_client::qdrant::value::Kind as K;
    let mut m = serde_json::Map::new();
    for (k, v) in p.drain() {
        let j = match v.kind {
            Some(K::StringValue(s)) => serde_json::Value::String(s),
            Some(K::IntegerValue(i)) => serde_json::Value::Number(i.into()),
            Some(K::DoubleValue(f)) => serde_json::json!(f),
            Some(K::BoolValue(b)) => serde_json::Value::Bool(b),
            _ => serde_json::Value::Null,
        };
        m.insert(k, j);
    }
    serde_json::Value::Object(m)
}
