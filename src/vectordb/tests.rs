use super::client::VectorDbClient;
use super::error::VectorDbError;
use super::mock::MockVectorDbClient;
use super::model::{VectorPoint, generate_point_id};

const TEST_COLLECTION: &str = "test_collection";
const TEST_VECTOR_SIZE: u64 = 16;

fn create_test_vector(seed: u64) -> Vec<f32> {
    (0..TEST_VECTOR_SIZE)
        .map(|i| {
            let mixed = (seed.wrapping_mul(31).wrapping_add(i * 7)) % 1000;
            mixed as f32 / 1000.0 - 0.5
        })
        .collect()
}

fn create_test_point(seed: u64) -> VectorPoint {
    VectorPoint::new(
        format!("point-{seed}"),
        create_test_vector(seed),
        format!("video{seed:06}"),
    )
}

async fn seeded_client(count: u64) -> MockVectorDbClient {
    let client = MockVectorDbClient::new();
    client
        .ensure_collection(TEST_COLLECTION, TEST_VECTOR_SIZE)
        .await
        .unwrap();

    let points: Vec<_> = (0..count).map(create_test_point).collect();
    client
        .upsert_points(TEST_COLLECTION, points)
        .await
        .unwrap();
    client
}

#[tokio::test]
async fn test_ensure_collection_idempotent() {
    let client = MockVectorDbClient::new();

    client
        .ensure_collection(TEST_COLLECTION, TEST_VECTOR_SIZE)
        .await
        .expect("should create collection");
    client
        .ensure_collection(TEST_COLLECTION, TEST_VECTOR_SIZE)
        .await
        .unwrap();

    assert_eq!(client.point_count(TEST_COLLECTION), Some(0));
}

#[tokio::test]
async fn test_ensure_collection_rejects_other_width() {
    let client = MockVectorDbClient::new();
    client
        .ensure_collection(TEST_COLLECTION, TEST_VECTOR_SIZE)
        .await
        .unwrap();

    let result = client.ensure_collection(TEST_COLLECTION, 32).await;
    assert!(matches!(
        result,
        Err(VectorDbError::InvalidDimension {
            expected: 32,
            actual: 16
        })
    ));
}

#[tokio::test]
async fn test_count_points() {
    let client = seeded_client(7).await;
    assert_eq!(client.count_points(TEST_COLLECTION).await.unwrap(), 7);

    let missing = client.count_points("missing").await;
    assert!(matches!(
        missing,
        Err(VectorDbError::CollectionNotFound { .. })
    ));
}

#[tokio::test]
async fn test_upsert_batch() {
    let client = seeded_client(25).await;
    assert_eq!(client.point_count(TEST_COLLECTION), Some(25));
    assert!(client.contains(TEST_COLLECTION, "point-3"));
    assert_eq!(client.upsert_calls(), 1);
}

#[tokio::test]
async fn test_upsert_replaces_existing_id() {
    let client = seeded_client(1).await;

    let replacement = VectorPoint::new(
        "point-0".to_string(),
        create_test_vector(999),
        "replacement".to_string(),
    );
    client
        .upsert_points(TEST_COLLECTION, vec![replacement])
        .await
        .unwrap();

    assert_eq!(client.point_count(TEST_COLLECTION), Some(1));
    assert_eq!(client.video_ids(TEST_COLLECTION), vec!["replacement"]);
}

#[tokio::test]
async fn test_upsert_to_nonexistent_collection() {
    let client = MockVectorDbClient::new();

    let result = client
        .upsert_points("nonexistent", vec![create_test_point(1)])
        .await;

    assert!(matches!(
        result,
        Err(VectorDbError::CollectionNotFound { .. })
    ));
}

#[tokio::test]
async fn test_upsert_wrong_dimension() {
    let client = seeded_client(0).await;

    let wrong = VectorPoint::new("bad".to_string(), vec![0.1; 3], "video".to_string());
    let result = client
        .upsert_points(TEST_COLLECTION, vec![wrong])
        .await;

    assert!(matches!(
        result,
        Err(VectorDbError::InvalidDimension {
            expected: 16,
            actual: 3
        })
    ));
}

#[tokio::test]
async fn test_search_results_sorted_and_limited() {
    let client = seeded_client(20).await;

    let results = client
        .search(TEST_COLLECTION, create_test_vector(4), 5)
        .await
        .unwrap();

    assert_eq!(results.len(), 5);
    for i in 1..results.len() {
        assert!(
            results[i - 1].score >= results[i].score,
            "Results should be sorted by score descending"
        );
    }
}

#[tokio::test]
async fn test_search_finds_exact_match_first() {
    let client = seeded_client(10).await;

    let results = client
        .search(TEST_COLLECTION, create_test_vector(7), 2)
        .await
        .unwrap();

    assert_eq!(results[0].id, "point-7");
    assert_eq!(results[0].video_id.as_deref(), Some("video000007"));
    assert!((results[0].score - 1.0).abs() < 1e-5);
    assert!(results[1].score < results[0].score);
}

#[tokio::test]
async fn test_search_empty_collection() {
    let client = seeded_client(0).await;

    let results = client
        .search(TEST_COLLECTION, create_test_vector(1), 2)
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_nonexistent_collection() {
    let client = MockVectorDbClient::new();

    let result = client.search("missing", create_test_vector(1), 1).await;
    assert!(matches!(
        result,
        Err(VectorDbError::CollectionNotFound { .. })
    ));
}

#[tokio::test]
async fn test_injected_failures() {
    let client = seeded_client(2).await;

    client.set_fail_upserts(true);
    let upsert = client
        .upsert_points(TEST_COLLECTION, vec![create_test_point(9)])
        .await;
    assert!(matches!(upsert, Err(VectorDbError::UpsertFailed { .. })));
    assert_eq!(client.point_count(TEST_COLLECTION), Some(2));

    client.set_fail_searches(true);
    let search = client.search(TEST_COLLECTION, create_test_vector(0), 1).await;
    assert!(matches!(search, Err(VectorDbError::SearchFailed { .. })));
    assert_eq!(client.search_calls(), 1);
}

#[test]
fn test_generate_point_id_is_unique_uuid() {
    let a = generate_point_id();
    let b = generate_point_id();

    assert_ne!(a, b);
    assert!(uuid::Uuid::parse_str(&a).is_ok());
}

#[test]
fn test_error_display_includes_collection() {
    let err = VectorDbError::SearchFailed {
        collection: "videos".to_string(),
        message: "timeout".to_string(),
    };
    assert!(err.to_string().contains("videos"));
    assert!(err.to_string().contains("timeout"));
}
