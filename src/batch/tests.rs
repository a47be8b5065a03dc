use super::*;

fn metadata(video_id: &str, start_time: u64, end_time: u64) -> VideoMetadata {
    VideoMetadata {
        video_id: video_id.to_string(),
        description: "a cat playing piano".to_string(),
        views: 0,
        start_time,
        end_time,
        video_emb: vec![1.0, 0.0],
        audio_emb: vec![0.0, 1.0],
        description_emb: vec![1.0, 1.0],
    }
}

#[test]
fn test_is_valid_id_accepts_eleven_url_safe_chars() {
    assert!(is_valid_id("dQw4w9WgXcQ"));
    assert!(is_valid_id("abc_DEF-123"));
}

#[test]
fn test_is_valid_id_rejects_malformed() {
    assert!(!is_valid_id(""));
    assert!(!is_valid_id("dQw4w9WgXc"));
    assert!(!is_valid_id("dQw4w9WgXcQQ"));
    assert!(!is_valid_id("dQw4w9WgX!Q"));
    assert!(!is_valid_id("dQw4w9 gXcQ"));
}

#[test]
fn test_duration() {
    assert_eq!(metadata("dQw4w9WgXcQ", 10, 25).duration(), Some(15));
    assert_eq!(metadata("dQw4w9WgXcQ", 25, 10).duration(), None);
}

#[test]
fn test_batch_deserializes_from_request_json() {
    let json = r#"{
        "query": "cats",
        "num_videos": 2,
        "video_metadata": [{
            "video_id": "dQw4w9WgXcQ",
            "description": "a cat",
            "start_time": 0,
            "end_time": 10,
            "video_emb": [0.1, 0.2],
            "audio_emb": [0.3, 0.4],
            "description_emb": [0.5, 0.6]
        }]
    }"#;

    let batch: VideosBatch = serde_json::from_str(json).expect("valid batch json");
    assert_eq!(batch.num_videos, 2);
    assert_eq!(batch.video_metadata.len(), 1);
    assert_eq!(batch.video_metadata[0].views, 0);
    assert_eq!(batch.video_metadata[0].duration(), Some(10));
}

#[test]
fn test_short_response_serializes_score_only() {
    let response = ScoreResponse::Short { score: -5.0 };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json, serde_json::json!({ "score": -5.0 }));
    assert!(response.extended().is_none());
}

#[test]
fn test_extended_response_shape() {
    let response = ScoreResponse::Extended(ExtendedScore {
        is_unique: vec![true, false],
        description_relevance_scores: vec![0.5],
        query_relevance_scores: vec![0.25],
        novelty_score: 0.5,
        score: 0.25,
    });

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["is_unique"], serde_json::json!([true, false]));
    assert_eq!(json["novelty_score"], serde_json::json!(0.5));
    assert_eq!(response.score(), 0.25);

    let back: ScoreResponse = serde_json::from_value(json).unwrap();
    assert_eq!(back, response);
}
