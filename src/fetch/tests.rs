use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use reqwest::StatusCode;

use super::http::classify_status;
use super::*;

#[test]
fn test_proxy_pool_counts_direct_option() {
    let pool = ProxyPool::new(vec!["http://a:b@1.1.1.1:80".to_string()]);
    assert_eq!(pool.options(), 2);
    assert_eq!(ProxyPool::default().options(), 1);
}

#[test]
fn test_empty_pool_always_direct() {
    let pool = ProxyPool::default();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        assert!(pool.choose(&mut rng).is_none());
    }
}

#[test]
fn test_proxy_pool_covers_every_option() {
    let pool = ProxyPool::new(vec![
        "http://u:p@10.0.0.1:1".to_string(),
        "http://u:p@10.0.0.2:2".to_string(),
    ]);
    let mut rng = StdRng::seed_from_u64(42);

    let mut direct = 0;
    let mut first = 0;
    let mut second = 0;
    for _ in 0..600 {
        match pool.choose(&mut rng) {
            None => direct += 1,
            Some("http://u:p@10.0.0.1:1") => first += 1,
            Some("http://u:p@10.0.0.2:2") => second += 1,
            Some(other) => panic!("unexpected proxy {other}"),
        }
    }

    for count in [direct, first, second] {
        assert!(count > 120, "selection should be roughly uniform: {count}");
    }
}

#[test]
fn test_proxy_choice_reproducible_with_seed() {
    let pool = ProxyPool::new(vec!["a".to_string(), "b".to_string(), "c".to_string()]);

    let picks = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..10)
            .map(|_| pool.choose(&mut rng).map(str::to_string))
            .collect::<Vec<_>>()
    };

    assert_eq!(picks(3), picks(3));
}

#[test]
fn test_classify_status() {
    assert!(matches!(
        classify_status("abc", StatusCode::FORBIDDEN),
        FetchError::Blocked { .. }
    ));
    assert!(matches!(
        classify_status("abc", StatusCode::TOO_MANY_REQUESTS),
        FetchError::Blocked { .. }
    ));
    assert!(matches!(
        classify_status("abc", StatusCode::NOT_FOUND),
        FetchError::Fake { .. }
    ));
    assert!(matches!(
        classify_status("abc", StatusCode::GONE),
        FetchError::Fake { .. }
    ));
    assert!(matches!(
        classify_status("abc", StatusCode::BAD_GATEWAY),
        FetchError::Other { .. }
    ));
}

#[tokio::test]
async fn test_unavailable_fetcher_reports_other() {
    let err = UnavailableFetcher
        .fetch("dQw4w9WgXcQ", 0, 10, None)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Other { .. }));
}

#[tokio::test]
async fn test_http_fetcher_rejects_invalid_proxy() {
    let fetcher =
        HttpMediaFetcher::new("http://127.0.0.1:9", Duration::from_millis(100)).unwrap();
    let err = fetcher
        .fetch("dQw4w9WgXcQ", 0, 10, Some("not a url"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Other { message, .. } if message.contains("invalid proxy")));
}

#[tokio::test]
async fn test_http_fetcher_direct_attempts_report_other() {
    let fetcher =
        HttpMediaFetcher::new("http://127.0.0.1:9/", Duration::from_millis(100)).unwrap();

    for _ in 0..2 {
        let err = fetcher
            .fetch("dQw4w9WgXcQ", 0, 10, None)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Other { .. }));
    }
}

#[tokio::test]
async fn test_scripted_fetcher_outcomes() {
    let fetcher = ScriptedMediaFetcher::new();
    fetcher.script("blocked0000", ScriptedFetch::Blocked);
    fetcher.script("fake0000000", ScriptedFetch::Fake);
    fetcher.script("other000000", ScriptedFetch::Other);

    let clip = fetcher.fetch("plain000000", 3, 9, None).await.unwrap();
    assert_eq!(clip.bytes, b"plain000000".to_vec());
    assert_eq!((clip.start_time, clip.end_time), (3, 9));

    assert!(matches!(
        fetcher.fetch("blocked0000", 0, 1, Some("p")).await,
        Err(FetchError::Blocked { .. })
    ));
    assert!(matches!(
        fetcher.fetch("fake0000000", 0, 1, None).await,
        Err(FetchError::Fake { .. })
    ));
    assert!(matches!(
        fetcher.fetch("other000000", 0, 1, None).await,
        Err(FetchError::Other { .. })
    ));

    let attempts = fetcher.attempts();
    assert_eq!(attempts.len(), 4);
    assert_eq!(attempts[1], ("blocked0000".to_string(), Some("p".to_string())));
}

#[tokio::test(start_paused = true)]
async fn test_scripted_hang_never_completes() {
    let fetcher = ScriptedMediaFetcher::new();
    fetcher.script("hang0000000", ScriptedFetch::Hang);

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        fetcher.fetch("hang0000000", 0, 1, None),
    )
    .await;
    assert!(result.is_err());
    assert_eq!(fetcher.peak_in_flight(), 1);
}
