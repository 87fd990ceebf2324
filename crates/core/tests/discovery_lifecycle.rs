//! Discovery run integration tests.
//!
//! These tests drive complete runs through the state machine with a mock
//! candidate source: classification, targeted collection, fallback,
//! cross-phase dedup and final ranking.

use std::sync::Arc;

use pricescout_core::testing::{fixtures, MockCandidateSource};
use pricescout_core::{
    DiscoveryConfig, DiscoveryEngine, DiscoveryPhase, FailureKind, SearchRequest, SourceError,
    StockStatus,
};

fn test_config() -> DiscoveryConfig {
    DiscoveryConfig {
        query_variants: vec!["{query}".to_string(), "giá rẻ nhất {query}".to_string()],
        run_deadline_secs: 10,
        fetch_timeout_secs: 5,
        classifier_snippets: 10,
    }
}

fn make_engine(source: Arc<MockCandidateSource>) -> DiscoveryEngine {
    DiscoveryEngine::new(source, fixtures::test_catalog(), test_config())
}

fn request(query: &str, limit: usize) -> SearchRequest {
    SearchRequest {
        query: query.to_string(),
        limit,
    }
}

#[tokio::test]
async fn test_cheapest_in_stock_offers_win() {
    let source = Arc::new(MockCandidateSource::new());
    source
        .set_phase_results(
            DiscoveryPhase::BroadDiscovery,
            vec![
                fixtures::in_stock_candidate(
                    "Lenovo ThinkPad X115",
                    "15.000.000₫",
                    "https://alpha.vn/p/x115",
                ),
                fixtures::in_stock_candidate(
                    "Lenovo ThinkPad X115 bản mới",
                    "14.500.000₫",
                    "https://beta.vn/p/x115",
                ),
                fixtures::out_of_stock_candidate(
                    "HP ProBook Y230",
                    "9.000.000₫",
                    "https://gamma.vn/p/y230",
                ),
            ],
        )
        .await;
    source
        .set_phase_results(DiscoveryPhase::TargetedCollection, vec![])
        .await;

    let engine = make_engine(Arc::clone(&source));
    let report = engine.run(&request("thinkpad x115", 2)).await;

    // The two in-stock X115 offers are distinct entries (different
    // retailers) sorted by price; the cheaper out-of-stock Y230 is
    // excluded because the in-stock set already fills the limit.
    assert_eq!(report.products.len(), 2);
    assert_eq!(report.products[0].retailer, "Beta");
    assert_eq!(report.products[0].price_vnd, 14_500_000);
    assert_eq!(report.products[1].retailer, "Alpha");
    assert_eq!(report.products[1].price_vnd, 15_000_000);

    assert_eq!(report.state.phase, DiscoveryPhase::Done);
    assert_eq!(report.state.candidate_count, 3);
    assert!(report.state.errors.is_empty());

    // Enough candidates after the first variant: the second one never ran.
    let targeted = source
        .tasks_for_phase(DiscoveryPhase::TargetedCollection)
        .await;
    assert_eq!(targeted.len(), 3);
}

#[tokio::test]
async fn test_blocked_broad_discovery_falls_back_to_direct_search() {
    let source = Arc::new(MockCandidateSource::new());
    source
        .set_task_handler(|task| match task.phase {
            DiscoveryPhase::BroadDiscovery => {
                Some(Err(SourceError::Blocked("reCAPTCHA challenge".to_string())))
            }
            DiscoveryPhase::FallbackDirectSearch
                if task.retailer_scope.as_deref() == Some("Alpha") =>
            {
                Some(Ok(vec![fixtures::in_stock_candidate(
                    "Dell Latitude E7440 cũ",
                    "8.500.000đ",
                    "https://alpha.vn/p/e7440",
                )]))
            }
            _ => Some(Ok(vec![])),
        })
        .await;

    let engine = make_engine(Arc::clone(&source));
    let report = engine.run(&request("latitude e7440", 2)).await;

    // No retry of the blocked phase, no targeted collection at all.
    assert_eq!(
        source.tasks_for_phase(DiscoveryPhase::BroadDiscovery).await.len(),
        1
    );
    assert!(source
        .tasks_for_phase(DiscoveryPhase::TargetedCollection)
        .await
        .is_empty());

    // Direct search hit the whole combined universe with locators.
    let fallback = source
        .tasks_for_phase(DiscoveryPhase::FallbackDirectSearch)
        .await;
    assert_eq!(fallback.len(), 3);
    assert!(fallback.iter().all(|t| t.task.locator.is_some()));

    // Exactly one blocked entry in the trail; the run itself succeeded.
    assert_eq!(report.state.phase, DiscoveryPhase::Done);
    assert_eq!(report.state.errors.len(), 1);
    assert_eq!(report.state.errors[0].kind, FailureKind::Blocked);
    assert_eq!(
        report.state.errors[0].phase,
        DiscoveryPhase::BroadDiscovery
    );

    assert_eq!(report.products.len(), 1);
    assert_eq!(report.products[0].retailer, "Alpha");
    assert_eq!(report.products[0].price_vnd, 8_500_000);
}

#[tokio::test]
async fn test_degrades_to_out_of_stock_when_nothing_confirmed() {
    let source = Arc::new(MockCandidateSource::new());
    source
        .set_phase_results(
            DiscoveryPhase::BroadDiscovery,
            vec![
                fixtures::out_of_stock_candidate(
                    "Asus Vivobook X515",
                    "12.000.000",
                    "https://alpha.vn/p/x515",
                ),
                fixtures::out_of_stock_candidate(
                    "Asus Vivobook X515 i5",
                    "11.000.000",
                    "https://beta.vn/p/x515",
                ),
                fixtures::out_of_stock_candidate(
                    "Asus Vivobook X515 i7",
                    "13.500.000",
                    "https://gamma.vn/p/x515",
                ),
            ],
        )
        .await;
    source
        .set_phase_results(DiscoveryPhase::TargetedCollection, vec![])
        .await;

    let engine = make_engine(source);
    let report = engine.run(&request("vivobook x515", 2)).await;

    assert_eq!(report.products.len(), 2);
    assert!(report
        .products
        .iter()
        .all(|o| o.stock_status == StockStatus::OutOfStock));
    assert_eq!(report.products[0].price_vnd, 11_000_000);
    assert_eq!(report.products[1].price_vnd, 12_000_000);
}

#[tokio::test]
async fn test_zero_candidates_is_a_successful_empty_run() {
    let source = Arc::new(MockCandidateSource::new());
    // Every phase answers, but with nothing.
    let engine = make_engine(Arc::clone(&source));
    let report = engine.run(&request("something nobody sells", 4)).await;

    assert!(report.products.is_empty());
    assert_eq!(report.state.candidate_count, 0);
    assert_eq!(report.state.phase, DiscoveryPhase::Done);

    // Empty broad discovery is recorded as inconclusive and the run
    // proceeded straight to direct search.
    assert_eq!(report.state.errors[0].kind, FailureKind::Inconclusive);
    assert_eq!(
        source
            .tasks_for_phase(DiscoveryPhase::FallbackDirectSearch)
            .await
            .len(),
        3
    );
}

#[tokio::test]
async fn test_dedup_keeps_cheapest_across_phases() {
    let source = Arc::new(MockCandidateSource::new());
    source
        .set_task_handler(|task| match task.phase {
            DiscoveryPhase::BroadDiscovery => Some(Ok(vec![fixtures::in_stock_candidate(
                "Lenovo ThinkPad X115",
                "15.500.000",
                "https://alpha.vn/p/x115",
            )])),
            DiscoveryPhase::FallbackDirectSearch
                if task.retailer_scope.as_deref() == Some("Alpha") =>
            {
                Some(Ok(vec![fixtures::in_stock_candidate(
                    "Lenovo ThinkPad X115 khuyến mãi",
                    "14.000.000",
                    "https://alpha.vn/p/x115-sale",
                )]))
            }
            _ => Some(Ok(vec![])),
        })
        .await;

    let engine = make_engine(source);
    // Limit above what broad+targeted deliver, forcing the fallback phase.
    let report = engine.run(&request("thinkpad x115", 2)).await;

    // Same (retailer, model) identity: one offer, minimum observed price.
    assert_eq!(report.state.candidate_count, 1);
    assert_eq!(report.products.len(), 1);
    assert_eq!(report.products[0].price_vnd, 14_000_000);
    assert_eq!(report.products[0].model_or_sku, "X115");
}

#[tokio::test]
async fn test_category_steers_targeted_universe() {
    let source = Arc::new(MockCandidateSource::new());
    source
        .set_phase_results(
            DiscoveryPhase::BroadDiscovery,
            vec![fixtures::in_stock_candidate(
                "Laptop Dell Inspiron N3520 chính hãng",
                "10.000.000",
                "https://alpha.vn/p/n3520",
            )],
        )
        .await;
    source
        .set_phase_results(DiscoveryPhase::TargetedCollection, vec![])
        .await;
    source
        .set_phase_results(DiscoveryPhase::FallbackDirectSearch, vec![])
        .await;

    let engine = make_engine(Arc::clone(&source));
    let report = engine.run(&request("inspiron n3520", 5)).await;

    // The snippet said "Laptop": targeted collection only consulted the
    // laptop retailers, while fallback widened to the full universe.
    let targeted = source
        .tasks_for_phase(DiscoveryPhase::TargetedCollection)
        .await;
    let scopes: std::collections::HashSet<String> = targeted
        .iter()
        .filter_map(|t| t.task.retailer_scope.clone())
        .collect();
    let expected: std::collections::HashSet<String> =
        ["Alpha", "Beta"].iter().map(|s| s.to_string()).collect();
    assert_eq!(scopes, expected);

    // Both query variants ran (shortfall never resolved).
    let queries: std::collections::HashSet<_> =
        targeted.iter().map(|t| t.task.query_text.clone()).collect();
    assert!(queries.contains("inspiron n3520"));
    assert!(queries.contains("giá rẻ nhất inspiron n3520"));

    let fallback_scopes: std::collections::HashSet<_> = source
        .tasks_for_phase(DiscoveryPhase::FallbackDirectSearch)
        .await
        .iter()
        .filter_map(|t| t.task.retailer_scope.clone())
        .collect();
    assert_eq!(fallback_scopes.len(), 3);

    assert_eq!(report.products.len(), 1);
}

#[tokio::test]
async fn test_expired_deadline_drops_fetches_without_calling_source() {
    let source = Arc::new(MockCandidateSource::new());
    let config = DiscoveryConfig {
        run_deadline_secs: 0,
        ..test_config()
    };
    let engine = DiscoveryEngine::new(source.clone(), fixtures::test_catalog(), config);

    let report = engine.run(&request("anything", 2)).await;

    assert!(report.products.is_empty());
    assert_eq!(source.task_count().await, 0);
    assert!(report
        .state
        .errors
        .iter()
        .all(|e| e.kind == FailureKind::Timeout));
    assert_eq!(report.state.phase, DiscoveryPhase::Done);
}

#[tokio::test]
async fn test_single_retailer_failure_leaves_others_unaffected() {
    let source = Arc::new(MockCandidateSource::new());
    source
        .set_task_handler(|task| match task.phase {
            DiscoveryPhase::BroadDiscovery => Some(Ok(vec![fixtures::in_stock_candidate(
                "Laptop HP Pavilion X360",
                "13.000.000",
                "https://alpha.vn/p/x360",
            )])),
            DiscoveryPhase::TargetedCollection
                if task.retailer_scope.as_deref() == Some("Beta") =>
            {
                Some(Err(SourceError::ConnectionFailed("refused".to_string())))
            }
            DiscoveryPhase::TargetedCollection
                if task.retailer_scope.as_deref() == Some("Alpha") =>
            {
                Some(Ok(vec![fixtures::in_stock_candidate(
                    "Laptop HP Pavilion X360 giá sốc",
                    "12.500.000",
                    "https://alpha.vn/p/x360-2",
                )]))
            }
            _ => Some(Ok(vec![])),
        })
        .await;

    let engine = make_engine(source);
    let report = engine.run(&request("pavilion x360", 1)).await;

    // Beta's failures are in the trail; Alpha's cheaper offer still won.
    assert!(report
        .state
        .errors
        .iter()
        .any(|e| e.retailer.as_deref() == Some("Beta")));
    assert_eq!(report.products.len(), 1);
    assert_eq!(report.products[0].price_vnd, 12_500_000);
}
