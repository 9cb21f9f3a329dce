// ABOUTME: Cache behavior tests for the process-wide reference data cache
// ABOUTME: Single-flight loading, retry after failure and explicit reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::FixtureSource;
use futures_util::future::join_all;
use thali::reference::ReferenceCache;

#[tokio::test]
async fn first_load_fetches_each_table_once() {
    let source = FixtureSource::with_default_tables();
    let fetches = source.fetch_counter();
    let cache = ReferenceCache::new(Arc::new(source));

    let data = cache.get_or_load().await.unwrap();

    assert_eq!(data.nutrition.len(), 7);
    assert_eq!(data.unit_multipliers["katori"], 120.0);
    assert_eq!(data.category_labels.len(), 7);
    assert_eq!(fetches.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn repeated_loads_reuse_the_cached_tables() {
    let source = FixtureSource::with_default_tables();
    let fetches = source.fetch_counter();
    let cache = ReferenceCache::new(Arc::new(source));

    let first = cache.get_or_load().await.unwrap();
    let second = cache.get_or_load().await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(fetches.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn concurrent_callers_share_one_load() {
    let source = FixtureSource::with_default_tables();
    let fetches = source.fetch_counter();
    let cache = Arc::new(ReferenceCache::new(Arc::new(source)));

    let loads = (0..8).map(|_| {
        let cache = cache.clone();
        async move { cache.get_or_load().await }
    });
    let results = join_all(loads).await;

    for result in results {
        assert_eq!(result.unwrap().nutrition.len(), 7);
    }
    assert_eq!(fetches.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn failed_load_leaves_the_cache_retryable() {
    let source = FixtureSource::failing();
    let fetches = source.fetch_counter();
    let cache = ReferenceCache::new(Arc::new(source));

    assert!(cache.get_or_load().await.is_err());
    let after_first = fetches.load(Ordering::SeqCst);
    assert!(after_first >= 1);

    // The failure was not cached: a later call hits the source again.
    assert!(cache.get_or_load().await.is_err());
    assert!(fetches.load(Ordering::SeqCst) > after_first);
}

#[tokio::test]
async fn reset_forces_a_reload() {
    let source = FixtureSource::with_default_tables();
    let fetches = source.fetch_counter();
    let mut cache = ReferenceCache::new(Arc::new(source));

    cache.get_or_load().await.unwrap();
    assert_eq!(fetches.load(Ordering::SeqCst), 3);

    cache.reset();
    cache.get_or_load().await.unwrap();
    assert_eq!(fetches.load(Ordering::SeqCst), 6);
}
