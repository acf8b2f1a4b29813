use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use nd_cache::{CacheKey, CacheStats, ResultCache};
use nd_crypto::ContentHasher;
use nd_diff::{compute_stats, MyersEngine, ScriptEngine};
use nd_types::{DiffKey, DiffStats};

use crate::config::EngineConfig;
use crate::error::SdkResult;
use crate::request::DiffRequest;

/// Cached change statistics between two versions of a text.
///
/// The service owns its result cache; its lifetime is the cache's lifetime.
/// It is `Send + Sync` and meant to be shared (e.g. behind an `Arc`) by
/// every caller in an editing session. The engine itself keeps no state
/// between calls.
pub struct DiffService<E = MyersEngine> {
    engine: E,
    cache: ResultCache,
}

impl DiffService {
    /// A service with the default engine bounds and cache capacity.
    pub fn new() -> Self {
        let config = EngineConfig::default();
        Self::with_engine(MyersEngine::default(), config.cache_capacity)
    }

    /// A service configured from `config`.
    pub fn with_config(config: &EngineConfig) -> SdkResult<Self> {
        let engine = MyersEngine::new(config.engine_options())?;
        Ok(Self::with_engine(engine, config.cache_capacity))
    }
}

impl Default for DiffService {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ScriptEngine> DiffService<E> {
    /// A service using a custom edit-script engine.
    pub fn with_engine(engine: E, cache_capacity: usize) -> Self {
        Self {
            engine,
            cache: ResultCache::new(cache_capacity),
        }
    }

    // ---- Comparison ----

    /// Compare `original` against `current`.
    ///
    /// Without `explicit_key` the cache key is derived from the content, so
    /// identical pairs always share a slot. With one, the caller vouches
    /// that the key identifies this exact pair.
    pub fn compute_diff(
        &self,
        original: &str,
        current: &str,
        explicit_key: Option<&str>,
    ) -> SdkResult<Arc<DiffStats>> {
        let request = DiffRequest {
            key: explicit_key.map(str::to_string),
            include_content: false,
        };
        self.compute_diff_with(original, current, &request)
    }

    /// Compare `original` against `current` with full request options.
    ///
    /// A cached result is returned as-is without rerunning the engine. A
    /// failed comparison is reported as an error and nothing is cached.
    pub fn compute_diff_with(
        &self,
        original: &str,
        current: &str,
        request: &DiffRequest,
    ) -> SdkResult<Arc<DiffStats>> {
        let key = match request.key.as_deref() {
            Some(explicit) => DiffKey::explicit(explicit)?,
            None => self.derive_key(original, current),
        };
        let cache_key = CacheKey::new(key, request.include_content);

        if let Some(hit) = self.cache.get(&cache_key) {
            debug!(key = %cache_key.key, "diff cache hit");
            return Ok(hit);
        }

        let started = Instant::now();
        let stats = Arc::new(compute_stats(
            &self.engine,
            original,
            current,
            request.include_content,
        )?);
        debug!(
            key = %cache_key.key,
            elapsed_ms = started.elapsed().as_millis() as u64,
            lines_changed = stats.lines_changed(),
            "diff computed"
        );

        self.cache.put(cache_key, Arc::clone(&stats));
        Ok(stats)
    }

    /// The content-addressed key for a pair.
    pub fn derive_key(&self, original: &str, current: &str) -> DiffKey {
        ContentHasher::PAIR.derive_key(original, current)
    }

    // ---- Cache management ----

    /// Hit, miss and eviction counters of the result cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached result, e.g. when an editing session ends.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// The result cache.
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// The edit-script engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl<E> std::fmt::Debug for DiffService<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiffService")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use nd_diff::{DiffError, DiffResult, EditScript, EngineOptions, Granularity};

    use crate::error::SdkError;

    /// Wraps the real engine and counts how often it runs.
    #[derive(Default)]
    struct CountingEngine {
        inner: MyersEngine,
        calls: AtomicUsize,
    }

    impl CountingEngine {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ScriptEngine for CountingEngine {
        fn script(
            &self,
            original: &str,
            current: &str,
            granularity: Granularity,
        ) -> DiffResult<EditScript> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.script(original, current, granularity)
        }
    }

    fn counting_service(capacity: usize) -> DiffService<CountingEngine> {
        DiffService::with_engine(CountingEngine::default(), capacity)
    }

    #[test]
    fn identical_text_reports_totals_only() {
        let service = DiffService::new();
        let stats = service.compute_diff("one two\nthree", "one two\nthree", None).unwrap();
        assert!(stats.is_unchanged());
        assert_eq!(stats.total_lines, 2);
        assert_eq!(stats.total_words, 3);
        assert_eq!(stats.total_chars, 13);
    }

    #[test]
    fn identical_text_skips_the_engine() {
        let service = counting_service(10);
        service.compute_diff("same", "same", None).unwrap();
        assert_eq!(service.engine().calls(), 0);
        assert_eq!(service.cache().len(), 1);
    }

    #[test]
    fn empty_to_hello_world() {
        let service = DiffService::new();
        let stats = service.compute_diff("", "hello world", None).unwrap();
        assert_eq!(stats.chars_added, 11);
        assert_eq!(stats.words_added, 2);
        assert_eq!(stats.chars_removed, 0);
        assert_eq!(stats.words_removed, 0);
        assert_eq!(stats.total_words, 2);
    }

    #[test]
    fn edited_line_counts_as_modified() {
        let service = DiffService::new();
        let stats = service.compute_diff("a\nb\nc", "a\nx\nc", None).unwrap();
        assert_eq!(stats.lines_added, 0);
        assert_eq!(stats.lines_removed, 0);
        assert_eq!(stats.lines_modified, 1);
    }

    #[test]
    fn reversed_comparison_swaps_counts() {
        let service = DiffService::new();
        for (a, b) in [("draft", "draft two"), ("\n.  \n.  a.a", "\n.a \n")] {
            let forward = service.compute_diff(a, b, None).unwrap();
            let backward = service.compute_diff(b, a, None).unwrap();
            assert_eq!(forward.chars_added, backward.chars_removed);
            assert_eq!(forward.chars_removed, backward.chars_added);
            assert_eq!(forward.words_added, backward.words_removed);
            assert_eq!(forward.words_removed, backward.words_added);
        }
    }

    #[test]
    fn repeat_call_hits_cache_without_rerunning_engine() {
        let service = counting_service(10);
        let first = service.compute_diff("saved text", "edited text", None).unwrap();
        let calls_after_first = service.engine().calls();
        assert_eq!(calls_after_first, 2, "one char script and one line script");

        let second = service.compute_diff("saved text", "edited text", None).unwrap();
        assert_eq!(service.engine().calls(), calls_after_first);
        assert_eq!(*first, *second);
        assert!(Arc::ptr_eq(&first, &second));

        let stats = service.cache_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn explicit_key_is_trusted() {
        let service = counting_service(10);
        let first = service.compute_diff("a", "b", Some("doc-1")).unwrap();
        // Same key, different text: the caller promised the key identifies
        // the pair, so the cached result is served.
        let second = service.compute_diff("x", "yyyy", Some("doc-1")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(service.engine().calls(), 2);
    }

    #[test]
    fn explicit_and_derived_keys_do_not_mix() {
        let service = counting_service(10);
        service.compute_diff("a", "b", Some("doc-1")).unwrap();
        service.compute_diff("a", "b", None).unwrap();
        assert_eq!(service.engine().calls(), 4);
        assert_eq!(service.cache().len(), 2);
    }

    #[test]
    fn blank_explicit_key_is_rejected() {
        let service = DiffService::new();
        let err = service.compute_diff("a", "b", Some("  ")).unwrap_err();
        assert!(matches!(err, SdkError::Key(_)));
    }

    #[test]
    fn content_requests_have_their_own_entries() {
        let service = counting_service(10);
        let plain = service.compute_diff("a\nb\nc", "a\nx\nc", None).unwrap();
        assert_eq!(plain.diff_content, None);

        let request = DiffRequest::new().with_content();
        let full = service.compute_diff_with("a\nb\nc", "a\nx\nc", &request).unwrap();
        assert_eq!(full.diff_content.as_deref(), Some(" a\n-b\n+x\n c\n"));
        assert_eq!(full.without_content(), *plain);
        assert_eq!(service.engine().calls(), 4);

        service.compute_diff_with("a\nb\nc", "a\nx\nc", &request).unwrap();
        assert_eq!(service.engine().calls(), 4);
    }

    #[test]
    fn oversized_input_is_an_error_and_not_cached() {
        let config = EngineConfig {
            max_input_chars: Some(16),
            ..Default::default()
        };
        let service = DiffService::with_config(&config).unwrap();
        let err = service
            .compute_diff("short", "this text is far too long", None)
            .unwrap_err();
        assert!(matches!(
            err,
            SdkError::Diff(DiffError::ResourceExhausted { limit: 16, .. })
        ));
        assert!(service.cache().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EngineConfig {
            max_input_chars: Some(0),
            ..Default::default()
        };
        assert!(DiffService::with_config(&config).is_err());
    }

    #[test]
    fn cache_stays_bounded_and_survivors_are_stable() {
        let service = counting_service(100);
        let mut first_results = Vec::new();
        for i in 0..150 {
            let current = format!("line {i}\n");
            first_results.push(service.compute_diff("line\n", &current, None).unwrap());
            assert!(service.cache().len() <= 100);
        }
        for (i, first) in first_results.iter().enumerate() {
            let current = format!("line {i}\n");
            let again = service.compute_diff("line\n", &current, None).unwrap();
            assert_eq!(**first, *again);
        }
        assert!(service.cache_stats().sweeps >= 1);
    }

    #[test]
    fn disabled_cache_always_recomputes() {
        let service = counting_service(0);
        service.compute_diff("a", "b", None).unwrap();
        service.compute_diff("a", "b", None).unwrap();
        assert_eq!(service.engine().calls(), 4);
    }

    #[test]
    fn clear_cache_forces_recompute() {
        let service = counting_service(10);
        service.compute_diff("a", "b", None).unwrap();
        service.clear_cache();
        service.compute_diff("a", "b", None).unwrap();
        assert_eq!(service.engine().calls(), 4);
    }

    #[test]
    fn cleanup_can_be_switched_off() {
        let config = EngineConfig {
            semantic_cleanup: false,
            ..Default::default()
        };
        let service = DiffService::with_config(&config).unwrap();
        assert_eq!(
            service.engine().options(),
            &EngineOptions {
                semantic_cleanup: false,
                ..Default::default()
            }
        );
    }

    #[test]
    fn shared_across_threads() {
        let service = Arc::new(DiffService::new());
        let expected = service.compute_diff("base\n", "base\nmore\n", None).unwrap();
        thread::scope(|scope| {
            for t in 0..4 {
                let service = Arc::clone(&service);
                let expected = Arc::clone(&expected);
                scope.spawn(move || {
                    for i in 0..50 {
                        let hit = service.compute_diff("base\n", "base\nmore\n", None).unwrap();
                        assert_eq!(*hit, *expected);
                        let other = format!("base\n{t}-{i}\n");
                        let stats = service.compute_diff("base\n", &other, None).unwrap();
                        assert_eq!(stats.lines_added, 1);
                    }
                });
            }
        });
        assert!(service.cache().len() <= 100);
    }
}
