pub mod directory;
pub mod http;

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tracing::debug;

use crate::board::RawClueList;

pub use directory::DirectorySource;
pub use http::HttpSource;

#[derive(Debug, Error)]
pub enum FetchError {
    #[cfg(feature = "network")]
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[cfg(feature = "network")]
    #[error("request for category {category} failed: {source}")]
    Request {
        category: u32,
        #[source]
        source: reqwest::Error,
    },
    #[error("category {category} returned HTTP {status}")]
    Status { category: u32, status: u16 },
    #[error("category {category} is not a clue list: {source}")]
    Decode {
        category: u32,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not read category {category}: {source}")]
    Io {
        category: u32,
        #[source]
        source: std::io::Error,
    },
    #[error("fetch worker for category {category} panicked")]
    WorkerPanicked { category: u32 },
    #[error("built without network support")]
    NetworkDisabled,
}

/// Somewhere clue lists can be pulled from, one category at a time.
pub trait CategorySource: Send + Sync {
    fn fetch_category(&self, category: u32) -> Result<RawClueList, FetchError>;
}

/// Category indices requested for a page. One extra category past `count`
/// is always included so a dead category does not shrink the board.
pub fn category_window(offset: u32, count: u32) -> RangeInclusive<u32> {
    offset..=offset.saturating_add(count)
}

/// Fetch every category in the window concurrently and return the lists in
/// request order. Any single failure fails the whole batch.
pub fn fetch_categories<S: CategorySource + ?Sized>(
    source: &S,
    offset: u32,
    count: u32,
) -> Result<Vec<RawClueList>, FetchError> {
    let window = category_window(offset, count);
    debug!(start = window.start(), end = window.end(), "fetching category window");

    thread::scope(|scope| {
        let handles: Vec<_> = window
            .map(|category| (category, scope.spawn(move || source.fetch_category(category))))
            .collect();

        // Join all workers first. A panic left unjoined re-panics when the
        // scope ends.
        let joined: Vec<_> = handles
            .into_iter()
            .map(|(category, handle)| (category, handle.join()))
            .collect();

        joined
            .into_iter()
            .map(|(category, outcome)| {
                outcome.map_err(|_| FetchError::WorkerPanicked { category })?
            })
            .collect()
    })
}

/// Run `fetch_categories` on a background thread and hand the outcome to
/// `on_done` from that thread.
pub fn spawn_fetch<F>(
    source: Arc<dyn CategorySource>,
    offset: u32,
    count: u32,
    on_done: F,
) -> JoinHandle<()>
where
    F: FnOnce(Result<Vec<RawClueList>, FetchError>) + Send + 'static,
{
    thread::spawn(move || on_done(fetch_categories(source.as_ref(), offset, count)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Mutex, mpsc};
    use std::time::Duration;

    use super::*;
    use crate::board::{CategoryRef, Clue};

    struct MapSource {
        lists: HashMap<u32, RawClueList>,
        requested: Mutex<Vec<u32>>,
        failing: Option<u32>,
    }

    impl MapSource {
        fn new(categories: impl IntoIterator<Item = u32>) -> Self {
            let lists = categories
                .into_iter()
                .map(|c| {
                    let clue = Clue {
                        id: i64::from(c) * 10,
                        question: String::new(),
                        answer: String::new(),
                        value: Some(100),
                        category: CategoryRef {
                            title: format!("c{c}"),
                        },
                        daily_double: false,
                    };
                    (c, vec![clue])
                })
                .collect();
            Self {
                lists,
                requested: Mutex::new(Vec::new()),
                failing: None,
            }
        }
    }

    impl CategorySource for MapSource {
        fn fetch_category(&self, category: u32) -> Result<RawClueList, FetchError> {
            self.requested.lock().unwrap().push(category);
            // Earlier categories finish last, so ordering can't come from completion.
            thread::sleep(Duration::from_millis(u64::from(20u32.saturating_sub(category))));
            if self.failing == Some(category) {
                return Err(FetchError::Status {
                    category,
                    status: 500,
                });
            }
            Ok(self.lists.get(&category).cloned().unwrap_or_default())
        }
    }

    #[test]
    fn test_window_includes_one_extra_category() {
        assert_eq!(category_window(0, 6), 0..=6);
        assert_eq!(category_window(12, 6).count(), 7);
        assert_eq!(category_window(u32::MAX, 6), u32::MAX..=u32::MAX);
    }

    #[test]
    fn test_results_follow_request_order() {
        let source = MapSource::new(0..20);
        let lists = fetch_categories(&source, 3, 4).unwrap();
        let ids: Vec<_> = lists.iter().map(|l| l[0].id).collect();
        assert_eq!(ids, vec![30, 40, 50, 60, 70]);

        let mut requested = source.requested.lock().unwrap().clone();
        requested.sort_unstable();
        assert_eq!(requested, vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_unknown_categories_come_back_empty() {
        let source = MapSource::new([0]);
        let lists = fetch_categories(&source, 0, 2).unwrap();
        assert_eq!(lists.len(), 3);
        assert_eq!(lists[0].len(), 1);
        assert!(lists[1].is_empty());
        assert!(lists[2].is_empty());
    }

    #[test]
    fn test_spawn_fetch_reports_through_callback() {
        let source: Arc<dyn CategorySource> = Arc::new(MapSource::new(0..4));
        let (tx, rx) = mpsc::channel();
        let handle = spawn_fetch(source, 1, 2, move |result| {
            tx.send(result).unwrap();
        });
        handle.join().unwrap();
        let lists = rx.recv().unwrap().unwrap();
        assert_eq!(lists.len(), 3);
        assert_eq!(lists[2][0].id, 30);
    }

    struct FlakySource;

    impl CategorySource for FlakySource {
        fn fetch_category(&self, category: u32) -> Result<RawClueList, FetchError> {
            match category {
                0 => Err(FetchError::Status {
                    category,
                    status: 500,
                }),
                1 => {
                    // Let category 0 report first.
                    thread::sleep(Duration::from_millis(20));
                    panic!("worker for category {category} blew up");
                }
                _ => Ok(Vec::new()),
            }
        }
    }

    #[test]
    fn test_error_alongside_panicking_worker_returns_err() {
        let result = std::panic::catch_unwind(|| fetch_categories(&FlakySource, 0, 1));
        let err = result.expect("fetch_categories must not panic").unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status {
                category: 0,
                status: 500
            }
        ));
    }

    #[test]
    fn test_panicking_worker_maps_to_error() {
        let err = fetch_categories(&FlakySource, 1, 0).unwrap_err();
        assert!(matches!(err, FetchError::WorkerPanicked { category: 1 }));
    }

    #[test]
    fn test_single_failure_fails_the_batch() {
        let mut source = MapSource::new(0..10);
        source.failing = Some(2);
        let err = fetch_categories(&source, 0, 6).unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status {
                category: 2,
                status: 500
            }
        ));
    }
}
