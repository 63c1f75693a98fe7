// Keyed async loading with latest-wins semantics.
//
// A view that depends on a selection (draft year, owner, category) fetches
// through a `KeyedLoader`. Each selection bumps a generation counter; results
// come back tagged with the generation they were requested under, and any
// result whose generation is no longer current is discarded unseen.

use std::fmt;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::ApiError;
use crate::model::EmptyResult;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// What a single view currently has to show.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState<T> {
    #[default]
    Idle,
    Loading,
    /// Fetch succeeded with nothing to display.
    Empty,
    Loaded(T),
    /// Fetch failed; holds the raw error message.
    Failed(String),
}

impl<T: EmptyResult> ViewState<T> {
    pub fn from_result<E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) if data.is_empty_result() => ViewState::Empty,
            Ok(data) => ViewState::Loaded(data),
            Err(e) => ViewState::Failed(e.to_string()),
        }
    }
}

impl<T> ViewState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ViewState::Empty)
    }
}

// ---------------------------------------------------------------------------
// KeyedLoader
// ---------------------------------------------------------------------------

/// Handle for one in-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket<K> {
    pub key: K,
    pub generation: u64,
}

/// A completed fetch on its way back to the loader.
#[derive(Debug)]
pub struct LoadEvent<K, T> {
    pub ticket: LoadTicket<K>,
    pub result: Result<T, ApiError>,
}

/// Tracks the active key for one view and applies only the latest result.
#[derive(Debug)]
pub struct KeyedLoader<K, T> {
    generation: u64,
    key: Option<K>,
    state: ViewState<T>,
}

impl<K, T> Default for KeyedLoader<K, T> {
    fn default() -> Self {
        Self {
            generation: 0,
            key: None,
            state: ViewState::Idle,
        }
    }
}

impl<K: Clone + PartialEq + fmt::Debug, T: EmptyResult> KeyedLoader<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `key`. Supersedes whatever was in flight and moves to `Loading`.
    pub fn begin(&mut self, key: K) -> LoadTicket<K> {
        self.generation += 1;
        self.key = Some(key.clone());
        self.state = ViewState::Loading;
        LoadTicket {
            key,
            generation: self.generation,
        }
    }

    /// Apply a finished fetch. Returns `false` (and leaves state untouched)
    /// when the ticket has been superseded by a later `begin`.
    pub fn complete<E: fmt::Display>(&mut self, ticket: LoadTicket<K>, result: Result<T, E>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Discarding stale load for {:?} (gen: {}, current gen: {})",
                ticket.key, ticket.generation, self.generation
            );
            return false;
        }
        self.state = ViewState::from_result(result);
        true
    }

    pub fn apply(&mut self, event: LoadEvent<K, T>) -> bool {
        self.complete(event.ticket, event.result)
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Run `fetch` on the runtime and deliver its result, tagged with `ticket`,
/// over `tx`. A closed receiver is not an error: the view is gone.
pub fn spawn_load<K, T, Fut>(
    ticket: LoadTicket<K>,
    tx: mpsc::Sender<LoadEvent<K, T>>,
    fetch: Fut,
) -> JoinHandle<()>
where
    K: Send + 'static,
    T: Send + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    tokio::spawn(async move {
        let result = fetch.await;
        let _ = tx.send(LoadEvent { ticket, result }).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Payload(Vec<u32>);

    impl EmptyResult for Payload {
        fn is_empty_result(&self) -> bool {
            self.0.is_empty()
        }
    }

    #[test]
    fn view_state_from_result() {
        assert_eq!(
            ViewState::from_result(Ok::<_, String>(Payload(vec![1]))),
            ViewState::Loaded(Payload(vec![1]))
        );
        assert_eq!(
            ViewState::from_result(Ok::<_, String>(Payload(vec![]))),
            ViewState::Empty
        );
        assert_eq!(
            ViewState::<Payload>::from_result(Err("connection refused")),
            ViewState::Failed("connection refused".into())
        );
    }

    #[test]
    fn begin_supersedes_previous_ticket() {
        let mut loader: KeyedLoader<i32, Payload> = KeyedLoader::new();
        assert_eq!(loader.state(), &ViewState::Idle);

        let first = loader.begin(2023);
        let second = loader.begin(2024);
        assert!(loader.state().is_loading());
        assert_eq!(loader.key(), Some(&2024));

        assert!(loader.complete(second, Ok::<_, String>(Payload(vec![24]))));
        assert!(!loader.complete(first, Ok::<_, String>(Payload(vec![23]))));
        assert_eq!(loader.state().data(), Some(&Payload(vec![24])));
    }

    #[test]
    fn stale_error_does_not_clobber_loading_state() {
        let mut loader: KeyedLoader<i32, Payload> = KeyedLoader::new();
        let stale = loader.begin(1);
        loader.begin(2);
        assert!(!loader.complete(stale, Err::<Payload, _>("timeout")));
        assert!(loader.state().is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_order_results_render_latest_selection() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut loader: KeyedLoader<i32, Payload> = KeyedLoader::new();

        // Y1 is slow, Y2 is fast: Y2 resolves first, Y1 arrives afterwards.
        let y1 = loader.begin(2023);
        spawn_load(y1, tx.clone(), async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok(Payload(vec![2023]))
        });
        let y2 = loader.begin(2024);
        spawn_load(y2, tx.clone(), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(Payload(vec![2024]))
        });
        drop(tx);

        let mut applied = Vec::new();
        while let Some(event) = rx.recv().await {
            let key = event.ticket.key;
            if loader.apply(event) {
                applied.push(key);
            }
            // Every observable state after a completion shows Y2 or nothing.
            if let Some(data) = loader.state().data() {
                assert_eq!(data, &Payload(vec![2024]));
            }
        }

        assert_eq!(applied, vec![2024]);
        assert_eq!(loader.state(), &ViewState::Loaded(Payload(vec![2024])));
    }
}
