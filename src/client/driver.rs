//! Event Loop
//!
//! Runs a [`SearchView`] on a single task: input events, the debounce timer and
//! the completion of the one in-flight fetch are multiplexed with `select!`.
//! The fetch itself runs on a spawned task so input keeps flowing while it waits.

use super::view::{FetchRequest, SearchView, ViewEvent};
use super::SearchBackend;
use crate::search::types::SearchResponse;

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

struct InFlight {
    request: FetchRequest,
    handle: JoinHandle<Result<SearchResponse>>,
}

/// Drives `view` until the event channel closes, then waits for any fetch still
/// in flight and returns the final state. `on_change` sees every state change.
pub async fn run<B, F>(
    mut view: SearchView,
    backend: Arc<B>,
    mut events: mpsc::Receiver<ViewEvent>,
    mut on_change: F,
) -> SearchView
where
    B: SearchBackend,
    F: FnMut(&SearchView),
{
    let mut in_flight: Option<InFlight> = None;
    let mut events_open = true;

    loop {
        if !events_open && in_flight.is_none() {
            break;
        }

        let deadline = view.debounce_deadline();

        tokio::select! {
            event = events.recv(), if events_open => match event {
                Some(event) => {
                    if let Some(request) = view.handle(event, Instant::now()) {
                        in_flight = Some(spawn_fetch(&backend, request));
                    }
                    on_change(&view);
                }
                None => {
                    tracing::debug!("Input closed");
                    events_open = false;
                }
            },
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if events_open && deadline.is_some() => {
                if let Some(request) = view.poll_debounce(Instant::now()) {
                    in_flight = Some(spawn_fetch(&backend, request));
                }
                on_change(&view);
            }
            (request, outcome) = join_fetch(&mut in_flight) => {
                view.complete(&request, outcome);
                on_change(&view);
            }
        }
    }

    view
}

fn spawn_fetch<B: SearchBackend>(backend: &Arc<B>, request: FetchRequest) -> InFlight {
    tracing::debug!(
        "Fetching '{}' page {} ({:?})",
        request.query,
        request.page,
        request.mode
    );

    let backend = backend.clone();
    let task_request = request.clone();
    let handle = tokio::spawn(async move { backend.fetch(&task_request).await });

    InFlight { request, handle }
}

/// Resolves when the in-flight fetch finishes; pending forever when there is none.
async fn join_fetch(in_flight: &mut Option<InFlight>) -> (FetchRequest, Result<SearchResponse>) {
    let Some(fetch) = in_flight.as_mut() else {
        return std::future::pending().await;
    };

    let outcome = match (&mut fetch.handle).await {
        Ok(outcome) => outcome,
        Err(e) => Err(anyhow::anyhow!("search task failed: {}", e)),
    };
    let request = fetch.request.clone();
    *in_flight = None;

    (request, outcome)
}
