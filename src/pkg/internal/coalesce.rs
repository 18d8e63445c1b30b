//! Quiet-period coalescing for search criteria, with last-request-wins
//! delivery: rapid edits collapse into a single fetch, and a slow response
//! from a superseded fetch is dropped instead of overwriting a newer one.

use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::sync::mpsc;
use tokio::time;

pub struct Coalescer<C> {
    edits: mpsc::UnboundedSender<C>,
}

impl<C: Send + 'static> Coalescer<C> {
    /// Spawns the coalescing worker. Edits submitted through the returned
    /// handle are debounced for `quiet`; once the criteria have been stable
    /// that long, `fetch` runs once with the most recent value. Results come
    /// out of the returned receiver, and only for the latest issued fetch.
    pub fn spawn<F, Fut, R>(quiet: Duration, fetch: F) -> (Self, mpsc::UnboundedReceiver<R>)
    where
        F: Fn(C) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: Send + 'static,
    {
        let (edit_tx, mut edit_rx) = mpsc::unbounded_channel::<C>();
        let (result_tx, result_rx) = mpsc::unbounded_channel::<R>();

        tokio::spawn(async move {
            let issued = Arc::new(AtomicU64::new(0));
            let fetch = Arc::new(fetch);
            while let Some(first) = edit_rx.recv().await {
                let mut criteria = first;
                let mut closed = false;
                loop {
                    match time::timeout(quiet, edit_rx.recv()).await {
                        Ok(Some(newer)) => criteria = newer,
                        Ok(None) => {
                            closed = true;
                            break;
                        }
                        Err(_) => break,
                    }
                }

                let seq = issued.fetch_add(1, Ordering::SeqCst) + 1;
                let issued = issued.clone();
                let fetch = fetch.clone();
                let result_tx = result_tx.clone();
                tokio::spawn(async move {
                    let result = fetch(criteria).await;
                    // a newer fetch was issued while this one ran; its
                    // result is stale and must not be rendered
                    if issued.load(Ordering::SeqCst) == seq {
                        let _ = result_tx.send(result);
                    }
                });

                if closed {
                    break;
                }
            }
        });

        (Coalescer { edits: edit_tx }, result_rx)
    }

    /// Records a criteria edit, restarting the quiet period.
    pub fn submit(&self, criteria: C) {
        let _ = self.edits.send(criteria);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    const QUIET: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn rapid_edits_collapse_into_one_fetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        let (coalescer, mut results) = Coalescer::spawn(QUIET, move |criteria: String| {
            let counted = counted.clone();
            async move {
                counted.fetch_add(1, Ordering::SeqCst);
                criteria
            }
        });

        coalescer.submit("e".to_string());
        coalescer.submit("en".to_string());
        coalescer.submit("engineer".to_string());

        let rendered = results.recv().await.unwrap();
        assert_eq!(rendered, "engineer");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn quiet_periods_yield_one_fetch_each() {
        let (coalescer, mut results) = Coalescer::spawn(QUIET, |criteria: String| async move {
            criteria
        });

        coalescer.submit("pune".to_string());
        assert_eq!(results.recv().await.unwrap(), "pune");

        coalescer.submit("remote".to_string());
        assert_eq!(results.recv().await.unwrap(), "remote");
    }

    #[tokio::test(start_paused = true)]
    async fn stale_response_does_not_overwrite_newer_one() {
        // the first search is slow, the second fast; only the second may land
        let (coalescer, mut results) = Coalescer::spawn(QUIET, |criteria: String| async move {
            let delay = if criteria == "slow" {
                Duration::from_secs(10)
            } else {
                Duration::from_millis(10)
            };
            time::sleep(delay).await;
            criteria
        });

        coalescer.submit("slow".to_string());
        time::sleep(QUIET * 2).await;
        coalescer.submit("fast".to_string());

        assert_eq!(results.recv().await.unwrap(), "fast");

        // let the slow fetch finish; its result must be dropped
        time::sleep(Duration::from_secs(20)).await;
        assert!(results.try_recv().is_err());
    }
}
