use futures::StreamExt;
use futures::stream;
use std::future::Future;

/// Runs a finite set of fetch tasks with bounded concurrency and collects the
/// present results.
///
/// At most `width` tasks run concurrently; a new task starts only when one of
/// the running ones completes. The function returns once every task has
/// finished. Tasks that yield [`None`] (failed or empty fetches) are simply
/// absent from the output; completion order is unconstrained, so the output
/// order carries no meaning.
///
/// Tasks already in flight are never cancelled; cooperative cancellation is
/// handled inside each task via the halt signal.
pub async fn fetch_all<T, F>(width: usize, tasks: Vec<F>) -> Vec<T>
where
    F: Future<Output = Option<T>>,
{
    stream::iter(tasks)
        .buffer_unordered(width)
        .filter_map(|result| async move { result })
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::fetch_all;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn collects_present_results_and_drops_absent_ones() {
        let tasks: Vec<_> = (0u32..10)
            .map(|i| async move { if i % 2 == 0 { Some(i) } else { None } })
            .collect();

        let mut results = fetch_all(3, tasks).await;
        results.sort_unstable();

        assert_eq!(results, vec![0, 2, 4, 6, 8]);
    }

    #[tokio::test]
    async fn never_exceeds_the_configured_width() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let in_flight = in_flight.clone();
                let peak = peak.clone();
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Some(i)
                }
            })
            .collect();

        let results = fetch_all(4, tasks).await;

        assert_eq!(results.len(), 20);
        assert!(peak.load(Ordering::SeqCst) <= 4);
    }

    #[tokio::test]
    async fn empty_task_set_completes_immediately() {
        let results: Vec<u8> = fetch_all(8, Vec::<std::future::Ready<Option<u8>>>::new()).await;
        assert!(results.is_empty());
    }
}
