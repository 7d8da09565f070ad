use ordo_actor::{ActorError, CancellationToken, OrderedActor, WorkItem};
use tokio::task;

use crate::common::{Log, init_tracing};

fn failing_on_even(log: Log<u32>) -> OrderedActor<u32, u32> {
    OrderedActor::from_task(move |item: WorkItem<u32>| {
        let log = log.clone();
        async move {
            let value = item.into_value();
            log.push(value);
            task::yield_now().await;
            if value % 2 == 0 {
                anyhow::bail!("bad {value}");
            }
            Ok(value)
        }
    })
    .unwrap()
}

#[tokio::test]
async fn failing_item_does_not_stop_the_next() {
    init_tracing();
    let log = Log::new();
    let actor = failing_on_even(log.clone());

    let one = actor.push(1);
    let two = actor.push(2);
    let three = actor.push(3);

    assert_eq!(one.await.unwrap(), 1);
    let err = two.await.unwrap_err();
    assert!(err.is_failed());
    assert_eq!(err.to_string(), "work item failed: bad 2");
    assert_eq!(three.await.unwrap(), 3);
    assert_eq!(log.snapshot(), vec![1, 2, 3]);
}

#[tokio::test]
async fn panicking_item_is_isolated() {
    init_tracing();
    let actor = OrderedActor::from_fn(|v: u32| {
        assert!(v != 2, "refusing {v}");
        v
    })
    .unwrap();

    let one = actor.push(1);
    let two = actor.push(2);
    let three = actor.push(3);

    assert_eq!(one.await.unwrap(), 1);
    match two.await {
        Err(ActorError::Panicked { message }) => assert_eq!(message, "refusing 2"),
        other => panic!("expected Panicked, got {other:?}"),
    }
    assert_eq!(three.await.unwrap(), 3);
}

#[tokio::test]
async fn panicking_tail_keeps_worker_alive_and_counters_drained() {
    init_tracing();
    let actor = OrderedActor::from_task(|item: WorkItem<u32>| async move {
        task::yield_now().await;
        assert!(*item.value() != 1, "tail gives up on 1");
        Ok(*item.value())
    })
    .unwrap();

    let one = actor.push(1);
    let two = actor.push(2);
    let three = actor.push(3);

    assert!(one.await.unwrap_err().is_panicked());
    assert_eq!(two.await.unwrap(), 2);
    assert_eq!(three.await.unwrap(), 3);
    assert_eq!(actor.scheduled_tasks_count(), 0);
    assert_eq!(actor.outstanding_count(), 0);

    // The worker is still serving pushes made after the panic.
    assert_eq!(actor.push(4).await.unwrap(), 4);
}

#[tokio::test]
async fn batch_surfaces_earliest_failure_after_all_items_ran() {
    init_tracing();
    let log = Log::new();
    let actor = failing_on_even(log.clone());

    let err = actor.push_many([1, 2, 3, 4, 5]).await.unwrap_err();
    assert_eq!(err.to_string(), "work item failed: bad 2");
    assert_eq!(log.snapshot(), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn cancellation_is_only_a_signal() {
    init_tracing();
    let actor = OrderedActor::from_fn_with_cancel(|v: u32, cancel: &CancellationToken| {
        if cancel.is_cancelled() { None } else { Some(v) }
    })
    .unwrap();

    let token = CancellationToken::new();
    let before = actor.push_with_cancel(1, token.clone());
    token.cancel();
    let after = actor.push_with_cancel(2, token.clone());
    let unrelated = actor.push(3);

    // The first item may or may not observe the cancel; both outcomes are valid.
    let _ = before.await.unwrap();
    assert_eq!(after.await.unwrap(), None);
    assert_eq!(unrelated.await.unwrap(), Some(3));
}
