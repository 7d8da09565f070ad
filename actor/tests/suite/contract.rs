use std::future::{Ready, ready};

use ordo_actor::{
    Actor, ActorError, CancellationToken, OrderedActionActor, OrderedActor, TypedActor,
};

use crate::common::{Log, init_tracing};

/// Runs work on the caller's stack as soon as it is pushed. Stands in for
/// an alternative scheduling policy behind the same contract.
struct InlineActor {
    log: Log<u32>,
}

impl TypedActor<u32> for InlineActor {
    type Output = u32;
    type Handle = Ready<Result<u32, ActorError>>;
    type Batch = Ready<Result<Vec<u32>, ActorError>>;

    fn push_with_cancel(&self, value: u32, _cancel: CancellationToken) -> Self::Handle {
        self.log.push(value);
        ready(Ok(value))
    }

    fn push_many_with_cancel(&self, values: Vec<u32>, cancel: CancellationToken) -> Self::Batch {
        let mut results = Vec::new();
        for value in values {
            if cancel.is_cancelled() {
                break;
            }
            self.log.push(value);
            results.push(value);
        }
        ready(Ok(results))
    }
}

async fn push_all<A>(actor: &A, values: Vec<u32>) -> Vec<A::Output>
where
    A: TypedActor<u32>,
{
    TypedActor::push_many(actor, values).await.unwrap()
}

#[tokio::test]
async fn heterogeneous_actors_share_the_erased_contract() {
    init_tracing();
    let typed_log = Log::new();
    let action_log = Log::new();
    let inline_log = Log::new();

    let typed = {
        let log = typed_log.clone();
        OrderedActor::from_fn(move |v: u32| {
            log.push(v);
            format!("#{v}")
        })
        .unwrap()
    };
    let action = {
        let log = action_log.clone();
        OrderedActionActor::from_action(move |v: u32| log.push(v)).unwrap()
    };
    let inline = InlineActor {
        log: inline_log.clone(),
    };

    let actors: Vec<Box<dyn Actor<u32> + Send + Sync>> =
        vec![Box::new(typed), Box::new(action), Box::new(inline)];

    for actor in &actors {
        actor.push(1).await.unwrap();
        actor
            .push_with_cancel(2, CancellationToken::new())
            .await
            .unwrap();
        actor.push_many(vec![3, 4]).await.unwrap();
        let stopped = CancellationToken::new();
        stopped.cancel();
        actor.push_many_with_cancel(vec![5], stopped).await.unwrap();
    }

    for log in [typed_log, action_log, inline_log] {
        assert_eq!(log.snapshot(), vec![1, 2, 3, 4]);
    }
}

#[tokio::test]
async fn generic_callers_accept_any_policy() {
    init_tracing();
    let ordered = OrderedActor::from_fn(|v: u32| v * 2).unwrap();
    let inline = InlineActor { log: Log::new() };

    assert_eq!(push_all(&ordered, vec![1, 2, 3]).await, vec![2, 4, 6]);
    assert_eq!(push_all(&inline, vec![1, 2, 3]).await, vec![1, 2, 3]);
}

#[tokio::test]
async fn erased_push_carries_failures() {
    init_tracing();
    let actor = OrderedActor::from_fn(|v: u32| {
        assert!(v != 0, "zero");
        v
    })
    .unwrap();
    let erased: Box<dyn Actor<u32> + Send + Sync> = Box::new(actor);

    assert!(erased.push(0).await.unwrap_err().is_panicked());
    erased.push(1).await.unwrap();
    assert!(erased.push_many(vec![2, 0, 3]).await.unwrap_err().is_panicked());
}
