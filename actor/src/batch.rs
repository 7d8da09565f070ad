use ordo_types::CancellationToken;

use crate::chain::OrderedActor;
use crate::handle::BatchHandle;

/// Push `values` one at a time, checking `cancel` before each.
///
/// Cancellation only stops further enqueueing; every value pushed before
/// it was observed keeps its slot and runs.
pub(crate) fn enqueue<T, R, I>(
    actor: &OrderedActor<T, R>,
    values: I,
    cancel: &CancellationToken,
) -> BatchHandle<R>
where
    T: Send + 'static,
    R: Send + 'static,
    I: IntoIterator<Item = T>,
{
    let values = values.into_iter();
    let mut handles = Vec::with_capacity(values.size_hint().0);
    for value in values {
        if cancel.is_cancelled() {
            tracing::debug!(
                name = %actor.name(),
                enqueued = handles.len(),
                "Batch cancelled; remaining values not enqueued"
            );
            break;
        }
        handles.push(actor.push_with_cancel(value, cancel.clone()));
    }
    BatchHandle::new(handles)
}
