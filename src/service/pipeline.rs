use crate::service::dispatcher::Dispatcher;
use crate::types::event::InboundEvent;
use futures::stream::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{info, warn};

/// Drain `events` through the dispatcher with at most `concurrency`
/// dispatches in flight. Runs until every sender is dropped.
pub fn spawn(
    dispatcher: Dispatcher,
    events: mpsc::Receiver<InboundEvent>,
    concurrency: usize,
) -> JoinHandle<()> {
    let concurrency = concurrency.max(1);
    tokio::spawn(async move {
        info!("Dispatch Pipeline Started: Concurrency={}", concurrency);

        let mut pipeline = ReceiverStream::new(events)
            .map(|event| {
                let dispatcher = dispatcher.clone();
                async move {
                    let result = dispatcher.dispatch(&event).await;
                    (event, result)
                }
            })
            .buffer_unordered(concurrency);

        while let Some((event, result)) = pipeline.next().await {
            if let Err(e) = result {
                warn!(
                    channel = %event.channel,
                    user = %event.user,
                    error = %e,
                    "failed to deliver reply"
                );
            }
        }
        info!("Dispatch Pipeline Stopped");
    })
}
