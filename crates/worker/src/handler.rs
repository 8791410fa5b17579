//! Lambda entry point for SQS-triggered batches.
//!
//! The invocation succeeds only if every record in the batch was decoded,
//! classified, and persisted. Any failure is returned as a single invocation
//! error so the queue redelivers the whole batch.

use aws_lambda_events::event::sqs::{SqsEvent, SqsMessage};
use lambda_runtime::{service_fn, LambdaEvent};

use crate::error::IngestError;
use crate::ingest::{Ingestor, QueueMessage};

/// Message id used when the queue omits one.
pub const UNKNOWN_MESSAGE_ID: &str = "unknown";

impl From<SqsMessage> for QueueMessage {
    /// A missing body is treated as an empty payload, which fails to decode.
    fn from(message: SqsMessage) -> Self {
        Self {
            message_id: message
                .message_id
                .unwrap_or_else(|| UNKNOWN_MESSAGE_ID.to_string()),
            body: message.body.unwrap_or_default(),
        }
    }
}

/// Process all records of an SQS event in delivery order.
pub async fn process_event(ingestor: &Ingestor, event: SqsEvent) -> Result<usize, IngestError> {
    let messages: Vec<QueueMessage> = event.records.into_iter().map(QueueMessage::from).collect();
    ingestor.process_batch(&messages).await
}

/// Handle one Lambda invocation.
pub async fn handle(
    ingestor: &Ingestor,
    event: LambdaEvent<SqsEvent>,
) -> Result<(), lambda_runtime::Error> {
    let LambdaEvent { payload, context } = event;
    tracing::debug!(
        request_id = %context.request_id,
        batch_size = payload.records.len(),
        "Received SQS batch"
    );

    process_event(ingestor, payload).await?;
    Ok(())
}

/// Serve invocations until the runtime shuts down.
pub async fn run(ingestor: Ingestor) -> Result<(), lambda_runtime::Error> {
    lambda_runtime::run(service_fn(move |event: LambdaEvent<SqsEvent>| {
        let ingestor = ingestor.clone();
        async move { handle(&ingestor, event).await }
    }))
    .await
}
