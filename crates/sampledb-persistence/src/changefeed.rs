//! # Change Feed
//!
//! Cancellable subscription over a collection's change stream. Driver events
//! are pumped into a bounded channel by a background task; iteration errors
//! are delivered once through the same channel and terminate the pump, rather
//! than being re-raised inside a callback.

use futures::StreamExt;
use mongodb::bson::Document;
use mongodb::change_stream::event::{ChangeStreamEvent, OperationType};
use mongodb::change_stream::ChangeStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::Result;

/// Buffered events before the pump awaits the consumer.
const EVENT_BUFFER: usize = 64;

/// Row-level mutation kind carried by a change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOperation {
    Insert,
    Update,
    Replace,
    Delete,
    Drop,
    Other,
}

impl From<&OperationType> for ChangeOperation {
    fn from(op: &OperationType) -> Self {
        match op {
            OperationType::Insert => Self::Insert,
            OperationType::Update => Self::Update,
            OperationType::Replace => Self::Replace,
            OperationType::Delete => Self::Delete,
            OperationType::Drop => Self::Drop,
            _ => Self::Other,
        }
    }
}

/// One change-feed event: operation kind plus the affected document.
#[derive(Debug, Clone)]
pub struct TableChange {
    pub operation: ChangeOperation,
    pub document_key: Option<Document>,
    pub full_document: Option<Document>,
}

impl From<ChangeStreamEvent<Document>> for TableChange {
    fn from(event: ChangeStreamEvent<Document>) -> Self {
        Self {
            operation: ChangeOperation::from(&event.operation_type),
            document_key: event.document_key,
            full_document: event.full_document,
        }
    }
}

/// Handle over a live change-feed subscription.
///
/// Receive events with [`ChangeFeed::next`]; call [`ChangeFeed::stop`] to
/// cancel the subscription. Dropping the handle also stops the pump once the
/// channel closes.
pub struct ChangeFeed {
    events: mpsc::Receiver<Result<TableChange>>,
    pump: JoinHandle<()>,
}

impl ChangeFeed {
    pub(crate) fn spawn(mut stream: ChangeStream<ChangeStreamEvent<Document>>) -> Self {
        let (tx, events) = mpsc::channel(EVENT_BUFFER);

        let pump = tokio::spawn(async move {
            while let Some(item) = stream.next().await {
                match item {
                    Ok(event) => {
                        if tx.send(Ok(TableChange::from(event))).await.is_err() {
                            // Consumer went away, unsubscribe.
                            break;
                        }
                    }
                    Err(err) => {
                        let _ = tx.send(Err(err.into())).await;
                        break;
                    }
                }
            }
            tracing::debug!("change feed pump stopped");
        });

        Self { events, pump }
    }

    /// Wait for the next change event. Returns `None` once the feed has
    /// stopped, either after an error was delivered or after `stop()`.
    pub async fn next(&mut self) -> Option<Result<TableChange>> {
        self.events.recv().await
    }

    /// Cancel the subscription and stop the background pump.
    pub fn stop(self) {
        self.pump.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_mapping() {
        assert_eq!(
            ChangeOperation::from(&OperationType::Insert),
            ChangeOperation::Insert
        );
        assert_eq!(
            ChangeOperation::from(&OperationType::Update),
            ChangeOperation::Update
        );
        assert_eq!(
            ChangeOperation::from(&OperationType::Replace),
            ChangeOperation::Replace
        );
        assert_eq!(
            ChangeOperation::from(&OperationType::Delete),
            ChangeOperation::Delete
        );
        assert_eq!(
            ChangeOperation::from(&OperationType::Invalidate),
            ChangeOperation::Other
        );
    }
}
