//! Delivery of page updates to the browser.

use std::future::Future;

use tokio::sync::mpsc;

use persona_types::error::SinkClosed;
use persona_types::page::PageUpdate;

use super::Page;

/// Destination of flushed page updates (one per connection).
pub trait UpdateSink: Send {
    fn push(&mut self, update: PageUpdate) -> impl Future<Output = Result<(), SinkClosed>> + Send;
}

/// The WebSocket writer task drains the receiving end.
impl UpdateSink for mpsc::Sender<PageUpdate> {
    async fn push(&mut self, update: PageUpdate) -> Result<(), SinkClosed> {
        mpsc::Sender::send(self, update).await.map_err(|_| SinkClosed)
    }
}

/// A page bound to the sink its updates are flushed to.
pub struct Surface<S> {
    page: Page,
    sink: S,
    flushes: u64,
}

impl<S: UpdateSink> Surface<S> {
    pub fn new(sink: S) -> Self {
        Self {
            page: Page::new(),
            sink,
            flushes: 0,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Number of updates actually sent so far.
    pub fn flushes(&self) -> u64 {
        self.flushes
    }

    /// Send pending ops, if any, as one update.
    pub async fn flush(&mut self) -> Result<(), SinkClosed> {
        let Some(update) = self.page.flush() else {
            return Ok(());
        };
        tracing::debug!(ops = update.ops.len(), "Flushing page update");
        self.sink.push(update).await?;
        self.flushes += 1;
        Ok(())
    }
}
