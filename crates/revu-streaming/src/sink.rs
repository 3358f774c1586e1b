//! Platform-controlled streaming sink.

use std::fmt::Display;

use futures::{Sink, SinkExt};
use revu_core::{LifecyclePhase, TimingContext, WorkloadError};

/// State of the streaming sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SinkState {
    /// Initial state, head not yet sent.
    Initial,
    /// Head has been sent, sections can be streamed.
    HeadSent,
    /// Response has been completed.
    Completed,
}

/// Platform-controlled streaming sink that enforces head-first delivery.
///
/// Generic over the underlying sink type to work with any `Sink<Vec<u8>>`
/// implementation, including Spin's `OutgoingBody`.
pub struct StreamingSink<S, E>
where
    S: Sink<Vec<u8>, Error = E> + Unpin,
    E: Display,
{
    inner: S,
    state: SinkState,
    timing: TimingContext,
    sections_sent: Vec<String>,
}

impl<S, E> StreamingSink<S, E>
where
    S: Sink<Vec<u8>, Error = E> + Unpin,
    E: Display,
{
    /// Create a new streaming sink.
    pub fn new(sink: S, timing: TimingContext) -> Self {
        Self {
            inner: sink,
            state: SinkState::Initial,
            timing,
            sections_sent: Vec::new(),
        }
    }

    /// Send the head/shell HTML. Must be called before any sections.
    pub async fn send_head(&mut self, html: &str) -> Result<(), WorkloadError> {
        if self.state != SinkState::Initial {
            return Err(WorkloadError::StreamError(
                "Head already sent or sink completed".to_string(),
            ));
        }

        self.timing.mark("head_start");
        self.inner
            .send(html.as_bytes().to_vec())
            .await
            .map_err(|e| WorkloadError::StreamError(e.to_string()))?;
        self.timing.mark("head_sent");
        self.state = SinkState::HeadSent;

        Ok(())
    }

    /// Send a named section. Head must be sent first.
    ///
    /// Sections are independently streamable parts of the page.
    pub async fn send_section(&mut self, name: &str, html: &str) -> Result<(), WorkloadError> {
        if self.state == SinkState::Initial {
            return Err(WorkloadError::HeadNotSent);
        }
        if self.state == SinkState::Completed {
            return Err(WorkloadError::StreamError(
                "Sink already completed".to_string(),
            ));
        }

        self.timing.mark_section_start(name);
        self.inner
            .send(html.as_bytes().to_vec())
            .await
            .map_err(|e| WorkloadError::StreamError(e.to_string()))?;
        self.timing.mark_section_sent(name);
        self.sections_sent.push(name.to_string());

        Ok(())
    }

    /// Send raw bytes. Head must be sent first.
    pub async fn send_raw(&mut self, bytes: Vec<u8>) -> Result<(), WorkloadError> {
        if self.state == SinkState::Initial {
            return Err(WorkloadError::HeadNotSent);
        }
        if self.state == SinkState::Completed {
            return Err(WorkloadError::StreamError(
                "Sink already completed".to_string(),
            ));
        }

        self.inner
            .send(bytes)
            .await
            .map_err(|e| WorkloadError::StreamError(e.to_string()))?;

        Ok(())
    }

    /// Complete the response.
    pub fn complete(&mut self) -> Result<(), WorkloadError> {
        self.state = SinkState::Completed;
        self.timing.mark("complete");
        Ok(())
    }

    /// Get the list of sections sent.
    pub fn sections_sent(&self) -> &[String] {
        &self.sections_sent
    }

    /// Get the current lifecycle phase.
    pub fn phase(&self) -> LifecyclePhase {
        match self.state {
            SinkState::Initial => LifecyclePhase::Start,
            SinkState::HeadSent if self.sections_sent.is_empty() => LifecyclePhase::HeadFlushed,
            SinkState::HeadSent => {
                LifecyclePhase::SectionSent(self.sections_sent.last().unwrap().clone())
            }
            SinkState::Completed => LifecyclePhase::Completion,
        }
    }

    /// Get timing context reference.
    pub fn timing(&self) -> &TimingContext {
        &self.timing
    }

    /// Get mutable access to the underlying sink for advanced use.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Consume the sink and return the inner value.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;
    use futures::StreamExt;

    fn test_sink() -> (
        StreamingSink<mpsc::UnboundedSender<Vec<u8>>, mpsc::SendError>,
        mpsc::UnboundedReceiver<Vec<u8>>,
    ) {
        let (tx, rx) = mpsc::unbounded();
        (StreamingSink::new(tx, TimingContext::new()), rx)
    }

    #[test]
    fn test_sections_require_head_first() {
        let (mut sink, _rx) = test_sink();
        let err = futures::executor::block_on(sink.send_section("hero", "<div></div>"));
        assert!(matches!(err, Err(WorkloadError::HeadNotSent)));
    }

    #[test]
    fn test_head_then_sections_stream_in_order() {
        let (mut sink, mut rx) = test_sink();
        futures::executor::block_on(async {
            sink.send_head("<html><head></head><body>").await.unwrap();
            sink.send_section("hero", "<section>hero</section>")
                .await
                .unwrap();
            sink.complete().unwrap();

            assert_eq!(
                rx.next().await.unwrap(),
                b"<html><head></head><body>".to_vec()
            );
            assert_eq!(rx.next().await.unwrap(), b"<section>hero</section>".to_vec());
        });
        assert_eq!(sink.sections_sent(), ["hero"]);
        assert_eq!(sink.phase(), LifecyclePhase::Completion);
    }

    #[test]
    fn test_head_cannot_be_sent_twice() {
        let (mut sink, _rx) = test_sink();
        futures::executor::block_on(async {
            sink.send_head("a").await.unwrap();
            assert!(sink.send_head("b").await.is_err());
        });
    }
}
