//! Streaming relay of the upstream response body.
//!
//! [`RelayBody`] wraps the upstream body and forwards its frames to the
//! client connection one at a time, preserving arrival order and the
//! backpressure between the upstream read and the client write. The stream
//! is finite and not restartable.
//!
//! If the upstream read fails mid-body the status line is already on the
//! wire and cannot change; the relay emits one final JSON fragment of shape
//! `{"error": "<message>"}` and ends the body, leaving the caller an
//! interrupted transfer to detect. Nothing is retried.

use std::convert::Infallible;
use std::fmt::Display;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body::{Body, Frame, SizeHint};

use super::ErrorBody;

pub struct RelayBody<B> {
    upstream: B,
    done: bool,
}

impl<B> RelayBody<B> {
    pub const fn new(upstream: B) -> Self {
        Self {
            upstream,
            done: false,
        }
    }
}

impl<B> Body for RelayBody<B>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: Display,
{
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Bytes>, Infallible>>> {
        if self.done {
            return Poll::Ready(None);
        }

        match Pin::new(&mut self.upstream).poll_frame(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(None) => {
                self.done = true;
                Poll::Ready(None)
            }
            Poll::Ready(Some(Ok(frame))) => Poll::Ready(Some(Ok(frame))),
            Poll::Ready(Some(Err(e))) => {
                self.done = true;
                tracing::error!(error = %e, "upstream body read failed mid-stream");
                let fragment = serde_json::to_string(&ErrorBody {
                    error: e.to_string(),
                })
                .unwrap_or_else(|_| r#"{"error":"upstream body read failed"}"#.to_string());
                Poll::Ready(Some(Ok(Frame::data(Bytes::from(fragment)))))
            }
        }
    }

    fn is_end_stream(&self) -> bool {
        self.done || self.upstream.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.upstream.size_hint()
    }
}
