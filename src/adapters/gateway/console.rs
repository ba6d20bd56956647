//! Console Submission Gateway
//!
//! Writes submissions to standard output. Used by the local console
//! driver in place of a chat-platform channel.

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::domain::summary::Submission;
use crate::ports::{GatewayError, ReviewChannelId, SubmissionGateway};

/// Gateway that prints each submission as a block of text.
pub struct ConsoleGateway<W = tokio::io::Stdout> {
    out: Mutex<W>,
}

impl ConsoleGateway {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W> ConsoleGateway<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

fn render(channel: ReviewChannelId, submission: &Submission) -> String {
    let mut text = format!(
        "=== submission {} -> channel {} ===\n{}\n",
        submission.record.submission_id, channel, submission.summary
    );
    for attachment in &submission.attachments {
        text.push_str(&format!(
            "[attachment] {:?}: {}\n",
            attachment.kind, attachment.file
        ));
    }
    text
}

#[async_trait]
impl<W> SubmissionGateway for ConsoleGateway<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn submit(
        &self,
        channel: ReviewChannelId,
        submission: &Submission,
    ) -> Result<(), GatewayError> {
        let text = render(channel, submission);
        let mut out = self.out.lock().await;
        out.write_all(text.as_bytes())
            .await
            .map_err(|e| GatewayError::Delivery(e.to_string()))?;
        out.flush()
            .await
            .map_err(|e| GatewayError::Delivery(e.to_string()))
    }
}
