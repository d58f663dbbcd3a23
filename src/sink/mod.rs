//! Submission Sinks
//!
//! Where a finished wizard sends its payload. Forwarding to a real
//! persistence/build backend is out of scope; the sinks here log, print,
//! or record.

use crate::error::{GameCreatorError, Result};
use crate::wizard::Submission;
use std::io::Write;

/// Receives finalized submissions
pub trait SubmissionSink {
    fn submit(&mut self, submission: &Submission) -> Result<()>;
}

/// Logs the payload through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn submit(&mut self, submission: &Submission) -> Result<()> {
        let payload = serde_json::to_string(submission)?;
        tracing::info!(target: "game_creator::submission", %payload, "Submitting game");
        Ok(())
    }
}

/// Writes one JSON object per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SubmissionSink for JsonLinesSink<W> {
    fn submit(&mut self, submission: &Submission) -> Result<()> {
        serde_json::to_writer(&mut self.writer, submission)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Recording sink
impl SubmissionSink for Vec<Submission> {
    fn submit(&mut self, submission: &Submission) -> Result<()> {
        self.push(submission.clone());
        Ok(())
    }
}

impl<S: SubmissionSink + ?Sized> SubmissionSink for Box<S> {
    fn submit(&mut self, submission: &Submission) -> Result<()> {
        (**self).submit(submission)
    }
}

/// Forwards to `first`, then `second`. Stops at the first failure.
pub struct TeeSink<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> TeeSink<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: SubmissionSink, B: SubmissionSink> SubmissionSink for TeeSink<A, B> {
    fn submit(&mut self, submission: &Submission) -> Result<()> {
        self.first.submit(submission)?;
        self.second.submit(submission)
    }
}

/// Sink that always refuses, for exercising failure paths
#[derive(Debug, Clone)]
pub struct RejectingSink {
    pub reason: String,
}

impl SubmissionSink for RejectingSink {
    fn submit(&mut self, _submission: &Submission) -> Result<()> {
        Err(GameCreatorError::Sink(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::SubmissionContent;

    fn sample() -> Submission {
        Submission {
            name: "Snake".to_string(),
            content: SubmissionContent::Url("https://example.com/snake".to_string()),
        }
    }

    #[test]
    fn test_json_lines_sink_writes_one_line_per_submission() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.submit(&sample()).unwrap();
        sink.submit(&sample()).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            r#"{"name":"Snake","url":"https://example.com/snake"}"#
        );
    }

    #[test]
    fn test_log_sink_accepts() {
        assert!(LogSink.submit(&sample()).is_ok());
    }

    #[test]
    fn test_tee_sink_forwards_to_both() {
        let mut sink = TeeSink::new(Vec::new(), Vec::new());
        sink.submit(&sample()).unwrap();
        assert_eq!(sink.first.len(), 1);
        assert_eq!(sink.second.len(), 1);
    }

    #[test]
    fn test_tee_sink_stops_on_failure() {
        let mut sink = TeeSink::new(
            RejectingSink {
                reason: "offline".to_string(),
            },
            Vec::new(),
        );
        let err = sink.submit(&sample()).unwrap_err();
        assert_eq!(err.to_string(), "submission sink failed: offline");
        assert!(sink.second.is_empty());
    }
}
