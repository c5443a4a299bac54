//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::document::DocumentId;
use crate::error::{LexIndexError, Result};
use crate::parallel_index::{BuildReport, WorkerReport};
use crate::service::ServiceStats;

/// Rendering of a result for people rather than machines.
pub trait HumanReadable {
    fn write_human(&self, out: &mut dyn Write) -> std::io::Result<()>;
}

/// Whether the index is ready.
#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexedStatus(pub bool);

/// Result structure for a build.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexOutput {
    /// Parallel phase duration in milliseconds.
    pub duration: f64,
    pub worker_count: usize,
    pub total_files: usize,
    pub files_indexed: usize,
    pub distinct_words: usize,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skipped: Vec<DocumentId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub workers: Option<Vec<WorkerReport>>,
}

impl IndexOutput {
    /// Summarize a build report, optionally with the per-worker breakdown.
    pub fn from_report(report: BuildReport, detailed: bool) -> Self {
        Self {
            duration: report.elapsed_ms(),
            worker_count: report.worker_count,
            total_files: report.total_files,
            files_indexed: report.files_indexed,
            distinct_words: report.distinct_words,
            skipped: report.skipped(),
            workers: detailed.then_some(report.workers),
        }
    }
}

/// Result structure for a query.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryOutput {
    pub word: String,
    /// `None` when the word was never indexed.
    pub documents: Option<Vec<DocumentId>>,
}

/// Error rendered inside the shell, which keeps running afterwards.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorOutput {
    pub error: String,
    pub kind: String,
}

impl From<&LexIndexError> for ErrorOutput {
    fn from(error: &LexIndexError) -> Self {
        let kind = match error {
            LexIndexError::InvalidArgument(_) => "invalid_argument",
            LexIndexError::NotReady => "not_ready",
            LexIndexError::Io { .. } => "io",
            LexIndexError::OperationCancelled(_) => "cancelled",
            LexIndexError::ThreadJoinError(_) => "thread_join",
            _ => "other",
        };
        Self {
            error: error.to_string(),
            kind: kind.to_string(),
        }
    }
}

impl HumanReadable for IndexedStatus {
    fn write_human(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "{}", if self.0 { "indexed" } else { "not indexed" })
    }
}

impl HumanReadable for IndexOutput {
    fn write_human(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            out,
            "Indexed {}/{} files ({} distinct words) with {} workers in {:.3} ms",
            self.files_indexed,
            self.total_files,
            self.distinct_words,
            self.worker_count,
            self.duration
        )?;
        for doc in &self.skipped {
            writeln!(out, "  skipped: {doc}")?;
        }
        if let Some(workers) = &self.workers {
            for worker in workers {
                writeln!(
                    out,
                    "  worker {:>3}: {} files, {} tokens, {:?}",
                    worker.worker_id, worker.files_indexed, worker.tokens, worker.elapsed
                )?;
            }
        }
        Ok(())
    }
}

impl HumanReadable for QueryOutput {
    fn write_human(&self, out: &mut dyn Write) -> std::io::Result<()> {
        match &self.documents {
            Some(documents) => {
                writeln!(out, "'{}' found in {} documents:", self.word, documents.len())?;
                for doc in documents {
                    writeln!(out, "  {doc}")?;
                }
                Ok(())
            }
            None => writeln!(out, "'{}' not found", self.word),
        }
    }
}

impl HumanReadable for ServiceStats {
    fn write_human(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "State: {:?}", self.state)?;
        writeln!(out, "Distinct words: {}", self.distinct_words)?;
        writeln!(
            out,
            "Builds: {} ok, {} failed, {} rejected",
            self.metrics.successful_builds, self.metrics.failed_builds, self.metrics.rejected_builds
        )?;
        if let Some(last) = self.metrics.last_build_time {
            writeln!(out, "Last build: {last:?}")?;
        }
        Ok(())
    }
}

impl HumanReadable for ErrorOutput {
    fn write_human(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "Error: {}", self.error)
    }
}

/// Output a result in the specified format.
pub fn write_output<T>(out: &mut dyn Write, result: &T, format: OutputFormat, pretty: bool) -> Result<()>
where
    T: Serialize + HumanReadable,
{
    match format {
        OutputFormat::Human => result
            .write_human(out)
            .map_err(|e| LexIndexError::other(format!("Failed to write output: {e}"))),
        OutputFormat::Json => {
            let json = if pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")
                .map_err(|e| LexIndexError::other(format!("Failed to write output: {e}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<T: Serialize + HumanReadable>(value: &T, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_output(&mut buf, value, format, false).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_indexed_status() {
        assert_eq!(render(&IndexedStatus(true), OutputFormat::Json), "true\n");
        assert_eq!(render(&IndexedStatus(false), OutputFormat::Human), "not indexed\n");
    }

    #[test]
    fn test_query_output_json() {
        let found = QueryOutput {
            word: "cat".to_string(),
            documents: Some(vec![DocumentId::new("a.txt")]),
        };
        assert_eq!(
            render(&found, OutputFormat::Json),
            "{\"word\":\"cat\",\"documents\":[\"a.txt\"]}\n"
        );

        let missing = QueryOutput {
            word: "zzz".to_string(),
            documents: None,
        };
        assert_eq!(render(&missing, OutputFormat::Human), "'zzz' not found\n");
    }

    #[test]
    fn test_error_output_kind() {
        let output = ErrorOutput::from(&LexIndexError::NotReady);
        assert_eq!(output.kind, "not_ready");
        assert_eq!(
            render(&output, OutputFormat::Human),
            "Error: Files were not indexed yet\n"
        );
    }
}
