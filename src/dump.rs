//! Dumping of WAL files as text.
//!
//! Every path is attempted in order. Problems are reported as output lines and
//! end the current file at most. A write failure on either sink fails the
//! file being dumped, and the run moves on to the next path.

use std::io::{self, Write};
use std::path::Path;

use tokio::fs::File;

use crate::batch::Batch;
use crate::common::{debug, info, warn};
use crate::filename;
use crate::format::{format_entry, FormatterConfig};
use crate::record::{RecordError, RecordReader, RecordSource};
use crate::WaltoolError;

/// Outcome of a dump run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DumpSummary {
    pub attempted: usize,
    pub failed: usize,
}

impl DumpSummary {
    pub fn into_result(self) -> crate::Result<()> {
        if self.failed == 0 {
            Ok(())
        } else {
            Err(WaltoolError::DumpFailed {
                failed: self.failed,
                attempted: self.attempted,
            })
        }
    }
}

/// How processing of one file ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Clean end of stream or an expected truncation.
    Complete,
    Failed,
}

#[derive(Debug, Default)]
struct Stats {
    records: usize,
    entries: usize,
}

/// Writes the contents of WAL files to `out`. File open failures go to `err`.
pub struct Dumper<W, E> {
    config: FormatterConfig,
    out: W,
    err: E,
}

impl<W, E> Dumper<W, E>
where
    W: Write,
    E: Write,
{
    pub fn new(config: FormatterConfig, out: W, err: E) -> Self {
        Self { config, out, err }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    pub async fn run<P: AsRef<Path>>(&mut self, paths: &[P]) -> io::Result<DumpSummary> {
        let mut summary = DumpSummary::default();

        for path in paths {
            let path = path.as_ref();
            summary.attempted += 1;
            match self.dump_file(path).await {
                Ok(Outcome::Complete) => {}
                Ok(Outcome::Failed) => summary.failed += 1,
                Err(err) => {
                    warn!("write output for {}: {}", path.display(), err);
                    summary.failed += 1;
                }
            }
        }
        self.out.flush()?;

        Ok(summary)
    }

    async fn dump_file(&mut self, path: &Path) -> io::Result<Outcome> {
        // Recycled logs stamp their number into chunk headers. An unknown name
        // still gets decoded, it just can't recognize recycled chunks.
        let file_num = filename::file_num_or_zero(path);

        let file = match File::open(path).await {
            Ok(file) => file,
            Err(err) => {
                debug!("open {}: {}", path.display(), err);
                writeln!(self.err, "{}: {}", path.display(), err)?;
                return Ok(Outcome::Failed);
            }
        };
        debug!("Dump {} (file number {})", path.display(), file_num);

        writeln!(self.out, "{}", path.display())?;

        let mut reader = RecordReader::new(file, file_num.log_num());
        self.dump_records(path, &mut reader).await
    }

    /// Print every record of `source`, labelling errors with `path`.
    pub async fn dump_records<S>(&mut self, path: &Path, source: &mut S) -> io::Result<Outcome>
    where
        S: RecordSource + Send,
    {
        let mut stats = Stats::default();

        let outcome = loop {
            let offset = source.offset();
            let record = match source.next_record().await {
                Ok(Some(record)) => record,
                Ok(None) => {
                    writeln!(self.out, "EOF")?;
                    break Outcome::Complete;
                }
                // Preallocated and recycled logs legitimately end this way.
                Err(err @ RecordError::ZeroedChunk) => {
                    writeln!(self.out, "EOF [{}] (may be due to WAL preallocation)", err)?;
                    break Outcome::Complete;
                }
                Err(err @ RecordError::InvalidChunk) => {
                    writeln!(self.out, "EOF [{}] (may be due to WAL recycling)", err)?;
                    break Outcome::Complete;
                }
                Err(err @ RecordError::Other(_)) => {
                    debug!("read {} at offset {}: {}", path.display(), offset, err);
                    writeln!(self.out, "{}: {}", path.display(), err)?;
                    break Outcome::Failed;
                }
            };
            stats.records += 1;

            let batch = match Batch::decode(record) {
                Ok(batch) => batch,
                Err(err) => {
                    self.corrupt_batch(path, &err)?;
                    break Outcome::Failed;
                }
            };
            writeln!(
                self.out,
                "{}({}) seq={} count={}",
                offset,
                batch.len(),
                batch.seq_num(),
                batch.count()
            )?;

            let mut corrupt = false;
            for entry in batch.entries() {
                match entry {
                    Ok((seq_num, entry)) => {
                        stats.entries += 1;
                        writeln!(self.out, "    {}", format_entry(&self.config, seq_num, &entry))?;
                    }
                    Err(err) => {
                        self.corrupt_batch(path, &err)?;
                        corrupt = true;
                    }
                }
            }
            if corrupt {
                break Outcome::Failed;
            }
        };

        if self.config.verbose {
            info!(
                "{}: {} records, {} entries",
                path.display(),
                stats.records,
                stats.entries
            );
        }

        Ok(outcome)
    }

    fn corrupt_batch(&mut self, path: &Path, err: &dyn std::error::Error) -> io::Result<()> {
        debug!("corrupt batch in {}: {}", path.display(), err);
        writeln!(
            self.out,
            "corrupt batch within log file {:?}: {}",
            path.display().to_string(),
            err
        )
    }
}
