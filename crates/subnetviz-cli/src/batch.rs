//! Parallel batch processing using Rayon
//!
//! Each input line is `address` or `address/prefix`. Lines are independent,
//! so they are fanned out over a dedicated thread pool. A bad line yields an
//! error row instead of aborting the run.

use anyhow::Result;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use subnetviz_cidr::SubnetBlock;
use subnetviz_classify::Classifier;
use tracing::{debug, info};

use crate::input::parse_target;
use crate::report::BatchRow;

/// Batch processor with parallel execution
pub struct BatchProcessor {
    classifier: Classifier,
    thread_pool: rayon::ThreadPool,
}

impl BatchProcessor {
    /// Create a new batch processor
    ///
    /// # Arguments
    ///
    /// * `classifier` - Classifier used for every line
    /// * `num_threads` - Number of threads (default: CPU cores)
    pub fn new(classifier: Classifier, num_threads: Option<usize>) -> Result<Self> {
        let num_threads = num_threads.unwrap_or_else(num_cpus::get);

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()?;

        Ok(Self {
            classifier,
            thread_pool,
        })
    }

    /// Process lines in parallel, preserving input order
    ///
    /// Blank lines and `#` comments are skipped.
    pub fn process_lines(&self, lines: Vec<String>) -> Vec<BatchRow> {
        let lines: Vec<String> = lines
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .collect();
        let total = lines.len();
        let processed = AtomicUsize::new(0);

        self.thread_pool.install(|| {
            lines
                .into_par_iter()
                .map(|line| {
                    let row = self.process_line(&line);

                    let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if count % 10_000 == 0 || count == total {
                        info!(count, total, "batch progress");
                    }
                    row
                })
                .collect()
        })
    }

    fn process_line(&self, line: &str) -> BatchRow {
        let (address, prefix_len) = match parse_target(line) {
            Ok(target) => target,
            Err(err) => {
                debug!(line, %err, "rejected batch line");
                return BatchRow::failed(line, err);
            }
        };

        let profile = self.classifier.profile(address);
        let block = prefix_len.map(|p| SubnetBlock::new(address, p));
        let (network, broadcast) = match block {
            Some(Ok(block)) => (
                Some(block.network().to_string()),
                Some(block.broadcast().to_string()),
            ),
            Some(Err(err)) => return BatchRow::failed(line, err),
            None => (None, None),
        };

        let notes = profile
            .special_notes
            .iter()
            .map(|n| format!("{} {}", n.notation, n.description))
            .collect::<Vec<_>>()
            .join("; ");

        BatchRow {
            input: line.to_string(),
            network,
            broadcast,
            class: Some(profile.classification.class.to_string()),
            is_private: Some(profile.is_private),
            special_notes: (!notes.is_empty()).then_some(notes),
            error: None,
        }
    }

    /// Get thread pool info
    pub fn thread_count(&self) -> usize {
        self.thread_pool.current_num_threads()
    }
}
