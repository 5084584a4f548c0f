//! Per-key min/mean/max over large `<key>;<value>` files.
//!
//! The input is mapped once, cut into line-aligned ranges, and each range is
//! scanned by its own worker into a private [`AggregateTable`]. The finished
//! tables are handed back and merged on one thread, then rendered in key
//! order.

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

pub mod chunking;
pub mod config;
pub mod error;
pub mod measurement;
pub mod merge;
pub mod parse;
pub mod report;
pub mod source;
pub mod table;
pub mod worker;

pub use config::{Config, TableConfig, MAX_KEY_LEN};
pub use error::{BrcError, Result};
pub use measurement::{Measurement, Tenths};
pub use source::Source;
pub use table::AggregateTable;

/// Aggregates the file at `file_path` and writes the summary to `out`.
pub fn brc<W: Write>(file_path: &Path, config: &Config, out: &mut W) -> Result<()> {
    let timer = Instant::now();
    let source = Source::open(file_path)?;
    let summary = aggregate(source.bytes(), config)?;

    report::write_output(&summary, out)?;
    out.flush()?;

    info!(
        keys = summary.len(),
        observations = summary.iter().map(| (_, m) | m.count).sum::<u64>(),
        bytes = source.len(),
        elapsed = ?timer.elapsed(),
        "summary written"
    );
    Ok(())
}

/// Scans `buffer` with `config.workers` workers and returns the merged table.
pub fn aggregate(buffer: &[u8], config: &Config) -> Result<AggregateTable> {
    let workers = config.workers.get();
    let boundaries = chunking::find_chunk_boundaries(buffer, workers);
    debug!(workers, ?boundaries, "planned ranges");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(| index | format!("brc-worker-{index}"))
        .build()?;

    let parts: Vec<AggregateTable> = pool.install(
        || boundaries
            .into_par_iter()
            .map(| range | worker::scan_ascii_chunk(buffer, range, &config.table))
            .collect::<Result<Vec<_>>>()
    )?;

    merge::merge(parts, &config.table)
}
