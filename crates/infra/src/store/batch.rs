//! Chunked bulk commits.
//!
//! Bulk imports can carry thousands of writes; the backend caps a single
//! atomic commit, so large plans are split into fixed-size chunks committed
//! in order. Only individual chunks are atomic — a failure mid-run leaves
//! earlier chunks applied and is reported as a partial batch.

use tracing::debug;

use super::{LedgerStore, StoreError, Write};

/// Maximum writes per committed chunk.
pub const IMPORT_CHUNK_SIZE: usize = 450;

/// Commit `writes` in order, `IMPORT_CHUNK_SIZE` at a time. Returns the
/// number of writes applied. On failure the error carries how many writes
/// from earlier chunks already landed.
pub fn commit_chunked<S: LedgerStore>(store: &S, writes: Vec<Write>) -> Result<usize, StoreError> {
    let total = writes.len();
    let mut committed = 0usize;

    let mut writes = writes;
    while !writes.is_empty() {
        let rest = writes.split_off(writes.len().min(IMPORT_CHUNK_SIZE));
        let chunk = std::mem::replace(&mut writes, rest);
        let len = chunk.len();

        store.commit(chunk).map_err(|source| {
            if committed == 0 {
                source
            } else {
                StoreError::PartialBatch {
                    committed,
                    source: Box::new(source),
                }
            }
        })?;

        committed += len;
        debug!(committed, total, "import chunk committed");
    }

    Ok(committed)
}
