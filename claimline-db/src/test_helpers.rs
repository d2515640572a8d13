//! Shared helpers for tests in dependent crates (behind the `test-helpers`
//! feature).

use std::path::PathBuf;

use crate::db::DbPool;
use crate::error::DbResult;

/// Open a throwaway database under the given directory.
///
/// Callers own the directory lifetime (typically a `tempfile::TempDir`).
pub async fn open_test_db(dir: &std::path::Path) -> DbResult<DbPool> {
    let path: PathBuf = dir.join("claimline-test.sqlite3");
    DbPool::open(&path).await
}
