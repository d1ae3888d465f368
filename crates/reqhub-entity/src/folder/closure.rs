//! Closure-table rows and the propagation rule for new folders.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use reqhub_core::types::FolderId;

/// One `(ancestor, descendant, depth)` row of the transitive closure.
///
/// Rows are only inserted, never updated: depth is a function of the
/// structure at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct FolderClosure {
    /// Ancestor folder.
    pub ancestor: FolderId,
    /// Descendant folder.
    pub descendant: FolderId,
    /// Number of parent links from ancestor to descendant; 0 for self.
    pub depth: i32,
}

impl FolderClosure {
    /// The reflexive `(id, id, 0)` row every folder owns.
    pub fn reflexive(folder_id: FolderId) -> Self {
        Self {
            ancestor: folder_id,
            descendant: folder_id,
            depth: 0,
        }
    }

    /// Whether this is a folder's own reflexive row.
    pub fn is_self(&self) -> bool {
        self.ancestor == self.descendant
    }

    /// Whether this row is a direct parent/child edge.
    pub fn is_direct(&self) -> bool {
        self.depth == 1
    }

    /// The `(ancestor, descendant)` key the store enforces uniqueness on.
    pub fn key(&self) -> (FolderId, FolderId) {
        (self.ancestor, self.descendant)
    }
}

/// Rows to insert when `child` is placed under `parent`.
///
/// `parent_rows` are the rows whose descendant is the parent (every ancestor
/// of the parent, including the parent's own reflexive row). Each becomes
/// `(ancestor, child, depth + 1)`. Rows that do not point at `parent` are
/// ignored, and an ancestor is emitted at most once. An empty result means
/// the parent is not indexed and the child stays a root.
pub fn rows_under_parent(
    parent: FolderId,
    parent_rows: &[FolderClosure],
    child: FolderId,
) -> Vec<FolderClosure> {
    let mut out: Vec<FolderClosure> = Vec::with_capacity(parent_rows.len());
    for row in parent_rows.iter().filter(|r| r.descendant == parent) {
        if row.ancestor == child || out.iter().any(|r| r.ancestor == row.ancestor) {
            continue;
        }
        out.push(FolderClosure {
            ancestor: row.ancestor,
            descendant: child,
            depth: row.depth + 1,
        });
    }
    out
}
