//! Reconstruction of nested collection trees from flat rows.
//!
//! The assembler never touches a store. Callers fetch the folders, closure
//! rows and requests of one collection in bulk and hand them over, so a
//! listing costs a fixed number of queries however deep the tree is.

use std::collections::{HashMap, HashSet};

use reqhub_core::config::EdgePolicy;
use reqhub_core::types::FolderId;
use reqhub_entity::folder::{Folder, FolderClosure, FolderNode, RequestNode, TreeNode};
use reqhub_entity::request::Request;

/// Builds folder/request trees under a fixed [`EdgePolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeAssembler {
    policy: EdgePolicy,
}

impl TreeAssembler {
    /// Creates an assembler with the given edge policy.
    pub fn new(policy: EdgePolicy) -> Self {
        Self { policy }
    }

    /// The configured edge policy.
    pub fn policy(&self) -> EdgePolicy {
        self.policy
    }

    /// Assembles the children of a collection: root folders in id order,
    /// each carrying its nested sub-folders and requests, followed by the
    /// requests that sit directly in the collection.
    pub fn assemble(
        &self,
        folders: &[Folder],
        closures: &[FolderClosure],
        requests: &[Request],
    ) -> Vec<TreeNode> {
        let index = Index::build(self.policy, folders, closures, requests);

        let mut roots: Vec<TreeNode> = index
            .order
            .iter()
            .filter(|f| !index.has_parent.contains(&f.folder_id))
            .map(|f| TreeNode::Folder(index.node(f, &mut Vec::new())))
            .collect();
        roots.extend(index.requests_in(None));
        roots
    }

    /// Assembles the tree below one folder. `None` if the folder is not
    /// among `folders`.
    pub fn assemble_subtree(
        &self,
        root: FolderId,
        folders: &[Folder],
        closures: &[FolderClosure],
        requests: &[Request],
    ) -> Option<FolderNode> {
        let index = Index::build(self.policy, folders, closures, requests);
        let folder = index.folders.get(&root)?;
        Some(index.node(folder, &mut Vec::new()))
    }
}

/// Lookup tables for one assembly pass.
struct Index<'a> {
    folders: HashMap<FolderId, &'a Folder>,
    order: Vec<&'a Folder>,
    edges: HashMap<FolderId, Vec<&'a Folder>>,
    has_parent: HashSet<FolderId>,
    buckets: HashMap<Option<FolderId>, Vec<&'a Request>>,
}

impl<'a> Index<'a> {
    fn build(
        policy: EdgePolicy,
        folders: &'a [Folder],
        closures: &[FolderClosure],
        requests: &'a [Request],
    ) -> Self {
        let mut order: Vec<&Folder> = folders.iter().collect();
        order.sort_by_key(|f| f.id);
        let by_id: HashMap<FolderId, &Folder> = order.iter().map(|f| (f.folder_id, *f)).collect();

        let mut edges: HashMap<FolderId, Vec<&Folder>> = HashMap::new();
        let mut has_parent = HashSet::new();
        for row in closures.iter().filter(|c| !c.is_self()) {
            let (Some(_), Some(child)) = (by_id.get(&row.ancestor), by_id.get(&row.descendant))
            else {
                continue;
            };
            has_parent.insert(row.descendant);

            let is_edge = match policy {
                EdgePolicy::Direct => row.is_direct(),
                EdgePolicy::AllAncestors => true,
            };
            if is_edge {
                edges.entry(row.ancestor).or_default().push(*child);
            }
        }
        for children in edges.values_mut() {
            children.sort_by_key(|f| f.id);
            children.dedup_by_key(|f| f.id);
        }

        let mut sorted: Vec<&Request> = requests.iter().collect();
        sorted.sort_by_key(|r| r.id);
        let mut buckets: HashMap<Option<FolderId>, Vec<&Request>> = HashMap::new();
        for request in sorted {
            buckets.entry(request.folder_id).or_default().push(request);
        }

        Self {
            folders: by_id,
            order,
            edges,
            has_parent,
            buckets,
        }
    }

    /// Builds the node for `folder`. `path` holds the folders above it and
    /// stops a malformed closure table from looping.
    fn node(&self, folder: &Folder, path: &mut Vec<FolderId>) -> FolderNode {
        let mut node = FolderNode::from_folder(folder);

        path.push(folder.folder_id);
        if let Some(children) = self.edges.get(&folder.folder_id) {
            for child in children {
                if path.contains(&child.folder_id) {
                    continue;
                }
                node.children.push(TreeNode::Folder(self.node(child, path)));
            }
        }
        path.pop();

        node.children.extend(self.requests_in(Some(folder.folder_id)));
        node
    }

    fn requests_in(&self, folder_id: Option<FolderId>) -> impl Iterator<Item = TreeNode> + '_ {
        self.buckets
            .get(&folder_id)
            .into_iter()
            .flatten()
            .map(|r| TreeNode::Request(RequestNode::from(*r)))
    }
}
