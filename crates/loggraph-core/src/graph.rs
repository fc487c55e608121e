//! The immutable base commit graph.
//!
//! Nodes are dense real indices `0..N` in display order: every edge points from a child (`up`)
//! to one of its parents (`down`), and `up < down` always holds. A parent that lies outside the
//! loaded range is represented by the [`NOT_LOADED`] sentinel in the child's down list.

use crate::NOT_LOADED;
use crate::error::{Error, Result};
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// One commit as handed over by history loading, in display order (children first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    #[serde(default)]
    pub parents: Vec<String>,
}

impl CommitRecord {
    pub fn new(
        hash: impl Into<String>,
        parents: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            hash: hash.into(),
            parents: parents.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BaseGraph {
    up: Vec<Vec<usize>>,
    down: Vec<Vec<usize>>,
    hashes: Option<Vec<String>>,
}

impl BaseGraph {
    /// Builds a graph from `(up, down)` pairs. `down` may be [`NOT_LOADED`].
    ///
    /// Adjacency order follows edge order. Repeated edges are kept once, except
    /// [`NOT_LOADED`] ones: each stands for a distinct unloaded parent.
    pub fn from_edges(
        node_count: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self> {
        let mut graph = Self {
            up: vec![Vec::new(); node_count],
            down: vec![Vec::new(); node_count],
            hashes: None,
        };
        for (up, down) in edges {
            graph.add_edge(up, down)?;
        }
        Ok(graph)
    }

    /// A single line `0 -> 1 -> ... -> n-1`.
    pub fn linear(node_count: usize) -> Self {
        let mut up = vec![Vec::new(); node_count];
        let mut down = vec![Vec::new(); node_count];
        for i in 1..node_count {
            down[i - 1].push(i);
            up[i].push(i - 1);
        }
        Self {
            up,
            down,
            hashes: None,
        }
    }

    /// Resolves parents by hash. Parents missing from `commits` become [`NOT_LOADED`] edges.
    pub fn from_commits(commits: &[CommitRecord]) -> Result<Self> {
        let mut index_of: HashMap<&str, usize> = HashMap::default();
        index_of.reserve(commits.len());
        for (idx, commit) in commits.iter().enumerate() {
            if index_of.insert(commit.hash.as_str(), idx).is_some() {
                return Err(Error::DuplicateHash {
                    hash: commit.hash.clone(),
                });
            }
        }

        let mut graph = Self {
            up: vec![Vec::new(); commits.len()],
            down: vec![Vec::new(); commits.len()],
            hashes: Some(commits.iter().map(|c| c.hash.clone()).collect()),
        };
        for (idx, commit) in commits.iter().enumerate() {
            for parent in &commit.parents {
                let down = index_of.get(parent.as_str()).copied().unwrap_or(NOT_LOADED);
                graph.add_edge(idx, down)?;
            }
        }
        Ok(graph)
    }

    fn add_edge(&mut self, up: usize, down: usize) -> Result<()> {
        let len = self.node_count();
        if up >= len || (down >= len && down != NOT_LOADED) {
            return Err(Error::EdgeEndpointOutOfRange { up, down, len });
        }
        if down != NOT_LOADED && up >= down {
            return Err(Error::EdgeNotTopological { up, down });
        }
        if down != NOT_LOADED && self.down[up].contains(&down) {
            return Ok(());
        }
        self.down[up].push(down);
        if down != NOT_LOADED {
            self.up[down].push(up);
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.up.len()
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.node_count()
    }

    pub fn up_nodes(&self, index: usize) -> &[usize] {
        self.up.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    /// May contain [`NOT_LOADED`].
    pub fn down_nodes(&self, index: usize) -> &[usize] {
        self.down.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn edge_count(&self) -> usize {
        self.down.iter().map(Vec::len).sum()
    }

    /// Commit identity for diagnostics; graphs built from plain edges use the decimal index.
    pub fn hash(&self, index: usize) -> Option<Cow<'_, str>> {
        if !self.contains(index) {
            return None;
        }
        Some(match &self.hashes {
            Some(hashes) => Cow::Borrowed(hashes[index].as_str()),
            None => Cow::Owned(index.to_string()),
        })
    }
}
