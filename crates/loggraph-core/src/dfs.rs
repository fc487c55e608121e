//! Iterative depth-first walks.
//!
//! Commit histories routinely contain linear runs of tens of thousands of nodes, so walks keep
//! their path on an explicit stack instead of the call stack.

/// A reusable DFS driver.
///
/// The walk itself carries no visited set: the `next` callback decides which neighbor to step
/// into and is expected to mark what it returns (or otherwise never return the same node
/// twice). Returning `None` backtracks one level.
#[derive(Debug, Default)]
pub struct Dfs {
    stack: Vec<usize>,
}

impl Dfs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stack: Vec::with_capacity(capacity),
        }
    }

    pub fn walk(&mut self, start: usize, mut next: impl FnMut(usize) -> Option<usize>) {
        self.stack.clear();
        self.stack.push(start);
        while let Some(&current) = self.stack.last() {
            match next(current) {
                Some(node) => self.stack.push(node),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// One-shot convenience around [`Dfs::walk`].
pub fn walk(start: usize, next: impl FnMut(usize) -> Option<usize>) {
    Dfs::new().walk(start, next);
}
