/// Square boolean matrix over node indices.
///
/// `get(i, j)` means node `i` is an ancestor of node `j`. The diagonal is
/// never set: ancestry here is a strict partial order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl RelationMatrix {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> bool {
        self.cells[i * self.size + j]
    }

    /// Record that `i` is an ancestor of `j`. Setting the diagonal is a
    /// no-op.
    pub fn set(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.cells[i * self.size + j] = true;
    }

    pub fn clear(&mut self, i: usize, j: usize) {
        self.cells[i * self.size + j] = false;
    }

    /// Number of set entries.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Iterate over the set `(i, j)` entries in row-major order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        (0..size)
            .flat_map(move |i| (0..size).map(move |j| (i, j)))
            .filter(move |&(i, j)| self.get(i, j))
    }

    /// Transitive reduction: drop every edge whose ancestry is witnessed
    /// through some intermediate node.
    ///
    /// The removal condition reads only `self`, never the partially
    /// updated output, so the scan order does not affect the result. For
    /// a strict partial order this yields the unique minimal edge set.
    pub fn transitive_reduction(&self) -> RelationMatrix {
        let mut reduced = self.clone();
        for k in 0..self.size {
            for l in 0..self.size {
                if !self.get(k, l) {
                    continue;
                }
                for m in 0..self.size {
                    if self.get(l, m) && self.get(k, m) {
                        reduced.clear(k, m);
                    }
                }
            }
        }
        reduced
    }
}
