//! Union-find with path compression and union by rank

/// Partition of elements `0..size` into disjoint sets
#[derive(Debug, Clone)]
pub struct DisjointSet {
    /// Next element up the tree; roots point to themselves
    parent: Vec<usize>,
    /// Upper bound of the tree height below each root
    rank: Vec<usize>,
}

impl DisjointSet {
    /// Create `size` singleton sets.
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Find the representative of the set containing `i`.
    ///
    /// Every element visited on the way is re-pointed directly to the root.
    ///
    /// Panics if `i` is out of range.
    pub fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = i;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the sets containing `i` and `j`.
    ///
    /// Returns `false` if they already were in the same set. On equal
    /// ranks, the root of `j` is attached under the root of `i`.
    pub fn union(&mut self, i: usize, j: usize) -> bool {
        let i_root = self.find(i);
        let j_root = self.find(j);
        if i_root == j_root {
            return false;
        }

        if self.rank[i_root] < self.rank[j_root] {
            self.parent[i_root] = j_root;
        } else {
            self.parent[j_root] = i_root;
            if self.rank[i_root] == self.rank[j_root] {
                self.rank[i_root] += 1;
            }
        }
        true
    }

    pub fn same_set(&mut self, i: usize, j: usize) -> bool {
        self.find(i) == self.find(j)
    }
}

#[cfg(test)]
mod tests {
    use super::DisjointSet;

    #[test]
    fn starts_with_singletons() {
        let mut set = DisjointSet::new(4);
        assert_eq!(set.len(), 4);
        for i in 0..4 {
            assert_eq!(set.find(i), i);
        }
        assert!(!set.same_set(0, 1));
    }

    #[test]
    fn union_of_joined_sets_is_rejected() {
        let mut set = DisjointSet::new(3);
        assert!(set.union(0, 1));
        assert!(!set.union(1, 0));
        assert!(!set.union(0, 0));
        assert!(set.same_set(0, 1));
        assert!(!set.same_set(0, 2));
    }

    #[test]
    fn tie_attaches_second_root_under_first() {
        let mut set = DisjointSet::new(2);
        set.union(0, 1);
        assert_eq!(set.find(1), 0);
        assert_eq!(set.rank[0], 1);
        assert_eq!(set.rank[1], 0);
    }

    #[test]
    fn lower_rank_goes_under_higher_rank() {
        let mut set = DisjointSet::new(3);
        set.union(1, 2);
        // Root 0 has rank 0, root 1 has rank 1
        set.union(0, 1);
        assert_eq!(set.find(0), 1);
        assert_eq!(set.rank[1], 1);
    }

    #[test]
    fn find_compresses_paths() {
        let mut set = DisjointSet::new(5);
        // Build a chain 4 -> 3 -> 2 -> 1 -> 0 by hand
        set.parent = vec![0, 0, 1, 2, 3];
        assert_eq!(set.find(4), 0);
        assert_eq!(set.parent, vec![0, 0, 0, 0, 0]);
    }

    #[test]
    fn fully_connected_set_rejects_further_unions() {
        let size = 16;
        let mut set = DisjointSet::new(size);
        let successful = (1..size).filter(|&i| set.union(i - 1, i)).count();
        assert_eq!(successful, size - 1);

        for i in 0..size {
            for j in 0..size {
                assert!(!set.union(i, j));
            }
        }
    }

    #[test]
    fn empty_set() {
        let set = DisjointSet::new(0);
        assert!(set.is_empty());
    }
}
