/// Derivation-tree node. Identity is the allocation index; children are not
/// stored, they form an implicit chain through `sibling` (left to right, all
/// sharing the same `father`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub symbol: usize,
    pub father: i64,
    pub sibling: i64,
}

/// Flat, append-only arena of derivation-tree nodes. Node 0 is always the
/// start symbol with father -1.
#[derive(Debug, Clone, Default)]
pub struct ParseTree {
    nodes: Vec<Node>,
}

impl ParseTree {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn push(&mut self, symbol: usize, father: i64) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            symbol,
            father,
            sibling: -1,
        });
        idx
    }

    pub fn set_sibling(&mut self, index: usize, sibling: usize) {
        self.nodes[index].sibling = sibling as i64;
    }

    pub fn get(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Children of a node in left-to-right order, derived by scanning for the
    /// first child and following the sibling chain.
    pub fn children(&self, index: usize) -> Vec<usize> {
        let mut children = Vec::new();
        let first = self
            .nodes
            .iter()
            .position(|n| n.father == index as i64);
        let mut next = first;
        while let Some(idx) = next {
            children.push(idx);
            next = match self.nodes[idx].sibling {
                -1 => None,
                s => Some(s as usize),
            };
        }
        children
    }
}
