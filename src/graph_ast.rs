use indexmap::IndexMap;

pub type NodeId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LeftRight,
    RightLeft,
    TopBottom,
    BottomTop,
}

impl Direction {
    /// Layers advance along the x axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::LeftRight | Direction::RightLeft)
    }

    /// Layers are placed from the far end of the primary axis back to the origin.
    pub fn is_reversed(self) -> bool {
        matches!(self, Direction::RightLeft | Direction::BottomTop)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Direction::LeftRight => "LR",
            Direction::RightLeft => "RL",
            Direction::TopBottom => "TB",
            Direction::BottomTop => "BT",
        }
    }
}

/// Position and size of a laid-out node, in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    /// Filled in by [`crate::graph_layout::layout`].
    pub geometry: Option<Geometry>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            geometry: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub direction: Direction,
    /// Keyed by id, iterated in first-declaration order.
    pub nodes: IndexMap<NodeId, Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    /// Creates the node on first sight; an explicit label overwrites the
    /// current one, a missing label leaves it alone.
    pub fn declare_node(&mut self, id: &str, label: Option<&str>) {
        match self.nodes.get_mut(id) {
            Some(node) => {
                if let Some(label) = label {
                    node.label = label.to_string();
                }
            }
            None => {
                let node = Node::new(id, label.unwrap_or(id));
                self.nodes.insert(id.to_string(), node);
            }
        }
    }

    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.edges.push(Edge {
            from: from.to_string(),
            to: to.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn declare_node_defaults_label_to_id() {
        let mut graph = Graph::new(Direction::LeftRight);
        graph.declare_node("A", None);
        assert_eq!(graph.nodes["A"].label, "A");
    }

    #[test]
    fn declare_node_keeps_explicit_label() {
        let mut graph = Graph::new(Direction::LeftRight);
        graph.declare_node("A", None);
        graph.declare_node("A", Some("Foo"));
        graph.declare_node("A", None);
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes["A"].label, "Foo");
    }

    #[test]
    fn nodes_iterate_in_insertion_order() {
        let mut graph = Graph::new(Direction::TopBottom);
        for id in ["zeta", "alpha", "mid"] {
            graph.declare_node(id, None);
        }
        let ids: Vec<&str> = graph.nodes.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn direction_orientation() {
        assert!(Direction::LeftRight.is_horizontal());
        assert!(Direction::RightLeft.is_horizontal());
        assert!(!Direction::TopBottom.is_horizontal());
        assert!(Direction::RightLeft.is_reversed());
        assert!(Direction::BottomTop.is_reversed());
        assert!(!Direction::TopBottom.is_reversed());
    }
}
