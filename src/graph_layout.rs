use std::collections::VecDeque;

use indexmap::IndexMap;

use crate::display_width::display_width;
use crate::graph_ast::*;

const MIN_NODE_WIDTH: usize = 5;
const BOX_HEIGHT: usize = 3;
const HORIZONTAL_GAP: usize = 4;
const VERTICAL_GAP: usize = 2;

/// Layer assignment produced by [`layout`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ranks {
    pub layers: IndexMap<NodeId, usize>,
    /// Nodes the propagation never released because they sit on, or behind, a
    /// cycle. They keep whatever layer they had reached.
    pub unresolved: Vec<NodeId>,
}

impl Ranks {
    pub fn layer(&self, id: &str) -> Option<usize> {
        self.layers.get(id).copied()
    }

    pub fn has_cycle(&self) -> bool {
        !self.unresolved.is_empty()
    }
}

/// Sizes every node and assigns its position. Cyclic graphs are laid out on a
/// best-effort basis and reported through [`Ranks::unresolved`].
pub fn layout(graph: &mut Graph) -> Ranks {
    for node in graph.nodes.values_mut() {
        node.geometry = Some(Geometry {
            x: 0,
            y: 0,
            width: box_width(&node.label),
            height: BOX_HEIGHT,
        });
    }

    let ranks = assign_ranks(graph);
    if ranks.has_cycle() {
        tracing::warn!(
            unresolved = ?ranks.unresolved,
            "cycle detected in graph, layout may be imperfect"
        );
    }

    assign_coordinates(graph, &ranks);
    ranks
}

fn box_width(label: &str) -> usize {
    (display_width(label) + 2).max(MIN_NODE_WIDTH)
}

/// Longest-path layering by Kahn propagation.
fn assign_ranks(graph: &Graph) -> Ranks {
    let count = graph.nodes.len();
    let mut in_degree = vec![0usize; count];
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); count];
    for edge in &graph.edges {
        let (Some(from), Some(to)) = (
            graph.nodes.get_index_of(&edge.from),
            graph.nodes.get_index_of(&edge.to),
        ) else {
            continue;
        };
        outgoing[from].push(to);
        in_degree[to] += 1;
    }

    let mut layer = vec![0usize; count];
    let mut released = vec![false; count];
    let mut queue: VecDeque<usize> = (0..count).filter(|&i| in_degree[i] == 0).collect();

    while let Some(u) = queue.pop_front() {
        released[u] = true;
        for &v in &outgoing[u] {
            layer[v] = layer[v].max(layer[u] + 1);
            in_degree[v] -= 1;
            if in_degree[v] == 0 {
                queue.push_back(v);
            }
        }
    }

    let mut ranks = Ranks::default();
    for (i, id) in graph.nodes.keys().enumerate() {
        ranks.layers.insert(id.clone(), layer[i]);
        if !released[i] {
            ranks.unresolved.push(id.clone());
        }
    }
    ranks
}

/// Places layers one after another along the primary axis and stacks each
/// layer's nodes along the cross axis, centered on the widest layer.
fn assign_coordinates(graph: &mut Graph, ranks: &Ranks) {
    let direction = graph.direction;
    let horizontal = direction.is_horizontal();
    let (along_gap, across_gap) = if horizontal {
        (HORIZONTAL_GAP, VERTICAL_GAP)
    } else {
        (VERTICAL_GAP, HORIZONTAL_GAP)
    };

    let max_layer = ranks.layers.values().copied().max().unwrap_or(0);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); max_layer + 1];
    for (i, id) in graph.nodes.keys().enumerate() {
        layers[ranks.layer(id).unwrap_or(0)].push(i);
    }

    // (along, across) extent of a node for this direction.
    let spans: Vec<(usize, usize)> = graph
        .nodes
        .values()
        .map(|node| {
            let g = node.geometry.unwrap_or_default();
            if horizontal {
                (g.width, g.height)
            } else {
                (g.height, g.width)
            }
        })
        .collect();

    let layer_depth: Vec<usize> = layers
        .iter()
        .map(|members| members.iter().map(|&i| spans[i].0).max().unwrap_or(0))
        .collect();
    let layer_breadth: Vec<usize> = layers
        .iter()
        .map(|members| {
            let total: usize = members.iter().map(|&i| spans[i].1).sum();
            total + members.len().saturating_sub(1) * across_gap
        })
        .collect();
    let max_breadth = layer_breadth.iter().copied().max().unwrap_or(0);

    let order: Vec<usize> = if direction.is_reversed() {
        (0..=max_layer).rev().collect()
    } else {
        (0..=max_layer).collect()
    };

    let mut along = 0;
    for l in order {
        let mut across = (max_breadth - layer_breadth[l]) / 2;
        for &i in &layers[l] {
            if let Some((_, node)) = graph.nodes.get_index_mut(i) {
                let geometry = node.geometry.get_or_insert_with(Geometry::default);
                if horizontal {
                    geometry.x = along;
                    geometry.y = across;
                } else {
                    geometry.x = across;
                    geometry.y = along;
                }
            }
            across += spans[i].1 + across_gap;
        }
        along += layer_depth[l] + along_gap;
    }
}
