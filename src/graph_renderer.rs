use crate::display_width::display_width;
use crate::graph_ast::{Direction, Geometry, Graph};
use crate::grid::Grid;

/// Blank cells added past the furthest box on each axis.
const GRID_PADDING: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Draw with `+ - | > < v ^` instead of box-drawing characters.
    pub ascii: bool,
    /// Accepted for callers that know their terminal width. Output is not
    /// wrapped or clipped to it.
    pub max_width: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct Glyphs {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
    arrow_right: char,
    arrow_left: char,
    arrow_down: char,
    arrow_up: char,
}

const UNICODE: Glyphs = Glyphs {
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    horizontal: '─',
    vertical: '│',
    arrow_right: '▶',
    arrow_left: '◀',
    arrow_down: '▼',
    arrow_up: '▲',
};

const ASCII: Glyphs = Glyphs {
    top_left: '+',
    top_right: '+',
    bottom_left: '+',
    bottom_right: '+',
    horizontal: '-',
    vertical: '|',
    arrow_right: '>',
    arrow_left: '<',
    arrow_down: 'v',
    arrow_up: '^',
};

const DIR_L: u8 = 1;
const DIR_R: u8 = 2;
const DIR_U: u8 = 4;
const DIR_D: u8 = 8;

impl Glyphs {
    fn arrow(&self, direction: Direction) -> char {
        match direction {
            Direction::LeftRight => self.arrow_right,
            Direction::RightLeft => self.arrow_left,
            Direction::TopBottom => self.arrow_down,
            Direction::BottomTop => self.arrow_up,
        }
    }

    /// Glyph joining the two sides named in `connections`.
    fn corner(&self, connections: u8) -> char {
        match connections {
            c if c == DIR_R | DIR_D => self.top_left,
            c if c == DIR_L | DIR_D => self.top_right,
            c if c == DIR_R | DIR_U => self.bottom_left,
            c if c == DIR_L | DIR_U => self.bottom_right,
            c if c == DIR_U | DIR_D => self.vertical,
            _ => self.horizontal,
        }
    }
}

pub fn render(graph: &Graph, options: &RenderOptions) -> String {
    let glyphs = if options.ascii { &ASCII } else { &UNICODE };

    let (width, height) = graph
        .nodes
        .values()
        .filter_map(|n| n.geometry)
        .fold((0usize, 0usize), |(w, h), g| (w.max(g.x + g.width), h.max(g.y + g.height)));
    let mut grid = Grid::new(width + GRID_PADDING, height + GRID_PADDING);

    if let Some(max_width) = options.max_width {
        if grid.width() > max_width {
            tracing::debug!(width = grid.width(), max_width, "output wider than requested");
        }
    }

    for node in graph.nodes.values() {
        if let Some(geometry) = node.geometry {
            draw_box(&mut grid, geometry, &node.label, glyphs);
        }
    }

    for edge in &graph.edges {
        let from = graph.nodes.get(&edge.from).and_then(|n| n.geometry);
        let to = graph.nodes.get(&edge.to).and_then(|n| n.geometry);
        if let (Some(from), Some(to)) = (from, to) {
            draw_edge(&mut grid, graph.direction, from, to, glyphs);
        }
    }

    grid.render()
}

fn draw_box(grid: &mut Grid, g: Geometry, label: &str, glyphs: &Glyphs) {
    let Geometry { x, y, width, height } = g;
    let right = x + width - 1;
    let bottom = y + height - 1;

    grid.set(y, x, glyphs.top_left);
    grid.set(y, right, glyphs.top_right);
    grid.set(bottom, x, glyphs.bottom_left);
    grid.set(bottom, right, glyphs.bottom_right);

    for col in (x + 1)..right {
        grid.set(y, col, glyphs.horizontal);
        grid.set(bottom, col, glyphs.horizontal);
    }
    for row in (y + 1)..bottom {
        grid.set(row, x, glyphs.vertical);
        grid.set(row, right, glyphs.vertical);
    }

    let pad_left = width.saturating_sub(display_width(label)) / 2;
    grid.write_str(y + 1, x + pad_left, label);
}

/// Source and target anchor cells as `(x, y)`. The source anchor sits just
/// outside the source box; the target anchor is the target's border cell.
fn anchors(direction: Direction, from: Geometry, to: Geometry) -> ((isize, isize), (isize, isize)) {
    let [fx, fy, fw, fh] = [from.x, from.y, from.width, from.height].map(|v| v as isize);
    let [tx, ty, tw, th] = [to.x, to.y, to.width, to.height].map(|v| v as isize);
    match direction {
        Direction::LeftRight => ((fx + fw, fy + fh / 2), (tx, ty + th / 2)),
        Direction::RightLeft => ((fx - 1, fy + fh / 2), (tx + tw - 1, ty + th / 2)),
        Direction::TopBottom => ((fx + fw / 2, fy + fh), (tx + tw / 2, ty)),
        Direction::BottomTop => ((fx + fw / 2, fy - 1), (tx + tw / 2, ty + th - 1)),
    }
}

fn step_toward(from: isize, to: isize) -> isize {
    if to > from { 1 } else { -1 }
}

/// Side of a cell reached by moving `sign` along x (`on_x`) or y.
fn heading(on_x: bool, sign: isize) -> u8 {
    match (on_x, sign > 0) {
        (true, true) => DIR_R,
        (true, false) => DIR_L,
        (false, true) => DIR_D,
        (false, false) => DIR_U,
    }
}

/// Draws one edge as a straight run, or as travel leg, cross leg, travel leg
/// turning at the midpoint of the travel axis. Coordinates are handled as
/// (travel, cross) pairs so all four directions share one routine.
fn draw_edge(grid: &mut Grid, direction: Direction, from: Geometry, to: Geometry, glyphs: &Glyphs) {
    let horizontal = direction.is_horizontal();
    let (start, end) = anchors(direction, from, to);
    let split = |(x, y): (isize, isize)| if horizontal { (x, y) } else { (y, x) };
    let (sa, sc) = split(start);
    let (ea, ec) = split(end);

    let (travel_line, cross_line) = if horizontal {
        (glyphs.horizontal, glyphs.vertical)
    } else {
        (glyphs.vertical, glyphs.horizontal)
    };
    let mut plot = |a: isize, c: isize, ch: char| {
        if horizontal {
            grid.plot(a, c, ch);
        } else {
            grid.plot(c, a, ch);
        }
    };

    let travel = step_toward(sa, ea);

    if sc == ec {
        let mut a = sa;
        while a != ea {
            plot(a, sc, travel_line);
            a += travel;
        }
        plot(ea - travel, ec, glyphs.arrow(direction));
        return;
    }

    let mid = sa + (ea - sa).div_euclid(2);
    let cross = step_toward(sc, ec);

    let mut a = sa;
    while a != mid {
        plot(a, sc, travel_line);
        a += step_toward(sa, mid);
    }
    plot(
        mid,
        sc,
        glyphs.corner(heading(horizontal, -travel) | heading(!horizontal, cross)),
    );

    let mut c = sc + cross;
    while c != ec {
        plot(mid, c, cross_line);
        c += cross;
    }
    plot(
        mid,
        ec,
        glyphs.corner(heading(!horizontal, -cross) | heading(horizontal, travel)),
    );

    let mut a = mid + travel;
    while a != ea {
        plot(a, ec, travel_line);
        a += step_toward(mid + travel, ea);
    }
    plot(ea - travel, ec, glyphs.arrow(direction));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_layout::layout;
    use crate::graph_parser::parse_graph;
    use pretty_assertions::assert_eq;

    fn render_input(input: &str) -> String {
        render_input_with(input, &RenderOptions::default())
    }

    fn render_input_with(input: &str, options: &RenderOptions) -> String {
        let mut graph = parse_graph(input).unwrap();
        layout(&mut graph);
        render(&graph, options)
    }

    #[test]
    fn render_single_node() {
        let output = render_input("flowchart TB\n    A[Hello]\n");
        let expected = concat!(
            "┌─────┐  \n",
            "│Hello│  \n",
            "└─────┘  \n",
            "         \n",
            "         ",
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn render_short_label_is_centered() {
        let output = render_input("flowchart TB\n    A\n");
        assert_eq!(output.lines().nth(1), Some("│ A │  "));
    }

    #[test]
    fn render_even_padding_floors_left() {
        let output = render_input("flowchart TB\n    A[ab]\n");
        assert_eq!(output.lines().nth(1), Some("│ab │  "));
    }

    #[test]
    fn render_lr_straight_edge() {
        let output = render_input("flowchart LR\n    A[Start] --> B[End]\n");
        let expected = concat!(
            "┌─────┐    ┌───┐  \n",
            "│Start│───▶│End│  \n",
            "└─────┘    └───┘  \n",
            "                  \n",
            "                  ",
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn render_rl_mirrors_lr() {
        let output = render_input("flowchart RL\n    A[Start] --> B[End]\n");
        assert_eq!(output.lines().nth(1), Some("│End│◀───│Start│  "));
    }

    #[test]
    fn render_tb_straight_edge() {
        let output = render_input("flowchart TB\n    A[Start] --> B[End]\n");
        let expected = concat!(
            "┌─────┐  \n",
            "│Start│  \n",
            "└─────┘  \n",
            "   │     \n",
            "   ▼     \n",
            " ┌───┐   \n",
            " │End│   \n",
            " └───┘   \n",
            "         \n",
            "         ",
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn render_bt_mirrors_tb() {
        let output = render_input("flowchart BT\n    A[Start] --> B[End]\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[1], " │End│   ");
        assert_eq!(lines[3], "   ▲     ");
        assert_eq!(lines[4], "   │     ");
        assert_eq!(lines[6], "│Start│  ");
    }

    #[test]
    fn render_lr_bent_edges() {
        let output = render_input("flowchart LR\n    A --> B\n    A --> C\n");
        let expected = concat!(
            "         ┌───┐  \n",
            "       ┌▶│ B │  \n",
            "┌───┐  │ └───┘  \n",
            "│ A │──┐        \n",
            "└───┘  │        \n",
            "       │ ┌───┐  \n",
            "       └▶│ C │  \n",
            "         └───┘  \n",
            "                \n",
            "                ",
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn render_rl_bent_edges_route_leftward() {
        let output = render_input("flowchart RL\n    A --> B\n    A --> C\n");
        let expected = concat!(
            "┌───┐           \n",
            "│ B │◀┐         \n",
            "└───┘ │  ┌───┐  \n",
            "      ┌──│ A │  \n",
            "      │  └───┘  \n",
            "┌───┐ │         \n",
            "│ C │◀┘         \n",
            "└───┘           \n",
            "                \n",
            "                ",
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn render_self_loop_and_cycles_degrade_silently() {
        for input in [
            "flowchart LR\n    A --> A\n",
            "flowchart LR\n    A --> B\n    B --> C\n    C --> A\n",
            "flowchart TB\n    A --> B\n    B --> C\n    C --> A\n",
        ] {
            let output = render_input(input);
            let lines: Vec<&str> = output.lines().collect();
            assert!(!output.trim().is_empty(), "blank output for {input:?}");
            assert!(
                lines.iter().all(|l| l.chars().count() == lines[0].chars().count()),
                "ragged rows for {input:?}:\n{output}"
            );
            assert!(output.contains('┌'), "no boxes for {input:?}");
        }
    }

    #[test]
    fn render_self_loop_runs_back_through_its_box() {
        let output = render_input("flowchart LR\n    A --> A\n");
        assert_eq!(output.lines().nth(1), Some("│▶──── "));
    }

    #[test]
    fn render_tb_bent_edge_turns_at_midpoint() {
        let output = render_input("flowchart TB\n    A --> B\n    A --> C\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[2], "    └───┘       ");
        assert_eq!(lines[3], "      │         ");
        assert_eq!(lines[4], "  ▼───└────▼    ");
    }

    #[test]
    fn render_ascii_glyphs() {
        let options = RenderOptions {
            ascii: true,
            ..RenderOptions::default()
        };
        let output = render_input_with("flowchart LR\n    A --> B\n", &options);
        let expected = concat!(
            "+---+    +---+  \n",
            "| A |--->| B |  \n",
            "+---+    +---+  \n",
            "                \n",
            "                ",
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn render_ascii_bends_use_plus() {
        let options = RenderOptions {
            ascii: true,
            ..RenderOptions::default()
        };
        let output = render_input_with("flowchart LR\n    A --> B\n    A --> C\n", &options);
        assert_eq!(output.lines().nth(3), Some("| A |--+        "));
        assert_eq!(output.lines().nth(6), Some("       +>| C |  "));
    }

    #[test]
    fn render_max_width_is_not_enforced() {
        let options = RenderOptions {
            max_width: Some(4),
            ..RenderOptions::default()
        };
        let clipped = render_input_with("flowchart LR\n    A --> B\n", &options);
        assert_eq!(clipped, render_input("flowchart LR\n    A --> B\n"));
    }

    #[test]
    fn render_grid_is_padded() {
        let output = render_input("flowchart LR\n    A --> B --> C\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3 + GRID_PADDING);
        let width = 3 * 5 + 2 * 4 + GRID_PADDING;
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn render_unlaid_graph_is_blank() {
        let graph = parse_graph("flowchart LR\n    A --> B\n").unwrap();
        assert_eq!(render(&graph, &RenderOptions::default()), "  \n  ");
    }

    #[test]
    fn render_corner_lookup() {
        assert_eq!(UNICODE.corner(DIR_R | DIR_D), '┌');
        assert_eq!(UNICODE.corner(DIR_L | DIR_D), '┐');
        assert_eq!(UNICODE.corner(DIR_R | DIR_U), '└');
        assert_eq!(UNICODE.corner(DIR_L | DIR_U), '┘');
        assert_eq!(ASCII.corner(DIR_L | DIR_U), '+');
    }
}
