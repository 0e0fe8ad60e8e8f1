use std::str::FromStr;

use tracing::{debug, info, warn};

use super::error::ParseError;
use super::model::Graph;

const POS_MARKER: &str = "pos=\"";
const EDGE_FROM_END: &str = " --";
const EDGE_TO_START: &str = "-- image";
const EDGE_TO_END: &str = " [";
const WEIGHT_START: &str = "weight=\"";
const WEIGHT_END: &str = "\", pos=";

#[derive(Clone, Copy, Debug, PartialEq)]
struct NodeDecl {
    image_index: usize,
    x: f64,
    y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EdgeDecl {
    from: usize,
    to: usize,
    weight: Option<f64>,
}

fn is_node_line(line: &str) -> bool {
    line.contains("image") && (line.contains("label=") || line.contains("width="))
}

fn is_edge_line(line: &str) -> bool {
    line.contains("--")
}

/// Slice between two byte offsets, `None` when reversed or off a char boundary.
fn between(line: &str, start: usize, end: usize) -> Option<&str> {
    if start > end {
        return None;
    }
    line.get(start..end)
}

/// Reads a decimal in the graph writer's spelling. A single `f`/`d` type
/// suffix is allowed; special values must be written `NaN` or `Infinity`.
fn parse_decimal<T: FromStr>(raw: &str) -> Option<T> {
    let text = raw.trim();
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if matches!(unsigned, "NaN" | "Infinity") {
        return text.parse().ok();
    }

    let text = text.strip_suffix(['f', 'F', 'd', 'D']).unwrap_or(text);
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    let numeric = !digits.is_empty()
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !numeric {
        return None;
    }
    text.parse().ok()
}

/// Positions are read as single precision and rounded half up into the
/// `i32` range: NaN lands on 0, infinities on the bounds.
fn parse_coordinate(raw: &str) -> Option<f64> {
    let value = parse_decimal::<f32>(raw)?;
    Some(f64::from((value + 0.5).floor() as i32))
}

fn parse_node_line(line: &str) -> Result<NodeDecl, String> {
    let pos_start = line
        .find(POS_MARKER)
        .map(|index| index + POS_MARKER.len())
        .ok_or("missing pos=\"X,Y\" attribute")?;
    let pos_len = line[pos_start..]
        .find('"')
        .ok_or("unterminated pos attribute")?;
    let pos = &line[pos_start..pos_start + pos_len];
    let (raw_x, raw_y) = pos
        .split_once(',')
        .ok_or_else(|| format!("position {pos:?} is not an X,Y pair"))?;
    let x = parse_coordinate(raw_x).ok_or_else(|| format!("invalid x coordinate {raw_x:?}"))?;
    let y = parse_coordinate(raw_y).ok_or_else(|| format!("invalid y coordinate {raw_y:?}"))?;

    // The index sits five bytes past the first 'i' (the "image" prefix) and
    // ends one byte before the opening bracket.
    let index_start = line.find('i').ok_or("missing image identifier")? + 5;
    let index_end = line
        .find('[')
        .and_then(|bracket| bracket.checked_sub(1))
        .ok_or("missing attribute list")?;
    let raw_index =
        between(line, index_start, index_end).ok_or("cannot locate image index")?;
    let image_index = raw_index
        .parse::<usize>()
        .map_err(|_| format!("invalid image index {raw_index:?}"))?;

    Ok(NodeDecl { image_index, x, y })
}

fn parse_edge_line(line: &str) -> Result<EdgeDecl, String> {
    let from_start = line.find("image").ok_or("missing first endpoint")? + "image".len();
    let from_end = line.find(EDGE_FROM_END).ok_or("missing ' --' separator")?;
    let raw_from = between(line, from_start, from_end).ok_or("cannot locate first endpoint")?;
    let from = raw_from
        .parse::<usize>()
        .map_err(|_| format!("invalid endpoint {raw_from:?}"))?;

    let to_start = line.find(EDGE_TO_START).ok_or("missing second endpoint")? + EDGE_TO_START.len();
    let to_end = line.find(EDGE_TO_END).ok_or("missing attribute list")?;
    let raw_to = between(line, to_start, to_end).ok_or("cannot locate second endpoint")?;
    let to = raw_to
        .parse::<usize>()
        .map_err(|_| format!("invalid endpoint {raw_to:?}"))?;

    let weight = line
        .find(WEIGHT_START)
        .zip(line.find(WEIGHT_END))
        .and_then(|(start, end)| between(line, start + WEIGHT_START.len(), end))
        .and_then(parse_decimal::<f64>);

    Ok(EdgeDecl { from, to, weight })
}

/// `photo.pgm` and `photo.jpg` both display as `photo.jpg`.
fn display_name(list_entry: &str) -> Option<String> {
    let stem_end = if list_entry.contains(".pgm") {
        list_entry.rfind(".pgm")
    } else {
        list_entry.rfind(".jpg")
    }?;
    Some(format!("{}.jpg", &list_entry[..stem_end]))
}

/// Builds a graph from the image list and the graph text in a single pass.
pub fn parse_graph(image_names: &[String], text: &str) -> Result<Graph, ParseError> {
    let mut graph = Graph::default();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;

        if is_node_line(line) {
            let decl = parse_node_line(line).map_err(|reason| ParseError::MalformedNode {
                line: line_number,
                reason,
            })?;
            let entry = image_names.get(decl.image_index).ok_or_else(|| {
                ParseError::MalformedNode {
                    line: line_number,
                    reason: format!(
                        "image index {} is outside the list of {} names",
                        decl.image_index,
                        image_names.len()
                    ),
                }
            })?;
            let name = display_name(entry).ok_or_else(|| ParseError::MalformedNode {
                line: line_number,
                reason: format!("list entry {entry:?} is neither .pgm nor .jpg"),
            })?;
            graph.push_node(decl.image_index, name, decl.x, decl.y);
        }

        if is_edge_line(line) {
            let decl = parse_edge_line(line).map_err(|reason| ParseError::MalformedEdge {
                line: line_number,
                reason,
            })?;
            let weight = decl.weight.unwrap_or_else(|| {
                debug!(line = line_number, "edge weight missing or invalid, using 0.0");
                0.0
            });
            graph.push_edge(line_number, decl.from, decl.to, weight)?;
        }
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "parsed graph"
    );
    let orphans = graph.orphan_report();
    for id in &orphans.isolated {
        warn!("node {id} has no neighbors");
    }
    for (a, b) in &orphans.pairs {
        warn!("nodes {a} and {b} have only each other as neighbors");
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_node_line_detection() {
        assert!(is_node_line(r#"image3 [label="", pos="1,2"];"#));
        assert!(is_node_line(r#"image3 [pos="1,2", width="0.5"];"#));
        assert!(!is_node_line(r#"image3 [pos="1,2"];"#));
        assert!(!is_node_line(r#"node [label="x"];"#));
        assert!(is_edge_line("image0 -- image1 [weight=\"1\", pos=\"0,0\"];"));
        assert!(!is_edge_line("graph G {"));
    }

    #[test]
    fn test_parse_node_line_rounds_position() {
        let decl = parse_node_line(r#"image12 [label="", pos="10.4,-3.5", width="0.1"];"#).unwrap();
        assert_eq!(
            decl,
            NodeDecl {
                image_index: 12,
                x: 10.0,
                y: -3.0,
            }
        );

        let decl = parse_node_line(r#"  image7 [pos="2.5,99.6", width="0.1"];"#).unwrap();
        assert_eq!((decl.image_index, decl.x, decl.y), (7, 3.0, 100.0));
    }

    #[test]
    fn test_parse_node_line_rejects_bad_tokens() {
        assert!(parse_node_line(r#"image1 [label="", width="1"];"#).is_err());
        assert!(parse_node_line(r#"image1 [label="", pos="1;2"];"#).is_err());
        assert!(parse_node_line(r#"image1 [label="", pos="x,2"];"#).is_err());
        assert!(parse_node_line(r#"imageX [label="", pos="1,2"];"#).is_err());
    }

    #[test]
    fn test_coordinate_special_values() {
        let decl = parse_node_line(r#"image0 [label="", pos="NaN,-NaN"];"#).unwrap();
        assert_eq!((decl.x, decl.y), (0.0, 0.0));

        let decl = parse_node_line(r#"image0 [label="", pos="Infinity,-Infinity"];"#).unwrap();
        assert_eq!(decl.x, f64::from(i32::MAX));
        assert_eq!(decl.y, f64::from(i32::MIN));

        let decl = parse_node_line(r#"image0 [label="", pos="1e12,2.5f"];"#).unwrap();
        assert_eq!((decl.x, decl.y), (f64::from(i32::MAX), 3.0));

        for pos in ["inf,0", "0,nan", "infinity,0", "0,INF", "Infinityf,0"] {
            let line = format!(r#"image0 [label="", pos="{pos}"];"#);
            assert!(parse_node_line(&line).is_err(), "{pos} should be rejected");
        }
    }

    #[test]
    fn test_weight_accepts_type_suffix() {
        let weight = |raw: &str| {
            let line = format!(r#"image0 -- image1 [weight="{raw}", pos="0,0"];"#);
            parse_edge_line(&line).unwrap().weight
        };
        assert_eq!(weight("1.5f"), Some(1.5));
        assert_eq!(weight("2d"), Some(2.0));
        assert_eq!(weight(" 3.25D "), Some(3.25));
        assert_eq!(weight("1.5ff"), None);
        assert_eq!(weight("inf"), None);
        assert_eq!(weight("Infinity"), Some(f64::INFINITY));
    }

    #[test]
    fn test_line_matching_both_rules_is_read_as_both() {
        // The node is declared, then the same line fails as an edge.
        let node_with_dashes = "image0 [label=\"x -- y\", pos=\"1,2\"];\n";
        let error = parse_graph(&names(&["a.jpg"]), node_with_dashes).unwrap_err();
        assert!(matches!(error, ParseError::MalformedEdge { line: 1, .. }));

        // The node rule runs first and rejects the edge-shaped line.
        let edge_with_label = "image0 [label=\"\", pos=\"0,0\"];\n\
            image1 [label=\"\", pos=\"1,0\"];\n\
            image0 -- image1 [label=\"\", weight=\"2\", pos=\"0,0\"];\n";
        let error = parse_graph(&names(&["a.jpg", "b.jpg"]), edge_with_label).unwrap_err();
        assert!(matches!(error, ParseError::MalformedNode { line: 3, .. }));
    }

    #[test]
    fn test_parse_edge_line() {
        let decl =
            parse_edge_line(r#"image0 -- image12 [weight="5.25", pos="0,0 10,0"];"#).unwrap();
        assert_eq!(
            decl,
            EdgeDecl {
                from: 0,
                to: 12,
                weight: Some(5.25),
            }
        );
    }

    #[test]
    fn test_parse_edge_line_tolerates_bad_weight() {
        let missing = parse_edge_line(r#"image0 -- image1 [pos="0,0 10,0"];"#).unwrap();
        assert_eq!(missing.weight, None);
        let garbage =
            parse_edge_line(r#"image0 -- image1 [weight="heavy", pos="0,0 10,0"];"#).unwrap();
        assert_eq!(garbage.weight, None);
        assert!(parse_edge_line(r#"image0 -- imageZ [weight="1", pos="0,0"];"#).is_err());
        assert!(parse_edge_line("image0 -- image1").is_err());
    }

    #[test]
    fn test_display_name_normalizes_extension() {
        assert_eq!(display_name("cat.pgm").as_deref(), Some("cat.jpg"));
        assert_eq!(display_name("dir/cat.jpg").as_deref(), Some("dir/cat.jpg"));
        assert_eq!(display_name("a.pgm.bak").as_deref(), Some("a.jpg"));
        assert_eq!(display_name("cat.png"), None);
    }

    #[test]
    fn test_two_node_example_is_fully_orphaned() {
        let text = "graph G {\n\
            image0 [label=\"\", pos=\"0,0\", width=\"0.1\"];\n\
            image1 [label=\"\", pos=\"10,0\", width=\"0.1\"];\n\
            image0 -- image1 [weight=\"5.0\", pos=\"0,0 10,0\"];\n\
            }\n";
        let graph = parse_graph(&names(&["a.jpg", "b.jpg"]), text).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.nodes()[0].neighbors, vec![1]);
        assert_eq!(graph.nodes()[1].neighbors, vec![0]);
        assert_eq!(graph.weight_range(), Some((5.0, 5.0)));
        assert!(graph.is_orphaned(0));
        assert!(graph.is_orphaned(1));
        assert_eq!(graph.visible_nodes().count(), 0);
        assert_eq!(graph.nodes()[1].display_name, "b.jpg");
    }

    #[test]
    fn test_node_ids_follow_declaration_order() {
        let text = "image2 [label=\"\", pos=\"5,5\"];\n\
            image0 [label=\"\", pos=\"1,1\"];\n\
            image1 [label=\"\", pos=\"3,3\"];\n\
            image2 -- image0 [weight=\"1\", pos=\"\"];\n\
            image2 -- image1 [weight=\"2\", pos=\"\"];\n\
            image2 -- image1 [weight=\"3\", pos=\"\"];\n";
        let graph = parse_graph(&names(&["z.pgm", "y.pgm", "x.pgm"]), text).unwrap();

        assert_eq!(graph.nodes()[0].image_index, 2);
        assert_eq!(graph.nodes()[1].image_index, 0);
        assert_eq!(graph.node(0).map(|node| node.display_name.as_str()), Some("x.jpg"));
        // Duplicate edges are kept.
        assert_eq!(graph.nodes()[0].neighbors, vec![1, 2, 2]);
        assert_eq!(graph.nodes()[2].weights, vec![2.0, 3.0]);
        assert_eq!(graph.edge_count(), 3);
        let total: usize = graph.nodes().iter().map(|node| node.degree()).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn test_malformed_weight_defaults_to_zero() {
        let text = "image0 [label=\"\", pos=\"0,0\"];\n\
            image1 [label=\"\", pos=\"1,0\"];\n\
            image0 -- image1 [weight=\"n/a\", pos=\"0,0\"];\n";
        let graph = parse_graph(&names(&["a.jpg", "b.jpg"]), text).unwrap();
        assert_eq!(graph.nodes()[0].weights, vec![0.0]);
        assert_eq!(graph.weight_range(), Some((0.0, 0.0)));
    }

    #[test]
    fn test_unknown_endpoint_aborts() {
        let text = "image0 [label=\"\", pos=\"0,0\"];\n\
            image0 -- image4 [weight=\"1\", pos=\"0,0\"];\n";
        let error = parse_graph(&names(&["a.jpg"]), text).unwrap_err();
        assert!(matches!(
            error,
            ParseError::UnknownNode {
                line: 2,
                image_index: 4
            }
        ));
    }

    #[test]
    fn test_malformed_lines_abort_with_line_number() {
        let bad_node = "image0 [label=\"\", pos=\"oops\"];\n";
        let error = parse_graph(&names(&["a.jpg"]), bad_node).unwrap_err();
        assert!(matches!(error, ParseError::MalformedNode { line: 1, .. }));

        let out_of_list = "\nimage3 [label=\"\", pos=\"0,0\"];\n";
        let error = parse_graph(&names(&["a.jpg"]), out_of_list).unwrap_err();
        assert!(matches!(error, ParseError::MalformedNode { line: 2, .. }));

        let bad_edge = "image0 [label=\"\", pos=\"0,0\"];\nimage0 -- [weight=\"1\"];\n";
        let error = parse_graph(&names(&["a.jpg"]), bad_edge).unwrap_err();
        assert!(matches!(error, ParseError::MalformedEdge { line: 2, .. }));
    }

    #[test]
    fn test_empty_text_gives_empty_graph() {
        let graph = parse_graph(&names(&["a.jpg"]), "graph G {\n}\n").unwrap();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.extent_bounds(), None);
        assert_eq!(graph.weight_range(), None);
    }
}
