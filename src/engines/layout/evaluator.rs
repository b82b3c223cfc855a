use super::geometry::{Point, Rect, Segment, Size};
use super::graph::LayoutGraph;
use crate::engines::evaluation::QualityEvaluator;
use crate::engines::generation::Gene;
use crate::error::Result;
use crate::types::Quality;

/// Fields per node in a layout gene: x then y.
pub const FIELDS_PER_NODE: usize = 2;

// Share of the quality range given to each term. The sum stays below
// `Quality::MAX` for any graph size.
const NODE_BUDGET: u64 = 50_000;
const LINE_BUDGET: u64 = 13_000;
const SIZE_BUDGET: u64 = 2_000;
const MAX_SIZE_SCORE: i64 = 10;

/// `part / total` of `budget`, with an empty total counting as fully met.
fn scaled(part: u64, total: u64, budget: u64) -> u64 {
    if total == 0 {
        budget
    } else {
        part * budget / total
    }
}

/// Position of a node as encoded in a layout gene.
pub fn node_position(gene: &Gene<u16>, node: usize) -> Point {
    Point::new(
        gene.field(node * FIELDS_PER_NODE) as i64,
        gene.field(node * FIELDS_PER_NODE + 1) as i64,
    )
}

/// Scores layout genes: non-overlapping node pairs count most, then
/// connection lines that stay clear of node outlines, then compactness.
/// Each term is the satisfied fraction of its pairs scaled into a fixed
/// share of the quality range, so large graphs do not saturate the score.
pub struct LayoutEvaluator<'a> {
    graph: &'a LayoutGraph,
    diagram_size: Size,
}

impl<'a> LayoutEvaluator<'a> {
    pub fn new(graph: &'a LayoutGraph) -> Self {
        Self {
            graph,
            diagram_size: Size::default(),
        }
    }

    pub fn graph(&self) -> &LayoutGraph {
        self.graph
    }

    pub fn node_rect(&self, gene: &Gene<u16>, node: usize) -> Rect {
        Rect::new(node_position(gene, node), self.graph.nodes()[node])
    }

    /// Extent of the drawing from the origin to the furthest node edge.
    pub fn extent(&self, gene: &Gene<u16>) -> Size {
        let mut size = Size::default();
        for node in 0..self.graph.num_nodes() {
            let rect = self.node_rect(gene, node);
            size.width = size.width.max(rect.end_x());
            size.height = size.height.max(rect.end_y());
        }
        size
    }

    pub fn overlapping_node_pairs(&self, gene: &Gene<u16>) -> usize {
        let rects: Vec<Rect> = (0..self.graph.num_nodes())
            .map(|node| self.node_rect(gene, node))
            .collect();
        let mut count = 0;
        for (i, first) in rects.iter().enumerate() {
            count += rects[i + 1..].iter().filter(|second| first.overlaps(second)).count();
        }
        count
    }

    /// Number of (connection, node) pairs where the connection line crosses
    /// the node outline. A line always touches its own two end nodes.
    pub fn line_node_crossings(&self, gene: &Gene<u16>) -> usize {
        let rects: Vec<Rect> = (0..self.graph.num_nodes())
            .map(|node| self.node_rect(gene, node))
            .collect();
        self.graph
            .connections()
            .iter()
            .map(|connection| {
                let line = Segment::new(rects[connection.from].center(), rects[connection.to].center());
                rects.iter().filter(|rect| rect.outline_crossed_by(&line)).count()
            })
            .sum()
    }

    fn size_score(&self, gene: &Gene<u16>) -> i64 {
        let size = self.extent(gene);
        let gene_total = size.width + size.height;
        if gene_total <= 0 {
            return 0;
        }
        let diagram_total = (self.diagram_size.width + self.diagram_size.height).max(gene_total);
        (MAX_SIZE_SCORE - MAX_SIZE_SCORE * gene_total / diagram_total).clamp(0, MAX_SIZE_SCORE)
    }
}

impl QualityEvaluator<u16> for LayoutEvaluator<'_> {
    fn prepare(&mut self, population: &[Gene<u16>]) -> Result<()> {
        let mut diagram_size = Size::default();
        for gene in population {
            let size = self.extent(gene);
            diagram_size.width = diagram_size.width.max(size.width);
            diagram_size.height = diagram_size.height.max(size.height);
        }
        self.diagram_size = diagram_size;
        Ok(())
    }

    fn score(&self, _gene_index: usize, gene: &Gene<u16>) -> Result<Quality> {
        let num_nodes = self.graph.num_nodes() as u64;
        let node_pairs = num_nodes * num_nodes.saturating_sub(1) / 2;
        let nodes_q = node_pairs - self.overlapping_node_pairs(gene) as u64;

        let line_pairs = self.graph.connections().len() as u64 * num_nodes;
        let line_q = line_pairs - self.line_node_crossings(gene) as u64;

        let size_q = self.size_score(gene) as u64;
        let quality = scaled(nodes_q, node_pairs, NODE_BUDGET)
            + scaled(line_q, line_pairs, LINE_BUDGET)
            + scaled(size_q, MAX_SIZE_SCORE as u64, SIZE_BUDGET);
        Ok(quality as Quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::layout::graph::Connection;

    fn graph() -> LayoutGraph {
        LayoutGraph::new(
            vec![Size::new(10, 10), Size::new(10, 10), Size::new(10, 10)],
            vec![Connection { from: 0, to: 1 }],
        )
        .unwrap()
    }

    #[test]
    fn test_spread_layout_beats_stacked_layout() {
        let graph = graph();
        let mut evaluator = LayoutEvaluator::new(&graph);

        let stacked = Gene::from_fields(vec![0u16, 0, 0, 0, 0, 0]);
        // node 2 sits between nodes 0 and 1 on the connection line
        let blocking = Gene::from_fields(vec![0u16, 0, 60, 0, 30, 0]);
        let clear = Gene::from_fields(vec![0u16, 0, 60, 0, 30, 40]);
        let population = vec![stacked.clone(), blocking.clone(), clear.clone()];
        evaluator.prepare(&population).unwrap();

        assert_eq!(evaluator.overlapping_node_pairs(&stacked), 3);
        assert_eq!(evaluator.overlapping_node_pairs(&clear), 0);
        assert_eq!(evaluator.line_node_crossings(&blocking), 3);
        assert_eq!(evaluator.line_node_crossings(&clear), 2);

        // stacked: no free pairs, 3/3 clear lines, size 9
        // blocking: 3/3 free pairs, no clear lines, size 4
        // clear: 3/3 free pairs, 1/3 clear lines, size 0
        let stacked_q = evaluator.score(0, &stacked).unwrap();
        let blocking_q = evaluator.score(1, &blocking).unwrap();
        let clear_q = evaluator.score(2, &clear).unwrap();
        assert_eq!(stacked_q, 13_000 + 1_800);
        assert_eq!(blocking_q, 50_000 + 800);
        assert_eq!(clear_q, 50_000 + 4_333);
        assert!(clear_q > blocking_q);
        assert!(blocking_q > stacked_q);
    }

    #[test]
    fn test_compact_layout_scores_size_bonus() {
        let graph = LayoutGraph::new(vec![Size::new(10, 10)], Vec::new()).unwrap();
        let mut evaluator = LayoutEvaluator::new(&graph);
        let near = Gene::from_fields(vec![0u16, 0]);
        let far = Gene::from_fields(vec![90u16, 90]);
        evaluator.prepare(&[near.clone(), far.clone()]).unwrap();

        // no pairs and no lines: both terms are fully met
        // near: 10 - 10 * 20 / 200 = 9, far: 10 - 10 * 200 / 200 = 0
        assert_eq!(evaluator.score(0, &near).unwrap(), 63_000 + 1_800);
        assert_eq!(evaluator.score(1, &far).unwrap(), 63_000);
    }

    #[test]
    fn test_full_marks_stay_below_quality_max() {
        assert!(NODE_BUDGET + LINE_BUDGET + SIZE_BUDGET <= Quality::MAX as u64);
        assert!(NODE_BUDGET > LINE_BUDGET && LINE_BUDGET > SIZE_BUDGET);
    }

    #[test]
    fn test_large_graph_scores_are_spread() {
        let nodes = vec![Size::new(40, 30); 101];
        let connections = (1..101).map(|i| Connection { from: i - 1, to: i }).collect();
        let graph = LayoutGraph::new(nodes, connections).unwrap();
        let mut evaluator = LayoutEvaluator::new(&graph);

        // every node on one spot versus nodes spread along a diagonal
        let stacked = Gene::from_fields(vec![0u16; 202]);
        let spread = Gene::from_fields((0..202u16).map(|i| (i / 2) * 50).collect());
        evaluator.prepare(&[stacked.clone(), spread.clone()]).unwrap();

        let stacked_q = evaluator.score(0, &stacked).unwrap();
        let spread_q = evaluator.score(1, &spread).unwrap();
        assert!(spread_q > stacked_q);
        assert!(spread_q < Quality::MAX);
    }

    #[test]
    fn test_node_position_decoding() {
        let gene = Gene::from_fields(vec![1u16, 2, 3, 4]);
        assert_eq!(node_position(&gene, 1), Point::new(3, 4));
    }
}
