use super::geometry::Size;
use crate::error::{GenePoolError, Result};
use serde::{Deserialize, Serialize};

/// Undirected relation between two nodes, drawn as a straight line between
/// their centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
}

/// Node sizes and connections of a diagram to be laid out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutGraph {
    /// Node sizes including any padding around the drawn box
    nodes: Vec<Size>,
    connections: Vec<Connection>,
}

impl LayoutGraph {
    pub fn new(nodes: Vec<Size>, connections: Vec<Connection>) -> Result<Self> {
        let graph = Self { nodes, connections };
        graph.validate()?;
        Ok(graph)
    }

    pub fn add_node(&mut self, size: Size) -> usize {
        self.nodes.push(size);
        self.nodes.len() - 1
    }

    pub fn connect(&mut self, from: usize, to: usize) -> Result<()> {
        let connection = Connection { from, to };
        self.check_connection(&connection)?;
        self.connections.push(connection);
        Ok(())
    }

    pub fn nodes(&self) -> &[Size] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Average of node widths and heights, rounded down.
    pub fn avg_node_size(&self) -> i64 {
        if self.nodes.is_empty() {
            return 0;
        }
        let total: i64 = self.nodes.iter().map(|s| s.width + s.height).sum();
        total / (2 * self.nodes.len() as i64)
    }

    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(GenePoolError::Layout("Graph has no nodes".to_string()));
        }
        if let Some(size) = self.nodes.iter().find(|s| s.width < 0 || s.height < 0) {
            return Err(GenePoolError::Layout(format!("Negative node size {:?}", size)));
        }
        for connection in &self.connections {
            self.check_connection(connection)?;
        }
        Ok(())
    }

    fn check_connection(&self, connection: &Connection) -> Result<()> {
        let num_nodes = self.nodes.len();
        if connection.from >= num_nodes || connection.to >= num_nodes {
            return Err(GenePoolError::Layout(format!(
                "Connection {} -> {} refers to a missing node ({} nodes)",
                connection.from, connection.to, num_nodes
            )));
        }
        Ok(())
    }
}
