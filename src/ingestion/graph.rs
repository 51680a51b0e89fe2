//! Course graph serialization into natural-language facts
//!
//! Each graph record becomes exactly one retrievable sentence: one per node,
//! one per edge, one for the whole topological order, one per shortest path.

use std::path::Path;

use crate::error::Result;
use crate::types::{CourseGraph, GraphFact, GraphMetadata};

/// Load a course graph from a JSON file
pub fn load_graph(path: &Path) -> Result<CourseGraph> {
    let raw = std::fs::read_to_string(path)?;
    let graph = serde_json::from_str(&raw)?;
    Ok(graph)
}

/// Serialize a course graph into one fact per source record
pub fn serialize_graph(graph: &CourseGraph) -> Vec<GraphFact> {
    let mut facts = Vec::new();

    for node in &graph.nodes {
        facts.push(GraphFact {
            text: format!("과목명: {}, 우선순위: {}", node.id, node.priority),
            metadata: GraphMetadata::Node {
                course: node.id.clone(),
                priority: node.priority,
            },
        });
    }

    for edge in &graph.edges {
        facts.push(GraphFact {
            text: format!(
                "'{}' 과목은 '{}' 과목의 선수과목입니다. 트랙: {}",
                edge.from, edge.to, edge.track
            ),
            metadata: GraphMetadata::Edge {
                track: edge.track.clone(),
                from: edge.from.clone(),
                to: edge.to.clone(),
            },
        });
    }

    facts.push(GraphFact {
        text: format!(
            "과목을 듣는 추천 순서: {}",
            graph.topological_order.join(" → ")
        ),
        metadata: GraphMetadata::TopologicalOrder,
    });

    for (key, path) in &graph.shortest_paths {
        facts.push(GraphFact {
            text: format!("{} 최단경로: {}", key, path.join(" → ")),
            metadata: GraphMetadata::ShortestPath {
                from_to: key.clone(),
            },
        });
    }

    facts
}
