//! Course-dependency graph input format and serialized facts

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A course node with its recommended priority
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseNode {
    /// Course name
    pub id: String,
    /// Recommended ordering priority (lower is earlier)
    pub priority: i64,
}

/// A prerequisite edge between two courses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrereqEdge {
    /// Prerequisite course
    pub from: String,
    /// Dependent course
    pub to: String,
    /// Curriculum track the edge belongs to
    pub track: String,
}

/// The full graph description consumed by graph ingestion.
///
/// `shortest_paths` keys are pair keys like `"자료구조-운영체제"`; a
/// `BTreeMap` keeps fact order deterministic across runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseGraph {
    /// Courses with priorities
    pub nodes: Vec<CourseNode>,
    /// Prerequisite relations
    pub edges: Vec<PrereqEdge>,
    /// Recommended course order
    pub topological_order: Vec<String>,
    /// Pair key -> ordered path of course names
    pub shortest_paths: BTreeMap<String, Vec<String>>,
}

/// Metadata tagging the record kind a fact was derived from.
///
/// The tag and field names match the metadata stored by earlier ingestion
/// runs, so facts remain filterable by record type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GraphMetadata {
    /// Derived from a course node
    Node { course: String, priority: i64 },
    /// Derived from a prerequisite edge
    Edge {
        track: String,
        from: String,
        to: String,
    },
    /// Derived from the full topological order
    TopologicalOrder,
    /// Derived from one shortest-path entry
    ShortestPath { from_to: String },
}

/// One natural-language fact derived from a graph record
#[derive(Debug, Clone, PartialEq)]
pub struct GraphFact {
    /// The sentence stored as a retrievable document
    pub text: String,
    /// Record-type metadata
    pub metadata: GraphMetadata,
}
