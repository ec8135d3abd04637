//! Query Evaluation
//!
//! Applies a compiled step program to the document arena. Each step maps
//! the current context set through its axis and node test, filters
//! through the predicates, deduplicates, and keeps the result in
//! document order.

use std::collections::{HashMap, HashSet};

use super::parser::{Axis, NodeTest, Predicate, Step};
use super::CompiledQuery;
use crate::dom::{Document, NodeId, DOCUMENT_NODE};

/// Evaluate a compiled query from the document node, returning matching
/// node ids in document order
pub fn evaluate(doc: &Document, query: &CompiledQuery) -> Vec<NodeId> {
    // Ids are assigned in insertion order, so a mutated tree needs an
    // explicit document-order key for sorting
    let order = doc.document_order();

    let mut context: Vec<NodeId> = vec![DOCUMENT_NODE];
    for step in &query.steps {
        context = apply_step(doc, &context, step, &order);
        if context.is_empty() {
            break;
        }
    }
    context
}

/// Apply one location step to a context set
fn apply_step(
    doc: &Document,
    context: &[NodeId],
    step: &Step,
    order: &HashMap<NodeId, usize>,
) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for &ctx in context {
        let candidates: Vec<NodeId> = match step.axis {
            Axis::Child => doc
                .child_ids(ctx)
                .filter(|&id| matches_node_test(doc, id, &step.node_test))
                .collect(),
            Axis::Descendant => doc
                .descendant_ids(ctx)
                .filter(|&id| matches_node_test(doc, id, &step.node_test))
                .collect(),
        };
        for id in apply_predicates(doc, candidates, &step.predicates) {
            if seen.insert(id) {
                result.push(id);
            }
        }
    }

    // Overlapping descendant sets can interleave between context nodes
    result.sort_unstable_by_key(|id| order.get(id).copied().unwrap_or(usize::MAX));
    result
}

/// Check whether a node satisfies a step's node test
fn matches_node_test(doc: &Document, id: NodeId, test: &NodeTest) -> bool {
    let node = doc.node(id);
    if !node.is_element() {
        return false;
    }
    match test {
        NodeTest::Any => true,
        NodeTest::Name(name) => node.name == *name,
    }
}

/// Filter a step's matches under one context node through its predicates
///
/// Positions are re-evaluated against each intermediate result, so
/// `[@a][2]` selects the second node that has the attribute.
fn apply_predicates(
    doc: &Document,
    candidates: Vec<NodeId>,
    predicates: &[Predicate],
) -> Vec<NodeId> {
    let mut current = candidates;
    for predicate in predicates {
        let mut position = 0;
        current.retain(|&id| {
            position += 1;
            holds(doc, id, position, predicate)
        });
    }
    current
}

/// Check one predicate against one node at a 1-based position
fn holds(doc: &Document, id: NodeId, position: usize, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::HasAttribute(name) => {
            doc.node(id).attributes.iter().any(|attr| attr.name == *name)
        }
        Predicate::AttributeEquals(name, value) => doc
            .node(id)
            .attributes
            .iter()
            .any(|attr| attr.name == *name && attr.value == *value),
        Predicate::Position(wanted) => position == *wanted,
    }
}
