use serde::Serialize;
use tracing::warn;

use super::UndirectedGraph;
use crate::storage::table::SlotTable;
use crate::types::{NodeId, Result, SlotGraphError};

const MAX_FINDINGS: usize = 32;

/// Indicates the severity level of an audit finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSeverity {
    /// Allowed but notable, such as parallel edges.
    Warning,
    /// Broken invariant; the graph is inconsistent.
    Error,
}

/// A single issue discovered by [`UndirectedGraph::audit`].
#[derive(Clone, Debug, Serialize)]
pub struct AuditFinding {
    /// The severity level of this finding.
    pub severity: AuditSeverity,
    /// Human-readable description of the issue.
    pub message: String,
}

impl AuditFinding {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: AuditSeverity::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: AuditSeverity::Warning,
            message: message.into(),
        }
    }
}

/// Statistics collected while auditing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AuditCounts {
    /// Nodes present in the node table.
    pub nodes: u64,
    /// Edge count maintained by the graph.
    pub edges_recorded: u64,
    /// Sum of all node degrees.
    pub adjacency_entries: u64,
    /// Adjacency entries pointing back at their own node.
    pub self_loops: u64,
    /// Edge count implied by the adjacency lists, `(entries + loops) / 2`.
    pub edges_derived: u64,
}

/// Complete report of a structural audit.
#[derive(Clone, Debug, Serialize)]
pub struct AuditReport {
    /// True when no finding has [`AuditSeverity::Error`].
    pub success: bool,
    /// Issues discovered, capped at 32 entries.
    pub findings: Vec<AuditFinding>,
    /// Statistics about the structures examined.
    pub counts: AuditCounts,
}

impl AuditReport {
    /// First error-level finding, if any.
    pub fn first_error(&self) -> Option<&AuditFinding> {
        self.findings
            .iter()
            .find(|finding| finding.severity == AuditSeverity::Error)
    }
}

impl UndirectedGraph {
    /// Checks the structural invariants of the graph.
    ///
    /// - every node is stored under its own id;
    /// - every neighbor id names an existing node;
    /// - for `u != v`, `v` appears in `u`'s list exactly as often as `u`
    ///   appears in `v`'s list;
    /// - the degree sum equals `2 * edges - self_loops`.
    pub fn audit(&self) -> AuditReport {
        let mut findings = Findings::default();
        let mut counts = AuditCounts {
            nodes: self.nodes.len() as u64,
            edges_recorded: self.edges,
            ..AuditCounts::default()
        };
        // (low, high) -> (entries seen from low, entries seen from high)
        let mut pairs: SlotTable<(NodeId, NodeId), (u64, u64)> = SlotTable::new();

        for (&key, node) in self.nodes.iter() {
            if key != node.id() {
                findings.push(AuditFinding::error(format!(
                    "node {} stored under key {key}",
                    node.id()
                )));
            }
            counts.adjacency_entries += node.deg() as u64;
            for &nbr in node.neighbors() {
                if nbr == key {
                    counts.self_loops += 1;
                    continue;
                }
                if !self.nodes.contains_key(&nbr) {
                    findings.push(AuditFinding::error(format!(
                        "node {key} references missing neighbor {nbr}"
                    )));
                    continue;
                }
                let pair = (key.min(nbr), key.max(nbr));
                let (mut from_low, mut from_high) = pairs.get(&pair).copied().unwrap_or((0, 0));
                if key < nbr {
                    from_low += 1;
                } else {
                    from_high += 1;
                }
                if let Err(err) = pairs.insert(pair, (from_low, from_high)) {
                    findings.push(AuditFinding::error(err.to_string()));
                }
            }
        }

        for (&(low, high), &(from_low, from_high)) in pairs.iter() {
            if from_low != from_high {
                findings.push(AuditFinding::error(format!(
                    "asymmetric adjacency between {low} and {high} ({from_low} vs {from_high})"
                )));
            } else if from_low > 1 {
                findings.push(AuditFinding::warning(format!(
                    "{from_low} parallel edges between {low} and {high}"
                )));
            }
        }

        let doubled = counts.adjacency_entries + counts.self_loops;
        counts.edges_derived = doubled / 2;
        if doubled % 2 != 0 {
            findings.push(AuditFinding::error(format!(
                "odd adjacency total: {} entries with {} self loops",
                counts.adjacency_entries, counts.self_loops
            )));
        }
        if counts.edges_derived != counts.edges_recorded {
            findings.push(AuditFinding::error(format!(
                "edge count {} does not match adjacency ({} derived)",
                counts.edges_recorded, counts.edges_derived
            )));
        }

        let success = findings.errors == 0;
        if !success {
            warn!(errors = findings.errors, nodes = counts.nodes, "graph.audit.failed");
        }
        AuditReport {
            success,
            findings: findings.list,
            counts,
        }
    }

    /// Returns true when [`UndirectedGraph::audit`] finds no errors.
    pub fn is_ok(&self) -> bool {
        self.audit().success
    }

    /// Like [`UndirectedGraph::is_ok`], reporting the first error as
    /// [`SlotGraphError::StructuralCorruption`].
    pub fn check(&self) -> Result<()> {
        let report = self.audit();
        if report.success {
            return Ok(());
        }
        let message = match report.first_error() {
            Some(finding) => finding.message.clone(),
            None => "audit reported errors".to_string(),
        };
        Err(SlotGraphError::StructuralCorruption(message))
    }
}

/// Findings list capped at `MAX_FINDINGS`; errors are counted past the cap.
/// A full list gives up its oldest warning to make room for an error.
#[derive(Default)]
struct Findings {
    list: Vec<AuditFinding>,
    errors: u64,
}

impl Findings {
    fn push(&mut self, finding: AuditFinding) {
        let is_error = finding.severity == AuditSeverity::Error;
        if is_error {
            self.errors += 1;
        }
        if self.list.len() < MAX_FINDINGS {
            self.list.push(finding);
        } else if is_error {
            let oldest_warning = self
                .list
                .iter()
                .position(|f| f.severity == AuditSeverity::Warning);
            if let Some(pos) = oldest_warning {
                self.list.remove(pos);
                self.list.push(finding);
            }
        }
    }
}
