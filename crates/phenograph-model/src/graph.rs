//! Statement graphs: nodes keyed by id plus a structurally deduplicated set
//! of statements.
//!
//! A graph is produced once per translation call and handed to a downstream
//! loader. Serialization follows the loader's record shape:
//!
//! ```text
//! { "nodes":      [{ "id", "label"?, "metatype": "CLASS"|"INSTANCE", "source_id"? }],
//!   "statements": [{ "kind": "link",    "subject", "relation", "object", "sublinks"?, "intersection"? },
//!                  { "kind": "literal", "subject", "relation", "value" },
//!                  { "kind": "alias",   "subject", "alias", "scope" }] }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// Nodes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Metatype {
    Class,
    Instance,
}

/// A graph vertex. Identity is the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub metatype: Metatype,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

impl Node {
    pub fn class(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            metatype: Metatype::Class,
            source_id: None,
        }
    }

    pub fn instance(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            metatype: Metatype::Instance,
            source_id: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_source(mut self, source_id: Option<String>) -> Self {
        self.source_id = source_id;
        self
    }
}

// ============================================================================
// Statements
// ============================================================================

/// A qualifier attached to a link (e.g. who posited an annotation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubLink {
    pub relation: String,
    pub target: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkStatement {
    pub subject: String,
    pub relation: String,
    pub object: String,
    /// Kept sorted and deduplicated so equal links compare equal.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    sublinks: Vec<SubLink>,
    /// Genus/differentia link of a compositional description.
    #[serde(default, skip_serializing_if = "is_false")]
    pub intersection: bool,
}

impl LinkStatement {
    pub fn new(
        subject: impl Into<String>,
        relation: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            relation: relation.into(),
            object: object.into(),
            sublinks: Vec::new(),
            intersection: false,
        }
    }

    pub fn intersection(
        subject: impl Into<String>,
        relation: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            intersection: true,
            ..Self::new(subject, relation, object)
        }
    }

    pub fn with_sublink(mut self, relation: impl Into<String>, target: impl Into<String>) -> Self {
        let sublink = SubLink {
            relation: relation.into(),
            target: target.into(),
        };
        if let Err(pos) = self.sublinks.binary_search(&sublink) {
            self.sublinks.insert(pos, sublink);
        }
        self
    }

    pub fn sublinks(&self) -> &[SubLink] {
        &self.sublinks
    }

    pub fn sublink_target(&self, relation: &str) -> Option<&str> {
        self.sublinks
            .iter()
            .find(|s| s.relation == relation)
            .map(|s| s.target.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LiteralStatement {
    pub subject: String,
    pub relation: String,
    pub value: String,
}

impl LiteralStatement {
    pub fn new(
        subject: impl Into<String>,
        relation: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            relation: relation.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AliasScope {
    Exact,
    Narrow,
    Broad,
    Related,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeAlias {
    pub subject: String,
    pub alias: String,
    pub scope: AliasScope,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Statement {
    Link(LinkStatement),
    Literal(LiteralStatement),
    Alias(NodeAlias),
}

impl Statement {
    pub fn subject(&self) -> &str {
        match self {
            Statement::Link(link) => &link.subject,
            Statement::Literal(literal) => &literal.subject,
            Statement::Alias(alias) => &alias.subject,
        }
    }

    pub fn as_link(&self) -> Option<&LinkStatement> {
        match self {
            Statement::Link(link) => Some(link),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&LiteralStatement> {
        match self {
            Statement::Literal(literal) => Some(literal),
            _ => None,
        }
    }
}

impl From<LinkStatement> for Statement {
    fn from(value: LinkStatement) -> Self {
        Statement::Link(value)
    }
}

impl From<LiteralStatement> for Statement {
    fn from(value: LiteralStatement) -> Self {
        Statement::Literal(value)
    }
}

impl From<NodeAlias> for Statement {
    fn from(value: NodeAlias) -> Self {
        Statement::Alias(value)
    }
}

// ============================================================================
// Graph
// ============================================================================

/// Serialized form of a [`StatementGraph`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphRecords {
    pub nodes: Vec<Node>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GraphRecords", into = "GraphRecords")]
pub struct StatementGraph {
    nodes: BTreeMap<String, Node>,
    statements: BTreeSet<Statement>,
}

impl StatementGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Nodes ====================

    /// Add a node. An existing node with the same id is kept; only its
    /// missing label/source id are filled in.
    pub fn add_node(&mut self, node: Node) {
        match self.nodes.get_mut(&node.id) {
            Some(existing) => {
                if existing.label.is_none() {
                    existing.label = node.label;
                }
                if existing.source_id.is_none() {
                    existing.source_id = node.source_id;
                }
            }
            None => {
                self.nodes.insert(node.id.clone(), node);
            }
        }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> BTreeSet<&str> {
        self.nodes.keys().map(String::as_str).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ==================== Statements ====================

    /// Add a statement; returns `false` when a structurally equal statement
    /// was already present.
    pub fn add_statement(&mut self, statement: impl Into<Statement>) -> bool {
        let mut statement = statement.into();
        if let Statement::Link(link) = &mut statement {
            // Deserialized links may carry unsorted sublinks.
            link.sublinks.sort();
            link.sublinks.dedup();
        }
        self.statements.insert(statement)
    }

    pub fn add_link(
        &mut self,
        subject: impl Into<String>,
        relation: impl Into<String>,
        object: impl Into<String>,
    ) -> bool {
        self.add_statement(LinkStatement::new(subject, relation, object))
    }

    pub fn add_literal(
        &mut self,
        subject: impl Into<String>,
        relation: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        self.add_statement(LiteralStatement::new(subject, relation, value))
    }

    pub fn add_alias(
        &mut self,
        subject: impl Into<String>,
        alias: impl Into<String>,
        scope: AliasScope,
    ) -> bool {
        self.add_statement(NodeAlias {
            subject: subject.into(),
            alias: alias.into(),
            scope,
        })
    }

    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }

    pub fn contains_statement(&self, statement: &Statement) -> bool {
        self.statements.contains(statement)
    }

    pub fn links(&self) -> impl Iterator<Item = &LinkStatement> {
        self.statements.iter().filter_map(Statement::as_link)
    }

    pub fn literals(&self) -> impl Iterator<Item = &LiteralStatement> {
        self.statements.iter().filter_map(Statement::as_literal)
    }

    pub fn aliases(&self) -> impl Iterator<Item = &NodeAlias> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Alias(alias) => Some(alias),
            _ => None,
        })
    }

    /// Links with the given relation, in deterministic order.
    pub fn links_with_relation<'a>(
        &'a self,
        relation: &'a str,
    ) -> impl Iterator<Item = &'a LinkStatement> + 'a {
        self.links().filter(move |l| l.relation == relation)
    }

    /// Objects of `subject --relation--> ?`.
    pub fn objects<'a>(&'a self, subject: &'a str, relation: &'a str) -> Vec<&'a str> {
        self.links()
            .filter(|l| l.subject == subject && l.relation == relation)
            .map(|l| l.object.as_str())
            .collect()
    }

    /// Literal values of `subject --relation--> "?"`.
    pub fn literal_values<'a>(&'a self, subject: &'a str, relation: &'a str) -> Vec<&'a str> {
        self.literals()
            .filter(|l| l.subject == subject && l.relation == relation)
            .map(|l| l.value.as_str())
            .collect()
    }

    // ==================== Whole-graph operations ====================

    /// Union `other` into this graph.
    pub fn merge(&mut self, other: StatementGraph) {
        for node in other.nodes.into_values() {
            self.add_node(node);
        }
        self.statements.extend(other.statements);
    }

    /// Ids referenced by statements (subjects, objects, sublink targets) that
    /// are not materialized as nodes. In a well-formed graph these are all
    /// external ontology ids.
    pub fn dangling_references(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        let mut check = |id: &str| {
            if !self.nodes.contains_key(id) {
                out.insert(id.to_string());
            }
        };
        for statement in &self.statements {
            check(statement.subject());
            if let Statement::Link(link) = statement {
                check(&link.object);
                for sublink in &link.sublinks {
                    check(&sublink.target);
                }
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.statements.is_empty()
    }
}

impl From<GraphRecords> for StatementGraph {
    fn from(records: GraphRecords) -> Self {
        let mut graph = StatementGraph::new();
        for node in records.nodes {
            graph.add_node(node);
        }
        for statement in records.statements {
            graph.add_statement(statement);
        }
        graph
    }
}

impl From<StatementGraph> for GraphRecords {
    fn from(graph: StatementGraph) -> Self {
        Self {
            nodes: graph.nodes.into_values().collect(),
            statements: graph.statements.into_iter().collect(),
        }
    }
}
