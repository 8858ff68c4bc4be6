// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Destination matching from yes/no answers.
//!
//! Every country is stored as a chain `answer_1 -> ... -> answer_k -> country`.
//! Countries sharing the same answers hang off the same final answer node, so
//! following a full answer path and collecting the children there yields every
//! matching country.

use serde::{Deserialize, Serialize};

pub const TRAVEL_QUESTIONS: [&str; 4] = [
    "Do you prefer a vacation in a climate that is primarily warm and sunny, rather than cold?",
    "Would you like to be near beaches, lakes, rivers?",
    "Are you looking for destinations where you can engage in outdoor activities, such as hiking, skiing, or wildlife watching?",
    "Do you prefer a destination that offers a vibrant nightlife?",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Answer(bool),
    Label(String),
}

impl Choice {
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Choice::Label(label) => Some(label),
            Choice::Answer(_) => None,
        }
    }
}

impl From<bool> for Choice {
    fn from(answer: bool) -> Self {
        Choice::Answer(answer)
    }
}

impl From<&str> for Choice {
    fn from(label: &str) -> Self {
        Choice::Label(label.to_string())
    }
}

impl From<String> for Choice {
    fn from(label: String) -> Self {
        Choice::Label(label)
    }
}

/// One row of the country trait table: a country and its yes/no traits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitRecord {
    pub label: String,
    pub answers: Vec<bool>,
}

#[derive(Debug, Clone)]
struct Node {
    value: Option<Choice>,
    children: Vec<usize>,
}

const ROOT: usize = 0;

/// Prefix tree over answer sequences, stored as an arena of nodes.
/// Node 0 is the root and never holds a value.
#[derive(Debug, Clone)]
pub struct PreferenceTree {
    nodes: Vec<Node>,
}

impl Default for PreferenceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                value: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = TraitRecord>,
    {
        let mut tree = Self::new();
        for record in records {
            let mut items: Vec<Choice> = record.answers.into_iter().map(Choice::from).collect();
            items.push(Choice::Label(record.label));
            tree.insert_sequence(items);
        }
        tree
    }

    /// True only before the first insertion.
    pub fn is_empty(&self) -> bool {
        let root = &self.nodes[ROOT];
        root.value.is_none() && root.children.is_empty()
    }

    /// Number of nodes holding a value.
    pub fn size(&self) -> usize {
        self.nodes.iter().filter(|n| n.value.is_some()).count()
    }

    pub fn contains(&self, value: &Choice) -> bool {
        self.nodes.iter().any(|n| n.value.as_ref() == Some(value))
    }

    /// Inserts `items` as a chain, each item a child of the previous one.
    /// Walks down existing children while they match, then appends the
    /// unmatched suffix as a fresh chain.
    pub fn insert_sequence<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = Choice>,
    {
        let mut current = ROOT;
        let mut items = items.into_iter().peekable();

        while let Some(item) = items.peek() {
            match self.find_child(current, item) {
                Some(child) => {
                    current = child;
                    items.next();
                }
                None => break,
            }
        }

        for item in items {
            let index = self.nodes.len();
            self.nodes.push(Node {
                value: Some(item),
                children: Vec::new(),
            });
            self.nodes[current].children.push(index);
            current = index;
        }
    }

    /// Follows `path` one answer per level and returns the values of the
    /// children where the path ends. A path with no matching branch, or an
    /// empty tree, yields nothing.
    pub fn traverse(&self, path: &[bool]) -> Vec<Choice> {
        if self.is_empty() {
            return Vec::new();
        }

        let mut current = ROOT;
        for &answer in path {
            match self.find_child(current, &Choice::Answer(answer)) {
                Some(child) => current = child,
                None => return Vec::new(),
            }
        }

        self.nodes[current]
            .children
            .iter()
            .filter_map(|&i| self.nodes[i].value.clone())
            .collect()
    }

    /// Country labels reachable by following the full answer path.
    pub fn matches(&self, path: &[bool]) -> Vec<String> {
        self.traverse(path)
            .into_iter()
            .filter_map(|choice| match choice {
                Choice::Label(label) => Some(label),
                Choice::Answer(_) => None,
            })
            .collect()
    }

    fn find_child(&self, parent: usize, value: &Choice) -> Option<usize> {
        self.nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&i| self.nodes[i].value.as_ref() == Some(value))
    }
}
