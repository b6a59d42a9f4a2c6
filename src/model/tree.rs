//! The aggregation tree that budget rows are summed into.
//!
//! A `BudgetTree` has a fixed depth. Every path added to it names one key per level, and the
//! amount is summed into the leaf at the end of that path. Branches are only created along paths
//! that are actually added, so the serialized tree never contains empty mappings.

use super::amount::Amount;
use super::dataset::Dataset;
use crate::Result;
use anyhow::bail;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// A nested mapping from category keys to summed amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetTree {
    depth: usize,
    root: Branch,
}

impl BudgetTree {
    /// Create an empty tree whose paths are `depth` keys long.
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            root: Branch::default(),
        }
    }

    pub fn for_dataset(dataset: Dataset) -> Self {
        Self::new(dataset.key_columns().len())
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn root(&self) -> &Branch {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Walk `path`, creating branches that do not exist yet, and add `amount` to the leaf at the
    /// end of it.
    ///
    /// # Errors
    /// - The path length differs from the tree depth.
    /// - Summing into the leaf overflows.
    pub fn add<S>(&mut self, path: &[S], amount: Amount) -> Result<()>
    where
        S: AsRef<str>,
    {
        if path.len() != self.depth {
            bail!(
                "A path of {} keys cannot be added to a tree of depth {}",
                path.len(),
                self.depth
            );
        }
        let Some((leaf, parents)) = path.split_last() else {
            bail!("A tree of depth zero cannot hold any amounts");
        };
        let mut branch = &mut self.root;
        for key in parents {
            branch = branch.child_mut(key.as_ref())?;
        }
        branch.accumulate(leaf.as_ref(), amount)
    }

    /// Find the node at the end of `path`, which may be shorter than the tree depth.
    pub fn get<S>(&self, path: &[S]) -> Option<&Node>
    where
        S: AsRef<str>,
    {
        let (last, parents) = path.split_last()?;
        let mut branch = &self.root;
        for key in parents {
            match branch.get(key.as_ref())? {
                Node::Branch(b) => branch = b,
                Node::Leaf(_) => return None,
            }
        }
        branch.get(last.as_ref())
    }

    /// The summed amount at the end of a full-length `path`.
    pub fn leaf<S>(&self, path: &[S]) -> Option<Amount>
    where
        S: AsRef<str>,
    {
        match self.get(path)? {
            Node::Leaf(amount) => Some(*amount),
            Node::Branch(_) => None,
        }
    }

    /// The sum of every leaf, or `None` if it does not fit in an `Amount`.
    pub fn total(&self) -> Option<Amount> {
        self.root.total()
    }

    /// The number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }
}

impl Serialize for BudgetTree {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.root.serialize(serializer)
    }
}

/// Either a nested mapping or a summed amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Branch(Branch),
    Leaf(Amount),
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Branch(branch) => branch.serialize(serializer),
            Node::Leaf(amount) => amount.serialize(serializer),
        }
    }
}

/// One level of the tree. Entries keep the order in which their keys were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Branch {
    entries: Vec<(String, Node)>,
    index: HashMap<String, usize>,
}

impl Branch {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    fn child_mut(&mut self, key: &str) -> Result<&mut Branch> {
        let idx = self.entry_index(key, || Node::Branch(Branch::default()));
        match &mut self.entries[idx].1 {
            Node::Branch(branch) => Ok(branch),
            Node::Leaf(_) => bail!("The key '{key}' holds an amount, not a nested mapping"),
        }
    }

    fn accumulate(&mut self, key: &str, amount: Amount) -> Result<()> {
        let idx = self.entry_index(key, || Node::Leaf(Amount::ZERO));
        match &mut self.entries[idx].1 {
            Node::Leaf(existing) => match existing.checked_add(amount) {
                Some(sum) => {
                    *existing = sum;
                    Ok(())
                }
                None => bail!("The amount for '{key}' overflowed while adding {amount}"),
            },
            Node::Branch(_) => bail!("The key '{key}' holds a nested mapping, not an amount"),
        }
    }

    /// Get the position of `key`, inserting the node built by `create` if the key is new.
    fn entry_index(&mut self, key: &str, create: impl FnOnce() -> Node) -> usize {
        if let Some(&idx) = self.index.get(key) {
            return idx;
        }
        let idx = self.entries.len();
        self.entries.push((key.to_string(), create()));
        self.index.insert(key.to_string(), idx);
        idx
    }

    fn total(&self) -> Option<Amount> {
        self.entries
            .iter()
            .try_fold(Amount::ZERO, |sum, (_, node)| match node {
                Node::Leaf(amount) => sum.checked_add(*amount),
                Node::Branch(branch) => sum.checked_add(branch.total()?),
            })
    }

    fn leaf_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, node)| match node {
                Node::Leaf(_) => 1,
                Node::Branch(branch) => branch.leaf_count(),
            })
            .sum()
    }
}

impl Serialize for Branch {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}
