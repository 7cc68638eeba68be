use super::leaf::Leaf;
use crate::data::features::{ClassLabel, Features, Prediction, Target};
use crate::errors::Result;
use crate::splitting::SplitTest;
use std::collections::HashMap;

/// Decision tree node
#[derive(Clone, Debug)]
pub enum Node<C: ClassLabel> {
    Leaf(Leaf<C>),
    Branch(Branch<C>),
}

/// Internal node routing examples to one of its two children.
#[derive(Clone, Debug)]
pub struct Branch<C: ClassLabel> {
    test: SplitTest,
    left: Box<Node<C>>,
    right: Box<Node<C>>,
}

impl<C: ClassLabel> Branch<C> {
    pub fn new(test: SplitTest, left: Node<C>, right: Node<C>) -> Self {
        Self {
            test,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn test(&self) -> &SplitTest {
        &self.test
    }

    pub fn left(&self) -> &Node<C> {
        &self.left
    }

    pub fn right(&self) -> &Node<C> {
        &self.right
    }

    fn child(&self, features: &Features) -> &Node<C> {
        if self.test.goes_left(features) {
            &self.left
        } else {
            &self.right
        }
    }

    pub fn get_leaf(&self, features: &Features) -> &Leaf<C> {
        self.child(features).get_leaf(features)
    }

    /// Updates the child the example routes to, installing its replacement if it split.
    pub fn update(&mut self, features: &Features, target: &Target<C>) -> Result<()> {
        let child = if self.test.goes_left(features) {
            &mut self.left
        } else {
            &mut self.right
        };
        child.update(features, target)
    }

    pub fn size(&self) -> usize {
        self.left.size() + self.right.size()
    }
}

impl<C: ClassLabel> Node<C> {
    pub fn get_leaf(&self, features: &Features) -> &Leaf<C> {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Branch(branch) => branch.get_leaf(features),
        }
    }

    /// Routes the example to its leaf and updates it. A leaf that decides to
    /// split is replaced, in this slot, by the branch it returns.
    pub fn update(&mut self, features: &Features, target: &Target<C>) -> Result<()> {
        match self {
            Node::Leaf(leaf) => {
                if let Some(branch) = leaf.update(features, target)? {
                    *self = Node::Branch(branch);
                }
                Ok(())
            }
            Node::Branch(branch) => branch.update(features, target),
        }
    }

    /// Number of leaves under this node.
    pub fn size(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.size(),
            Node::Branch(branch) => branch.size(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Every leaf under this node, left to right.
    pub fn leaves(&self) -> Vec<&Leaf<C>> {
        let mut leaves = Vec::with_capacity(self.size());
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf(leaf) => leaves.push(leaf),
                Node::Branch(branch) => {
                    stack.push(&branch.right);
                    stack.push(&branch.left);
                }
            }
        }
        leaves
    }

    pub fn predict(&self, features: &Features) -> Prediction<C> {
        self.get_leaf(features).predict(features)
    }

    pub fn predict_naive_bayes(&self, features: &Features) -> Result<HashMap<C, f64>> {
        self.get_leaf(features).predict_naive_bayes(features)
    }
}
