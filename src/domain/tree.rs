use std::cmp::Ordering;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::entities::{normalize_key, Course};

/// Node of the course tree.
#[derive(Debug)]
pub struct CourseNode {
    /// Course stored at this node
    pub course: Course,
    /// Subtree with keys ordering before this node's key
    pub lower: Option<Index>,
    /// Subtree with keys ordering after this node's key
    pub higher: Option<Index>,
}

impl CourseNode {
    fn new(course: Course) -> Self {
        Self {
            course,
            lower: None,
            higher: None,
        }
    }
}

/// Unbalanced binary search tree of courses keyed by normalized course number.
///
/// Nodes live in a generational arena and link to each other by `Index`.
/// The tree owns every node; dropping it releases the whole arena at once.
/// Nodes are never removed, so every stored index stays live for the
/// lifetime of the tree.
#[derive(Debug, Default)]
pub struct CourseTree {
    /// Arena storage for all tree nodes
    arena: Arena<CourseNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl CourseTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree by inserting `courses` in order. Later duplicates win.
    pub fn from_courses<I: IntoIterator<Item = Course>>(courses: I) -> Self {
        let mut tree = Self::new();
        tree.extend(courses);
        tree
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of distinct course numbers stored.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn get_node(&self, idx: Index) -> Option<&CourseNode> {
        self.arena.get(idx)
    }

    /// Insert a course, or overwrite title and prerequisites of the existing
    /// entry with the same number.
    ///
    /// Returns `true` when a new node was attached.
    #[instrument(level = "trace", skip(self, course), fields(number = %course.number))]
    pub fn insert(&mut self, course: Course) -> bool {
        let Some(mut current) = self.root else {
            self.root = Some(self.arena.insert(CourseNode::new(course)));
            return true;
        };

        loop {
            let node = &self.arena[current];
            let ordering = course.number.cmp(&node.course.number);
            let next = match ordering {
                Ordering::Less => node.lower,
                Ordering::Greater => node.higher,
                Ordering::Equal => {
                    let existing = &mut self.arena[current].course;
                    existing.title = course.title;
                    existing.prerequisites = course.prerequisites;
                    return false;
                }
            };

            match next {
                Some(child) => current = child,
                None => {
                    let child = self.arena.insert(CourseNode::new(course));
                    let parent = &mut self.arena[current];
                    if ordering == Ordering::Less {
                        parent.lower = Some(child);
                    } else {
                        parent.higher = Some(child);
                    }
                    return true;
                }
            }
        }
    }

    /// Look up a course by number. The query is normalized first, so
    /// `"cs201 "` finds `"CS201"`.
    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, number: &str) -> Option<&Course> {
        let key = normalize_key(number);
        let mut current = self.root;

        while let Some(idx) = current {
            let node = self.arena.get(idx)?;
            current = match key.cmp(&node.course.number) {
                Ordering::Equal => return Some(&node.course),
                Ordering::Less => node.lower,
                Ordering::Greater => node.higher,
            };
        }
        None
    }

    /// Visit every course once in ascending number order.
    pub fn traverse_inorder<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a Course),
    {
        self.visit_inorder(self.root, &mut visit);
    }

    fn visit_inorder<'a, F>(&'a self, idx: Option<Index>, visit: &mut F)
    where
        F: FnMut(&'a Course),
    {
        if let Some(node) = idx.and_then(|i| self.arena.get(i)) {
            self.visit_inorder(node.lower, visit);
            visit(&node.course);
            self.visit_inorder(node.higher, visit);
        }
    }

    /// In-order iterator; same order as `traverse_inorder` without recursion.
    pub fn iter(&self) -> InOrderIter<'_> {
        InOrderIter::new(self)
    }

    /// Height of the tree, 0 when empty.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            if let Some(node) = self.arena.get(idx) {
                max_depth = max_depth.max(depth);
                stack.extend(node.lower.map(|c| (c, depth + 1)));
                stack.extend(node.higher.map(|c| (c, depth + 1)));
            }
        }
        max_depth
    }

    /// Render the node layout, lower child before higher child.
    pub fn to_display_tree(&self) -> Tree<String> {
        fn build(tree: &CourseTree, idx: Index, label: &str) -> Option<Tree<String>> {
            let node = tree.get_node(idx)?;
            let mut display = Tree::new(format!("{}{}", label, node.course.number));
            for (child, side) in [(node.lower, "< "), (node.higher, "> ")] {
                if let Some(sub) = child.and_then(|c| build(tree, c, side)) {
                    display.push(sub);
                }
            }
            Some(display)
        }

        self.root
            .and_then(|root| build(self, root, ""))
            .unwrap_or_else(|| Tree::new("Empty tree".to_string()))
    }
}

impl Extend<Course> for CourseTree {
    fn extend<I: IntoIterator<Item = Course>>(&mut self, iter: I) {
        for course in iter {
            self.insert(course);
        }
    }
}

impl FromIterator<Course> for CourseTree {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        Self::from_courses(iter)
    }
}

impl<'a> IntoIterator for &'a CourseTree {
    type Item = &'a Course;
    type IntoIter = InOrderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct InOrderIter<'a> {
    tree: &'a CourseTree,
    stack: Vec<&'a CourseNode>,
}

impl<'a> InOrderIter<'a> {
    fn new(tree: &'a CourseTree) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
        };
        iter.push_lower_spine(tree.root);
        iter
    }

    fn push_lower_spine(&mut self, mut idx: Option<Index>) {
        let tree = self.tree;
        while let Some(node) = idx.and_then(|i| tree.get_node(i)) {
            self.stack.push(node);
            idx = node.lower;
        }
    }
}

impl<'a> Iterator for InOrderIter<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_lower_spine(node.higher);
        Some(&node.course)
    }
}
