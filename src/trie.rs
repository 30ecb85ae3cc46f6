use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::trace;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_PREFIX: &str = "│   ";
const SPACE_PREFIX: &str = "    ";

/// Represents a node in a trie keyed by path segment.
#[derive(Debug, Default)]
pub struct TrieNode {
    pub children: BTreeMap<String, TrieNode>,
}

impl TrieNode {
    pub fn new() -> Self {
        TrieNode {
            children: BTreeMap::new(),
        }
    }

    /// A node with children is rendered as a directory.
    pub fn is_dir(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Represents a trie data structure.
#[derive(Debug, Default)]
pub struct Trie {
    root: TrieNode,
}

impl Trie {
    pub fn new() -> Self {
        Trie {
            root: TrieNode::new(),
        }
    }

    /// Inserts a slash-separated path, one level per segment.
    pub fn insert(&mut self, path: &str) {
        trace!("Inserting path into trie: {}", path);
        let mut current_node = &mut self.root;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current_node = current_node
                .children
                .entry(segment.to_owned())
                .or_default();
        }
    }

    /// Returns the root node of the trie.
    pub fn get_root(&self) -> &TrieNode {
        &self.root
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        render_level(&self.root, "", &mut lines);
        lines.join("\n")
    }
}

/// Renders `paths` as a box-drawing tree with directories listed first.
pub fn render_tree<S: AsRef<str>>(paths: &[S]) -> String {
    let mut trie = Trie::new();
    for path in paths {
        trie.insert(path.as_ref());
    }
    trie.render()
}

fn render_level(node: &TrieNode, prefix: &str, lines: &mut Vec<String>) {
    let mut children: Vec<_> = node.children.iter().collect();
    children.sort_by(|(a_name, a), (b_name, b)| {
        b.is_dir()
            .cmp(&a.is_dir())
            .then_with(|| locale_cmp(a_name, b_name))
    });

    for (i, (name, child)) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        let suffix = if child.is_dir() { "/" } else { "" };
        lines.push(format!("{}{}{}{}", prefix, connector, name, suffix));

        if child.is_dir() {
            let child_prefix = format!(
                "{}{}",
                prefix,
                if is_last { SPACE_PREFIX } else { PIPE_PREFIX }
            );
            render_level(child, &child_prefix, lines);
        }
    }
}

// Case-insensitive first; on a tie lowercase sorts ahead of uppercase.
fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
