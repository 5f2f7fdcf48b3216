//! Human-readable tree rendering.
//!
//! ```text
//! com.example:app:1.0.0
//! ├── com.x:lib:1.0
//! │   └── com.x:core:2.1
//! ├── com.y:web:3.0
//! │   └── com.x:core:2.1 (*)
//! └── com.z:loop:1.0
//!     └── com.z:loop:1.0 (cycle)
//!
//! (*) = shown in full above
//! (cycle) = dependency cycle
//! ```

use petgraph::graph::NodeIndex;
use std::collections::HashSet;

use crate::graph::DependencyTree;

struct Frame {
    children: Vec<NodeIndex>,
    next: usize,
    node: NodeIndex,
    depth: usize,
    prefix: String,
}

/// Render `tree` with box-drawing connectors.
///
/// A node is expanded the first time it is printed above the depth limit;
/// later occurrences are marked `(*)`. A node already on the current path is marked `(cycle)`.
/// With `max_depth`, nodes deeper than that many levels below the root are
/// omitted.
#[must_use]
pub fn render_text(tree: &DependencyTree, max_depth: Option<usize>) -> String {
    let root = tree.root();
    let mut lines = vec![tree.id(root).to_string()];
    let mut expanded: HashSet<NodeIndex> = HashSet::from([root]);
    let mut on_path: HashSet<NodeIndex> = HashSet::from([root]);
    let mut saw_shared = false;
    let mut saw_cycle = false;

    let mut stack = vec![Frame {
        children: tree.children(root),
        next: 0,
        node: root,
        depth: 0,
        prefix: String::new(),
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(&child) = frame.children.get(frame.next) else {
            on_path.remove(&frame.node);
            stack.pop();
            continue;
        };
        frame.next += 1;

        let is_last = frame.next == frame.children.len();
        let connector = if is_last { "└── " } else { "├── " };
        let line = format!("{}{}{}", frame.prefix, connector, tree.id(child));

        if on_path.contains(&child) {
            lines.push(format!("{line} (cycle)"));
            saw_cycle = true;
            continue;
        }
        if expanded.contains(&child) {
            lines.push(format!("{line} (*)"));
            saw_shared = true;
            continue;
        }
        lines.push(line);

        let depth = frame.depth + 1;
        if max_depth.is_some_and(|max| depth >= max) {
            continue;
        }
        expanded.insert(child);
        let prefix = format!("{}{}", frame.prefix, if is_last { "    " } else { "│   " });
        on_path.insert(child);
        stack.push(Frame {
            children: tree.children(child),
            next: 0,
            node: child,
            depth,
            prefix,
        });
    }

    if saw_shared || saw_cycle {
        lines.push(String::new());
    }
    if saw_shared {
        lines.push("(*) = shown in full above".to_string());
    }
    if saw_cycle {
        lines.push("(cycle) = dependency cycle".to_string());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
