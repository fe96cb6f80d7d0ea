//! Premade submenu tree

use crate::premade::PremadeDef;
use crate::types::PremadeId;

/// A node of the premade picker menu
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuNode {
    /// A submenu
    Group {
        label: String,
        children: Vec<MenuNode>,
    },
    /// A pickable premade panel
    Entry { label: String, premade_id: PremadeId },
    /// A divider line
    Separator,
}

impl MenuNode {
    /// Label of a group or entry
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Group { label, .. } | Self::Entry { label, .. } => Some(label),
            Self::Separator => None,
        }
    }
}

fn path_segments(path: &str) -> Vec<&str> {
    path.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Append `node` under the group path `groups`, creating missing groups at
/// the end of their parent.
fn insert(nodes: &mut Vec<MenuNode>, groups: &[&str], node: MenuNode) {
    let Some((first, rest)) = groups.split_first() else {
        nodes.push(node);
        return;
    };
    for n in nodes.iter_mut() {
        if let MenuNode::Group { label, children } = n {
            if label.as_str() == *first {
                insert(children, rest, node);
                return;
            }
        }
    }
    let mut children = Vec::new();
    insert(&mut children, rest, node);
    nodes.push(MenuNode::Group {
        label: first.to_string(),
        children,
    });
}

/// Build the nested menu from registry order.
///
/// Names are `/`-separated paths: leading segments become groups and the
/// last segment the entry label (the ID when the name is empty). Separator
/// entries go at the root, or at the end of the group their name names.
pub fn build_menu_tree(defs: &[PremadeDef]) -> Vec<MenuNode> {
    let mut root = Vec::new();

    for def in defs {
        if def.is_separator() {
            insert(&mut root, &path_segments(&def.name), MenuNode::Separator);
            continue;
        }

        let full_name = if def.name.is_empty() { &def.id } else { &def.name };
        let segments = path_segments(full_name);
        let Some((leaf, groups)) = segments.split_last() else {
            continue;
        };

        let entry = MenuNode::Entry {
            label: leaf.to_string(),
            premade_id: def.id.clone(),
        };
        insert(&mut root, groups, entry);
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(id: &str, name: &str) -> PremadeDef {
        PremadeDef::new(id, name, "")
    }

    #[test]
    fn test_flat_entries() {
        let tree = build_menu_tree(&[def("a", "Alpha"), def("b", "")]);
        assert_eq!(
            tree,
            vec![
                MenuNode::Entry {
                    label: "Alpha".into(),
                    premade_id: "a".into()
                },
                MenuNode::Entry {
                    label: "b".into(),
                    premade_id: "b".into()
                },
            ]
        );
    }

    #[test]
    fn test_groups_are_shared() {
        let tree = build_menu_tree(&[
            def("goblin", "Monsters/Goblin"),
            def("orc", " Monsters / Orc "),
            def("map", "Maps/Cave/Entrance"),
        ]);
        assert_eq!(tree.len(), 2);
        match &tree[0] {
            MenuNode::Group { label, children } => {
                assert_eq!(label, "Monsters");
                assert_eq!(children.len(), 2);
                assert_eq!(children[1].label(), Some("Orc"));
            }
            other => panic!("expected group, got {:?}", other),
        }
        match &tree[1] {
            MenuNode::Group { children, .. } => {
                assert_eq!(children[0].label(), Some("Cave"));
            }
            other => panic!("expected group, got {:?}", other),
        }
    }

    #[test]
    fn test_separators() {
        let tree = build_menu_tree(&[
            def("goblin", "Monsters/Goblin"),
            def("-", "Monsters"),
            def("-", ""),
            def("-", "Tools/Advanced"),
        ]);
        assert_eq!(tree.len(), 3);
        match &tree[0] {
            MenuNode::Group { children, .. } => {
                assert_eq!(children[1], MenuNode::Separator);
            }
            other => panic!("expected group, got {:?}", other),
        }
        assert_eq!(tree[1], MenuNode::Separator);
        match &tree[2] {
            MenuNode::Group { label, children } => {
                assert_eq!(label, "Tools");
                assert_eq!(children[0].label(), Some("Advanced"));
            }
            other => panic!("expected group, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_path_entry_is_skipped() {
        let tree = build_menu_tree(&[def("x", " / ")]);
        assert!(tree.is_empty());
    }
}
