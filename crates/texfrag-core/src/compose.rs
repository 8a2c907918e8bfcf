/*
 * compose.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Decoration of a serialized body with sizing, caption, description and
//! label.
//!
//! Composition is pure: it only builds nodes. Ordering follows two rules.
//! Above the body, the label is inserted at the head first, then the
//! description, then the caption, giving `[caption, caption*, label, body..]`.
//! Below the body, the same three are appended in caption, description, label
//! order.

use texfrag_markup::{Arg, Command, Environment, Node, NodeList, Package};

use crate::category::Category;
use crate::error::Result;
use crate::options::{Decorations, FragmentOptions, SizingMode};

/// Default width of a sub-artifact environment inside a container.
pub const DEFAULT_SUB_WIDTH: &str = r"0.49\linewidth";

/// Ordered nodes of one decorated artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub nodes: NodeList,
    pub prefix: Option<&'static str>,
}

impl Fragment {
    pub fn render(&self) -> String {
        self.nodes.render()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DecorationComposer {
    category: Category,
}

impl DecorationComposer {
    pub fn new(category: Category) -> Self {
        Self { category }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Resolve `options` against `name` and decorate `body`.
    ///
    /// Sizing conflicts are reported before anything is built.
    pub fn compose(&self, body: Node, options: &FragmentOptions, name: &str) -> Result<Fragment> {
        let decorations = options.resolve(name)?;
        Ok(self.compose_resolved(body, &decorations))
    }

    pub fn compose_resolved(&self, body: Node, decorations: &Decorations) -> Fragment {
        let mut nodes = NodeList::new();
        nodes.append(wrap(body, &decorations.sizing));
        self.decorate(&mut nodes, decorations);
        Fragment {
            nodes,
            prefix: self.category.label_prefix(),
        }
    }

    /// Wrap a composed fragment into the category's sub environment
    /// (`subfigure`, `subtable`).
    ///
    /// Returns `None` for categories without one.
    pub fn sub_environment(&self, fragment: Fragment, width: &str) -> Option<Node> {
        let env = self.category.sub_environment()?;
        Some(
            Environment::new(env)
                .arg(Arg::raw(width))
                .package(Package::new("subcaption"))
                .children(fragment.nodes)
                .into(),
        )
    }

    /// Add caption, description and label nodes to `nodes`.
    pub fn decorate(&self, nodes: &mut NodeList, decorations: &Decorations) {
        let Some(caption) = &decorations.caption else {
            return;
        };

        let caption = Command::new("caption").arg(Arg::text(caption));
        let description = decorations
            .description
            .as_ref()
            .map(|d| Command::new("caption*").arg(Arg::text(d)));
        let label = decorations
            .label
            .as_ref()
            .map(|l| self.label_node(l, decorations.alternate_label_namespace));

        if decorations.above {
            if let Some(label) = label {
                nodes.insert(0, label);
            }
            if let Some(description) = description {
                nodes.insert(0, description);
            }
            nodes.insert(0, caption);
        } else {
            nodes.append(caption);
            if let Some(description) = description {
                nodes.append(description);
            }
            if let Some(label) = label {
                nodes.append(label);
            }
        }
    }

    fn label_node(&self, label: &str, zref: bool) -> Command {
        let target = match self.category.label_prefix() {
            Some(prefix) => format!("{}:{}", prefix, label),
            None => label.to_string(),
        };
        if zref {
            Command::new("zlabel")
                .arg(Arg::raw(target))
                .package(Package::new("zref-user"))
        } else {
            Command::new("label").arg(Arg::raw(target))
        }
    }
}

/// Apply the sizing wrapper, if any. The wrapper replaces the body node.
pub fn wrap(body: Node, sizing: &SizingMode) -> Node {
    match sizing {
        SizingMode::None => body,
        SizingMode::ShrinkToFit(p) => Command::new("resizebox")
            .arg(Arg::raw(&p.width))
            .arg(Arg::raw(&p.height))
            .arg(Arg::node(body))
            .package(Package::new("graphics"))
            .into(),
        SizingMode::BoundingBoxFit(p) => Command::new("adjustbox")
            .arg(Arg::raw(format!("max totalsize={{{}}}{{{}}}", p.width, p.height)))
            .arg(Arg::node(body))
            .package(Package::new("adjustbox"))
            .into(),
    }
}
