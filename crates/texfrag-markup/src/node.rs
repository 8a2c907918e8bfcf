/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Markup nodes and the ordered node list used to assemble fragments.
//!
//! The model is deliberately small:
//! - `Raw`: markup emitted verbatim
//! - `Text`: plain text, escaped on render
//! - `Command`: `\name[options]{arg}...`
//! - `Environment`: `\begin{name}[options]{arg}` ... `\end{name}`
//!
//! Children of an environment, like the entries of a [`NodeList`], are joined
//! with `%` followed by a newline so that line breaks between nodes never
//! introduce stray spaces in the typeset output.

use std::collections::BTreeSet;

use crate::escape::escape_latex;

/// Separator placed between consecutive nodes.
pub const NODE_SEPARATOR: &str = "%\n";

/// A LaTeX package a node depends on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Package {
    pub name: String,
    pub options: Option<String>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }

    /// The preamble line that loads this package.
    pub fn usepackage(&self) -> String {
        match &self.options {
            Some(opts) => format!("\\usepackage[{}]{{{}}}", opts, self.name),
            None => format!("\\usepackage{{{}}}", self.name),
        }
    }
}

/// An argument or option of a command or environment.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Plain text, escaped on render.
    Text(String),
    /// Markup emitted verbatim.
    Raw(String),
    /// A nested node.
    Node(Box<Node>),
}

impl Arg {
    pub fn text(s: impl Into<String>) -> Self {
        Arg::Text(s.into())
    }

    pub fn raw(s: impl Into<String>) -> Self {
        Arg::Raw(s.into())
    }

    pub fn node(node: impl Into<Node>) -> Self {
        Arg::Node(Box::new(node.into()))
    }

    fn render(&self) -> String {
        match self {
            Arg::Text(s) => escape_latex(s),
            Arg::Raw(s) => s.clone(),
            Arg::Node(n) => n.render(),
        }
    }

    fn collect_packages(&self, out: &mut BTreeSet<Package>) {
        if let Arg::Node(n) = self {
            n.collect_packages(out);
        }
    }
}

/// A LaTeX command: `\name[opt1,opt2]{arg1}{arg2}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub name: String,
    pub options: Vec<Arg>,
    pub arguments: Vec<Arg>,
    pub packages: Vec<Package>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
            arguments: Vec::new(),
            packages: Vec::new(),
        }
    }

    pub fn option(mut self, option: Arg) -> Self {
        self.options.push(option);
        self
    }

    pub fn arg(mut self, arg: Arg) -> Self {
        self.arguments.push(arg);
        self
    }

    pub fn package(mut self, package: Package) -> Self {
        self.packages.push(package);
        self
    }

    pub fn render(&self) -> String {
        let mut out = format!("\\{}", self.name);
        push_options(&mut out, &self.options);
        for arg in &self.arguments {
            out.push('{');
            out.push_str(&arg.render());
            out.push('}');
        }
        out
    }
}

/// A LaTeX environment with child nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub name: String,
    pub options: Vec<Arg>,
    pub arguments: Vec<Arg>,
    pub children: NodeList,
    pub packages: Vec<Package>,
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
            arguments: Vec::new(),
            children: NodeList::new(),
            packages: Vec::new(),
        }
    }

    pub fn option(mut self, option: Arg) -> Self {
        self.options.push(option);
        self
    }

    pub fn arg(mut self, arg: Arg) -> Self {
        self.arguments.push(arg);
        self
    }

    pub fn package(mut self, package: Package) -> Self {
        self.packages.push(package);
        self
    }

    pub fn children(mut self, children: NodeList) -> Self {
        self.children = children;
        self
    }

    pub fn render(&self) -> String {
        let mut out = format!("\\begin{{{}}}", self.name);
        push_options(&mut out, &self.options);
        for arg in &self.arguments {
            out.push('{');
            out.push_str(&arg.render());
            out.push('}');
        }
        out.push_str(NODE_SEPARATOR);
        if !self.children.is_empty() {
            out.push_str(&self.children.render());
            out.push_str(NODE_SEPARATOR);
        }
        out.push_str(&format!("\\end{{{}}}", self.name));
        out
    }
}

fn push_options(out: &mut String, options: &[Arg]) {
    if options.is_empty() {
        return;
    }
    out.push('[');
    let rendered: Vec<String> = options.iter().map(Arg::render).collect();
    out.push_str(&rendered.join(","));
    out.push(']');
}

/// A single markup node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Raw(String),
    Text(String),
    Command(Command),
    Environment(Environment),
}

impl Node {
    pub fn raw(s: impl Into<String>) -> Self {
        Node::Raw(s.into())
    }

    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn render(&self) -> String {
        match self {
            Node::Raw(s) => s.clone(),
            Node::Text(s) => escape_latex(s),
            Node::Command(c) => c.render(),
            Node::Environment(e) => e.render(),
        }
    }

    /// Name of the command or environment, if this node has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Command(c) => Some(&c.name),
            Node::Environment(e) => Some(&e.name),
            Node::Raw(_) | Node::Text(_) => None,
        }
    }

    fn collect_packages(&self, out: &mut BTreeSet<Package>) {
        match self {
            Node::Raw(_) | Node::Text(_) => {}
            Node::Command(c) => {
                out.extend(c.packages.iter().cloned());
                for arg in c.options.iter().chain(&c.arguments) {
                    arg.collect_packages(out);
                }
            }
            Node::Environment(e) => {
                out.extend(e.packages.iter().cloned());
                for arg in e.options.iter().chain(&e.arguments) {
                    arg.collect_packages(out);
                }
                for child in e.children.iter() {
                    child.collect_packages(out);
                }
            }
        }
    }
}

impl From<Command> for Node {
    fn from(c: Command) -> Self {
        Node::Command(c)
    }
}

impl From<Environment> for Node {
    fn from(e: Environment) -> Self {
        Node::Environment(e)
    }
}

/// Ordered list of nodes supporting head insertion and rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeList {
    nodes: Vec<Node>,
}

impl NodeList {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Insert a node at `index`, shifting later nodes back.
    ///
    /// An index past the end appends.
    pub fn insert(&mut self, index: usize, node: impl Into<Node>) {
        let index = index.min(self.nodes.len());
        self.nodes.insert(index, node.into());
    }

    pub fn append(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    pub fn extend(&mut self, other: NodeList) {
        self.nodes.extend(other.nodes);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Render all nodes, joined by [`NODE_SEPARATOR`].
    pub fn render(&self) -> String {
        self.nodes
            .iter()
            .map(Node::render)
            .collect::<Vec<_>>()
            .join(NODE_SEPARATOR)
    }

    /// All packages required by the nodes in this list, deduplicated.
    pub fn packages(&self) -> BTreeSet<Package> {
        let mut out = BTreeSet::new();
        for node in &self.nodes {
            node.collect_packages(&mut out);
        }
        out
    }
}

impl FromIterator<Node> for NodeList {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graphics(path: &str) -> Command {
        Command::new("includegraphics")
            .option(Arg::raw(r"width=0.8\textwidth"))
            .arg(Arg::raw(path))
            .package(Package::new("graphicx"))
    }

    #[test]
    fn test_command_render() {
        assert_eq!(
            graphics("Graphics/test.png").render(),
            r"\includegraphics[width=0.8\textwidth]{Graphics/test.png}"
        );
        assert_eq!(
            Command::new("caption").arg(Arg::text("50% done")).render(),
            r"\caption{50\% done}"
        );
        assert_eq!(Command::new("centering").render(), r"\centering");
    }

    #[test]
    fn test_nested_command_argument() {
        let wrapped = Command::new("resizebox")
            .arg(Arg::raw(r"\columnwidth"))
            .arg(Arg::raw("!"))
            .arg(Arg::node(graphics("Graphics/a.png")));
        assert_eq!(
            wrapped.render(),
            r"\resizebox{\columnwidth}{!}{\includegraphics[width=0.8\textwidth]{Graphics/a.png}}"
        );
    }

    #[test]
    fn test_environment_render() {
        let mut children = NodeList::new();
        children.append(Command::new("centering"));
        children.append(graphics("Graphs/test.jpg"));
        let env = Environment::new("figure").children(children);

        insta::assert_snapshot!(env.render(), @r"
        \begin{figure}%
        \centering%
        \includegraphics[width=0.8\textwidth]{Graphs/test.jpg}%
        \end{figure}
        ");
    }

    #[test]
    fn test_empty_environment() {
        let env = Environment::new("table").option(Arg::raw("h"));
        assert_eq!(env.render(), "\\begin{table}[h]%\n\\end{table}");
    }

    #[test]
    fn test_insert_at_head() {
        let mut list = NodeList::new();
        list.append(Node::raw("body"));
        list.insert(0, Node::raw("label"));
        list.insert(0, Node::raw("caption"));
        assert_eq!(list.render(), "caption%\nlabel%\nbody");
    }

    #[test]
    fn test_insert_past_end_appends() {
        let mut list = NodeList::new();
        list.insert(5, Node::raw("only"));
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0), Some(&Node::raw("only")));
    }

    #[test]
    fn test_packages_are_collected_recursively() {
        let wrapped = Command::new("adjustbox")
            .arg(Arg::raw(r"max totalsize={\textwidth}{0.95\textheight}"))
            .arg(Arg::node(graphics("a.png")))
            .package(Package::new("adjustbox"));
        let mut inner = NodeList::new();
        inner.append(wrapped);
        let env = Environment::new("subfigure")
            .arg(Arg::raw(r"0.49\linewidth"))
            .package(Package::new("subcaption"))
            .children(inner);

        let mut list = NodeList::new();
        list.append(env);
        list.append(Command::new("zlabel").package(Package::new("zref-user")));

        let names: Vec<String> = list.packages().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["adjustbox", "graphicx", "subcaption", "zref-user"]);
    }

    #[test]
    fn test_usepackage() {
        assert_eq!(Package::new("graphicx").usepackage(), r"\usepackage{graphicx}");
        assert_eq!(
            Package::new("babel").with_options("english").usepackage(),
            r"\usepackage[english]{babel}"
        );
    }

    #[test]
    fn test_text_node_escapes() {
        assert_eq!(Node::text("R&D").render(), r"R\&D");
        assert_eq!(Node::raw(r"\hfill").render(), r"\hfill");
    }
}
