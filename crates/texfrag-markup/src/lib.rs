/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! LaTeX markup model for texfrag.
//!
//! This crate is the document model the publishing pipeline assembles
//! fragments with. It knows nothing about folders, manifests or artifacts:
//!
//! - [`Node`], [`Command`], [`Environment`] and [`Arg`] describe markup
//! - [`NodeList`] is an ordered node sequence with `insert`/`append`/`render`
//! - [`Package`] records which preamble packages a node needs
//! - [`ToTabular`] converts structured tables into a `tabular` environment
//!
//! # Example
//!
//! ```
//! use texfrag_markup::{Arg, Command, NodeList};
//!
//! let mut list = NodeList::new();
//! list.append(Command::new("input").arg(Arg::raw("Tabulars/returns")));
//! list.insert(0, Command::new("caption").arg(Arg::text("Returns")));
//! assert_eq!(list.render(), "\\caption{Returns}%\n\\input{Tabulars/returns}");
//! ```

pub mod error;
pub mod escape;
pub mod node;
pub mod tabular;

pub use error::{MarkupError, MarkupResult};
pub use escape::escape_latex;
pub use node::{Arg, Command, Environment, NODE_SEPARATOR, Node, NodeList, Package};
pub use tabular::{Cell, Table, TabularOptions, ToTabular};
