//! Sema Name Resolution
//!
//! Qualified names and global lookup over a model and its mounted libraries:
//! - Escaping and splitting of `::`-separated qualified names
//! - `qualified_name_of` from the containment structure
//! - `resolve_global` through memberships, aliases and imports
//! - A shareable, id-keyed mount registry
//! - Containment helpers that keep both directions of ownership linked

mod containment;
mod error;
mod mount;
mod qualified;
mod resolve;

pub use containment::{
    add_alias, add_import, add_owned_edge, add_owned_feature, add_owned_member,
    add_owned_relationship, ImportKind,
};
pub use error::{NameError, NameResult};
pub use mount::{ModelView, Mount, MountRegistry};
pub use qualified::{escape_name, is_basic_name, local_name, qualified_name_of, split_qualified_name};
pub use resolve::{lookup_member, resolve_global, root_namespaces};
