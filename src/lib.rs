//! Warehouse location hierarchy.
//!
//! Turns a flat collection of storage-location records, each pointing to an
//! optional parent, into a sorted forest with per-node depth, and provides
//! id-keyed expansion state, root-level filtering and aggregate counts.
//!
//! Layers, leaves first: [`domain`] (pure data and algorithms),
//! [`application`] (hierarchy facade, snapshot loading), [`infrastructure`]
//! (I/O traits, wiring), [`cli`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
