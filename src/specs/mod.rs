// src/specs/mod.rs
//! # Page readers
//!
//! Everything that knows how the marketplace lays out its pages.
//! Each module reads one kind of page, or one piece shared by both.
//!
//! ## What lives here
//! - **Label resolution** (`labels`): find the value that belongs to a visible
//!   caption, whether it sits in the next element, after a `|` in the same
//!   text, or somewhere in the caption's grandparent block.
//! - **Listing pages** (`listing`): collect unique lot links, in order.
//! - **Lot pages** (`lot`): turn one detail page into a `LotRecord`.
//! - **Record shape** (`fields`): column order, headers and caption synonyms.
//!
//! ## What does **not** live here
//! - Navigation, waits and session lifetime (`session`, `core::net`).
//! - Deciding which pages to visit or what to do on failure (`scrape`).
//! - Writing reports (`report`, `file`).
//!
//! ## Typical call chain
//! ```text
//! scrape::Crawler → specs::listing::collect_links → Vec of lot urls
//!                 → session.load(url) → specs::lot::LotExtractor::extract
//!                 → report::ReportWriter
//! ```
//!
//! ## Conventions
//! - A missing value is `None`; it only becomes an empty cell at export.
//! - Captions match **case-insensitively** and literally (no regex syntax).
//! - Readers never fail a whole page because one field is absent.
//! - Testable offline against inline fixtures.
pub mod fields;
pub mod labels;
pub mod listing;
pub mod lot;
