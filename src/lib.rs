// SPDX-License-Identifier: MIT
//
// swatchbook library: the session and everything around it that is not
// terminal plumbing.
//
//   session   → palette state, undo/redo, favorites, mockup history
//   collab    → extraction / mockup service traits and the reply format
//   favorites → saved palettes on disk
//   config    → swatchbook.toml
//   command   → one-line command parsing
//   render    → ANSI palette output
//
// The color, generation and history engines live in the workspace crates.

pub mod collab;
pub mod command;
pub mod config;
pub mod favorites;
pub mod render;
pub mod session;
