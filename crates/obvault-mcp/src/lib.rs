//! # obvault-mcp
//!
//! MCP (Model Context Protocol) server for an obvault vault.
//!
//! Exposes vault operations as MCP tools:
//! - `list_notes`: List notes, optionally under a folder
//! - `read_note`: Read a note's content
//! - `write_note`: Create or overwrite a note (omitted in readonly mode)
//! - `delete_note`: Delete a note (omitted in readonly mode)
//! - `search_notes`: Case-insensitive full-text search
//! - `get_metadata`: Parse a note's YAML frontmatter
//!
//! Notes are also readable as resources at `obsidian://note/{path}`.

pub mod format;
pub mod tools;

pub use tools::ObvaultMcpService;
