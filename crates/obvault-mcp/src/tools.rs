//! MCP tool and resource definitions for obvault vault operations.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        AnnotateAble, CallToolResult, Content, Implementation, ListResourceTemplatesResult,
        PaginatedRequestParams, RawResourceTemplate, ReadResourceRequestParams, ReadResourceResult,
        ResourceContents, ResourceTemplate, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use serde::Deserialize;
use tracing::debug;

use obvault_core::error::VaultError;
use obvault_core::note::ReadOutcome;
use obvault_vault::VaultService;

use crate::format;

/// URI prefix of the note resource template.
pub const NOTE_URI_PREFIX: &str = "obsidian://note/";

/// obvault MCP server.
///
/// In readonly mode the write and delete tools are never added to the
/// router, so clients cannot discover or call them.
#[derive(Debug, Clone)]
pub struct ObvaultMcpService {
    vault: Arc<VaultService>,
    tool_router: ToolRouter<Self>,
}

impl ObvaultMcpService {
    pub fn new(vault: Arc<VaultService>) -> Self {
        let tool_router = if vault.readonly() {
            Self::read_tools()
        } else {
            Self::read_tools() + Self::write_tools()
        };
        Self { vault, tool_router }
    }

    pub fn vault(&self) -> &VaultService {
        &self.vault
    }

    /// Names of the tools this server advertises.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        names
    }

    /// Resolve an `obsidian://note/{path}` URI to the note's content.
    ///
    /// Unlike the `read_note` tool, a missing note is an error here.
    ///
    /// # Errors
    ///
    /// Returns `resource_not_found` for a missing note and `invalid_params`
    /// for a foreign URI or a path outside the vault.
    pub fn read_note_resource(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        debug!(uri, "read_resource");
        let encoded = uri.strip_prefix(NOTE_URI_PREFIX).ok_or_else(|| {
            McpError::invalid_params(format!("unsupported resource uri: {uri}"), None)
        })?;
        let path = urlencoding::decode(encoded)
            .map_err(|e| McpError::invalid_params(format!("invalid resource uri {uri}: {e}"), None))?;

        match self.vault.read_note(&path).map_err(to_mcp_error)? {
            ReadOutcome::Found(content) => Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(content, uri)],
            }),
            ReadOutcome::NotFound => Err(McpError::resource_not_found(
                format!("Resource not found: {path}"),
                None,
            )),
        }
    }

    fn note_template() -> ResourceTemplate {
        RawResourceTemplate {
            uri_template: format!("{NOTE_URI_PREFIX}{{path}}"),
            name: "note".to_string(),
            title: None,
            description: Some("Read a note by its path relative to the vault root".to_string()),
            mime_type: Some("text/markdown".to_string()),
            icons: None,
        }
        .no_annotation()
    }
}

fn to_mcp_error(e: VaultError) -> McpError {
    match e {
        VaultError::InvalidPath { .. } => McpError::invalid_params(e.to_string(), None),
        VaultError::ReadOnly(_) => McpError::invalid_request(e.to_string(), None),
        VaultError::Io(_) | VaultError::Serialization(_) => {
            McpError::internal_error(e.to_string(), None)
        }
    }
}

fn text(body: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(body)]))
}

// === Tool request types ===

/// Request to list notes.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListNotesRequest {
    /// Optional folder path to list notes from
    pub folder: Option<String>,
}

/// Request naming a single note.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NotePathRequest {
    /// Path to the note relative to vault root
    pub path: String,
}

/// Request to create or update a note.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WriteNoteRequest {
    /// Path where the note should be saved
    pub path: String,
    /// Content of the note in Markdown format
    pub content: String,
}

/// Request for full-text search.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchNotesRequest {
    /// Text to search for in notes
    pub query: String,
}

#[tool_router(router = read_tools)]
impl ObvaultMcpService {
    #[tool(description = "List all notes in the Obsidian vault")]
    fn list_notes(
        &self,
        Parameters(req): Parameters<ListNotesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let notes = self
            .vault
            .list_notes(req.folder.as_deref())
            .map_err(to_mcp_error)?;
        text(format::json(&notes).map_err(to_mcp_error)?)
    }

    #[tool(description = "Read the content of a specific note")]
    fn read_note(
        &self,
        Parameters(req): Parameters<NotePathRequest>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self.vault.read_note(&req.path).map_err(to_mcp_error)?;
        text(format::read(&req.path, outcome))
    }

    #[tool(description = "Search for notes containing specific text")]
    fn search_notes(
        &self,
        Parameters(req): Parameters<SearchNotesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let results = self.vault.search_notes(&req.query);
        text(format::json(&results).map_err(to_mcp_error)?)
    }

    #[tool(description = "Get frontmatter metadata from a note")]
    fn get_metadata(
        &self,
        Parameters(req): Parameters<NotePathRequest>,
    ) -> Result<CallToolResult, McpError> {
        let metadata = self.vault.get_metadata(&req.path).map_err(to_mcp_error)?;
        text(format::metadata(&req.path, metadata.as_ref()).map_err(to_mcp_error)?)
    }
}

#[tool_router(router = write_tools)]
impl ObvaultMcpService {
    #[tool(description = "Create or update a note in the vault")]
    fn write_note(
        &self,
        Parameters(req): Parameters<WriteNoteRequest>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self
            .vault
            .write_note(&req.path, &req.content)
            .map_err(to_mcp_error)?;
        text(format::write(&req.path, &outcome))
    }

    #[tool(description = "Delete a note from the vault")]
    fn delete_note(
        &self,
        Parameters(req): Parameters<NotePathRequest>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self.vault.delete_note(&req.path).map_err(to_mcp_error)?;
        text(format::delete(&req.path, &outcome))
    }
}

#[tool_handler]
impl ServerHandler for ObvaultMcpService {
    fn get_info(&self) -> ServerInfo {
        let mode = self.vault.config().mode();
        ServerInfo {
            instructions: Some(format!(
                "Obsidian vault server ({mode}). List, read, search, and inspect frontmatter \
                 of Markdown notes. Notes are also readable as {NOTE_URI_PREFIX}{{path}} resources."
            )),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "obvault".to_string(),
                title: Some("Obsidian Vault".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: None,
                icons: None,
                website_url: None,
            },
            ..Default::default()
        }
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult::with_all_items(vec![
            Self::note_template(),
        ]))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        self.read_note_resource(&request.uri)
    }
}
