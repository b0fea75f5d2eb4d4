//! MCP server exposing suggestions and catalog browsing as tools.

use crate::state::SuggestState;
use crate::tools::catalog::{GetRequest, ListRequest, handle_get, handle_list};
use crate::tools::refresh::handle_refresh;
use crate::tools::suggest::{SuggestRequest, handle_suggest};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server for Pokémon name suggestions
#[derive(Clone)]
pub struct SuggestServer {
    /// Store, engine and request defaults
    state: Arc<SuggestState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for SuggestServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl SuggestServer {
    pub fn new(state: Arc<SuggestState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    pub fn state(&self) -> &Arc<SuggestState> {
        &self.state
    }

    #[tool(
        description = "Suggest Pokémon names for a partial, possibly misspelled query. Results are ranked by prefix, substring and typo-tolerant matches plus popularity; optional type and ability filters boost matching Pokémon."
    )]
    async fn suggest(
        &self,
        Parameters(request): Parameters<SuggestRequest>,
    ) -> std::result::Result<String, String> {
        handle_suggest(&self.state, request).await
    }

    #[tool(description = "List Pokémon page by page, optionally filtered by type and ability.")]
    async fn list_pokemon(
        &self,
        Parameters(request): Parameters<ListRequest>,
    ) -> std::result::Result<String, String> {
        handle_list(&self.state, request).await
    }

    #[tool(description = "Get one Pokémon by id. Each lookup counts towards its popularity.")]
    async fn get_pokemon(
        &self,
        Parameters(request): Parameters<GetRequest>,
    ) -> std::result::Result<String, String> {
        handle_get(&self.state, request).await
    }

    #[tool(
        description = "Reload the catalog file and rebuild the suggestion index so new entries and popularity changes are ranked."
    )]
    async fn refresh_catalog(&self) -> std::result::Result<String, String> {
        handle_refresh(&self.state).await
    }
}

#[tool_handler]
impl ServerHandler for SuggestServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "poke-suggest: autocomplete for Pokémon names. \
                 Use suggest with at least 2 characters of a name; \
                 list_pokemon and get_pokemon browse the catalog."
                    .to_string(),
            )
    }
}
