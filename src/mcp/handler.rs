//! MCP server handler: tool router, prompt surface and `tips://` resources.

use std::future::Future;
use std::sync::Arc;

use rmcp::handler::server::{
    tool::{ToolCallContext, ToolRoute, ToolRouter},
    ServerHandler,
};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, GetPromptRequestParam, GetPromptResult, Implementation,
    JsonObject, ListPromptsResult, ListResourceTemplatesResult, ListResourcesResult,
    ListToolsResult, PaginatedRequestParam, Prompt, PromptArgument, PromptMessage,
    PromptMessageRole, ReadResourceRequestParam, ReadResourceResult, ServerCapabilities,
    ServerInfo, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use serde_json::{json, Value};
use tracing::{info_span, warn};

use crate::catalog::SharedCatalog;
use crate::config::ServerConfig;
use crate::content::Role;
use crate::mcp::resources::tips as tips_resource;
use crate::mcp::tools::{greeting, time, tips};
use crate::prompts::{CallArguments, CompiledPrompt, RenderedPrompt};
use crate::AppError;

/// MCP server over the shared content catalog.
///
/// Cloned once per HTTP session; clones share the same catalog handle.
#[derive(Debug, Clone)]
pub struct ContentServer {
    catalog: SharedCatalog,
    config: Arc<ServerConfig>,
}

impl ContentServer {
    /// Create a server serving `catalog`.
    #[must_use]
    pub fn new(catalog: SharedCatalog, config: Arc<ServerConfig>) -> Self {
        Self { catalog, config }
    }

    /// Shared catalog handle.
    #[must_use]
    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    /// Server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    fn tool_router() -> ToolRouter<Self> {
        let mut router = ToolRouter::new();

        for tool in Self::all_tools() {
            let name = tool.name.to_string();
            match name.as_str() {
                "get_current_time" => {
                    router.add_route(ToolRoute::new_dyn(tool, |context| {
                        Box::pin(time::handle_current_time(context))
                    }));
                }
                "calculate_days_until_date" => {
                    router.add_route(ToolRoute::new_dyn(tool, |context| {
                        Box::pin(time::handle_days_until(context))
                    }));
                }
                "generate_greeting" => {
                    router.add_route(ToolRoute::new_dyn(tool, |context| {
                        Box::pin(greeting::handle(context))
                    }));
                }
                "get_learning_tips" => {
                    router.add_route(ToolRoute::new_dyn(tool, |context| {
                        Box::pin(tips::handle_learning_tips(context))
                    }));
                }
                "list_tip_categories" => {
                    router.add_route(ToolRoute::new_dyn(tool, |context| {
                        Box::pin(tips::handle_categories(context))
                    }));
                }
                _ => {
                    router.add_route(ToolRoute::new_dyn(tool, |_context| {
                        Box::pin(async {
                            Err(rmcp::ErrorData::internal_error(
                                "tool not implemented",
                                None,
                            ))
                        })
                    }));
                }
            }
        }

        router
    }

    /// Convert a `serde_json::Value::Object` into the `Arc<Map>` expected by `Tool`.
    fn schema(value: Value) -> Arc<JsonObject> {
        match value {
            Value::Object(map) => Arc::new(map),
            _ => Arc::new(JsonObject::default()),
        }
    }

    /// Every tool the server exposes, in listing order.
    #[must_use]
    pub fn all_tools() -> Vec<Tool> {
        vec![
            Tool::new(
                "get_current_time",
                "Get the current local date and time as YYYY-MM-DD HH:MM:SS.",
                Self::schema(json!({ "type": "object", "properties": {} })),
            ),
            Tool::new(
                "calculate_days_until_date",
                "Calculate the number of days between today and a target date.",
                Self::schema(json!({
                    "type": "object",
                    "properties": {
                        "target_date": { "type": "string", "description": "Target date in YYYY-MM-DD format" }
                    },
                    "required": ["target_date"]
                })),
            ),
            Tool::new(
                "generate_greeting",
                "Generate a personalized greeting message.",
                Self::schema(json!({
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "description": "The name of the person to greet" }
                    }
                })),
            ),
            Tool::new(
                "get_learning_tips",
                "Get learning tips for a category, or for the default category when none is given.",
                Self::schema(json!({
                    "type": "object",
                    "properties": {
                        "category": { "type": "string" }
                    }
                })),
            ),
            Tool::new(
                "list_tip_categories",
                "List the available tip categories.",
                Self::schema(json!({ "type": "object", "properties": {} })),
            ),
        ]
    }

    /// Prompt listing for the current catalog, in registration order.
    #[must_use]
    pub fn prompt_list(&self) -> Vec<Prompt> {
        let catalog = self.catalog.snapshot();
        catalog.prompts().iter().map(describe_prompt).collect()
    }

    /// Render the prompt `name` with the supplied arguments.
    ///
    /// # Errors
    ///
    /// Returns `invalid_params` for unknown prompts and argument errors.
    pub fn render_prompt(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<GetPromptResult, rmcp::ErrorData> {
        let catalog = self.catalog.snapshot();
        let prompt = catalog.prompts().get(name).ok_or_else(|| {
            rmcp::ErrorData::invalid_params(format!("unknown prompt: {name}"), None)
        })?;

        let messages = prompt
            .call(&caller_arguments(arguments))
            .map_err(|err| to_error_data(&AppError::Prompt(err)))?;

        Ok(GetPromptResult {
            description: Some(prompt.description().to_owned()),
            messages: messages.into_iter().map(to_prompt_message).collect(),
        })
    }

    /// Read a `tips://` resource from the current catalog.
    ///
    /// # Errors
    ///
    /// Returns `resource_not_found` for URIs the server does not serve.
    pub fn read_tips(
        &self,
        request: &ReadResourceRequestParam,
    ) -> Result<ReadResourceResult, rmcp::ErrorData> {
        let catalog = self.catalog.snapshot();
        tips_resource::read_resource(request, catalog.store()).map_err(|err| to_error_data(&err))
    }
}

fn describe_prompt(prompt: &CompiledPrompt) -> Prompt {
    let arguments = prompt
        .arguments()
        .iter()
        .map(|spec| PromptArgument {
            name: spec.name.clone(),
            title: None,
            description: Some(spec.description.clone()),
            required: Some(spec.required),
        })
        .collect();
    Prompt::new(
        prompt.external_name(),
        Some(prompt.description()),
        Some(arguments),
    )
}

/// Normalize MCP prompt arguments: numbers and booleans become their text.
fn caller_arguments(arguments: Option<JsonObject>) -> CallArguments {
    arguments
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Number(number) => Value::String(number.to_string()),
                Value::Bool(flag) => Value::String(flag.to_string()),
                other => other,
            };
            (key, value)
        })
        .collect()
}

fn to_prompt_message(message: RenderedPrompt) -> PromptMessage {
    // MCP prompt messages carry only user and assistant roles.
    let role = match message.role {
        Role::Assistant => PromptMessageRole::Assistant,
        Role::User | Role::System => PromptMessageRole::User,
    };
    PromptMessage::new_text(role, message.content)
}

/// Map an application error onto the MCP error envelope.
#[must_use]
pub fn to_error_data(err: &AppError) -> rmcp::ErrorData {
    match err {
        AppError::Prompt(_) => rmcp::ErrorData::invalid_params(err.to_string(), None),
        AppError::NotFound(_) => rmcp::ErrorData::resource_not_found(err.to_string(), None),
        _ => rmcp::ErrorData::internal_error(err.to_string(), None),
    }
}

impl ServerHandler for ContentServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.config.server_name.clone(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: self.config.instructions.clone(),
            ..Default::default()
        }
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, rmcp::ErrorData>> + Send + '_ {
        let router = Self::tool_router();
        let _span = info_span!("call_tool", tool = %request.name).entered();

        async move {
            router
                .call(ToolCallContext::new(self, request, context))
                .await
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, rmcp::ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult::with_all_items(Self::all_tools())))
    }

    fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListPromptsResult, rmcp::ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListPromptsResult::with_all_items(self.prompt_list())))
    }

    fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<GetPromptResult, rmcp::ErrorData>> + Send + '_ {
        let _span = info_span!("get_prompt", prompt = %request.name).entered();
        let result = self.render_prompt(&request.name, request.arguments);
        if let Err(err) = &result {
            warn!(prompt = %request.name, error = %err.message, "prompt call rejected");
        }
        std::future::ready(result)
    }

    fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListResourcesResult, rmcp::ErrorData>> + Send + '_ {
        let catalog = self.catalog.snapshot();
        std::future::ready(Ok(tips_resource::list_resources(catalog.store())))
    }

    fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListResourceTemplatesResult, rmcp::ErrorData>> + Send + '_
    {
        std::future::ready(Ok(tips_resource::resource_templates()))
    }

    fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ReadResourceResult, rmcp::ErrorData>> + Send + '_ {
        std::future::ready(self.read_tips(&request))
    }
}
