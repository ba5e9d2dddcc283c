// ABOUTME: JSON API tool performing outbound HTTP requests on behalf of the caller
// ABOUTME: Returns status, headers and the body parsed as JSON when possible, text otherwise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # JSON API Tool
//!
//! Transport failures (DNS, refused connection, timeout) are reported in the
//! result with `success: false` and `status_code: null`; only malformed
//! arguments are errors.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, Method};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use url::Url;

use crate::config::HttpToolConfig;
use crate::constants::tools;
use crate::errors::{AppError, AppResult, ToolError};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

const METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

#[derive(Debug, Deserialize)]
struct JsonApiArgs {
    endpoint: String,
    #[serde(default = "default_method")]
    method: String,
    #[serde(default)]
    headers: HashMap<String, String>,
    #[serde(default)]
    params: BTreeMap<String, String>,
    json: Option<Value>,
}

fn default_method() -> String {
    "GET".to_owned()
}

/// Tool for making HTTP requests to external APIs
#[derive(Debug, Clone)]
pub struct JsonApiTool {
    client: Client,
}

impl JsonApiTool {
    /// Create the tool with a client honoring the configured timeout
    ///
    /// # Errors
    ///
    /// Returns `ExecutionFailed` if the HTTP client cannot be built
    pub fn new(config: &HttpToolConfig) -> Result<Self, ToolError> {
        let client = ClientBuilder::new()
            .timeout(config.request_timeout)
            .redirect(Policy::limited(10))
            .build()
            .map_err(|e| {
                ToolError::execution_failed(
                    tools::JSON_API,
                    format!("Failed to build HTTP client: {e}"),
                )
            })?;
        Ok(Self { client })
    }

    fn parse_endpoint(endpoint: &str) -> AppResult<Url> {
        let url = Url::parse(endpoint)
            .map_err(|e| AppError::invalid_input(format!("Invalid endpoint URL '{endpoint}': {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(AppError::invalid_input(format!(
                "Unsupported URL scheme '{other}', expected http or https"
            ))),
        }
    }

    fn parse_method(method: &str) -> AppResult<Method> {
        let upper = method.to_ascii_uppercase();
        if !METHODS.contains(&upper.as_str()) {
            return Err(AppError::invalid_input(format!(
                "Unsupported HTTP method '{method}'"
            )));
        }
        Method::from_bytes(upper.as_bytes())
            .map_err(|e| AppError::invalid_input(format!("Invalid HTTP method '{method}': {e}")))
    }

    fn headers_to_json(headers: &HeaderMap) -> Value {
        let mut map: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in headers {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            map.entry(name.as_str().to_owned())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }
        json!(map)
    }
}

#[async_trait]
impl McpTool for JsonApiTool {
    fn name(&self) -> &'static str {
        tools::JSON_API
    }

    fn description(&self) -> &'static str {
        "Make HTTP requests to external APIs and return JSON responses"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = BTreeMap::new();
        properties.insert(
            "endpoint".to_owned(),
            PropertySchema::typed("string", "URL to send the request to").with_min_length(1),
        );
        properties.insert(
            "method".to_owned(),
            PropertySchema::typed("string", "HTTP method (GET, POST, PUT, etc.)")
                .with_default(json!("GET")),
        );
        properties.insert(
            "headers".to_owned(),
            PropertySchema::typed("object", "Optional HTTP headers"),
        );
        properties.insert(
            "params".to_owned(),
            PropertySchema::typed("object", "Optional URL query parameters"),
        );
        properties.insert(
            "json".to_owned(),
            PropertySchema::any("Optional JSON body for the request"),
        );
        JsonSchema::object(properties, &["endpoint"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::NETWORK_ACCESS
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult> {
        let args: JsonApiArgs = serde_json::from_value(args)
            .map_err(|e| AppError::invalid_input(format!("Invalid jsonapi arguments: {e}")))?;
        let url = Self::parse_endpoint(&args.endpoint)?;
        let method = Self::parse_method(&args.method)?;

        info!(
            request_id = %context.request_id,
            %method,
            host = url.host_str().unwrap_or_default(),
            "Outbound API request"
        );

        let mut request = self.client.request(method, url);
        for (name, value) in &args.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !args.params.is_empty() {
            request = request.query(&args.params);
        }
        if let Some(body) = &args.json {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "Outbound request failed");
                return Ok(ToolResult::ok(json!({
                    "status_code": null,
                    "success": false,
                    "error": format!("Request error: {e}"),
                    "data": null,
                })));
            }
        };

        let status = response.status();
        let headers = Self::headers_to_json(response.headers());
        let data = match response.bytes().await {
            Ok(body) => serde_json::from_slice::<Value>(&body)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned())),
            Err(e) => {
                return Ok(ToolResult::ok(json!({
                    "status_code": status.as_u16(),
                    "success": false,
                    "headers": headers,
                    "error": format!("Response read error: {e}"),
                    "data": null,
                })));
            }
        };

        Ok(ToolResult::ok(json!({
            "status_code": status.as_u16(),
            "success": status.is_success(),
            "headers": headers,
            "data": data,
        })))
    }
}
