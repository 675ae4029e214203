//! Neospan MCP server binary.
//!
//! Wires the Cypher and retrieval tool registries over a Bolt
//! connection pool and serves them through stdio or streamable HTTP.
//! Every flag falls back to an environment variable, so the binary
//! runs unconfigured inside MCP client manifests.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use neospan_core::{GraphExecutor, Retriever};
use neospan_mcp::{CompositeRegistry, HealthTools, NeospanMcpServer, ServerConfig, ToolRegistry};
use neospan_mcp_cypher::{CypherTools, ShapingConfig};
use neospan_mcp_vector::VectorTools;
use neospan_neo4j::{FulltextRetriever, Neo4jExecutor, Neo4jSettings};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Transport {
    /// Serve over stdin/stdout.
    Stdio,
    /// Serve over streamable HTTP.
    Http,
}

/// Neo4j MCP server with query safety and result shaping.
#[derive(Parser, Debug)]
#[command(name = "neospan-server", version, about, long_about = None)]
struct Args {
    /// Bolt URI of the Neo4j instance.
    #[arg(long, env = "NEO4J_URI", default_value = "bolt://localhost:7687")]
    db_url: String,

    /// Neo4j user.
    #[arg(long, env = "NEO4J_USERNAME", default_value = "neo4j")]
    username: String,

    /// Neo4j password.
    #[arg(long, env = "NEO4J_PASSWORD", default_value = "password")]
    password: String,

    /// Target database.
    #[arg(long, env = "NEO4J_DATABASE", default_value = "neo4j")]
    database: String,

    /// Tool namespace prefix; empty disables prefixing.
    #[arg(long, env = "NEO4J_NAMESPACE", default_value = "")]
    namespace: String,

    /// Transport to serve on.
    #[arg(long, env = "NEO4J_TRANSPORT", value_enum, default_value = "stdio")]
    transport: Transport,

    /// Bind host for the HTTP transport.
    #[arg(long, env = "NEO4J_MCP_SERVER_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Bind port for the HTTP transport.
    #[arg(long, env = "NEO4J_MCP_SERVER_PORT", default_value_t = 8000)]
    port: u16,

    /// URL path for the HTTP transport.
    #[arg(long, env = "NEO4J_MCP_SERVER_PATH", default_value = "/mcp")]
    path: String,

    /// Per-query timeout in seconds.
    #[arg(long, env = "NEO4J_QUERY_TIMEOUT", default_value_t = 10.0)]
    query_timeout: f64,

    /// Result lists of this length or more are elided.
    #[arg(long, env = "NEO4J_LIST_SIZE_LIMIT", default_value_t = neospan_guard::DEFAULT_LIST_SIZE_LIMIT)]
    list_size_limit: usize,

    /// Token budget for serialized read results.
    #[arg(long, env = "NEO4J_TOKEN_LIMIT", default_value_t = neospan_guard::DEFAULT_TOKEN_LIMIT)]
    token_limit: usize,

    /// Tokenizer model the budget is measured in.
    #[arg(long, env = "NEO4J_TOKEN_MODEL", default_value = neospan_guard::DEFAULT_MODEL)]
    token_model: String,

    /// Fulltext index backing the vector tool; unset disables it.
    #[arg(long, env = "NEO4J_FULLTEXT_INDEX")]
    fulltext_index: Option<String>,

    /// Node property holding document text for the vector tool.
    #[arg(long, env = "NEO4J_FULLTEXT_PROPERTY", default_value = "text")]
    fulltext_property: String,
}

fn build_server(args: &Args, executor: Arc<dyn GraphExecutor>) -> NeospanMcpServer {
    let timeout = Duration::from_secs_f64(args.query_timeout);

    let shaping = ShapingConfig {
        list_size_limit: args.list_size_limit,
        token_limit: args.token_limit,
        model: args.token_model.clone(),
    };

    let cypher = CypherTools::with_shared(Arc::clone(&executor), timeout).with_shaping(shaping);

    let mut registry = CompositeRegistry::new();
    let mut tool_count = cypher.tool_count();
    registry = registry.add(cypher);

    if let Some(index) = &args.fulltext_index {
        let retriever = FulltextRetriever::new(
            Arc::clone(&executor),
            index.clone(),
            args.fulltext_property.clone(),
            timeout,
        );
        let vector = VectorTools::with_shared(Arc::new(retriever) as Arc<dyn Retriever>);
        tool_count += vector.tool_count();
        registry = registry.add(vector);
    }

    registry = registry.add(HealthTools::new(
        "neospan-server",
        env!("CARGO_PKG_VERSION"),
        args.database.clone(),
        tool_count + 1,
    ));

    let config = ServerConfig {
        name: "neospan-server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        instructions: None,
        namespace: args.namespace.clone(),
    };

    NeospanMcpServer::with_config(registry, config)
}

async fn serve_stdio(server: NeospanMcpServer) -> Result<()> {
    tracing::info!("serving on stdio transport");
    let service = server
        .serve(stdio())
        .await
        .context("failed to start stdio transport")?;
    service.waiting().await?;
    Ok(())
}

async fn serve_http(server: NeospanMcpServer, host: &str, port: u16, path: &str) -> Result<()> {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    let router = axum::Router::new().nest_service(path, service);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, path, "serving on http transport");
    axum::serve(listener, router).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout belongs to the stdio transport.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!(
        db_url = %args.db_url,
        database = %args.database,
        transport = ?args.transport,
        "starting neospan server"
    );

    let executor = Neo4jExecutor::connect(&Neo4jSettings {
        uri: args.db_url.clone(),
        username: args.username.clone(),
        password: args.password.clone(),
        database: args.database.clone(),
    })
    .context("failed to configure Neo4j connection")?;

    let server = build_server(&args, Arc::new(executor));

    match args.transport {
        Transport::Stdio => serve_stdio(server).await,
        Transport::Http => serve_http(server, &args.host, args.port, &args.path).await,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["neospan-server"]).unwrap();
        assert_eq!(args.db_url, "bolt://localhost:7687");
        assert_eq!(args.username, "neo4j");
        assert_eq!(args.database, "neo4j");
        assert_eq!(args.transport, Transport::Stdio);
        assert_eq!(args.port, 8000);
        assert_eq!(args.path, "/mcp");
        assert_eq!(args.query_timeout, 10.0);
        assert_eq!(args.list_size_limit, 52);
        assert_eq!(args.token_limit, 2048);
        assert_eq!(args.token_model, "gpt-4");
        assert!(args.fulltext_index.is_none());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::try_parse_from([
            "neospan-server",
            "--transport",
            "http",
            "--port",
            "9000",
            "--namespace",
            "movies",
            "--query-timeout",
            "2.5",
            "--fulltext-index",
            "movieFulltext",
        ])
        .unwrap();
        assert_eq!(args.transport, Transport::Http);
        assert_eq!(args.port, 9000);
        assert_eq!(args.namespace, "movies");
        assert_eq!(args.query_timeout, 2.5);
        assert_eq!(args.fulltext_index.as_deref(), Some("movieFulltext"));
    }

    #[test]
    fn test_invalid_transport_rejected() {
        let result = Args::try_parse_from(["neospan-server", "--transport", "sse"]);
        assert!(result.is_err());
    }
}
