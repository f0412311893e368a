#[tokio::main]
async fn main() {
    if let Err(err) = evolution_tool::mcp::server::run_stdio().await {
        eprintln!("evolution-tool: {}", err);
        std::process::exit(1);
    }
}
