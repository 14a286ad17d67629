use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,routedoc=debug")),
        )
        .init();

    let app = example_auth::app();

    app.validate()?;
    app.write_schema_to("openapi.yaml")?;
    app.write_schema_to("openapi.json")?;

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    tracing::info!("Open http://localhost:3000/docs to view the OpenAPI documentation");
    axum::serve(listener, app.into_router()).await?;
    Ok(())
}
