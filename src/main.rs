use std::sync::Arc;

use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use customer_codes::config::Config;
use customer_codes::domain::{BusinessId, CustomerId};
use customer_codes::{derive_code, metrics, CodeResolver, ScyllaDirectory};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,customer_codes=debug")),
        )
        .init();

    tracing::info!("🚀 Starting customer code service demo");

    let config = Config::load();

    // === 1. Create ScyllaDB session and schema ===
    tracing::info!(node = %config.scylla_node, "Connecting to ScyllaDB...");
    let session: Session = SessionBuilder::new()
        .known_node(&config.scylla_node)
        .build()
        .await?;

    session
        .query_unpaged(
            format!(
                "CREATE KEYSPACE IF NOT EXISTS {} WITH REPLICATION = \
                 {{'class': 'SimpleStrategy', 'replication_factor': 1}}",
                config.keyspace
            ),
            &[],
        )
        .await?;
    session.use_keyspace(&config.keyspace, false).await?;

    ScyllaDirectory::ensure_schema(&session).await?;
    let session = Arc::new(session);

    // === 2. Start metrics endpoint ===
    let service_metrics = Arc::new(metrics::Metrics::new()?);
    let registry = Arc::new(service_metrics.registry().clone());
    let metrics_port = config.metrics_port;
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("metrics runtime");
        rt.block_on(async {
            if let Err(e) = metrics::start_metrics_server(registry, metrics_port).await {
                tracing::error!("Metrics server error: {}", e);
            }
        });
    });

    // === 3. Seed demo accounts and one enrollment ===
    let alice_id = uuid::Uuid::new_v4().to_string();
    let bob_id = uuid::Uuid::new_v4().to_string();

    session
        .query_unpaged(
            "INSERT INTO accounts (account_id, display_name, role) VALUES (?, ?, 'customer')",
            (alice_id.as_str(), "Alice"),
        )
        .await?;
    session
        .query_unpaged(
            "INSERT INTO accounts (account_id, display_name, role) VALUES (?, ?, 'customer')",
            (bob_id.as_str(), "Bob"),
        )
        .await?;
    session
        .query_unpaged(
            "INSERT INTO enrollments (customer_id, business_id, enrolled_at) VALUES (?, ?, ?)",
            (alice_id.as_str(), "cafe-demo", chrono::Utc::now()),
        )
        .await?;

    // === 4. Walk the lookup lifecycle ===
    let directory = Arc::new(ScyllaDirectory::new(session.clone()));
    let resolver = CodeResolver::with_metrics(directory, service_metrics.clone());

    let code = derive_code(&alice_id);
    tracing::info!(customer_id = %alice_id, code = %code, "🎫 Derived customer code");

    let cafe = BusinessId::new("cafe-demo");
    let outcome = resolver.resolve_customer_by_code(code.as_str(), &cafe).await?;
    tracing::info!(?outcome, "✅ Lookup at the enrolled business");

    let bakery = BusinessId::new("bakery-demo");
    let outcome = resolver.resolve_customer_by_code(code.as_str(), &bakery).await?;
    tracing::info!(?outcome, "Lookup at a business without enrollment");

    let enrolled = resolver
        .is_customer_enrolled(&CustomerId::new(alice_id.clone()), &cafe)
        .await;
    tracing::info!(enrolled, "Standalone enrollment check");

    tracing::info!("🎉 Demo complete");

    Ok(())
}
