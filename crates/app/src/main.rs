use chrono::Utc;
use engine::Ledger;

mod seed;
mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "leadspace={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let Some(server) = settings.server else {
        tracing::error!("no [server] section in settings, nothing to run");
        return Ok(());
    };

    let ledger = Ledger::new(
        settings.account.balance_minor,
        settings.account.daily_budget_minor,
        settings.account.weekly_budget_minor,
        Utc::now().date_naive(),
    );
    let mut builder = engine::Engine::builder().ledger(ledger);
    if settings.demo.seed {
        tracing::info!("Seeding demo inventory...");
        builder = builder.inventory(seed::inventory());
    }
    let engine = builder.build();

    let bind = server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    server::run_with_listener(engine, listener).await?;
    Ok(())
}
