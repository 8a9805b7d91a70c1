//! Empire summary demo.
//!
//! Logs in, prints the empire and each planet's production, logs out.
//!
//! ```text
//! ANTARIA_EMPIRE=... ANTARIA_PASSWORD=... ANTARIA_API_KEY=... \
//!     cargo run -p empire-status
//! ```
//!
//! `ANTARIA_SERVER` overrides the default server; `RUST_LOG=debug` shows
//! every request.

use antaria::prelude::*;
use tracing_subscriber::EnvFilter;

fn env(name: &str) -> Result<String, AntariaError> {
    std::env::var(name).map_err(|_| AntariaError::Config(format!("{name} is not set")))
}

#[tokio::main]
async fn main() -> Result<(), AntariaError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut builder = Antaria::builder()
        .empire(env("ANTARIA_EMPIRE")?, env("ANTARIA_PASSWORD")?)
        .api_key(env("ANTARIA_API_KEY")?)
        .request_timeout_secs(Some(30));
    if let Ok(server) = std::env::var("ANTARIA_SERVER") {
        builder = builder.server(server);
    }
    let mut session = builder.build()?;

    if !session.login().await? {
        tracing::error!("login returned no session");
        return Ok(());
    }

    let summary = print_summary(&mut session).await;
    let logout = session.logout().await.map_err(AntariaError::from);
    outcome(summary, logout)
}

/// The summary's error wins; a failed logout is only logged.
fn outcome(
    summary: Result<(), AntariaError>,
    logout: Result<(), AntariaError>,
) -> Result<(), AntariaError> {
    if let Err(e) = logout {
        tracing::warn!(error = %e, "logout failed");
    }
    summary
}

async fn print_summary(session: &mut Session<antaria::HttpTransport>) -> Result<(), AntariaError> {
    let empire = Empire::new();
    println!(
        "{} (#{})  essentia {:.1}",
        empire.name(session).await?,
        empire.id(session).await?,
        empire.essentia(session).await?
    );
    let message = empire.status_message(session).await?;
    if !message.is_empty() {
        println!("  \"{message}\"");
    }
    if empire.has_new_messages(session).await? {
        println!("  you have new messages");
    }

    let home = empire.home_planet(session).await?;
    for body in empire.bodies(session).await? {
        let marker = if body == home { " (home)" } else { "" };
        let rates = body.resource_rates(session).await?;
        println!(
            "\n{}{} orbit {} size {}",
            body.name(session).await?,
            marker,
            body.orbit(session).await?,
            body.size(session).await?
        );
        println!(
            "  per hour: ore {} food {} water {} energy {} waste {}",
            rates.ore, rates.food, rates.water, rates.energy, rates.waste
        );
    }
    Ok(())
}
