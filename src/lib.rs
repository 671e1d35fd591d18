//! Bookshelf application library
//!
//! Wires the application modules to the kernel, store, and HTTP crates.

pub mod modules;

use std::sync::Arc;

use anyhow::Context;

use bookshelf_kernel::settings::Settings;
use bookshelf_kernel::{InitCtx, ModuleRegistry};

use modules::books::store::{DocumentStore, MemoryBookStore};

/// Full application bootstrap: telemetry, settings, store, module lifecycle,
/// HTTP server. Returns after the server shuts down and modules are stopped.
pub async fn run() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;

    bookshelf_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        "bookshelf bootstrap starting"
    );

    let store: Arc<dyn DocumentStore> = Arc::new(MemoryBookStore::new());

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    bookshelf_http::start_server(&registry, &settings).await?;

    registry.stop_all().await?;

    tracing::info!("bookshelf shutdown complete");
    Ok(())
}
