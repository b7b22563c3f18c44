//! # Example: priorities, once, wildcard, failures and async emits
//!
//! Demonstrates:
//! - Listener priorities and registration order
//! - `once` listeners
//! - Wildcard tracing via `LogWriter`
//! - Failure isolation and the `"error"` channel
//! - FIFO `emit_async`
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example bus --features logging
//! ```

use std::sync::Arc;

use eventbus::{
    args, Args, EventBus, ListenOptions, Listener, ListenerError, LogWriter, ERROR_EVENT,
};

struct Account {
    owner: &'static str,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let bus = EventBus::default();
    LogWriter::attach(&bus)?;

    bus.on(
        ERROR_EVENT,
        Listener::infallible(|em| {
            if let Some(failure) = em.failure() {
                println!("[error] {failure}");
            }
        }),
    )?;

    let audit = Listener::infallible(|em| {
        let amount = em.arg::<u64>(0).copied().unwrap_or_default();
        println!("[audit] deposit of {amount}");
    })
    .named("audit");

    bus.on_with(
        "deposit",
        Listener::infallible(|em| {
            let owner = em.context::<Account>().map_or("?", |a| a.owner);
            println!("[ledger] credit {owner}");
        })
        .named("ledger"),
        ListenOptions::with_priority(10).context(Arc::new(Account { owner: "alice" })),
    )?
    .on("deposit", audit.clone())?
    .on(
        "deposit",
        Listener::new(|em| {
            let amount = em.arg::<u64>(0).copied().unwrap_or_default();
            if amount > 1_000 {
                return Err(ListenerError::fail(format!("limit exceeded: {amount}")));
            }
            Ok(())
        })
        .named("limits"),
    )?
    .once(
        "deposit",
        Listener::infallible(|_| println!("[welcome] first deposit!")),
    )?;

    bus.emit("deposit", args![250_u64])?;
    bus.emit("deposit", args![5_000_u64])?;

    bus.off("deposit", &audit);
    println!("deposit listeners: {}", bus.listener_count("deposit"));

    let a = bus.emit_async("deposit", args![10_u64]);
    let b = bus.emit_async("deposit", args![20_u64]);
    a.await?;
    b.await?;

    bus.remove_all_listeners(None);
    bus.emit("deposit", Args::new())?;
    println!("events left: {:?}", bus.event_names());

    Ok(())
}
