/*!
 * Partsim - Demo Driver
 *
 * Seeds a small fixed-partition pool, submits a batch of processes, and
 * runs the real-time clock until everything terminates, dumping the block
 * and process tables periodically.
 */

use anyhow::Result;
use partsim::Simulator;
use std::time::Duration;
use tracing::info;

fn init_logging() {
    // Library modules log via `log`; the binary's own events via `tracing`
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    info!("Partsim starting...");
    info!("================================================");

    let simulator = Simulator::builder()
        .with_tick_interval(Duration::from_millis(500))
        .with_ticks_per_interval(1)
        .build();

    info!("Seeding memory pool...");
    for capacity in [8, 4, 6, 10] {
        simulator.create_block(capacity)?;
    }

    info!("Submitting processes...");
    let batch: [(&str, u64, u64); 5] = [
        ("editor", 6, 8),
        ("compiler", 4, 5),
        ("browser", 5, 12),
        ("indexer", 9, 6),
        ("daemon", 3, 20),
    ];
    for (name, size, runtime) in batch {
        let (pid, placement) = simulator.submit_process(name, size, runtime)?;
        info!(pid, name, ?placement, "submitted");
    }
    let total = simulator.processes().len();

    info!("Starting clock; press Ctrl+C to stop early");
    simulator.start();

    let mut report = tokio::time::interval(Duration::from_secs(2));
    loop {
        tokio::select! {
            _ = report.tick() => {
                let stats = simulator.stats();
                info!(
                    "tick {} | {}/{} units occupied | running {} waiting {} swapped {} terminated {}",
                    stats.ticks_elapsed,
                    stats.occupied_capacity,
                    stats.total_capacity,
                    stats.running_processes,
                    stats.waiting_processes,
                    stats.swapped_processes,
                    stats.terminated_processes,
                );

                let tables = serde_json::json!({
                    "blocks": simulator.blocks(),
                    "processes": simulator.processes(),
                });
                println!("{}", serde_json::to_string_pretty(&tables)?);

                if stats.terminated_processes == total {
                    info!("All processes terminated");
                    break;
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    simulator.stop();
    simulator.shutdown().await;
    info!("Simulator stopped");
    Ok(())
}
