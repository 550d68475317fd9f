//! Record feed demo with a fast and a slow subscriber
//!
//! Run with: cargo run --example ticker [INTERVAL_MS] [SLOW_CAPACITY]
//!
//! Examples:
//!   cargo run --example ticker              # one record every 500ms, slow buffer of 4
//!   cargo run --example ticker 100          # one record every 100ms
//!   cargo run --example ticker 50 2         # 50ms ticks, slow buffer of 2
//!
//! Both subscribers get a queue of SLOW_CAPACITY records. The fast one reads
//! every record as it arrives; the slow one only reads every few seconds, so
//! it starts losing records once its queue fills up. Watch the
//! "Delivery dropped" warnings and the periodic stats line.
//!
//! Set RUST_LOG=recordcast=debug for per-tick logging.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use recordcast::{
    BroadcastConfig, Broadcaster, Coordinator, Producer, ProducerConfig, Record, RecordStore,
};

const NAMES: &[&str] = &[
    "ada", "grace", "linus", "barbara", "ken", "margaret", "dennis", "frances",
];

fn print_usage() {
    eprintln!("Usage: ticker [INTERVAL_MS] [SLOW_CAPACITY]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  INTERVAL_MS     Time between records (default: 500)");
    eprintln!("  SLOW_CAPACITY   Queue size of the slow subscriber (default: 4)");
}

fn parse_arg(arg: Option<&String>, default: u64) -> Result<u64, String> {
    match arg {
        Some(s) => s.parse().map_err(|_| format!("Invalid number: {}", s)),
        None => Ok(default),
    }
}

/// Random `name.NNNN@test.com` users with an md5-sized hex secret
///
/// The key space is small on purpose so duplicate keys show up now and then.
fn user_source() -> impl FnMut() -> Record + Send + 'static {
    || {
        let mut rng = rand::thread_rng();
        let name = NAMES[rng.gen_range(0..NAMES.len())];
        let key = format!("{}.{}@test.com", name, rng.gen_range(1000..10000));

        Record::new(key, format!("{:032x}", rng.gen::<u128>()))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let (interval_ms, slow_capacity) = match (parse_arg(args.get(1), 500), parse_arg(args.get(2), 4)) {
        (Ok(i), Ok(c)) => (i, c as usize),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("recordcast=info".parse()?)
                .add_directive("ticker=info".parse()?),
        )
        .init();

    let store = Arc::new(RecordStore::new());
    let broadcaster = Arc::new(Broadcaster::with_config(
        BroadcastConfig::default().capacity(slow_capacity),
    ));
    let coordinator = Arc::new(Coordinator::new(Arc::clone(&store), broadcaster));

    // Fast reader: drains every record immediately
    let mut fast = coordinator.subscribe().await;
    tokio::spawn(async move {
        while let Some(record) = fast.recv().await {
            println!("[fast] {:?}", record);
        }
        println!("[fast] stream ended");
    });

    // Slow reader: wakes up rarely and takes one record at a time
    let mut slow = coordinator.subscribe().await;
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(3)).await;
            match slow.recv().await {
                Some(record) => println!(
                    "[slow] {} (pending={}, dropped={})",
                    record.key(),
                    slow.pending(),
                    slow.dropped()
                ),
                None => break,
            }
        }
        println!("[slow] stream ended");
    });

    let stats_coordinator = Arc::clone(&coordinator);
    let stats_task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(5));
        loop {
            ticker.tick().await;
            let ticks = stats_coordinator.stats();
            let fanout = stats_coordinator.broadcaster().stats().await;
            println!(
                "Stats: ticks={} published={} rejected={} delivered={} dropped={} ({:.1}%) subscribers={}",
                ticks.ticks,
                ticks.published,
                ticks.rejected,
                fanout.delivered,
                fanout.dropped,
                fanout.drop_ratio() * 100.0,
                fanout.active_subscribers,
            );
        }
    });

    println!("Producing one record every {}ms (Ctrl+C to stop)", interval_ms);
    println!();

    let producer = Producer::new(
        Arc::clone(&coordinator),
        ProducerConfig::default().interval(Duration::from_millis(interval_ms)),
    );

    let ticks = producer
        .run_until(user_source(), async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;

    stats_task.abort();
    coordinator.broadcaster().close().await;

    println!();
    println!("Shutting down after {} ticks, {} records stored", ticks, store.len().await);

    Ok(())
}
