//! Follow a board's live event stream from the terminal.
//!
//! Run against a local board service:
//!
//! ```text
//! cargo run --example live_board
//! ```

use taskdeck_client::{
    ApiClient, ClientConfig, ConnectionState, EventStreamClient, SubscribeOptions, TaskEvent,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ClientConfig::default();

    let api = ApiClient::new(&config);
    match api.list_tasks().await {
        Ok(tasks) => {
            for task in &tasks {
                println!("[{}] {} ({})", task.status, task.title, task.id);
            }
        }
        Err(error) => eprintln!("initial task fetch failed: {error}"),
    }

    let client = EventStreamClient::from_config(&config);
    let subscription = client.subscribe(SubscribeOptions {
        on_event: Box::new(|event| match event {
            TaskEvent::TaskCreated(task) => println!("+ {} ({})", task.title, task.id),
            TaskEvent::TaskUpdated(task) => println!("~ {} -> {}", task.id, task.status),
            TaskEvent::TaskDeleted { id } => println!("- {id}"),
            TaskEvent::AgentLog(log) => {
                println!("  [{}] {}: {}", log.parent_id, log.log.kind, log.log.content);
            }
            TaskEvent::Heartbeat => {}
        }),
        on_state_change: Some(Box::new(|state| {
            let label = match state {
                ConnectionState::Connecting => "connecting...",
                ConnectionState::Connected => "live",
                ConnectionState::Disconnected => "disconnected",
            };
            eprintln!("stream: {label}");
        })),
        on_parse_error: None,
    });

    if tokio::signal::ctrl_c().await.is_err() {
        eprintln!("failed to wait for ctrl-c");
    }
    subscription.shutdown().await;
}
