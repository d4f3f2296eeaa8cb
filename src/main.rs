//! plantwatch - client for a Raspberry Pi plant monitor.
//!
//! Polls the monitor's HTTP API on two independent timers (readings and
//! alerts), shapes the raw history into a windowed, downsampled, summarized
//! form, and announces alert transitions exactly once. A small stdin
//! command loop stands in for screen navigation: it selects the sensor and
//! range under inspection and can force an out-of-band refresh.

mod alerts;
mod api;
mod chart;
mod config;
mod domain;
mod filter;
mod poller;
mod state;
mod stats;
mod store;
mod view;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::domain::{Sensor, TimeRange, RANGES};
use crate::poller::{ScheduledTask, Scheduler, SchedulerHandle};
use crate::state::AppState;
use anyhow::Result;
use chrono::Utc;
use log::info;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::RwLock;

/// Task names, used for manual triggers.
const READINGS_TASK: &str = "readings";
const ALERTS_TASK: &str = "alerts";

type SharedState = Arc<RwLock<AppState>>;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load_or_default();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();
    config.log_summary();

    let client = ApiClient::new(config.server.base_url.clone());
    let state: SharedState = Arc::new(RwLock::new(AppState::new()));

    let scheduler = Scheduler::start(vec![
        readings_task(client.clone(), state.clone(), &config),
        alerts_task(client, state.clone(), &config),
    ]);

    println!("plantwatch - commands: home | history | sensor <name> | range <label> | refresh | quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => match line? {
                Some(line) => {
                    if !handle_command(line.trim(), &scheduler, &state, &config).await {
                        break;
                    }
                }
                None => break,
            },
        }
    }

    // Tear down the periodic tasks before the state goes away.
    scheduler.cancel();
    info!("shutting down");
    Ok(())
}

/// Periodic refresh of the latest snapshot and the reading history. The
/// same action serves the manual `refresh` command.
fn readings_task(client: ApiClient, state: SharedState, config: &AppConfig) -> ScheduledTask {
    let interval = Duration::from_secs(config.polling.reading_interval_seconds);
    let config = config.clone();

    ScheduledTask::new(READINGS_TASK, interval, move || {
        let client = client.clone();
        let state = state.clone();
        let config = config.clone();
        async move {
            let latest = client.latest().await;
            let history = client.history(config.history.fetch_hours).await;

            let mut state = state.write().await;
            state.apply_latest(latest);
            state.apply_history(history, Utc::now());
            if config.logging.show_sensor_data {
                print!("{}", view::render_home(&state, &config));
            }
            Ok(())
        }
    })
}

/// Periodic alert poll, independent of the reading refresh.
fn alerts_task(client: ApiClient, state: SharedState, config: &AppConfig) -> ScheduledTask {
    let interval = Duration::from_secs(config.polling.alert_interval_seconds);

    ScheduledTask::new(ALERTS_TASK, interval, move || {
        let client = client.clone();
        let state = state.clone();
        async move {
            let result = client.check_alerts().await;
            let notification = state.write().await.apply_alerts(result);
            if let Some(message) = notification {
                println!("{}", view::notification_line(&message));
            }
            Ok(())
        }
    })
}

/// Handle one command line; returns false when the loop should exit.
async fn handle_command(
    line: &str,
    scheduler: &SchedulerHandle,
    state: &SharedState,
    config: &AppConfig,
) -> bool {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("quit"), _) | (Some("q"), _) => return false,
        (None, _) => {}
        (Some("home"), _) => {
            let state = state.read().await;
            print!("{}", view::render_home(&state, config));
        }
        (Some("history"), _) => {
            print!("{}", view::render_history(&*state.read().await));
        }
        (Some("sensor"), Some(name)) => {
            let mut state = state.write().await;
            state.selected_sensor = Sensor::from_name(name);
            print!("{}", view::render_history(&state));
        }
        (Some("sensor"), None) => println!("sensors: {}", view::sensor_names()),
        (Some("range"), Some(label)) => match TimeRange::from_label(label) {
            Some(range) => {
                let mut state = state.write().await;
                state.select_range(range, Utc::now());
                print!("{}", view::render_history(&state));
            }
            None => println!(
                "unknown range, expected one of: {}",
                RANGES
                    .iter()
                    .map(|r| r.label)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        },
        (Some("range"), None) => println!(
            "ranges: {}",
            RANGES
                .iter()
                .map(|r| r.label)
                .collect::<Vec<_>>()
                .join(", ")
        ),
        (Some("refresh"), _) => {
            scheduler.trigger(READINGS_TASK);
            println!("refreshing...");
        }
        (Some(other), _) => println!("unknown command: {other}"),
    }
    true
}
