// SPDX-License-Identifier: MIT

//! `log [service]`: subscribes to `output` notifications forever. With no filter, every
//! service's output is printed prefixed with its name in brackets; with a filter, only that
//! service's output is printed, matching the upstream `nsctl.cpp`'s two distinct formats.

use nsgod_wire::events::OutputEvent;

use crate::client::RpcClient;
use crate::error::ClientError;

pub async fn run(client: &mut RpcClient, service: Option<String>) -> Result<(), ClientError> {
    loop {
        let notification = client.next_notification().await?;
        if notification.event != "output" {
            continue;
        }
        let Ok(event) = serde_json::from_value::<OutputEvent>(notification.data) else { continue };

        if let Some(line) = format_line(&service, &event) {
            println!("{line}");
        }
    }
}

fn format_line(filter: &Option<String>, event: &OutputEvent) -> Option<String> {
    match filter {
        Some(name) if *name == event.service => Some(format!("{}: {}", event.service, event.data)),
        Some(_) => None,
        None => Some(format!("[{}]{}", event.service, event.data)),
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
