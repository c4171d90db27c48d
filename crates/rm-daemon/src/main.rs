// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin process entry point: loads `Config`, installs structured logging,
//! wires a `PluginRegistry` over the resource types declared under
//! `<state_dir>/resource_types`, and calls `init()` on each manager.
//!
//! The CLI and socket transport that would normally drive these managers
//! are out of scope (§1 Non-goals) — this binary exists so the ambient
//! config/logging stack has somewhere to run end to end.

mod config;
mod error;
mod registry;

use config::Config;
use error::DaemonError;
use registry::{NoopPortAllocator, PluginRegistry};
use rm_adapters::FakeMasterAdapter;
use rm_engine::ResourcesManager;
use rm_types::ResourceTypeDef;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), DaemonError> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let config = Config::load()?;
    info!(state_dir = %config.state_dir.display(), "loading resource types");

    let defs = load_resource_type_defs(&config).await?;
    if defs.is_empty() {
        info!("no resource_types declared; nothing to manage");
        return Ok(());
    }

    let registry = Arc::new(PluginRegistry::new());
    let port_allocator = Arc::new(NoopPortAllocator);

    let mut managers = Vec::with_capacity(defs.len());
    for def in defs {
        let plugin = def.plugin.clone();
        let resource_type_name = def.resource_type.clone();
        let data_path = config.manager_data_path(&plugin, &resource_type_name);
        let resource_type = def.into_resource_type();

        let master_adapter = FakeMasterAdapter::new(plugin.clone(), resource_type_name.clone());
        let manager = ResourcesManager::new(
            resource_type,
            data_path,
            master_adapter,
            Arc::clone(&port_allocator),
            Arc::clone(&registry),
        );

        registry.register(plugin.clone(), resource_type_name.clone(), Arc::new(Arc::clone(&manager)));
        managers.push((plugin, resource_type_name, manager));
    }

    init_all_managers(&managers).await?;

    info!(manager_count = managers.len(), "rmd ready (no CLI/socket transport in this build)");
    tokio::signal::ctrl_c().await.ok();
    info!("shutting down");
    Ok(())
}

/// Rehydrates every manager's adapter set before any manager publishes its
/// inverse dependency edges (see `ResourcesManager::init`'s doc comment):
/// `init()`'s own back-to-back phases are only correct for a single
/// manager used in isolation, not for a process hosting several of them.
async fn init_all_managers(managers: &[(String, String, Arc<ResourcesManager>)]) -> Result<(), DaemonError> {
    for (plugin, resource_type_name, manager) in managers {
        let errors = manager.init_adapters().await?;
        for err in &errors {
            tracing::warn!(%plugin, resource_type = %resource_type_name, "init error: {err}");
        }
        info!(%plugin, resource_type = %resource_type_name, init_errors = errors.len(), "manager adapters rehydrated");
    }

    for (plugin, resource_type_name, manager) in managers {
        manager.publish_pending_dependents()?;
        info!(%plugin, resource_type = %resource_type_name, "manager dependents published");
    }

    Ok(())
}

async fn load_resource_type_defs(config: &Config) -> Result<Vec<ResourceTypeDef>, DaemonError> {
    if !config.resource_types_dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries = tokio::fs::read_dir(&config.resource_types_dir)
        .await
        .map_err(|e| DaemonError::ReadResourceTypes { path: config.resource_types_dir.display().to_string(), source: e })?;

    let mut defs = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| DaemonError::ReadResourceTypes { path: config.resource_types_dir.display().to_string(), source: e })?
    {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }
        defs.push(ResourceTypeDef::load(&path).await?);
    }
    Ok(defs)
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
