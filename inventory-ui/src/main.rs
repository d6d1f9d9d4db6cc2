// Desktop entry point for the inventory UI
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(not(target_arch = "wasm32"))]
use inventory_ui::{app::InventoryApp, config::InventoryConfig};

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match InventoryConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{}, using defaults", e);
            let mut config = InventoryConfig::default();
            config.apply_env_overrides(|key| std::env::var(key).ok());
            config
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([640.0, 400.0])
            .with_title(config.window.title.clone()),
        ..Default::default()
    };

    eframe::run_native(
        "Product Inventory",
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            let app = InventoryApp::new(cc, &config)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run inventory UI: {}", e))
}

// The browser build starts through the exported `start` function instead.
#[cfg(target_arch = "wasm32")]
fn main() {}
