use eframe::egui;

use crate::config::InventoryConfig;
use crate::http_client::HttpApiError;
use crate::inventory::{FormMode, InventoryAction, InventoryManager};
use crate::wasm_utils;

/// Product Inventory application: form on the left, product table on the right.
pub struct InventoryApp {
    manager: InventoryManager,
}

impl InventoryApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: &InventoryConfig,
    ) -> Result<Self, HttpApiError> {
        wasm_utils::set_panic_hook();
        log::info!("API_BASE_URL: {}", config.api.base_url);

        let mut manager = InventoryManager::new(&config.api.base_url)?;
        manager.dispatch(InventoryAction::FetchProducts);

        Ok(Self { manager })
    }
}

impl eframe::App for InventoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.manager.poll();

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Product Inventory");
                if self.manager.state().is_busy() {
                    ui.separator();
                    ui.spinner();
                }
            });
        });

        egui::SidePanel::left("product_form")
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| {
                self.render_form(ui, &mut actions);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_products(ui, &mut actions);
        });

        for action in actions {
            self.manager.dispatch(action);
        }
        self.manager.poll();

        if self.manager.has_pending_actions() {
            ctx.request_repaint();
        }
    }
}

impl InventoryApp {
    fn render_form(&self, ui: &mut egui::Ui, actions: &mut Vec<InventoryAction>) {
        let state = self.manager.state();
        let mut product_id = state.form.product_id.clone();
        let mut product_name = state.form.product_name.clone();
        let mut product_price = state.form.product_price.clone();

        ui.add_space(10.0);
        ui.group(|ui| {
            ui.heading("Add Product");
            ui.separator();

            egui::Grid::new("product_form_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Product ID");
                    let id_field = egui::TextEdit::singleline(&mut product_id).hint_text("Product ID");
                    if ui.add_enabled(state.is_product_id_editable(), id_field).changed() {
                        actions.push(InventoryAction::SetProductId(product_id.clone()));
                    }
                    ui.end_row();

                    ui.label("Product Name");
                    let name_field = egui::TextEdit::singleline(&mut product_name).hint_text("Product Name");
                    if ui.add(name_field).changed() {
                        actions.push(InventoryAction::SetProductName(product_name.clone()));
                    }
                    ui.end_row();

                    // The state decides whether the new text is a valid price
                    ui.label("Product Price");
                    let price_field = egui::TextEdit::singleline(&mut product_price).hint_text("Product Price");
                    if ui.add(price_field).changed() {
                        actions.push(InventoryAction::SetProductPrice(product_price.clone()));
                    }
                    ui.end_row();
                });

            if let Some(error) = &state.add_product_error {
                ui.add_space(5.0);
                ui.colored_label(egui::Color32::RED, error);
            }

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("Add").clicked() {
                    actions.push(InventoryAction::AddProduct);
                }

                if state.mode() == FormMode::Edit && ui.button("Update").clicked() {
                    actions.push(InventoryAction::UpdateProduct);
                }
            });
        });
    }

    fn render_products(&self, ui: &mut egui::Ui, actions: &mut Vec<InventoryAction>) {
        let state = self.manager.state();

        ui.heading("Products");
        ui.add_space(5.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("products_table")
                .num_columns(4)
                .striped(true)
                .spacing([20.0, 6.0])
                .show(ui, |ui| {
                    ui.strong("Product ID");
                    ui.strong("Product Name");
                    ui.strong("Product Price");
                    ui.strong("Actions");
                    ui.end_row();

                    if state.products.is_empty() {
                        ui.label("No products found.");
                        ui.end_row();
                        return;
                    }

                    for product in &state.products {
                        ui.label(&product.product_id);
                        ui.label(&product.product_name);
                        ui.label(format!("${}", product.product_price));
                        ui.horizontal(|ui| {
                            if ui.button("Edit").clicked() {
                                actions.push(InventoryAction::SelectProduct(product.clone()));
                            }
                            if ui
                                .add(egui::Button::new("Delete").fill(egui::Color32::from_rgb(160, 40, 40)))
                                .clicked()
                            {
                                actions.push(InventoryAction::DeleteProduct {
                                    product_id: product.product_id.clone(),
                                });
                            }
                        });
                        ui.end_row();
                    }
                });
        });
    }
}
