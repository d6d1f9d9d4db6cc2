use serde::{Deserialize, Serialize};

use super::actions::{Command, InventoryAction, InventoryEvent};
use super::client::ProductPatch;
use super::price;

pub const CONFLICT_MESSAGE: &str = "Product with this ID already exists";
pub const ADD_PRODUCT_ERROR_MESSAGE: &str = "Error adding product";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    pub product_name: String,
    #[serde(default, deserialize_with = "price::deserialize_price")]
    pub product_price: String,
}

impl Product {
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        product_price: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            product_price: product_price.into(),
        }
    }
}

/// Text currently shown in the three form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub product_id: String,
    pub product_name: String,
    pub product_price: String,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.product_id.clone(),
            product_name: product.product_name.clone(),
            product_price: product.product_price.clone(),
        }
    }

    pub fn to_product(&self) -> Product {
        Product::new(
            self.product_id.clone(),
            self.product_name.clone(),
            self.product_price.clone(),
        )
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.product_id.is_empty() && self.product_name.is_empty() && self.product_price.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Default)]
pub struct InventoryState {
    // Last list the server returned
    pub products: Vec<Product>,

    // Some(..) puts the form in edit mode
    pub selected_product: Option<Product>,

    pub form: ProductForm,
    pub add_product_error: Option<String>,

    // Set by invalidate(), cleared when a list arrives
    pub stale: bool,

    // Commands issued whose outcome has not come back yet
    pub in_flight: usize,
}

impl InventoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        match self.selected_product {
            Some(_) => FormMode::Edit,
            None => FormMode::Create,
        }
    }

    /// The id of an existing record cannot be changed mid-edit.
    pub fn is_product_id_editable(&self) -> bool {
        self.selected_product.is_none()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn contains_product(&self, product_id: &str) -> bool {
        self.products.iter().any(|p| p.product_id == product_id)
    }

    /// Marks the list as out of date and returns the command that reloads it.
    pub fn invalidate(&mut self) -> Command {
        self.stale = true;
        Command::FetchProducts
    }

    /// Applies a user intent. Returned commands are counted as in flight.
    pub fn handle_action(&mut self, action: InventoryAction) -> Vec<Command> {
        let commands = match action {
            InventoryAction::FetchProducts => vec![self.invalidate()],
            InventoryAction::SetProductId(value) => {
                if self.is_product_id_editable() {
                    self.form.product_id = value;
                } else {
                    log::debug!("Ignoring product id edit while a product is selected");
                }
                Vec::new()
            }
            InventoryAction::SetProductName(value) => {
                self.form.product_name = value;
                Vec::new()
            }
            InventoryAction::SetProductPrice(value) => {
                if price::is_valid_price_input(&value) {
                    self.form.product_price = value;
                } else {
                    log::debug!("Rejected price input {:?}", value);
                }
                Vec::new()
            }
            InventoryAction::AddProduct => vec![Command::CreateProduct(self.form.to_product())],
            InventoryAction::UpdateProduct => match &self.selected_product {
                Some(selected) => vec![Command::UpdateProduct(ProductPatch::product(
                    &selected.product_id,
                    &self.form.product_name,
                    &self.form.product_price,
                ))],
                None => Vec::new(),
            },
            InventoryAction::DeleteProduct { product_id } => {
                vec![Command::DeleteProduct { product_id }]
            }
            InventoryAction::SelectProduct(product) => {
                self.form = ProductForm::from_product(&product);
                self.selected_product = Some(product);
                Vec::new()
            }
        };

        self.issue(commands)
    }

    /// Applies the outcome of one command issued earlier.
    pub fn handle_event(&mut self, event: InventoryEvent) -> Vec<Command> {
        self.in_flight = self.in_flight.saturating_sub(1);

        let commands = match event {
            InventoryEvent::ProductsLoaded(products) => {
                log::info!("Loaded {} products", products.len());
                self.products = products;
                self.stale = false;
                Vec::new()
            }
            InventoryEvent::ProductsFetchFailed(error) => {
                log::error!("Error fetching products: {}", error);
                Vec::new()
            }
            InventoryEvent::ProductCreated { product_id } => {
                log::info!("Product created: {}", product_id);
                self.form.clear();
                self.add_product_error = None;
                vec![self.invalidate()]
            }
            InventoryEvent::ProductCreateFailed(error) => {
                if error.is_conflict() {
                    self.add_product_error = Some(CONFLICT_MESSAGE.to_string());
                } else {
                    log::error!("Error adding product: {}", error);
                    self.add_product_error = Some(ADD_PRODUCT_ERROR_MESSAGE.to_string());
                }
                Vec::new()
            }
            InventoryEvent::ProductUpdated { product_id } => {
                log::info!("Product updated: {}", product_id);
                self.selected_product = None;
                self.form.clear();
                vec![self.invalidate()]
            }
            InventoryEvent::ProductUpdateFailed(error) => {
                log::error!("Error updating product: {}", error);
                Vec::new()
            }
            InventoryEvent::ProductDeleted { product_id } => {
                log::info!("Product deleted: {}", product_id);
                vec![self.invalidate()]
            }
            InventoryEvent::ProductDeleteFailed { product_id, error } => {
                log::error!("Error deleting product {}: {}", product_id, error);
                Vec::new()
            }
        };

        self.issue(commands)
    }

    fn issue(&mut self, commands: Vec<Command>) -> Vec<Command> {
        self.in_flight += commands.len();
        commands
    }
}
