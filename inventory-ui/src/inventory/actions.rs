use super::client::ProductPatch;
use super::state::Product;
use crate::http_client::HttpApiError;

/// Something the user did in the UI.
#[derive(Debug, Clone)]
pub enum InventoryAction {
    // List
    FetchProducts,

    // Form edits
    SetProductId(String),
    SetProductName(String),
    SetProductPrice(String),

    // Mutations
    AddProduct,
    UpdateProduct,
    DeleteProduct { product_id: String },

    // Switch the form to edit mode
    SelectProduct(Product),
}

impl InventoryAction {
    pub fn description(&self) -> &'static str {
        match self {
            InventoryAction::FetchProducts => "Fetching products",
            InventoryAction::SetProductId(_) => "Editing product id",
            InventoryAction::SetProductName(_) => "Editing product name",
            InventoryAction::SetProductPrice(_) => "Editing product price",
            InventoryAction::AddProduct => "Adding product",
            InventoryAction::UpdateProduct => "Updating selected product",
            InventoryAction::DeleteProduct { .. } => "Deleting product",
            InventoryAction::SelectProduct(_) => "Selecting product for edit",
        }
    }
}

/// Network effect requested by the state. Each one produces exactly one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchProducts,
    CreateProduct(Product),
    UpdateProduct(ProductPatch),
    DeleteProduct { product_id: String },
}

impl Command {
    pub fn description(&self) -> &'static str {
        match self {
            Command::FetchProducts => "GET product list",
            Command::CreateProduct(_) => "POST product",
            Command::UpdateProduct(_) => "PATCH product",
            Command::DeleteProduct { .. } => "DELETE product",
        }
    }
}

/// Outcome of a command, fed back into the state.
#[derive(Debug)]
pub enum InventoryEvent {
    ProductsLoaded(Vec<Product>),
    ProductsFetchFailed(HttpApiError),
    ProductCreated { product_id: String },
    ProductCreateFailed(HttpApiError),
    ProductUpdated { product_id: String },
    ProductUpdateFailed(HttpApiError),
    ProductDeleted { product_id: String },
    ProductDeleteFailed { product_id: String, error: HttpApiError },
}
