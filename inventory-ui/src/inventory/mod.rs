pub mod actions;
pub mod client;
pub mod manager;
pub mod price;
pub mod state;

#[cfg(test)]
mod tests;

pub use actions::{Command, InventoryAction, InventoryEvent};
pub use client::{ProductApi, ProductClient, ProductFields, ProductPatch};
pub use manager::InventoryManager;
pub use state::{FormMode, InventoryState, Product, ProductForm};

