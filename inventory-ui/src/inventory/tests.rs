#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::http_client::{HttpApiError, Result};
    use crate::inventory::state::{ADD_PRODUCT_ERROR_MESSAGE, CONFLICT_MESSAGE};
    use crate::inventory::{
        FormMode, InventoryAction, InventoryManager, Product, ProductApi, ProductForm, ProductPatch,
    };

    /// In-memory product store that behaves like the real server.
    #[derive(Default)]
    struct FakeProductApi {
        products: Mutex<Vec<Product>>,
        calls: AtomicUsize,
        fail_list: AtomicBool,
        fail_mutations: Mutex<Option<u16>>,
    }

    impl FakeProductApi {
        fn with_products(products: Vec<Product>) -> Arc<Self> {
            Arc::new(Self {
                products: Mutex::new(products),
                ..Default::default()
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn stored(&self) -> Vec<Product> {
            self.products.lock().unwrap().clone()
        }

        fn fail_list(&self) {
            self.fail_list.store(true, Ordering::SeqCst);
        }

        fn fail_mutations_with(&self, status: u16) {
            *self.fail_mutations.lock().unwrap() = Some(status);
        }

        fn record_call(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match *self.fail_mutations.lock().unwrap() {
                Some(409) => Err(HttpApiError::Conflict),
                Some(status) => Err(HttpApiError::ServerError { status }),
                None => Ok(()),
            }
        }
    }

    #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
    #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
    impl ProductApi for FakeProductApi {
        async fn list_products(&self) -> Result<Vec<Product>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(HttpApiError::ServerError { status: 503 });
            }
            Ok(self.stored())
        }

        async fn create_product(&self, product: &Product) -> Result<()> {
            self.record_call()?;
            let mut products = self.products.lock().unwrap();
            if products.iter().any(|p| p.product_id == product.product_id) {
                return Err(HttpApiError::Conflict);
            }
            products.push(product.clone());
            Ok(())
        }

        async fn update_product(&self, patch: &ProductPatch) -> Result<()> {
            self.record_call()?;
            let mut products = self.products.lock().unwrap();
            let product = products
                .iter_mut()
                .find(|p| p.product_id == patch.product_id)
                .ok_or(HttpApiError::ServerError { status: 404 })?;
            product.product_name = patch.update_value.product_name.clone();
            product.product_price = patch.update_value.product_price.clone();
            Ok(())
        }

        async fn delete_product(&self, product_id: &str) -> Result<()> {
            self.record_call()?;
            self.products
                .lock()
                .unwrap()
                .retain(|p| p.product_id != product_id);
            Ok(())
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("P1", "Widget", "9.99"),
            Product::new("P2", "Gadget", "24.00"),
        ]
    }

    async fn loaded_manager(products: Vec<Product>) -> (InventoryManager, Arc<FakeProductApi>) {
        let api = FakeProductApi::with_products(products);
        let mut manager = InventoryManager::new_with_api(api.clone());
        manager.dispatch(InventoryAction::FetchProducts);
        manager.run_until_idle().await;
        (manager, api)
    }

    fn fill_form(manager: &mut InventoryManager, id: &str, name: &str, price: &str) {
        manager.dispatch(InventoryAction::SetProductId(id.to_string()));
        manager.dispatch(InventoryAction::SetProductName(name.to_string()));
        manager.dispatch(InventoryAction::SetProductPrice(price.to_string()));
    }

    #[tokio::test]
    async fn test_manager_initialization() {
        let manager = InventoryManager::new_with_api(FakeProductApi::with_products(catalog()));
        let state = manager.state();

        assert!(state.products.is_empty());
        assert!(state.selected_product.is_none());
        assert!(state.form.is_empty());
        assert!(state.add_product_error.is_none());
        assert_eq!(state.mode(), FormMode::Create);
        assert!(!manager.has_pending_actions());
    }

    #[tokio::test]
    async fn test_initial_fetch_loads_products() {
        let (manager, api) = loaded_manager(catalog()).await;

        assert_eq!(manager.state().products, catalog());
        assert!(!manager.state().stale);
        assert!(!manager.state().is_busy());
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn test_add_product_refetches_and_clears_form() {
        let (mut manager, api) = loaded_manager(catalog()).await;

        // Leave a conflict message behind first
        fill_form(&mut manager, "P1", "Duplicate", "1");
        manager.dispatch(InventoryAction::AddProduct);
        manager.run_until_idle().await;
        assert!(manager.state().add_product_error.is_some());

        fill_form(&mut manager, "P3", "Sprocket", "3.25");
        manager.dispatch(InventoryAction::AddProduct);
        manager.run_until_idle().await;

        let state = manager.state();
        assert!(state.contains_product("P3"));
        assert!(state.form.is_empty());
        assert!(state.add_product_error.is_none());
        assert_eq!(state.products, api.stored());
    }

    #[tokio::test]
    async fn test_add_duplicate_sets_conflict_and_keeps_form() {
        let (mut manager, _api) = loaded_manager(catalog()).await;

        fill_form(&mut manager, "P1", "Another widget", "5");
        manager.dispatch(InventoryAction::AddProduct);
        manager.run_until_idle().await;

        let state = manager.state();
        assert_eq!(state.products, catalog());
        assert_eq!(state.add_product_error.as_deref(), Some(CONFLICT_MESSAGE));
        assert_eq!(
            state.form,
            ProductForm {
                product_id: "P1".into(),
                product_name: "Another widget".into(),
                product_price: "5".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_add_failure_sets_generic_error() {
        let (mut manager, api) = loaded_manager(catalog()).await;
        api.fail_mutations_with(500);

        fill_form(&mut manager, "P9", "Broken", "1");
        manager.dispatch(InventoryAction::AddProduct);
        manager.run_until_idle().await;

        let state = manager.state();
        assert_eq!(state.add_product_error.as_deref(), Some(ADD_PRODUCT_ERROR_MESSAGE));
        assert_eq!(state.form.product_id, "P9");
        assert_eq!(state.products, catalog());
    }

    #[tokio::test]
    async fn test_update_without_selection_makes_no_request() {
        let (mut manager, api) = loaded_manager(catalog()).await;
        manager.dispatch(InventoryAction::SetProductName("Orphan".into()));
        manager.run_until_idle().await;
        let calls_before = api.call_count();
        let form_before = manager.state().form.clone();

        manager.dispatch(InventoryAction::UpdateProduct);
        manager.run_until_idle().await;

        assert_eq!(api.call_count(), calls_before);
        assert_eq!(manager.state().form, form_before);
        assert_eq!(manager.state().products, catalog());
        assert!(manager.state().selected_product.is_none());
    }

    #[tokio::test]
    async fn test_select_product_populates_form_and_locks_id() {
        let (mut manager, api) = loaded_manager(catalog()).await;
        let calls_before = api.call_count();

        manager.dispatch(InventoryAction::SelectProduct(catalog()[1].clone()));
        manager.dispatch(InventoryAction::SetProductId("CHANGED".into()));
        manager.run_until_idle().await;

        let state = manager.state();
        assert_eq!(state.mode(), FormMode::Edit);
        assert!(!state.is_product_id_editable());
        assert_eq!(state.form, ProductForm::from_product(&catalog()[1]));
        assert_eq!(api.call_count(), calls_before);
    }

    #[tokio::test]
    async fn test_update_product_refetches_and_returns_to_create_mode() {
        let (mut manager, api) = loaded_manager(catalog()).await;

        manager.dispatch(InventoryAction::SelectProduct(catalog()[0].clone()));
        manager.dispatch(InventoryAction::SetProductName("Widget Pro".into()));
        manager.dispatch(InventoryAction::SetProductPrice("19.99".into()));
        manager.dispatch(InventoryAction::UpdateProduct);
        manager.run_until_idle().await;

        let state = manager.state();
        assert_eq!(state.mode(), FormMode::Create);
        assert!(state.form.is_empty());
        assert_eq!(state.products[0], Product::new("P1", "Widget Pro", "19.99"));
        assert_eq!(state.products, api.stored());
    }

    #[tokio::test]
    async fn test_update_failure_is_silent() {
        let (mut manager, api) = loaded_manager(catalog()).await;
        api.fail_mutations_with(500);

        manager.dispatch(InventoryAction::SelectProduct(catalog()[0].clone()));
        manager.dispatch(InventoryAction::SetProductName("Never saved".into()));
        manager.dispatch(InventoryAction::UpdateProduct);
        manager.run_until_idle().await;

        let state = manager.state();
        assert!(state.add_product_error.is_none());
        assert_eq!(state.selected_product.as_ref(), Some(&catalog()[0]));
        assert_eq!(state.form.product_name, "Never saved");
        assert_eq!(state.products, catalog());
    }

    #[tokio::test]
    async fn test_delete_removes_product_from_next_list() {
        let (mut manager, _api) = loaded_manager(catalog()).await;

        manager.dispatch(InventoryAction::DeleteProduct {
            product_id: "P1".into(),
        });
        manager.run_until_idle().await;

        assert!(!manager.state().contains_product("P1"));
        assert!(manager.state().contains_product("P2"));
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_list() {
        let (mut manager, api) = loaded_manager(catalog()).await;
        api.fail_mutations_with(500);
        let calls_before = api.call_count();

        manager.dispatch(InventoryAction::DeleteProduct {
            product_id: "P1".into(),
        });
        manager.run_until_idle().await;

        // No reload after a failed mutation
        assert_eq!(api.call_count(), calls_before + 1);
        assert_eq!(manager.state().products, catalog());
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_stale_list() {
        let (mut manager, api) = loaded_manager(catalog()).await;
        api.fail_list();

        manager.dispatch(InventoryAction::FetchProducts);
        manager.run_until_idle().await;

        let state = manager.state();
        assert_eq!(state.products, catalog());
        assert!(state.stale);
        assert!(state.add_product_error.is_none());
    }

    #[tokio::test]
    async fn test_price_field_filters_keystrokes() {
        let mut manager = InventoryManager::new_with_api(FakeProductApi::with_products(vec![]));

        manager.dispatch(InventoryAction::SetProductPrice("12.5".into()));
        manager.run_until_idle().await;
        assert_eq!(manager.state().form.product_price, "12.5");

        manager.dispatch(InventoryAction::SetProductPrice("12.5.3".into()));
        manager.dispatch(InventoryAction::SetProductPrice("abc".into()));
        manager.run_until_idle().await;
        assert_eq!(manager.state().form.product_price, "12.5");

        manager.dispatch(InventoryAction::SetProductPrice(String::new()));
        manager.run_until_idle().await;
        assert_eq!(manager.state().form.product_price, "");
    }

    #[tokio::test]
    async fn test_action_queuing() {
        let mut manager = InventoryManager::new_with_api(FakeProductApi::with_products(catalog()));

        manager.dispatch(InventoryAction::FetchProducts);
        manager.dispatch(InventoryAction::SetProductName("Queued".into()));
        assert!(manager.has_pending_actions());

        manager.update().await;
        assert!(manager.has_pending_actions());
        assert_eq!(manager.state().products, catalog());

        manager.update().await;
        assert!(!manager.has_pending_actions());
        assert_eq!(manager.state().form.product_name, "Queued");
    }

    #[tokio::test]
    async fn test_poll_applies_spawned_results() {
        let api = FakeProductApi::with_products(catalog());
        let mut manager = InventoryManager::new_with_api(api.clone());

        fill_form(&mut manager, "P3", "Sprocket", "3.25");
        manager.dispatch(InventoryAction::AddProduct);

        for _ in 0..200 {
            manager.poll();
            if !manager.has_pending_actions() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let state = manager.state();
        assert!(!state.is_busy());
        assert!(state.contains_product("P3"));
        assert!(state.form.is_empty());
        assert_eq!(state.products, api.stored());
    }
}
