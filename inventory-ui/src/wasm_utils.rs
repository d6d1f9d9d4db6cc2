//! Cross-platform utilities that work in both WASM and native contexts

#[cfg(target_arch = "wasm32")]
mod wasm_impl {
    /// Browser futures run on the single JS thread, so nothing here needs `Send`.
    pub trait MaybeSend {}
    impl<T: ?Sized> MaybeSend for T {}

    pub fn set_panic_hook() {
        console_error_panic_hook::set_once();
    }

    pub fn spawn_async<F>(future: F)
    where
        F: std::future::Future<Output = ()> + 'static,
    {
        wasm_bindgen_futures::spawn_local(future);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native_impl {
    /// Native futures are handed to the tokio runtime and may move between threads.
    pub trait MaybeSend: Send + Sync {}
    impl<T: ?Sized + Send + Sync> MaybeSend for T {}

    pub fn set_panic_hook() {
        // Native panics already reach stderr
    }

    /// Must be called from inside a tokio runtime context.
    pub fn spawn_async<F>(future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(future);
    }
}

// Re-export the appropriate implementation
#[cfg(target_arch = "wasm32")]
pub use wasm_impl::*;

#[cfg(not(target_arch = "wasm32"))]
pub use native_impl::*;
