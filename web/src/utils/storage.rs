//! Thin `localStorage` / `atob` bindings. Outside the browser build every
//! read is empty and writes are dropped.

#[cfg(feature = "hydrate")]
mod imp {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = localStorage)]
        fn getItem(key: &str) -> Option<String>;
        #[wasm_bindgen(js_namespace = localStorage)]
        fn setItem(key: &str, value: &str);
        #[wasm_bindgen(catch, js_name = atob)]
        fn atob(data: &str) -> Result<String, JsValue>;
    }

    pub fn read(key: &str) -> Option<String> {
        getItem(key)
    }

    pub fn write(key: &str, value: &str) {
        setItem(key, value)
    }

    pub fn base64_decode(data: &str) -> Option<String> {
        atob(data).ok()
    }
}

#[cfg(not(feature = "hydrate"))]
mod imp {
    pub fn read(_key: &str) -> Option<String> {
        None
    }

    pub fn write(_key: &str, _value: &str) {}

    pub fn base64_decode(_data: &str) -> Option<String> {
        None
    }
}

pub use imp::{base64_decode, read, write};
