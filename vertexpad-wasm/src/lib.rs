use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

pub use api::{init_logging, set_panic_hook};

#[wasm_bindgen]
pub struct Editor { pub(crate) inner: vertexpad::Session }

impl Editor {
    pub fn rs_new(cfg: vertexpad::EditorConfig) -> Editor { Editor { inner: vertexpad::Session::new(cfg) } }
    pub fn rs_version(&self) -> u64 { self.inner.graph().version() }
}
