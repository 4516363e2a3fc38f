// error.rs - Browser host failures
//
// A missing canvas is not an error: the backdrop just stays dark.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("element #{0} is not a canvas")]
    NotACanvas(String),
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for HostError {
    fn from(v: wasm_bindgen::JsValue) -> Self {
        HostError::Js(format!("{v:?}"))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<HostError> for wasm_bindgen::JsValue {
    fn from(e: HostError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(HostError::NotACanvas("stars".into()).to_string(), "element #stars is not a canvas");
        assert_eq!(HostError::NoWindow.to_string(), "no global window");
    }
}
