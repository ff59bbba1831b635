use thiserror::Error;

/// Everything that can stop an atom from being rendered.
///
/// All variants are raised before the target container is mutated, except
/// `Surface`, which reports a failure of the rendering target itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AtomError {
    /// Carries the number as it was given, which may be negative or fractional.
    #[error("Element #{0} is not in the periodic table (expected 1-118)")]
    InvalidElement(String),
    #[error(
        "Container \"{0}\" was not found. Please make sure such element exists in the DOM"
    )]
    ContainerNotFound(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

pub type AtomResult<T> = Result<T, AtomError>;

#[cfg(target_arch = "wasm32")]
impl From<AtomError> for wasm_bindgen::JsValue {
    fn from(error: AtomError) -> Self {
        js_sys::Error::new(&error.to_string()).into()
    }
}
