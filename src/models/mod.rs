//! ML model inference components

pub mod classifier;
pub mod inference;
pub mod linear;
pub mod loader;
#[cfg(feature = "onnx")]
pub mod onnx;

pub use classifier::Classifier;
pub use inference::{ModelState, Predictor};
pub use linear::LinearClassifier;
pub use loader::ModelLoader;
