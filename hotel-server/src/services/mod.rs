pub mod reconciler;

pub use reconciler::{PassReport, Reconciler};
