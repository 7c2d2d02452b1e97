pub mod resolver;

pub use resolver::{PricingResolver, StayQuote, compute_nightly_price, from_f64, to_f64};
