// Adapters layer: concrete HTTP implementations of the domain ports.

pub mod reference;
pub mod submission;
