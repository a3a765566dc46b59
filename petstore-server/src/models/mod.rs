//! Domain models
//!
//! Only type coercion is applied to input: a pet name is any string, an id is
//! any integer. Anything that fails to coerce becomes a ValidationError.

pub mod pet;
pub mod validation;

pub use pet::Pet;
pub use validation::ValidationError;
