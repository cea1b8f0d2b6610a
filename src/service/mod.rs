//! Store access and request validation.

mod crud;
mod validation;
pub use crud::CrudService;
pub use validation::RequestValidator;
