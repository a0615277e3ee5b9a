pub mod celebration;
pub mod contact;
pub mod form;
mod macros;
pub mod notification;
pub mod validation;
