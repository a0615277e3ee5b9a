pub mod celebration;
pub mod notification;
pub mod validation;
