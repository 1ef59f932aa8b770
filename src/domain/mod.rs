//! Domain layer: the form model, masking transforms, validation rules and the
//! ports through which the application talks to transport and presentation.

pub mod form;
pub mod mask;
pub mod offer;
pub mod ports;
pub mod validate;
