pub mod catalog;
pub mod engine;
pub mod loader;
pub mod mapping;

pub use crate::domain::model::{AttributeMap, StructureRecord};
pub use crate::domain::ports::{ConfigProvider, ErrorPolicy, Storage};
pub use crate::utils::error::Result;
