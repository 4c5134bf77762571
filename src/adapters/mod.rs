// Adapters layer: document formats in (XML) and out (text, JSON, CSV).

pub mod export;
pub mod xml;
