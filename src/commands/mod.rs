mod audit;
mod files;
mod settings;

pub use audit::*;
pub use files::*;
pub use settings::*;
