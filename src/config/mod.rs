pub mod traits;
pub mod pool;
pub mod layout;
pub mod run;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use pool::PoolConfig;
pub use layout::LayoutConfig;
pub use run::RunConfig;
pub use traits::ConfigSection;
