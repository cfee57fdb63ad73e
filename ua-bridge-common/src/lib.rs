mod config;
mod error;
mod logger;

pub use config::BridgeConfig;
pub use error::{CommonError, CommonResult};
pub use logger::Logger;
