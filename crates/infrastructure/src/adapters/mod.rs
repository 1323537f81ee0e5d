//! Adapters for the application ports.

mod reqwest_prober;
mod system_clock;

pub use reqwest_prober::ReqwestEndpointProber;
pub use system_clock::SystemClock;
