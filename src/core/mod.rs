pub mod clock;
pub mod input_adapter;
pub mod shutdown;

pub use clock::FpsMeter;
pub use input_adapter::{PointerState, PointerTracker};
pub use shutdown::ShutdownToken;
