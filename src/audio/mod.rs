pub mod clip;
pub mod device;

pub use clip::{ClipInfo, ClipWriter};
pub use device::{AudioFrame, CaptureDevice, CaptureError, SilenceDevice};
