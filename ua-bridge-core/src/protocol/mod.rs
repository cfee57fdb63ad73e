pub mod assemble;
pub mod codec;
pub mod encode;
pub mod envelope;
pub mod error;
pub mod term;

pub use codec::FrameCodec;
pub use encode::ResponseData;
pub use envelope::CallerContext;
pub use error::{ErrorReason, ProtocolError, Result};
