//! Handler implementations

pub mod callback;
#[cfg(unix)]
pub mod descriptor;
pub mod file;
pub mod stream;

pub use callback::CallbackHandler;
#[cfg(unix)]
pub use descriptor::DescriptorHandler;
pub use file::FileHandler;
pub use stream::StreamHandler;

pub use crate::core::Handler;
