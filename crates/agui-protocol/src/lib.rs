pub mod event;
pub mod frames;
pub mod handshake;
pub mod methods;

pub use event::{AguiEvent, AguiMetadata, EventKind};
pub use frames::{EventFrame, InboundFrame, ReqFrame, ResFrame};
