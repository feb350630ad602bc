pub mod error;
pub mod flows;
pub mod generator;
pub mod registry;
pub mod sinks;
mod substitute;

pub use error::{DeliveryError, EventError, ProviderError};
pub use flows::{FlowReport, FlowRunner};
pub use generator::EventGenerator;
pub use registry::{Template, TemplateRegistry};
pub use sinks::{DeliverySink, UiDataProvider};
