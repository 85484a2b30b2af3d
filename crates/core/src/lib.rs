pub mod cancel;
pub mod declaration;
pub mod document;
pub mod error;
pub mod extract;
pub mod logging;
pub mod model;
pub mod resolve;
pub mod settings;

pub use cancel::{Cancellation, NeverCancel};
pub use document::{LineSource, TextDocument};
pub use error::{GalahError, Result};
pub use model::{Declaration, PathRef, Position, Span};
pub use settings::Settings;
