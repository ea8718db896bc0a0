pub mod error;
pub mod path_set;
pub mod preview;

pub use error::CoreError;
pub use path_set::{add_many, add_one, display_name};
pub use preview::{HttpPreviewService, PreviewEntry, PreviewService};
