pub mod structs {
    pub mod progress_event;
}
pub(crate) mod progress_reporter;

pub use structs::progress_event::{ProgressEvent, ProgressListener, ProgressPhase};
