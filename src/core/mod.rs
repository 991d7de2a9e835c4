pub mod pipeline;
pub mod summary;
pub mod transcript;
pub mod video_id;

pub use pipeline::*;
pub use summary::*;
pub use transcript::*;
pub use video_id::*;
