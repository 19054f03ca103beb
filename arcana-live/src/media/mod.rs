mod local_stream;
mod remote_stream;
mod source;

pub use local_stream::*;
pub use remote_stream::*;
pub use source::*;
