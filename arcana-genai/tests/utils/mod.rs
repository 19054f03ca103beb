pub mod responses;

pub use mock_gemini::*;
pub use responses::*;
