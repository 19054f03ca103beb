pub use arcana_core::model::{Oracle, SessionStatus};

pub mod model {
    pub use arcana_core::model::*;
}

#[cfg(feature = "live")]
pub mod live {
    pub use arcana_live::*;
}

#[cfg(feature = "genai")]
pub mod genai {
    pub use arcana_genai::*;
}
