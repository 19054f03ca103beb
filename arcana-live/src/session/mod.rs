mod avatar_call;
mod event_loop;
mod signaling_session;
mod state;

pub use avatar_call::*;
pub use signaling_session::*;
pub use state::*;
