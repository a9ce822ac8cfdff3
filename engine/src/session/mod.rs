mod game_session;
mod session_rng;

pub use game_session::{GameSession, SessionView};
pub use session_rng::SessionRng;
