mod playlist;
mod token;

pub use playlist::PlaylistBuilder;
pub use playlist::TOP_TRACK_LIMIT;
pub use token::REFRESH_MARGIN_SECS;
pub use token::TokenManager;
pub use token::freshness;
