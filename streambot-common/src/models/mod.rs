pub mod discord;
pub mod stream;
pub mod streamer;

pub use discord::{LiveAnnouncement, TWITCH_PURPLE};
pub use stream::LiveStream;
pub use streamer::normalize_login;
