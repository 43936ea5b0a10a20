pub mod notifier;
pub mod runtime;

pub use notifier::DiscordLiveNotifier;
pub use runtime::DiscordPlatform;
