/// Canonical form of a tracked Twitch login: surrounding whitespace removed, lower-cased.
///
/// Twitch logins are case-insensitive, so every comparison in the store goes through this.
pub fn normalize_login(raw: &str) -> String {
    raw.trim().to_lowercase()
}
