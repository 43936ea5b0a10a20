pub mod live_poll;
