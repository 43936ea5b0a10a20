pub mod streamers;

pub use streamers::JsonStreamerRepository;
