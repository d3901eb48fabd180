pub mod basis;
pub mod client;
pub mod config;
pub mod driver;
pub mod fetch;
pub mod grid;
pub mod render;
pub mod shape;

/// `RUST_LOG` が無ければ `info` 以上を出す.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
