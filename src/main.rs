//! GLprimer entry point
//!
//! Run with:
//! ```bash
//! cargo run
//! cargo run -- my_shader.wgsl
//! cargo run -- --print
//! ```

use glprimer::{LaunchOptions, mat4, run_with_config};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let LaunchOptions {
        config,
        print_matrices,
    } = LaunchOptions::from_args(std::env::args().skip(1));

    if print_matrices {
        mat4::print(&config.animation.view);
        mat4::print(&config.animation.world_transform(0.0));
    }

    log::info!("Starting {}", config.title);

    if let Err(e) = run_with_config(config) {
        log::error!("Application error: {}", e);
        std::process::exit(1);
    }
}
