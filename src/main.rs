use pyre::FireConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match FireConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => FireConfig::default(),
    };

    if let Err(e) = pyre::run(config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
