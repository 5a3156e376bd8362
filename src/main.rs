fn main() -> picshow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    picshow::cli::run()
}
