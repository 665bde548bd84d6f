use anyhow::Result;

fn main() -> Result<()> {
    let _log_guard = self_reborn::logger::init();
    self_reborn::cli::run()
}
