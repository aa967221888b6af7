use anyhow::Context;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = shadeview::default().context("failed to create viewer")?;
    app.run().context("viewer exited with an error")?;
    Ok(())
}
