mod app;
mod controller;
mod events;
mod models;
mod palette;
mod storage;
mod surface;
mod ui;

fn main() -> anyhow::Result<()> {
    app::run()
}
