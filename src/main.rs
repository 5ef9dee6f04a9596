//! Demo: cache a texture and a mesh, then read back some attributes
//!
//! Usage: `rescache [config.ron]`

use glam::Vec3;
use rescache::demo::{Mesh, Texture};
use rescache::prelude::*;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => RepositoryConfig::load_ron(path)?,
        None => RepositoryConfig::default(),
    };

    let mut repo = ResourceRepository::with_config(config);
    repo.register::<Texture>()?;
    repo.register::<Mesh>()?;

    let texture = repo.get::<Texture>("hola")?.ok_or("no texture requested")?;
    let mesh = repo.get::<Mesh>("2")?.ok_or("no mesh requested")?;
    repo.get::<Texture>("hola")?;

    log::info!("Texture '{}': {}x{}", texture.name(), texture.width, texture.height);
    log::info!("Mesh '{}': {} vertices", mesh.name(), mesh.vertices.len());
    log::info!("{}", repo.stats().format_stats());

    let mut table = AttributeTable::new();
    table.add("position", Vec3::ZERO);
    table.add("health", 5.0_f32);
    table.add("mana", 6.0_f32);

    let mut position = Vec3::ONE;
    let mut health = 0.0_f32;
    let mut mana = 0.0_f32;
    table.get_into("position", &mut position)?;
    table.get_into("health", &mut health)?;
    table.get_into("mana", &mut mana)?;
    log::info!("Position {position} - Health {health} - Mana {mana}");

    if let Err(e) = table.get::<f32>("position") {
        log::warn!("{e}");
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}
