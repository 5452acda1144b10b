use wasm_bindgen::prelude::*;

mod builder;
mod catalog;
mod game;
mod orbit;
mod picker;
use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");
