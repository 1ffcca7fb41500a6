//! Loads the raster tiles for a map of Boston restaurants and prints what was fetched.
//!
//! Run with `cargo run --example bos_food_map`. Tiles are cached in the
//! `target/tile_cache` folder, so consecutive runs don't hit the tile service again.

use bosmap::bosmap_types::cartesian::Size;
use bosmap::layer::raster_tile_layer::RasterTileLayerBuilder;
use bosmap::MapBuilder;
use serde_json::json;

const MAPBOX_PROVIDER_ID: &str = "shimolu523.p1g0bd7h";
const MAPBOX_ACCESS_TOKEN: &str =
    "pk.eyJ1Ijoic2hpbW9sdTUyMyIsImEiOiJjaWswbjk3cjkzYWR5dm9raTgxaXhrejNmIn0.Z9EirFx5JhpxrXCAI65AJQ";

#[tokio::main]
async fn main() {
    env_logger::init();

    let layer = RasterTileLayerBuilder::new_mapbox(MAPBOX_PROVIDER_ID, MAPBOX_ACCESS_TOKEN)
        .with_file_cache("target/tile_cache")
        .build()
        .expect("failed to create tile layer");

    let restaurants = json!({
        "name": ["Thelonious Monkfish", "Pho Pasteur", "Giacomo's"],
        "locLati": [42.364251, 42.362845, 42.363601],
        "locLong": [-71.102768, -71.100193, -71.054392],
    });

    let mut map = MapBuilder::default()
        .with_latlon(42.3598, -71.0851)
        .with_z_level(13)
        .with_layer(layer)
        .with_dataset(restaurants)
        .build();
    map.set_size(Size::new(1024.0, 768.0));

    let view = *map.view();
    let layer = map
        .layers()
        .iter()
        .next()
        .and_then(|layer| layer.as_any().downcast_ref::<bosmap::layer::RasterTileLayer>())
        .expect("layer is a raster tile layer");
    layer.load_tiles(&view).await;

    let schema = layer.tile_schema().clone();
    let mut loaded = 0;
    if let Some(iter) = schema.iter_tiles(&view) {
        for index in iter {
            if let Some(image) = layer.tile_image(index) {
                println!("tile {index:?}: {}x{}", image.width(), image.height());
                loaded += 1;
            } else {
                println!("tile {index:?}: not loaded");
            }
        }
    }

    println!("{loaded} tiles loaded");
    if let Some(dataset) = map.dataset() {
        let count = dataset["name"].as_array().map(|names| names.len()).unwrap_or(0);
        println!("{count} restaurants in the dataset");
    }
}
