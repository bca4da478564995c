use bevy::{
  prelude::*,
  window::{PresentMode, WindowResolution},
};
use lantern_lights::{config, console, core, input, player, visual_debug, world};

fn main() -> AppExit {
  // WASM: set up panic hook for better error messages
  #[cfg(target_family = "wasm")]
  console_error_panic_hook::set_once();

  // WASM: embed config at compile time (no filesystem access)
  #[cfg(target_family = "wasm")]
  let loaded = config::GameConfig::parse(include_str!("../assets/config/lantern.config.toml"));
  #[cfg(not(target_family = "wasm"))]
  let loaded = config::GameConfig::load(config::CONFIG_PATH);

  let config = match loaded {
    Ok(config) => config,
    Err(err) => {
      // LogPlugin isn't up yet
      eprintln!("Failed to load {}: {}", config::CONFIG_PATH, err);
      return AppExit::error();
    }
  };

  let mut app = App::new();

  app.insert_resource(Time::<Fixed>::from_hz(60.0));

  app
    .add_plugins(
      DefaultPlugins
        .set(ImagePlugin::default_nearest())
        .set(WindowPlugin {
          primary_window: Some(Window {
            resolution: WindowResolution::new(config.window.width, config.window.height),
            title: config.window.title.clone(),
            // WASM: only Fifo (vsync) is supported on WebGL2
            #[cfg(target_family = "wasm")]
            present_mode: PresentMode::Fifo,
            #[cfg(not(target_family = "wasm"))]
            present_mode: PresentMode::AutoVsync,
            #[cfg(target_family = "wasm")]
            canvas: Some("#bevy".to_string()),
            #[cfg(target_family = "wasm")]
            fit_canvas_to_parent: true,
            ..default()
          }),
          ..default()
        })
        // Disable 3D PBR plugin - removes SSAO, atmosphere, environment map warnings on WebGL2
        .disable::<bevy::pbr::PbrPlugin>(),
    )
    .add_plugins(config::ConfigPlugin::new(config))
    .add_plugins(core::CorePlugin)
    .add_plugins(input::InputPlugin)
    .add_plugins(world::WorldPlugin)
    .add_plugins(player::PlayerPlugin)
    .add_plugins(console::ConsolePlugins);

  #[cfg(feature = "visual_debug")]
  app.add_plugins(visual_debug::VisualDebugPlugin);
  #[cfg(not(feature = "visual_debug"))]
  app.init_resource::<visual_debug::DebugMarkers>();

  app.run()
}
