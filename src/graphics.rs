use crate::config::GameConfig;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Setup camera for 2D rendering.
///
/// The camera is centred on the field so world coordinates `[0, width] ×
/// [0, height]` fill the window exactly.
pub fn setup_camera(mut commands: Commands, config: Res<GameConfig>) {
    let center = config.field_center();
    commands.spawn((Camera2d, Transform::from_xyz(center.x, center.y, 0.0)));
    info!("Camera spawned at {center}");
}

/// Resize the primary window to `display.width × display.height` once the
/// config file has been read.  The window opens at the compiled defaults.
pub fn fit_window_to_config(
    mut q_window: Query<&mut Window, With<PrimaryWindow>>,
    config: Res<GameConfig>,
) {
    let Ok(mut window) = q_window.single_mut() else {
        return;
    };
    let (width, height) = (config.display.width, config.display.height);
    if window.resolution.width() != width || window.resolution.height() != height {
        window.resolution.set(width, height);
        info!("Window resized to {width}x{height}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_window(config: GameConfig) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(config);
        app.world_mut().spawn((Window::default(), PrimaryWindow));
        app.add_systems(Update, fit_window_to_config);
        app
    }

    #[test]
    fn window_follows_display_override() {
        let mut config = GameConfig::default();
        config.display.width = 1024.0;
        config.display.height = 768.0;
        let mut app = app_with_window(config);
        app.update();

        let world = app.world_mut();
        let window = world
            .query_filtered::<&Window, With<PrimaryWindow>>()
            .single(world)
            .unwrap();
        assert_eq!(window.resolution.width(), 1024.0);
        assert_eq!(window.resolution.height(), 768.0);
    }

    #[test]
    fn missing_window_is_a_no_op() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.add_systems(Update, fit_window_to_config);
        app.update();
    }
}
