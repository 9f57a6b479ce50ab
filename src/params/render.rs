//! Rendering and camera configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Camera position (world units)
    /// Straight above the sphere, looking down
    pub camera_position: [f32; 3],

    /// Camera up vector (must not be parallel to the view direction)
    pub camera_up: [f32; 3],

    /// Point light position (world units)
    pub light_position: [f32; 3],

    /// Background colour (sRGB, 0xD9D6D2)
    pub clear_color: [f32; 3],

    /// Sphere colour (sRGB)
    pub sphere_color: [f32; 3],

    /// Ambient light fraction (0.0..=1.0)
    pub ambient: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 40.0,
            near_plane: 0.1,
            far_plane: 20000.0,
            camera_position: [0.0, 45.0, 0.0],
            camera_up: [0.0, 0.0, -1.0],
            light_position: [-100.0, 200.0, 100.0],
            clear_color: [0xD9 as f32 / 255.0, 0xD6 as f32 / 255.0, 0xD2 as f32 / 255.0],
            sphere_color: [1.0, 1.0, 0.0],
            ambient: 0.35,
        }
    }
}
