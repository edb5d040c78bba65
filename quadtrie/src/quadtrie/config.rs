#[derive(Debug, Clone)]
pub struct Config {
    /// The world spans `[-world_half_extent, world_half_extent]` on both axes.
    pub world_half_extent: f32,
    pub max_object_radius: f32,
    /// Nodes reserved up front so steady-state ticks do not reallocate.
    pub node_reserve: usize,
    /// Edge of a uniform grid cell; `None` uses twice the max object radius.
    pub grid_cell_size: Option<f32>,
}

impl Config {
    pub fn with_world_half_extent(world_half_extent: f32) -> Self {
        Config {
            world_half_extent,
            ..Config::default()
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.grid_cell_size
            .unwrap_or(self.max_object_radius * 2.0)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            world_half_extent: 1024.0,
            max_object_radius: 8.0,
            node_reserve: 4000,
            grid_cell_size: None,
        }
    }
}
