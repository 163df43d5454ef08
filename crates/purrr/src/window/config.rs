/// Window creation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowCreateInfo {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Allocate a depth attachment alongside the window's color image.
    pub depth: bool,
}

impl WindowCreateInfo {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            depth: false,
        }
    }

    pub fn with_depth(mut self, depth: bool) -> Self {
        self.depth = depth;
        self
    }
}

impl Default for WindowCreateInfo {
    fn default() -> Self {
        Self::new("purrr", 1280, 720)
    }
}
