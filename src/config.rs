/// How the View Tasks screen prints its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub color: bool,
    pub view_format: ViewFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: true,
            view_format: ViewFormat::Text,
        }
    }
}
