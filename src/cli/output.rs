#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    /// SwiftBar/xbar menu markup on stdout (the default)
    Menu,
    /// Normalized snapshot as JSON, for scripting and debugging
    Json,
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub verbose: bool,
}
