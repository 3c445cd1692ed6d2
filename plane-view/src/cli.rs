use argh::FromArgs;

/// Render one synthetic frame of floors and ceilings to a PPM image
#[derive(Debug, Clone, FromArgs)]
pub struct CLIOptions {
    /// verbose level: off, error, warn, info, debug, trace
    #[argh(option)]
    pub verbose: Option<log::LevelFilter>,
    /// resolution width in pixels, 0 keeps the configured width
    #[argh(option, default = "0")]
    pub width: u32,
    /// resolution height in pixels, 0 keeps the configured height
    #[argh(option, default = "0")]
    pub height: u32,
    /// path to a RON config file, instead of the one in the user config dir
    #[argh(option)]
    pub config: Option<String>,
    /// image to write
    #[argh(option, default = "String::from(\"planes.ppm\")")]
    pub output: String,
    /// game tic to render, moves the liquid ripple
    #[argh(option, default = "0")]
    pub tic: u32,
    /// shade straight to RGBA instead of through palette indices
    #[argh(option)]
    pub truecolour: Option<bool>,
}
