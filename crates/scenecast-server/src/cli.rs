use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "scenecast-server", about = "HTTP control gateway for OBS")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/scenecast.toml")]
    pub config: String,
}
