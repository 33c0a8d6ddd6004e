use clap::Subcommand;
use sorted_core::config::SortedConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Initialize ~/.config/sorted/ with default config
    Init,
    /// Show current configuration
    Show,
}

pub fn run(action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let dir = SortedConfig::init()?;
            let config = SortedConfig::load()?;

            println!("Initialized sorted at {}", dir.display());
            println!("  config:      {}", SortedConfig::config_path()?.display());
            println!("  collections: {}", config.collections_dir.display());
            println!("  cache:       {}", config.cache_dir.display());
            Ok(())
        }
        ConfigAction::Show => {
            let config = SortedConfig::load()?;
            let toml_str = toml::to_string_pretty(&config)?;
            println!("{toml_str}");
            Ok(())
        }
    }
}
