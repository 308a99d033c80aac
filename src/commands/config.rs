use anyhow::Result;
use caldesk_core::config::CaldeskConfig;
use caldesk_core::persist::sibling_path;
use caldesk_core::store::StoreOptions;
use owo_colors::OwoColorize;

pub fn run(options: &StoreOptions) -> Result<()> {
    let config_path = CaldeskConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Data:       {}", options.path.display());
    println!(
        "  Recovered:  {}",
        sibling_path(&options.path, "{backup,corrupted}").display()
    );
    println!();
    println!("{}", "Limits".bold());
    println!("  Max data file size: {} bytes", options.max_file_size);

    Ok(())
}
