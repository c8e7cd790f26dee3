//! Options command — show or change per-host advanced options.

use std::path::Path;

use rdplaunch_core::models::{AdvancedOptions, AudioMode, Resolution, parse_monitor_list};
use rdplaunch_core::registry::ConnectionRegistry;

use crate::cli::OptionsArgs;
use crate::error::CliError;
use crate::util::create_config_manager;

/// Options command handler
pub fn cmd_options(config_path: Option<&Path>, args: &OptionsArgs) -> Result<(), CliError> {
    let config = create_config_manager(config_path)?;
    let mut registry = ConnectionRegistry::load(config);

    let mut options = registry.advanced_options(&args.host);
    let changed = apply_updates(&mut options, args)?;

    if changed {
        registry
            .set_advanced_options(&args.host, options.clone())
            .map_err(|e| CliError::Config(format!("Failed to save options: {e}")))?;
        println!("Options saved for {}", args.host);
    }

    print_options(&args.host, &options);
    Ok(())
}

/// Applies setter flags to the options, returning whether anything changed.
fn apply_updates(options: &mut AdvancedOptions, args: &OptionsArgs) -> Result<bool, CliError> {
    let mut changed = false;

    if let Some(value) = args.fullscreen {
        options.fullscreen = value;
        changed = true;
    }
    if let Some(ref value) = args.resolution {
        options.resolution = value
            .parse::<Resolution>()
            .map_err(|e| CliError::Validation(e.to_string()))?;
        changed = true;
    }
    if let Some(value) = args.multimon {
        options.multimon = value;
        changed = true;
    }
    if let Some(ref text) = args.monitors {
        let monitors = parse_monitor_list(text);
        if monitors.is_empty() && !text.trim().is_empty() {
            eprintln!("Warning: could not parse monitor list '{text}', using all monitors");
        }
        options.selected_monitors = monitors;
        changed = true;
    }
    if let Some(value) = args.disable_fonts {
        options.disable_fonts = value;
        changed = true;
    }
    if let Some(value) = args.disable_wallpaper {
        options.disable_wallpaper = value;
        changed = true;
    }
    if let Some(value) = args.disable_themes {
        options.disable_themes = value;
        changed = true;
    }
    if let Some(value) = args.disable_aero {
        options.disable_aero = value;
        changed = true;
    }
    if let Some(value) = args.disable_drag {
        options.disable_drag = value;
        changed = true;
    }
    if let Some(value) = args.compression {
        options.compression = value;
        changed = true;
    }
    if let Some(ref value) = args.audio {
        options.audio_mode = value
            .parse::<AudioMode>()
            .map_err(|e| CliError::Validation(e.to_string()))?;
        changed = true;
    }
    if let Some(value) = args.clipboard {
        options.clipboard = value;
        changed = true;
    }
    if let Some(value) = args.redirect_drives {
        options.redirect_drives = value;
        changed = true;
    }
    if let Some(value) = args.nla {
        options.nla = value;
        changed = true;
    }

    Ok(changed)
}

/// Prints the merged options for a host.
fn print_options(host: &str, options: &AdvancedOptions) {
    let monitors = if options.selected_monitors.is_empty() {
        "all".to_string()
    } else {
        options
            .selected_monitors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    };

    println!("Advanced options for {host}:");
    println!("  fullscreen:          {}", options.fullscreen);
    println!("  resolution:          {}", options.resolution);
    println!("  multimon:            {}", options.multimon);
    println!("  monitors:            {monitors}");
    println!("  disable fonts:       {}", options.disable_fonts);
    println!("  disable wallpaper:   {}", options.disable_wallpaper);
    println!("  disable themes:      {}", options.disable_themes);
    println!("  disable composition: {}", options.disable_aero);
    println!("  disable window drag: {}", options.disable_drag);
    println!("  compression:         {}", options.compression);
    println!("  audio mode:          {:?}", options.audio_mode);
    println!("  clipboard:           {}", options.clipboard);
    println!("  redirect drives:     {}", options.redirect_drives);
    println!("  nla:                 {}", options.nla);
}
