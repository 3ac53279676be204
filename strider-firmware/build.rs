//! Build script for strider-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates watch.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Allowed integer range for one key
struct IntKey {
    name: &'static str,
    min: i64,
    max: i64,
}

const fn int_key(name: &'static str, min: i64, max: i64) -> IntKey {
    IntKey { name, min, max }
}

/// Integer keys per section with the ranges the firmware accepts
const INT_KEYS: &[(&str, &[IntKey])] = &[
    (
        "thresholds",
        &[
            int_key("x", 0, u32::MAX as i64),
            int_key("y", 0, u32::MAX as i64),
            int_key("z", 0, u32::MAX as i64),
        ],
    ),
    (
        "display",
        &[
            int_key("origin_y", i32::MIN as i64, i32::MAX as i64),
            int_key("span", 1, i32::MAX as i64),
            int_key("full_scale", i32::MIN as i64, i32::MAX as i64),
            int_key("max_y", i32::MIN as i64, i32::MAX as i64),
        ],
    ),
    (
        "reward",
        &[
            int_key("base_cycle_s", 0, u32::MAX as i64),
            int_key("cycle_growth_s", 0, u32::MAX as i64),
            int_key("min_steps", 0, u32::MAX as i64),
            int_key("max_bars", 1, u8::MAX as i64),
        ],
    ),
    ("sampling", &[int_key("rate_hz", 1, 100)]),
    ("clock", &[int_key("epoch_offset_s", 0, u32::MAX as i64)]),
    ("haptic", &[int_key("pulse_ms", 1, u16::MAX as i64)]),
];

/// Validate watch.toml configuration at compile time
fn validate_config() {
    // Re-run if watch.toml changes
    println!("cargo:rerun-if-changed=watch.toml");

    let config_path = Path::new("watch.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: watch.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a watch.toml configuration file.            ║\n\
            ║  Please create one in the strider-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read watch.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in watch.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let errors = collect_errors(&config);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid watch configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=watch.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check every section and key against what the firmware parser accepts
fn collect_errors(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let root = match config.as_table() {
        Some(t) => t,
        None => return vec!["top level must be a table".to_string()],
    };

    for (section, body) in root {
        let table = match body {
            toml::Value::Table(t) => t,
            _ => {
                errors.push(format!("'{}' must be a [section]", section));
                continue;
            }
        };

        if section == "clock" {
            if let Some(style) = table.get("style") {
                match style.as_str() {
                    Some("24h") | Some("12h") => {}
                    _ => errors.push("[clock] style must be \"24h\" or \"12h\"".to_string()),
                }
            }
        }

        let keys = match INT_KEYS.iter().find(|(name, _)| *name == section.as_str()) {
            Some((_, keys)) => *keys,
            None => {
                errors.push(format!("unknown section [{}]", section));
                continue;
            }
        };

        for (key, value) in table {
            if section == "clock" && key == "style" {
                continue;
            }
            let range = match keys.iter().find(|k| k.name == key.as_str()) {
                Some(range) => range,
                None => {
                    errors.push(format!("[{}] unknown key '{}'", section, key));
                    continue;
                }
            };
            match value.as_integer() {
                Some(v) if v < range.min || v > range.max => errors.push(format!(
                    "[{}] {} must be {}-{}",
                    section, key, range.min, range.max
                )),
                Some(_) => {}
                None => errors.push(format!("[{}] {} must be an integer", section, key)),
            }
        }
    }

    if let Some(toml::Value::Integer(0)) = config.get("display").and_then(|d| d.get("full_scale")) {
        errors.push("[display] full_scale must be non-zero".to_string());
    }

    errors
}
