//! Handler for the `config` command group.

use std::fs;
use std::io::IsTerminal;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::store::StoreBackend;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
///
/// An existing file is only replaced with `--force`, or after confirmation
/// when running interactively.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force && !confirm_overwrite(path)? {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: format!("{} already exists (use --force to overwrite)", path.display()),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, CONFIG_TEMPLATE)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.init",
            "path": path.display().to_string(),
        }));
        return Ok(());
    }

    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note("2. Export the API key for your provider (e.g. GEMINI_API_KEY)");
    output::note(&format!("3. Run: askdb config validate -c {}", path.display()));
    output::note(&format!("4. Run: askdb serve -c {}", path.display()));
    Ok(())
}

fn confirm_overwrite(path: &Path) -> Result<bool> {
    if output::is_json() || output::is_quiet() || !std::io::stdin().is_terminal() {
        return Ok(false);
    }
    let answer = dialoguer::Confirm::new()
        .with_prompt(format!("{} exists. Overwrite?", path.display()))
        .default(false)
        .interact()?;
    Ok(answer)
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load_or_default(path)?;
    let key_var = config.llm.provider.api_key_var();
    let key_loaded = std::env::var(key_var).is_ok_and(|k| !k.trim().is_empty());

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "file_exists": path.exists(),
            "server": {
                "bind": config.server.bind,
                "max_upload_bytes": config.server.max_upload_bytes,
            },
            "llm": {
                "provider": config.llm.provider.as_str(),
                "model": config.llm.model(),
                "api_key_var": key_var,
                "api_key_loaded": key_loaded,
            },
            "store": {
                "backend": config.store.backend.to_string(),
                "path": config.store.path.display().to_string(),
            },
            "prompt": {
                "max_examples": config.prompt.max_examples,
                "max_annotations": config.prompt.max_annotations,
            },
            "logging": {
                "level": config.logging.level,
                "format": config.logging.format,
            },
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());
    if !path.exists() {
        output::note("(file not found, showing defaults)");
    }

    output::section("Server");
    output::field("Bind", &config.server.bind);
    output::field("Max upload", format!("{} bytes", config.server.max_upload_bytes));

    output::section("LLM");
    output::field("Provider", config.llm.provider);
    output::field("Model", config.llm.model());
    if key_loaded {
        output::success(&format!("API key loaded from {key_var}"));
    } else {
        output::warning(&format!("{key_var} not set"));
    }

    output::section("Store");
    output::field("Backend", config.store.backend);
    if config.store.backend == StoreBackend::Sqlite {
        output::field("Path", config.store.path.display());
    }

    output::section("Prompt");
    output::field("Max examples", limit(config.prompt.max_examples));
    output::field("Max notes", limit(config.prompt.max_annotations));

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);
    Ok(())
}

fn limit(value: Option<usize>) -> String {
    value.map_or_else(|| "all".to_string(), |n| n.to_string())
}

/// Execute `config validate`.
///
/// Unlike the other commands, a missing file is an error here.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    let mut warnings = Vec::new();
    let key_var = config.llm.provider.api_key_var();
    if std::env::var(key_var).map_or(true, |k| k.trim().is_empty()) {
        warnings.push(format!("{key_var} is not set; `ask` and `serve` will fail"));
    }
    if config.store.backend == StoreBackend::Memory {
        warnings.push("memory store: examples and annotations are lost on exit".to_string());
    }

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "valid": true,
            "warnings": warnings,
        }));
        return Ok(());
    }

    output::section("Config Validation");
    output::field("Path", path.display());
    output::success("Config file is valid");
    if !warnings.is_empty() {
        output::section("Warnings");
        for warning in &warnings {
            output::warning(warning);
        }
    }
    Ok(())
}
