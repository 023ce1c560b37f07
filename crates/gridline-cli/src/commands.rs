use crate::args::{Cli, Commands};
use crate::{git, init, terminal, theme};
use anyhow::Result;
use gridline_config::{load_components, shared_cache, Config};
use gridline_engine::MultilineRenderer;
use gridline_types::{InputData, RenderContext};
use is_terminal::IsTerminal;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub fn run(cli: Cli) -> Result<()> {
    let env: HashMap<String, String> = std::env::vars().collect();
    let config_path = expand_tilde(&cli.config);

    if let Some(Commands::Init { force }) = cli.command {
        return init::handle(&config_path, force);
    }

    let loaded = Config::load_from(&config_path, &env)
        .map_err(|err| anyhow::anyhow!("cannot load {}: {}", config_path.display(), err))?;
    let config = loaded.config;
    let mut warnings = loaded.warnings;

    let raw = read_stdin();
    let input = match InputData::from_json(&raw) {
        Ok(input) => input,
        Err(err) => {
            warnings.push(format!("input payload unreadable: {}", err));
            InputData::default()
        }
    };

    let mut caps = terminal::probe(&env);
    if cli.no_color || config.style.color == Some(false) {
        caps.color = false;
    } else if config.style.color == Some(true) {
        caps.color = true;
    }

    let theme_name = cli.theme.as_deref().unwrap_or(&config.theme);
    let git_status = input.display_dir().map(Path::new).and_then(git::collect);

    let opts = theme::ThemeOptions {
        theme: theme_name,
        separator: &config.style.separator,
        color: caps.color,
        width: terminal::width(),
    };
    let primary = theme::render_primary(
        &config.components.order,
        &input,
        git_status.as_ref(),
        &caps,
        &opts,
    );
    if !primary.is_empty() {
        println!("{}", primary);
    }

    if config.multiline.enabled && !cli.no_multiline {
        let dir = config.components_dir(&config_path);
        let scan = load_components(&dir, config.multiline.components.as_deref(), shared_cache());
        warnings.extend(scan.warnings);

        if !scan.components.is_empty() {
            let ctx = RenderContext::new(input.to_value(), caps, env);
            let renderer = MultilineRenderer::new(config.multiline.separator.clone());
            let runtime = tokio::runtime::Runtime::new()?;
            let report = runtime.block_on(renderer.render_extra_lines(&ctx, &scan.components));
            warnings.extend(report.warnings);

            for line in report.lines {
                println!("{}", line);
            }
        }
    }

    if cli.debug {
        for warning in &warnings {
            eprintln!("[DEBUG] {}", warning);
        }
    }

    Ok(())
}

/// Read the session payload. An interactive stdin means the tool was run
/// by hand without a host; render from an empty payload instead of
/// blocking on the terminal.
fn read_stdin() -> String {
    if std::io::stdin().is_terminal() {
        return "{}".to_string();
    }
    std::io::read_to_string(std::io::stdin()).unwrap_or_else(|_| "{}".to_string())
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}
