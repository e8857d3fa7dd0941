use std::{fs, process};

use anyhow::{Context, Result, bail};

use fogline::{
    config::PlayerConfig,
    logging,
    player::Player,
    script::{Script, SceneKind},
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const PLAY_USAGE: &str = "fogline play [script.json]";
const CHECK_USAGE: &str = "fogline check <script.json>";
const EXPORT_USAGE: &str = "fogline export <output.json>";

fn run() -> Result<()> {
    logging::init()?;
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("play") => play(args.next().as_deref()),
        Some("check") => {
            let path = args.next().context(CHECK_USAGE)?;
            check(&path)
        }
        Some("export") => {
            let path = args.next().context(EXPORT_USAGE)?;
            export(&path)
        }
        _ => bail!(
            "Fogline — terminal scene player\n\nUsage:\n  {PLAY_USAGE}\n  {CHECK_USAGE}\n  {EXPORT_USAGE}"
        ),
    }
}

fn load_script(path: &str) -> Result<Script> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    Script::from_json(&json).with_context(|| format!("Invalid script {path}"))
}

fn play(path: Option<&str>) -> Result<()> {
    let script = match path {
        Some(path) => load_script(path)?,
        None => Script::builtin(),
    };
    let mut player = Player::new(script, PlayerConfig::load());
    player.play()
}

fn check(path: &str) -> Result<()> {
    let script = load_script(path)?;
    let dialogue = script
        .scenes()
        .iter()
        .filter(|s| s.kind == SceneKind::Dialogue)
        .count();
    eprintln!(
        "{path}: {} scenes ({dialogue} dialogue), {:.1}s total",
        script.len(),
        script.total_duration_ms() as f64 / 1000.0,
    );
    Ok(())
}

fn export(output_path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(&Script::builtin())?;
    fs::write(output_path, &json).with_context(|| format!("Failed to write {output_path}"))?;
    eprintln!("Wrote built-in script -> {output_path}");
    Ok(())
}
