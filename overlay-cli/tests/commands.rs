//! Integration tests for the logo-overlay subcommands.
//!
//! Images are generated into a temp directory; outputs are decoded and
//! checked.

use std::path::{Path, PathBuf};

use overlay_cli::commands;
use overlay_cli::{ComposeArgs, EditArgs, OverlayConfig, PreviewArgs, ReplayArgs};

fn write_png(dir: &Path, name: &str, width: u32, height: u32, rgba: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(width, height, image::Rgba(rgba))
        .save(&path)
        .expect("write png");
    path
}

fn config(dir: &Path) -> OverlayConfig {
    OverlayConfig {
        out_dir: dir.to_path_buf(),
        system_fonts: false,
        ..OverlayConfig::new()
    }
}

// ==========================================================================
// compose
// ==========================================================================

#[test]
fn test_compose_writes_native_size_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let background = write_png(dir.path(), "bg.png", 1600, 1200, [255, 255, 255, 255]);
    let logo = write_png(dir.path(), "logo.png", 64, 64, [0, 0, 255, 255]);

    let args = ComposeArgs {
        background,
        logo,
        output: None,
        edit: EditArgs {
            x: Some("100".to_string()),
            y: Some("100".to_string()),
            no_label: true,
            ..EditArgs::default()
        },
    };
    let path = commands::compose(&config(dir.path()), &args).expect("compose");
    assert_eq!(path, dir.path().join("composite-image.png"));

    let out = image::open(&path).expect("open output").to_rgba8();
    assert_eq!(out.dimensions(), (1600, 1200));
    let [r, g, b, a] = out.get_pixel(300, 300).0;
    assert!(r < 3 && g < 3 && b > 252 && a == 255);
    assert_eq!(out.get_pixel(150, 150).0, [255, 255, 255, 255]);
}

#[test]
fn test_compose_rejects_gif_logo() {
    let dir = tempfile::tempdir().expect("tempdir");
    let background = write_png(dir.path(), "bg.png", 100, 100, [0, 0, 0, 255]);
    let logo = dir.path().join("logo.gif");
    std::fs::write(&logo, b"GIF89a").expect("write gif");

    let args = ComposeArgs {
        background,
        logo,
        output: Some(PathBuf::from("out.png")),
        edit: EditArgs::default(),
    };
    let err = commands::compose(&config(dir.path()), &args).unwrap_err();
    assert!(format!("{err:#}").contains("PNG, JPG, or WebP"));
    assert!(!dir.path().join("out.png").exists());
}

// ==========================================================================
// preview
// ==========================================================================

#[test]
fn test_preview_writes_svg() {
    let dir = tempfile::tempdir().expect("tempdir");
    let background = write_png(dir.path(), "bg.png", 400, 300, [10, 10, 10, 255]);
    let logo = write_png(dir.path(), "logo.png", 50, 25, [200, 0, 0, 255]);

    let args = PreviewArgs {
        background,
        logo: Some(logo),
        no_grid: true,
        output: PathBuf::from("nested/preview.svg"),
        edit: EditArgs {
            rotation: Some("45".to_string()),
            ..EditArgs::default()
        },
    };
    let path = commands::preview(&config(dir.path()), &args).expect("preview");
    let svg = std::fs::read_to_string(path).expect("read svg");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("width=\"800\" height=\"600\""));
    assert!(svg.contains("rotate(45 100 75)"));
    assert!(svg.contains("100×50px"));
    assert!(!svg.contains("<line"));
}

// ==========================================================================
// replay
// ==========================================================================

#[test]
fn test_replay_script_exports_and_dumps_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_png(dir.path(), "bg.png", 800, 600, [255, 255, 255, 255]);
    write_png(dir.path(), "logo.png", 40, 40, [0, 160, 0, 255]);
    let script = dir.path().join("edits.json");
    std::fs::write(
        &script,
        r#"[
            {"upload": {"slot": "background", "path": "bg.png"}},
            {"upload": {"slot": "logo", "path": "logo.png"}},
            {"upload": {"slot": "logo", "path": "logo.bmp"}},
            {"type": "pointer_down", "data": {"x": 60.0, "y": 60.0}},
            {"type": "pointer_move", "data": {"x": 214.0, "y": 96.0}},
            {"type": "pointer_up"},
            {"type": "set_label_visible", "data": {"visible": false}}
        ]"#,
    )
    .expect("write script");

    let args = ReplayArgs {
        script,
        output: Some(PathBuf::from("replayed.png")),
        dump_state: true,
    };
    let outcome = commands::replay(&config(dir.path()), &args).expect("replay");
    assert_eq!(outcome.report.applied, 6);
    assert_eq!(outcome.report.rejected, 1);

    let state: serde_json::Value =
        serde_json::from_str(&outcome.state_json.expect("state")).expect("json");
    // Grabbed 10 px inside the logo at (50, 50); dropped at (204, 86) -> snapped.
    assert_eq!(state["transform"]["x"], 200);
    assert_eq!(state["transform"]["y"], 90);

    let path = outcome.output.expect("exported");
    assert_eq!(path, dir.path().join("replayed.png"));
    let out = image::open(path).expect("open").to_rgba8();
    assert_eq!(out.dimensions(), (800, 600));
    let [r, g, b, a] = out.get_pixel(250, 140).0;
    assert!(r < 3 && b < 3 && (158..=162).contains(&g) && a == 255);
}

#[test]
fn test_replay_without_background_exports_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = dir.path().join("edits.json");
    std::fs::write(&script, r#"[{"type": "rotate_by", "data": {"degrees": 90}}]"#)
        .expect("write script");

    let args = ReplayArgs {
        script,
        output: None,
        dump_state: false,
    };
    let outcome = commands::replay(&config(dir.path()), &args).expect("replay");
    assert!(outcome.output.is_none());
    assert!(outcome.state_json.is_none());
    assert!(!dir.path().join("composite-image.png").exists());
}

#[test]
fn test_replay_rejects_malformed_script() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = dir.path().join("edits.json");
    std::fs::write(&script, "not json").expect("write script");

    let args = ReplayArgs {
        script,
        output: None,
        dump_state: false,
    };
    let err = commands::replay(&config(dir.path()), &args).unwrap_err();
    assert!(format!("{err:#}").contains("parsing script"));
}
