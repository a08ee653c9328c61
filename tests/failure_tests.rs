mod common;

use common::{TestResult, Workspace, recording};
use iconfont_export::engine::CoreError;
use iconfont_export::traits::RecordingRasterizer;
use iconfont_export::PipelineError;
use std::fs;
use std::sync::Arc;

#[test]
fn one_failing_icon_does_not_stop_the_others() -> TestResult {
    let ws = Workspace::new()?;
    let rasterizer = Arc::new(RecordingRasterizer::new().failing_for("star"));
    let err = ws
        .builder(rasterizer.clone())
        .with_color("white")
        .with_sizes([16, 32])
        .with_sprites(true)
        .build()?
        .run_blocking()
        .unwrap_err();

    match err {
        PipelineError::Aggregate { failed, total, first } => {
            assert_eq!(failed, 1);
            assert_eq!(total, 3);
            assert!(matches!(*first, PipelineError::Conversion { ref icon, .. } if icon == "star"));
        }
        other => panic!("expected an aggregate error, got {other:?}"),
    }

    // Every size was still attempted for every icon.
    assert_eq!(rasterizer.requests().len(), 6);
    for icon in ["home", "glass"] {
        assert!(ws.out().join(format!("white/png/16/{icon}.png")).exists());
        assert!(ws.out().join(format!("white/png/32/{icon}.png")).exists());
    }
    assert!(!ws.out().join("white/png/16/star.png").exists());

    // The sprite sheet is still closed, and includes the failing icon's vector.
    let sheet = fs::read_to_string(ws.sprite_file())?;
    assert!(sheet.ends_with("</svg>\n"));
    assert!(sheet.contains(r#"id="fa-star""#));
    Ok(())
}

#[test]
fn unavailable_rasterizer_fails_before_any_output() -> TestResult {
    let ws = Workspace::new()?;
    let err = ws
        .builder(Arc::new(RecordingRasterizer::unavailable()))
        .with_color("white")
        .with_sprites(true)
        .build()?
        .run_blocking()
        .unwrap_err();

    assert!(matches!(err, PipelineError::Precondition { ref program, .. } if program == "recording"));
    assert!(err.to_string().contains("verify that it is in your PATH"));
    assert!(!ws.out().exists());
    assert!(!ws.sprite_file().exists());
    Ok(())
}

#[test]
fn missing_name_table_is_a_resource_error() -> TestResult {
    let ws = Workspace::new()?;
    let err = ws
        .builder(recording())
        .with_name_table(ws.root().join("nope.yml"))
        .with_sprites(true)
        .build()?
        .run_blocking()
        .unwrap_err();

    match err {
        PipelineError::Core(CoreError::ResourceRead { path, .. }) => assert!(path.ends_with("nope.yml")),
        other => panic!("expected a resource error, got {other:?}"),
    }
    // The sheet was opened before the catalog failed, and still gets closed.
    assert!(fs::read_to_string(ws.sprite_file())?.ends_with("</svg>\n"));
    Ok(())
}

#[test]
fn malformed_name_table_is_reported() -> TestResult {
    let ws = Workspace::new()?;
    fs::write(ws.root().join("icons.yml"), "icons: [ {id: home")?;
    let err = ws
        .builder(recording())
        .with_color("white")
        .build()?
        .run_blocking()
        .unwrap_err();
    assert!(matches!(err, PipelineError::Core(CoreError::NameTable(_))));
    Ok(())
}

#[test]
fn missing_template_parameter_fails_every_icon() -> TestResult {
    let ws = Workspace::new()?;
    let err = ws
        .builder(recording())
        .with_color("white")
        .with_sizes([16])
        .with_template_source(r#"<svg width="{{width}}" data-x="{{undeclared}}"><path d="{{path}}"/></svg>"#)
        .build()?
        .run_blocking()
        .unwrap_err();

    match err {
        PipelineError::Aggregate { failed, first, .. } => {
            assert_eq!(failed, 3);
            assert!(matches!(
                *first,
                PipelineError::Core(CoreError::MissingTemplateParameter(_))
            ));
        }
        other => panic!("expected an aggregate error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn invalid_options_are_rejected_at_build_time() {
    let ws = Workspace::new().unwrap();
    let err = ws.builder(recording()).build().unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));

    let err = ws
        .builder(recording())
        .with_color("white")
        .with_sizes(Vec::<u32>::new())
        .build()
        .unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
}
