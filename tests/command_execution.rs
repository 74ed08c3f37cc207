use egui::{Color32, Pos2, Rect, Vec2};
use image::{Rgba, RgbaImage};
use replay_paint::color::to_rgba;
use replay_paint::command::{
    Command, EditorContext, FillCommand, PathCommand, SelectionCommand, ShapeCommand, StampCommand,
    TextCommand, ToolCommand,
};
use replay_paint::config::EditorConfig;
use replay_paint::event::{EditorEvent, EventLog};
use replay_paint::raster;
use replay_paint::state::{
    FillSettings, FillState, PathSettings, PathState, RasterPatch, Revision, SelectionState, Shape,
    ShapeSettings, ShapeState, StampSettings, StampState, TextSettings,
};
use replay_paint::tools::{PathKind, ShapeKind};
use replay_paint::{ColorPair, Tool};

fn small_context() -> EditorContext {
    let config = EditorConfig {
        canvas_width: 40,
        canvas_height: 40,
        ..Default::default()
    };
    EditorContext::new(&config)
}

fn red_blue() -> ColorPair {
    ColorPair::new(Color32::RED, Color32::BLUE)
}

fn solid(width: u32, height: u32, color: Color32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, to_rgba(color))
}

fn selection_state(corner: Pos2, shape: Pos2, image: RgbaImage) -> SelectionState {
    let (width, height) = (image.width() as f32, image.height() as f32);
    SelectionState {
        revision: Revision::Committed,
        colors: red_blue(),
        corner,
        width,
        height,
        shape,
        shape_width: width,
        shape_height: height,
        image,
        is_pasted: false,
        mirror_horizontal: false,
        mirror_vertical: false,
    }
}

#[test]
fn path_command_leaves_live_pencil_untouched() {
    let mut ctx = small_context();
    ctx.tools.pencil.settings.thickness = 13.0;
    let before = ctx.tools.pencil.snapshot(ctx.colors.pair());

    let state = PathState {
        revision: Revision::Committed,
        colors: red_blue(),
        settings: PathSettings {
            thickness: 3.0,
            density: 1,
        },
        points: Vec::new(),
        path: vec![Pos2::new(2.0, 20.0), Pos2::new(38.0, 20.0)],
    };
    let mut command = Command::Path(PathCommand::new(PathKind::Pencil, state));
    command.execute(&mut ctx);

    assert_eq!(ctx.canvas.pixel(20, 20), Some(Color32::RED));
    assert_eq!(ctx.tools.pencil.snapshot(ctx.colors.pair()), before);
    assert_eq!(ctx.colors.primary(), Color32::BLACK);
    assert!(ctx.canvas.preview().pixels().all(|p| p.0[3] == 0));
}

#[test]
fn shape_command_uses_committed_variant_not_live_toggle() {
    let mut ctx = small_context();
    ctx.tools.rectangle.use_alternate = false;
    let before = ctx.tools.rectangle.snapshot(ctx.colors.pair());

    let tall = Rect::from_min_max(Pos2::ZERO, Pos2::new(10.0, 20.0));
    let square = Rect::from_min_max(Pos2::ZERO, Pos2::new(20.0, 20.0));
    let state = ShapeState {
        revision: Revision::Committed,
        colors: ColorPair::new(Color32::BLACK, Color32::RED),
        settings: ShapeSettings {
            stroke_width: 1.0,
            fill: true,
            border: false,
            sides: 5,
        },
        anchors: [Pos2::ZERO, Pos2::new(10.0, 20.0)],
        shape: Shape::Rectangle(tall),
        alternate: Shape::Rectangle(square),
        use_alternate: true,
    };
    let mut command = Command::Shape(ShapeCommand::new(ShapeKind::Rectangle, state.clone()));
    command.execute(&mut ctx);
    assert_eq!(ctx.canvas.pixel(15, 5), Some(Color32::RED));

    let mut ctx_free = small_context();
    let free = ShapeState {
        use_alternate: false,
        ..state
    };
    Command::Shape(ShapeCommand::new(ShapeKind::Rectangle, free)).execute(&mut ctx_free);
    assert_eq!(ctx_free.canvas.pixel(15, 5), Some(Color32::WHITE));
    assert_eq!(ctx_free.canvas.pixel(5, 5), Some(Color32::RED));

    assert_eq!(ctx.tools.rectangle.snapshot(ctx.colors.pair()), before);
}

#[test]
fn stamp_command_restores_live_settings() {
    let mut ctx = small_context();
    ctx.tools.stamp.settings.image_index = 3;
    ctx.tools.stamp.settings.scale = 2.0;
    let before = ctx.tools.stamp.snapshot(ctx.colors.pair());

    let state = StampState {
        revision: Revision::Committed,
        colors: red_blue(),
        settings: StampSettings {
            angle: 0.0,
            scale: 1.0,
            image_index: 2,
        },
        anchor: Pos2::new(20.0, 20.0),
    };
    Command::Stamp(StampCommand::new(state)).execute(&mut ctx);

    assert_eq!(ctx.canvas.pixel(20, 20), Some(Color32::RED));
    assert_eq!(ctx.tools.stamp.snapshot(ctx.colors.pair()), before);
}

#[test]
fn text_command_keeps_live_text_box() {
    let mut ctx = small_context();
    ctx.tools.text.begin_editing(Pos2::new(1.0, 1.0), "draft");
    let before = ctx.tools.text.snapshot(ctx.colors.pair());

    let mut state = ctx.tools.text.snapshot(red_blue());
    state.revision = Revision::Committed;
    state.settings = TextSettings {
        font_size: 24.0,
        bold: true,
        underline: true,
    };
    state.text = "Hi".to_owned();
    state.origin = Pos2::new(2.0, 2.0);
    state.width = ctx.tools.text.measure("Hi");
    Command::Text(TextCommand::new(state)).execute(&mut ctx);

    assert!(ctx.canvas.image().pixels().any(|p| *p == to_rgba(Color32::RED)));
    assert_eq!(ctx.tools.text.snapshot(ctx.colors.pair()), before);
    assert_eq!(ctx.tools.text.editor_value(), "draft");
    assert!(ctx.tools.text.is_editing());
}

#[test]
fn assign_state_propagates_committed_colors() {
    let mut ctx = small_context();
    let log = EventLog::new();
    ctx.events.subscribe(log.handler());
    ctx.assign_colors(ColorPair::new(Color32::GREEN, Color32::YELLOW));

    let state = StampState {
        revision: Revision::Committed,
        colors: red_blue(),
        settings: StampSettings::default(),
        anchor: Pos2::new(5.0, 5.0),
    };
    let mut command = StampCommand::new(state);
    command.save_state(&ctx);
    command.assign_state(&mut ctx);
    assert_eq!(ctx.colors.primary(), Color32::RED);
    assert_eq!(ctx.colors.secondary(), Color32::BLUE);
    assert_eq!(
        log.last(),
        Some(EditorEvent::ColorsChanged {
            primary: Color32::RED,
            secondary: Color32::BLUE
        })
    );

    command.perform(&mut ctx);
    command.restore_state(&mut ctx);
    assert_eq!(ctx.colors.pair(), ColorPair::new(Color32::GREEN, Color32::YELLOW));
    assert_eq!(
        log.last(),
        Some(EditorEvent::ColorsChanged {
            primary: Color32::GREEN,
            secondary: Color32::YELLOW
        })
    );
}

#[test]
fn selection_command_clears_source_and_composites_at_corner() {
    let mut ctx = small_context();
    let everything = ctx.canvas.rect();
    raster::fill_rect(ctx.canvas.image_mut(), everything, Color32::GREEN);

    // a live selection elsewhere on the canvas
    let live_rect = Rect::from_min_size(Pos2::new(30.0, 30.0), Vec2::splat(4.0));
    assert!(ctx.tools.selection.lift(live_rect, &mut ctx.canvas));

    let state = selection_state(Pos2::new(5.0, 5.0), Pos2::new(20.0, 20.0), solid(10, 10, Color32::RED));
    Command::Selection(SelectionCommand::new(state)).execute(&mut ctx);

    // source region filled with the background
    assert_eq!(ctx.canvas.pixel(20, 20), Some(Color32::WHITE));
    assert_eq!(ctx.canvas.pixel(29, 29), Some(Color32::WHITE));
    // held image at the corner, 10x10
    assert_eq!(ctx.canvas.pixel(5, 5), Some(Color32::RED));
    assert_eq!(ctx.canvas.pixel(14, 14), Some(Color32::RED));
    assert_eq!(ctx.canvas.pixel(15, 15), Some(Color32::GREEN));
    assert_eq!(ctx.canvas.pixel(4, 4), Some(Color32::GREEN));

    let tool = &ctx.tools.selection;
    assert!(!tool.is_selected());
    assert_eq!(tool.corner(), Pos2::new(30.0, 30.0));
    assert_eq!(tool.dimensions(), Vec2::splat(4.0));
}

#[test]
fn pasted_selection_leaves_source_alone() {
    let mut ctx = small_context();
    let everything = ctx.canvas.rect();
    raster::fill_rect(ctx.canvas.image_mut(), everything, Color32::GREEN);

    let mut state = selection_state(Pos2::new(5.0, 5.0), Pos2::new(20.0, 20.0), solid(10, 10, Color32::RED));
    state.is_pasted = true;
    Command::Selection(SelectionCommand::new(state)).execute(&mut ctx);

    assert_eq!(ctx.canvas.pixel(25, 25), Some(Color32::GREEN));
    assert_eq!(ctx.canvas.pixel(5, 5), Some(Color32::RED));
}

#[test]
fn selection_replay_applies_mirror_and_scale() {
    let mut ctx = small_context();
    let mut image = solid(2, 1, Color32::RED);
    image.put_pixel(1, 0, to_rgba(Color32::BLUE));
    let mut state = selection_state(Pos2::ZERO, Pos2::new(30.0, 30.0), image);
    state.mirror_horizontal = true;
    state.width = 4.0;
    state.height = 2.0;
    Command::Selection(SelectionCommand::new(state)).execute(&mut ctx);

    assert_eq!(ctx.canvas.pixel(0, 0), Some(Color32::BLUE));
    assert_eq!(ctx.canvas.pixel(1, 1), Some(Color32::BLUE));
    assert_eq!(ctx.canvas.pixel(3, 1), Some(Color32::RED));
    assert_eq!(ctx.canvas.pixel(4, 0), Some(Color32::WHITE));
}

#[test]
fn fill_command_blits_stored_patch_verbatim() {
    let mut ctx = small_context();
    // arbitrary canvas contents the fill never saw
    raster::stroke_polyline(
        ctx.canvas.image_mut(),
        &[Pos2::new(0.0, 0.0), Pos2::new(39.0, 39.0)],
        5.0,
        Color32::BLACK,
    );
    let before = ctx.canvas.image().clone();

    let mut patch = solid(5, 6, Color32::RED);
    patch.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
    patch.put_pixel(4, 5, to_rgba(Color32::YELLOW));
    let state = FillState {
        revision: Revision::Committed,
        colors: red_blue(),
        settings: FillSettings::default(),
        patch: Some(RasterPatch {
            x: 3,
            y: 4,
            image: patch.clone(),
        }),
    };
    Command::Fill(FillCommand::new(state)).execute(&mut ctx);

    for y in 0..40 {
        for x in 0..40 {
            let inside = (3..8).contains(&x) && (4..10).contains(&y);
            let expected = if inside {
                *patch.get_pixel(x - 3, y - 4)
            } else {
                *before.get_pixel(x, y)
            };
            assert_eq!(*ctx.canvas.image().get_pixel(x, y), expected, "pixel ({x}, {y})");
        }
    }
    assert!(ctx.tools.fill.patch().is_none());
}

#[test]
#[should_panic(expected = "committed fill has no patch")]
fn committed_fill_without_patch_is_a_bug() {
    let mut ctx = small_context();
    let state = FillState {
        revision: Revision::Committed,
        colors: red_blue(),
        settings: FillSettings::default(),
        patch: None,
    };
    Command::Fill(FillCommand::new(state)).execute(&mut ctx);
}

#[test]
#[should_panic(expected = "uncommitted state")]
fn live_snapshot_cannot_be_assigned() {
    let mut ctx = small_context();
    let live = ctx.tools.stamp.snapshot(ctx.colors.pair());
    Command::Stamp(StampCommand::new(live)).execute(&mut ctx);
}

#[test]
fn live_fill_and_replayed_fill_agree() {
    let mut ctx = small_context();
    raster::stroke_rect(
        ctx.canvas.image_mut(),
        Rect::from_min_max(Pos2::new(5.0, 5.0), Pos2::new(25.0, 25.0)),
        1.0,
        Color32::BLACK,
    );
    let mut replay = small_context();
    *replay.canvas.image_mut() = ctx.canvas.image().clone();

    let command = ctx
        .tools
        .fill
        .on_pointer_down(Pos2::new(10.0, 10.0), &mut ctx.canvas, &ctx.colors)
        .expect("fill inside the box");
    assert_eq!(ctx.canvas.pixel(10, 10), Some(Color32::BLACK));
    assert_eq!(ctx.canvas.pixel(30, 30), Some(Color32::WHITE));

    let mut command = command;
    command.execute(&mut replay);
    assert_eq!(replay.canvas.image(), ctx.canvas.image());
}
