use egui::{Color32, Pos2};
use image::RgbaImage;
use replay_paint::canvas::CanvasSize;
use replay_paint::color::to_rgba;
use replay_paint::command::Command;
use replay_paint::config::EditorConfig;
use replay_paint::event::{EditorEvent, EventLog};
use replay_paint::tools::ToolKind;
use replay_paint::Editor;

fn editor() -> Editor {
    let config = EditorConfig {
        canvas_width: 60,
        canvas_height: 60,
        ..Default::default()
    };
    Editor::new(&config)
}

fn drag(editor: &mut Editor, from: Pos2, to: Pos2) {
    editor.pointer_down(from);
    editor.pointer_move(from.lerp(to, 0.5));
    editor.pointer_move(to);
    editor.pointer_up(to);
}

fn click(editor: &mut Editor, at: Pos2) {
    editor.pointer_down(at);
    editor.pointer_up(at);
}

fn undo_all(editor: &mut Editor) {
    while editor.history().can_undo() {
        editor.undo();
    }
}

fn redo_all(editor: &mut Editor) {
    while editor.history().can_redo() {
        editor.redo();
    }
    editor.ctx.flush_deferred();
}

#[test]
fn appending_after_undo_truncates_redo_tail() {
    let mut editor = editor();
    editor.select_tool(ToolKind::Pencil);
    drag(&mut editor, Pos2::new(5.0, 5.0), Pos2::new(50.0, 5.0));
    editor.select_tool(ToolKind::Fill);
    click(&mut editor, Pos2::new(30.0, 30.0));
    editor.select_tool(ToolKind::Rectangle);
    drag(&mut editor, Pos2::new(10.0, 10.0), Pos2::new(20.0, 20.0));
    assert_eq!(editor.history().labels(), vec!["Pencil stroke", "Fill", "Rectangle"]);

    editor.undo();
    assert_eq!(editor.history().cursor(), 2);
    assert!(editor.history().can_redo());

    editor.select_tool(ToolKind::Ellipse);
    drag(&mut editor, Pos2::new(30.0, 30.0), Pos2::new(50.0, 45.0));
    assert_eq!(editor.history().labels(), vec!["Pencil stroke", "Fill", "Ellipse"]);
    assert!(!editor.history().can_redo());

    let before = editor.ctx.canvas.image().clone();
    editor.redo();
    assert_eq!(editor.history().cursor(), 3);
    assert_eq!(editor.ctx.canvas.image(), &before);
}

#[test]
fn undo_at_start_and_redo_at_end_change_nothing() {
    let mut editor = editor();
    let blank = editor.ctx.canvas.image().clone();
    editor.undo();
    assert_eq!(editor.history().cursor(), 0);
    assert_eq!(editor.ctx.canvas.image(), &blank);

    editor.select_tool(ToolKind::Stamp);
    click(&mut editor, Pos2::new(30.0, 30.0));
    let drawn = editor.ctx.canvas.image().clone();
    let log = EventLog::new();
    editor.ctx.events.subscribe(log.handler());

    editor.redo();
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.history().cursor(), 1);
    assert_eq!(editor.ctx.canvas.image(), &drawn);
    assert!(log.events().is_empty());
}

#[test]
fn undo_rebuilds_canvas_from_the_retained_prefix() {
    let mut editor = editor();
    let blank = editor.ctx.canvas.image().clone();
    editor.select_tool(ToolKind::Pencil);
    drag(&mut editor, Pos2::new(5.0, 30.0), Pos2::new(55.0, 30.0));
    let after_first = editor.ctx.canvas.image().clone();
    editor.select_tool(ToolKind::Stamp);
    click(&mut editor, Pos2::new(30.0, 10.0));

    let log = EventLog::new();
    editor.ctx.events.subscribe(log.handler());
    editor.undo();
    assert_eq!(editor.ctx.canvas.image(), &after_first);
    assert!(log.events().contains(&EditorEvent::CanvasCleared));
    assert_eq!(log.last(), Some(EditorEvent::HistoryChanged { cursor: 1, len: 2 }));
    assert_eq!(editor.ctx.canvas.checkpoint(), Some(&after_first));

    editor.undo();
    assert_eq!(editor.ctx.canvas.image(), &blank);
}

#[test]
fn undo_to_start_then_redo_to_end_reproduces_live_canvas() {
    let mut editor = editor();
    let blank = editor.ctx.canvas.image().clone();

    editor.set_colors(Color32::RED, Color32::GREEN);
    editor.select_tool(ToolKind::Pencil);
    drag(&mut editor, Pos2::new(2.0, 2.0), Pos2::new(58.0, 50.0));
    editor.select_tool(ToolKind::Spray);
    drag(&mut editor, Pos2::new(10.0, 50.0), Pos2::new(40.0, 55.0));
    editor.select_tool(ToolKind::Eraser);
    drag(&mut editor, Pos2::new(20.0, 0.0), Pos2::new(20.0, 59.0));

    editor.swap_colors();
    editor.select_tool(ToolKind::Rectangle);
    editor.ctx.tools.rectangle.settings.fill = true;
    editor.ctx.tools.rectangle.use_alternate = true;
    drag(&mut editor, Pos2::new(30.0, 5.0), Pos2::new(45.0, 12.0));
    editor.ctx.tools.rectangle.use_alternate = false;

    editor.select_tool(ToolKind::Ellipse);
    drag(&mut editor, Pos2::new(5.0, 20.0), Pos2::new(25.0, 35.0));
    editor.select_tool(ToolKind::Polygon);
    drag(&mut editor, Pos2::new(35.0, 30.0), Pos2::new(55.0, 50.0));

    editor.select_tool(ToolKind::Fill);
    click(&mut editor, Pos2::new(58.0, 2.0));

    editor.set_colors(Color32::BLUE, Color32::WHITE);
    editor.select_tool(ToolKind::Stamp);
    click(&mut editor, Pos2::new(45.0, 45.0));

    editor.select_tool(ToolKind::Text);
    click(&mut editor, Pos2::new(2.0, 30.0));
    editor.ctx.tools.text.begin_editing(Pos2::new(2.0, 30.0), "Hi");

    editor.select_tool(ToolKind::Selection);
    drag(&mut editor, Pos2::new(5.0, 5.0), Pos2::new(20.0, 20.0));
    drag(&mut editor, Pos2::new(10.0, 10.0), Pos2::new(30.0, 35.0));
    editor.select_tool(ToolKind::Pencil);

    editor.resize_canvas(50, 70).unwrap();

    assert_eq!(editor.history().len(), 11);
    let live = editor.ctx.canvas.image().clone();
    let live_colors = editor.ctx.colors.pair();

    undo_all(&mut editor);
    assert_eq!(editor.ctx.canvas.image(), &blank);
    assert_eq!(editor.ctx.colors.pair(), live_colors);

    redo_all(&mut editor);
    assert_eq!(editor.history().cursor(), 11);
    assert_eq!(editor.ctx.canvas.image(), &live);
    assert_eq!(editor.ctx.colors.pair(), live_colors);
}

#[test]
fn replayed_resize_reloads_source_raster_after_flush() {
    let mut editor = editor();
    editor.select_tool(ToolKind::Pencil);
    drag(&mut editor, Pos2::new(0.0, 10.0), Pos2::new(59.0, 10.0));
    editor.resize_canvas(30, 40).unwrap();
    let resized = editor.ctx.canvas.image().clone();
    assert_eq!(editor.history().labels(), vec!["Pencil stroke", "Resize canvas"]);
    match editor.history().commands().last() {
        Some(Command::Resize(resize)) => {
            assert_eq!(resize.before(), CanvasSize::new(60, 60));
            assert_eq!(resize.after(), CanvasSize::new(30, 40));
        }
        other => panic!("expected a resize, got {:?}", other),
    }

    editor.undo();
    assert_eq!(editor.ctx.canvas.size(), CanvasSize::new(60, 60));
    assert!(!editor.ctx.has_pending_tasks());

    editor.redo();
    assert_eq!(editor.ctx.canvas.size(), CanvasSize::new(30, 40));
    assert!(editor.ctx.has_pending_tasks());
    assert_eq!(editor.ctx.flush_deferred(), 1);
    assert_eq!(editor.ctx.canvas.image(), &resized);
}

#[test]
fn commands_after_a_resize_replay_on_the_settled_canvas() {
    let mut editor = editor();
    editor.resize_canvas(80, 20).unwrap();
    editor.select_tool(ToolKind::Pencil);
    drag(&mut editor, Pos2::new(65.0, 2.0), Pos2::new(75.0, 18.0));
    let live = editor.ctx.canvas.image().clone();

    editor.select_tool(ToolKind::Stamp);
    click(&mut editor, Pos2::new(10.0, 10.0));
    editor.undo();
    assert_eq!(editor.ctx.canvas.image(), &live);
    assert!(!editor.ctx.has_pending_tasks());
}

#[test]
fn undo_commits_a_floating_selection_first() {
    let mut editor = editor();
    editor.select_tool(ToolKind::Stamp);
    click(&mut editor, Pos2::new(15.0, 15.0));
    let stamped = editor.ctx.canvas.image().clone();

    editor.select_tool(ToolKind::Selection);
    drag(&mut editor, Pos2::new(0.0, 0.0), Pos2::new(30.0, 30.0));
    drag(&mut editor, Pos2::new(15.0, 15.0), Pos2::new(40.0, 40.0));
    assert!(editor.ctx.tools.selection.is_selected());

    editor.undo();
    assert!(!editor.ctx.tools.selection.is_selected());
    assert_eq!(editor.history().len(), 2);
    assert_eq!(editor.history().cursor(), 1);
    assert_eq!(editor.ctx.canvas.image(), &stamped);
}

#[test]
fn loading_a_document_clears_history() {
    let mut editor = editor();
    editor.select_tool(ToolKind::Stamp);
    click(&mut editor, Pos2::new(15.0, 15.0));

    let document = RgbaImage::from_pixel(16, 8, to_rgba(Color32::GREEN));
    editor.load_image(document.clone()).unwrap();
    assert!(editor.history().is_empty());
    editor.undo();
    assert_eq!(editor.ctx.canvas.image(), &document);

    editor.select_tool(ToolKind::Pencil);
    drag(&mut editor, Pos2::new(0.0, 4.0), Pos2::new(15.0, 4.0));
    editor.undo();
    assert_eq!(editor.ctx.canvas.image(), &document);
}

/// Undo then redo a trailing resize so its raster reload is still queued
fn redo_resize_with_reload_pending(editor: &mut Editor) {
    editor.resize_canvas(50, 70).unwrap();
    editor.undo();
    editor.redo();
    assert!(editor.ctx.has_pending_tasks());
}

fn assert_history_reproduces_canvas(editor: &mut Editor) {
    editor.run_due_tasks(f64::MAX);
    let live = editor.ctx.canvas.image().clone();
    undo_all(editor);
    redo_all(editor);
    assert_eq!(editor.ctx.canvas.image(), &live);
}

#[test]
fn pasted_selection_survives_a_queued_reload() {
    let mut editor = editor();
    editor.select_tool(ToolKind::Stamp);
    click(&mut editor, Pos2::new(15.0, 15.0));
    editor.select_tool(ToolKind::Selection);
    drag(&mut editor, Pos2::new(2.0, 2.0), Pos2::new(28.0, 28.0));
    editor.ctx.tools.selection.copy();
    editor.select_tool(ToolKind::Pencil);
    editor.select_tool(ToolKind::Selection);
    redo_resize_with_reload_pending(&mut editor);

    // what the options panel does for Paste followed by Apply
    let applied = {
        let ctx = &mut editor.ctx;
        assert!(ctx.tools.selection.paste(&mut ctx.canvas, &ctx.colors).is_none());
        ctx.tools.selection.commit(&mut ctx.canvas, &ctx.colors)
    };
    editor.commit(applied.expect("the pasted selection is applied"));
    let pasted = editor.ctx.canvas.image().clone();
    assert!(!editor.ctx.has_pending_tasks());

    assert_eq!(editor.run_due_tasks(f64::MAX), 0);
    assert_eq!(editor.ctx.canvas.image(), &pasted);
    assert_eq!(editor.history().labels().last(), Some(&"Paste"));
    assert_history_reproduces_canvas(&mut editor);
}

#[test]
fn pending_text_is_placed_on_the_reloaded_canvas() {
    let mut editor = editor();
    editor.select_tool(ToolKind::Pencil);
    drag(&mut editor, Pos2::new(0.0, 40.0), Pos2::new(49.0, 40.0));
    editor.select_tool(ToolKind::Text);
    redo_resize_with_reload_pending(&mut editor);

    editor.ctx.tools.text.begin_editing(Pos2::new(4.0, 8.0), "Hey");
    editor.select_tool(ToolKind::Pencil);
    assert_eq!(editor.history().labels().last(), Some(&"Text"));
    assert!(!editor.ctx.has_pending_tasks());

    let placed = editor.ctx.canvas.image().clone();
    editor.run_due_tasks(f64::MAX);
    assert_eq!(editor.ctx.canvas.image(), &placed);
    assert_history_reproduces_canvas(&mut editor);
}
