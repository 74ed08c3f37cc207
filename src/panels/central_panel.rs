use egui::{CursorIcon, Pos2, Sense};

use crate::PaintApp;
use crate::tools::ToolKind;

const CANVAS_MARGIN: f32 = 16.0;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            let canvas_size = app.editor.ctx.canvas.size();
            let size = egui::vec2(canvas_size.width as f32, canvas_size.height as f32) + egui::Vec2::splat(CANVAS_MARGIN * 2.0);
            let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
            let origin = response.rect.min + egui::Vec2::splat(CANVAS_MARGIN);

            let canvas_rect = app.renderer.render(ctx, &painter, origin, &app.editor.ctx.canvas);
            handle_pointer(app, ui, &response, canvas_rect.min);
        });
    });
}

/// Route pointer input over the canvas to the active tool, in canvas pixels
fn handle_pointer(app: &mut PaintApp, ui: &egui::Ui, response: &egui::Response, origin: Pos2) {
    let (pressed, down, released, pointer) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
            i.pointer.interact_pos(),
        )
    });
    let Some(screen_pos) = pointer else {
        return;
    };
    let pos = (screen_pos - origin).to_pos2();

    if app.editor.active_tool() == ToolKind::Selection && app.editor.ctx.tools.selection.on_handle(pos) {
        ui.ctx().set_cursor_icon(CursorIcon::ResizeNwSe);
    }

    if pressed && response.hovered() {
        app.pointer_held = true;
        app.editor.pointer_down(pos);
    } else if app.pointer_held && down {
        app.editor.pointer_move(pos);
    }
    if app.pointer_held && released {
        app.pointer_held = false;
        app.editor.pointer_up(pos);
    }
}
