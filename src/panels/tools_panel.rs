use egui::color_picker::{Alpha, color_edit_button_srgba};

use crate::PaintApp;
use crate::components::ToolButton;
use crate::config::MAX_CANVAS_EDGE;
use crate::tools::ToolKind;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.horizontal_wrapped(|ui| {
                for kind in ToolKind::ALL {
                    let selected = app.editor.active_tool() == kind;
                    if ToolButton::new(kind, selected).show(ui).clicked() {
                        log::info!("Tool selected from UI: {:?}", kind);
                        app.editor.select_tool(kind);
                    }
                }
            });
            ui.separator();

            colors_section(app, ui);
            ui.separator();

            let active = app.editor.active_tool();
            ui.strong(app.editor.ctx.tools.get(active).name());
            app.editor.tool_ui(ui);
            ui.separator();

            history_section(app, ui);
            ui.separator();

            canvas_section(app, ui);

            if let Some(status) = &app.status {
                ui.separator();
                ui.colored_label(ui.visuals().error_fg_color, status);
            }
        });
}

fn colors_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    let pair = app.editor.ctx.colors.pair();
    let (mut primary, mut secondary) = (pair.primary, pair.secondary);
    ui.horizontal(|ui| {
        ui.label("Colors:");
        let changed = color_edit_button_srgba(ui, &mut primary, Alpha::OnlyBlend).changed()
            | color_edit_button_srgba(ui, &mut secondary, Alpha::OnlyBlend).changed();
        if changed {
            app.editor.set_colors(primary, secondary);
        }
        if ui.button("⇄").on_hover_text("Swap colors (X)").clicked() {
            app.editor.swap_colors();
        }
    });
}

fn history_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        let can_undo = app.editor.history().can_undo();
        let can_redo = app.editor.history().can_redo();
        if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
            app.editor.undo();
        }
        if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
            app.editor.redo();
        }
    });

    let history = app.editor.history();
    ui.label(format!("History: {} of {}", history.cursor(), history.len()));
    egui::ScrollArea::vertical()
        .id_salt("command_history")
        .max_height(160.0)
        .show(ui, |ui| {
            for (index, label) in history.labels().into_iter().enumerate() {
                if index < history.cursor() {
                    ui.label(label);
                } else {
                    ui.weak(label);
                }
            }
        });
}

fn canvas_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    ui.strong("Canvas");
    ui.horizontal(|ui| {
        ui.add(egui::DragValue::new(&mut app.size_input[0]).range(1..=MAX_CANVAS_EDGE));
        ui.label("×");
        ui.add(egui::DragValue::new(&mut app.size_input[1]).range(1..=MAX_CANVAS_EDGE));
    });
    ui.horizontal(|ui| {
        let [width, height] = app.size_input;
        if ui.button("Resize").clicked() {
            match app.editor.resize_canvas(width, height) {
                Ok(()) => app.status = None,
                Err(err) => app.report(err),
            }
        }
        if ui.button("New").clicked() {
            match app.editor.new_canvas(width, height) {
                Ok(()) => app.status = None,
                Err(err) => app.report(err),
            }
        }
    });
}
