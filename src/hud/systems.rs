use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{EguiContexts, egui};

use super::HudConfig;
use super::panels::{self, Customization, Overlays};
use crate::GameState;
use crate::checkpoints::course::CheckpointKind;
use crate::checkpoints::{CheckpointReached, MissionComplete};
use crate::controls::{ActiveDevice, ControlsConfig, DeviceClass, TouchInput};
use crate::drone::{self, DroneColor};
use crate::session::{RestartRequested, SessionState};

const HEADING_COLOR: egui::Color32 = egui::Color32::from_rgb(234, 179, 8);

/// Turns course messages into overlay state.
pub fn collect_course_messages(
    mut reached: MessageReader<CheckpointReached>,
    mut complete: MessageReader<MissionComplete>,
    cfg: Res<HudConfig>,
    mut overlays: ResMut<Overlays>,
) {
    for msg in reached.read() {
        if msg.kind == CheckpointKind::Waypoint {
            overlays.show_checkpoint(msg.heading.clone(), cfg.checkpoint_timeout);
        }
    }
    for msg in complete.read() {
        overlays.complete(msg.heading.clone());
    }
}

pub fn expire_panels(time: Res<Time>, mut overlays: ResMut<Overlays>) {
    overlays.tick(time.delta_secs());
}

pub fn reset_overlays(mut overlays: ResMut<Overlays>) {
    overlays.reset();
}

fn centered_window(title: &str) -> egui::Window<'static> {
    egui::Window::new(title)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
}

fn controls_help(ui: &mut egui::Ui, device: DeviceClass) {
    match device {
        DeviceClass::Desktop => {
            ui.label("W/S/A/D  move");
            ui.label("Up/Down  climb and descend");
            ui.label("Left/Right  turn");
            ui.label("+/-  speed    F  first person");
        }
        DeviceClass::Touch => {
            ui.label("Left side  joystick");
            ui.label("Right buttons  turn, climb and descend");
            ui.label("Cam  first person");
        }
    }
}

/// Briefing and the Start button.
pub fn start_panel(
    mut contexts: EguiContexts,
    cfg: Res<HudConfig>,
    device: Res<ActiveDevice>,
    mut next_state: ResMut<NextState<GameState>>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    centered_window("Start").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(egui::RichText::new("Drone Courier").color(HEADING_COLOR));
            ui.add_space(8.0);
            ui.label(&cfg.briefing);
            ui.add_space(8.0);
            controls_help(ui, device.class);
            ui.add_space(12.0);
            if ui.button("Start").clicked() {
                next_state.set(GameState::Flying);
            }
        });
    });

    Ok(())
}

/// Latest checkpoint notice with a Continue button.
pub fn checkpoint_panel(
    mut contexts: EguiContexts,
    cfg: Res<HudConfig>,
    mut overlays: ResMut<Overlays>,
) -> Result {
    let Some(panel) = overlays.checkpoint().cloned() else {
        return Ok(());
    };
    let ctx = contexts.ctx_mut()?;

    let mut dismissed = false;
    egui::Window::new("Checkpoint")
        .anchor(egui::Align2::RIGHT_CENTER, [-40.0, 0.0])
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new(&panel.heading).color(HEADING_COLOR));
                ui.add_space(8.0);
                for line in &cfg.checkpoint_lines {
                    ui.label(line.to_uppercase());
                }
                ui.add_space(8.0);
                dismissed = ui.button("Continue").clicked();
                ui.small(format!("closes in {:.0}s", panel.remaining().ceil()));
            });
        });

    if dismissed {
        overlays.dismiss_checkpoint();
    }
    Ok(())
}

/// Delivery message with a Restart button.
pub fn end_panel(
    mut contexts: EguiContexts,
    overlays: Res<Overlays>,
    mut restart: MessageWriter<RestartRequested>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let heading = overlays.end_heading().unwrap_or("Mission complete");

    centered_window("Delivered").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(egui::RichText::new(heading).color(HEADING_COLOR));
            ui.add_space(12.0);
            if ui.button("Restart").clicked() {
                restart.write(RestartRequested);
            }
        });
    });

    Ok(())
}

/// Speed, camera mode and progress in the top-left corner.
pub fn status_strip(mut contexts: EguiContexts, session: Res<SessionState>) -> Result {
    let ctx = contexts.ctx_mut()?;
    let flight = session.flight();
    let course = session.checkpoints();

    egui::Window::new("Status")
        .anchor(egui::Align2::LEFT_TOP, [12.0, 12.0])
        .title_bar(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!(
                "Speed  {:.1} / {:.0}",
                flight.speed,
                session.tuning().max_speed
            ));
            ui.label(format!("Camera  {}", flight.camera_mode.label()));
            ui.label(format!(
                "Checkpoints  {}/{}",
                course.reached_count(),
                course.len()
            ));
            ui.small(session.layout_name());
        });

    Ok(())
}

fn to_pos(v: Vec2) -> egui::Pos2 {
    egui::pos2(v.x, v.y)
}

/// Paints the touch buttons and, while held, the joystick ring.
pub fn touch_controls(
    mut contexts: EguiContexts,
    device: Res<ActiveDevice>,
    cfg: Res<ControlsConfig>,
    touch: Res<TouchInput>,
    windows: Query<&Window, With<PrimaryWindow>>,
) -> Result {
    if device.class != DeviceClass::Touch {
        return Ok(());
    }
    let Ok(window) = windows.single() else {
        return Ok(());
    };
    let ctx = contexts.ctx_mut()?;
    let size = Vec2::new(window.width(), window.height());
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("touch_controls"),
    ));

    for (action, min, max) in cfg.touch_layout.buttons(size) {
        let held = touch.controls.buttons.is_held(action);
        let fill = if held {
            egui::Color32::from_white_alpha(90)
        } else {
            egui::Color32::from_black_alpha(110)
        };
        let rect = egui::Rect::from_min_max(to_pos(min), to_pos(max));
        painter.rect_filled(rect, 10.0, fill);
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            action.glyph(),
            egui::FontId::proportional(18.0),
            egui::Color32::WHITE,
        );
    }

    if let Some((_, origin)) = touch.joystick_finger {
        let radius = cfg.joystick.max_radius;
        let knob = origin + touch.controls.joystick.displacement;
        painter.circle_stroke(
            to_pos(origin),
            radius,
            egui::Stroke::new(2.0, egui::Color32::from_white_alpha(120)),
        );
        painter.circle_filled(to_pos(knob), radius * 0.35, egui::Color32::from_white_alpha(90));
    }

    Ok(())
}

/// Show/hide button plus the palette and free colour picker for the drone.
pub fn customization_panel(
    mut contexts: EguiContexts,
    mut panel: ResMut<Customization>,
    mut paint: ResMut<DroneColor>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let mut picked = None;

    egui::Area::new(egui::Id::new("customization_toggle"))
        .anchor(egui::Align2::CENTER_TOP, [0.0, 12.0])
        .show(ctx, |ui| {
            if ui.button(panel.button_label()).clicked() {
                panel.toggle();
            }
        });

    if panel.visible {
        egui::Window::new("Drone Customization")
            .anchor(egui::Align2::CENTER_TOP, [0.0, 48.0])
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Color");
                ui.horizontal(|ui| {
                    for (name, color) in drone::body_palette() {
                        let [r, g, b] = panels::to_srgb_u8(color);
                        let swatch = egui::Button::new("")
                            .fill(egui::Color32::from_rgb(r, g, b))
                            .min_size(egui::vec2(22.0, 22.0));
                        if ui.add(swatch).on_hover_text(name).clicked() {
                            picked = Some(color);
                        }
                    }
                    if ui.button("+").clicked() {
                        panel.custom_open = !panel.custom_open;
                    }
                });
                if panel.custom_open {
                    let mut rgb = panels::to_srgb_u8(paint.0);
                    if ui.color_edit_button_srgb(&mut rgb).changed() {
                        picked = Some(Color::srgb_u8(rgb[0], rgb[1], rgb[2]));
                    }
                }
            });
    }

    if let Some(color) = picked {
        paint.set_if_neq(DroneColor(color));
    }
    Ok(())
}
