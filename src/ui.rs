/*
 * UI Module
 *
 * The control window: flock statistics, a speed slider, color mode buttons
 * and a chat box that accepts the same commands viewers type in chat.
 * Every control is turned into a Command so the simulation has a single
 * entry point for outside changes.
 */

use nannou_egui::{egui, Egui};

use crate::color::ColorMode;
use crate::command::Command;
use crate::debug::DebugInfo;
use crate::params::SimulationParams;
use crate::simulation::SimState;

// Draw the controls and collect the commands they produced this frame
pub fn update_ui(
    egui: &mut Egui,
    state: &SimState,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
    command_input: &mut String,
) -> Vec<Command> {
    let mut commands = Vec::new();
    let ctx = egui.begin_frame();

    egui::Window::new("Fireflies")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Flock", |ui| {
                ui.label(format!("Fireflies: {}", debug_info.fireflies));
                ui.label(format!("Leaders: {}", debug_info.leaders));
                ui.label(format!("Following a leader: {}", debug_info.led_followers));
                match debug_info.last_changeup {
                    Some(picks) => ui.label(format!("Last changeup: {} followers", picks)),
                    None => ui.label("Last changeup: none yet"),
                };
                ui.label(format!("Next changeup in {:.1} s", state.changeup_timer.max(0.0)));
            });

            ui.collapsing("Motion", |ui| {
                let mut max_speed = state.max_speed;
                let slider = egui::Slider::new(&mut max_speed, SimulationParams::max_speed_range()).text("Max Speed");
                if ui.add(slider).changed() {
                    commands.push(Command::Speed(max_speed));
                }
            });

            ui.collapsing("Color", |ui| {
                ui.label(format!("Mode: {}", describe(state.color_mode)));
                ui.horizontal(|ui| {
                    if ui.button("Leader").clicked() {
                        commands.push(Command::Color(ColorMode::Leader));
                    }
                    if ui.button("Random").clicked() {
                        commands.push(Command::Color(ColorMode::Random));
                    }
                    if ui.button("Rainbow").clicked() {
                        commands.push(Command::Rainbow(None));
                    }
                });

                // Only tunes a running rainbow; switching modes is the button's job
                if let ColorMode::Rainbow(speed) = state.color_mode {
                    let mut rainbow_speed = speed;
                    let slider = egui::Slider::new(&mut rainbow_speed, SimulationParams::rainbow_speed_range())
                        .text("Rainbow Speed");
                    if ui.add(slider).changed() {
                        commands.push(Command::Rainbow(Some(rainbow_speed)));
                    }
                }
            });

            ui.separator();
            ui.label("Chat command");
            ui.horizontal(|ui| {
                let response = ui.text_edit_singleline(command_input);
                let submitted = response.lost_focus() && ui.input().key_pressed(egui::Key::Enter);
                if ui.button("Send").clicked() || submitted {
                    match Command::parse(command_input) {
                        Some(command) => commands.push(command),
                        None => log::debug!("ignoring chat input {:?}", command_input),
                    }
                    command_input.clear();
                }
            });

            ui.separator();
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
            ui.label(format!("Physics steps this frame: {}", debug_info.physics_steps_per_frame));
            ui.label(format!("Degenerate velocities: {}", debug_info.degenerate_velocities));
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    commands
}

fn describe(mode: ColorMode) -> String {
    match mode {
        ColorMode::Leader => "leader".to_string(),
        ColorMode::Random => "random".to_string(),
        ColorMode::FixedHue(hue) => format!("hue {:.2}", hue),
        ColorMode::Rainbow(speed) => format!("rainbow ({:.2}/s)", speed),
    }
}
