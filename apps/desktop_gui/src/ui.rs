//! Shared-device battle screen: one press zone per player, a center strip
//! with the match score and reset control.

use battle_core::{BattleCommand, BattleHandle, BattleSnapshot, TimerPhase};
use eframe::egui;
use egui::{Color32, Pos2, Rect, RichText, Sense, Vec2};
use shared::domain::{Penalty, MAX_PLAYERS};

const CENTER_STRIP_HEIGHT: f32 = 64.0;

pub struct CubeDuelApp {
    handle: BattleHandle,
    pressed: [bool; MAX_PLAYERS],
}

impl CubeDuelApp {
    pub fn new(handle: BattleHandle) -> Self {
        Self {
            handle,
            pressed: [false; MAX_PLAYERS],
        }
    }

    fn zones(&self, screen: Rect, player_count: usize) -> Vec<(usize, Rect)> {
        let half_height = (screen.height() - CENTER_STRIP_HEIGHT) / 2.0;
        let top = Rect::from_min_size(screen.min, Vec2::new(screen.width(), half_height));
        let bottom = Rect::from_min_size(
            Pos2::new(screen.min.x, screen.max.y - half_height),
            Vec2::new(screen.width(), half_height),
        );
        match player_count {
            4 => {
                let (tl, tr) = split_columns(top);
                let (bl, br) = split_columns(bottom);
                vec![(0, tl), (1, tr), (2, bl), (3, br)]
            }
            3 => {
                let (bl, br) = split_columns(bottom);
                vec![(0, top), (1, bl), (2, br)]
            }
            _ => vec![(0, top), (1, bottom)],
        }
    }

    fn center_strip(&self, screen: Rect) -> Rect {
        let half_height = (screen.height() - CENTER_STRIP_HEIGHT) / 2.0;
        Rect::from_min_size(
            Pos2::new(screen.min.x, screen.min.y + half_height),
            Vec2::new(screen.width(), CENTER_STRIP_HEIGHT),
        )
    }

    fn zone_ui(
        &mut self,
        ui: &mut egui::Ui,
        slot: usize,
        rect: Rect,
        snapshot: &BattleSnapshot,
        dark: bool,
    ) {
        let view = &snapshot.timers[slot];
        let config = &snapshot.config;
        let theme = hex_color(config.color_theme.hex());
        let awaiting = view.phase == TimerPhase::AwaitingPenalty;

        let background = if view.phase == TimerPhase::Ready {
            theme
        } else if view.phase == TimerPhase::Running {
            if config.full_black {
                Color32::BLACK
            } else if dark {
                hex_color("#1a1a1a")
            } else {
                Color32::WHITE
            }
        } else if config.full_black {
            Color32::BLACK
        } else if dark {
            hex_color("#2a2a2a")
        } else {
            hex_color("#f0f0f0")
        };
        ui.painter().rect_filled(rect, 0, background);

        // Input is disabled while a penalty choice is pending, matching the
        // state machine which ignores presses in that phase anyway.
        if !awaiting {
            let response = ui.interact(
                rect,
                egui::Id::new(("press-zone", slot)),
                Sense::click_and_drag(),
            );
            let down = response.is_pointer_button_down_on();
            if down && !self.pressed[slot] {
                self.handle.send(BattleCommand::PressStart(slot));
            }
            if !down && self.pressed[slot] {
                self.handle.send(BattleCommand::PressEnd(slot));
            }
            self.pressed[slot] = down;
        } else {
            self.pressed[slot] = false;
        }

        let time_color = if view.phase == TimerPhase::Ready {
            Color32::WHITE
        } else if view.phase == TimerPhase::Running {
            if dark {
                Color32::WHITE
            } else {
                Color32::BLACK
            }
        } else if dark {
            hex_color("#888888")
        } else {
            hex_color("#666666")
        };

        ui.scope_builder(egui::UiBuilder::new().max_rect(rect.shrink(12.0)), |ui| {
            ui.vertical_centered(|ui| {
                let score = if config.best_of_mode {
                    view.bo_score
                } else {
                    view.score
                };
                let badge = if view.is_winner {
                    theme
                } else {
                    Color32::from_rgba_unmultiplied(128, 128, 128, 51)
                };
                let badge_text = if view.is_winner || dark {
                    Color32::WHITE
                } else {
                    Color32::BLACK
                };
                ui.add_space(8.0);
                ui.label(
                    RichText::new(score.to_string())
                        .size(32.0)
                        .strong()
                        .color(badge_text)
                        .background_color(badge),
                );

                if !config.non_cuber && !awaiting {
                    ui.add_space(6.0);
                    ui.label(
                        RichText::new(&snapshot.scramble_text)
                            .size(15.0)
                            .color(if dark {
                                hex_color("#aaaaaa")
                            } else {
                                hex_color("#666666")
                            }),
                    );
                }

                ui.add_space(10.0);
                if awaiting && !config.non_cuber {
                    self.penalty_prompt(ui, slot, dark);
                } else if view.display == "DNF" {
                    ui.label(
                        RichText::new("DNF")
                            .size(48.0)
                            .strong()
                            .color(hex_color("#f44336")),
                    );
                } else {
                    ui.horizontal_wrapped(|ui| {
                        ui.add_space(ui.available_width() / 2.0 - 80.0);
                        ui.label(
                            RichText::new(&view.display)
                                .size(48.0)
                                .strong()
                                .color(time_color),
                        );
                        if view.plus_two {
                            ui.label(
                                RichText::new("+2")
                                    .size(24.0)
                                    .strong()
                                    .color(hex_color("#FF9800")),
                            );
                        }
                    });
                }

                if let Some(last) = &view.last_display {
                    if !awaiting && !config.non_cuber {
                        ui.add_space(6.0);
                        ui.label(
                            RichText::new(format!("Dernier: {last}"))
                                .size(13.0)
                                .color(if dark {
                                    hex_color("#666666")
                                } else {
                                    hex_color("#999999")
                                }),
                        );
                    }
                }
            });
        });
    }

    fn penalty_prompt(&self, ui: &mut egui::Ui, slot: usize, dark: bool) {
        ui.label(
            RichText::new("Pénalité ?")
                .size(20.0)
                .strong()
                .color(if dark { Color32::WHITE } else { Color32::BLACK }),
        );
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.add_space(ui.available_width() / 2.0 - 110.0);
            let ok_fill = if dark {
                hex_color("#2a2a2a")
            } else {
                hex_color("#e0e0e0")
            };
            if ui
                .add(egui::Button::new(RichText::new("OK").size(18.0).strong()).fill(ok_fill))
                .clicked()
            {
                self.handle
                    .send(BattleCommand::SelectPenalty(slot, Penalty::None));
            }
            if ui
                .add(
                    egui::Button::new(
                        RichText::new("+2").size(18.0).strong().color(Color32::WHITE),
                    )
                    .fill(hex_color("#FF9800")),
                )
                .clicked()
            {
                self.handle
                    .send(BattleCommand::SelectPenalty(slot, Penalty::PlusTwo));
            }
            if ui
                .add(
                    egui::Button::new(
                        RichText::new("DNF").size(18.0).strong().color(Color32::WHITE),
                    )
                    .fill(hex_color("#f44336")),
                )
                .clicked()
            {
                self.handle
                    .send(BattleCommand::SelectPenalty(slot, Penalty::Dnf));
            }
        });
    }

    fn center_ui(&self, ui: &mut egui::Ui, rect: Rect, snapshot: &BattleSnapshot, dark: bool) {
        let config = &snapshot.config;
        let background = if config.full_black {
            Color32::BLACK
        } else if dark {
            hex_color("#1a1a1a")
        } else {
            hex_color("#f5f5f5")
        };
        ui.painter().rect_filled(rect, 0, background);

        ui.scope_builder(egui::UiBuilder::new().max_rect(rect), |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(4.0);
                let text_color = if dark { Color32::WHITE } else { Color32::BLACK };
                if config.best_of_mode {
                    ui.label(
                        RichText::new(format!(
                            "BO{}: {} - {}",
                            config.best_of_rounds, snapshot.bo_scores[0], snapshot.bo_scores[1]
                        ))
                        .size(18.0)
                        .strong()
                        .color(text_color),
                    );
                    if let Some(winner) = snapshot.bo_winner {
                        ui.label(
                            RichText::new(format!("Joueur {} gagne le BO !", winner + 1))
                                .size(14.0)
                                .strong()
                                .color(hex_color(config.color_theme.hex())),
                        );
                    }
                } else {
                    ui.label(
                        RichText::new(format!(
                            "{} - {}",
                            snapshot.scores[0], snapshot.scores[1]
                        ))
                        .size(18.0)
                        .strong()
                        .color(text_color),
                    );
                }
                let reset = ui.add(
                    egui::Button::new(
                        RichText::new("Reset Scores")
                            .size(12.0)
                            .italics()
                            .color(hex_color("#888888")),
                    )
                    .frame(false),
                );
                if reset.clicked() {
                    self.handle.send(BattleCommand::ResetScores);
                }
            });
        });
    }
}

impl eframe::App for CubeDuelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let snapshot = self.handle.snapshot();
        let dark = ctx.style().visuals.dark_mode;
        let screen = ctx.screen_rect();

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(if snapshot.config.full_black {
                Color32::BLACK
            } else if dark {
                Color32::BLACK
            } else {
                Color32::WHITE
            }))
            .show(ctx, |ui| {
                for (slot, rect) in self.zones(screen, snapshot.config.player_count) {
                    self.zone_ui(ui, slot, rect, &snapshot, dark);
                }
                self.center_ui(ui, self.center_strip(screen), &snapshot, dark);
            });

        let any_running = snapshot
            .timers
            .iter()
            .any(|view| view.phase == TimerPhase::Running);
        if any_running {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

fn split_columns(rect: Rect) -> (Rect, Rect) {
    let left = Rect::from_min_size(rect.min, Vec2::new(rect.width() / 2.0, rect.height()));
    let right = Rect::from_min_size(
        Pos2::new(rect.min.x + rect.width() / 2.0, rect.min.y),
        Vec2::new(rect.width() / 2.0, rect.height()),
    );
    (left, right)
}

fn hex_color(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');
    let parse = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(0);
    if hex.len() == 6 {
        Color32::from_rgb(parse(0..2), parse(2..4), parse(4..6))
    } else {
        Color32::GRAY
    }
}
