use crate::conversation::script::{
    ASSISTANT_LABEL, COMPOSER_HINT, ENTRY_BUTTON, ENTRY_HIGHLIGHT, ENTRY_LINES, STATUS_ACTIVE,
    USER_LABEL, WORDMARK,
};
use crate::conversation::{ConversationState, Message, Phase, Role};
use crate::event::AppEvent;
use crate::gateway::Dispatcher;
use crate::theme::Theme;
use eframe::egui::{self, Align, Key, Layout, RichText, ScrollArea, TextStyle};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

const REVEAL_SECONDS: f32 = 0.8;
const REPAINT_INTERVAL: Duration = Duration::from_millis(50);

pub struct SyrusApp {
    rx: Receiver<AppEvent>,
    dispatcher: Dispatcher,
    conversation: ConversationState,
    theme: Theme,
    scroll_to_bottom: bool,
    focus_composer: bool,
}

impl SyrusApp {
    pub fn new(rx: Receiver<AppEvent>, dispatcher: Dispatcher) -> Self {
        Self {
            rx,
            dispatcher,
            conversation: ConversationState::new(),
            theme: Theme::default(),
            scroll_to_bottom: false,
            focus_composer: false,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    fn initialize(&mut self) {
        if self.conversation.start() {
            tracing::info!("session initialized");
            self.scroll_to_bottom = true;
            self.focus_composer = true;
        }
    }

    fn submit_draft(&mut self) {
        if let Some(request) = self.conversation.submit_draft() {
            self.dispatcher.dispatch(request);
            self.scroll_to_bottom = true;
        }
        self.focus_composer = true;
    }

    fn drain_events(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.apply_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("event channel disconnected");
                    break;
                }
            }
        }
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::GatewayResult(outcome) => {
                let ticket = outcome.ticket;
                if self.conversation.on_gateway_result(outcome) {
                    self.scroll_to_bottom = true;
                    self.focus_composer = true;
                } else {
                    tracing::debug!(ticket, "discarded gateway result with no matching request");
                }
            }
        }
    }

    #[cfg(test)]
    fn wait_for_event(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => {
                self.apply_event(event);
                true
            }
            Err(_) => false,
        }
    }

    fn render_entry_screen(&mut self, ctx: &egui::Context) {
        ctx.animate_bool_with_time(reveal_id(), false, REVEAL_SECONDS);

        let mut initialize = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space((ui.available_height() * 0.28).max(self.theme.spacing_32));
                ui.label(
                    RichText::new(letter_spaced(WORDMARK))
                        .size(12.0)
                        .color(self.theme.text_dim),
                );
                ui.add_space(self.theme.spacing_32 + self.theme.spacing_16);

                ui.label(RichText::new(ENTRY_HIGHLIGHT).color(self.theme.text_primary));
                ui.add_space(self.theme.spacing_16);
                for line in ENTRY_LINES {
                    ui.label(RichText::new(line).color(self.theme.text_secondary));
                }
                ui.add_space(self.theme.spacing_32 * 2.0);

                let button = egui::Button::new(
                    RichText::new(letter_spaced(&ENTRY_BUTTON.to_uppercase()))
                        .color(self.theme.text_secondary),
                )
                .min_size(egui::vec2(220.0, 48.0));
                if ui.add(button).clicked() {
                    initialize = true;
                }
            });
        });

        if initialize {
            self.initialize();
        }
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        let time = ctx.input(|i| i.time);
        egui::TopBottomPanel::top("header")
            .frame(self.theme.header_frame())
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(letter_spaced(WORDMARK))
                            .size(11.0)
                            .color(self.theme.text_dim),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(
                            RichText::new(letter_spaced(&STATUS_ACTIVE.to_uppercase()))
                                .size(10.0)
                                .color(self.theme.text_dim),
                        );
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        let opacity = pulse(time, 2.0, 1.0, 0.4);
                        ui.painter().circle_filled(
                            rect.center(),
                            3.0,
                            self.theme.terminal_green.gamma_multiply(opacity),
                        );
                    });
                });
            });
    }

    fn render_composer(&mut self, ctx: &egui::Context) {
        let mut send_now = false;

        egui::TopBottomPanel::bottom("composer")
            .frame(
                egui::Frame::new()
                    .fill(self.theme.bg_primary)
                    .inner_margin(egui::Margin::symmetric(
                        self.theme.spacing_32 as i8,
                        self.theme.spacing_24 as i8,
                    )),
            )
            .show(ctx, |ui| {
                self.theme.composer_frame().show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.add_space(self.theme.spacing_16);
                        ui.label(RichText::new(">").monospace().color(self.theme.accent_dim));

                        let input_width = (ui.available_width() - 64.0).max(80.0);
                        let response = ui.add(
                            egui::TextEdit::singleline(self.conversation.draft_mut())
                                .hint_text(RichText::new(COMPOSER_HINT).color(self.theme.text_dim))
                                .text_color(self.theme.text_primary)
                                .font(TextStyle::Monospace)
                                .frame(false)
                                .margin(egui::Margin::symmetric(0, 14))
                                .desired_width(input_width),
                        );

                        if self.focus_composer {
                            response.request_focus();
                            self.focus_composer = false;
                        }

                        if response.lost_focus()
                            && ui.input(|i| i.key_pressed(Key::Enter) && !i.modifiers.shift)
                        {
                            send_now = true;
                        }

                        let arrow = egui::Button::new(
                            RichText::new("→").size(18.0).color(self.theme.text_dim),
                        )
                        .frame(false);
                        send_now |= ui.add_enabled(self.conversation.can_submit(), arrow).clicked();
                    });
                });
            });

        if send_now {
            self.submit_draft();
        }
    }

    fn render_transcript(&mut self, ctx: &egui::Context) {
        let reveal = ctx.animate_bool_with_time(reveal_id(), true, REVEAL_SECONDS);
        let time = ctx.input(|i| i.time);
        let scroll_to_bottom = self.scroll_to_bottom;

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(self.theme.bg_primary)
                    .inner_margin(egui::Margin::same(self.theme.spacing_32 as i8)),
            )
            .show(ctx, |ui| {
                ui.multiply_opacity(reveal);
                ScrollArea::vertical()
                    .id_salt("transcript")
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        ui.spacing_mut().item_spacing.y = self.theme.spacing_24;
                        for message in self.conversation.history() {
                            self.render_message(ui, message);
                        }

                        if self.conversation.is_waiting() {
                            self.render_typing(ui, time);
                        }

                        if scroll_to_bottom {
                            ui.scroll_to_cursor(Some(Align::BOTTOM));
                        }
                    });
            });
        self.scroll_to_bottom = false;
    }

    fn render_message(&self, ui: &mut egui::Ui, message: &Message) {
        let max_width = ui.available_width() * self.theme.message_width_ratio;
        let (label, layout) = match message.role {
            Role::User => (USER_LABEL, Layout::top_down(Align::Max)),
            Role::Assistant => (ASSISTANT_LABEL, Layout::top_down(Align::Min)),
        };

        ui.with_layout(layout, |ui| {
            ui.set_max_width(max_width);
            ui.spacing_mut().item_spacing.y = self.theme.spacing_8;
            let label_color = match message.role {
                Role::User => self.theme.text_dim,
                Role::Assistant => self.theme.accent_dim,
            };
            ui.label(RichText::new(letter_spaced(label)).size(10.0).color(label_color));

            match message.role {
                Role::User => {
                    self.theme.user_message_frame().show(ui, |ui| {
                        ui.label(RichText::new(&message.content).color(self.theme.text_primary));
                    });
                }
                Role::Assistant => {
                    ui.label(RichText::new(&message.content).color(self.theme.text_secondary));
                }
            }
        });
    }

    fn render_typing(&self, ui: &mut egui::Ui, time: f64) {
        ui.with_layout(Layout::top_down(Align::Min), |ui| {
            ui.spacing_mut().item_spacing.y = self.theme.spacing_8;
            ui.label(
                RichText::new(letter_spaced(ASSISTANT_LABEL))
                    .size(10.0)
                    .color(self.theme.accent_dim),
            );
            let (rect, _) = ui.allocate_exact_size(egui::vec2(24.0, 12.0), egui::Sense::hover());
            for index in 0..3u8 {
                let opacity = pulse(time - f64::from(index) * 0.2, 1.4, 0.3, 1.0);
                let center = egui::pos2(rect.left() + 2.0 + index as f32 * 8.0, rect.center().y);
                ui.painter()
                    .circle_filled(center, 2.0, self.theme.accent_dim.gamma_multiply(opacity));
            }
        });
    }
}

impl eframe::App for SyrusApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        if self.conversation.phase() == Phase::NotStarted {
            self.render_entry_screen(ctx);
            return;
        }

        self.render_header(ctx);
        self.render_composer(ctx);
        self.render_transcript(ctx);
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}

fn reveal_id() -> egui::Id {
    egui::Id::new("syrus_chat_reveal")
}

fn letter_spaced(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (index, ch) in text.chars().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Triangle wave over `period` seconds: `edge` at both ends, `mid` halfway.
fn pulse(time: f64, period: f64, edge: f32, mid: f32) -> f32 {
    let phase = time.rem_euclid(period) / period;
    let towards_mid = 1.0 - (2.0 * phase - 1.0).abs();
    edge + (mid - edge) * towards_mid as f32
}
